//! Name→builder registries for node promotion
//!
//! The parser promotes generic commands and finished environments to
//! specific node kinds by looking their names up here. Adding an environment
//! or command kind is a single registration, the parsing control flow never
//! changes.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::latex::ast::{
    BibItem, Command, CommandArgument, Label, Node, NodeKind, Section, SectionBoundary,
    StyleCommand, StyleKind, Theorem, TheoremKind,
};
use crate::latex::error::LatexError;

type SectionBuilder = fn(Command, Vec<Node>) -> Result<Node, LatexError>;
type CommandBuilder = fn(String, Vec<CommandArgument>) -> Result<Node, LatexError>;

static SECTION_BUILDERS: Lazy<HashMap<&'static str, SectionBuilder>> = Lazy::new(|| {
    let mut map: HashMap<&'static str, SectionBuilder> = HashMap::new();
    map.insert("assumption", |b, n| {
        Theorem::build(TheoremKind::Assumption, b, n)
    });
    map.insert("axiom", |b, n| Theorem::build(TheoremKind::Axiom, b, n));
    map.insert("conjecture", |b, n| {
        Theorem::build(TheoremKind::Conjecture, b, n)
    });
    map.insert("corollary", |b, n| {
        Theorem::build(TheoremKind::Corollary, b, n)
    });
    map.insert("definition", |b, n| {
        Theorem::build(TheoremKind::Definition, b, n)
    });
    map.insert("example", |b, n| Theorem::build(TheoremKind::Example, b, n));
    map.insert("lemma", |b, n| Theorem::build(TheoremKind::Lemma, b, n));
    map.insert("notation", |b, n| Theorem::build(TheoremKind::Notation, b, n));
    map.insert("proof", |b, n| Theorem::build(TheoremKind::Proof, b, n));
    // legacy alias used throughout the source documents
    map.insert("pf", |b, n| Theorem::build(TheoremKind::Proof, b, n));
    map.insert("proposition", |b, n| {
        Theorem::build(TheoremKind::Proposition, b, n)
    });
    map.insert("remark", |b, n| Theorem::build(TheoremKind::Remark, b, n));
    map.insert("result", |b, n| Theorem::build(TheoremKind::Result, b, n));
    map.insert("solution", |b, n| Theorem::build(TheoremKind::Solution, b, n));
    // Czech alias, see also the command-shaped form handled by the parser
    map.insert("reseni", |b, n| Theorem::build(TheoremKind::Solution, b, n));
    map.insert("theorem", |b, n| Theorem::build(TheoremKind::Theorem, b, n));
    map
});

static COMMAND_BUILDERS: Lazy<HashMap<&'static str, CommandBuilder>> = Lazy::new(|| {
    let mut map: HashMap<&'static str, CommandBuilder> = HashMap::new();
    for name in ["ms", "medskip", "smallskip", "bigskip", "par"] {
        map.insert(name, |name, arguments| {
            Ok(Node::Style(StyleCommand::new(
                StyleKind::NewParagraph,
                name,
                arguments,
            )))
        });
    }
    map.insert("uv", |name, arguments| {
        Ok(Node::Style(StyleCommand::new(
            StyleKind::TypographicQuote,
            name,
            arguments,
        )))
    });
    map.insert("ul", |name, arguments| {
        Ok(Node::Style(StyleCommand::new(
            StyleKind::Underlined,
            name,
            arguments,
        )))
    });
    map.insert("bf", |name, arguments| {
        Ok(Node::Style(StyleCommand::new(
            StyleKind::Bold,
            name,
            arguments,
        )))
    });
    map.insert("textit", |name, arguments| {
        Ok(Node::Style(StyleCommand::new(
            StyleKind::Italic,
            name,
            arguments,
        )))
    });
    map.insert("fbox", |name, arguments| {
        Ok(Node::Style(StyleCommand::new(
            StyleKind::Border,
            name,
            arguments,
        )))
    });
    map.insert("bibitem", |name, arguments| {
        Ok(Node::BibItem(BibItem::new(name, arguments)))
    });
    map.insert("label", |name, arguments| {
        Label::new(name, arguments).map(Node::Label)
    });
    map.insert("begin", |name, arguments| {
        Ok(Node::SectionBoundary(SectionBoundary::new(Command::new(
            name, arguments,
        ))))
    });
    map.insert("end", |name, arguments| {
        Ok(Node::SectionBoundary(SectionBoundary::new(Command::new(
            name, arguments,
        ))))
    });
    map
});

/// Promote a finished environment to its node kind; unknown names stay
/// plain sections
pub(crate) fn build_section(
    name: &str,
    begin: Command,
    body: Vec<Node>,
) -> Result<Node, LatexError> {
    match SECTION_BUILDERS.get(name) {
        Some(builder) => builder(begin, body),
        None => Section::from_begin(begin, body, NodeKind::Section).map(Node::Section),
    }
}

/// Promote a parsed command to its node kind; unknown names stay plain
/// commands
pub(crate) fn build_command(
    name: String,
    arguments: Vec<CommandArgument>,
) -> Result<Node, LatexError> {
    match COMMAND_BUILDERS.get(name.as_str()) {
        Some(builder) => builder(name, arguments),
        None => Ok(Node::Command(Command::new(name, arguments))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_environment_falls_back_to_section() {
        let begin = Command::new("begin", vec![CommandArgument::from_text("center")]);
        let node = build_section("center", begin, Vec::new()).unwrap();
        assert_eq!(node.node_type(), "Section");
    }

    #[test]
    fn test_theorem_aliases() {
        for name in ["pf", "proof"] {
            let begin = Command::new("begin", vec![CommandArgument::from_text(name)]);
            match build_section(name, begin, Vec::new()).unwrap() {
                Node::Theorem(theorem) => assert_eq!(theorem.kind, TheoremKind::Proof),
                other => panic!("expected a theorem, got {}", other.node_type()),
            }
        }
    }

    #[test]
    fn test_style_promotion() {
        match build_command("textit".to_string(), Vec::new()).unwrap() {
            Node::Style(style) => assert_eq!(style.kind, StyleKind::Italic),
            other => panic!("expected a style, got {}", other.node_type()),
        }
    }

    #[test]
    fn test_unknown_command_stays_generic() {
        match build_command("dots".to_string(), Vec::new()).unwrap() {
            Node::Command(command) => assert_eq!(command.name, "dots"),
            other => panic!("expected a command, got {}", other.node_type()),
        }
    }
}
