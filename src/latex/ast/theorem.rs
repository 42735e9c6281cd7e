//! Theorem-like environments
//!
//! Every theorem kind shares the section shape and additionally pulls out an
//! optional label (a direct `\label` child) and an optional title, taken
//! from a bolded run inside the body or from an optional argument of the
//! opening command.

use serde::Serialize;

use crate::latex::ast::command::Command;
use crate::latex::ast::label::Label;
use crate::latex::ast::node::{Node, NodeKind};
use crate::latex::ast::section::Section;
use crate::latex::ast::style::StyleKind;
use crate::latex::error::LatexError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TheoremKind {
    Assumption,
    Axiom,
    Conjecture,
    Corollary,
    Definition,
    Example,
    Lemma,
    Notation,
    Proof,
    Proposition,
    Remark,
    Result,
    Solution,
    Theorem,
}

impl TheoremKind {
    /// The environment name, also used as the output tag name
    pub fn name(&self) -> &'static str {
        match self {
            TheoremKind::Assumption => "assumption",
            TheoremKind::Axiom => "axiom",
            TheoremKind::Conjecture => "conjecture",
            TheoremKind::Corollary => "corollary",
            TheoremKind::Definition => "definition",
            TheoremKind::Example => "example",
            TheoremKind::Lemma => "lemma",
            TheoremKind::Notation => "notation",
            TheoremKind::Proof => "proof",
            TheoremKind::Proposition => "proposition",
            TheoremKind::Remark => "remark",
            TheoremKind::Result => "result",
            TheoremKind::Solution => "solution",
            TheoremKind::Theorem => "theorem",
        }
    }
}

/// A theorem-like section with its extracted label and title
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Theorem {
    pub kind: TheoremKind,
    pub section: Section,
    pub label: Option<Label>,
    pub title: Option<String>,
}

impl Theorem {
    pub fn build(kind: TheoremKind, begin: Command, body: Vec<Node>) -> Result<Node, LatexError> {
        let section = Section::from_begin(begin, body, NodeKind::Theorem)?;

        let label = section.body.iter().find_map(|node| match node {
            Node::Label(label) => Some(label.clone()),
            _ => None,
        });

        let title = find_bold_title(&section.body).or_else(|| {
            section
                .arguments
                .first()
                .filter(|argument| argument.optional)
                .and_then(|argument| argument.first_text())
                .map(str::to_string)
        });

        Ok(Node::Theorem(Theorem {
            kind,
            section,
            label,
            title,
        }))
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}

/// First `\bf{…}` run anywhere in the body, breadth-first
fn find_bold_title(body: &[Node]) -> Option<String> {
    let mut queue: Vec<&Node> = body.iter().collect();
    let mut index = 0;
    while index < queue.len() {
        let node = queue[index];
        if let Node::Style(style) = node {
            if style.kind == StyleKind::Bold {
                return style
                    .first_argument()
                    .and_then(|argument| argument.first_text())
                    .map(str::to_string);
            }
        }
        queue.extend(node.child_nodes());
        index += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latex::ast::argument::CommandArgument;
    use crate::latex::ast::style::StyleCommand;
    use crate::latex::ast::text::Text;

    fn begin(name: &str) -> Command {
        Command::new("begin", vec![CommandArgument::from_text(name)])
    }

    #[test]
    fn test_title_from_bold_run() {
        let body = vec![
            Node::Style(StyleCommand::new(
                StyleKind::Bold,
                "bf".to_string(),
                vec![CommandArgument::from_text("Mean value theorem")],
            )),
            Node::Text(Text::new("Let f be continuous.")),
        ];
        let node = Theorem::build(TheoremKind::Theorem, begin("theorem"), body).unwrap();
        match node {
            Node::Theorem(theorem) => {
                assert_eq!(theorem.title.as_deref(), Some("Mean value theorem"));
                assert!(theorem.label.is_none());
            }
            other => panic!("expected a theorem, got {}", other.node_type()),
        }
    }

    #[test]
    fn test_title_from_optional_argument() {
        let begin = Command::new(
            "begin",
            vec![
                CommandArgument::from_text("definition"),
                CommandArgument::new(
                    true,
                    vec![Node::Text(Text::new("Continuity"))],
                )
                .unwrap(),
            ],
        );
        let node = Theorem::build(TheoremKind::Definition, begin, Vec::new()).unwrap();
        match node {
            Node::Theorem(theorem) => {
                assert_eq!(theorem.title.as_deref(), Some("Continuity"));
            }
            other => panic!("expected a theorem, got {}", other.node_type()),
        }
    }

    #[test]
    fn test_label_is_extracted() {
        let label = Label::new(
            "label".to_string(),
            vec![CommandArgument::from_text("V:main")],
        )
        .unwrap();
        let node = Theorem::build(
            TheoremKind::Lemma,
            begin("lemma"),
            vec![Node::Label(label)],
        )
        .unwrap();
        match node {
            Node::Theorem(theorem) => {
                assert_eq!(
                    theorem.label.as_ref().map(|l| l.label_name()),
                    Some("V:main")
                );
            }
            other => panic!("expected a theorem, got {}", other.node_type()),
        }
    }
}
