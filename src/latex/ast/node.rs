//! The closed set of node variants and the parent-validity rules
//!
//! The tree is built once per parse call and never mutated afterwards. Each
//! variant declares which parents it accepts; `validate_children` runs at
//! construction time in every container constructor, so a structurally
//! invalid document fails with a typed error instead of producing a tree
//! that breaks later consumers.

use std::fmt;

use serde::Serialize;

use crate::latex::ast::bib_item::BibItem;
use crate::latex::ast::boundary::SectionBoundary;
use crate::latex::ast::command::Command;
use crate::latex::ast::enumeration::EnumerationItem;
use crate::latex::ast::label::Label;
use crate::latex::ast::math::Math;
use crate::latex::ast::math_section::MathSection;
use crate::latex::ast::section::Section;
use crate::latex::ast::style::StyleCommand;
use crate::latex::ast::text::Text;
use crate::latex::ast::theorem::Theorem;
use crate::latex::ast::toc::{TocSection, TocSubSection};
use crate::latex::error::LatexError;

/// A node of the parsed document tree
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Node {
    Text(Text),
    Math(Math),
    Command(Command),
    SectionBoundary(SectionBoundary),
    Style(StyleCommand),
    Label(Label),
    BibItem(BibItem),
    Section(Section),
    MathSection(MathSection),
    Theorem(Theorem),
    TocSection(TocSection),
    TocSubSection(TocSubSection),
    EnumerationItem(EnumerationItem),
}

/// Discriminates node variants (plus the two container kinds that are not
/// `Node` variants themselves) for parent validation and error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    CommandArgument,
    Text,
    Math,
    Command,
    SectionBoundary,
    Style,
    Label,
    BibItem,
    Section,
    MathSection,
    Theorem,
    TocSection,
    TocSubSection,
    EnumerationItem,
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Document => "Document",
            NodeKind::CommandArgument => "CommandArgument",
            NodeKind::Text => "Text",
            NodeKind::Math => "Math",
            NodeKind::Command => "Command",
            NodeKind::SectionBoundary => "SectionBoundary",
            NodeKind::Style => "Style",
            NodeKind::Label => "Label",
            NodeKind::BibItem => "BibItem",
            NodeKind::Section => "Section",
            NodeKind::MathSection => "MathSection",
            NodeKind::Theorem => "Theorem",
            NodeKind::TocSection => "TocSection",
            NodeKind::TocSubSection => "TocSubSection",
            NodeKind::EnumerationItem => "EnumerationItem",
        }
    }
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Text(_) => NodeKind::Text,
            Node::Math(_) => NodeKind::Math,
            Node::Command(_) => NodeKind::Command,
            Node::SectionBoundary(_) => NodeKind::SectionBoundary,
            Node::Style(_) => NodeKind::Style,
            Node::Label(_) => NodeKind::Label,
            Node::BibItem(_) => NodeKind::BibItem,
            Node::Section(_) => NodeKind::Section,
            Node::MathSection(_) => NodeKind::MathSection,
            Node::Theorem(_) => NodeKind::Theorem,
            Node::TocSection(_) => NodeKind::TocSection,
            Node::TocSubSection(_) => NodeKind::TocSubSection,
            Node::EnumerationItem(_) => NodeKind::EnumerationItem,
        }
    }

    pub fn node_type(&self) -> &'static str {
        self.kind().name()
    }

    /// Whether this node may be attached under a parent of the given kind.
    ///
    /// The table-of-contents levels are the only constrained variants: a
    /// `TocSection` lives directly under the document root, a
    /// `TocSubSection` only under a `TocSection`.
    pub fn validate_parent(&self, parent: NodeKind) -> bool {
        match self {
            Node::TocSection(_) => parent == NodeKind::Document,
            Node::TocSubSection(_) => parent == NodeKind::TocSection,
            _ => true,
        }
    }

    /// Direct child nodes, with command arguments flattened through
    pub fn child_nodes(&self) -> Vec<&Node> {
        match self {
            Node::Text(_) | Node::Math(_) => Vec::new(),
            Node::Command(command) => argument_children(&command.arguments),
            Node::SectionBoundary(boundary) => argument_children(&boundary.command.arguments),
            Node::Style(style) => argument_children(&style.arguments),
            Node::Label(label) => argument_children(&label.arguments),
            Node::BibItem(item) => argument_children(&item.arguments),
            Node::Section(section) => section_children(section),
            Node::MathSection(section) => section_children(&section.section),
            Node::Theorem(theorem) => section_children(&theorem.section),
            Node::TocSection(section) => section_children(&section.section),
            Node::TocSubSection(section) => section_children(&section.section),
            Node::EnumerationItem(item) => argument_children(&item.arguments),
        }
    }

    /// Breadth-first search over the subtree for the first node matching the
    /// predicate, this node excluded
    pub fn find_descendant(&self, predicate: impl Fn(&Node) -> bool) -> Option<&Node> {
        let mut queue: Vec<&Node> = self.child_nodes();
        let mut index = 0;
        while index < queue.len() {
            let node = queue[index];
            if predicate(node) {
                return Some(node);
            }
            let mut children = node.child_nodes();
            queue.append(&mut children);
            index += 1;
        }
        None
    }
}

fn argument_children(arguments: &[crate::latex::ast::argument::CommandArgument]) -> Vec<&Node> {
    arguments
        .iter()
        .flat_map(|argument| argument.children.iter())
        .collect()
}

fn section_children(section: &Section) -> Vec<&Node> {
    let mut children = argument_children(&section.arguments);
    children.extend(section.body.iter());
    children
}

/// Check every child against the parent kind it is about to be attached to
pub(crate) fn validate_children(parent: NodeKind, children: &[Node]) -> Result<(), LatexError> {
    for child in children {
        if !child.validate_parent(parent) {
            return Err(LatexError::InvalidNodeParent {
                parent: parent.name(),
                child: child.node_type(),
            });
        }
    }
    Ok(())
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Text(text) => write!(f, "{}", text.value),
            Node::Math(math) => write!(f, "{}", math.formulae),
            Node::Command(command) => write!(f, "{}", command),
            Node::SectionBoundary(boundary) => write!(f, "{}", boundary.command),
            Node::Style(style) => write!(
                f,
                "{}",
                Command {
                    name: style.name.clone(),
                    arguments: style.arguments.clone(),
                }
            ),
            Node::Label(label) => write!(f, "\\label{{{}}}", label.label_name),
            _ => write!(f, "{}({})", self.node_type(), self.child_nodes().len()),
        }
    }
}
