//! Math block environment
//!
//! Environments like `align` or `tabular` have an internal grammar of their
//! own, so their body collapses to a single opaque `Math` leaf (plus any
//! `\label` commands preserved structurally alongside it).

use serde::Serialize;

use crate::latex::ast::command::Command;
use crate::latex::ast::label::Label;
use crate::latex::ast::math::Math;
use crate::latex::ast::node::{Node, NodeKind};
use crate::latex::ast::section::Section;
use crate::latex::error::LatexError;

/// A section whose content is mathematical notation captured verbatim
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MathSection {
    pub section: Section,
}

impl MathSection {
    pub fn new(begin: Command, body: Vec<Node>) -> Result<Self, LatexError> {
        Ok(Self {
            section: Section::from_begin(begin, body, NodeKind::MathSection)?,
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.section.name()
    }

    /// The opaque formula leaf holding the environment's body text
    pub fn formulae(&self) -> Option<&Math> {
        self.section.body.iter().find_map(|node| match node {
            Node::Math(math) => Some(math),
            _ => None,
        })
    }

    /// The first label preserved from the environment body
    pub fn label(&self) -> Option<&Label> {
        self.section.body.iter().find_map(|node| match node {
            Node::Label(label) => Some(label),
            _ => None,
        })
    }
}
