//! Table-of-contents levels
//!
//! `\section`/`\subsection` headings form an implicit two-level hierarchy:
//! there are no closing markers, the next same-or-higher heading token ends
//! the scope. The nesting rules are enforced at construction: a section only
//! attaches to the document root, a subsection only to a section.

use serde::Serialize;

use crate::latex::ast::command::Command;
use crate::latex::ast::node::{Node, NodeKind};
use crate::latex::ast::section::Section;
use crate::latex::error::LatexError;

/// A top-level `\section` heading with its implicit body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TocSection {
    pub section: Section,
}

impl TocSection {
    pub fn new(begin: Command, body: Vec<Node>) -> Result<Self, LatexError> {
        Ok(Self {
            section: Section::from_begin(begin, body, NodeKind::TocSection)?,
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.section.name()
    }

    pub fn body(&self) -> &[Node] {
        &self.section.body
    }
}

/// A `\subsection` heading, valid only inside a `TocSection`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TocSubSection {
    pub section: Section,
}

impl TocSubSection {
    pub fn new(begin: Command, body: Vec<Node>) -> Result<Self, LatexError> {
        Ok(Self {
            section: Section::from_begin(begin, body, NodeKind::TocSubSection)?,
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.section.name()
    }

    pub fn body(&self) -> &[Node] {
        &self.section.body
    }
}
