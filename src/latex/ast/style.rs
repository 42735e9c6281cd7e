//! Style wrapper commands
//!
//! Thin command specializations with no state of their own beyond the
//! wrapper kind: bold, italic, underline, border box, typographic quotes and
//! the paragraph-break family.

use serde::Serialize;

use crate::latex::ast::argument::CommandArgument;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StyleKind {
    Bold,
    Italic,
    Underlined,
    Border,
    TypographicQuote,
    NewParagraph,
}

/// A style command such as `\bf`, `\textit` or `\uv`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleCommand {
    pub kind: StyleKind,
    pub name: String,
    pub arguments: Vec<CommandArgument>,
}

impl StyleCommand {
    pub fn new(kind: StyleKind, name: String, arguments: Vec<CommandArgument>) -> Self {
        Self {
            kind,
            name,
            arguments,
        }
    }

    pub fn first_argument(&self) -> Option<&CommandArgument> {
        self.arguments.first()
    }

    pub fn body(&self) -> Option<&CommandArgument> {
        self.arguments.last()
    }
}
