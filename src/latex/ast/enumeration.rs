//! List item
//!
//! One `\item` of an `itemize`/`enumerate` environment. The item's own
//! arguments come first; the captured body is appended as a final mandatory
//! argument, so `body()` is always the last one.

use serde::Serialize;

use crate::latex::ast::argument::CommandArgument;

/// An `\item` with its captured body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumerationItem {
    pub arguments: Vec<CommandArgument>,
}

impl EnumerationItem {
    pub fn new(arguments: Vec<CommandArgument>) -> Self {
        Self { arguments }
    }

    pub fn first_argument(&self) -> Option<&CommandArgument> {
        self.arguments.first()
    }

    pub fn body(&self) -> Option<&CommandArgument> {
        self.arguments.last()
    }
}
