//! Generic command node

use std::fmt;

use serde::Serialize;

use crate::latex::ast::argument::CommandArgument;

/// A `\name` command with its captured bracket groups, in source order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Command {
    pub name: String,
    pub arguments: Vec<CommandArgument>,
}

impl Command {
    pub fn new(name: impl Into<String>, arguments: Vec<CommandArgument>) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }

    pub fn first_argument(&self) -> Option<&CommandArgument> {
        self.arguments.first()
    }

    /// The last argument carries the command body for wrapper-style commands
    pub fn body(&self) -> Option<&CommandArgument> {
        self.arguments.last()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\\{}", self.name)?;
        for argument in &self.arguments {
            let (open, close) = if argument.optional {
                ('[', ']')
            } else {
                ('{', '}')
            };
            write!(f, "{}", open)?;
            for child in &argument.children {
                write!(f, "{}", child)?;
            }
            write!(f, "{}", close)?;
        }
        Ok(())
    }
}
