//! Environment boundary command
//!
//! `\begin{name}` and `\end{name}` are ordinary commands that additionally
//! resolve the environment name out of their first argument; the parser
//! pairs them up and fails on a name mismatch.

use serde::Serialize;

use crate::latex::ast::command::Command;

/// A `\begin`/`\end` command with its resolved environment name
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionBoundary {
    pub command: Command,
    pub section_name: Option<String>,
}

impl SectionBoundary {
    pub fn new(command: Command) -> Self {
        let section_name = command
            .first_argument()
            .and_then(|argument| argument.first_text())
            .map(str::to_string);
        Self {
            command,
            section_name,
        }
    }

    pub fn name(&self) -> &str {
        &self.command.name
    }

    pub fn section_name(&self) -> Option<&str> {
        self.section_name.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latex::ast::argument::CommandArgument;

    #[test]
    fn test_resolves_environment_name() {
        let boundary =
            SectionBoundary::new(Command::new("begin", vec![CommandArgument::from_text("align")]));
        assert_eq!(boundary.name(), "begin");
        assert_eq!(boundary.section_name(), Some("align"));
    }

    #[test]
    fn test_missing_name_is_tolerated() {
        let boundary = SectionBoundary::new(Command::new("end", Vec::new()));
        assert_eq!(boundary.section_name(), None);
    }
}
