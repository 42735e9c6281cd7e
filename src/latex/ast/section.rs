//! Section element
//!
//! The base shape shared by every environment node: a name resolved from the
//! opening command, the opening command's trailing arguments, and the parsed
//! body. Specializations (math blocks, theorem-likes, table-of-contents
//! levels) wrap this struct rather than re-deriving the fields.

use serde::Serialize;

use crate::latex::ast::argument::CommandArgument;
use crate::latex::ast::command::Command;
use crate::latex::ast::node::{validate_children, Node, NodeKind};
use crate::latex::error::LatexError;

/// An explicitly or implicitly delimited region of the document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    /// Resolved from the opening command's first argument when it is text
    pub name: Option<String>,
    /// The opening command's arguments past the name
    pub arguments: Vec<CommandArgument>,
    pub body: Vec<Node>,
}

impl Section {
    /// Build from the opening command, validating the body against the
    /// concrete variant the section will become
    pub fn from_begin(
        begin: Command,
        body: Vec<Node>,
        kind: NodeKind,
    ) -> Result<Self, LatexError> {
        validate_children(kind, &body)?;
        let name = begin
            .first_argument()
            .and_then(|argument| argument.first_text())
            .map(str::to_string);
        let arguments = begin.arguments.into_iter().skip(1).collect();
        Ok(Self {
            name,
            arguments,
            body,
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn first_argument(&self) -> Option<&CommandArgument> {
        self.arguments.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latex::ast::text::Text;

    #[test]
    fn test_name_and_trailing_arguments() {
        let begin = Command::new(
            "begin",
            vec![
                CommandArgument::from_text("tabular"),
                CommandArgument::from_text("ll"),
            ],
        );
        let section = Section::from_begin(begin, Vec::new(), NodeKind::Section).unwrap();
        assert_eq!(section.name(), Some("tabular"));
        assert_eq!(section.first_argument().unwrap().first_text(), Some("ll"));
    }

    #[test]
    fn test_body_is_kept_in_order() {
        let begin = Command::new("begin", vec![CommandArgument::from_text("center")]);
        let body = vec![
            Node::Text(Text::new("a")),
            Node::Text(Text::new("b")),
        ];
        let section = Section::from_begin(begin, body, NodeKind::Section).unwrap();
        assert_eq!(section.body.len(), 2);
    }
}
