//! Command argument container

use serde::Serialize;

use crate::latex::ast::node::{validate_children, Node, NodeKind};
use crate::latex::ast::text::Text;
use crate::latex::error::LatexError;

/// One bracket group attached to a command: `{…}` mandatory, `[…]` optional
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandArgument {
    pub optional: bool,
    pub children: Vec<Node>,
}

impl CommandArgument {
    pub fn new(optional: bool, children: Vec<Node>) -> Result<Self, LatexError> {
        validate_children(NodeKind::CommandArgument, &children)?;
        Ok(Self { optional, children })
    }

    pub fn mandatory(children: Vec<Node>) -> Result<Self, LatexError> {
        Self::new(false, children)
    }

    /// Convenience for arguments holding a single text value
    pub fn from_text(value: impl Into<String>) -> Self {
        Self {
            optional: false,
            children: vec![Node::Text(Text::new(value))],
        }
    }

    pub fn first_value(&self) -> Option<&Node> {
        self.children.first()
    }

    /// The first child when it is a plain text leaf
    pub fn first_text(&self) -> Option<&str> {
        match self.children.first() {
            Some(Node::Text(text)) => Some(&text.value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latex::ast::section::Section;
    use crate::latex::ast::toc::TocSection;

    #[test]
    fn test_first_text() {
        let argument = CommandArgument::from_text("intro");
        assert_eq!(argument.first_text(), Some("intro"));
        assert!(!argument.optional);
    }

    #[test]
    fn test_toc_section_rejected_inside_argument() {
        let toc = TocSection {
            section: Section {
                name: Some("Intro".to_string()),
                arguments: Vec::new(),
                body: Vec::new(),
            },
        };
        let result = CommandArgument::new(false, vec![Node::TocSection(toc)]);
        assert!(matches!(
            result,
            Err(LatexError::InvalidNodeParent { .. })
        ));
    }
}
