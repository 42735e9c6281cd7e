//! Bibliography entry
//!
//! `\bibitem{ref}{author}{title}{publisher}{source}` with positional
//! sub-fields; trailing ones may be absent.

use serde::Serialize;

use crate::latex::ast::argument::CommandArgument;

/// A `\bibitem` command with its positional book fields
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BibItem {
    pub name: String,
    pub arguments: Vec<CommandArgument>,
}

impl BibItem {
    pub fn new(name: String, arguments: Vec<CommandArgument>) -> Self {
        Self { name, arguments }
    }

    /// The citation key used by `\cite`
    pub fn ref_name(&self) -> Option<&str> {
        self.arguments.first().and_then(|argument| argument.first_text())
    }

    pub fn book_author(&self) -> Option<&CommandArgument> {
        self.arguments.get(1)
    }

    pub fn book_name(&self) -> Option<&CommandArgument> {
        self.arguments.get(2)
    }

    pub fn book_publisher(&self) -> Option<&CommandArgument> {
        self.arguments.get(3)
    }

    pub fn book_source(&self) -> Option<&CommandArgument> {
        self.arguments.get(4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_fields() {
        let item = BibItem::new(
            "bibitem".to_string(),
            vec![
                CommandArgument::from_text("knuth"),
                CommandArgument::from_text("D. E. Knuth"),
                CommandArgument::from_text("The TeXbook"),
            ],
        );
        assert_eq!(item.ref_name(), Some("knuth"));
        assert!(item.book_author().is_some());
        assert!(item.book_name().is_some());
        assert!(item.book_publisher().is_none());
        assert!(item.book_source().is_none());
    }
}
