//! Errors raised while tokenizing and parsing LaTeX sources
//!
//! Every error here is fatal: the parser has no partial-result mode, so a
//! caller that wants best-effort conversion catches at the `parse` boundary
//! and skips the offending document.

use std::fmt;

use crate::latex::tokenizer::Token;

/// Errors produced by the tokenizer and the parser
#[derive(Debug, Clone, PartialEq)]
pub enum LatexError {
    /// No tokenization rule matched at the given input position
    Tokenize {
        offset: usize,
        line: u32,
        column: u32,
    },
    /// The stream ended while a rule still expected tokens
    UnexpectedEnd,
    /// The stream produced a token of a type the current rule cannot accept
    UnexpectedToken { found: Token, expected: String },
    /// A parsed node is not of the type the calling rule required
    UnexpectedNode { found: String, expected: String },
    /// A node rejected the parent it was being attached to
    InvalidNodeParent {
        parent: &'static str,
        child: &'static str,
    },
    /// An `\end{X}` does not match the innermost open `\begin{Y}`
    SectionMismatch {
        begin: Option<String>,
        end: Option<String>,
    },
}

impl fmt::Display for LatexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LatexError::Tokenize {
                offset,
                line,
                column,
            } => write!(
                f,
                "No rule matches the input at offset {} (line {}, column {})",
                offset, line, column
            ),
            LatexError::UnexpectedEnd => write!(f, "Reached the end of stream"),
            LatexError::UnexpectedToken { found, expected } => write!(
                f,
                "Unexpected token {:?} '{}' at line {}, column {}, expected {}",
                found.kind, found.value, found.line, found.column, expected
            ),
            LatexError::UnexpectedNode { found, expected } => {
                write!(f, "Unexpected node {}, expected {}", found, expected)
            }
            LatexError::InvalidNodeParent { parent, child } => {
                write!(f, "The node {} cannot be a child of {}", child, parent)
            }
            LatexError::SectionMismatch { begin, end } => write!(
                f,
                "The ending \\end{{{}}} doesn't match the opening \\begin{{{}}}",
                end.as_deref().unwrap_or(""),
                begin.as_deref().unwrap_or("")
            ),
        }
    }
}

impl std::error::Error for LatexError {}
