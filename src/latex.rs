//! LaTeX front-end: tokenizer, token stream, AST and parser
//!
//! The pipeline is raw text → tokenizer → token stream → parser → document
//! tree. Everything here is a pure function of the input string: no I/O, no
//! shared state across calls, so independent parses are safe to run in
//! parallel.

pub mod ast;
pub mod error;
pub mod parser;
pub mod stream;
pub mod tokenizer;

pub use ast::Document;
pub use error::LatexError;
pub use parser::parse;
pub use stream::TokenStream;
pub use tokenizer::{tokenize, Token, TokenKind};
