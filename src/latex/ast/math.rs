//! Math leaf
//!
//! Formula content is captured as opaque text and never re-parsed by the
//! document grammar; the macro expansion engine interprets it later, with
//! its own tokenizer.

use serde::Serialize;

/// A formula, either inline (`$…$`) or block (`$$…$$` and math environments)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Math {
    pub formulae: String,
    pub inline: bool,
}

impl Math {
    pub fn new(formulae: impl Into<String>, inline: bool) -> Self {
        Self {
            formulae: formulae.into(),
            inline,
        }
    }
}
