//! MediaWiki back-end: macro expansion, serialization and output cleanup
//!
//! The expansion engine is independent of document parsing: it interprets
//! raw formula/text fragments with its own tokenizer. The serializer walks a
//! parsed document read-only and calls into the engine per formula.

pub mod configurator;
pub mod expansion;
pub mod helpers;
pub mod serializer;

pub use configurator::configure_mb102;
pub use expansion::{ExpansionError, MacroExpansion};
pub use serializer::{RenderedSection, SerializeError, Serializer};
