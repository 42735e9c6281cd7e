//! AST node model
//!
//! A small closed hierarchy of node kinds. Containers validate their
//! children at construction time, so grammar constraints (a subsection only
//! nests under a section, a section only under the document root) surface as
//! typed errors instead of malformed trees.

pub mod argument;
pub mod bib_item;
pub mod boundary;
pub mod command;
pub mod document;
pub mod enumeration;
pub mod label;
pub mod math;
pub mod math_section;
pub mod node;
pub mod section;
pub mod style;
pub mod text;
pub mod theorem;
pub mod toc;

pub use argument::CommandArgument;
pub use bib_item::BibItem;
pub use boundary::SectionBoundary;
pub use command::Command;
pub use document::{Document, LabelEntry};
pub use enumeration::EnumerationItem;
pub use label::Label;
pub use math::Math;
pub use math_section::MathSection;
pub use node::{Node, NodeKind};
pub use section::Section;
pub use style::{StyleCommand, StyleKind};
pub use text::Text;
pub use theorem::{Theorem, TheoremKind};
pub use toc::{TocSection, TocSubSection};
