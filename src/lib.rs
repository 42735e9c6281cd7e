//! # tex2wiki
//!
//! Converter for a dialect of LaTeX lecture notes into MediaWiki markup.
//!
//! The pipeline has two independent halves: [`latex`] turns raw source text
//! into a typed, structure-validated document tree, and [`mediawiki`] walks
//! that tree to emit wiki markup, expanding the author macro catalog inside
//! every formula along the way.
//!
//! ```ignore
//! let document = tex2wiki::latex::parse(&source)?;
//! let sections = tex2wiki::mediawiki::Serializer::new().convert(&document)?;
//! ```

pub mod latex;
pub mod mediawiki;
