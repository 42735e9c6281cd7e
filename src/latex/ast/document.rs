//! Document root
//!
//! The root owns the top-level nodes and, at construction, walks the whole
//! tree once to index every label (together with its enclosing
//! table-of-contents chain and anchor) and every bibliography entry. The
//! indices replace upward parent lookups: the tree itself only ever points
//! downwards, so after construction all reads are lock-free and shareable.

use serde::Serialize;

use crate::latex::ast::bib_item::BibItem;
use crate::latex::ast::label::Label;
use crate::latex::ast::node::{validate_children, Node, NodeKind};
use crate::latex::ast::section::Section;
use crate::latex::ast::theorem::TheoremKind;
use crate::latex::ast::toc::TocSection;
use crate::latex::error::LatexError;

/// A label together with the context it was found in
#[derive(Debug, Clone, PartialEq)]
pub struct LabelEntry {
    pub label: Label,
    /// Title of the enclosing `\section`, when any
    pub section: Option<String>,
    /// Title of the enclosing `\subsection`, when any
    pub subsection: Option<String>,
    /// Anchor id derived from the nearest enclosing theorem or math block
    pub anchor: Option<String>,
}

/// The root of a parsed document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub children: Vec<Node>,
    #[serde(skip)]
    labels: Vec<LabelEntry>,
    #[serde(skip)]
    bib_items: Vec<BibItem>,
}

impl Document {
    pub fn new(children: Vec<Node>) -> Result<Self, LatexError> {
        validate_children(NodeKind::Document, &children)?;

        let mut labels = Vec::new();
        let mut bib_items = Vec::new();
        collect(&children, &IndexContext::default(), &mut labels, &mut bib_items);

        Ok(Self {
            children,
            labels,
            bib_items,
        })
    }

    /// Top-level `\section` scopes, in document order
    pub fn sections(&self) -> impl Iterator<Item = &TocSection> {
        self.children.iter().filter_map(|node| match node {
            Node::TocSection(section) => Some(section),
            _ => None,
        })
    }

    pub fn labels(&self) -> &[LabelEntry] {
        &self.labels
    }

    pub fn bib_items(&self) -> &[BibItem] {
        &self.bib_items
    }

    /// First label whose literal name matches exactly; `None` when missing
    pub fn find_label(&self, name: &str) -> Option<&LabelEntry> {
        self.labels
            .iter()
            .find(|entry| entry.label.label_name() == name)
    }

    /// First bibliography entry with the given citation key
    pub fn find_bib_item(&self, ref_name: &str) -> Option<&BibItem> {
        self.bib_items
            .iter()
            .find(|item| item.ref_name() == Some(ref_name))
    }
}

#[derive(Clone, Default)]
struct IndexContext {
    section: Option<String>,
    subsection: Option<String>,
    enclosure: Option<Enclosure>,
}

#[derive(Clone, Copy)]
enum Enclosure {
    Theorem(TheoremKind),
    MathSection,
}

fn collect(
    nodes: &[Node],
    context: &IndexContext,
    labels: &mut Vec<LabelEntry>,
    bib_items: &mut Vec<BibItem>,
) {
    for node in nodes {
        match node {
            Node::TocSection(toc) => {
                let mut inner = context.clone();
                inner.section = toc.name().map(str::to_string);
                inner.subsection = None;
                collect_section(&toc.section, &inner, labels, bib_items);
            }
            Node::TocSubSection(toc) => {
                let mut inner = context.clone();
                inner.subsection = toc.name().map(str::to_string);
                collect_section(&toc.section, &inner, labels, bib_items);
            }
            Node::Theorem(theorem) => {
                let mut inner = context.clone();
                inner.enclosure = Some(Enclosure::Theorem(theorem.kind));
                collect_section(&theorem.section, &inner, labels, bib_items);
            }
            Node::MathSection(section) => {
                let mut inner = context.clone();
                inner.enclosure = Some(Enclosure::MathSection);
                collect_section(&section.section, &inner, labels, bib_items);
            }
            Node::Section(section) => {
                collect_section(section, context, labels, bib_items);
            }
            Node::Label(label) => {
                labels.push(entry_for(label, context));
            }
            Node::BibItem(item) => {
                bib_items.push(item.clone());
                for argument in &item.arguments {
                    collect(&argument.children, context, labels, bib_items);
                }
            }
            Node::Command(command) => {
                for argument in &command.arguments {
                    collect(&argument.children, context, labels, bib_items);
                }
            }
            Node::Style(style) => {
                for argument in &style.arguments {
                    collect(&argument.children, context, labels, bib_items);
                }
            }
            Node::SectionBoundary(boundary) => {
                for argument in &boundary.command.arguments {
                    collect(&argument.children, context, labels, bib_items);
                }
            }
            Node::EnumerationItem(item) => {
                for argument in &item.arguments {
                    collect(&argument.children, context, labels, bib_items);
                }
            }
            Node::Text(_) | Node::Math(_) => {}
        }
    }
}

fn collect_section(
    section: &Section,
    context: &IndexContext,
    labels: &mut Vec<LabelEntry>,
    bib_items: &mut Vec<BibItem>,
) {
    for argument in &section.arguments {
        collect(&argument.children, context, labels, bib_items);
    }
    collect(&section.body, context, labels, bib_items);
}

fn entry_for(label: &Label, context: &IndexContext) -> LabelEntry {
    let anchor = match context.enclosure {
        Some(Enclosure::Theorem(kind)) => {
            Some(format!("cst-{}-{}", kind.name(), label.label_id()))
        }
        Some(Enclosure::MathSection) => Some(format!("equation-{}", label.label_id())),
        None => None,
    };
    LabelEntry {
        label: label.clone(),
        section: context.section.clone(),
        subsection: context.subsection.clone(),
        anchor,
    }
}
