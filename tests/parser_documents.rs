//! End-to-end parser tests over whole documents

use rstest::rstest;

use tex2wiki::latex::ast::{Node, StyleKind};
use tex2wiki::latex::{parse, LatexError};

#[test]
fn full_document_structure() {
    let document =
        parse("\\section{Intro}Hello \\textit{world}.\\subsection{Sub}$x+1$").unwrap();

    assert_eq!(document.children.len(), 1);
    let section = match &document.children[0] {
        Node::TocSection(section) => section,
        other => panic!("expected a section, got {}", other.node_type()),
    };
    assert_eq!(section.name(), Some("Intro"));

    let body = section.body();
    assert_eq!(body.len(), 4);
    match &body[0] {
        Node::Text(text) => assert_eq!(text.value, "Hello "),
        other => panic!("expected text, got {}", other.node_type()),
    }
    match &body[1] {
        Node::Style(style) => {
            assert_eq!(style.kind, StyleKind::Italic);
            assert_eq!(style.body().unwrap().first_text(), Some("world"));
        }
        other => panic!("expected italic, got {}", other.node_type()),
    }
    match &body[2] {
        Node::Text(text) => assert_eq!(text.value, "."),
        other => panic!("expected text, got {}", other.node_type()),
    }
    let subsection = match &body[3] {
        Node::TocSubSection(subsection) => subsection,
        other => panic!("expected a subsection, got {}", other.node_type()),
    };
    assert_eq!(subsection.name(), Some("Sub"));
    match &subsection.body()[0] {
        Node::Math(math) => {
            assert_eq!(math.formulae, "x+1");
            assert!(math.inline);
        }
        other => panic!("expected math, got {}", other.node_type()),
    }
}

#[test]
fn subsection_body_stops_at_next_subsection() {
    let document = parse("\\section{A}\\subsection{B}one\\subsection{C}two").unwrap();
    let section = match &document.children[0] {
        Node::TocSection(section) => section,
        other => panic!("expected a section, got {}", other.node_type()),
    };
    let names: Vec<_> = section
        .body()
        .iter()
        .filter_map(|node| match node {
            Node::TocSubSection(sub) => sub.name(),
            _ => None,
        })
        .collect();
    assert_eq!(names, vec!["B", "C"]);
}

#[test]
fn section_body_swallows_subsections_only() {
    let document = parse("\\section{A}x\\section{B}y").unwrap();
    assert_eq!(document.children.len(), 2);
}

#[test]
fn itemize_environment() {
    let document = parse("\\begin{itemize}\\item one\\item two\\end{itemize}").unwrap();
    let section = match &document.children[0] {
        Node::Section(section) => section,
        other => panic!("expected a section, got {}", other.node_type()),
    };
    assert_eq!(section.name(), Some("itemize"));

    let items: Vec<_> = section
        .body
        .iter()
        .filter_map(|node| match node {
            Node::EnumerationItem(item) => Some(item),
            _ => None,
        })
        .collect();
    assert_eq!(items.len(), 2);

    let first_body = items[0].body().unwrap();
    match &first_body.children[0] {
        // leading whitespace is the serializer's business, not the parser's
        Node::Text(text) => assert_eq!(text.value, " one"),
        other => panic!("expected text, got {}", other.node_type()),
    }
    let second_body = items[1].body().unwrap();
    match &second_body.children[0] {
        Node::Text(text) => assert_eq!(text.value, " two"),
        other => panic!("expected text, got {}", other.node_type()),
    }
}

#[test]
fn content_before_first_item_is_discarded() {
    let document =
        parse("\\begin{itemize}ignored\\item kept\\end{itemize}").unwrap();
    let section = match &document.children[0] {
        Node::Section(section) => section,
        other => panic!("expected a section, got {}", other.node_type()),
    };
    assert_eq!(section.body.len(), 1);
}

#[test]
fn item_options_are_kept() {
    let document =
        parse("\\begin{enumerate}\\item[(i)] one\\item[(ii)] two\\end{enumerate}").unwrap();
    let section = match &document.children[0] {
        Node::Section(section) => section,
        other => panic!("expected a section, got {}", other.node_type()),
    };
    let item = match &section.body[0] {
        Node::EnumerationItem(item) => item,
        other => panic!("expected an item, got {}", other.node_type()),
    };
    assert_eq!(item.arguments.len(), 2);
    assert!(item.arguments[0].optional);
    assert_eq!(item.arguments[0].first_text(), Some("(i)"));
}

#[rstest]
#[case("\\begin{align}x\\end{gather}")]
#[case("\\begin{itemize}\\item x\\end{enumerate}")]
#[case("\\begin{theorem}x\\end{lemma}")]
fn mismatched_environments_fail(#[case] source: &str) {
    assert!(matches!(
        parse(source),
        Err(LatexError::SectionMismatch { .. })
    ));
}

#[rstest]
#[case("\\begin{center}unclosed")]
#[case("\\textit{unclosed")]
#[case("$unclosed math")]
fn truncated_documents_fail_or_degrade(#[case] source: &str) {
    // unterminated math is tolerated (the delimiter closes at end of
    // input), unterminated groups and environments are hard errors
    match parse(source) {
        Ok(document) => assert!(!document.children.is_empty()),
        Err(LatexError::UnexpectedEnd) => {}
        Err(other) => panic!("unexpected error: {}", other),
    }
}

#[test]
fn nested_environments() {
    let source = "\\begin{theorem}\\begin{itemize}\\item a\\end{itemize}\\end{theorem}";
    let document = parse(source).unwrap();
    match &document.children[0] {
        Node::Theorem(theorem) => {
            assert!(matches!(theorem.section.body[0], Node::Section(_)));
        }
        other => panic!("expected a theorem, got {}", other.node_type()),
    }
}

#[test]
fn document_indices_cover_nested_labels() {
    let source = "\\section{S}\\begin{align}x\\label{eq:x}\\end{align}\\begin{thebibliography}\\bibitem{k}{A}{B}\\end{thebibliography}";
    let document = parse(source).unwrap();
    assert_eq!(document.labels().len(), 1);
    assert_eq!(document.bib_items().len(), 1);
    let entry = document.find_label("eq:x").unwrap();
    assert_eq!(entry.anchor.as_deref(), Some("equation-x"));
    assert_eq!(entry.section.as_deref(), Some("S"));
}

mod properties {
    use proptest::prelude::*;
    use tex2wiki::latex::ast::Node;
    use tex2wiki::latex::parse;

    proptest! {
        // Inputs without commands or environments collapse to one text
        // leaf whose value is the input with `~` folded to a space.
        #[test]
        fn plain_text_round_trip(input in "[A-Za-z0-9 .!?;:'()*+/_<>@#&~^-]{1,64}") {
            let document = parse(&input).unwrap();
            prop_assert_eq!(document.children.len(), 1);
            match &document.children[0] {
                Node::Text(text) => {
                    prop_assert_eq!(&text.value, &input.replace('~', " "));
                }
                other => prop_assert!(false, "expected text, got {}", other.node_type()),
            }
        }
    }
}
