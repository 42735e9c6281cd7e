//! Whole-document conversion tests

use tex2wiki::latex::parse;
use tex2wiki::mediawiki::Serializer;

const LECTURE: &str = r"\section{Derivace}
Nechť $f$ je funkce jedné proměnné.

\subsection{Definice}
\begin{definition}\label{D:derivace}{\bf Derivace}
Derivací funkce $f$ v bodě $x_0$ rozumíme limitu
\begin{equation}
f'(x_0) = \lim_{h \to 0} \frac{f(x_0+h)-f(x_0)}{h}\label{eq:der}
\end{equation}
pokud existuje, viz \cite{jarnik}.
\end{definition}

\begin{itemize}
\item první vlastnost
\item druhá vlastnost
\end{itemize}

\begin{thebibliography}
\bibitem{jarnik}{V. Jarník}{Diferenciální počet}{Academia}
\end{thebibliography}
";

#[test]
fn converts_one_chunk_per_section() {
    let document = parse(LECTURE).unwrap();
    let sections = Serializer::new().convert(&document).unwrap();
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].name, "Derivace");
}

#[test]
fn renders_headings_math_and_theorem_tags() {
    let document = parse(LECTURE).unwrap();
    let sections = Serializer::new().convert(&document).unwrap();
    let content = &sections[0].content;

    assert!(content.starts_with("# Derivace\n"), "content: {}", content);
    assert!(content.contains("## Definice"));
    assert!(content.contains("<math>f</math>"));
    assert!(
        content.contains("<definition title=\"Derivace\" id=\"derivace\">"),
        "content: {}",
        content
    );
    assert!(content.contains("</definition>"));
    // the equation environment keeps its label as an anchor and loses the
    // \label inside the formula
    assert!(content.contains("<math id=\"der\">"));
    assert!(!content.contains("\\label"));
    assert!(content.contains("\\begin{equation}"));
}

#[test]
fn renders_list_and_references() {
    let document = parse(LECTURE).unwrap();
    let sections = Serializer::new().convert(&document).unwrap();
    let content = &sections[0].content;

    assert!(content.contains("<li>první vlastnost</li>"));
    assert!(content.contains("<li>druhá vlastnost</li>"));
    assert!(content.contains("<ref name=\"jarnik\" />"));
    assert!(content.contains("== Reference =="));
    assert!(
        content.contains("<ref name=\"jarnik\">V. Jarník, ''Diferenciální počet'', Academia.</ref>"),
        "content: {}",
        content
    );
}

#[test]
fn blank_lines_are_collapsed_and_lines_unwrapped() {
    let document = parse("\\section{A}line one\nline two\n\n\n\nnext paragraph").unwrap();
    let sections = Serializer::new().convert(&document).unwrap();
    let content = &sections[0].content;
    assert!(content.contains("line one line two"), "content: {}", content);
    assert!(!content.contains("\n\n\n"));
}

#[test]
fn page_prefix_feeds_reference_links() {
    let source = "\\section{Intro}\\begin{lemma}\\label{L:odhad}x\\end{lemma}viz \\ref{L:odhad}";
    let document = parse(source).unwrap();
    let sections = Serializer::new()
        .with_page_prefix(":MB101")
        .convert(&document)
        .unwrap();
    assert!(
        sections[0]
            .content
            .contains("[[:MB101/Intro#cst-lemma-odhad|#]]"),
        "content: {}",
        sections[0].content
    );
}
