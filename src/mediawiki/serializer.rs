//! MediaWiki serializer
//!
//! Walks a finished document read-only and emits wiki markup, one rendered
//! chunk per top-level `\section`. Wherever it reaches a math or rich-text
//! span it runs the macro expansion engine over the raw text. Citations are
//! collected per heading level and flushed as a `<references>` block; `\ref`
//! and `\eqref` resolve against the document's label index, tolerantly: an
//! unresolved reference renders nothing.

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::latex::ast::{
    Command, CommandArgument, Document, EnumerationItem, LabelEntry, Math, MathSection, Node,
    Section, StyleCommand, StyleKind, Theorem, TocSection, TocSubSection,
};
use crate::mediawiki::configurator::configure_mb102;
use crate::mediawiki::expansion::{ExpansionError, MacroExpansion};
use crate::mediawiki::helpers;

static BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n([\t ]*\n)+").unwrap());

/// Errors raised while rendering a document
#[derive(Debug, Clone, PartialEq)]
pub enum SerializeError {
    /// The document uses a command or environment this serializer has no
    /// rendering for
    Unsupported { what: String },
    /// A `\cite` referenced a bibliography entry that does not exist
    MissingReference { name: String },
    Expansion(ExpansionError),
}

impl fmt::Display for SerializeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SerializeError::Unsupported { what } => {
                write!(f, "No rendering implemented for {}", what)
            }
            SerializeError::MissingReference { name } => {
                write!(f, "Missing reference {}", name)
            }
            SerializeError::Expansion(error) => write!(f, "{}", error),
        }
    }
}

impl std::error::Error for SerializeError {}

impl From<ExpansionError> for SerializeError {
    fn from(error: ExpansionError) -> Self {
        SerializeError::Expansion(error)
    }
}

/// One converted top-level section
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSection {
    pub name: String,
    pub content: String,
}

/// Document-to-wiki converter
pub struct Serializer {
    page_prefix: String,
    math_section_replacement: HashMap<String, String>,
}

impl Serializer {
    pub fn new() -> Self {
        let mut math_section_replacement = HashMap::new();
        // the wiki math renderer has no tabular, array is equivalent
        math_section_replacement.insert("tabular".to_string(), "array".to_string());
        Self {
            page_prefix: ":MB102".to_string(),
            math_section_replacement,
        }
    }

    /// Wiki page prefix used when building `\ref` link targets
    pub fn with_page_prefix(mut self, prefix: &str) -> Self {
        self.page_prefix = prefix.to_string();
        self
    }

    pub fn convert(&self, document: &Document) -> Result<Vec<RenderedSection>, SerializeError> {
        let expansion = build_expansion(document, &self.page_prefix);
        let mut renderer = Renderer {
            document,
            expansion,
            math_section_replacement: &self.math_section_replacement,
            page_prefix: &self.page_prefix,
            citations: Vec::new(),
            out: String::new(),
        };

        let mut sections = Vec::new();
        for section in document.sections() {
            let name = section
                .name()
                .ok_or_else(|| SerializeError::Unsupported {
                    what: "section without a title".to_string(),
                })?
                .to_string();
            let content = renderer.render_toc_section(section)?;
            sections.push(RenderedSection { name, content });
        }
        Ok(sections)
    }
}

impl Default for Serializer {
    fn default() -> Self {
        Self::new()
    }
}

/// The macro catalog plus document-aware `\ref`/`\eqref` handlers working
/// off a link map captured up front
fn build_expansion(document: &Document, page_prefix: &str) -> MacroExpansion {
    let mut expansion = configure_mb102();

    let links = label_links(document, page_prefix);
    let links_for_eqref = links.clone();
    expansion.add_handler("ref", 1, move |args: &[String]| {
        args.first()
            .and_then(|name| links.get(name))
            .map(|link| format!("\\wikiref{{{}}}", link))
            .unwrap_or_default()
    });
    expansion.add_handler("eqref", 1, move |args: &[String]| {
        args.first()
            .and_then(|name| links_for_eqref.get(name))
            .map(|link| format!("\\wikiref{{{}}}", link))
            .unwrap_or_default()
    });

    expansion
}

fn label_links(document: &Document, page_prefix: &str) -> HashMap<String, String> {
    document
        .labels()
        .iter()
        .filter_map(|entry| {
            wikilink(entry, page_prefix)
                .map(|link| (entry.label.label_name().to_string(), link))
        })
        .collect()
}

/// External link target for a label: the page of its enclosing heading
/// chain, plus an anchor unless the label addresses the heading itself
fn wikilink(entry: &LabelEntry, page_prefix: &str) -> Option<String> {
    if entry.section.is_none() && entry.subsection.is_none() {
        return None;
    }

    let to_url = |value: &str| value.replace(' ', "_").replace('\'', "’");
    let mut page = page_prefix.to_string();
    if let Some(section) = &entry.section {
        page.push('/');
        page.push_str(&to_url(section));
    }
    if let Some(subsection) = &entry.subsection {
        page.push('/');
        page.push_str(&to_url(subsection));
    }

    if matches!(entry.label.label_type(), "S" | "SS") {
        return Some(page);
    }
    entry
        .anchor
        .as_ref()
        .map(|anchor| format!("{}#{}", page, anchor))
}

struct Renderer<'a> {
    document: &'a Document,
    expansion: MacroExpansion,
    math_section_replacement: &'a HashMap<String, String>,
    page_prefix: &'a str,
    citations: Vec<Vec<String>>,
    out: String,
}

impl<'a> Renderer<'a> {
    fn render_toc_section(&mut self, section: &TocSection) -> Result<String, SerializeError> {
        self.out.clear();

        self.out.push_str("# ");
        self.out.push_str(section.name().unwrap_or(""));
        self.out.push_str("\n\n");

        self.citations.push(Vec::new());
        self.render_nodes(section.body())?;
        let names = self.citations.pop().unwrap_or_default();
        self.render_references(names)?;

        let content = std::mem::take(&mut self.out);
        let content = BLANK_LINES.replace_all(&content, "\n\n").into_owned();
        let content = helpers::ltrim_per_line(&content);
        let content = helpers::remove_ambiguous_newlines(&content);
        Ok(helpers::break_before_display_math(&content))
    }

    fn render_toc_subsection(
        &mut self,
        subsection: &TocSubSection,
    ) -> Result<(), SerializeError> {
        self.out.push_str("## ");
        self.out.push_str(subsection.name().unwrap_or(""));
        self.out.push_str("\n\n");

        self.citations.push(Vec::new());
        self.render_nodes(subsection.body())?;
        let names = self.citations.pop().unwrap_or_default();
        self.render_references(names)
    }

    fn render_nodes(&mut self, nodes: &[Node]) -> Result<(), SerializeError> {
        for node in nodes {
            self.render_node(node)?;
        }
        Ok(())
    }

    fn render_argument(
        &mut self,
        argument: Option<&CommandArgument>,
    ) -> Result<(), SerializeError> {
        match argument {
            Some(argument) => self.render_nodes(&argument.children),
            None => Ok(()),
        }
    }

    fn render_node(&mut self, node: &Node) -> Result<(), SerializeError> {
        match node {
            Node::TocSubSection(subsection) => self.render_toc_subsection(subsection),
            Node::Math(math) => self.render_math(math),
            Node::Text(text) => {
                self.out.push_str(&text.value.replace("--", "&ndash;"));
                Ok(())
            }
            Node::Style(style) => self.render_style(style),
            Node::Command(command) => self.render_command(command),
            Node::Theorem(theorem) => self.render_theorem(theorem),
            Node::MathSection(section) => self.render_math_section(section),
            Node::Section(section) => self.render_section(section),
            Node::Label(_) => Ok(()), // anchors render through their parents
            other => Err(SerializeError::Unsupported {
                what: format!("{} node", other.node_type()),
            }),
        }
    }

    fn render_math(&mut self, math: &Math) -> Result<(), SerializeError> {
        let formulae = self.expansion.expand(&math.formulae)?;
        if math.inline {
            self.out.push_str("<math>");
            self.out.push_str(&formulae.replace('\n', " "));
            self.out.push_str("</math>");
        } else {
            self.out.push_str("\n:<math>");
            self.out.push_str(&formulae);
            self.out.push_str("</math>\n");
        }
        Ok(())
    }

    fn render_style(&mut self, style: &StyleCommand) -> Result<(), SerializeError> {
        match style.kind {
            StyleKind::NewParagraph => {
                self.out.push_str("\n\n");
                Ok(())
            }
            StyleKind::TypographicQuote => {
                self.out.push('„');
                self.render_argument(style.body())?;
                self.out.push('“');
                Ok(())
            }
            StyleKind::Underlined => {
                self.out.push_str("<u>");
                self.render_argument(style.body())?;
                self.out.push_str("</u>");
                Ok(())
            }
            StyleKind::Italic => {
                self.out.push_str("''");
                self.render_argument(style.body())?;
                self.out.push_str("''");
                Ok(())
            }
            StyleKind::Bold => {
                self.out.push_str("'''");
                self.render_argument(style.body())?;
                self.out.push_str("'''");
                Ok(())
            }
            StyleKind::Border => {
                self.out.push_str("<span class=\"border\">");
                self.render_argument(style.body())?;
                self.out.push_str("</span>");
                Ok(())
            }
        }
    }

    fn render_command(&mut self, command: &Command) -> Result<(), SerializeError> {
        match command.name.as_str() {
            // purely typographic or structural markers with no wiki output
            "kp" | "konecprikladu" | "konecprednasky" | "noindent" | "section"
            | "subsection" | "newpage" | "pagebreak" | "konecdokumentu" | "label" => Ok(()),
            // typeface switches, content passes through
            "tt" | "rm" => self.render_argument(command.body()),
            "href" => self.render_href(command),
            "url" => self.render_url(command),
            "dots" => {
                self.out.push_str("...");
                Ok(())
            }
            "cite" => self.render_cite(command),
            "eqref" | "ref" => self.render_ref(command),
            "centerline" | "resizebox" => self.render_argument(command.body()),
            "includegraphics" => self.render_include_graphics(command),
            _ => Err(SerializeError::Unsupported {
                what: command.to_string(),
            }),
        }
    }

    fn render_href(&mut self, command: &Command) -> Result<(), SerializeError> {
        let link = command
            .arguments
            .first()
            .and_then(|argument| argument.first_text());
        let title = command
            .arguments
            .get(1)
            .and_then(|argument| argument.first_text());
        match (link, title) {
            (Some(link), Some(title)) => {
                self.out.push('[');
                self.out.push_str(link);
                self.out.push(' ');
                self.out.push_str(title);
                self.out.push(']');
                Ok(())
            }
            _ => Err(SerializeError::Unsupported {
                what: command.to_string(),
            }),
        }
    }

    fn render_url(&mut self, command: &Command) -> Result<(), SerializeError> {
        let link = command
            .first_argument()
            .and_then(|argument| argument.first_text())
            .ok_or_else(|| SerializeError::Unsupported {
                what: command.to_string(),
            })?;
        self.out.push('[');
        self.out.push_str(link);
        self.out.push(' ');
        self.out.push_str(link);
        self.out.push(']');
        Ok(())
    }

    fn render_cite(&mut self, command: &Command) -> Result<(), SerializeError> {
        let name = command
            .body()
            .and_then(|argument| argument.first_text())
            .ok_or_else(|| SerializeError::Unsupported {
                what: command.to_string(),
            })?
            .to_string();

        if let Some(level) = self.citations.last_mut() {
            if !level.contains(&name) {
                level.push(name.clone());
            }
        }

        let ref_tag = format!("<ref name=\"{}\" />", escape_attr(&name));
        if command.arguments.len() == 1 {
            self.out.push_str(&ref_tag);
        } else {
            let title = self.capture(|renderer| {
                renderer.render_argument(command.first_argument())
            })?;
            self.out.push_str("[<nowiki />");
            self.out.push_str(&ref_tag);
            self.out.push_str(", ");
            self.out.push_str(&title);
            self.out.push(']');
        }
        Ok(())
    }

    fn render_ref(&mut self, command: &Command) -> Result<(), SerializeError> {
        let caption = command
            .first_argument()
            .and_then(|argument| argument.first_text())
            .unwrap_or("");
        let link = self
            .document
            .find_label(caption)
            .and_then(|entry| wikilink(entry, self.page_prefix));
        if let Some(link) = link {
            self.out.push_str("[[");
            self.out.push_str(&link);
            self.out.push_str("|#]]");
        }
        Ok(())
    }

    fn render_include_graphics(&mut self, command: &Command) -> Result<(), SerializeError> {
        let name = command
            .arguments
            .iter()
            .find(|argument| !argument.optional)
            .and_then(|argument| argument.first_text())
            .ok_or_else(|| SerializeError::Unsupported {
                what: command.to_string(),
            })?;
        self.out.push_str("\n[[File:");
        self.out.push_str(name);
        self.out.push_str("]]\n");
        Ok(())
    }

    fn render_theorem(&mut self, theorem: &Theorem) -> Result<(), SerializeError> {
        let name = theorem.name();
        let mut attributes = String::new();
        if let Some(title) = &theorem.title {
            attributes.push_str(&format!(" title=\"{}\"", escape_attr(title.trim())));
        }
        if let Some(label) = &theorem.label {
            attributes.push_str(&format!(" id=\"{}\"", escape_attr(&label.label_id())));
        }

        let contents = self.capture(|renderer| renderer.render_nodes(&theorem.section.body))?;

        self.out.push('<');
        self.out.push_str(name);
        self.out.push_str(&attributes);
        self.out.push_str(">\n");
        self.out.push_str(contents.trim());
        self.out.push_str("\n</");
        self.out.push_str(name);
        self.out.push('>');
        Ok(())
    }

    fn render_math_section(&mut self, section: &MathSection) -> Result<(), SerializeError> {
        let section_name = section.name().ok_or_else(|| SerializeError::Unsupported {
            what: "math environment without a name".to_string(),
        })?;
        let output_name = self
            .math_section_replacement
            .get(section_name)
            .map(String::as_str)
            .unwrap_or(section_name);

        let mut attributes = String::new();
        if let Some(label) = section.label() {
            attributes.push_str(&format!(" id=\"{}\"", escape_attr(&label.label_id())));
        }

        let math = section
            .formulae()
            .ok_or_else(|| SerializeError::Unsupported {
                what: format!("math environment {} without formula content", section_name),
            })?;
        let formulae = self.expansion.expand(&math.formulae)?;

        self.out.push_str("\n:<math");
        self.out.push_str(&attributes);
        self.out.push_str(">\n");
        self.out.push_str("\\begin{");
        self.out.push_str(output_name);
        self.out.push('}');
        if section_name == "tabular" {
            if let Some(columns) = section
                .section
                .first_argument()
                .and_then(|argument| argument.first_text())
            {
                self.out.push('{');
                self.out.push_str(columns);
                self.out.push('}');
            }
        }
        self.out.push_str(&formulae);
        self.out.push_str("\\end{");
        self.out.push_str(output_name);
        self.out.push('}');
        self.out.push_str("\n</math>\n");
        Ok(())
    }

    fn render_section(&mut self, section: &Section) -> Result<(), SerializeError> {
        match section.name().unwrap_or("") {
            // no styling of their own, content passes through
            "center" | "minipage" => self.render_nodes(&section.body),
            "itemize" | "enumerate" => self.render_itemize(section),
            "figure" => self.render_figure(section),
            "thebibliography" => Ok(()), // rendered via the references block
            other => Err(SerializeError::Unsupported {
                what: format!("Section({})", other),
            }),
        }
    }

    fn render_itemize(&mut self, section: &Section) -> Result<(), SerializeError> {
        let items: Vec<&EnumerationItem> = section
            .body
            .iter()
            .filter_map(|node| match node {
                Node::EnumerationItem(item) => Some(item),
                _ => None,
            })
            .collect();

        let mut tag = "ul";
        let mut class = None;
        if section.name() == Some("enumerate") {
            tag = "ol";
            let style = items
                .first()
                .and_then(|item| item.first_argument())
                .and_then(|argument| first_text_recursive(&argument.children));
            match style {
                Some("(i)") => {
                    tag = "ul";
                    class = Some("roman");
                }
                Some("(a)") => {
                    tag = "ul";
                    class = Some("letters");
                }
                _ => {}
            }
        }

        self.out.push('<');
        self.out.push_str(tag);
        if let Some(class) = class {
            self.out.push_str(&format!(" class=\"{}\"", class));
        }
        self.out.push_str(">\n");

        for item in items {
            let content = self.capture(|renderer| renderer.render_argument(item.body()))?;
            self.out.push_str("<li>");
            self.out.push_str(content.trim());
            self.out.push_str("</li>\n");
        }

        self.out.push_str("</");
        self.out.push_str(tag);
        self.out.push_str(">\n");
        Ok(())
    }

    fn render_figure(&mut self, section: &Section) -> Result<(), SerializeError> {
        let descendants = descendants(&section.body);

        for node in &descendants {
            if let Node::Section(subfigure) = node {
                if subfigure.name() == Some("subfigure") {
                    self.render_pspicture(subfigure)?;
                }
            }
        }

        let caption = section.body.iter().find_map(|node| match node {
            Node::Command(command) if command.name == "caption" => Some(command),
            _ => None,
        });
        if let Some(caption) = caption {
            self.render_argument(caption.first_argument())?;
        }
        Ok(())
    }

    fn render_pspicture(&mut self, section: &Section) -> Result<(), SerializeError> {
        let nodes = descendants(&section.body);

        let picture = nodes.iter().find_map(|node| match node {
            Node::MathSection(math_section)
                if matches!(math_section.name(), Some("pspicture") | Some("pspicture*")) =>
            {
                Some(math_section)
            }
            _ => None,
        });
        if let Some(picture) = picture {
            if let Some(math) = picture.formulae() {
                self.out.push_str("\n<pre>");
                self.out.push_str(&math.formulae);
                self.out.push_str("</pre>\n");
            }
        }

        for node in &nodes {
            if let Node::Command(command) = node {
                if command.name == "includegraphics" {
                    self.render_include_graphics(command)?;
                }
            }
        }

        let caption = nodes.iter().find_map(|node| match node {
            Node::Command(command) if command.name == "caption" => Some(command),
            _ => None,
        });
        if let Some(caption) = caption {
            self.render_argument(caption.first_argument())?;
        }
        Ok(())
    }

    fn render_references(&mut self, names: Vec<String>) -> Result<(), SerializeError> {
        if names.is_empty() {
            return Ok(());
        }
        self.out.push_str("== Reference ==\n<references>\n");
        for name in names {
            self.render_reference(&name)?;
        }
        self.out.push_str("</references>\n\n");
        Ok(())
    }

    fn render_reference(&mut self, name: &str) -> Result<(), SerializeError> {
        let document = self.document;
        let reference =
            document
                .find_bib_item(name)
                .ok_or_else(|| SerializeError::MissingReference {
                    name: name.to_string(),
                })?;

        let mut content = Vec::new();
        if let Some(author) = reference.book_author() {
            content.push(self.capture(|renderer| renderer.render_nodes(&author.children))?);
        }
        if let Some(publication) = reference.book_name() {
            let rendered =
                self.capture(|renderer| renderer.render_nodes(&publication.children))?;
            content.push(format!("''{}''", rendered));
        }
        if let Some(publisher) = reference.book_publisher() {
            content.push(self.capture(|renderer| renderer.render_nodes(&publisher.children))?);
        }
        if let Some(source) = reference.book_source() {
            content.push(self.capture(|renderer| renderer.render_nodes(&source.children))?);
        }

        let joined = content.join(", ");
        self.out.push_str(&format!(
            "<ref name=\"{}\">{}.</ref>\n",
            escape_attr(name),
            joined.trim_end_matches('.')
        ));
        Ok(())
    }

    /// Run a rendering closure against a scratch buffer and hand back what
    /// it produced
    fn capture(
        &mut self,
        render: impl FnOnce(&mut Self) -> Result<(), SerializeError>,
    ) -> Result<String, SerializeError> {
        let saved = std::mem::take(&mut self.out);
        let result = render(self);
        let captured = std::mem::replace(&mut self.out, saved);
        result.map(|_| captured)
    }
}

/// All nodes below the given ones, breadth-first
fn descendants(nodes: &[Node]) -> Vec<&Node> {
    let mut queue: Vec<&Node> = nodes.iter().collect();
    let mut index = 0;
    while index < queue.len() {
        let mut children = queue[index].child_nodes();
        queue.append(&mut children);
        index += 1;
    }
    queue
}

fn first_text_recursive(nodes: &[Node]) -> Option<&str> {
    descendants(nodes).into_iter().find_map(|node| match node {
        Node::Text(text) => Some(text.value.as_str()),
        _ => None,
    })
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latex::parse;

    fn convert(source: &str) -> Vec<RenderedSection> {
        let document = parse(source).unwrap();
        Serializer::new().convert(&document).unwrap()
    }

    #[test]
    fn test_heading_and_paragraph() {
        let sections = convert("\\section{Intro}Hello world.");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].name, "Intro");
        assert!(sections[0].content.starts_with("# Intro\n\n"));
        assert!(sections[0].content.contains("Hello world."));
    }

    #[test]
    fn test_subsection_heading() {
        let sections = convert("\\section{A}x\\subsection{B}y");
        assert!(sections[0].content.contains("## B"));
    }

    #[test]
    fn test_inline_math_is_expanded_and_wrapped() {
        let sections = convert("\\section{A}$\\eps > 0$");
        assert!(
            sections[0].content.contains("<math>varepsilon > 0</math>"),
            "content: {}",
            sections[0].content
        );
    }

    #[test]
    fn test_italic_style() {
        let sections = convert("\\section{A}\\textit{slanted}");
        assert!(sections[0].content.contains("''slanted''"));
    }

    #[test]
    fn test_dashes_become_entities() {
        let sections = convert("\\section{A}pp. 1--2");
        assert!(sections[0].content.contains("1&ndash;2"));
    }

    #[test]
    fn test_theorem_tag_with_title_and_id() {
        let sections = convert(
            "\\section{A}\\begin{theorem}\\label{V:main}{\\bf Main}Body text.\\end{theorem}",
        );
        let content = &sections[0].content;
        assert!(
            content.contains("<theorem title=\"Main\" id=\"main\">"),
            "content: {}",
            content
        );
        assert!(content.contains("</theorem>"));
    }

    #[test]
    fn test_itemize_renders_list_items() {
        let sections =
            convert("\\section{A}\\begin{itemize}\\item one\\item two\\end{itemize}");
        let content = &sections[0].content;
        assert!(content.contains("<ul>"), "content: {}", content);
        assert!(content.contains("<li>one</li>"));
        assert!(content.contains("<li>two</li>"));
        assert!(content.contains("</ul>"));
    }

    #[test]
    fn test_enumerate_renders_ordered_list() {
        let sections =
            convert("\\section{A}\\begin{enumerate}\\item one\\item two\\end{enumerate}");
        assert!(sections[0].content.contains("<ol>"));
    }

    #[test]
    fn test_math_environment_keeps_label_anchor() {
        let sections = convert(
            "\\section{A}\\begin{align}x &= 1\\label{eq:one}\\end{align}",
        );
        let content = &sections[0].content;
        assert!(content.contains("<math id=\"one\">"), "content: {}", content);
        // the label command is stripped out of the formula by expansion
        assert!(!content.contains("\\label"));
        assert!(content.contains("\\begin{align}"));
    }

    #[test]
    fn test_tabular_is_rewritten_to_array() {
        let sections = convert(
            "\\section{A}\\begin{tabular}{ll}a & b\\end{tabular}",
        );
        let content = &sections[0].content;
        assert!(content.contains("\\begin{array}{ll}"), "content: {}", content);
        assert!(content.contains("\\end{array}"));
    }

    #[test]
    fn test_cite_collects_references() {
        let source = "\\section{A}See \\cite{knuth}.\\begin{thebibliography}\\bibitem{knuth}{D. E. Knuth}{The TeXbook}{Addison-Wesley}\\end{thebibliography}";
        let sections = convert(source);
        let content = &sections[0].content;
        assert!(content.contains("<ref name=\"knuth\" />"), "content: {}", content);
        assert!(content.contains("== Reference =="));
        assert!(content.contains("''The TeXbook''"));
        assert!(content.contains("D. E. Knuth"));
    }

    #[test]
    fn test_missing_bib_item_is_an_error() {
        let document = parse("\\section{A}\\cite{ghost}").unwrap();
        let result = Serializer::new().convert(&document);
        assert!(matches!(
            result,
            Err(SerializeError::MissingReference { .. })
        ));
    }

    #[test]
    fn test_ref_resolves_against_label_index() {
        let source = "\\section{Intro}\\begin{theorem}\\label{V:main}x\\end{theorem}See \\ref{V:main}.";
        let sections = convert(source);
        assert!(
            sections[0]
                .content
                .contains("[[:MB102/Intro#cst-theorem-main|#]]"),
            "content: {}",
            sections[0].content
        );
    }

    #[test]
    fn test_unresolved_ref_renders_nothing() {
        let sections = convert("\\section{A}See \\ref{ghost}.");
        assert!(!sections[0].content.contains("[["));
    }

    #[test]
    fn test_unknown_command_is_unsupported() {
        let document = parse("\\section{A}\\mystery{x}").unwrap();
        let result = Serializer::new().convert(&document);
        assert!(matches!(result, Err(SerializeError::Unsupported { .. })));
    }
}
