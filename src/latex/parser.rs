//! Recursive-descent parser for the lecture-notes dialect
//!
//! The parser dispatches on the type of the next token. Implicit
//! table-of-contents scopes are the grammar's only non-local rule: a
//! `\section` body runs until the next `\section` token, a `\subsection`
//! body until the next heading of either level. Explicit environments branch
//! into three sub-grammars by name: math blocks captured verbatim, item
//! lists split on `\item`, and generic sections parsed recursively. There is
//! no partial-document recovery; every violation aborts the parse.

pub mod builders;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::latex::ast::{
    Command, CommandArgument, Document, EnumerationItem, Math, MathSection, Node,
    SectionBoundary, Text, TocSection, TocSubSection,
};
use crate::latex::error::LatexError;
use crate::latex::parser::builders::{build_command, build_section};
use crate::latex::stream::TokenStream;
use crate::latex::tokenizer::{tokenize, Token, TokenKind};

/// Environments whose body is opaque mathematical notation
static MATH_ENVIRONMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(align|gather|equation|tabular|eqnarray|pspicture)").unwrap());

/// Token types that end a free text run
const TEXT_TERMINALS: &[TokenKind] = &[
    TokenKind::CommandSection,
    TokenKind::CommandSubsection,
    TokenKind::CommandBegin,
    TokenKind::CommandEnd,
    TokenKind::Command,
    TokenKind::MathInline,
    TokenKind::MathBlock,
    TokenKind::CurlyLeft,
    TokenKind::CurlyRight,
    TokenKind::SquareLeft,
    TokenKind::SquareRight,
];

/// Parse a source document into its tree
///
/// Line endings are normalized before tokenizing; comments are dropped from
/// the stream before parsing begins.
pub fn parse(content: &str) -> Result<Document, LatexError> {
    let content = normalize(content);
    let stream = tokenize(&content)?.without(&[TokenKind::Comment]);
    let mut parser = Parser { stream };
    let nodes = parser.parse_all()?;
    Document::new(nodes)
}

fn normalize(content: &str) -> String {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    content.replace("\r\n", "\n").replace('\r', "\n")
}

struct Parser {
    stream: TokenStream,
}

impl Parser {
    fn parse_all(&mut self) -> Result<Vec<Node>, LatexError> {
        let mut nodes = Vec::new();
        while self.stream.has_next() {
            nodes.push(self.parse_next()?);
        }
        Ok(nodes)
    }

    fn parse_next(&mut self) -> Result<Node, LatexError> {
        let token = self.stream.next().ok_or(LatexError::UnexpectedEnd)?;
        match token.kind {
            TokenKind::CommandSection => self.parse_toc_section(token),
            TokenKind::CommandSubsection => self.parse_toc_subsection(token),
            TokenKind::CommandBegin => self.parse_section(token),
            TokenKind::CommandEnd | TokenKind::Command => self.parse_command(token),
            TokenKind::MathInline | TokenKind::MathBlock => Ok(self.parse_math(token)),
            TokenKind::CurlyLeft => self.parse_scope(token),
            _ => Ok(self.parse_text(token)),
        }
    }

    /// Greedily absorb everything that carries no structure, folding the
    /// non-breaking tilde into a literal space
    fn parse_text(&mut self, token: Token) -> Node {
        let mut text = token.value;
        while self.stream.has_next() && !self.stream.is_next(TEXT_TERMINALS) {
            if let Some(value) = self.stream.next_value() {
                text.push_str(&value);
            }
        }
        Node::Text(Text::new(text.replace('~', " ")))
    }

    /// An anonymous `{…}` group: fold into a following argument-less
    /// command, or degrade to literal text
    fn parse_scope(&mut self, token: Token) -> Result<Node, LatexError> {
        if !self.stream.is_next(&[TokenKind::Command]) {
            return Ok(Node::Text(Text::new(token.value)));
        }

        let command_token = self.stream.next().ok_or(LatexError::UnexpectedEnd)?;
        let (name, arguments) = self.parse_command_parts(&command_token)?;
        if !arguments.is_empty() {
            return Err(LatexError::UnexpectedNode {
                found: format!("\\{} with arguments", name),
                expected: "command without arguments".to_string(),
            });
        }

        let mut body = Vec::new();
        while !self.stream.is_next(&[TokenKind::CurlyRight]) {
            if !self.stream.has_next() {
                return Err(LatexError::UnexpectedEnd);
            }
            body.push(self.parse_next()?);
        }
        self.stream.next(); // closing brace

        build_command(name, vec![CommandArgument::mandatory(body)?])
    }

    fn parse_toc_section(&mut self, token: Token) -> Result<Node, LatexError> {
        let begin = self.parse_raw_command(&token)?;
        let mut body = Vec::new();
        while self.stream.has_next() && !self.stream.is_next(&[TokenKind::CommandSection]) {
            body.push(self.parse_next()?);
        }
        TocSection::new(begin, body).map(Node::TocSection)
    }

    fn parse_toc_subsection(&mut self, token: Token) -> Result<Node, LatexError> {
        let begin = self.parse_raw_command(&token)?;
        let mut body = Vec::new();
        while self.stream.has_next()
            && !self
                .stream
                .is_next(&[TokenKind::CommandSection, TokenKind::CommandSubsection])
        {
            body.push(self.parse_next()?);
        }
        TocSubSection::new(begin, body).map(Node::TocSubSection)
    }

    fn parse_section(&mut self, token: Token) -> Result<Node, LatexError> {
        let begin = self.parse_section_begin(&token)?;

        if MATH_ENVIRONMENT.is_match(begin.section_name().unwrap_or("")) {
            let body = self.parse_math_block_body()?;
            let end_token = self.stream.next().ok_or(LatexError::UnexpectedEnd)?;
            self.parse_section_end(&end_token, &begin)?;
            return MathSection::new(begin.command, body).map(Node::MathSection);
        }

        let name = begin
            .section_name()
            .unwrap_or("")
            .trim()
            .to_lowercase();

        let body = if name == "itemize" || name == "enumerate" {
            self.parse_section_items()?
        } else {
            let mut nodes = Vec::new();
            while self.stream.has_next() && !self.stream.is_next(&[TokenKind::CommandEnd]) {
                nodes.push(self.parse_next()?);
            }
            nodes
        };

        let end_token = self.stream.next().ok_or(LatexError::UnexpectedEnd)?;
        self.parse_section_end(&end_token, &begin)?;

        build_section(&name, begin.command, body)
    }

    /// Split a list body on `\item`; content before the first item is
    /// discarded, the final open item closes at environment end
    fn parse_section_items(&mut self) -> Result<Vec<Node>, LatexError> {
        let mut item_opened: Option<Command> = None;
        let mut items = Vec::new();
        let mut nodes = Vec::new();

        while self.stream.has_next() && !self.stream.is_next(&[TokenKind::CommandEnd]) {
            if !self.stream.is_next(&[TokenKind::Command]) {
                if item_opened.is_some() {
                    nodes.push(self.parse_next()?);
                } else {
                    self.parse_next()?; // before the first \item, skip
                }
                continue;
            }

            let command_token = self.stream.next().ok_or(LatexError::UnexpectedEnd)?;
            let is_item = command_token.value == "\\item";
            let node = self.parse_command(command_token)?;

            if is_item {
                let opening = match node {
                    Node::Command(command) => command,
                    other => {
                        return Err(LatexError::UnexpectedNode {
                            found: other.to_string(),
                            expected: "\\item command".to_string(),
                        })
                    }
                };
                if let Some(open) = item_opened.take() {
                    items.push(create_enumeration_item(open, std::mem::take(&mut nodes))?);
                }
                item_opened = Some(opening);
            } else {
                nodes.push(node);
            }
        }

        if let Some(open) = item_opened {
            if !nodes.is_empty() {
                items.push(create_enumeration_item(open, nodes)?);
            }
        }

        Ok(items)
    }

    /// Capture a math environment body verbatim, preserving labels and
    /// nested begin/end pairs structurally while the whole span becomes one
    /// opaque math leaf
    fn parse_math_block_body(&mut self) -> Result<Vec<Node>, LatexError> {
        let mut body = Vec::new();
        let start = self.stream.position();

        while self.stream.has_next() {
            if self.stream.is_next(&[TokenKind::Command]) {
                let token = self.stream.next().ok_or(LatexError::UnexpectedEnd)?;
                if token.value.trim_start_matches('\\') == "label" {
                    body.push(self.parse_command(token)?);
                }
            } else if self.stream.is_next(&[TokenKind::CommandBegin]) {
                let begin_token = self.stream.next().ok_or(LatexError::UnexpectedEnd)?;
                let inner = self.parse_section_begin(&begin_token)?;
                for node in self.parse_math_block_body()? {
                    if is_command_like(&node) {
                        body.push(node);
                    }
                }
                let end_token = self.stream.next().ok_or(LatexError::UnexpectedEnd)?;
                self.parse_section_end(&end_token, &inner)?;
            } else if self.stream.is_next(&[TokenKind::CommandEnd]) {
                break;
            }

            self.stream.next_until(&[
                TokenKind::Command,
                TokenKind::CommandBegin,
                TokenKind::CommandEnd,
            ]);
        }

        let end = self.stream.position();
        let text = self.stream.join_span(start, end);
        body.push(Node::Math(Math::new(text, false)));
        Ok(body)
    }

    fn parse_section_begin(&mut self, token: &Token) -> Result<SectionBoundary, LatexError> {
        match self.parse_command(token.clone())? {
            Node::SectionBoundary(boundary) if boundary.name() == "begin" => Ok(boundary),
            other => Err(LatexError::UnexpectedNode {
                found: other.to_string(),
                expected: "command \\begin{}".to_string(),
            }),
        }
    }

    fn parse_section_end(
        &mut self,
        token: &Token,
        begin: &SectionBoundary,
    ) -> Result<SectionBoundary, LatexError> {
        let end = match self.parse_command(token.clone())? {
            Node::SectionBoundary(boundary) if boundary.name() == "end" => boundary,
            other => {
                return Err(LatexError::UnexpectedNode {
                    found: other.to_string(),
                    expected: "command \\end{}".to_string(),
                })
            }
        };
        if end.section_name() != begin.section_name() {
            return Err(LatexError::SectionMismatch {
                begin: begin.section_name.clone(),
                end: end.section_name.clone(),
            });
        }
        Ok(end)
    }

    /// Parse a command's name and greedily capture its bracket groups,
    /// without promoting it to a specific node kind
    fn parse_raw_command(&mut self, token: &Token) -> Result<Command, LatexError> {
        let (name, arguments) = self.parse_command_parts(token)?;
        Ok(Command::new(name, arguments))
    }

    fn parse_command(&mut self, token: Token) -> Result<Node, LatexError> {
        let (name, mut arguments) = self.parse_command_parts(&token)?;

        // Command-shaped solution blocks: \reseni{…} carries its body as the
        // single mandatory argument
        if name == "reseni" {
            if arguments.len() != 1 {
                return Err(LatexError::UnexpectedNode {
                    found: format!("\\reseni with {} arguments", arguments.len()),
                    expected: "a single argument".to_string(),
                });
            }
            let argument = arguments.remove(0);
            let begin = Command::new("reseni", vec![CommandArgument::from_text("reseni")]);
            return build_section("reseni", begin, argument.children);
        }

        build_command(name, arguments)
    }

    fn parse_command_parts(
        &mut self,
        token: &Token,
    ) -> Result<(String, Vec<CommandArgument>), LatexError> {
        let name = token.value.trim_start_matches('\\').to_string();

        let mut arguments = Vec::new();
        while let Some(position) = self.stream.lookahead(
            &[TokenKind::CurlyLeft, TokenKind::SquareLeft],
            &[TokenKind::Whitespace, TokenKind::Newline],
        ) {
            self.stream.set_position(position);
            let open = self.stream.next().ok_or(LatexError::UnexpectedEnd)?;
            let close = match open.kind {
                TokenKind::CurlyLeft => TokenKind::CurlyRight,
                _ => TokenKind::SquareRight,
            };
            arguments.push(self.parse_command_argument(&open, close)?);
        }

        Ok((name, arguments))
    }

    fn parse_command_argument(
        &mut self,
        open: &Token,
        close: TokenKind,
    ) -> Result<CommandArgument, LatexError> {
        let mut children = Vec::new();
        while !self.stream.is_next(&[close]) {
            if !self.stream.has_next() {
                return Err(LatexError::UnexpectedEnd);
            }
            children.push(self.parse_next()?);
        }
        self.stream.next(); // closing bracket

        CommandArgument::new(open.kind == TokenKind::SquareLeft, children)
    }

    fn parse_math(&mut self, token: Token) -> Node {
        let content = self.stream.join_until(&[token.kind]);
        self.stream.next(); // closing delimiter
        Node::Math(Math::new(content, token.kind == TokenKind::MathInline))
    }
}

fn create_enumeration_item(opening: Command, body: Vec<Node>) -> Result<Node, LatexError> {
    let mut arguments = opening.arguments;
    arguments.push(CommandArgument::mandatory(body)?);
    Ok(Node::EnumerationItem(EnumerationItem::new(arguments)))
}

/// Command-shaped nodes that survive filtering inside math block bodies
fn is_command_like(node: &Node) -> bool {
    matches!(
        node,
        Node::Command(_)
            | Node::Label(_)
            | Node::Style(_)
            | Node::SectionBoundary(_)
            | Node::BibItem(_)
    )
}
