//! Tokenizer for the LaTeX lecture-notes dialect
//!
//! The rule set is defined with the logos derive macro. Rule priorities
//! reproduce the ordering of the original hand-written rule list: the
//! privileged commands (`\begin`, `\end`, `\section`, `\subsection`) win over
//! the generic command rule on equal-length matches but lose to it on longer
//! ones, so `\beginning` stays one ordinary command. Backslash runs are only
//! produced where no command can match, which keeps `\\alpha` a line break
//! followed by plain text.
//!
//! Comments are only recognized at the start of a line. Logos cannot express
//! that restriction directly, so `tokenize` re-splits a comment match that
//! does not sit at a line start into text + newline in a small post-pass.
//!
//! Every token carries its source offset and 1-based line/column. The column
//! counter resets to 0 after any token whose value contains a newline.

use logos::Logos;

use crate::latex::error::LatexError;
use crate::latex::stream::TokenStream;

/// All token types produced by the document tokenizer
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    #[regex(r"%[^\n]*\n")]
    Comment,

    #[token(r"\{")]
    CurlyLeftEscaped,
    #[token("{")]
    CurlyLeft,
    #[token(r"\}")]
    CurlyRightEscaped,
    #[token("}")]
    CurlyRight,
    #[token(r"\[")]
    SquareLeftEscaped,
    #[token("[")]
    SquareLeft,
    #[token(r"\]")]
    SquareRightEscaped,
    #[token("]")]
    SquareRight,

    #[token("$$")]
    MathBlock,
    #[token("$")]
    MathInline,

    #[token(r"\begin")]
    CommandBegin,
    #[token(r"\end")]
    CommandEnd,
    #[token(r"\section")]
    CommandSection,
    #[token(r"\subsection")]
    CommandSubsection,
    #[regex(r"\\[a-zA-Z0-9]+")]
    Command,

    #[token("|")]
    Pipe,
    #[token("~")]
    Tilde,
    #[token("=")]
    Equals,
    #[token(",")]
    Comma,
    #[regex(r"\\+")]
    Backslash,

    #[token("\n")]
    Newline,
    // Starts with a space or tab; may then swallow newlines, which matches
    // how runs like " \n " lex as a single whitespace token.
    #[regex(r"[ \t][ \t\n]*", priority = 3)]
    Whitespace,

    // Catch-all for everything that carries no structure of its own
    #[regex(r"[^$\[\]{}|~=,\\\n]+")]
    Text,
}

impl TokenKind {
    /// Command-introducing token types, privileged ones included
    pub fn is_command(&self) -> bool {
        matches!(
            self,
            TokenKind::CommandBegin
                | TokenKind::CommandEnd
                | TokenKind::CommandSection
                | TokenKind::CommandSubsection
                | TokenKind::Command
        )
    }

    pub fn is_math_delimiter(&self) -> bool {
        matches!(self, TokenKind::MathInline | TokenKind::MathBlock)
    }
}

/// One lexed token with its source position
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub offset: usize,
    pub line: u32,
    pub column: u32,
}

/// Tokenize a normalized source string into a stream
///
/// Tokens partition the input with no gaps, in strictly increasing offset
/// order. A position where no rule matches yields `LatexError::Tokenize`;
/// with the catch-all text rule in place this only happens on inputs the
/// grammar was never configured for.
pub fn tokenize(source: &str) -> Result<TokenStream, LatexError> {
    let mut lexer = TokenKind::lexer(source);
    let mut raw = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(kind) => raw.push((kind, span)),
            Err(()) => {
                let (line, column) = position_of(source, span.start);
                return Err(LatexError::Tokenize {
                    offset: span.start,
                    line,
                    column,
                });
            }
        }
    }

    let mut tokens = Vec::with_capacity(raw.len());
    let mut line: u32 = 1;
    let mut column: u32 = 1;
    for (kind, span) in raw {
        let value = &source[span.clone()];

        // A comment that does not start a line is not a comment at all;
        // re-split it so the token sequence still partitions the input.
        if kind == TokenKind::Comment && span.start > 0 && !source[..span.start].ends_with('\n') {
            let body = value.strip_suffix('\n').unwrap_or(value);
            line = push_token(&mut tokens, TokenKind::Text, body, span.start, line, &mut column);
            line = push_token(
                &mut tokens,
                TokenKind::Newline,
                "\n",
                span.start + body.len(),
                line,
                &mut column,
            );
            continue;
        }

        line = push_token(&mut tokens, kind, value, span.start, line, &mut column);
    }

    Ok(TokenStream::new(tokens))
}

fn push_token(
    tokens: &mut Vec<Token>,
    kind: TokenKind,
    value: &str,
    offset: usize,
    line: u32,
    column: &mut u32,
) -> u32 {
    tokens.push(Token {
        kind,
        value: value.to_string(),
        offset,
        line,
        column: *column,
    });

    let newlines = value.matches('\n').count() as u32;
    if newlines > 0 {
        *column = 0; // line-spanning tokens end at a newline boundary
    } else {
        *column += value.chars().count() as u32;
    }
    line + newlines
}

fn position_of(source: &str, offset: usize) -> (u32, u32) {
    let before = &source[..offset];
    let line = before.matches('\n').count() as u32 + 1;
    let column = before
        .rfind('\n')
        .map(|i| before[i + 1..].chars().count() as u32 + 1)
        .unwrap_or(before.chars().count() as u32 + 1);
    (line, column)
}
