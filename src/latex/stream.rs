//! Cursor over a token sequence
//!
//! The same cursor contract backs both the document parser and the macro
//! expansion engine: peek/advance, filtered lookahead, slicing and type
//! predicates. A position is a plain index into the token vector; lookahead
//! never mutates the stream it was asked on, it scans a cloned cursor.

use crate::latex::tokenizer::{Token, TokenKind};

/// An ordered token sequence with a cursor position
#[derive(Debug, Clone, PartialEq)]
pub struct TokenStream {
    tokens: Vec<Token>,
    position: usize,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn set_position(&mut self, position: usize) {
        self.position = position;
    }

    /// True while the cursor has not consumed the whole sequence
    pub fn has_next(&self) -> bool {
        self.position < self.tokens.len()
    }

    /// The token the cursor stands on, without consuming it
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    /// True when the next token is of one of the given types
    pub fn is_next(&self, kinds: &[TokenKind]) -> bool {
        match self.peek() {
            Some(token) => kinds.contains(&token.kind),
            None => false,
        }
    }

    /// Consume and return the next token
    pub fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.position).cloned();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    /// Consume the next token and return only its value
    pub fn next_value(&mut self) -> Option<String> {
        self.next().map(|token| token.value)
    }

    /// Advance until the next token is of one of the terminal types
    pub fn next_until(&mut self, kinds: &[TokenKind]) {
        while self.has_next() && !self.is_next(kinds) {
            self.position += 1;
        }
    }

    /// Consume tokens up to (not including) the first terminal type,
    /// returning their concatenated values
    pub fn join_until(&mut self, kinds: &[TokenKind]) -> String {
        let mut joined = String::new();
        while self.has_next() && !self.is_next(kinds) {
            if let Some(value) = self.next_value() {
                joined.push_str(&value);
            }
        }
        joined
    }

    /// Concatenated values of the tokens in `[start, end)`
    pub fn join_span(&self, start: usize, end: usize) -> String {
        let mut joined = String::new();
        for token in self.tokens.iter().take(end).skip(start) {
            joined.push_str(&token.value);
        }
        joined
    }

    /// Scan forward past tokens of the `skip` types; when one of the sought
    /// types comes next, return the position it would be consumed from.
    ///
    /// Used to decide whether a command is followed by argument brackets
    /// across intervening whitespace. The stream itself is left untouched.
    pub fn lookahead(&self, kinds: &[TokenKind], skip: &[TokenKind]) -> Option<usize> {
        let mut cursor = self.position;
        while self
            .tokens
            .get(cursor)
            .map(|token| skip.contains(&token.kind))
            .unwrap_or(false)
        {
            cursor += 1;
        }
        match self.tokens.get(cursor) {
            Some(token) if kinds.contains(&token.kind) => Some(cursor),
            _ => None,
        }
    }

    /// A fresh stream over a copy of `length` tokens starting at `offset`
    pub fn slice(&self, offset: usize, length: usize) -> TokenStream {
        let end = (offset + length).min(self.tokens.len());
        let start = offset.min(end);
        TokenStream::new(self.tokens[start..end].to_vec())
    }

    /// A fresh stream with all tokens of the given types dropped
    pub fn without(self, kinds: &[TokenKind]) -> TokenStream {
        TokenStream::new(
            self.tokens
                .into_iter()
                .filter(|token| !kinds.contains(&token.kind))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latex::tokenizer::tokenize;

    #[test]
    fn test_peek_and_next() {
        let mut stream = tokenize("a$b").unwrap();
        assert_eq!(stream.peek().unwrap().value, "a");
        assert_eq!(stream.next().unwrap().value, "a");
        assert!(stream.is_next(&[TokenKind::MathInline]));
        stream.next();
        assert_eq!(stream.next().unwrap().value, "b");
        assert!(!stream.has_next());
        assert_eq!(stream.next(), None);
    }

    #[test]
    fn test_lookahead_skips_whitespace_and_newlines() {
        let stream = tokenize("\\bf \n {x}").unwrap();
        let mut stream = {
            let mut s = stream;
            s.next(); // consume the command
            s
        };
        let pos = stream
            .lookahead(
                &[TokenKind::CurlyLeft],
                &[TokenKind::Whitespace, TokenKind::Newline],
            )
            .expect("brace expected");
        stream.set_position(pos);
        assert!(stream.is_next(&[TokenKind::CurlyLeft]));
    }

    #[test]
    fn test_lookahead_stops_at_other_tokens() {
        let mut stream = tokenize("\\bf x {y}").unwrap();
        stream.next();
        assert_eq!(
            stream.lookahead(
                &[TokenKind::CurlyLeft],
                &[TokenKind::Whitespace, TokenKind::Newline],
            ),
            None
        );
        // lookahead must not move the cursor
        assert_eq!(stream.position(), 1);
    }

    #[test]
    fn test_join_until() {
        let mut stream = tokenize("$x+1$rest").unwrap();
        stream.next(); // opening delimiter
        let content = stream.join_until(&[TokenKind::MathInline]);
        assert_eq!(content, "x+1");
        assert!(stream.is_next(&[TokenKind::MathInline]));
    }

    #[test]
    fn test_without_drops_comments() {
        let stream = tokenize("% gone\nx").unwrap();
        let filtered = stream.without(&[TokenKind::Comment]);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.tokens()[0].value, "x");
    }

    #[test]
    fn test_slice_is_independent() {
        let stream = tokenize("a$b$c").unwrap();
        let slice = stream.slice(2, 1);
        assert_eq!(slice.len(), 1);
        assert_eq!(slice.tokens()[0].value, "b");
        assert_eq!(slice.position(), 0);
    }
}
