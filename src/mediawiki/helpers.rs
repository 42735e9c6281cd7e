//! Output post-processing
//!
//! Whitespace cleanup applied to rendered wiki text. Both passes must leave
//! `<math>`, `<pre>` and `<script>` blocks untouched, so the text is split
//! into protected and free segments first and only the free segments are
//! rewritten.

use once_cell::sync::Lazy;
use regex::Regex;

static LINE_INDENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[\t ]+").unwrap());

const PROTECTED_TAGS: [&str; 3] = ["math", "pre", "script"];

/// Byte spans of `<math>…</math>`-style blocks, case-insensitive; an
/// unclosed block protects everything up to the end
fn protected_spans(text: &str) -> Vec<(usize, usize)> {
    let lower = text.to_ascii_lowercase();
    let mut spans = Vec::new();
    let mut cursor = 0;

    while cursor < lower.len() {
        let mut next_open: Option<(usize, &str)> = None;
        for tag in PROTECTED_TAGS {
            let needle = format!("<{}", tag);
            if let Some(found) = lower[cursor..].find(&needle) {
                let at = cursor + found;
                if next_open.map(|(pos, _)| at < pos).unwrap_or(true) {
                    next_open = Some((at, tag));
                }
            }
        }

        let Some((open, tag)) = next_open else {
            break;
        };
        let closing = format!("</{}>", tag);
        let end = lower[open..]
            .find(&closing)
            .map(|found| open + found + closing.len())
            .unwrap_or(lower.len());
        spans.push((open, end));
        cursor = end;
    }

    spans
}

/// Apply a rewrite to the free segments, keeping protected blocks verbatim
fn rewrite_free_segments(text: &str, rewrite: impl Fn(&str) -> String) -> String {
    let spans = protected_spans(text);
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for (start, end) in spans {
        out.push_str(&rewrite(&text[cursor..start]));
        out.push_str(&text[start..end]);
        cursor = end;
    }
    out.push_str(&rewrite(&text[cursor..]));
    out
}

/// Strip leading tabs and spaces from every line outside protected blocks
pub fn ltrim_per_line(text: &str) -> String {
    rewrite_free_segments(text, |segment| {
        LINE_INDENT.replace_all(segment, "").into_owned()
    })
}

/// Unwrap single newlines inside paragraphs: a lone `\n` that neither
/// borders a blank line nor touches markup (`>` before it, `<` after it)
/// becomes a space. A `<math>…</math>` block followed by a single newline
/// and more prose is glued to that prose as well, unless it sits on its own
/// `:` display line.
pub fn remove_ambiguous_newlines(text: &str) -> String {
    let unwrapped = rewrite_free_segments(text, unwrap_paragraph_newlines);
    glue_inline_math(&unwrapped)
}

fn unwrap_paragraph_newlines(segment: &str) -> String {
    // only the single-byte `\n` is ever replaced, so byte-wise rewriting
    // keeps the string valid UTF-8
    let bytes = segment.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    for (index, &byte) in bytes.iter().enumerate() {
        if byte == b'\n' {
            let prev = index.checked_sub(1).map(|i| bytes[i]);
            let next = bytes.get(index + 1).copied();
            let keep = prev.map(|b| b == b'\n' || b == b'>').unwrap_or(true)
                || next.map(|b| b == b'\n' || b == b'<').unwrap_or(true);
            out.push(if keep { b'\n' } else { b' ' });
        } else {
            out.push(byte);
        }
    }
    String::from_utf8(out).unwrap_or_else(|_| segment.to_string())
}

fn glue_inline_math(text: &str) -> String {
    let lower = text.to_ascii_lowercase();
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;

    while let Some(found) = lower[cursor..].find("<math>") {
        let open = cursor + found;
        let Some(close) = lower[open..].find("</math>") else {
            break;
        };
        let end = open + close + "</math>".len();

        out.push_str(&text[cursor..end]);
        cursor = end;

        // on its own display line, leave alone
        let display = open >= 2 && bytes[open - 2] == b'\n' && bytes[open - 1] == b':';
        if display {
            continue;
        }
        let next = bytes.get(end).copied();
        let after = bytes.get(end + 1).copied();
        if next == Some(b'\n')
            && after != Some(b'\n')
            && !(after == Some(b'<') && bytes.get(end + 2).copied() == Some(b'/'))
        {
            out.push(' ');
            cursor = end + 1;
        }
    }
    out.push_str(&text[cursor..]);
    out
}

/// Ensure `:<math>` display lines start on a line of their own
pub fn break_before_display_math(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(found) = rest.find(":<math>") {
        out.push_str(&rest[..found]);
        if !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(":<math>");
        rest = &rest[found + ":<math>".len()..];
    }
    out.push_str(rest);
    out
}
