//! Label command
//!
//! `\label{eq:sample}` carries a literal name out of which a type tag (the
//! text before the first colon) and a normalized, url-safe id are derived.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::latex::ast::argument::CommandArgument;
use crate::latex::error::LatexError;

static TYPE_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z]+:").unwrap());

/// A `\label` command with its literal name
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Label {
    pub name: String,
    pub arguments: Vec<CommandArgument>,
    pub label_name: String,
}

impl Label {
    pub fn new(name: String, arguments: Vec<CommandArgument>) -> Result<Self, LatexError> {
        let label_name = arguments
            .first()
            .and_then(|argument| argument.first_text())
            .map(str::to_string)
            .ok_or_else(|| LatexError::UnexpectedNode {
                found: format!("\\{} without a name argument", name),
                expected: "label name".to_string(),
            })?;
        Ok(Self {
            name,
            arguments,
            label_name,
        })
    }

    /// The literal name as written in the source
    pub fn label_name(&self) -> &str {
        &self.label_name
    }

    /// Normalized id: type prefix stripped, remainder webalized
    pub fn label_id(&self) -> String {
        let stripped = TYPE_PREFIX.replace(&self.label_name, "");
        webalize(&stripped).trim_matches('-').to_string()
    }

    /// The text before the first colon, or the whole name without one
    pub fn label_type(&self) -> &str {
        self.label_name
            .split(':')
            .next()
            .unwrap_or(&self.label_name)
    }
}

/// Lowercase, fold common diacritics, collapse everything else to dashes
fn webalize(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut previous_dash = false;
    for ch in value.chars().flat_map(fold_char) {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
            previous_dash = false;
        } else if !previous_dash && !out.is_empty() {
            out.push('-');
            previous_dash = true;
        }
    }
    if out.ends_with('-') {
        out.pop();
    }
    out
}

fn fold_char(ch: char) -> std::vec::IntoIter<char> {
    let folded: &str = match ch {
        'á' | 'à' | 'â' | 'ä' | 'Á' | 'À' | 'Â' | 'Ä' => "a",
        'č' | 'ç' | 'Č' | 'Ç' => "c",
        'ď' | 'Ď' => "d",
        'é' | 'è' | 'ê' | 'ë' | 'ě' | 'É' | 'È' | 'Ê' | 'Ë' | 'Ě' => "e",
        'í' | 'ì' | 'î' | 'ï' | 'Í' | 'Ì' | 'Î' | 'Ï' => "i",
        'ň' | 'ñ' | 'Ň' | 'Ñ' => "n",
        'ó' | 'ò' | 'ô' | 'ö' | 'Ó' | 'Ò' | 'Ô' | 'Ö' => "o",
        'ř' | 'Ř' => "r",
        'š' | 'Š' => "s",
        'ť' | 'Ť' => "t",
        'ú' | 'ù' | 'û' | 'ü' | 'ů' | 'Ú' | 'Ù' | 'Û' | 'Ü' | 'Ů' => "u",
        'ý' | 'ÿ' | 'Ý' => "y",
        'ž' | 'Ž' => "z",
        _ => {
            return vec![ch].into_iter();
        }
    };
    folded.chars().collect::<Vec<_>>().into_iter()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(name: &str) -> Label {
        Label::new(
            "label".to_string(),
            vec![CommandArgument::from_text(name)],
        )
        .unwrap()
    }

    #[test]
    fn test_label_type_and_id() {
        let l = label("eq:Main Result");
        assert_eq!(l.label_type(), "eq");
        assert_eq!(l.label_id(), "main-result");
    }

    #[test]
    fn test_label_without_type_prefix() {
        let l = label("intro");
        assert_eq!(l.label_type(), "intro");
        assert_eq!(l.label_id(), "intro");
    }

    #[test]
    fn test_diacritics_are_folded() {
        let l = label("V:Věta o limitě");
        assert_eq!(l.label_id(), "veta-o-limite");
    }

    #[test]
    fn test_missing_argument_is_an_error() {
        assert!(Label::new("label".to_string(), Vec::new()).is_err());
    }
}
