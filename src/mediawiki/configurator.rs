//! Macro catalog for the MB102 lecture notes
//!
//! The source documents use a fixed, enumerable set of author macros; this
//! module registers them all. Most are plain replacements or mask-based
//! rewrites; `\text` is the one genuinely context-sensitive handler.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::mediawiki::expansion::MacroExpansion;

static MASK_PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\#(?P<n>\d+)\}").unwrap());

/// Build a handler substituting `{#1}`, `{#2}`, … with the captured
/// arguments
pub fn mask(mask: &str) -> impl Fn(&[String]) -> String + Send + Sync + 'static {
    let mask = mask.to_string();
    move |args: &[String]| {
        MASK_PLACEHOLDER
            .replace_all(&mask, |caps: &Captures| {
                caps.name("n")
                    .and_then(|m| m.as_str().parse::<usize>().ok())
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|index| args.get(index))
                    .cloned()
                    .unwrap_or_default()
            })
            .into_owned()
    }
}

/// The full macro catalog used by the MB102 documents
pub fn configure_mb102() -> MacroExpansion {
    let mut expansion = MacroExpansion::new();

    for (name, replacement) in [
        ("Rbb", "R"),
        ("Zbb", "Z"),
        ("Nbb", "N"),
        ("Cbb", "C"),
        ("Ibb", "I"),
        ("Qbb", "Q"),
        ("Dbb", "D"),
        ("D", "mathcal{D}"),
        ("H", "mathcal{H}"),
        ("L", "mathcal{L}"),
        ("R", "mathcal{R}"),
        ("P", "mathcal{P}"),
        ("st", "operatorname{\\textrm{st}}"),
        ("sgn", "operatorname{\\textrm{sgn}}"),
        ("tg", "operatorname{\\textrm{tg}}"),
        ("cotg", "operatorname{\\textrm{cotg}}"),
        ("arctg", "operatorname{\\textrm{arctg}}"),
        ("arccotg", "operatorname{\\textrm{arccotg}}"),
        ("Gr", "operatorname{\\textrm{Gr}}"),
        ("Eigen", "operatorname{\\textrm{Eigen}}"),
        ("ul", "underline"),
        ("eps", "varepsilon"),
        ("dx", "mathrm{d}x"),
        ("e", "mathrm{e}"),
        ("la", "lambda"),
        ("al", "alpha"),
        ("be", "beta"),
        ("ps", "psi"),
        ("De", "Delta"),
    ] {
        expansion.add_replacement(name, replacement);
    }

    expansion
        .add_handler(
            "mdet",
            1,
            mask("\\left|\\,\\begin{matrix} {#1} \\end{matrix}\\,\\right|"),
        )
        .add_handler(
            "mmatrix",
            1,
            mask("\\left(\\begin{matrix} {#1} \\end{matrix}\\right)"),
        )
        .add_handler(
            "bigseq",
            3,
            mask("\\big\\{{#1}\\big\\}_{{#2}={#3}}^\\infty"),
        )
        .add_handler(
            "bigtyp",
            1,
            mask("\\quad\\big| \\text{ typ } {#1}\\ \\big|"),
        )
        .add_handler(
            "biggtyp",
            1,
            mask("\\quad\\bigg| \\text{ typ } {#1}\\ \\bigg|"),
        )
        .add_handler(
            "perpartes",
            4,
            mask(
                "\\quad\\bigg| \\begin{array}{ll}\n  u'={#1} \\quad & u={#2} \\\\\n  v={#3} \\quad & v'={#4}\n\\end{array} \\bigg|",
            ),
        )
        .add_handler(
            "substituce",
            2,
            mask("\\quad\\left| \\begin{array}{l} {#1} \\\\ {#2} \\end{array}\\ \\right|"),
        )
        .add_handler(
            "lowint",
            2,
            mask("{\\ul{\\int}}_{\\,\\, {#1}}^{\\,\\, {#2}}"),
        )
        .add_handler(
            "upint",
            2,
            mask("{\\overline{\\int}}_{\\!\\!\\! {#1}}^{\\,\\,\\, {#2}}"),
        )
        .add_handler("bigmeze", 3, mask("\\big[\\,{#1}\\,\\big]_{{#2}}^{{#3}}"))
        .add_handler(
            "biggmeze",
            3,
            mask("\\bigg[\\,{#1}\\,\\bigg]_{{#2}}^{{#3}}"),
        )
        .add_handler("rada", 3, mask("\\sum_{{#2}={#3}}^\\infty {#1}"))
        .add_handler(
            "mathbox",
            1,
            mask("\\fbox{$\\displaystyle \\, {#1} \\, $}\\,"),
        )
        .add_handler("qtextq", 1, mask("\\quad\\text{{#1}}\\quad"))
        .add_handler("qqtextqq", 1, mask("\\qquad\\text{{#1}}\\qquad"))
        .add_handler("label", 1, mask(""))
        .add_handler("ref", 1, mask(""));

    expansion.add_handler("text", 1, |args: &[String]| {
        let body = args.first().map(String::as_str).unwrap_or("");
        if let Some(rest) = strip_prefix_ci(body, "\\scriptsize") {
            return format!("\\LARGE{{{}}}", rest);
        }
        if let Some(rest) = strip_prefix_ci(body, "\\rm") {
            return format!("\\textrm{{{}}}", rest);
        }
        format!("\\text{{{}}}", body)
    });

    expansion
}

fn strip_prefix_ci<'a>(value: &'a str, prefix: &str) -> Option<&'a str> {
    if value.len() >= prefix.len()
        && value.is_char_boundary(prefix.len())
        && value[..prefix.len()].eq_ignore_ascii_case(prefix)
    {
        Some(&value[prefix.len()..])
    } else {
        None
    }
}
