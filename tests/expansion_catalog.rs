//! Macro engine tests against the full MB102 catalog

use rstest::rstest;

use tex2wiki::mediawiki::{configure_mb102, MacroExpansion};

#[rstest]
#[case("\\Rbb", "R")]
#[case("\\eps", "varepsilon")]
#[case("\\sgn x", "operatorname{\\textrm{sgn}} x")]
#[case("\\dx", "mathrm{d}x")]
#[case("\\De\\al", "Deltaalpha")]
fn catalog_replacements(#[case] input: &str, #[case] expected: &str) {
    let expansion = configure_mb102();
    assert_eq!(expansion.expand(input).unwrap(), expected);
}

#[test]
fn rada_reorders_arguments() {
    let expansion = configure_mb102();
    assert_eq!(
        expansion.expand("\\rada{a_n}{n}{1}").unwrap(),
        "\\sum_{n=1}^\\infty a_n"
    );
}

#[test]
fn perpartes_builds_the_table() {
    let expansion = configure_mb102();
    let expanded = expansion
        .expand("\\perpartes{f'}{f}{g}{g'}")
        .unwrap();
    assert!(expanded.contains("u'=f'"));
    assert!(expanded.contains("v'=g'"));
    assert!(expanded.contains("\\begin{array}{ll}"));
}

#[test]
fn nested_catalog_macros_expand_inside_out() {
    let expansion = configure_mb102();
    assert_eq!(
        expansion.expand("\\mmatrix{\\eps & 0}").unwrap(),
        "\\left(\\begin{matrix} varepsilon & 0 \\end{matrix}\\right)"
    );
}

#[test]
fn labels_and_refs_are_stripped_from_formulas() {
    let expansion = configure_mb102();
    assert_eq!(
        expansion.expand("x = 1\\label{eq:one}").unwrap(),
        "x = 1"
    );
    assert_eq!(expansion.expand("viz \\ref{eq:one}").unwrap(), "viz ");
}

#[test]
fn mathbox_keeps_inner_math_delimiters() {
    let expansion = configure_mb102();
    let expanded = expansion.expand("\\mathbox{x^2}").unwrap();
    assert_eq!(expanded, "\\fbox{$\\displaystyle \\, x^2 \\, $}\\,");
    // defensive re-expansion leaves the box untouched
    assert_eq!(expansion.expand(&expanded).unwrap(), expanded);
}

#[test]
fn lowint_expands_the_nested_underline() {
    let expansion = configure_mb102();
    let expanded = expansion.expand("\\lowint{0}{1}").unwrap();
    assert_eq!(expanded, "{underline{\\int}}_{\\,\\, 0}^{\\,\\, 1}");
    assert_eq!(expansion.expand(&expanded).unwrap(), expanded);
}

#[test]
fn arity_shortfall_both_policies() {
    let mut expansion = MacroExpansion::new();
    expansion.add_handler("pair", 2, |args| format!("{}+{}", args[0], args[1]));

    // tolerant by default: the call stays literal up to end of input
    assert_eq!(expansion.expand("\\pair{a}").unwrap(), "\\pair{a}");

    // strict: the same call is an arity error
    expansion.strict_arity(true);
    assert!(expansion.expand("\\pair{a}").is_err());
    // complete calls still work
    assert_eq!(expansion.expand("\\pair{a}{b}").unwrap(), "a+b");
}

mod properties {
    use proptest::prelude::*;
    use tex2wiki::mediawiki::configure_mb102;

    proptest! {
        // Expanding already-expanded text is a no-op; formulas are
        // re-expanded defensively by callers.
        #[test]
        fn expansion_is_idempotent(input in r"[a-zA-Z0-9 $^_+*/()=.,&|-]{0,48}") {
            let expansion = configure_mb102();
            let once = expansion.expand(&input).unwrap();
            let twice = expansion.expand(&once).unwrap();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn idempotent_over_catalog_invocations(n in 0usize..6) {
            let expansion = configure_mb102();
            let input = format!("\\rada{{a_{n}}}{{n}}{{{n}}} + \\eps \\mathbox{{y_{n}}}", n = n);
            let once = expansion.expand(&input).unwrap();
            let twice = expansion.expand(&once).unwrap();
            prop_assert_eq!(once, twice);
        }
    }
}
