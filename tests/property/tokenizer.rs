use automation_lint::tokenizer::{
    TokenKind, extract_expressions, has_expressions, validate_delimiters,
};
use proptest::prelude::*;

/// Text biased towards delimiter fragments.
fn templated() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("{{".to_string()),
            Just("}}".to_string()),
            Just("{%".to_string()),
            Just("%}".to_string()),
            Just("%".to_string()),
            Just("}".to_string()),
            "[a-z ()+.'\"é]{0,6}",
        ],
        0..12,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    // No opening marker means nothing to extract.
    #[test]
    fn no_markers_no_tokens(s in "\\PC{0,64}") {
        if !has_expressions(&s) {
            prop_assert!(extract_expressions(&s).is_empty());
        }
    }

    #[test]
    fn no_markers_no_tokens_templated(s in templated()) {
        if !has_expressions(&s) {
            prop_assert!(extract_expressions(&s).is_empty());
        }
    }

    // Offsets slice back to the token text and tokens come out sorted.
    #[test]
    fn token_offsets_are_consistent(s in templated()) {
        let tokens = extract_expressions(&s);
        for token in &tokens {
            prop_assert!(token.start < token.end);
            prop_assert_eq!(&s[token.start..token.end], token.content);
            prop_assert!(token.content.contains(token.inner));
            match token.kind {
                TokenKind::Variable => {
                    prop_assert!(token.content.starts_with("{{") && token.content.ends_with("}}"));
                }
                TokenKind::Expression => {
                    prop_assert!(token.content.starts_with("{%") && token.content.ends_with("%}"), "expression token not delimited by {{% %}}: {:?}", token.content);
                }
            }
        }
        for pair in tokens.windows(2) {
            prop_assert!(pair[0].start <= pair[1].start);
        }
    }

    // The report is exactly the per-family count difference.
    #[test]
    fn delimiter_report_matches_counts(s in templated()) {
        let report = validate_delimiters(&s);
        let count = |m: &str| s.matches(m).count() as isize;
        prop_assert_eq!(report.unclosed_variables, count("{{") - count("}}"));
        prop_assert_eq!(report.unclosed_expressions, count("{%") - count("%}"));
        prop_assert_eq!(
            report.valid,
            report.unclosed_variables == 0 && report.unclosed_expressions == 0
        );
    }

    #[test]
    fn blocks_own_their_variables(s in templated()) {
        let tokens = extract_expressions(&s);
        let blocks: Vec<(usize, usize)> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Expression)
            .map(|t| (t.start, t.end))
            .collect();
        for var in tokens.iter().filter(|t| t.kind == TokenKind::Variable) {
            prop_assert!(!blocks.iter().any(|&(start, end)| var.start >= start && var.end <= end));
        }
    }
}
