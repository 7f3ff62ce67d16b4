#![no_main]

use automation_lint::analyzer::{extract_function_calls, extract_identifiers, to_javascript};
use automation_lint::tokenizer::{TokenKind, extract_expressions, has_expressions, validate_delimiters};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);

    let tokens = extract_expressions(&s);
    if !has_expressions(&s) {
        assert!(tokens.is_empty());
    }
    let _ = validate_delimiters(&s);

    for token in &tokens {
        assert_eq!(&s[token.start..token.end], token.content);
        if token.kind == TokenKind::Expression {
            for call in extract_function_calls(token.inner) {
                assert_eq!(&token.inner[call.start..call.end], call.name);
            }
            for id in extract_identifiers(token.inner) {
                assert_eq!(&token.inner[id.start..id.end], id.name);
            }
            let _ = to_javascript(token.inner);
        }
    }
});
