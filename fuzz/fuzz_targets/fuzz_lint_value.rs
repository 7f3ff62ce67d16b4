#![no_main]

use arbitrary::Arbitrary;
use automation_lint::LintOptions;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    strict: bool,
    expressions: bool,
    naming: bool,
    json: &'a [u8],
}

// JSON input reaches value shapes that YAML text rarely produces.
fuzz_target!(|input: Input<'_>| {
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(input.json) else {
        return;
    };
    let options = LintOptions::default()
        .with_strict(input.strict)
        .with_expressions(input.expressions)
        .with_naming(input.naming);
    let result = automation_lint::lint(&value, &options);
    assert_eq!(result.valid, result.errors.is_empty());
});
