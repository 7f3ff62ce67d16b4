use automation_lint::LintError;
use serde_json::{Value, json};

/// Minimal valid automation running `steps`.
pub fn automation(steps: Value) -> Value {
    json!({ "name": "test", "do": steps })
}

/// Automation whose only step sets `x` to `value`.
pub fn set_value(value: &str) -> Value {
    automation(json!([{ "set": { "name": "x", "value": value } }]))
}

pub fn subtypes(errors: &[LintError]) -> Vec<&str> {
    errors.iter().map(LintError::subtype).collect()
}

pub fn count_subtype(errors: &[LintError], subtype: &str) -> usize {
    errors.iter().filter(|e| e.subtype() == subtype).count()
}
