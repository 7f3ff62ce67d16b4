//! Read-only walks over an automation document.
//!
//! Path syntax: object keys render as `/key`, array indices as `[i]`, and the
//! control-flow containers visited by [`visit_instructions`] as
//! `.conditions.<key>`, `.repeat.do`, `.all`, `.try.do`, `.try.catch` and
//! `.try.finally`.

use serde_json::{Map, Value};

/// Calls `visitor(value, path)` for every string leaf of `root`, depth-first
/// in document order. Non-string scalars and nulls are skipped.
pub fn visit_strings<'a, F>(root: &'a Value, visitor: &mut F)
where
    F: FnMut(&'a str, &str),
{
    walk_strings(root, "", visitor);
}

fn walk_strings<'a, F>(value: &'a Value, path: &str, visitor: &mut F)
where
    F: FnMut(&'a str, &str),
{
    match value {
        Value::String(s) => visitor(s, path),
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                walk_strings(item, &format!("{}[{}]", path, i), visitor);
            }
        }
        Value::Object(map) => {
            for (key, child) in map {
                walk_strings(child, &format!("{}/{}", path, key), visitor);
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}

/// Calls `visitor(instruction, path)` for every instruction reachable from
/// `automation.do`, recursing into `conditions`, `repeat`, `all` and `try`.
///
/// No-op when `do` is absent or not a list. Entries that are not mappings are
/// skipped.
pub fn visit_instructions<'a, F>(automation: &'a Value, visitor: &mut F)
where
    F: FnMut(&'a Map<String, Value>, &str),
{
    if let Some(Value::Array(instructions)) = automation.get("do") {
        visit_list(instructions, "/do", visitor);
    }
}

fn visit_list<'a, F>(instructions: &'a [Value], base: &str, visitor: &mut F)
where
    F: FnMut(&'a Map<String, Value>, &str),
{
    for (i, entry) in instructions.iter().enumerate() {
        let Value::Object(instruction) = entry else {
            continue;
        };
        let path = format!("{}[{}]", base, i);
        visitor(instruction, &path);

        if let Some(Value::Object(branches)) = instruction.get("conditions") {
            for (condition, block) in branches {
                if let Value::Array(block) = block {
                    visit_list(block, &format!("{}.conditions.{}", path, condition), visitor);
                }
            }
        }

        if let Some(Value::Object(repeat)) = instruction.get("repeat")
            && let Some(Value::Array(block)) = repeat.get("do")
        {
            visit_list(block, &format!("{}.repeat.do", path), visitor);
        }

        if let Some(Value::Array(block)) = instruction.get("all") {
            visit_list(block, &format!("{}.all", path), visitor);
        }

        if let Some(Value::Object(attempt)) = instruction.get("try") {
            for section in ["do", "catch", "finally"] {
                if let Some(Value::Array(block)) = attempt.get(section) {
                    visit_list(block, &format!("{}.try.{}", path, section), visitor);
                }
            }
        }
    }
}
