use super::common::{automation, set_value, subtypes};
use automation_lint::{LintErrorKind, LintOptions, LintResult, lint};
use serde_json::{Value, json};

fn all_option_combinations() -> Vec<LintOptions> {
    let mut combos = Vec::new();
    for strict in [false, true] {
        for expressions in [false, true] {
            for naming in [false, true] {
                combos.push(
                    LintOptions::default()
                        .with_strict(strict)
                        .with_expressions(expressions)
                        .with_naming(naming),
                );
            }
        }
    }
    combos
}

// ─── Baseline ───────────────────────────────────────────────────────────────

#[test]
fn minimal_automation_is_valid() {
    let result = lint(&automation(json!([])), &LintOptions::default());
    assert!(result.valid);
    assert!(result.errors.is_empty());
}

#[test]
fn empty_object_fails_baseline() {
    let result = lint(&json!({}), &LintOptions::default());
    assert!(!result.valid);
    assert!(result.errors.iter().all(|e| e.kind == LintErrorKind::Structural));
    assert!(result.errors.iter().any(|e| e.subtype() == "required"));
}

#[test]
fn missing_do_is_reported_at_root() {
    let result = lint(&json!({"name": "test"}), &LintOptions::default());
    assert_eq!(subtypes(&result.errors), vec!["required"]);
    assert_eq!(result.errors[0].path, "");
    assert_eq!(result.errors[0].detail("missingProperty"), Some(&json!("do")));
}

#[test]
fn do_must_be_a_list_of_instructions() {
    let result = lint(&json!({"name": "test", "do": "nope"}), &LintOptions::default());
    assert_eq!(subtypes(&result.errors), vec!["type"]);
    assert_eq!(result.errors[0].path, "/do");

    let result = lint(&json!({"name": "test", "do": [{}]}), &LintOptions::default());
    assert_eq!(subtypes(&result.errors), vec!["minProperties"]);
    assert_eq!(result.errors[0].path, "/do/0");
}

#[test]
fn extension_fields_are_accepted() {
    let doc = json!({
        "name": {"en": "test", "fr": "essai"},
        "do": [],
        "customField": {"anything": [1, 2, 3]},
        "private": true
    });
    assert!(lint(&doc, &LintOptions::default()).valid);
}

#[test]
fn non_objects_never_panic() {
    for value in [
        json!(null),
        json!("string"),
        json!(123),
        json!(true),
        json!([]),
        json!([{"name": "test", "do": []}]),
    ] {
        let result = lint(&value, &LintOptions::default().with_strict(true).with_naming(true));
        assert!(!result.valid, "{:?} should be invalid", value);
        assert!(!result.errors.is_empty());
        assert!(result.errors.iter().all(|e| e.kind == LintErrorKind::Structural));
    }
}

#[test]
fn baseline_failure_short_circuits() {
    let doc = json!({"do": [{"set": {"name": "x", "value": "{% now() %}"}}]});
    let result = lint(&doc, &LintOptions::default().with_strict(true).with_naming(true));
    assert!(result.errors.iter().all(|e| e.kind == LintErrorKind::Structural));
    assert_eq!(subtypes(&result.errors), vec!["required"]);
}

// ─── Strict mode ────────────────────────────────────────────────────────────

#[test]
fn strict_is_off_by_default() {
    let doc = automation(json!([{"set": {"name": "x", "value": 1, "foobar": "invalid"}}]));
    assert!(lint(&doc, &LintOptions::default()).valid);

    let result = lint(&doc, &LintOptions::default().with_strict(true));
    assert!(!result.valid);
    assert!(
        result
            .errors
            .iter()
            .any(|e| e.detail("additionalProperty") == Some(&json!("foobar")))
    );
}

#[test]
fn strict_findings_stop_before_expressions() {
    let doc = automation(json!([
        {"set": {"name": "x", "value": 1, "badArg": true}},
        {"set": {"name": "y", "value": "{% unknownFunc() %}"}}
    ]));
    let result = lint(&doc, &LintOptions::default().with_strict(true));
    assert_eq!(subtypes(&result.errors), vec!["additionalProperties"]);
}

#[test]
fn strict_pass_continues_to_expressions() {
    let doc = set_value("{% unknownFunc() %}");
    let result = lint(&doc, &LintOptions::default().with_strict(true));
    assert_eq!(subtypes(&result.errors), vec!["unknownFunction"]);
}

// ─── Expressions ────────────────────────────────────────────────────────────

#[test]
fn expressions_are_checked_by_default() {
    let result = lint(&set_value("{% unknownFunc() %}"), &LintOptions::default());
    assert!(!result.valid);
    assert!(result.errors.iter().any(|e| e.kind == LintErrorKind::Expression));
}

#[test]
fn expressions_can_be_disabled() {
    let result = lint(
        &set_value("{% unknownFunc() %}"),
        &LintOptions::default().with_expressions(false),
    );
    assert!(result.valid);
}

#[test]
fn raw_variable_and_unknown_call_are_both_reported() {
    let result = lint(&set_value("{% myVar + now() %}"), &LintOptions::default());
    assert!(result.errors.len() >= 2);
    let kinds = subtypes(&result.errors);
    assert!(kinds.contains(&"missingBrackets"));
    assert!(kinds.contains(&"unknownFunction"));
}

#[test]
fn expression_findings_stop_before_naming() {
    let doc = json!({"name": "bad_name", "do": [{"set": {"name": "x", "value": "{{oops"}}]});
    let result = lint(&doc, &LintOptions::default().with_naming(true));
    assert!(result.errors.iter().all(|e| e.kind == LintErrorKind::Expression));
}

#[cfg(feature = "js-syntax")]
#[test]
fn deeply_nested_expression_is_a_finding() {
    for depth in [25, 200, 5000] {
        let expression = format!("{{% {}1{} %}}", "(".repeat(depth), ")".repeat(depth));
        let result = lint(&set_value(&expression), &LintOptions::default());
        assert_eq!(subtypes(&result.errors), vec!["invalidSyntax"], "depth {}", depth);
    }
}

// ─── Naming ─────────────────────────────────────────────────────────────────

#[test]
fn naming_is_off_by_default() {
    let doc = json!({"name": "tools/my_bad_name", "do": []});
    assert!(lint(&doc, &LintOptions::default()).valid);

    let result = lint(&doc, &LintOptions::default().with_naming(true));
    assert!(!result.valid);
    assert!(result.errors.iter().all(|e| e.kind == LintErrorKind::Naming));
    assert!(result.errors.iter().any(|e| e.subtype() == "invalidNameFormat"));
}

#[test]
fn naming_accepts_scoped_verb_names() {
    let doc = json!({
        "name": "tools/files/summary/combineTexts",
        "description": "Combines texts",
        "arguments": {},
        "do": []
    });
    assert!(lint(&doc, &LintOptions::default().with_naming(true)).valid);
}

// ─── Contract ───────────────────────────────────────────────────────────────

#[test]
fn empty_do_is_valid_under_every_option() {
    let doc = json!({
        "name": "getData",
        "description": "Gets data",
        "arguments": {},
        "do": []
    });
    for options in all_option_combinations() {
        let result = lint(&doc, &options);
        assert!(result.valid, "{:?}: {:?}", options, result.errors);
    }
}

#[test]
fn lint_is_idempotent() {
    let doc = automation(json!([
        {"set": {"name": "x", "value": "{% myVar + now() %}", "extra": 1}},
        {"emit": {"event": "bad"}}
    ]));
    for options in all_option_combinations() {
        assert_eq!(lint(&doc, &options), lint(&doc, &options));
    }
}

#[test]
fn valid_iff_no_errors() {
    let docs: Vec<Value> = vec![
        automation(json!([])),
        json!({}),
        set_value("{{x"),
        json!(null),
    ];
    for doc in docs {
        for options in all_option_combinations() {
            let result = lint(&doc, &options);
            assert_eq!(result.valid, result.errors.is_empty());
            assert_eq!(result.valid, result.is_valid());
        }
    }
}

#[test]
fn result_serializes_uniformly() {
    let result = lint(&json!({"name": "test"}), &LintOptions::default());
    let wire = serde_json::to_value(&result).unwrap();
    assert_eq!(wire["valid"], false);
    let error = &wire["errors"][0];
    for key in ["kind", "path", "subSchemaPath", "params", "message"] {
        assert!(error.get(key).is_some(), "missing {}", key);
    }
    assert_eq!(error["params"]["keyword"], "required");
    assert_eq!(error["params"]["missingProperty"], "do");

    let back: LintResult = serde_json::from_value(wire).unwrap();
    assert_eq!(back, result);
}

#[test]
fn options_deserialize_with_defaults() {
    let options: LintOptions = serde_json::from_value(json!({"strict": true})).unwrap();
    assert_eq!(
        options,
        LintOptions {
            strict: true,
            validate_expressions: true,
            validate_naming: false,
        }
    );
    let options: LintOptions =
        serde_json::from_value(json!({"validateExpressions": false, "validateNaming": true}))
            .unwrap();
    assert!(!options.validate_expressions);
    assert!(options.validate_naming);
}
