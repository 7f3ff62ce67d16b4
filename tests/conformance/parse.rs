use automation_lint::parse::parse;
use automation_lint::{LintOptions, ParseErrorKind, lint_str};
use serde_json::json;

#[test]
fn yaml_document() {
    let value = parse(
        r#"
name: tools/getWeather
description: Fetches the weather
do:
  - set:
      name: city
      value: "{{args.city}}"
  - emit:
      event: Weather.forecast.requested
"#,
    )
    .expect("valid YAML");
    assert_eq!(value["name"], "tools/getWeather");
    assert_eq!(value["do"][0]["set"]["value"], "{{args.city}}");
    assert_eq!(value["do"][1]["emit"]["event"], "Weather.forecast.requested");
}

#[test]
fn json_is_accepted() {
    let value = parse(r#"{"name": "test", "do": []}"#).expect("valid JSON");
    assert_eq!(value, json!({"name": "test", "do": []}));
}

#[test]
fn key_order_is_preserved() {
    let value = parse("zeta: 1\nalpha: 2\nmid: 3\n").unwrap();
    let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn leading_document_marker_is_allowed() {
    let value = parse("---\nname: test\ndo: []\n").unwrap();
    assert_eq!(value["name"], "test");
}

#[test]
fn empty_input() {
    for input in ["", "   \n\t\n", "# only a comment\n", "---\n"] {
        let err = parse(input).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::Empty, "{:?}", input);
    }
}

#[test]
fn multi_document_stream() {
    let err = parse("name: a\ndo: []\n---\nname: b\ndo: []\n").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::MultiDocument);
    assert_eq!(err.line, Some(3));
}

#[test]
fn marker_inside_block_scalar_is_content() {
    let value = parse("name: test\ndo: []\nnotes: |\n  ---\n  text\n").unwrap();
    assert_eq!(value["notes"], "---\ntext\n");
}

#[test]
fn syntax_error() {
    let err = parse("name: [unclosed\ndo: []\n").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::Syntax);
    assert!(!err.message.is_empty());
}

#[test]
fn scalar_root_is_returned_as_is() {
    assert_eq!(parse("just text").unwrap(), json!("just text"));
}

#[test]
fn lint_str_composes_parse_and_lint() {
    let result = lint_str("name: runJob\ndo: []\n", &LintOptions::default()).unwrap();
    assert!(result.valid);

    let result = lint_str(
        "name: runJob\ndo:\n  - set:\n      name: x\n      value: \"{% now() %}\"\n",
        &LintOptions::default(),
    )
    .unwrap();
    assert_eq!(result.errors[0].subtype(), "unknownFunction");

    let err = lint_str("", &LintOptions::default()).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::Empty);
}

#[test]
fn parse_error_display() {
    let err = parse("").unwrap_err();
    assert_eq!(err.to_string(), "empty input");

    let err = parse("a: 1\n---\nb: 2\n").unwrap_err();
    assert_eq!(err.to_string(), "2:1: multi-document YAML is not supported");
}
