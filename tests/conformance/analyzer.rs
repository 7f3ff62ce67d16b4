use automation_lint::analyzer::{
    VARIABLE_PLACEHOLDER, extract_function_calls, extract_identifiers, to_javascript,
};

fn call_names(content: &str) -> Vec<&str> {
    extract_function_calls(content)
        .into_iter()
        .map(|c| c.name)
        .collect()
}

fn identifier_names(content: &str) -> Vec<&str> {
    extract_identifiers(content)
        .into_iter()
        .map(|i| i.name)
        .collect()
}

// ─── extract_function_calls ─────────────────────────────────────────────────

#[test]
fn calls_in_document_order() {
    assert_eq!(call_names("date() + uuid()"), vec!["date", "uuid"]);
}

#[test]
fn call_with_arguments() {
    assert_eq!(call_names("round({{value}}, 2)"), vec!["round"]);
}

#[test]
fn nested_calls_outer_first() {
    assert_eq!(call_names("json(trim({{value}}))"), vec!["json", "trim"]);
}

#[test]
fn call_offsets_cover_the_name() {
    let calls = extract_function_calls("date()");
    assert_eq!(calls[0].start, 0);
    assert_eq!(calls[0].end, 4);
}

#[test]
fn whitespace_before_parenthesis() {
    assert_eq!(call_names("date  ()"), vec!["date"]);
}

#[test]
fn variables_are_not_calls() {
    assert!(extract_function_calls("{{a}} + {{b}}").is_empty());
}

#[test]
fn method_call_name_is_reported() {
    assert_eq!(call_names("{{items}}.includes('x')"), vec!["includes"]);
}

// ─── extract_identifiers ────────────────────────────────────────────────────

#[test]
fn bare_identifier() {
    assert_eq!(identifier_names("myVar + 1"), vec!["myVar"]);
}

#[test]
fn call_names_are_not_identifiers() {
    assert_eq!(identifier_names("date() + x"), vec!["x"]);
    assert_eq!(identifier_names("date ( ) + x"), vec!["x"]);
}

#[test]
fn variable_contents_are_masked() {
    assert_eq!(identifier_names("{{myVar}} + x"), vec!["x"]);
    assert_eq!(identifier_names("{{user.name}} + x"), vec!["x"]);
}

#[test]
fn string_literals_are_masked() {
    assert_eq!(identifier_names("\"hello\" + x"), vec!["x"]);
    assert_eq!(identifier_names("'hello' + x"), vec!["x"]);
}

#[test]
fn several_identifiers_in_order() {
    assert_eq!(identifier_names("a + b + c"), vec!["a", "b", "c"]);
}

#[test]
fn identifier_offsets() {
    let ids = extract_identifiers("myVar");
    assert_eq!(ids[0].start, 0);
    assert_eq!(ids[0].end, 5);
}

#[test]
fn underscores_and_digits() {
    assert_eq!(identifier_names("my_var2 + _test"), vec!["my_var2", "_test"]);
}

#[test]
fn numeric_literals_are_not_identifiers() {
    assert!(identifier_names("1 + 2.5").is_empty());
    assert!(identifier_names("1e5").is_empty());
}

#[test]
fn property_of_call_result_is_skipped() {
    assert!(identifier_names("date({{x}}).year").is_empty());
    assert!(identifier_names("date({{x}}) .year").is_empty());
}

#[test]
fn chained_property_access_is_still_reported() {
    // Only the first property after a call result is exempt.
    assert_eq!(identifier_names("date({{x}}).year.value"), vec!["value"]);
}

#[test]
fn offsets_index_the_original_text() {
    let content = "{{a}} + 'b' + rest";
    let ids = extract_identifiers(content);
    assert_eq!(ids.len(), 1);
    assert_eq!(&content[ids[0].start..ids[0].end], "rest");
}

// ─── to_javascript ──────────────────────────────────────────────────────────

#[test]
fn variables_become_placeholders() {
    assert_eq!(to_javascript("{{a}} + {{b}}"), "__var__ + __var__");
    assert_eq!(
        to_javascript("{{a}} + {{b}} * {{c}}"),
        format!("{0} + {0} * {0}", VARIABLE_PLACEHOLDER)
    );
}

#[test]
fn ternary_with_literal() {
    assert_eq!(
        to_javascript("{{user.name}} ? {{user.id}} : \"default\""),
        "__var__ ? __var__ : \"default\""
    );
}

#[test]
fn non_variable_text_is_preserved() {
    assert_eq!(to_javascript("date() + 1"), "date() + 1");
}

#[test]
fn textual_operators_are_translated() {
    assert_eq!(to_javascript("{{a}} and {{b}}"), "__var__ && __var__");
    assert_eq!(to_javascript("{{a}} or not {{b}}"), "__var__ || ! __var__");
}

#[test]
fn operator_words_inside_identifiers_are_kept() {
    assert_eq!(to_javascript("android or order"), "android || order");
}

#[test]
fn empty_variable_is_not_replaced() {
    assert_eq!(to_javascript("{{}} + 1"), "{{}} + 1");
}
