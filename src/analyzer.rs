//! Lexical analysis of the inner text of a `{% %}` block.
//!
//! These scans are deliberately regex-level: the template layer only has two
//! productions, and the host-language grammar is left to the syntax check.
//! Offsets are byte offsets into the analysed text.

use regex::{Captures, Regex};
use serde::Serialize;
use std::sync::LazyLock;

/// Identifier substituted for every `{{ }}` reference before syntax checking.
pub const VARIABLE_PLACEHOLDER: &str = "__var__";

static VARIABLE_SPAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{[^}]*\}\}").unwrap());

static NON_EMPTY_VARIABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{[^}]+\}\}").unwrap());

static DOUBLE_QUOTED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#""[^"]*""#).unwrap());

static SINGLE_QUOTED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"'[^']*'").unwrap());

static IDENTIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z_][A-Za-z0-9_]*").unwrap());

static CALL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Za-z_][A-Za-z0-9_]*)\s*\(").unwrap());

static WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Za-z0-9_]+").unwrap());

/// An identifier immediately followed by `(`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FunctionCall<'a> {
    pub name: &'a str,
    pub start: usize,
    pub end: usize,
}

/// A bare word that is neither called nor a property of a call result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Identifier<'a> {
    pub name: &'a str,
    pub start: usize,
    pub end: usize,
}

/// ASCII word character, as matched by a `\b` boundary.
fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// True when a match at `start` begins on a word boundary.
fn at_word_start(text: &str, start: usize) -> bool {
    start == 0 || !is_word_byte(text.as_bytes()[start - 1])
}

/// Finds every `name(` / `name (` call in document order, including calls
/// nested in the arguments of other calls.
pub fn extract_function_calls(content: &str) -> Vec<FunctionCall<'_>> {
    CALL_RE
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .filter(|name| at_word_start(content, name.start()))
        .map(|name| FunctionCall {
            name: name.as_str(),
            start: name.start(),
            end: name.end(),
        })
        .collect()
}

/// Replaces every match of `re` with blanks of the same byte length, so
/// offsets into the result stay valid against `text`.
fn mask(text: &str, re: &Regex) -> String {
    re.replace_all(text, |caps: &Captures| " ".repeat(caps[0].len()))
        .into_owned()
}

/// Finds bare identifiers that could be variables missing their `{{ }}`.
///
/// Variable references and quoted string literals are masked first. Call
/// names and properties read off a call result (`date({{x}}).year`) are
/// dropped; other property accesses are not.
pub fn extract_identifiers(content: &str) -> Vec<Identifier<'_>> {
    let masked = mask(content, &VARIABLE_SPAN_RE);
    let masked = mask(&masked, &DOUBLE_QUOTED_RE);
    let masked = mask(&masked, &SINGLE_QUOTED_RE);

    let mut identifiers = Vec::new();
    for m in IDENTIFIER_RE.find_iter(&masked) {
        let (start, end) = (m.start(), m.end());
        if !at_word_start(&masked, start) {
            continue;
        }

        if masked[end..].trim_start().starts_with('(') {
            continue;
        }

        if start > 1
            && masked.as_bytes()[start - 1] == b'.'
            && masked[..start - 1].trim_end().ends_with(')')
        {
            continue;
        }

        identifiers.push(Identifier {
            name: &content[start..end],
            start,
            end,
        });
    }

    identifiers
}

/// Rewrites block content into a plain host-language expression: variable
/// references become [`VARIABLE_PLACEHOLDER`] and the textual operators
/// `and`, `or`, `not` become `&&`, `||`, `!`.
pub fn to_javascript(content: &str) -> String {
    let js = NON_EMPTY_VARIABLE_RE.replace_all(content, VARIABLE_PLACEHOLDER);
    WORD_RE
        .replace_all(&js, |caps: &Captures| match &caps[0] {
            "and" => "&&".to_string(),
            "or" => "||".to_string(),
            "not" => "!".to_string(),
            word => word.to_string(),
        })
        .into_owned()
}
