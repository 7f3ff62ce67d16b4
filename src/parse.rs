use crate::error::{ParseError, ParseErrorKind};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static LOCATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"line (\d+),? column (\d+)").unwrap());

/// Parse a YAML (or JSON) automation source into an untyped value.
///
/// Performs deserialization only. The root may be any YAML value; shape
/// problems are left to [`crate::lint`].
pub fn parse(input: &str) -> Result<Value, ParseError> {
    if is_blank(input) {
        return Err(ParseError {
            kind: ParseErrorKind::Empty,
            message: "empty input".to_string(),
            line: None,
            column: None,
        });
    }

    check_multi_document(input)?;

    serde_saphyr::from_str(input).map_err(|e| {
        let message = e.to_string();
        let (line, column) = error_location(&message);
        ParseError {
            kind: ParseErrorKind::Syntax,
            message,
            line,
            column,
        }
    })
}

/// True when `input` holds nothing but whitespace, comments and document
/// markers.
fn is_blank(input: &str) -> bool {
    input.lines().all(|line| {
        let trimmed = line.trim();
        trimmed.is_empty() || trimmed.starts_with('#') || trimmed == "---" || trimmed == "..."
    })
}

/// Check for multiple YAML documents (--- separator).
/// Only matches `---` at column 0 to avoid false positives inside block scalars.
fn check_multi_document(input: &str) -> Result<(), ParseError> {
    // Set once a marker or any content has been seen; a marker after that
    // starts another document.
    let mut started = false;
    for (line_num, line) in input.lines().enumerate() {
        if line.starts_with("---") && line[3..].trim().is_empty() {
            if started {
                return Err(ParseError {
                    kind: ParseErrorKind::MultiDocument,
                    message: "multi-document YAML is not supported".to_string(),
                    line: Some(line_num + 1),
                    column: Some(1),
                });
            }
            started = true;
        } else {
            let trimmed = line.trim();
            if !trimmed.is_empty() && !trimmed.starts_with('#') {
                started = true;
            }
        }
    }
    Ok(())
}

fn error_location(message: &str) -> (Option<usize>, Option<usize>) {
    match LOCATION_RE.captures(message) {
        Some(caps) => (
            caps.get(1).and_then(|m| m.as_str().parse().ok()),
            caps.get(2).and_then(|m| m.as_str().parse().ok()),
        ),
        None => (None, None),
    }
}
