//! Extraction of `{{ variable }}` references and `{% expression %}` blocks
//! from a single string value.
//!
//! Offsets are byte offsets into the scanned string. Nothing here fails:
//! malformed input yields an unbalanced [`DelimiterReport`] and/or no tokens.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

pub const VARIABLE_OPEN: &str = "{{";
pub const VARIABLE_CLOSE: &str = "}}";
pub const EXPRESSION_OPEN: &str = "{%";
pub const EXPRESSION_CLOSE: &str = "%}";

static VARIABLE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{\{([^}]*)\}\}").unwrap());

/// Which delimiter family a token was extracted from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenKind {
    Variable,
    Expression,
}

/// A top-level delimited span found in a string value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExpressionToken<'a> {
    pub kind: TokenKind,
    /// The full match, delimiters included.
    pub content: &'a str,
    /// The text between the delimiters.
    pub inner: &'a str,
    pub start: usize,
    pub end: usize,
}

/// Opening/closing delimiter counts for one string.
///
/// Deltas are `opens - closes` and are not clamped: a negative value means
/// more closing than opening markers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DelimiterReport {
    pub valid: bool,
    pub unclosed_variables: isize,
    pub unclosed_expressions: isize,
}

/// Returns `true` if either opening marker occurs anywhere in `value`,
/// matched or not.
pub fn has_expressions(value: &str) -> bool {
    value.contains(VARIABLE_OPEN) || value.contains(EXPRESSION_OPEN)
}

/// Counts each marker independently of any block matching.
pub fn validate_delimiters(value: &str) -> DelimiterReport {
    let count = |marker: &str| value.matches(marker).count() as isize;

    let unclosed_variables = count(VARIABLE_OPEN) - count(VARIABLE_CLOSE);
    let unclosed_expressions = count(EXPRESSION_OPEN) - count(EXPRESSION_CLOSE);

    DelimiterReport {
        valid: unclosed_variables == 0 && unclosed_expressions == 0,
        unclosed_variables,
        unclosed_expressions,
    }
}

/// Extracts every top-level token from `value`, ordered by start offset.
///
/// `{{ }}` references lying entirely inside a `{% %}` block belong to that
/// block and are not reported separately.
pub fn extract_expressions(value: &str) -> Vec<ExpressionToken<'_>> {
    let mut tokens: Vec<ExpressionToken<'_>> = code_block_spans(value)
        .into_iter()
        .map(|(start, end)| ExpressionToken {
            kind: TokenKind::Expression,
            content: &value[start..end],
            inner: &value[start + EXPRESSION_OPEN.len()..end - EXPRESSION_CLOSE.len()],
            start,
            end,
        })
        .collect();

    let blocks: Vec<(usize, usize)> = tokens.iter().map(|t| (t.start, t.end)).collect();

    for caps in VARIABLE_RE.captures_iter(value) {
        let (Some(full), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let owned = blocks
            .iter()
            .any(|&(start, end)| full.start() >= start && full.end() <= end);
        if !owned {
            tokens.push(ExpressionToken {
                kind: TokenKind::Variable,
                content: full.as_str(),
                inner: inner.as_str(),
                start: full.start(),
                end: full.end(),
            });
        }
    }

    tokens.sort_by_key(|t| t.start);
    tokens
}

/// Left-to-right, non-greedy matching of `{% ... %}` blocks.
///
/// A block ends at the first full `%}` after its opener, so a lone `%`
/// inside the block is ordinary text.
fn code_block_spans(value: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut from = 0;

    while let Some(offset) = value[from..].find(EXPRESSION_OPEN) {
        let start = from + offset;
        let body = start + EXPRESSION_OPEN.len();
        let Some(close) = value[body..].find(EXPRESSION_CLOSE) else {
            // Any later opener would search a suffix of the same text.
            break;
        };
        let end = body + close + EXPRESSION_CLOSE.len();
        spans.push((start, end));
        from = end;
    }

    spans
}
