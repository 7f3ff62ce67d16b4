//! Human-readable and compact renderings of a [`LintResult`] for tool layers.

use crate::error::{ErrorParams, LintResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Write;

/// Compact view of one finding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorSummary {
    pub path: String,
    /// Violation subtype, see [`crate::LintError::subtype`].
    pub keyword: String,
    pub message: String,
}

pub fn summarize(result: &LintResult) -> Vec<ErrorSummary> {
    result
        .errors
        .iter()
        .map(|e| ErrorSummary {
            path: e.path.clone(),
            keyword: e.subtype().to_string(),
            message: e.message.clone(),
        })
        .collect()
}

/// Multi-line report: a headline followed by one numbered line per finding.
///
/// ```text
/// Validation failed with 1 error(s):
/// 1. [structural] (root): must have required property 'do' ({"keyword":"required","missingProperty":"do"})
/// ```
pub fn format_errors(result: &LintResult) -> String {
    if result.errors.is_empty() {
        return "Validation passed: No errors found.".to_string();
    }

    let mut out = format!("Validation failed with {} error(s):", result.errors.len());
    for (i, error) in result.errors.iter().enumerate() {
        let _ = write!(out, "\n{}. {} ({})", i + 1, error, params_json(&error.params));
    }
    out
}

fn params_json(params: &ErrorParams) -> String {
    serde_json::to_value(params)
        .map(|v| Value::to_string(&v))
        .unwrap_or_default()
}
