//! Lint orchestration: baseline schema, then strict mode, expressions and
//! naming, stopping at the first phase that reports anything.

use crate::catalogue::automation_schema;
use crate::error::{LintError, LintResult, SchemaError};
use crate::expressions::validate_expressions;
use crate::naming::validate_naming;
use crate::schema::SchemaValidator;
use crate::strict::validate_strict;
use crate::types::LintOptions;
use serde_json::{Map, Value};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::LazyLock;

static BASELINE: LazyLock<Result<SchemaValidator, SchemaError>> =
    LazyLock::new(|| SchemaValidator::compile("automation", automation_schema()));

/// Lint `automation` with `options`.
///
/// Never panics: any value is accepted, and an internal fault is reported as
/// a single structural error at the document root.
pub fn lint(automation: &Value, options: &LintOptions) -> LintResult {
    match catch_unwind(AssertUnwindSafe(|| run(automation, options))) {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!("lint aborted by an internal fault");
            invalid_input()
        }
    }
}

fn run(automation: &Value, options: &LintOptions) -> LintResult {
    let baseline = match &*BASELINE {
        Ok(validator) => validator,
        Err(error) => {
            tracing::warn!(error = %error, "baseline schema unavailable");
            return invalid_input();
        }
    };

    let errors = baseline.validate(automation, "");
    tracing::debug!(errors = errors.len(), "baseline phase");
    if !errors.is_empty() {
        return LintResult::from_errors(errors);
    }

    if options.strict {
        let errors = validate_strict(automation);
        tracing::debug!(errors = errors.len(), "strict phase");
        if !errors.is_empty() {
            return LintResult::from_errors(errors);
        }
    }

    if options.validate_expressions {
        let errors = validate_expressions(automation);
        tracing::debug!(errors = errors.len(), "expression phase");
        if !errors.is_empty() {
            return LintResult::from_errors(errors);
        }
    }

    if options.validate_naming {
        let errors = validate_naming(automation);
        tracing::debug!(errors = errors.len(), "naming phase");
        if !errors.is_empty() {
            return LintResult::from_errors(errors);
        }
    }

    LintResult::passed()
}

fn invalid_input() -> LintResult {
    let mut details = Map::new();
    details.insert("type".to_string(), Value::String("object".to_string()));
    LintResult::from_errors(vec![LintError::structural(
        String::new(),
        "#/type".to_string(),
        "type",
        details,
        "Invalid input: expected automation object".to_string(),
    )])
}
