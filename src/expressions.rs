//! Expression validation: every string leaf of a document is checked for
//! delimiter balance, unknown functions, raw variables and host-language
//! syntax.

use crate::analyzer::{extract_function_calls, extract_identifiers};
use crate::error::{ExpressionErrorType, LintError};
use crate::registry::{is_js_keyword, is_known_function};
use crate::tokenizer::{TokenKind, extract_expressions, has_expressions, validate_delimiters};
use crate::traverse::visit_strings;
use regex::Regex;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Validate all expressions found anywhere in `automation`, including
/// non-instruction fields such as `output` and `arguments`.
///
/// Returns every finding; an empty list means the document is clean.
pub fn validate_expressions(automation: &Value) -> Vec<LintError> {
    let mut errors = Vec::new();
    visit_strings(automation, &mut |value, path| {
        validate_string(value, path, &mut errors);
    });
    errors
}

/// Validate one string value found at `path`.
pub fn validate_string(value: &str, path: &str, errors: &mut Vec<LintError>) {
    if value.is_empty() || !has_expressions(value) {
        return;
    }

    // Once delimiters are unbalanced, block boundaries are guesses; any
    // further finding would be noise.
    let delimiters = validate_delimiters(value);
    if !delimiters.valid {
        if delimiters.unclosed_variables > 0 {
            errors.push(LintError::expression(
                path,
                ExpressionErrorType::UnclosedVariable,
                "Unclosed variable reference: missing }}".to_string(),
                value,
                None,
            ));
        }
        if delimiters.unclosed_expressions > 0 {
            errors.push(LintError::expression(
                path,
                ExpressionErrorType::UnclosedExpression,
                "Unclosed expression block: missing %}".to_string(),
                value,
                None,
            ));
        }
        return;
    }

    for token in extract_expressions(value) {
        if token.kind != TokenKind::Expression {
            continue;
        }
        check_function_calls(token.inner, value, path, errors);
        check_raw_variables(token.inner, value, path, errors);
        check_syntax(token.inner, value, path, errors);
    }
}

fn check_function_calls(content: &str, value: &str, path: &str, errors: &mut Vec<LintError>) {
    for call in extract_function_calls(content) {
        if !is_known_function(call.name) {
            errors.push(LintError::expression(
                path,
                ExpressionErrorType::UnknownFunction,
                format!(
                    "Unknown function '{}' - not a recognized expression function",
                    call.name
                ),
                value,
                Some(call.name),
            ));
        }
    }
}

fn check_raw_variables(content: &str, value: &str, path: &str, errors: &mut Vec<LintError>) {
    let called: HashSet<&str> = extract_function_calls(content)
        .into_iter()
        .map(|call| call.name)
        .collect();

    for identifier in extract_identifiers(content) {
        let name = identifier.name;
        if is_known_function(name) || is_js_keyword(name) || called.contains(name) {
            continue;
        }
        errors.push(LintError::expression(
            path,
            ExpressionErrorType::MissingBrackets,
            format!(
                "Variable '{}' should be wrapped in {{{{}}}} inside expression block",
                name
            ),
            value,
            None,
        ));
    }
}

#[cfg(feature = "js-syntax")]
fn check_syntax(content: &str, value: &str, path: &str, errors: &mut Vec<LintError>) {
    if let Err(reason) = parse_host_expression(&crate::analyzer::to_javascript(content)) {
        errors.push(LintError::expression(
            path,
            ExpressionErrorType::InvalidSyntax,
            format!("Invalid JavaScript syntax in expression: {}", reason),
            value,
            None,
        ));
    }
}

#[cfg(not(feature = "js-syntax"))]
fn check_syntax(_content: &str, _value: &str, _path: &str, _errors: &mut Vec<LintError>) {}

// ─── Host syntax ────────────────────────────────────────────────────────────

/// Deepest nesting [`parse_host_expression`] hands to the parser. The parser
/// recurses once per level and a stack overflow cannot be caught, so deeper
/// input is reported as a syntax error without being parsed.
pub const MAX_NESTING_DEPTH: usize = 32;

/// Stack reserved for the parser thread.
#[cfg(feature = "js-syntax")]
const PARSER_STACK_SIZE: usize = 32 * 1024 * 1024;

static UNARY_KEYWORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(typeof|void|delete|new|await|yield)\b").unwrap());

/// Upper bound on the parser recursion `expression` needs: the deepest
/// bracket nesting plus every prefix operator, ternary, assignment and arrow.
/// Quoted string content is ignored.
pub fn nesting_depth(expression: &str) -> usize {
    let mut depth = 0usize;
    let mut max_depth = 0usize;
    let mut chained = UNARY_KEYWORD_RE.find_iter(expression).count();
    let mut quote: Option<u8> = None;
    let mut escaped = false;
    // Last significant byte outside a string; `None` at the start.
    let mut previous: Option<u8> = None;

    let bytes = expression.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == q {
                quote = None;
                previous = Some(b);
            }
            continue;
        }

        match b {
            b'"' | b'\'' | b'`' => quote = Some(b),
            b'(' | b'[' | b'{' => {
                depth += 1;
                max_depth = max_depth.max(depth);
            }
            b')' | b']' | b'}' => depth = depth.saturating_sub(1),
            b'!' | b'~' | b'+' | b'-' if expects_operand(previous) => chained += 1,
            b'?' => chained += 1,
            b'=' => {
                let prev = i.checked_sub(1).map(|j| bytes[j]);
                let next = bytes.get(i + 1).copied();
                let comparison = matches!(prev, Some(b'=' | b'!' | b'<' | b'>'))
                    || next == Some(b'=');
                if !comparison {
                    // Assignment or `=>`, both right-associative.
                    chained += 1;
                }
            }
            _ => {}
        }

        if !b.is_ascii_whitespace() {
            previous = Some(b);
        }
    }

    max_depth + chained
}

/// True when an operator character after `previous` starts an operand
/// rather than continuing a binary expression.
fn expects_operand(previous: Option<u8>) -> bool {
    match previous {
        None => true,
        Some(b) => b"([{,?:=!~+-*/%<>&|^".contains(&b),
    }
}

/// Parse `expression` as a parenthesized host-language expression without
/// evaluating it.
///
/// Input nested deeper than [`MAX_NESTING_DEPTH`] is rejected up front. The
/// parse itself runs on a dedicated thread with a large stack.
#[cfg(feature = "js-syntax")]
pub fn parse_host_expression(expression: &str) -> Result<(), String> {
    if nesting_depth(expression) > MAX_NESTING_DEPTH {
        return Err("expression nesting too deep".to_string());
    }

    let code = format!("({})", expression);
    std::thread::scope(|scope| {
        let spawned = std::thread::Builder::new()
            .name("expression-parser".to_string())
            .stack_size(PARSER_STACK_SIZE)
            .spawn_scoped(scope, || parse_script(&code));
        match spawned {
            Ok(handle) => handle
                .join()
                .unwrap_or_else(|_| Err("expression parser failed".to_string())),
            Err(error) => {
                tracing::warn!(error = %error, "parser thread unavailable, parsing inline");
                parse_script(&code)
            }
        }
    })
}

#[cfg(feature = "js-syntax")]
fn parse_script(code: &str) -> Result<(), String> {
    use boa_engine::ast::scope::Scope;
    use boa_engine::interner::Interner;
    use boa_engine::parser::{Parser, Source};

    let mut interner = Interner::default();
    let mut parser = Parser::new(Source::from_bytes(code));
    parser
        .parse_script(&Scope::new_global(), &mut interner)
        .map(|_| ())
        .map_err(|e| e.to_string())
}
