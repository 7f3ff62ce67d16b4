//! Naming and metadata conventions.
//!
//! Document-level checks read fields directly; `set` and `emit` checks walk
//! the instruction tree. All findings are collected, none is fatal.

use crate::error::{LintError, NamingErrorType};
use crate::tokenizer::has_expressions;
use crate::traverse::visit_instructions;
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

// ─── Cached regexes ─────────────────────────────────────────────────────────

static CAMEL_CASE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-zA-Z0-9]*$").unwrap());

static PASCAL_CASE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][a-zA-Z0-9]*$").unwrap());

static EVENT_HANDLER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^on[A-Z]").unwrap());

static SCOPED_VARIABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(user|session|global|run|socket)\.").unwrap());

/// Prefixes accepted at the start of an automation name's last segment.
/// Matched case-insensitively as plain prefixes, so `settings` passes on
/// `set`.
pub static VERB_PREFIXES: &[&str] = &[
    "get", "set", "create", "update", "delete", "remove", "add", "fetch", "load", "save", "send",
    "receive", "process", "handle", "validate", "check", "verify", "build", "generate", "parse",
    "format", "convert", "transform", "map", "filter", "find", "search", "query", "list", "init",
    "initialize", "reset", "clear", "refresh", "sync", "import", "export", "upload", "download",
    "read", "write", "open", "close", "start", "stop", "run", "execute", "trigger", "emit",
    "dispatch", "subscribe", "unsubscribe", "register", "unregister", "connect", "disconnect",
    "authenticate", "authorize", "login", "logout", "enable", "disable", "activate", "deactivate",
    "show", "hide", "render", "display", "compute", "calculate", "count", "sum", "merge", "split",
    "combine", "extract", "insert", "append", "prepend", "push", "pop", "shift", "unshift", "sort",
    "reverse", "notify", "alert", "warn", "log", "track", "record", "measure", "test", "mock",
    "stub", "spy", "assert", "expect", "should", "can", "is", "has", "does", "will", "would",
    "could", "may",
];

pub fn is_camel_case(s: &str) -> bool {
    CAMEL_CASE_RE.is_match(s)
}

fn starts_with_verb(s: &str) -> bool {
    let lower = s.to_lowercase();
    VERB_PREFIXES.iter().any(|verb| lower.starts_with(verb))
}

/// `Namespace.entity[.action...]`: PascalCase namespace, camelCase rest, at
/// least two segments.
pub fn is_valid_event_name(event: &str) -> bool {
    let mut parts = event.split('.');
    let Some(namespace) = parts.next() else {
        return false;
    };
    let rest: Vec<&str> = parts.collect();
    !rest.is_empty()
        && PASCAL_CASE_RE.is_match(namespace)
        && rest.iter().all(|part| CAMEL_CASE_RE.is_match(part))
}

/// Run every naming check against `automation`. Non-object documents yield
/// no findings; structural problems are reported by the schema phases.
pub fn validate_naming(automation: &Value) -> Vec<LintError> {
    let Value::Object(doc) = automation else {
        return Vec::new();
    };

    let mut errors = Vec::new();
    check_name(doc, &mut errors);
    check_slug(doc, &mut errors);
    check_description(doc, &mut errors);
    check_arguments(doc, &mut errors);
    check_variable_names(automation, &mut errors);
    check_event_names(automation, &mut errors);
    errors
}

// ─── Document fields ────────────────────────────────────────────────────────

fn check_name(doc: &Map<String, Value>, errors: &mut Vec<LintError>) {
    match doc.get("name") {
        Some(Value::String(name)) if !name.is_empty() => check_name_string(name, "/name", errors),
        Some(Value::Object(localized)) => {
            for (locale, name) in localized {
                if let Value::String(name) = name {
                    check_name_string(name, &format!("/name/{}", locale), errors);
                }
            }
        }
        _ => {}
    }
}

fn check_name_string(name: &str, path: &str, errors: &mut Vec<LintError>) {
    for segment in name.split('/').filter(|s| !s.is_empty()) {
        if !is_camel_case(segment) {
            errors.push(LintError::naming(
                path,
                NamingErrorType::InvalidNameFormat,
                format!("Name segment '{}' should be camelCase", segment),
                Some(name),
            ));
        }
    }

    // A trailing slash leaves an empty last segment, which is not checked.
    let last = name.rsplit('/').next().unwrap_or_default();
    if !last.is_empty() && !starts_with_verb(last) && !EVENT_HANDLER_RE.is_match(last) {
        errors.push(LintError::naming(
            path,
            NamingErrorType::InvalidNameFormat,
            format!(
                "Automation name should end with a verb (e.g., 'getData') or event handler pattern (e.g., 'onSubmit'). Found: '{}'",
                last
            ),
            Some(name),
        ));
    }
}

fn check_slug(doc: &Map<String, Value>, errors: &mut Vec<LintError>) {
    let Some(Value::String(slug)) = doc.get("slug") else {
        return;
    };
    if slug.is_empty() {
        return;
    }

    if slug.contains('/') {
        errors.push(LintError::naming(
            "/slug",
            NamingErrorType::InvalidSlugFormat,
            format!(
                "Slug should not contain '/' - use name for folder scoping. Found: '{}'",
                slug
            ),
            Some(slug),
        ));
    } else if !is_camel_case(slug) {
        errors.push(LintError::naming(
            "/slug",
            NamingErrorType::InvalidSlugFormat,
            format!("Slug '{}' should be camelCase", slug),
            Some(slug),
        ));
    }
}

/// Absent, null, `false`, zero and the empty string all count as missing.
fn is_blank_value(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(_) => false,
    }
}

fn check_description(doc: &Map<String, Value>, errors: &mut Vec<LintError>) {
    let description = doc.get("description");
    if is_blank_value(description) {
        errors.push(LintError::naming(
            "/description",
            NamingErrorType::MissingDescription,
            "Automation should have a description".to_string(),
            None,
        ));
        return;
    }

    let has_content = match description {
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(Value::Object(localized)) => localized.values().any(non_blank_string),
        Some(Value::Array(items)) => items.iter().any(non_blank_string),
        _ => true,
    };
    if !has_content {
        errors.push(LintError::naming(
            "/description",
            NamingErrorType::MissingDescription,
            "Automation should have a non-empty description".to_string(),
            None,
        ));
    }
}

fn non_blank_string(value: &Value) -> bool {
    value.as_str().is_some_and(|s| !s.trim().is_empty())
}

fn check_arguments(doc: &Map<String, Value>, errors: &mut Vec<LintError>) {
    let arguments = doc.get("arguments");
    if is_blank_value(arguments) {
        errors.push(LintError::naming(
            "/arguments",
            NamingErrorType::MissingArguments,
            "Automation should define its arguments schema".to_string(),
            None,
        ));
        return;
    }

    // An array passes here. The baseline schema rejects it before naming runs.
    if !matches!(arguments, Some(Value::Object(_) | Value::Array(_))) {
        errors.push(LintError::naming(
            "/arguments",
            NamingErrorType::MissingArguments,
            "Arguments should be an object defining the schema".to_string(),
            None,
        ));
    }
}

// ─── Instructions ───────────────────────────────────────────────────────────

fn check_variable_names(automation: &Value, errors: &mut Vec<LintError>) {
    visit_instructions(automation, &mut |instruction, path| {
        let Some(Value::Object(set)) = instruction.get("set") else {
            return;
        };
        let path = format!("{}.set", path);

        for key in set.keys() {
            check_variable_name(key, &path, errors);
        }
    });
}

fn check_variable_name(name: &str, path: &str, errors: &mut Vec<LintError>) {
    if SCOPED_VARIABLE_RE.is_match(name) {
        for part in name.split('.').skip(1) {
            if part.contains('[') || part.contains('{') {
                continue;
            }
            if !is_camel_case(part) {
                errors.push(LintError::naming(
                    path,
                    NamingErrorType::InvalidVariableName,
                    format!("Variable name '{}' in '{}' should be camelCase", part, name),
                    Some(name),
                ));
            }
        }
        return;
    }

    // Unscoped dotted or indexed names address into an existing variable.
    if name.contains('.') || name.contains('[') {
        return;
    }
    if !is_camel_case(name) {
        errors.push(LintError::naming(
            path,
            NamingErrorType::InvalidVariableName,
            format!("Variable name '{}' should be camelCase", name),
            Some(name),
        ));
    }
}

fn check_event_names(automation: &Value, errors: &mut Vec<LintError>) {
    visit_instructions(automation, &mut |instruction, path| {
        let Some(Value::Object(emit)) = instruction.get("emit") else {
            return;
        };
        let Some(Value::String(event)) = emit.get("event") else {
            return;
        };
        if has_expressions(event) {
            return;
        }

        if !is_valid_event_name(event) {
            errors.push(LintError::naming(
                &format!("{}.emit.event", path),
                NamingErrorType::InvalidEventName,
                format!(
                    "Event name '{}' should follow format 'Namespace.entity.action' (e.g., 'Workspace.automations.updated')",
                    event
                ),
                Some(event),
            ));
        }
    });
}
