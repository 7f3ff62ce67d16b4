//! Process-wide whitelist of expression functions and host-language keywords.
//!
//! Both sets are built once on first use and never mutated afterwards, so
//! lookups are safe from any thread without locking.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Callable names accepted inside `{% %}` blocks.
///
/// Anything called in an expression that is not listed here is reported as
/// `unknownFunction`.
pub static KNOWN_FUNCTIONS: &[&str] = &[
    // Date
    "date",
    // UUID
    "uuid",
    // Math
    "rand",
    "round",
    "ceil",
    "floor",
    "abs",
    "min",
    "max",
    // String
    "lower",
    "upper",
    "truncate",
    "split",
    "join",
    "replace",
    "sanitize",
    "trim",
    "startsWith",
    "endsWith",
    "includes",
    "indexOf",
    "slice",
    "substring",
    "padStart",
    "padEnd",
    "repeat",
    "match",
    // JSON
    "json",
    "unsafejson",
    // Object
    "deepmerge",
    "keys",
    "values",
    "entries",
    "fromEntries",
    "assign",
    // URL
    "URLSearchParams",
    "URL",
    "encodeURIComponent",
    "decodeURIComponent",
    "encodeURI",
    "decodeURI",
    // Type checking
    "isArray",
    "isObject",
    "isString",
    "isNumber",
    "isBoolean",
    "isNull",
    "isUndefined",
    "typeof",
    // Pattern matching
    "regex",
    "jsonmatch",
    // Array
    "filter",
    "map",
    "reduce",
    "find",
    "findIndex",
    "some",
    "every",
    "flat",
    "flatMap",
    "sort",
    "reverse",
    "concat",
    "length",
    // Conversion
    "Number",
    "String",
    "Boolean",
    "parseInt",
    "parseFloat",
    // Global constructors
    "Array",
    "Object",
    "JSON",
];

/// Literals and reserved words that may legitimately appear bare in an
/// expression and must never be mistaken for a raw variable.
pub static JS_KEYWORDS: &[&str] = &[
    // Literals
    "true",
    "false",
    "null",
    "undefined",
    "NaN",
    "Infinity",
    // Operators and reserved words
    "this",
    "new",
    "typeof",
    "instanceof",
    "in",
    "of",
    "void",
    "delete",
    // Control flow
    "if",
    "else",
    "return",
];

static FUNCTION_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| KNOWN_FUNCTIONS.iter().copied().collect());

static KEYWORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| JS_KEYWORDS.iter().copied().collect());

/// Returns `true` if `name` is a whitelisted expression function.
pub fn is_known_function(name: &str) -> bool {
    FUNCTION_SET.contains(name)
}

/// Returns `true` if `name` is a host-language literal or reserved word.
pub fn is_js_keyword(name: &str) -> bool {
    KEYWORD_SET.contains(name)
}
