//! Static linter for declarative automation documents.
//!
//! An automation is a YAML/JSON document whose `do` list holds instructions
//! (`set`, `emit`, `fetch`, `conditions`, `repeat`, ...) and whose string
//! values may embed `{{variable}}` references and `{% expression %}` blocks.
//! This crate checks such documents before they are stored or run:
//!
//! ```text
//! parse(source) → serde_json::Value → lint(value, options) → LintResult → report
//! ```
//!
//! Phases run in order and stop at the first one with findings: the
//! baseline schema, strict per-instruction schemas (opt-in), expression
//! checks (default on) and naming conventions (opt-in).
//!
//! # Quick Start
//!
//! ```rust
//! use automation_lint::{LintOptions, lint_str};
//!
//! let yaml = r#"
//! name: weather/getForecast
//! do:
//!   - set:
//!       name: city
//!       value: "{{args.city}}"
//!   - fetch:
//!       url: "https://api.example.com/forecast"
//!       query:
//!         city: "{% {{city}} %}"
//! "#;
//!
//! let result = lint_str(yaml, &LintOptions::default()).expect("valid YAML");
//! assert!(result.valid);
//! ```
//!
//! # Feature Flags
//!
//! | Feature     | Default | Description |
//! |-------------|---------|-------------|
//! | `js-syntax` | yes     | Syntax-checks expression blocks with the [`boa_engine`] parser. Without it the `invalidSyntax` check is skipped. |

pub mod analyzer;
pub mod catalogue;
pub mod error;
pub mod expressions;
pub mod lint;
pub mod naming;
pub mod parse;
pub mod registry;
pub mod report;
pub mod schema;
pub mod strict;
pub mod tokenizer;
pub mod traverse;
pub mod types;

pub use error::*;
pub use types::*;

// Re-export entry-point functions at the crate root for convenience.
pub use expressions::validate_expressions;
pub use lint::lint;
pub use naming::validate_naming;
pub use parse::parse;
pub use strict::validate_strict;

/// Convenience entry point composing parse → lint.
///
/// # Errors
///
/// Returns the [`ParseError`] when `input` is not a single YAML document.
/// Lint findings are never errors; they are reported in the [`LintResult`].
///
/// # Example
///
/// ```rust
/// use automation_lint::{LintOptions, lint_str};
///
/// let result = lint_str("name: runJob\ndo: []\n", &LintOptions::default()).unwrap();
/// assert!(result.valid);
///
/// let result = lint_str("do: []\n", &LintOptions::default()).unwrap();
/// assert_eq!(result.errors[0].subtype(), "required");
/// ```
pub fn lint_str(input: &str, options: &LintOptions) -> Result<LintResult, ParseError> {
    let automation = parse::parse(input)?;
    Ok(lint::lint(&automation, options))
}
