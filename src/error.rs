use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Validator family that produced a [`LintError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LintErrorKind {
    Structural,
    Expression,
    Naming,
}

impl LintErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LintErrorKind::Structural => "structural",
            LintErrorKind::Expression => "expression",
            LintErrorKind::Naming => "naming",
        }
    }
}

impl fmt::Display for LintErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Violations found inside templated string values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExpressionErrorType {
    UnclosedVariable,
    UnclosedExpression,
    UnknownFunction,
    MissingBrackets,
    InvalidSyntax,
}

impl ExpressionErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpressionErrorType::UnclosedVariable => "unclosedVariable",
            ExpressionErrorType::UnclosedExpression => "unclosedExpression",
            ExpressionErrorType::UnknownFunction => "unknownFunction",
            ExpressionErrorType::MissingBrackets => "missingBrackets",
            ExpressionErrorType::InvalidSyntax => "invalidSyntax",
        }
    }
}

/// Violations of the naming and metadata conventions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NamingErrorType {
    InvalidNameFormat,
    InvalidSlugFormat,
    MissingDescription,
    MissingArguments,
    InvalidVariableName,
    InvalidEventName,
}

impl NamingErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NamingErrorType::InvalidNameFormat => "invalidNameFormat",
            NamingErrorType::InvalidSlugFormat => "invalidSlugFormat",
            NamingErrorType::MissingDescription => "missingDescription",
            NamingErrorType::MissingArguments => "missingArguments",
            NamingErrorType::InvalidVariableName => "invalidVariableName",
            NamingErrorType::InvalidEventName => "invalidEventName",
        }
    }
}

/// Family-specific payload of a [`LintError`].
///
/// Serialized untagged, so the wire form is a flat object whose discriminator
/// key (`expressionType`, `namingType` or `keyword`) identifies the family.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorParams {
    Expression {
        #[serde(rename = "expressionType")]
        expression_type: ExpressionErrorType,
        value: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        function: Option<String>,
    },
    Naming {
        #[serde(rename = "namingType")]
        naming_type: NamingErrorType,
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<String>,
    },
    Structural {
        keyword: String,
        /// Keyword-specific data: `missingProperty`, `additionalProperty`,
        /// `type`, `allowedValues`.
        #[serde(flatten)]
        details: Map<String, Value>,
    },
}

/// A single lint finding. All three validator families emit this shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LintError {
    pub kind: LintErrorKind,
    /// Location of the offending value, e.g. `/do[0].repeat.do[1]/set`.
    /// Empty for the document root.
    pub path: String,
    #[serde(rename = "subSchemaPath")]
    pub schema_path: String,
    pub params: ErrorParams,
    pub message: String,
}

impl LintError {
    pub(crate) fn expression(
        path: &str,
        expression_type: ExpressionErrorType,
        message: String,
        value: &str,
        function: Option<&str>,
    ) -> Self {
        LintError {
            kind: LintErrorKind::Expression,
            path: path.to_string(),
            schema_path: format!("#/expression/{}", expression_type.as_str()),
            params: ErrorParams::Expression {
                expression_type,
                value: value.to_string(),
                function: function.map(str::to_string),
            },
            message,
        }
    }

    pub(crate) fn naming(
        path: &str,
        naming_type: NamingErrorType,
        message: String,
        value: Option<&str>,
    ) -> Self {
        LintError {
            kind: LintErrorKind::Naming,
            path: path.to_string(),
            schema_path: format!("#/naming/{}", naming_type.as_str()),
            params: ErrorParams::Naming {
                naming_type,
                value: value.map(str::to_string),
            },
            message,
        }
    }

    pub(crate) fn structural(
        path: String,
        schema_path: String,
        keyword: &str,
        details: Map<String, Value>,
        message: String,
    ) -> Self {
        LintError {
            kind: LintErrorKind::Structural,
            path,
            schema_path,
            params: ErrorParams::Structural {
                keyword: keyword.to_string(),
                details,
            },
            message,
        }
    }

    /// The violation subtype: the expression or naming error type, or the
    /// schema keyword for structural errors.
    pub fn subtype(&self) -> &str {
        match &self.params {
            ErrorParams::Expression {
                expression_type, ..
            } => expression_type.as_str(),
            ErrorParams::Naming { naming_type, .. } => naming_type.as_str(),
            ErrorParams::Structural { keyword, .. } => keyword,
        }
    }

    /// The offending raw value, when the finding carries one.
    pub fn value(&self) -> Option<&str> {
        match &self.params {
            ErrorParams::Expression { value, .. } => Some(value),
            ErrorParams::Naming { value, .. } => value.as_deref(),
            ErrorParams::Structural { .. } => None,
        }
    }

    /// Structural detail lookup, e.g. `detail("missingProperty")`.
    pub fn detail(&self, key: &str) -> Option<&Value> {
        match &self.params {
            ErrorParams::Structural { details, .. } => details.get(key),
            _ => None,
        }
    }
}

impl fmt::Display for LintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() {
            "(root)"
        } else {
            &self.path
        };
        write!(f, "[{}] {}: {}", self.kind, path, self.message)
    }
}

impl std::error::Error for LintError {}

/// Outcome of a lint run. `errors` is empty iff `valid` is true.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LintResult {
    pub valid: bool,
    pub errors: Vec<LintError>,
}

impl LintResult {
    pub fn from_errors(errors: Vec<LintError>) -> Self {
        LintResult {
            valid: errors.is_empty(),
            errors,
        }
    }

    pub fn passed() -> Self {
        Self::from_errors(Vec::new())
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Findings produced by one validator family.
    pub fn errors_of(&self, kind: LintErrorKind) -> impl Iterator<Item = &LintError> {
        self.errors.iter().filter(move |e| e.kind == kind)
    }
}

/// Error kind for source loading failures.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseErrorKind {
    Syntax,
    Empty,
    MultiDocument,
}

/// Produced by `parse` when the automation source cannot be read as YAML/JSON.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let (Some(line), Some(col)) = (self.line, self.column) {
            write!(f, "{}:{}: {}", line, col, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for ParseError {}

/// A schema that the validation engine refused to compile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchemaError {
    /// Instruction kind or schema name the failure belongs to.
    pub schema: String,
    pub message: String,
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "schema '{}' failed to compile: {}", self.schema, self.message)
    }
}

impl std::error::Error for SchemaError {}
