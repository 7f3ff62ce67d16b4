//! Adapter over the JSON Schema engine: compile once, validate many times,
//! and translate engine errors into structural [`LintError`]s.

use crate::error::{LintError, SchemaError};
use jsonschema::error::ValidationErrorKind;
use serde_json::{Map, Value};

/// A compiled schema together with its source, kept so that error details
/// (expected type, allowed values) can be read back from the schema.
pub struct SchemaValidator {
    schema: Value,
    validator: jsonschema::Validator,
}

impl std::fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaValidator")
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

impl SchemaValidator {
    /// Compile `schema`; `name` only labels the error on failure.
    pub fn compile(name: &str, schema: Value) -> Result<Self, SchemaError> {
        let validator = jsonschema::validator_for(&schema).map_err(|e| SchemaError {
            schema: name.to_string(),
            message: e.to_string(),
        })?;
        Ok(SchemaValidator { schema, validator })
    }

    pub fn schema(&self) -> &Value {
        &self.schema
    }

    pub fn is_valid(&self, instance: &Value) -> bool {
        self.validator.is_valid(instance)
    }

    /// Validate `instance`, returning every violation with its path prefixed
    /// by `path_prefix`.
    pub fn validate(&self, instance: &Value, path_prefix: &str) -> Vec<LintError> {
        let mut errors = Vec::new();
        for error in self.validator.iter_errors(instance) {
            let path = format!("{}{}", path_prefix, error.instance_path);
            let schema_pointer = error.schema_path.to_string();
            let keyword = keyword_of(&schema_pointer).to_string();
            let schema_path = format!("#{}", schema_pointer);

            match &error.kind {
                ValidationErrorKind::Required { property } => {
                    let property = property.as_str().map_or_else(|| property.to_string(), str::to_string);
                    let mut details = Map::new();
                    details.insert("missingProperty".to_string(), Value::String(property.clone()));
                    errors.push(LintError::structural(
                        path,
                        schema_path,
                        &keyword,
                        details,
                        format!("must have required property '{}'", property),
                    ));
                }
                ValidationErrorKind::AdditionalProperties { unexpected } => {
                    for property in unexpected {
                        let mut details = Map::new();
                        details.insert(
                            "additionalProperty".to_string(),
                            Value::String(property.clone()),
                        );
                        errors.push(LintError::structural(
                            path.clone(),
                            schema_path.clone(),
                            &keyword,
                            details,
                            format!(
                                "must NOT have additional properties ('{}' was unexpected)",
                                property
                            ),
                        ));
                    }
                }
                _ => {
                    let details = self.keyword_details(&keyword, &schema_pointer);
                    errors.push(LintError::structural(
                        path,
                        schema_path,
                        &keyword,
                        details,
                        error.to_string(),
                    ));
                }
            }
        }
        errors
    }

    fn keyword_details(&self, keyword: &str, schema_pointer: &str) -> Map<String, Value> {
        let mut details = Map::new();
        let Some(constraint) = self.schema.pointer(schema_pointer) else {
            return details;
        };
        match keyword {
            "type" => {
                details.insert("type".to_string(), constraint.clone());
            }
            "enum" => {
                details.insert("allowedValues".to_string(), constraint.clone());
            }
            "maxProperties" | "minProperties" | "maxItems" | "minItems" => {
                details.insert("limit".to_string(), constraint.clone());
            }
            _ => {}
        }
        details
    }
}

/// The schema keyword a violation belongs to: the last non-index segment of
/// its schema location.
fn keyword_of(schema_pointer: &str) -> &str {
    schema_pointer
        .rsplit('/')
        .find(|segment| !segment.is_empty() && !segment.bytes().all(|b| b.is_ascii_digit()))
        .unwrap_or("schema")
}
