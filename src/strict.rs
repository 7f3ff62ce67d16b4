//! Strict mode: per-instruction schema validation that rejects undeclared
//! arguments.

use crate::catalogue::{builtin_catalogue, enhance_for_strict, wrap_conditions};
use crate::error::{LintError, SchemaError};
use crate::schema::SchemaValidator;
use crate::traverse::visit_instructions;
use crate::types::{Instruction, InstructionKind};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::LazyLock;

static BUILTIN: LazyLock<StrictValidator> =
    LazyLock::new(|| StrictValidator::from_catalogue(builtin_catalogue()));

/// Compiled instruction validators, keyed by kind.
///
/// Kinds whose schema fails to compile are left out and from then on treated
/// like externally-defined instructions.
#[derive(Debug)]
pub struct StrictValidator {
    validators: BTreeMap<InstructionKind, SchemaValidator>,
}

impl StrictValidator {
    /// The validator built from the built-in catalogue, compiled on first use.
    pub fn builtin() -> &'static StrictValidator {
        &BUILTIN
    }

    /// Compile a catalogue of `(kind, schema)` entries.
    ///
    /// `conditions` entries describe the branch map and are wrapped; every
    /// other entry is enhanced with [`enhance_for_strict`] first.
    pub fn from_catalogue(catalogue: impl IntoIterator<Item = (InstructionKind, Value)>) -> Self {
        let mut validators = BTreeMap::new();
        for (kind, schema) in catalogue {
            match compile(kind, schema) {
                Ok(validator) => {
                    validators.insert(kind, validator);
                }
                Err(error) => {
                    tracing::warn!(
                        kind = %kind,
                        error = %error,
                        "instruction schema failed to compile; instructions of this kind will not be checked"
                    );
                }
            }
        }
        StrictValidator { validators }
    }

    pub fn knows(&self, kind: InstructionKind) -> bool {
        self.validators.contains_key(&kind)
    }

    /// Kinds with a compiled validator, in declaration order.
    pub fn known_kinds(&self) -> impl Iterator<Item = InstructionKind> + '_ {
        self.validators.keys().copied()
    }

    /// Validate every instruction reachable from `automation.do`.
    pub fn validate(&self, automation: &Value) -> Vec<LintError> {
        let mut errors = Vec::new();
        visit_instructions(automation, &mut |instruction, path| {
            errors.extend(self.validate_instruction(instruction, path));
        });
        errors
    }

    /// Validate a single instruction found at `path`.
    ///
    /// The instruction is checked as its first key that has a compiled
    /// validator. Kinds left out of this validator count as unrecognized keys,
    /// so an instruction with none of the known keys yields nothing.
    pub fn validate_instruction(
        &self,
        instruction: &Map<String, Value>,
        path: &str,
    ) -> Vec<LintError> {
        let Instruction::Builtin { kind, args } =
            Instruction::classify_among(instruction, |kind| self.knows(kind))
        else {
            return Vec::new();
        };
        let Some(validator) = self.validators.get(&kind) else {
            return Vec::new();
        };

        let mut wrapped = Map::new();
        wrapped.insert(kind.key().to_string(), args.clone());
        validator.validate(&Value::Object(wrapped), path)
    }
}

fn compile(kind: InstructionKind, schema: Value) -> Result<SchemaValidator, SchemaError> {
    let schema = match kind {
        InstructionKind::Conditions => wrap_conditions(schema),
        _ => enhance_for_strict(kind, &schema),
    };
    SchemaValidator::compile(kind.key(), schema)
}

/// Strict-mode findings for `automation` against the built-in catalogue.
pub fn validate_strict(automation: &Value) -> Vec<LintError> {
    StrictValidator::builtin().validate(automation)
}
