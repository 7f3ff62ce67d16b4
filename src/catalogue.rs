//! Static schema catalogue: the permissive automation schema used by the
//! baseline check, and one schema per built-in instruction kind.
//!
//! Instruction schemas follow one pattern: a top-level object requiring the
//! instruction key, with `maxProperties: 1`, whose single property describes
//! the instruction's arguments. `conditions` is the exception; its catalogue
//! entry describes the branch map itself.

use crate::types::InstructionKind;
use serde_json::{Value, json};

/// Permissive document schema: requires `name` and `do`, accepts anything
/// else. Detailed instruction checks are left to strict mode.
pub fn automation_schema() -> Value {
    json!({
        "type": "object",
        "required": ["name", "do"],
        "properties": {
            "name": {
                "oneOf": [
                    { "type": "string" },
                    { "type": "object", "additionalProperties": { "type": "string" } }
                ]
            },
            "slug": { "type": "string" },
            "description": {
                "oneOf": [
                    { "type": "string" },
                    { "type": "object", "additionalProperties": { "type": "string" } }
                ]
            },
            "do": {
                "type": "array",
                "items": { "type": "object", "minProperties": 1 }
            },
            "when": { "type": "object" },
            "arguments": { "type": "object" },
            "output": {},
            "private": { "type": "boolean" },
            "disabled": { "type": "boolean" },
            "validateArguments": { "type": "boolean" }
        },
        "additionalProperties": true
    })
}

fn instruction(kind: InstructionKind, arguments: Value) -> Value {
    json!({
        "type": "object",
        "required": [kind.key()],
        "maxProperties": 1,
        "properties": { kind.key(): arguments }
    })
}

/// Catalogue entry for `kind`, before any strict-mode enhancement.
pub fn instruction_schema(kind: InstructionKind) -> Value {
    match kind {
        InstructionKind::Emit => instruction(
            kind,
            json!({
                "type": "object",
                "required": ["event"],
                "properties": {
                    "event": { "type": "string" },
                    "payload": {},
                    "target": {
                        "type": "object",
                        "properties": {
                            "userTopic": { "type": "string" },
                            "userId": { "type": "string" },
                            "sessionId": { "type": "string" },
                            "currentSocket": { "type": "boolean" }
                        }
                    },
                    "private": { "type": "boolean" },
                    "autocomplete": { "type": "object" },
                    "options": {
                        "type": "object",
                        "properties": {
                            "persist": { "type": "boolean" },
                            "aggPayload": { "type": "boolean" }
                        }
                    }
                }
            }),
        ),
        InstructionKind::Wait => instruction(
            kind,
            json!({
                "type": "object",
                "properties": {
                    "oneOf": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "required": ["event"],
                            "properties": {
                                "event": { "type": "string" },
                                "filters": { "type": "object" }
                            }
                        }
                    },
                    "timeout": { "type": ["number", "string"] },
                    "output": { "type": "string" }
                }
            }),
        ),
        InstructionKind::Set => instruction(
            kind,
            json!({
                "type": "object",
                "required": ["name"],
                "properties": {
                    "name": { "type": "string" },
                    "value": {},
                    "type": { "type": "string", "enum": ["replace", "merge", "push"] },
                    "lifespan": { "type": ["number", "string"] }
                }
            }),
        ),
        InstructionKind::Delete => instruction(
            kind,
            json!({
                "type": "object",
                "required": ["name"],
                "properties": {
                    "name": { "type": "string" }
                }
            }),
        ),
        InstructionKind::Conditions => json!({
            "type": "object",
            "properties": {
                "default": { "type": "array", "items": { "type": "object" } }
            },
            "additionalProperties": { "type": "array", "items": { "type": "object" } }
        }),
        InstructionKind::Repeat => instruction(
            kind,
            json!({
                "type": "object",
                "required": ["do"],
                "properties": {
                    "on": { "type": ["string", "array"] },
                    "until": { "type": ["number", "string"] },
                    "do": { "type": "array", "items": { "type": "object" } },
                    "batch": {
                        "type": "object",
                        "properties": {
                            "size": { "type": "number" },
                            "interval": { "type": "number" }
                        }
                    }
                }
            }),
        ),
        InstructionKind::All => instruction(
            kind,
            json!({ "type": "array", "items": { "type": "object" } }),
        ),
        InstructionKind::Break => instruction(
            kind,
            json!({
                "type": ["object", "null"],
                "properties": {
                    "scope": { "type": "string", "enum": ["all", "automation", "repeat"] },
                    "payload": {}
                }
            }),
        ),
        InstructionKind::Fetch => instruction(
            kind,
            json!({
                "type": "object",
                "required": ["url"],
                "properties": {
                    "url": { "type": "string" },
                    "method": {
                        "type": "string",
                        "enum": [
                            "get", "post", "put", "patch", "delete",
                            "GET", "POST", "PUT", "PATCH", "DELETE"
                        ]
                    },
                    "headers": { "type": ["object", "string"] },
                    "query": { "type": ["object", "string"] },
                    "body": {},
                    "multipart": {
                        "type": ["array", "string"],
                        "items": {
                            "type": "object",
                            "required": ["fieldname", "value"],
                            "properties": {
                                "fieldname": { "type": "string" },
                                "value": {},
                                "filename": { "type": "string" },
                                "contentType": { "type": "string" }
                            }
                        }
                    },
                    "emitErrors": { "type": "boolean" },
                    "output": { "type": "string" },
                    "outputMode": {
                        "type": "string",
                        "enum": ["body", "detailed_response", "data_url", "base64"]
                    },
                    "stream": {
                        "type": "object",
                        "properties": {
                            "event": { "type": "string" },
                            "concatenate": { "type": ["boolean", "object"] },
                            "target": { "type": "object" },
                            "payload": { "type": "object" },
                            "endChunk": {}
                        }
                    },
                    "prismeaiApiKey": {
                        "type": "object",
                        "properties": {
                            "name": { "type": "string" }
                        }
                    }
                }
            }),
        ),
        InstructionKind::Comment => instruction(kind, json!({ "type": "string" })),
        InstructionKind::RateLimit => instruction(
            kind,
            json!({
                "type": "object",
                "required": ["name"],
                "properties": {
                    "name": { "type": "string" },
                    "window": { "type": ["number", "string"] },
                    "limit": { "type": ["number", "string"] },
                    "consumer": { "type": "string" },
                    "output": { "type": "string" }
                }
            }),
        ),
        InstructionKind::Try => instruction(
            kind,
            json!({
                "type": "object",
                "required": ["do"],
                "properties": {
                    "do": { "type": "array" },
                    "catch": { "type": "array" },
                    "finally": { "type": "array" }
                },
                "additionalProperties": false
            }),
        ),
        InstructionKind::CreateUserTopic | InstructionKind::JoinUserTopic => instruction(
            kind,
            json!({
                "type": "object",
                "properties": {
                    "topic": { "type": "string" },
                    "userTopic": { "type": "string" },
                    "userIds": { "type": "array", "items": { "type": "string" } }
                },
                "additionalProperties": false
            }),
        ),
        InstructionKind::Auth => instruction(
            kind,
            json!({
                "type": "object",
                "properties": {
                    "workspace": { "type": "boolean" },
                    "service": { "type": "string" },
                    "with": { "type": "object", "additionalProperties": true },
                    "output": { "type": "string" }
                },
                "additionalProperties": false
            }),
        ),
    }
}

/// The full built-in catalogue, one entry per [`InstructionKind`].
pub fn builtin_catalogue() -> Vec<(InstructionKind, Value)> {
    InstructionKind::ALL
        .into_iter()
        .map(|kind| (kind, instruction_schema(kind)))
        .collect()
}

/// Returns a copy of `schema` whose argument definition for `kind` rejects
/// undeclared properties.
///
/// Definitions that already state an `additionalProperties` policy are left
/// alone. For `oneOf`/`anyOf` definitions the policy is added to each branch
/// that lacks one instead. The input is never modified.
pub fn enhance_for_strict(kind: InstructionKind, schema: &Value) -> Value {
    let mut enhanced = schema.clone();
    if let Some(definition) = enhanced
        .get_mut("properties")
        .and_then(|properties| properties.get_mut(kind.key()))
    {
        deny_additional_properties(definition);
    }
    enhanced
}

fn deny_additional_properties(definition: &mut Value) {
    let Some(definition) = definition.as_object_mut() else {
        return;
    };
    if definition.contains_key("additionalProperties") {
        return;
    }

    for combinator in ["oneOf", "anyOf"] {
        if let Some(Value::Array(branches)) = definition.get_mut(combinator) {
            for branch in branches.iter_mut().filter_map(Value::as_object_mut) {
                branch
                    .entry("additionalProperties")
                    .or_insert(Value::Bool(false));
            }
            return;
        }
    }

    definition.insert("additionalProperties".to_string(), Value::Bool(false));
}

/// Wraps the `conditions` branch-map schema so it can validate
/// `{"conditions": <map>}` like every other instruction.
pub fn wrap_conditions(schema: Value) -> Value {
    instruction(InstructionKind::Conditions, schema)
}
