use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

// ─── Instruction kinds ──────────────────────────────────────────────────────

/// Instruction kinds with a built-in schema.
///
/// Any other single key (`Collection.find`, app instructions, ...) is an
/// externally-defined action: it is still scanned for expressions but skipped
/// by structural checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InstructionKind {
    Emit,
    Wait,
    Set,
    Delete,
    Conditions,
    Repeat,
    All,
    Break,
    Fetch,
    Comment,
    RateLimit,
    Try,
    CreateUserTopic,
    JoinUserTopic,
    Auth,
}

impl InstructionKind {
    pub const ALL: [InstructionKind; 15] = [
        InstructionKind::Emit,
        InstructionKind::Wait,
        InstructionKind::Set,
        InstructionKind::Delete,
        InstructionKind::Conditions,
        InstructionKind::Repeat,
        InstructionKind::All,
        InstructionKind::Break,
        InstructionKind::Fetch,
        InstructionKind::Comment,
        InstructionKind::RateLimit,
        InstructionKind::Try,
        InstructionKind::CreateUserTopic,
        InstructionKind::JoinUserTopic,
        InstructionKind::Auth,
    ];

    /// The instruction's key as written in a document.
    pub fn key(&self) -> &'static str {
        match self {
            InstructionKind::Emit => "emit",
            InstructionKind::Wait => "wait",
            InstructionKind::Set => "set",
            InstructionKind::Delete => "delete",
            InstructionKind::Conditions => "conditions",
            InstructionKind::Repeat => "repeat",
            InstructionKind::All => "all",
            InstructionKind::Break => "break",
            InstructionKind::Fetch => "fetch",
            InstructionKind::Comment => "comment",
            InstructionKind::RateLimit => "rateLimit",
            InstructionKind::Try => "try",
            InstructionKind::CreateUserTopic => "createUserTopic",
            InstructionKind::JoinUserTopic => "joinUserTopic",
            InstructionKind::Auth => "auth",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }
}

impl fmt::Display for InstructionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One entry of an instruction list, classified by its key.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Instruction<'a> {
    Builtin {
        kind: InstructionKind,
        args: &'a Value,
    },
    /// Externally-defined action, or an entry with no recognizable key.
    Opaque { key: Option<&'a str> },
}

impl<'a> Instruction<'a> {
    /// Classifies an instruction mapping by the first key naming a built-in
    /// kind, falling back to [`Instruction::Opaque`].
    pub fn classify(instruction: &'a Map<String, Value>) -> Self {
        Self::classify_among(instruction, |_| true)
    }

    /// Like [`Instruction::classify`], but only kinds accepted by `known`
    /// count as built-in; any other key is skipped over.
    pub fn classify_among(
        instruction: &'a Map<String, Value>,
        known: impl Fn(InstructionKind) -> bool,
    ) -> Self {
        instruction
            .iter()
            .find_map(|(key, args)| {
                InstructionKind::from_key(key)
                    .filter(|kind| known(*kind))
                    .map(|kind| Instruction::Builtin { kind, args })
            })
            .unwrap_or_else(|| Instruction::Opaque {
                key: instruction.keys().next().map(String::as_str),
            })
    }

    pub fn kind(&self) -> Option<InstructionKind> {
        match self {
            Instruction::Builtin { kind, .. } => Some(*kind),
            Instruction::Opaque { .. } => None,
        }
    }
}

// ─── Options ────────────────────────────────────────────────────────────────

/// Which lint phases to run. Missing fields take their defaults, so a partial
/// JSON/YAML options object deserializes as expected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LintOptions {
    /// Reject instruction arguments not declared by the instruction's schema.
    pub strict: bool,
    /// Check `{{ }}` / `{% %}` usage in every string value.
    pub validate_expressions: bool,
    /// Check name, slug, description, argument, variable and event conventions.
    pub validate_naming: bool,
}

impl Default for LintOptions {
    fn default() -> Self {
        LintOptions {
            strict: false,
            validate_expressions: true,
            validate_naming: false,
        }
    }
}

impl LintOptions {
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_expressions(mut self, validate: bool) -> Self {
        self.validate_expressions = validate;
        self
    }

    pub fn with_naming(mut self, validate: bool) -> Self {
        self.validate_naming = validate;
        self
    }
}
