//! Failure kinds reported by the gate.
//!
//! Every failure is either a malformed input (caller or configuration bug)
//! or a scope violation (a well-formed plan that steps outside the
//! allowlists). The kind decides the process exit code.

use std::fmt;

/// Category of a failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The document, a field, or an allowlist entry has the wrong shape.
    InvalidInput,
    /// The plan is well-formed but asks for something not allowlisted.
    ScopeViolation,
}

impl FailureKind {
    /// Process exit code for this kind of failure.
    pub fn exit_code(self) -> u8 {
        match self {
            FailureKind::ScopeViolation => 2,
            FailureKind::InvalidInput => 3,
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidInput => f.write_str("invalid input"),
            FailureKind::ScopeViolation => f.write_str("scope violation"),
        }
    }
}

/// A single fatal finding. Validation stops at the first one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct Violation {
    pub kind: FailureKind,
    pub message: String,
}

impl Violation {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::InvalidInput,
            message: message.into(),
        }
    }

    pub fn scope(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::ScopeViolation,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.kind.exit_code()
    }
}
