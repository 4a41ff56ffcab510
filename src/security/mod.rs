//! Security module for path safety and allowlist enforcement.
//!
//! This module decides whether a proposed path is a clean relative path,
//! holds the operator allowlists, and defines the final verdict.

mod allowlist;
mod path;

pub use allowlist::{Allowlist, DEFAULT_ALLOWED_OPS};
pub use path::is_safe_relative_path;

use crate::error::{FailureKind, Violation};

/// Outcome of validating one plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail(Violation),
}

impl Verdict {
    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Verdict::Pass => None,
            Verdict::Fail(v) => Some(v.kind),
        }
    }

    /// Process exit code: 0 on pass, otherwise the failure kind's code.
    pub fn exit_code(&self) -> u8 {
        match self {
            Verdict::Pass => 0,
            Verdict::Fail(v) => v.exit_code(),
        }
    }
}

impl<T> From<Result<T, Violation>> for Verdict {
    fn from(result: Result<T, Violation>) -> Self {
        match result {
            Ok(_) => Verdict::Pass,
            Err(v) => Verdict::Fail(v),
        }
    }
}
