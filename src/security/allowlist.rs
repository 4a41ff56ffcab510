//! Operator allowlists for operation kinds and paths.
//!
//! Membership is exact string equality. There is no prefix, glob or
//! case-insensitive matching; every permitted path has to be listed.

use std::collections::BTreeSet;

use crate::error::Violation;

use super::path::is_safe_relative_path;

/// Operation kinds permitted when the operator names none.
pub const DEFAULT_ALLOWED_OPS: [&str; 2] = ["read_file", "edit_file"];

/// Immutable pair of allowlists checked against every operation of a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allowlist {
    allowed_ops: BTreeSet<String>,
    allowed_paths: BTreeSet<String>,
}

impl Allowlist {
    /// Build the allowlists, rejecting a configuration that could never pass
    /// or that admits an unsafe path.
    pub fn new<O, P>(ops: O, paths: P) -> Result<Self, Violation>
    where
        O: IntoIterator,
        O::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        let allowed_ops: BTreeSet<String> = ops.into_iter().map(Into::into).collect();
        let allowed_paths: BTreeSet<String> = paths.into_iter().map(Into::into).collect();

        if allowed_paths.is_empty() {
            return Err(Violation::invalid_input(
                "No allowed paths provided. Use --allow-path <path> ...",
            ));
        }

        if let Some(bad) = allowed_paths.iter().find(|p| !is_safe_relative_path(p)) {
            return Err(Violation::invalid_input(format!(
                "Allowlisted path '{}' is not a safe relative path",
                bad
            )));
        }

        tracing::debug!(
            ops = allowed_ops.len(),
            paths = allowed_paths.len(),
            "allowlist configured"
        );

        Ok(Self {
            allowed_ops,
            allowed_paths,
        })
    }

    /// Same as [`Allowlist::new`] with [`DEFAULT_ALLOWED_OPS`].
    pub fn with_default_ops<P>(paths: P) -> Result<Self, Violation>
    where
        P: IntoIterator,
        P::Item: Into<String>,
    {
        Self::new(DEFAULT_ALLOWED_OPS, paths)
    }

    pub fn allows_op(&self, op: &str) -> bool {
        self.allowed_ops.contains(op)
    }

    pub fn allows_path(&self, path: &str) -> bool {
        self.allowed_paths.contains(path)
    }

    pub fn paths(&self) -> &BTreeSet<String> {
        &self.allowed_paths
    }

    /// Sorted operation kinds, rendered for diagnostics.
    pub fn describe_ops(&self) -> String {
        describe(&self.allowed_ops)
    }

    /// Sorted paths, rendered for diagnostics.
    pub fn describe_paths(&self) -> String {
        describe(&self.allowed_paths)
    }
}

fn describe(set: &BTreeSet<String>) -> String {
    // BTreeSet iterates in sorted order
    let quoted: Vec<String> = set.iter().map(|s| format!("{:?}", s)).collect();
    format!("[{}]", quoted.join(","))
}
