//! Plan validation against operator allowlists.
//!
//! Checks run structural first, semantic second, and stop at the first
//! violation. A plan passes only if every operation passes.

use serde_json::Value;

use crate::error::Violation;
use crate::security::{Allowlist, Verdict, is_safe_relative_path};

use super::extract::{
    Object, display_value, document_object, non_empty_string_field, operation_object,
    operations_array, optional_task, string_field,
};
use super::{ExecutionPlan, Operation, parse_plan};

/// Validates plans against one fixed set of allowlists.
#[derive(Debug, Clone)]
pub struct PlanValidator {
    allowlist: Allowlist,
}

impl PlanValidator {
    pub fn new(allowlist: Allowlist) -> Self {
        Self { allowlist }
    }

    /// Validate a parsed document and report the verdict.
    pub fn validate(&self, doc: &Value) -> Verdict {
        let verdict = Verdict::from(self.check(doc));
        if let Verdict::Fail(v) = &verdict {
            tracing::info!(kind = %v.kind, "plan rejected: {}", v.message);
        }
        verdict
    }

    /// Parse JSON text, then validate it.
    pub fn validate_str(&self, text: &str) -> Verdict {
        match parse_plan(text) {
            Ok(doc) => self.validate(&doc),
            Err(v) => {
                tracing::info!(kind = %v.kind, "plan rejected: {}", v.message);
                Verdict::Fail(v)
            }
        }
    }

    /// Validate a parsed document, returning the typed plan when it passes.
    pub fn check(&self, doc: &Value) -> Result<ExecutionPlan, Violation> {
        let plan = document_object(doc)?;
        let items = operations_array(plan)?;

        let mut operations = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let op = operation_object(item, index)?;
            operations.push(self.check_operation(op, index)?);
        }

        let task = optional_task(plan)?.map(str::to_string);

        let accepted = ExecutionPlan { operations, task };
        match accepted.to_audit_json() {
            Ok(json) => tracing::info!(
                operations = accepted.operations.len(),
                task = accepted.task.as_deref().unwrap_or("-"),
                plan = %json,
                "plan within declared scope"
            ),
            Err(e) => tracing::warn!("Failed to serialize accepted plan for audit: {}", e),
        }

        Ok(accepted)
    }

    fn check_operation(&self, op: &Object, index: usize) -> Result<Operation, Violation> {
        let kind = match op.get("op").and_then(Value::as_str) {
            Some(kind) if self.allowlist.allows_op(kind) => kind,
            _ => {
                return Err(Violation::scope(format!(
                    "operations[{}].op '{}' not allowed. Allowed ops: {}",
                    index,
                    display_value(op.get("op")),
                    self.allowlist.describe_ops()
                )));
            }
        };

        let path = string_field(op, index, "path")?;

        if !is_safe_relative_path(path) {
            return Err(Violation::scope(format!(
                "operations[{}].path '{}' is not a safe relative path",
                index, path
            )));
        }

        if !self.allowlist.allows_path(path) {
            return Err(Violation::scope(format!(
                "operations[{}].path '{}' not allowed. Allowed paths: {}",
                index,
                path,
                self.allowlist.describe_paths()
            )));
        }

        let reason = non_empty_string_field(op, index, "reason")?;

        tracing::debug!(index, op = kind, path, "operation allowed");

        Ok(Operation {
            op: kind.to_string(),
            path: path.to_string(),
            reason: reason.to_string(),
        })
    }
}

/// One-shot validation: check the allowlists, then the document.
pub fn validate<O, P>(doc: &Value, allowed_ops: O, allowed_paths: P) -> Verdict
where
    O: IntoIterator,
    O::Item: Into<String>,
    P: IntoIterator,
    P::Item: Into<String>,
{
    match Allowlist::new(allowed_ops, allowed_paths) {
        Ok(allowlist) => PlanValidator::new(allowlist).validate(doc),
        Err(v) => Verdict::Fail(v),
    }
}
