//! Execution plans submitted by an agent for preflight authorization.
//!
//! Plans arrive as untyped JSON. The validator walks the JSON tree with
//! shape-checked extractors and only produces these typed values once
//! every check has passed.

mod extract;
mod loader;
mod validator;

use serde::Serialize;

pub use loader::{load_plan, parse_plan};
pub use validator::{PlanValidator, validate};

/// One proposed action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Operation {
    pub op: String,
    pub path: String,
    pub reason: String,
}

/// A plan that has passed every check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionPlan {
    pub operations: Vec<Operation>,
    /// Free text kept for the audit log only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
}

impl ExecutionPlan {
    /// Compact JSON form written to the audit log on acceptance.
    pub fn to_audit_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_op(path: &str) -> Operation {
        Operation {
            op: "read_file".to_string(),
            path: path.to_string(),
            reason: "inspect".to_string(),
        }
    }

    #[test]
    fn test_audit_json_with_task() {
        let plan = ExecutionPlan {
            operations: vec![read_op("nginx/nginx.conf")],
            task: Some("audit nginx".to_string()),
        };
        assert_eq!(
            plan.to_audit_json().unwrap(),
            r#"{"operations":[{"op":"read_file","path":"nginx/nginx.conf","reason":"inspect"}],"task":"audit nginx"}"#
        );
    }

    #[test]
    fn test_audit_json_omits_missing_task() {
        let plan = ExecutionPlan {
            operations: vec![read_op("a.txt")],
            task: None,
        };
        let json = plan.to_audit_json().unwrap();
        assert!(!json.contains("task"));
        assert!(json.contains(r#""path":"a.txt""#));
    }
}
