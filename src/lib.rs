//! plan-gate - a preflight allowlist gate for agent execution plans
//!
//! An agent proposes a plan of file operations as JSON. Before anything
//! runs, the gate checks that every operation kind and every path is on
//! the operator's allowlists and that each path is a clean relative path.
//! The gate never executes anything; it only returns a verdict.
//!
//! # Example
//!
//! ```
//! use plan_gate::plan::PlanValidator;
//! use plan_gate::security::{Allowlist, Verdict};
//! use serde_json::json;
//!
//! let allowlist = Allowlist::with_default_ops(["nginx/nginx.conf"]).unwrap();
//! let validator = PlanValidator::new(allowlist);
//!
//! let plan = json!({
//!     "task": "check the proxy config",
//!     "operations": [
//!         {"op": "read_file", "path": "nginx/nginx.conf", "reason": "inspect"}
//!     ]
//! });
//! assert_eq!(validator.validate(&plan), Verdict::Pass);
//!
//! let escape = json!({
//!     "operations": [
//!         {"op": "read_file", "path": "../etc/passwd", "reason": "inspect"}
//!     ]
//! });
//! assert_eq!(validator.validate(&escape).exit_code(), 2);
//! ```

pub mod cli;
pub mod error;
pub mod plan;
pub mod security;
pub mod utils;

// Re-export commonly used types
pub use error::{FailureKind, Violation};
pub use plan::{ExecutionPlan, Operation, PlanValidator, validate};
pub use security::{Allowlist, DEFAULT_ALLOWED_OPS, Verdict, is_safe_relative_path};
