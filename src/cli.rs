//! Command-line surface of the gate.
//!
//! Usage:
//!   plan-gate plan.json --allow-path nginx/nginx.conf --allow-path docker-compose.yml
//!   plan-gate plan.json --allow-op read_file --allow-op edit_file --allow-path src/lib.rs
//!
//! Exit codes:
//!   0 = PASS
//!   2 = FAIL (scope violation)
//!   3 = FAIL (invalid input, including bad arguments)

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;

use crate::error::{FailureKind, Violation};
use crate::plan::{PlanValidator, load_plan};
use crate::security::{Allowlist, Verdict};

/// Line printed on stdout when a plan passes.
pub const PASS_MESSAGE: &str = "PASS: plan within declared scope";

/// Validate an agent execution plan against an allowlist
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "plan-gate", version)]
#[command(about = "Validate an agent execution plan against an allowlist")]
pub struct Args {
    /// Path to plan.json
    #[arg(value_name = "PLAN_JSON")]
    pub plan: PathBuf,

    /// Allowed operation (repeatable). Default: read_file, edit_file
    #[arg(long = "allow-op", value_name = "OP")]
    pub allow_op: Vec<String>,

    /// Allowed file path (repeatable), relative to repo root
    #[arg(long = "allow-path", value_name = "PATH")]
    pub allow_path: Vec<String>,
}

/// Resolved settings for one gate run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateConfig {
    pub plan: PathBuf,
    pub allowed_ops: Vec<String>,
    pub allowed_paths: Vec<String>,
}

impl From<Args> for GateConfig {
    fn from(args: Args) -> Self {
        Self {
            plan: args.plan,
            allowed_ops: args.allow_op,
            allowed_paths: args.allow_path,
        }
    }
}

impl GateConfig {
    /// Build the allowlists, falling back to the default operation kinds.
    pub fn allowlist(&self) -> Result<Allowlist, Violation> {
        if self.allowed_ops.is_empty() {
            Allowlist::with_default_ops(self.allowed_paths.iter().cloned())
        } else {
            Allowlist::new(
                self.allowed_ops.iter().cloned(),
                self.allowed_paths.iter().cloned(),
            )
        }
    }
}

/// Run the gate: allowlists first, then the plan file, then the plan itself.
pub fn run(config: &GateConfig) -> Verdict {
    let allowlist = match config.allowlist() {
        Ok(allowlist) => allowlist,
        Err(v) => {
            tracing::info!(kind = %v.kind, "configuration rejected: {}", v.message);
            return Verdict::Fail(v);
        }
    };

    let doc = match load_plan(&config.plan) {
        Ok(doc) => doc,
        Err(v) => {
            tracing::info!(kind = %v.kind, "plan rejected: {}", v.message);
            return Verdict::Fail(v);
        }
    };

    PlanValidator::new(allowlist).validate(&doc)
}

/// Print the verdict the way callers expect and turn it into an exit code.
pub fn report(verdict: &Verdict) -> ExitCode {
    match verdict {
        Verdict::Pass => {
            let mut stdout = std::io::stdout().lock();
            if let Err(e) = writeln!(stdout, "{}", PASS_MESSAGE) {
                tracing::error!("Failed to write verdict: {}", e);
            }
        }
        Verdict::Fail(v) => {
            eprintln!("FAIL: {}", v);
        }
    }
    ExitCode::from(verdict.exit_code())
}

/// Handle an argument error. Help and version exit 0; anything else is
/// invalid input, never the scope-violation code.
pub fn usage_error(err: clap::Error) -> ExitCode {
    let code = match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => FailureKind::InvalidInput.exit_code(),
    };
    if let Err(e) = err.print() {
        tracing::error!("Failed to print usage: {}", e);
    }
    ExitCode::from(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("plan-gate").chain(args.iter().copied()))
    }

    #[test]
    fn test_parse_repeatable_flags() {
        let args = parse(&[
            "plan.json",
            "--allow-path",
            "a.txt",
            "--allow-op",
            "read_file",
            "--allow-path",
            "b.txt",
        ])
        .unwrap();
        assert_eq!(args.plan, PathBuf::from("plan.json"));
        assert_eq!(args.allow_op, vec!["read_file"]);
        assert_eq!(args.allow_path, vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse(&[]).is_err());
        let err = parse(&["plan.json", "--allow-everything"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
        let err = parse(&["--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_config_defaults_ops() {
        let config = GateConfig::from(parse(&["p.json", "--allow-path", "a.txt"]).unwrap());
        let allowlist = config.allowlist().unwrap();
        assert!(allowlist.allows_op("read_file"));
        assert!(allowlist.allows_op("edit_file"));
    }

    #[test]
    fn test_run_without_paths_skips_plan_file() {
        // The plan file does not exist; the allowlist error must win
        let config = GateConfig {
            plan: PathBuf::from("/definitely/not/here.json"),
            allowed_ops: Vec::new(),
            allowed_paths: Vec::new(),
        };
        let verdict = run(&config);
        assert_eq!(verdict.failure_kind(), Some(FailureKind::InvalidInput));
        match verdict {
            Verdict::Fail(v) => assert!(v.message.contains("No allowed paths")),
            Verdict::Pass => panic!("Expected Fail verdict"),
        }
    }

    #[test]
    fn test_run_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let plan = dir.path().join("plan.json");
        fs::write(
            &plan,
            r#"{"task":"check nginx","operations":[{"op":"read_file","path":"nginx/nginx.conf","reason":"inspect"}]}"#,
        )
        .unwrap();

        let config = GateConfig {
            plan: plan.clone(),
            allowed_ops: Vec::new(),
            allowed_paths: vec!["nginx/nginx.conf".to_string()],
        };
        assert_eq!(run(&config), Verdict::Pass);

        let config = GateConfig {
            plan,
            allowed_ops: vec!["edit_file".to_string()],
            allowed_paths: vec!["nginx/nginx.conf".to_string()],
        };
        assert_eq!(run(&config).exit_code(), 2);
    }

    #[test]
    fn test_run_missing_plan_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = GateConfig {
            plan: dir.path().join("missing.json"),
            allowed_ops: Vec::new(),
            allowed_paths: vec!["a.txt".to_string()],
        };
        assert_eq!(run(&config).exit_code(), 3);
    }
}
