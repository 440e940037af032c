//! Running one check and classifying its exit code

use crate::command_executor::CommandExecutor;
use phplint_core::{CacheEntry, Error, Result, VariantMeta, SYNTAX_ERROR_EXIT_CODE};
use std::sync::Arc;
use tracing::debug;

/// Non-fatal outcome of a check. Both kinds are cacheable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LintOutcome {
    /// Exit code 0
    Clean(CacheEntry),
    /// The interpreter reported a syntax problem
    Diagnostic(CacheEntry),
}

impl LintOutcome {
    pub fn entry(&self) -> &CacheEntry {
        match self {
            LintOutcome::Clean(entry) | LintOutcome::Diagnostic(entry) => entry,
        }
    }

    pub fn into_entry(self) -> CacheEntry {
        match self {
            LintOutcome::Clean(entry) | LintOutcome::Diagnostic(entry) => entry,
        }
    }

    pub fn is_diagnostic(&self) -> bool {
        matches!(self, LintOutcome::Diagnostic(_))
    }
}

/// Runs the interpreter in syntax-check mode
#[derive(Clone)]
pub struct LintExecutor {
    executor: Arc<dyn CommandExecutor>,
}

impl LintExecutor {
    pub fn new(executor: Arc<dyn CommandExecutor>) -> Self {
        Self { executor }
    }

    /// Check `file_path` with a resolved variant.
    ///
    /// Spawn failures, signals and exit codes other than 0 and the syntax
    /// error code are returned as [`Error::CommandExecution`].
    pub async fn execute(&self, meta: &VariantMeta, file_path: &str) -> Result<LintOutcome> {
        let args = meta.command_args.with_trailing(file_path);
        let output = self.executor.execute(&meta.executable, &args).await?;

        let std_out = String::from_utf8_lossy(&output.stdout).into_owned();
        let std_error = String::from_utf8_lossy(&output.stderr).into_owned();
        let exit_code = output.status.code();

        debug!(
            file = %file_path,
            variant = %meta.name,
            exit_code = ?exit_code,
            "Check finished"
        );

        let entry = |exit_code: i32, std_out: String, std_error: String| CacheEntry {
            php_executable: meta.executable.clone(),
            php_command_args: meta.command_args.clone(),
            exit_code,
            std_out,
            std_error,
        };

        match exit_code {
            Some(0) => Ok(LintOutcome::Clean(entry(0, std_out, std_error))),
            Some(SYNTAX_ERROR_EXIT_CODE) => Ok(LintOutcome::Diagnostic(entry(
                SYNTAX_ERROR_EXIT_CODE,
                std_out,
                std_error,
            ))),
            code => {
                let message = match std_error.trim() {
                    "" if code.is_none() => "terminated by a signal".to_string(),
                    "" => std_out.trim().to_string(),
                    stderr => stderr.to_string(),
                };
                Err(Error::command_execution(
                    meta.executable.clone(),
                    args.into_inner(),
                    message,
                    code,
                ))
            }
        }
    }
}
