//! Pass/fail gate over a stored lint result

use crate::result::ResultStore;
use phplint_core::{EXIT_LINT_ERRORS, EXIT_NO_RESULT, EXIT_OK};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Nothing has been linted into the storage path yet
    NoResult,
    Passed,
    /// `num_of_errors` is the number of files with at least one diagnostic
    Failed { num_of_errors: usize },
}

impl CheckOutcome {
    pub fn exit_code(self) -> i32 {
        match self {
            CheckOutcome::Passed => EXIT_OK,
            CheckOutcome::Failed { .. } => EXIT_LINT_ERRORS,
            CheckOutcome::NoResult => EXIT_NO_RESULT,
        }
    }

    pub fn is_passed(self) -> bool {
        self == CheckOutcome::Passed
    }
}

impl fmt::Display for CheckOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckOutcome::NoResult => f.write_str("There is no lint result to check."),
            CheckOutcome::Passed => f.write_str("No lint errors."),
            CheckOutcome::Failed { num_of_errors } => {
                write!(f, "Number of lint errors: {num_of_errors}.")
            }
        }
    }
}

/// Gate on the result stored at `path`
pub fn check(store: &ResultStore, path: &str) -> CheckOutcome {
    match store.get(path) {
        None => CheckOutcome::NoResult,
        Some(result) => match result.num_of_invalid_files() {
            0 => CheckOutcome::Passed,
            num_of_errors => CheckOutcome::Failed { num_of_errors },
        },
    }
}
