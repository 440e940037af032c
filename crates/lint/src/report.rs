//! Human readable report of a stored lint result

use crate::result::{ResultSnapshot, ResultStore};
use indexmap::IndexMap;
use std::fmt;

pub const NO_RESULT_MESSAGE: &str = "There is no result to create a report from";

/// Severity of one report line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLevel {
    /// Part of a problem: command lines, interpreter output, summaries
    Warn,
    /// Separators and the all-clear summary
    Ok,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    pub level: ReportLevel,
    pub text: String,
}

impl ReportLine {
    fn warn(text: impl Into<String>) -> Self {
        Self {
            level: ReportLevel::Warn,
            text: text.into(),
        }
    }

    fn ok(text: impl Into<String>) -> Self {
        Self {
            level: ReportLevel::Ok,
            text: text.into(),
        }
    }
}

/// Rendered report, in output order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub lines: Vec<ReportLine>,
}

impl Report {
    /// Report of the result stored at `path`
    pub fn from_store(store: &ResultStore, path: &str) -> Self {
        match store.get(path) {
            Some(result) => Self::from_snapshot(&result.snapshot()),
            None => Self {
                lines: vec![ReportLine::warn(NO_RESULT_MESSAGE)],
            },
        }
    }

    /// Details per invalid file and light key, then one summary per command
    pub fn from_snapshot(snapshot: &ResultSnapshot) -> Self {
        if snapshot.invalid_files.is_empty() {
            return Self {
                lines: vec![ReportLine::ok(format!(
                    "0 error in {} files",
                    snapshot.num_of_linted_files
                ))],
            };
        }

        let mut lines = Vec::new();
        let mut summary: IndexMap<String, usize> = IndexMap::new();

        // BTreeMaps iterate sorted by file path, then by light key
        for entries in snapshot.invalid_files.values() {
            for entry in entries.values() {
                let command = entry.command_line();
                lines.push(ReportLine::warn(command.clone()));
                lines.push(ReportLine::warn(entry.std_out.clone()));
                lines.push(ReportLine::ok("---"));
                *summary.entry(command).or_default() += 1;
            }
        }

        lines.extend(
            summary
                .into_iter()
                .map(|(command, errors)| ReportLine::warn(format!("{errors} errors with `{command} FILE_NAME`"))),
        );

        Self { lines }
    }

    pub fn has_problems(&self) -> bool {
        self.lines.iter().any(|line| line.level == ReportLevel::Warn)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line.text)?;
        }
        Ok(())
    }
}
