//! Run-wide result accumulation
//!
//! A [`LintResult`] is the only structure mutated during the fan-out. It is
//! shared by handle (`Arc`) and looked up in a [`ResultStore`] by storage
//! path, so several runs can append to the same instance and downstream
//! report/check steps read it without re-running anything.

use dashmap::DashMap;
use phplint_core::CacheEntry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Accumulated outcome of one or more lint runs
#[derive(Debug, Default)]
pub struct LintResult {
    num_of_linted_files: AtomicUsize,
    /// file path → light key → diagnostic entry
    invalid_files: DashMap<String, BTreeMap<String, CacheEntry>>,
}

impl LintResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic, overwriting an earlier one for the same slot
    pub fn record_diagnostic(&self, file_path: &str, light_key: &str, entry: CacheEntry) {
        self.invalid_files
            .entry(file_path.to_string())
            .or_default()
            .insert(light_key.to_string(), entry);
    }

    pub fn increment_total(&self, n: usize) {
        self.num_of_linted_files.fetch_add(n, Ordering::SeqCst);
    }

    pub fn num_of_linted_files(&self) -> usize {
        self.num_of_linted_files.load(Ordering::SeqCst)
    }

    /// Number of files with at least one diagnostic
    pub fn num_of_invalid_files(&self) -> usize {
        self.invalid_files.len()
    }

    /// Sorted, serialisable copy of the current state
    pub fn snapshot(&self) -> ResultSnapshot {
        ResultSnapshot {
            num_of_linted_files: self.num_of_linted_files(),
            invalid_files: self
                .invalid_files
                .iter()
                .map(|entry| (entry.key().clone(), entry.value().clone()))
                .collect(),
        }
    }
}

/// Point-in-time view of a [`LintResult`], ordered by file path then light key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSnapshot {
    pub num_of_linted_files: usize,
    pub invalid_files: BTreeMap<String, BTreeMap<String, CacheEntry>>,
}

/// Shared results keyed by storage path (e.g. `options.phplint-lint.result`)
#[derive(Debug, Default)]
pub struct ResultStore {
    results: DashMap<String, Arc<LintResult>>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The result at `path`, created empty on first use
    pub fn get_or_create(&self, path: &str) -> Arc<LintResult> {
        self.results
            .entry(path.to_string())
            .or_insert_with(|| Arc::new(LintResult::new()))
            .clone()
    }

    pub fn get(&self, path: &str) -> Option<Arc<LintResult>> {
        self.results.get(path).map(|r| Arc::clone(r.value()))
    }

    /// Forget the result at `path`; returns it if there was one
    pub fn reset(&self, path: &str) -> Option<Arc<LintResult>> {
        self.results.remove(path).map(|(_, result)| result)
    }
}
