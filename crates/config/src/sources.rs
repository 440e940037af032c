//! Expansion of file patterns into the list of files to check

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use phplint_core::{Error, Result};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Expand `patterns` against `base_dir`.
///
/// Patterns without glob characters name a file directly. A leading `!`
/// excludes matches. The result is sorted and free of duplicates.
pub fn expand_sources<S: AsRef<str>>(base_dir: &Path, patterns: &[S]) -> Result<Vec<PathBuf>> {
    let mut includes = Vec::new();
    let mut excludes = Vec::new();
    for pattern in patterns {
        let pattern = pattern.as_ref();
        match pattern.strip_prefix('!') {
            Some(excluded) => excludes.push(excluded),
            None => includes.push(pattern),
        }
    }

    let excluded = build_globset(&excludes)?;
    let mut files = BTreeSet::new();

    let (literals, globs): (Vec<&str>, Vec<&str>) =
        includes.into_iter().partition(|p| !is_glob(p));

    for literal in literals {
        let relative = Path::new(literal);
        let full_path = base_dir.join(relative);
        if full_path.is_file() && !excluded.is_match(relative) {
            files.insert(full_path);
        }
    }

    if !globs.is_empty() {
        let included = build_globset(&globs)?;
        for entry in WalkDir::new(base_dir).follow_links(true) {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(base_dir).to_path_buf();
                match e.into_io_error() {
                    Some(io) => Error::file_system(path, "walk directory", io),
                    None => Error::configuration(format!(
                        "filesystem loop detected at {}",
                        path.display()
                    )),
                }
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(base_dir) else {
                continue;
            };
            if included.is_match(relative) && !excluded.is_match(relative) {
                files.insert(entry.path().to_path_buf());
            }
        }
    }

    Ok(files.into_iter().collect())
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '[', '{'])
}

fn build_globset(patterns: &[&str]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|e| Error::configuration(format!("Invalid glob pattern '{pattern}': {e}")))?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| Error::configuration(format!("Failed to build globset: {e}")))
}
