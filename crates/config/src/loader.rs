//! Configuration loader for phplint
//!
//! Reads [`LintOptions`] from a JSON file. With no explicit file the loader
//! looks for `phplint.json` in the working directory and falls back to empty
//! options when there is none.

use crate::{config::LintConfig, options::LintOptions};
use phplint_core::{constants::CONFIG_FILENAME, Error, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads lint options at startup
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    /// Directory searched for the default file (defaults to current directory)
    directory: Option<PathBuf>,
    /// Explicit options file; missing means an error instead of a fallback
    file: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the directory to look for `phplint.json` in
    pub fn directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.directory = Some(dir.into());
        self
    }

    /// Use an explicit options file
    pub fn file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Directory that relative file patterns are expanded against
    pub fn base_dir(&self) -> PathBuf {
        if let Some(parent) = self
            .file
            .as_deref()
            .and_then(Path::parent)
            .filter(|p| !p.as_os_str().is_empty())
        {
            return parent.to_path_buf();
        }
        self.directory
            .clone()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Load raw options without applying defaults
    pub fn load_options(&self) -> Result<LintOptions> {
        if let Some(file) = &self.file {
            return read_options(file);
        }

        let candidate = self.base_dir().join(CONFIG_FILENAME);
        if candidate.is_file() {
            read_options(&candidate)
        } else {
            debug!(path = %candidate.display(), "No options file found, using defaults");
            Ok(LintOptions::default())
        }
    }

    /// Load and resolve the configuration
    pub fn load(&self) -> Result<LintConfig> {
        self.load_options()?.resolve()
    }
}

fn read_options(path: &Path) -> Result<LintOptions> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::file_system(path, "read options file", e))?;

    debug!(path = %path.display(), "Loaded options file");

    serde_json::from_str(&content).map_err(|e| {
        Error::configuration(format!("invalid options file {}: {e}", path.display()))
    })
}
