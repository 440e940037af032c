use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "phplint";

/// XDG Base Directory paths for phplint
pub struct XdgPaths;

impl XdgPaths {
    /// Get XDG_CACHE_HOME/phplint or fallback
    pub fn cache_dir() -> PathBuf {
        Self::cache_dir_from(env::var("XDG_CACHE_HOME").ok(), dirs::home_dir())
    }

    fn cache_dir_from(xdg_cache_home: Option<String>, home: Option<PathBuf>) -> PathBuf {
        xdg_cache_home
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                home.map(|home| home.join(".cache"))
                    .unwrap_or_else(|| PathBuf::from(".cache"))
            })
            .join(APP_DIR)
    }
}
