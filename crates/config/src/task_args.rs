//! Positional task arguments (`no-cache`, `cache-clear`, `sl-N`, `ttl-N`)

use crate::cache::CacheEngine;
use crate::config::LintConfig;
use lazy_static::lazy_static;
use regex::Regex;
use std::time::Duration;
use tracing::warn;

lazy_static! {
    static ref NUMERIC_ARG: Regex = Regex::new(r"^(sl|ttl)-(\d+)$").unwrap();
}

/// A recognised task argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskArg {
    NoCache,
    CacheClear,
    SpawnLimit(usize),
    /// Seconds
    Ttl(u64),
}

impl TaskArg {
    /// Parse one argument; `None` when it is not recognised.
    pub fn parse(arg: &str) -> Option<Self> {
        match arg {
            "no-cache" => return Some(TaskArg::NoCache),
            "cache-clear" => return Some(TaskArg::CacheClear),
            _ => {}
        }

        let caps = NUMERIC_ARG.captures(arg)?;
        let value = &caps[2];
        match &caps[1] {
            "sl" => value.parse().ok().map(TaskArg::SpawnLimit),
            _ => value.parse().ok().map(TaskArg::Ttl),
        }
    }
}

/// Overlay task arguments on a resolved configuration.
///
/// Arguments apply left to right, so a later one wins. Unknown arguments are
/// logged and ignored.
pub fn apply_task_args<S: AsRef<str>>(config: &mut LintConfig, args: &[S]) {
    for arg in args {
        let arg = arg.as_ref();
        match TaskArg::parse(arg) {
            Some(TaskArg::NoCache) => config.cache.engine = CacheEngine::None,
            Some(TaskArg::CacheClear) => config.cache_clear = true,
            Some(TaskArg::SpawnLimit(0)) => {
                warn!(arg = %arg, "Spawn limit must be at least 1, ignoring task argument");
            }
            Some(TaskArg::SpawnLimit(n)) => config.spawn_limit = n,
            Some(TaskArg::Ttl(secs)) => config.cache.ttl = Duration::from_secs(secs),
            None => warn!(arg = %arg, "Unknown task argument"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheSettings;
    use phplint_core::Variant;

    fn base(spawn_limit: usize, engine: CacheEngine, ttl: u64) -> LintConfig {
        LintConfig {
            result_storage: "options.phplint-lint.result".to_string(),
            spawn_limit,
            cache: CacheSettings {
                engine,
                ttl: Duration::from_secs(ttl),
                ..CacheSettings::default()
            },
            cache_clear: false,
            variants: vec![Variant::new("default", "php")],
            files: Vec::new(),
        }
    }

    #[test]
    fn test_no_cache_disables_caching() {
        let mut config = base(4, CacheEngine::Redis, 7);
        apply_task_args(&mut config, &["no-cache"]);
        assert_eq!(config.cache.engine, CacheEngine::None);
        assert!(!config.cache_clear);
    }

    #[test]
    fn test_cache_clear_keeps_engine() {
        let mut config = base(4, CacheEngine::Redis, 7);
        apply_task_args(&mut config, &["cache-clear"]);
        assert!(config.cache_clear);
        assert_eq!(config.cache.engine, CacheEngine::Redis);
    }

    #[test]
    fn test_later_spawn_limit_wins() {
        let mut config = base(7, CacheEngine::File, 7);
        apply_task_args(&mut config, &["sl-21", "sl-42"]);
        assert_eq!(config.spawn_limit, 42);
    }

    #[test]
    fn test_later_ttl_wins() {
        let mut config = base(7, CacheEngine::Redis, 7);
        apply_task_args(&mut config, &["ttl-21", "ttl-42"]);
        assert_eq!(config.cache.ttl, Duration::from_secs(42));
        assert_eq!(config.cache.engine, CacheEngine::Redis);
    }

    #[test]
    fn test_override_everything() {
        let mut config = base(1, CacheEngine::Redis, 2);
        apply_task_args(&mut config, &["no-cache", "sl-3", "ttl-4"]);
        assert_eq!(config.spawn_limit, 3);
        assert_eq!(config.cache.engine, CacheEngine::None);
        assert_eq!(config.cache.ttl, Duration::from_secs(4));
    }

    #[test]
    fn test_unknown_args_change_nothing() {
        let mut config = base(12, CacheEngine::Redis, 7);
        let before = config.clone();
        apply_task_args(&mut config, &["unknown-1", "unknown-2", "sl-", "ttl-x", "sl-0"]);
        assert_eq!(config, before);
    }

    #[test]
    fn test_parse() {
        assert_eq!(TaskArg::parse("sl-8"), Some(TaskArg::SpawnLimit(8)));
        assert_eq!(TaskArg::parse("ttl-0"), Some(TaskArg::Ttl(0)));
        assert_eq!(TaskArg::parse("sl-12"), Some(TaskArg::SpawnLimit(12)));
        assert_eq!(TaskArg::parse("sl-+3"), None);
        assert_eq!(TaskArg::parse("no-cache "), None);
    }

    #[test]
    fn test_parse_rejects_malformed_numbers() {
        for arg in ["sl-", "sl-3x", "xsl-3", "ttl--1", "ttl-1.5", "sl-٣", "ttl-99999999999999999999999"] {
            assert_eq!(TaskArg::parse(arg), None, "{arg}");
        }
    }
}
