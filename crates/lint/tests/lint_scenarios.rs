mod common;

use async_trait::async_trait;
use common::ScriptedPhp;
use phplint_cache::{CacheBackend, CacheGateway, MemoryCache};
use phplint_config::{apply_task_args, LintConfig, LintOptions};
use phplint_lint::{check, CheckOutcome, LintRunner, Report, ResultStore, RunOutcome};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

const RESULT: &str = "options.phplint-lint.result";

fn legacy_php() -> ScriptedPhp {
    let flags = r#"{"asp_tags":false,"short_open_tag":true}"#;
    ScriptedPhp::new()
        .version("php55", "5.5.38")
        .version("php56", "5.6.15")
        .flags("php55", flags)
        .flags("php56", flags)
        .lint(
            "broken.php",
            255,
            "PHP Parse error: syntax error, unexpected end of file in {file} on line 3",
        )
}

fn legacy_config(cache: serde_json::Value) -> LintConfig {
    let options: LintOptions = serde_json::from_value(serde_json::json!({
        "spawnLimit": 2,
        "cache": cache,
        "php": {
            "php55": {
                "executable": "php55",
                "args": { "define": { "short_open_tag=On": true, "asp_tags=On": false } }
            },
            "php56": {
                "executable": "php56",
                "args": { "define": { "short_open_tag=On": true, "asp_tags=On": false } }
            }
        }
    }))
    .unwrap();
    options.resolve().unwrap()
}

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// Memory backend that counts `clear` calls
#[derive(Debug, Default)]
struct CountingBackend {
    inner: MemoryCache,
    clears: AtomicUsize,
}

#[async_trait]
impl CacheBackend for CountingBackend {
    async fn get(&self, key: &str) -> phplint_cache::Result<Option<Vec<u8>>> {
        self.inner.get(key).await
    }

    async fn set(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl: Option<Duration>,
    ) -> phplint_cache::Result<()> {
        self.inner.set(key, value, ttl).await
    }

    async fn clear(&self) -> phplint_cache::Result<()> {
        self.clears.fetch_add(1, Ordering::SeqCst);
        self.inner.clear().await
    }
}

#[tokio::test]
async fn syntax_error_on_two_variants_is_recorded_under_both_light_keys() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_file(&temp_dir, "broken.php", "<?php\nif (true) {\n");
    let path = file.to_string_lossy().into_owned();
    let php = Arc::new(legacy_php());

    let store = ResultStore::new();
    let runner = LintRunner::new(
        legacy_config(serde_json::json!({ "engine": "memory" })),
        php.clone(),
    )
    .unwrap();
    let outcome = runner.run(&[&file], &store).await.unwrap();
    assert_eq!(outcome, RunOutcome::Linted { files: 1, variants: 2 });

    let snapshot = store.get(RESULT).unwrap().snapshot();
    assert_eq!(snapshot.num_of_linted_files, 1);
    let keys: Vec<&str> = snapshot.invalid_files[&path].keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["5.5:0-1", "5.6:0-1"]);

    let entry = &snapshot.invalid_files[&path]["5.6:0-1"];
    assert_eq!(entry.exit_code, 255);
    assert_eq!(entry.command_line(), "php56 -n -d asp_tags=0 -d short_open_tag=1 -l");
    assert!(entry.std_out.contains(&path));

    let mut lines = php.lint_command_lines();
    lines.sort();
    assert_eq!(
        lines,
        vec![
            format!("php55 -n -d asp_tags=0 -d short_open_tag=1 -l {path}"),
            format!("php56 -n -d asp_tags=0 -d short_open_tag=1 -l {path}"),
        ]
    );

    assert_eq!(check(&store, RESULT), CheckOutcome::Failed { num_of_errors: 1 });
    let report = Report::from_store(&store, RESULT).to_string();
    assert!(report.contains("1 errors with `php55 -n -d asp_tags=0 -d short_open_tag=1 -l FILE_NAME`"));
}

#[tokio::test]
async fn disabled_cache_reinvokes_the_interpreter() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_file(&temp_dir, "broken.php", "<?php\nif (true) {\n");

    let mut config = legacy_config(serde_json::json!({ "engine": "memory" }));
    apply_task_args(&mut config, &["no-cache"]);
    assert!(!config.cache.is_enabled());

    let php = Arc::new(legacy_php());
    let store = ResultStore::new();
    let runner = LintRunner::new(config, php.clone()).unwrap();
    runner.run(&[&file], &store).await.unwrap();
    runner.run(&[&file], &store).await.unwrap();

    assert_eq!(php.lint_calls(), 4);
    assert_eq!(store.get(RESULT).unwrap().num_of_linted_files(), 2);
}

#[tokio::test]
async fn enabled_cache_serves_the_second_run() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_file(&temp_dir, "broken.php", "<?php\nif (true) {\n");

    let php = Arc::new(legacy_php());
    let store = ResultStore::new();
    let runner = LintRunner::new(
        legacy_config(serde_json::json!({ "engine": "memory" })),
        php.clone(),
    )
    .unwrap();
    runner.run(&[&file], &store).await.unwrap();
    runner.run(&[&file], &store).await.unwrap();

    assert_eq!(php.lint_calls(), 2);
    assert_eq!(store.get(RESULT).unwrap().num_of_invalid_files(), 1);
}

#[tokio::test]
async fn clear_mode_clears_once_and_checks_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_file(&temp_dir, "ok.php", "<?php echo 1;\n");

    let backend = Arc::new(CountingBackend::default());
    let base = legacy_config(serde_json::json!({ "engine": "memory" }));
    let gateway = CacheGateway::new(backend.clone(), &base.cache);

    let php = Arc::new(legacy_php());
    let store = ResultStore::new();
    LintRunner::new(base.clone(), php.clone())
        .unwrap()
        .with_cache(Some(gateway.clone()))
        .run(&[&file], &store)
        .await
        .unwrap();
    assert_eq!(php.lint_calls(), 2);
    let calls_before_clear = php.total_calls();

    let mut clear_config = base.clone();
    apply_task_args(&mut clear_config, &["cache-clear"]);
    let clearing = LintRunner::new(clear_config, php.clone())
        .unwrap()
        .with_cache(Some(gateway.clone()));
    assert_eq!(clearing.run(&[&file], &store).await.unwrap(), RunOutcome::Cleared);

    assert_eq!(backend.clears.load(Ordering::SeqCst), 1);
    assert_eq!(php.total_calls(), calls_before_clear);
    assert_eq!(store.get(RESULT).unwrap().num_of_linted_files(), 1);

    // A second clear is harmless and the next run is cold again
    clearing.run(&[&file], &store).await.unwrap();
    LintRunner::new(base, php.clone())
        .unwrap()
        .with_cache(Some(gateway))
        .run(&[&file], &store)
        .await
        .unwrap();
    assert_eq!(php.lint_calls(), 4);
}

#[tokio::test]
async fn file_cache_survives_a_new_runner_and_restores_paths() {
    let cache_dir = TempDir::new().unwrap();
    let src_dir = TempDir::new().unwrap();
    let original = write_file(&src_dir, "broken.php", "<?php\nif (true) {\n");
    let copy = write_file(&src_dir, "copy.php", "<?php\nif (true) {\n");
    let copy_path = copy.to_string_lossy().into_owned();

    let config = legacy_config(serde_json::json!({
        "engine": "file",
        "dir": cache_dir.path(),
        "ttl": 0
    }));

    let first_php = Arc::new(legacy_php());
    LintRunner::new(config.clone(), first_php.clone())
        .unwrap()
        .run(&[&original], &ResultStore::new())
        .await
        .unwrap();
    assert_eq!(first_php.lint_calls(), 2);

    // Same content under another name, served from disk by a fresh runner
    let second_php = Arc::new(legacy_php());
    let store = ResultStore::new();
    LintRunner::new(config, second_php.clone())
        .unwrap()
        .run(&[&copy], &store)
        .await
        .unwrap();
    assert_eq!(second_php.lint_calls(), 0);

    let snapshot = store.get(RESULT).unwrap().snapshot();
    let entry = &snapshot.invalid_files[&copy_path]["5.5:0-1"];
    assert_eq!(
        entry.std_out,
        format!("PHP Parse error: syntax error, unexpected end of file in {copy_path} on line 3")
    );
}
