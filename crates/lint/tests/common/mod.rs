use async_trait::async_trait;
use phplint_core::{CommandArguments, Result};
use phplint_lint::CommandExecutor;
use std::collections::HashMap;
use std::process::{ExitStatus, Output};
use std::sync::Mutex;

/// Fake interpreter driven by rules instead of exact command lines.
///
/// Version probes answer from `versions`, flag probes from `flags`, lint
/// invocations (`-l <file>`) from `lint` keyed by file name with a clean
/// exit as fallback. Every invocation is recorded.
#[derive(Default)]
pub struct ScriptedPhp {
    versions: HashMap<String, String>,
    flags: HashMap<String, String>,
    lint: HashMap<String, (i32, String)>,
    calls: Mutex<Vec<(String, Vec<String>)>>,
}

impl ScriptedPhp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn version(mut self, executable: &str, version: &str) -> Self {
        self.versions.insert(executable.to_string(), version.to_string());
        self
    }

    /// JSON printed by the flag probe of `executable`
    pub fn flags(mut self, executable: &str, json: &str) -> Self {
        self.flags.insert(executable.to_string(), json.to_string());
        self
    }

    /// `stdout` may contain `{file}`, replaced with the linted path
    pub fn lint(mut self, file_name: &str, exit_code: i32, stdout: &str) -> Self {
        self.lint
            .insert(file_name.to_string(), (exit_code, stdout.to_string()));
        self
    }

    /// Number of `-l` invocations so far
    pub fn lint_calls(&self) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, args)| args.iter().any(|a| a == "-l"))
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn lint_command_lines(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, args)| args.iter().any(|a| a == "-l"))
            .map(|(cmd, args)| format!("{cmd} {}", args.join(" ")))
            .collect()
    }
}

#[async_trait]
impl CommandExecutor for ScriptedPhp {
    async fn execute(&self, cmd: &str, args: &CommandArguments) -> Result<Output> {
        let args = args.as_slice().to_vec();
        self.calls
            .lock()
            .unwrap()
            .push((cmd.to_string(), args.clone()));

        let code = args.last().map(String::as_str).unwrap_or_default();
        let (status, stdout) = if code == "echo PHP_VERSION;" {
            match self.versions.get(cmd) {
                Some(version) => (0, format!("{version}\n")),
                None => (127, String::new()),
            }
        } else if code.starts_with("$export") {
            match self.flags.get(cmd) {
                Some(json) => (0, json.clone()),
                None => (1, String::new()),
            }
        } else {
            let file_name = std::path::Path::new(code)
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            match self.lint.get(&file_name) {
                Some((exit_code, stdout)) => (*exit_code, stdout.replace("{file}", code)),
                None => (0, format!("No syntax errors detected in {code}")),
            }
        };

        tokio::task::yield_now().await;

        Ok(Output {
            status: exit_status(status),
            stdout: stdout.into_bytes(),
            stderr: Vec::new(),
        })
    }
}

#[cfg(unix)]
fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw((code & 0xff) << 8)
}

#[cfg(windows)]
fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    ExitStatus::from_raw(code as u32)
}
