use async_trait::async_trait;
use phplint_core::types::CommandArguments;
use phplint_core::{Error, Result};
use std::process::{Output, Stdio};
use std::sync::Arc;

#[cfg(test)]
use std::collections::HashMap;
#[cfg(test)]
use std::sync::atomic::{AtomicUsize, Ordering};
#[cfg(test)]
use std::time::Duration;

/// Trait for executing external commands
/// This abstraction allows for testing without mocking by providing
/// different implementations for production and test environments
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Execute a command with the given arguments
    /// Returns the output of the command whatever its exit status;
    /// only a failure to run the process at all is an error
    async fn execute(&self, cmd: &str, args: &CommandArguments) -> Result<Output>;
}

/// Production implementation that spawns real processes
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemCommandExecutor;

impl SystemCommandExecutor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandExecutor for SystemCommandExecutor {
    async fn execute(&self, cmd: &str, args: &CommandArguments) -> Result<Output> {
        tokio::process::Command::new(cmd)
            .args(args.as_slice())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| {
                Error::command_execution(
                    cmd,
                    args.as_slice().to_vec(),
                    format!("failed to execute command: {e}"),
                    None,
                )
            })
    }
}

/// Test implementation that simulates command execution
/// This provides deterministic behavior for testing
#[cfg(test)]
#[derive(Default)]
pub struct TestCommandExecutor {
    responses: std::sync::Mutex<HashMap<String, TestResponse>>,
    calls: std::sync::Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

#[cfg(test)]
#[derive(Clone, Debug, Default)]
pub struct TestResponse {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub status_code: i32,
    /// Time the simulated process takes
    pub delay: Option<Duration>,
}

#[cfg(test)]
impl TestResponse {
    pub fn stdout(stdout: &str) -> Self {
        Self {
            stdout: stdout.as_bytes().to_vec(),
            ..Self::default()
        }
    }

    pub fn exit(status_code: i32, stdout: &str) -> Self {
        Self {
            stdout: stdout.as_bytes().to_vec(),
            status_code,
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[cfg(test)]
impl TestCommandExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(cmd: &str, args: &[String]) -> String {
        std::iter::once(cmd)
            .chain(args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn add_response(&self, cmd: &str, args: &[String], response: TestResponse) {
        let key = Self::key(cmd, args);
        if let Ok(mut responses) = self.responses.lock() {
            responses.insert(key, response);
        }
    }

    pub fn add_simple_response(&self, cmd: &str, args: &[String], stdout: &str) {
        self.add_response(cmd, args, TestResponse::stdout(stdout));
    }

    pub fn add_error_response(&self, cmd: &str, args: &[String], stderr: &str) {
        self.add_response(
            cmd,
            args,
            TestResponse {
                stderr: stderr.as_bytes().to_vec(),
                status_code: 1,
                ..TestResponse::default()
            },
        );
    }

    /// Every executed command line, in start order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Number of executed command lines ending with `suffix`
    pub fn count_calls_ending_with(&self, suffix: &str) -> usize {
        self.calls().iter().filter(|c| c.ends_with(suffix)).count()
    }

    /// Highest number of simultaneously running commands seen
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
#[async_trait]
impl CommandExecutor for TestCommandExecutor {
    async fn execute(&self, cmd: &str, args: &CommandArguments) -> Result<Output> {
        let key = Self::key(cmd, args.as_slice());
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(key.clone());
        }

        let response = self
            .responses
            .lock()
            .map_err(|e| Error::configuration(format!("Failed to lock test responses: {e}")))?
            .get(&key)
            .cloned();

        let Some(response) = response else {
            return Err(Error::command_execution(
                cmd,
                args.as_slice().to_vec(),
                format!("no test response configured for command: {key}"),
                None,
            ));
        };

        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(running, Ordering::SeqCst);
        if let Some(delay) = response.delay {
            tokio::time::sleep(delay).await;
        } else {
            tokio::task::yield_now().await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        Ok(Output {
            status: exit_status::from_code(response.status_code),
            stdout: response.stdout,
            stderr: response.stderr,
        })
    }
}

/// Factory for creating command executors
pub struct CommandExecutorFactory;

impl CommandExecutorFactory {
    /// Create a production command executor
    pub fn system() -> Arc<dyn CommandExecutor> {
        Arc::new(SystemCommandExecutor::new())
    }

    /// Create a test command executor
    #[cfg(test)]
    pub fn test() -> TestCommandExecutor {
        TestCommandExecutor::new()
    }
}
