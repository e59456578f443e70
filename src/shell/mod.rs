//! Typed protocol for the shell snippets gsh runs and the statements it prints.

pub mod executor;
pub mod statement;

pub use executor::{BashExecutor, ExecError, ShellExecutor};
pub use statement::Statement;

/// A snippet to run through a [`ShellExecutor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellRequest {
    pub contents: String,
    /// Number of stdout lines the caller requires, if any.
    pub expected_lines: Option<usize>,
    /// Echo captured stdout to the user (on stderr) instead of discarding it.
    pub forward_stdout: bool,
    pub env: Vec<(String, String)>,
}

impl ShellRequest {
    pub fn new(contents: impl Into<String>) -> Self {
        Self {
            contents: contents.into(),
            expected_lines: None,
            forward_stdout: false,
            env: Vec::new(),
        }
    }

    pub fn expect_lines(mut self, count: usize) -> Self {
        self.expected_lines = Some(count);
        self
    }

    pub fn forward_stdout(mut self, forward: bool) -> Self {
        self.forward_stdout = forward;
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Check a response against `expected_lines`.
    pub fn validate(&self, response: &ShellResponse) -> Result<(), LineCountMismatch> {
        match self.expected_lines {
            Some(expected) if response.lines.len() != expected => Err(LineCountMismatch {
                expected,
                actual: response.lines.len(),
            }),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCountMismatch {
    pub expected: usize,
    pub actual: usize,
}

/// Captured result of a successful snippet run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellResponse {
    pub lines: Vec<String>,
    pub stderr: String,
}

impl ShellResponse {
    /// Split stdout into lines, dropping trailing blank lines.
    pub fn from_output(stdout: &str, stderr: &str) -> Self {
        let mut lines: Vec<String> = stdout.lines().map(str::to_string).collect();
        while lines.last().is_some_and(|l| l.trim().is_empty()) {
            lines.pop();
        }

        Self {
            lines,
            stderr: stderr.to_string(),
        }
    }
}
