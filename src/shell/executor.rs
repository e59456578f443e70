use super::{ShellRequest, ShellResponse};
use std::io::{self, Write};
use std::process::Command;
use thiserror::Error;

/// Lines prepended to every snippet so the first failing command fails the run.
const PRELUDE: &str = "set -e\nset -o pipefail\n";

#[derive(Error, Debug)]
pub enum ExecError {
    #[error("failed to execute bash command: {0}")]
    Spawn(#[from] std::io::Error),

    /// Captured stderr is kept for logging only, never displayed.
    #[error("failed to execute bash command: {}", describe_status(.code))]
    Status { code: Option<i32>, stderr: String },
}

fn describe_status(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {}", code),
        None => "terminated by signal".to_string(),
    }
}

/// Echo a snippet's stdout to the user.
fn forward_output<W: Write>(out: &mut W, stdout: &str) -> io::Result<()> {
    out.write_all(stdout.as_bytes())?;
    out.flush()
}

/// Runs shell snippets and captures their output.
pub trait ShellExecutor {
    fn run(&self, request: &ShellRequest) -> Result<ShellResponse, ExecError>;
}

/// Executes snippets with `bash -c`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BashExecutor;

impl BashExecutor {
    fn script(request: &ShellRequest) -> String {
        format!("{}{}", PRELUDE, request.contents)
    }
}

impl ShellExecutor for BashExecutor {
    fn run(&self, request: &ShellRequest) -> Result<ShellResponse, ExecError> {
        log::debug!("Running shell snippet: {}", request.contents);

        let output = Command::new("bash")
            .arg("-c")
            .arg(Self::script(request))
            .envs(request.env.iter().cloned())
            .output()?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        if request.forward_stdout && !stdout.is_empty() {
            if let Err(e) = forward_output(&mut io::stderr(), &stdout) {
                log::debug!("Could not forward snippet output: {}", e);
            }
        }

        if !output.status.success() {
            log::debug!(
                "Shell snippet failed with status {:?}: {}",
                output.status.code(),
                stderr.trim()
            );
            return Err(ExecError::Status {
                code: output.status.code(),
                stderr: stderr.into_owned(),
            });
        }

        Ok(ShellResponse::from_output(&stdout, &stderr))
    }
}
