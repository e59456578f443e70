//! Decides whether the stored agent can be reused or a new one must be started.

use crate::config::Config;
use crate::error::{GshError, Result};
use crate::shell::statement::{AGENT_PID_VAR, AUTH_SOCK_VAR};
use crate::shell::{ExecError, ShellExecutor, ShellRequest, ShellResponse, Statement};
use crate::state::SessionState;
use crate::utils::shell::double_quote;

/// Lines the bootstrap snippet must print: pid, then socket path.
const BOOTSTRAP_LINES: usize = 2;

/// Entry points exposed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    /// Reuse the stored agent if it is alive, otherwise start one.
    Ensure,
    /// Terminate every agent process and forget the stored one.
    Kill,
}

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub bootstrap: String,
    pub process_name: String,
    pub add_command: String,
    pub list_command: String,
    /// Probe a reused agent for identities and add one when it has none
    pub check_identity_on_reuse: bool,
}

impl From<&Config> for SessionOptions {
    fn from(config: &Config) -> Self {
        Self {
            bootstrap: config.agent.bootstrap.clone(),
            process_name: config.agent.process_name.clone(),
            add_command: config.identity.add_command.clone(),
            list_command: config.identity.list_command.clone(),
            check_identity_on_reuse: config.identity.check_on_reuse(),
        }
    }
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

/// A failed liveness probe cannot tell "no such process" apart from "ps is
/// broken", so every failure counts as a dead agent and triggers a rebuild.
pub fn treat_probe_failure_as_absent(
    probe: std::result::Result<ShellResponse, ExecError>,
) -> bool {
    match probe {
        Ok(_) => true,
        Err(e) => {
            log::debug!("Liveness probe failed, treating agent as absent: {}", e);
            false
        }
    }
}

pub struct SessionController<'a, E: ShellExecutor + ?Sized> {
    executor: &'a E,
    options: SessionOptions,
}

impl<'a, E: ShellExecutor + ?Sized> SessionController<'a, E> {
    pub fn new(executor: &'a E, options: SessionOptions) -> Self {
        Self { executor, options }
    }

    pub fn run(
        &self,
        command: SessionCommand,
        state: &mut SessionState,
    ) -> Result<Vec<Statement>> {
        match command {
            SessionCommand::Ensure => self.ensure(state),
            SessionCommand::Kill => Ok(self.kill(state)),
        }
    }

    /// Statements pointing the shell at a live agent, starting one if needed.
    ///
    /// `state` is only modified once a new agent has been started and its
    /// output parsed; on error it is left untouched.
    pub fn ensure(&self, state: &mut SessionState) -> Result<Vec<Statement>> {
        if self.agent_alive(state) {
            log::debug!("Reusing ssh agent {}", state.agent_pid);
            let mut statements =
                Statement::agent_exports(&state.agent_pid, &state.auth_socket).to_vec();
            if self.options.check_identity_on_reuse && !self.identity_loaded(state) {
                statements.push(self.add_identity());
            }
            return Ok(statements);
        }

        let (agent_pid, auth_socket) = self.create_agent()?;
        log::debug!("Started ssh agent {} at {}", agent_pid, auth_socket);
        state.replace(agent_pid, auth_socket);

        let mut statements =
            Statement::agent_exports(&state.agent_pid, &state.auth_socket).to_vec();
        statements.push(self.add_identity());
        Ok(statements)
    }

    /// Forget the stored agent and kill every agent process by name.
    pub fn kill(&self, state: &mut SessionState) -> Vec<Statement> {
        state.clear();
        vec![Statement::Kill {
            process_name: self.options.process_name.clone(),
        }]
    }

    fn agent_alive(&self, state: &SessionState) -> bool {
        if !state.is_populated() {
            log::debug!("No complete agent in session state");
            return false;
        }

        let probe = ShellRequest::new(format!("ps -p {}", double_quote(&state.agent_pid)));
        treat_probe_failure_as_absent(self.executor.run(&probe))
    }

    /// Whether the agent reports at least one identity. Any failure means no.
    fn identity_loaded(&self, state: &SessionState) -> bool {
        let probe = ShellRequest::new(self.options.list_command.as_str())
            .with_env(AGENT_PID_VAR, state.agent_pid.as_str())
            .with_env(AUTH_SOCK_VAR, state.auth_socket.as_str());

        match self.executor.run(&probe) {
            Ok(_) => true,
            Err(e) => {
                log::debug!("Identity probe failed, adding identity: {}", e);
                false
            }
        }
    }

    fn create_agent(&self) -> Result<(String, String)> {
        let request =
            ShellRequest::new(self.options.bootstrap.as_str()).expect_lines(BOOTSTRAP_LINES);
        let response = self
            .executor
            .run(&request)
            .map_err(GshError::CreationFailure)?;

        request
            .validate(&response)
            .map_err(|m| GshError::MalformedCreationOutput {
                expected: m.expected,
                actual: m.actual,
            })?;

        let values: Vec<String> = response
            .lines
            .iter()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect();

        match <[String; BOOTSTRAP_LINES]>::try_from(values) {
            Ok([agent_pid, auth_socket]) => Ok((agent_pid, auth_socket)),
            Err(values) => Err(GshError::MalformedCreationOutput {
                expected: BOOTSTRAP_LINES,
                actual: values.len(),
            }),
        }
    }

    fn add_identity(&self) -> Statement {
        Statement::AddIdentity {
            command: self.options.add_command.clone(),
        }
    }
}
