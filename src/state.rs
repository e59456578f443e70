use crate::error::{GshError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// The agent gsh manages for the current session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default)]
    pub agent_pid: String,

    #[serde(default)]
    pub auth_socket: String,

    /// Set when this invocation replaced or cleared the agent (not stored on disk)
    #[serde(skip)]
    changed: bool,
}

impl SessionState {
    pub fn new(agent_pid: impl Into<String>, auth_socket: impl Into<String>) -> Self {
        Self {
            agent_pid: agent_pid.into(),
            auth_socket: auth_socket.into(),
            changed: false,
        }
    }

    /// Both fields are set, so the agent is worth probing.
    pub fn is_populated(&self) -> bool {
        !self.agent_pid.trim().is_empty() && !self.auth_socket.trim().is_empty()
    }

    pub fn changed(&self) -> bool {
        self.changed
    }

    /// Point the session at a freshly started agent.
    pub fn replace(&mut self, agent_pid: String, auth_socket: String) {
        self.agent_pid = agent_pid;
        self.auth_socket = auth_socket;
        self.changed = true;
    }

    pub fn clear(&mut self) {
        self.agent_pid.clear();
        self.auth_socket.clear();
        self.changed = true;
    }
}

/// JSON file holding the [`SessionState`] between invocations.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored state. A missing file is an empty session.
    pub fn load(&self) -> Result<SessionState> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No state file at {}", self.path.display());
                return Ok(SessionState::default());
            }
            Err(e) => return Err(self.error(e.to_string())),
        };

        if content.trim().is_empty() {
            return Ok(SessionState::default());
        }

        serde_json::from_str(&content).map_err(|e| self.error(e.to_string()))
    }

    /// Write the state with restricted permissions (0600).
    pub fn save(&self, state: &SessionState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let content =
            serde_json::to_string_pretty(state).map_err(|e| self.error(e.to_string()))?;
        fs::write(&self.path, content)?;

        #[cfg(unix)]
        fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;

        log::debug!("Saved session state to {}", self.path.display());
        Ok(())
    }

    fn error(&self, reason: String) -> GshError {
        GshError::StateFile {
            path: self.path.clone(),
            reason,
        }
    }
}
