use crate::error::{GshError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Starts an agent and prints its pid then its socket path.
pub const DEFAULT_BOOTSTRAP: &str =
    r#"eval "$(ssh-agent -s)" > /dev/null && echo "$SSH_AGENT_PID" && echo "$SSH_AUTH_SOCK""#;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub agent: AgentConfig,

    #[serde(default)]
    pub identity: IdentityConfig,

    #[serde(default)]
    pub state: StateConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Process name matched by `gsh kill`
    #[serde(default = "default_process_name")]
    pub process_name: String,

    /// Snippet that starts an agent and prints its pid and socket path
    #[serde(default = "default_bootstrap")]
    pub bootstrap: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            process_name: default_process_name(),
            bootstrap: default_bootstrap(),
        }
    }
}

fn default_process_name() -> String {
    "ssh-agent".to_string()
}

fn default_bootstrap() -> String {
    DEFAULT_BOOTSTRAP.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Ask a reused agent for its identities and add one if it has none.
    /// Unset means "inherit from a lower layer", `true` at the bottom.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_on_reuse: Option<bool>,

    #[serde(default = "default_add_command")]
    pub add_command: String,

    #[serde(default = "default_list_command")]
    pub list_command: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            check_on_reuse: None,
            add_command: default_add_command(),
            list_command: default_list_command(),
        }
    }
}

impl IdentityConfig {
    pub fn check_on_reuse(&self) -> bool {
        self.check_on_reuse.unwrap_or(true)
    }
}

fn default_add_command() -> String {
    "ssh-add".to_string()
}

fn default_list_command() -> String {
    "ssh-add -l".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateConfig {
    #[serde(default = "default_state_path")]
    pub path: String,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            path: default_state_path(),
        }
    }
}

fn default_state_path() -> String {
    "~/.gsh/state.json".to_string()
}

impl Config {
    /// Load configuration with precedence:
    /// 1. Environment variables
    /// 2. File named by GSH_CONFIG
    /// 3. Global config (~/.gsh.toml)
    /// 4. Built-in defaults
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        if let Some(home) = home_dir() {
            let global_config = home.join(".gsh.toml");
            if global_config.exists() {
                config = config.merge(Self::from_file(&global_config)?);
            }
        }

        if let Ok(path) = std::env::var("GSH_CONFIG") {
            let path = crate::utils::path::expand_tilde(&path)
                .unwrap_or_else(|| PathBuf::from(&path));
            if !path.exists() {
                return Err(GshError::InvalidConfig(format!(
                    "GSH_CONFIG points to a missing file: {}",
                    path.display()
                )));
            }
            config = config.merge(Self::from_file(&path)?);
        }

        config.merge_env()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Merge another config into this one (other's non-default values win)
    fn merge(mut self, other: Self) -> Self {
        if other.agent.process_name != default_process_name() {
            self.agent.process_name = other.agent.process_name;
        }
        if other.agent.bootstrap != default_bootstrap() {
            self.agent.bootstrap = other.agent.bootstrap;
        }

        if other.identity.check_on_reuse.is_some() {
            self.identity.check_on_reuse = other.identity.check_on_reuse;
        }
        if other.identity.add_command != default_add_command() {
            self.identity.add_command = other.identity.add_command;
        }
        if other.identity.list_command != default_list_command() {
            self.identity.list_command = other.identity.list_command;
        }

        if other.state.path != default_state_path() {
            self.state.path = other.state.path;
        }

        self
    }

    /// Apply environment variable overrides
    fn merge_env(mut self) -> Result<Self> {
        if let Ok(path) = std::env::var("GSH_STATE_FILE") {
            if !path.trim().is_empty() {
                self.state.path = path;
            }
        }

        if let Ok(value) = std::env::var("GSH_CHECK_IDENTITY") {
            let enabled = parse_bool(&value).ok_or_else(|| {
                GshError::InvalidConfig(format!(
                    "GSH_CHECK_IDENTITY must be a boolean, got '{}'",
                    value
                ))
            })?;
            self.identity.check_on_reuse = Some(enabled);
        }

        Ok(self)
    }

    /// State file path with `~` expanded
    pub fn state_path(&self) -> PathBuf {
        crate::utils::path::expand_tilde(&self.state.path)
            .unwrap_or_else(|| PathBuf::from(&self.state.path))
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}
