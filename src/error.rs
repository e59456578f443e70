use std::path::PathBuf;
use thiserror::Error;

use crate::shell::ExecError;

#[derive(Error, Debug)]
pub enum GshError {
    #[error("failed to create new ssh agent: {0}")]
    CreationFailure(ExecError),

    #[error("failed to create new ssh agent: expected exactly {expected} output lines, got {actual}")]
    MalformedCreationOutput { expected: usize, actual: usize },

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("State file {path}: {reason}")]
    StateFile { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GshError>;
