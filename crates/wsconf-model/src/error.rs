//! Error types for wsconf-model

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Malformed contract '{contract}': {reason}")]
    MalformedContract { contract: String, reason: String },

    #[error(
        "Invalid connection name '{name}': can only contain the characters 'a'-'z', '0'-'9', '-', '_', '/'"
    )]
    InvalidConnectionName { name: String },

    #[error("Invalid value for {name}: '{value}'")]
    InvalidEnvVar { name: String, value: String },

    #[error("Configuration not found at {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Invalid configuration at {path}: {message}")]
    InvalidConfig { path: PathBuf, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}
