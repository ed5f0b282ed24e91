//! Error types for wsconf-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from wsconf-model
    #[error(transparent)]
    Model(#[from] wsconf_model::Error),

    /// Error from wsconf-connect
    #[error(transparent)]
    Connect(#[from] wsconf_connect::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}

impl From<Vec<wsconf_vars::Error>> for CliError {
    fn from(problems: Vec<wsconf_vars::Error>) -> Self {
        let lines: Vec<String> = problems.iter().map(ToString::to_string).collect();
        Self::user(lines.join("\n"))
    }
}
