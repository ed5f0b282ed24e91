//! Error types for wsconf-vars

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(
        "Invalid key '{key}': an environment variable key can only contain letters, numbers, and the underscore character. It also can not begin with a number."
    )]
    InvalidKey { key: String },
}
