//! Variable interpolation for wsconf
//!
//! - [`EnvVars`]: the interpolation corpus and its derived views
//! - [`hash`]: value and keys-only content digests
//! - [`keys`]: key validation and secret-key inference
//! - [`ResolvedVariables`]: everything a caller reads after interpolation
//!
//! Interpolation never fails: a token naming an unknown variable stays as
//! literal text.

pub mod env_vars;
pub mod error;
pub mod hash;
pub mod keys;
pub mod resolved;

pub use env_vars::{EnvVar, EnvVars};
pub use error::{Error, Result};
pub use keys::{InferredSecretKeys, infer_secret_keys, validate_keys};
pub use resolved::ResolvedVariables;
