//! Crate-wide error type for the particle engine
//!
//! Bad configuration is rejected up front; a step that would produce a
//! non-finite state is refused without being committed.

use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Invalid scenario, parameter or spawn setting.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A step produced NaN or infinity for a particle; the step was not applied.
    #[error("non-finite state for particle {index} at step {step}")]
    NonFinite { index: usize, step: u64 },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}
