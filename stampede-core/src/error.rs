use std::time::Duration;
use thiserror::Error;

/// Errors raised while validating a user behavior or a run configuration.
///
/// All of these are detected before any virtual user is spawned.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Wait range is inverted: min {min:?} is greater than max {max:?}")]
    InvertedWaitRange { min: Duration, max: Duration },

    #[error("Wait time must be a finite, non-negative number of seconds, got {0}")]
    InvalidWaitSeconds(f64),

    #[error("User behavior `{0}` declares no tasks")]
    NoTasks(String),

    #[error("Task `{0}` has a weight of zero")]
    ZeroWeight(&'static str),

    #[error("Invalid task weights: {0}")]
    InvalidWeights(String),

    #[error("User count must be greater than zero")]
    NoUsers,

    #[error("No target host configured")]
    MissingHost,

    #[error("Invalid target host: {0}")]
    InvalidHost(#[from] url::ParseError),
}
