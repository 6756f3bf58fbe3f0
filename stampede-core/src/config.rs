use crate::{ConfigError, DEFAULT_RUN_NAME, DEFAULT_SPAWN_RATE, DEFAULT_USERS};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
#[allow(unused_imports)]
#[cfg(feature = "serde")]
use serde_with::{serde_as, DurationSeconds};
use std::num::NonZeroU32;
use std::time::Duration;
use url::Url;

/// Parameters of a single swarm run.
///
/// Normally filled in through the builder methods on `Swarm`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", cfg_eval::cfg_eval, serde_as)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RunConfig {
    pub name: String,
    pub host: Option<String>,
    pub users: usize,
    pub spawn_rate: NonZeroU32,
    #[cfg_attr(feature = "serde", serde_as(as = "Option<DurationSeconds>"))]
    pub duration: Option<Duration>,
    pub rps_limit: Option<NonZeroU32>,
}

impl RunConfig {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Parsed target host. Task paths are resolved against it.
    pub fn target(&self) -> Result<Url, ConfigError> {
        let host = self.host.as_deref().ok_or(ConfigError::MissingHost)?;
        Ok(Url::parse(host)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.users == 0 {
            return Err(ConfigError::NoUsers);
        }

        self.target().map(|_| ())
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_RUN_NAME.to_string(),
            host: None,
            users: DEFAULT_USERS,
            spawn_rate: DEFAULT_SPAWN_RATE,
            duration: None,
            rps_limit: None,
        }
    }
}
