use crate::session::TransportError;
use stampede_core::ConfigError;
use thiserror::Error;

/// Errors that stop a swarm from running.
#[derive(Debug, Error)]
pub enum SwarmError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to create a session for user {user}: {source}")]
    Session {
        user: usize,
        #[source]
        source: TransportError,
    },
}
