#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

// Lets `#[task]` expansions (which name `::stampede`) work inside this crate's own tests.
extern crate self as stampede;

mod error;
pub mod hook;
#[cfg(feature = "http")]
#[cfg_attr(docsrs, doc(cfg(feature = "http")))]
pub mod http;
pub mod session;
pub mod swarm;
pub mod task;
pub mod user;

pub use stampede_macros::task;

#[cfg(feature = "http")]
pub use http::HttpSession;
pub use error::SwarmError;
pub use session::{Method, Request, Response, Session, TransportError};
pub use swarm::Swarm;
pub use task::Task;
pub use url::Url;
pub use user::{TaskOrder, UserBehavior};

pub mod prelude {
    pub use crate::error::SwarmError;
    pub use crate::session::{Request, Response, Session, TransportError};
    pub use crate::swarm::Swarm;
    pub use crate::task::Task;
    pub use crate::user::{TaskOrder, UserBehavior};
    pub use stampede_core::{ConfigError, RunStatistics, WaitPolicy};
    pub use stampede_macros::task;

    #[cfg(feature = "http")]
    pub use crate::http::HttpSession;
}
