#![cfg_attr(docsrs, feature(doc_cfg))]
//! Plain data shared by the `stampede` crates: wait policies, run configuration, run statistics
//! and the errors produced while validating them.
mod config;
mod constants;
mod error;
mod metrics;
mod stats;
mod wait;

pub use config::*;
pub use constants::*;
pub use error::*;
pub use metrics::*;
pub use stats::*;
pub use wait::*;
