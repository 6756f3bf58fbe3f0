use std::num::NonZeroU32;
use std::time::Duration;

/// Weight given to a task when none is declared.
pub const DEFAULT_TASK_WEIGHT: u32 = 1;

/// Number of virtual users spawned when none is configured.
pub const DEFAULT_USERS: usize = 1;

/// Users spawned per second during ramp-up when no spawn rate is configured.
pub const DEFAULT_SPAWN_RATE: NonZeroU32 = NonZeroU32::MIN;

/// Interval between ramp-up batches and progress reports.
pub const SPAWN_INTERVAL: Duration = Duration::from_secs(1);

/// Name used for runs which were not given one.
pub const DEFAULT_RUN_NAME: &str = "stampede";
