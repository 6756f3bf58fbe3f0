use crate::ConfigError;
use rand::Rng;
use std::fmt;
use std::time::Duration;

/// Delay applied by a virtual user after each task it executes.
///
/// The delay is sampled uniformly from the closed range `[min, max]`. A range where `min == max`
/// always yields exactly `min`.
///
/// # Example
/// ```
/// use stampede_core::WaitPolicy;
/// use std::time::Duration;
///
/// let policy = WaitPolicy::between_secs(1., 1.).unwrap();
/// assert_eq!(policy.sample(&mut rand::thread_rng()), Duration::from_secs(1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    min: Duration,
    max: Duration,
}

impl WaitPolicy {
    /// Uniformly sampled delay within `[min, max]`.
    pub fn between(min: Duration, max: Duration) -> Result<Self, ConfigError> {
        if min > max {
            return Err(ConfigError::InvertedWaitRange { min, max });
        }

        Ok(Self { min, max })
    }

    /// Same as [`WaitPolicy::between`], with bounds given in (fractional) seconds.
    pub fn between_secs(min: f64, max: f64) -> Result<Self, ConfigError> {
        Self::between(secs(min)?, secs(max)?)
    }

    /// Fixed delay.
    pub fn constant(wait: Duration) -> Self {
        Self {
            min: wait,
            max: wait,
        }
    }

    /// No delay at all between tasks.
    pub fn none() -> Self {
        Self::constant(Duration::ZERO)
    }

    pub fn min(&self) -> Duration {
        self.min
    }

    pub fn max(&self) -> Duration {
        self.max
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        if self.min == self.max {
            return self.min;
        }

        let min = nanos(self.min);
        let max = nanos(self.max);
        Duration::from_nanos(rng.gen_range(min..=max))
    }
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self::none()
    }
}

impl fmt::Display for WaitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "between({}, {})",
            humantime::format_duration(self.min),
            humantime::format_duration(self.max)
        )
    }
}

fn secs(value: f64) -> Result<Duration, ConfigError> {
    if !value.is_finite() || value < 0. {
        return Err(ConfigError::InvalidWaitSeconds(value));
    }

    Duration::try_from_secs_f64(value).map_err(|_| ConfigError::InvalidWaitSeconds(value))
}

// NOTE: Saturates for ranges beyond ~584 years.
fn nanos(dur: Duration) -> u64 {
    u64::try_from(dur.as_nanos()).unwrap_or(u64::MAX)
}
