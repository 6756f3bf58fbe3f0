use std::fmt;
use std::time::Duration;

/// Counters collected over a swarm run.
///
/// Only raw counts are kept; latency distributions are left to whatever `metrics` recorder is
/// installed.
#[derive(Debug, Clone, PartialEq)]
pub struct RunStatistics {
    pub name: String,
    pub users: usize,
    pub tasks: u64,
    pub task_errors: u64,
    pub requests: u64,
    pub failed_requests: u64,
    pub elapsed: Duration,
}

impl RunStatistics {
    pub fn successful_requests(&self) -> u64 {
        self.requests.saturating_sub(self.failed_requests)
    }

    pub fn failure_rate(&self) -> f64 {
        if self.requests == 0 {
            0.
        } else {
            self.failed_requests as f64 / self.requests as f64
        }
    }

    pub fn rps(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0. {
            0.
        } else {
            self.requests as f64 / secs
        }
    }
}

impl fmt::Display for RunStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Whole milliseconds keep the output readable.
        let elapsed = Duration::from_millis(self.elapsed.as_millis() as u64);
        write!(
            f,
            "{}: users={}, tasks={}, task_errors={}, requests={}, failed={}, rps={:.2}, elapsed={}",
            self.name,
            self.users,
            self.tasks,
            self.task_errors,
            self.requests,
            self.failed_requests,
            self.rps(),
            humantime::format_duration(elapsed),
        )
    }
}
