use crate::hook::RequestCounters;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

/// Counters shared by every virtual user of a run.
#[derive(Clone, Default)]
pub(crate) struct UserAtomics {
    pub users: Arc<AtomicUsize>,
    pub tasks: Arc<AtomicU64>,
    pub task_errors: Arc<AtomicU64>,
    requests: RequestCounters,
}

impl UserAtomics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counters handed to sessions through the request hook.
    pub fn clone_to_request_counters(&self) -> RequestCounters {
        self.requests.clone()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            users: self.users.load(Ordering::Relaxed),
            tasks: self.tasks.load(Ordering::Relaxed),
            task_errors: self.task_errors.load(Ordering::Relaxed),
            requests: self.requests.requests.load(Ordering::Relaxed),
            failed_requests: self.requests.failures.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Snapshot {
    pub users: usize,
    pub tasks: u64,
    pub task_errors: u64,
    pub requests: u64,
    pub failed_requests: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_counters() {
        let atomics = UserAtomics::new();
        let clone = atomics.clone();
        let counters = atomics.clone_to_request_counters();

        clone.users.fetch_add(2, Ordering::Relaxed);
        clone.tasks.fetch_add(5, Ordering::Relaxed);
        clone.task_errors.fetch_add(1, Ordering::Relaxed);
        counters.requests.fetch_add(4, Ordering::Relaxed);
        counters.failures.fetch_add(1, Ordering::Relaxed);

        assert_eq!(
            atomics.snapshot(),
            Snapshot {
                users: 2,
                tasks: 5,
                task_errors: 1,
                requests: 4,
                failed_requests: 1,
            }
        );
    }
}
