use super::user_atomics::UserAtomics;
use crate::session::Session;
use crate::user::UserBehavior;
use governor::DefaultDirectRateLimiter;
use rand::rngs::SmallRng;
use rand::SeedableRng;
#[cfg(feature = "metrics")]
use stampede_core::{TASK_ERROR, TASK_SUCCESS};
use std::sync::atomic::Ordering;
use std::sync::Arc;
#[allow(unused)]
use tracing::{debug, error, info, trace, warn};

/// A single simulated client: owns its session and loops over the shared behavior until aborted.
pub(crate) struct VirtualUser<S> {
    id: usize,
    behavior: Arc<UserBehavior<S>>,
    session: S,
    atomics: UserAtomics,
    limiter: Option<Arc<DefaultDirectRateLimiter>>,
}

impl<S: Session> VirtualUser<S> {
    pub fn new(
        id: usize,
        behavior: Arc<UserBehavior<S>>,
        session: S,
        atomics: UserAtomics,
        limiter: Option<Arc<DefaultDirectRateLimiter>>,
    ) -> Self {
        Self {
            id,
            behavior,
            session,
            atomics,
            limiter,
        }
    }

    /// Pick, execute, wait, repeat. Never returns; the swarm aborts the task at run end.
    pub async fn run(self) {
        let mut rng = SmallRng::from_entropy();
        let mut picker = self.behavior.picker();
        trace!("User {} started", self.id);

        loop {
            if let Some(limiter) = &self.limiter {
                limiter.until_ready().await;
            }

            let task = picker.next(&self.behavior, &mut rng);
            let res = task.run(&self.session).await;
            self.atomics.tasks.fetch_add(1, Ordering::Relaxed);

            match res {
                Ok(()) => {
                    #[cfg(feature = "metrics")]
                    metrics::counter!(TASK_SUCCESS, "task" => task.name()).increment(1);
                }
                Err(err) => {
                    self.atomics.task_errors.fetch_add(1, Ordering::Relaxed);
                    debug!("User {} task `{}` failed: {err}", self.id, task.name());
                    #[cfg(feature = "metrics")]
                    metrics::counter!(TASK_ERROR, "task" => task.name()).increment(1);
                }
            }

            let wait = self.behavior.wait_time().sample(&mut rng);
            if !wait.is_zero() {
                tokio::time::sleep(wait).await;
            } else {
                // Zero-wait behaviors must still let other users run.
                tokio::task::yield_now().await;
            }
        }
    }
}
