//! Swarm driver and run configuration
mod timer;
mod user_atomics;
mod virtual_user;

use crate::error::SwarmError;
use crate::hook::REQUEST_HOOK;
use crate::session::{Session, TransportError};
use crate::user::UserBehavior;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use stampede_core::{RunConfig, RunStatistics, SPAWN_INTERVAL};
#[cfg(feature = "metrics")]
use stampede_core::USERS_GAUGE;
use std::{
    future::Future,
    num::NonZeroU32,
    pin::Pin,
    sync::{atomic::Ordering, Arc},
    task::{Context, Poll},
    time::Duration,
};
use timer::Timer;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use url::Url;
use user_atomics::UserAtomics;
use virtual_user::VirtualUser;
#[allow(unused_imports)]
use tracing::{debug, error, info, instrument, trace, warn, Instrument};

type SessionFactory<S> = dyn Fn(&Url) -> Result<S, TransportError> + Send + Sync;
type RunnerFuture = Pin<Box<dyn Future<Output = Result<RunStatistics, SwarmError>> + Send>>;

/// Runs a [`UserBehavior`] with many concurrent virtual users.
///
/// Each virtual user gets its own session, built by the session factory from the target host.
/// A factory error stops the run and aborts the users spawned so far.
/// Awaiting the swarm validates its configuration, ramps up users, and returns the run's
/// counters once the configured duration has elapsed. Without a duration the swarm runs until
/// the future is dropped.
///
/// # Example
/// ```ignore
/// use stampede::prelude::*;
/// use std::time::Duration;
///
/// #[tokio::main]
/// async fn main() {
///     let stats = Swarm::new(web_user().unwrap(), HttpSession::new)
///         .host("http://127.0.0.1:8080")
///         .users(100)
///         .spawn_rate(10)
///         .duration(Duration::from_secs(30))
///         .await
///         .unwrap();
///     println!("{stats}");
/// }
/// ```
#[pin_project::pin_project]
pub struct Swarm<S> {
    behavior: Arc<UserBehavior<S>>,
    factory: Arc<SessionFactory<S>>,
    runner_fut: Option<RunnerFuture>,
    config: RunConfig,
}

impl<S: Session> Swarm<S> {
    pub fn new<F>(behavior: UserBehavior<S>, factory: F) -> Self
    where
        F: Fn(&Url) -> Result<S, TransportError> + Send + Sync + 'static,
    {
        let config = RunConfig::new(behavior.name());
        Self {
            behavior: Arc::new(behavior),
            factory: Arc::new(factory),
            runner_fut: None,
            config,
        }
    }

    /// Name used in logs and statistics. Defaults to the behavior's name.
    pub fn name(mut self, name: &str) -> Self {
        self.config.name = name.to_string();
        self
    }

    /// Base URL every task path is resolved against, e.g. `http://127.0.0.1:8080`.
    pub fn host(mut self, host: &str) -> Self {
        self.config.host = Some(host.to_string());
        self
    }

    /// Total number of virtual users.
    pub fn users(mut self, users: usize) -> Self {
        self.config.users = users;
        self
    }

    /// Users spawned per second during ramp-up. Zero is treated as one.
    pub fn spawn_rate(mut self, spawn_rate: u32) -> Self {
        self.config.spawn_rate = NonZeroU32::new(spawn_rate).unwrap_or(NonZeroU32::MIN);
        self
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.config.duration = Some(duration);
        self
    }

    /// Cap on task executions per second, shared by all users.
    pub fn rps_limit(mut self, rps: NonZeroU32) -> Self {
        self.config.rps_limit = Some(rps);
        self
    }

    /// Replace the whole configuration at once.
    pub fn config(mut self, config: RunConfig) -> Self {
        self.config = config;
        self
    }

    pub fn run_config(&self) -> &RunConfig {
        &self.config
    }
}

impl<S: Session> Future for Swarm<S> {
    type Output = Result<RunStatistics, SwarmError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let runner = this.runner_fut.get_or_insert_with(|| {
            let behavior = this.behavior.clone();
            let factory = this.factory.clone();
            let config = this.config.clone();
            Box::pin(run_swarm(behavior, factory, config))
        });

        runner.as_mut().poll(cx)
    }
}

#[instrument(name = "swarm", skip_all, fields(name = %config.name))]
pub(crate) async fn run_swarm<S: Session>(
    behavior: Arc<UserBehavior<S>>,
    factory: Arc<SessionFactory<S>>,
    config: RunConfig,
) -> Result<RunStatistics, SwarmError> {
    config.validate()?;
    let target = config.target()?;

    info!(
        "Running {} with {} users at {}/s against {target}, wait {}",
        config.name,
        config.users,
        config.spawn_rate,
        behavior.wait_time()
    );

    let atomics = UserAtomics::new();
    let limiter = config.rps_limit.map(|rps| Arc::new(rate_limiter(rps)));

    let start = Instant::now();
    let deadline = config.duration.map(|d| start + d);
    let mut users: Vec<JoinHandle<()>> = Vec::new();
    let mut timer = Timer::new(SPAWN_INTERVAL).await;
    debug!("Spawning and reporting every {timer}");
    let mut last_requests = 0;

    // NOTE: Users are only spawned on tick boundaries, so the first batch starts immediately.
    loop {
        if users.len() < config.users {
            let batch = (config.spawn_rate.get() as usize).min(config.users - users.len());
            users.reserve(batch);
            for _ in 0..batch {
                let id = users.len();
                let session = match (*factory)(&target) {
                    Ok(session) => session,
                    Err(source) => {
                        error!("Failed to create session for user {id}: {source}");
                        abort_all(&mut users);
                        return Err(SwarmError::Session { user: id, source });
                    }
                };
                let user = VirtualUser::new(
                    id,
                    behavior.clone(),
                    session,
                    atomics.clone(),
                    limiter.clone(),
                );
                users.push(tokio::spawn(
                    REQUEST_HOOK
                        .scope(atomics.clone_to_request_counters(), user.run())
                        .in_current_span(),
                ));
            }
            atomics.users.store(users.len(), Ordering::Relaxed);
            #[cfg(feature = "metrics")]
            metrics::gauge!(USERS_GAUGE).set(users.len() as f64);

            info!("Spawned {} out of {} users", users.len(), config.users);
            if users.len() == config.users {
                info!("Finished spawning users");
            }
        }

        let elapsed = match deadline {
            Some(deadline) => tokio::select! {
                elapsed = timer.tick() => elapsed,
                _ = tokio::time::sleep_until(deadline) => break,
            },
            None => timer.tick().await,
        };

        let snapshot = atomics.snapshot();
        let rps = (snapshot.requests - last_requests) as f64 / elapsed.as_secs_f64();
        last_requests = snapshot.requests;
        debug!("Executed {} requests | {rps:.0} RPS", snapshot.requests);
    }

    info!("Shutting down {} users", users.len());
    abort_all(&mut users);

    let snapshot = atomics.snapshot();
    let stats = RunStatistics {
        name: config.name.clone(),
        users: snapshot.users,
        tasks: snapshot.tasks,
        task_errors: snapshot.task_errors,
        requests: snapshot.requests,
        failed_requests: snapshot.failed_requests,
        elapsed: start.elapsed(),
    };

    info!("Swarm complete: {stats}");
    Ok(stats)
}

fn abort_all(users: &mut Vec<JoinHandle<()>>) {
    for handle in users.drain(..) {
        handle.abort();
    }
    #[cfg(feature = "metrics")]
    metrics::gauge!(USERS_GAUGE).set(0.);
}

fn rate_limiter(rps: NonZeroU32) -> DefaultDirectRateLimiter {
    RateLimiter::direct(Quota::per_second(rps).allow_burst(NonZeroU32::MIN))
}
