//! Request accounting shared between sessions and the swarm.
use crate::session::{Response, TransportError};
use stampede_core::RequestLabels;
use std::future::Future;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
#[cfg(feature = "metrics")]
use std::time::Instant;

/// Record a single request issued by a session.
///
/// Inside a running swarm the request is counted towards the run's statistics, and a request is
/// considered failed when it errors or returns a non-2xx status. Outside of a swarm (e.g. a task
/// invoked directly from a unit test) the request is simply awaited.
pub async fn record_request<T>(labels: RequestLabels, request: T) -> T::Output
where
    T: Future<Output = Result<Response, TransportError>>,
{
    let Ok(hook) = REQUEST_HOOK.try_with(|v| v.clone()) else {
        tracing::trace!("No request hook available.");
        return request.await;
    };

    #[cfg(feature = "metrics")]
    let start = Instant::now();

    let res = request.await;

    #[cfg(feature = "metrics")]
    {
        metrics::histogram!(labels.latency).record(start.elapsed().as_secs_f64());
    }

    hook.requests.fetch_add(1, Ordering::Relaxed);
    let success = matches!(&res, Ok(response) if response.is_success());
    if success {
        #[cfg(feature = "metrics")]
        metrics::counter!(labels.success).increment(1);
    } else {
        hook.failures.fetch_add(1, Ordering::Relaxed);
        #[cfg(feature = "metrics")]
        metrics::counter!(labels.error).increment(1);
    }

    #[cfg(not(feature = "metrics"))]
    let _ = labels;

    res
}

#[derive(Clone, Default)]
pub(crate) struct RequestCounters {
    pub requests: Arc<AtomicU64>,
    pub failures: Arc<AtomicU64>,
}

tokio::task_local! {
    pub(crate) static REQUEST_HOOK: RequestCounters;
}
