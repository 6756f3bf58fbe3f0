use axum::{debug_handler, extract::Path, http::StatusCode, routing::get, Router};
use metrics::counter;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

pub fn router() -> Router {
    Router::new()
        .route("/", get(root))
        .route("/status/:code", get(status))
        .route("/delay/ms/:delay_ms", get(delay))
        .layer(TraceLayer::new_for_http())
}

pub async fn run(addr: SocketAddr) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Mock service listening on {}", listener.local_addr()?);
    axum::serve(listener, router()).await?;
    Ok(())
}

#[debug_handler]
pub async fn root() -> &'static str {
    hit();
    "ok"
}

#[debug_handler]
pub async fn status(Path(code): Path<u16>) -> StatusCode {
    hit();
    StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST)
}

#[debug_handler]
pub async fn delay(Path(delay_ms): Path<u64>) {
    hit();
    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
}

/** Request Counter **/

static HITS: AtomicU64 = AtomicU64::new(0);

fn hit() {
    counter!("mock-service.requests").increment(1);
    HITS.fetch_add(1, Ordering::Relaxed);
}

/// Total requests served since startup.
pub fn hits() -> u64 {
    HITS.load(Ordering::Relaxed)
}

pub async fn rps_measure_task() {
    let mut last = 0;
    loop {
        tokio::time::sleep(Duration::from_millis(1000)).await;
        let total = hits();
        debug!("{} RPS", total - last);
        last = total;
    }
}
