#![allow(unused)]

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::error;
use tracing_subscriber::FmtSubscriber;

pub const MOCK_ADDR: &str = "127.0.0.1:3002";

pub async fn init() {
    static ONCE_LOCK: OnceLock<()> = OnceLock::new();

    let wait = ONCE_LOCK.get().is_none();

    ONCE_LOCK.get_or_init(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            default_panic(info);
            error!("Panic occurred: {info:?}");
            std::process::exit(1);
        }));

        FmtSubscriber::builder()
            .with_env_filter("stampede=debug,mock_service=debug")
            .init();

        // NOTE: Each test owns its own runtime, so the mock service gets a dedicated one that
        // outlives them all.
        std::thread::spawn(|| {
            let rt = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .unwrap();

            rt.block_on(async {
                PrometheusBuilder::new()
                    .with_http_listener("127.0.0.1:8002".parse::<SocketAddr>().unwrap())
                    .install()
                    .unwrap();

                let addr: SocketAddr = MOCK_ADDR.parse().unwrap();
                if let Err(err) = mock_service::run(addr).await {
                    error!("Mock service failed: {err}");
                }
            });
        });
    });

    if wait {
        tokio::time::sleep(Duration::from_millis(200)).await;
    }
}
