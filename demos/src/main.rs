use demos::web_user;
use stampede::prelude::*;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

const DEFAULT_HOST: &str = "http://127.0.0.1:8080";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("stampede=info")),
        )
        .init();

    let host = std::env::var("STAMPEDE_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());

    let stats = Swarm::new(web_user()?, HttpSession::new)
        .host(&host)
        .users(50)
        .spawn_rate(10)
        .duration(Duration::from_secs(30))
        .await?;

    info!("{stats}");
    Ok(())
}
