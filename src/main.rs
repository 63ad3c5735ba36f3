mod api;
mod core;
mod infra;
mod models;

#[cfg(test)]
mod testing;

use anyhow::Context;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::core::aggregator::Aggregator;
use crate::infra::config::AppConfig;
use crate::infra::upstream::FilloutClient;

pub mod ax_state {
    use super::*;
    pub struct AppState {
        pub aggregator: Aggregator,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env()?;
    info!(?config, "配置加载完成");

    let client = FilloutClient::new(&config.upstream).context("failed to build upstream client")?;
    let state = Arc::new(ax_state::AppState {
        aggregator: Aggregator::new(Arc::new(client)).with_max_pages(config.max_pages),
    });

    let app = api::router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("🚀 Filtered responses 服务运行在 http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
