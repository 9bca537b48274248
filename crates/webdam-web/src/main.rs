mod api;
mod config;
mod demo;
mod dto;
mod error;
mod state;

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use webdam_core::{HttpWebdamClient, WebdamClient};

use crate::config::ServerConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "webdam_web=debug,webdam_core=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = ServerConfig::load()?;
    let bind_addr = config.bind_addr;

    let client: Arc<dyn WebdamClient> = if config.demo {
        if config.core.bundles.is_empty() {
            config.core.bundles.push(demo::bundle());
        }
        tracing::info!("Demo mode: serving the built-in folder tree");
        Arc::new(demo::client())
    } else {
        tracing::info!("Using Webdam at {}", config.core.webdam.base_url);
        Arc::new(HttpWebdamClient::new(config.core.webdam.clone())?)
    };

    let state = AppState::new(config, client);
    let app = api::app(state);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("webdam-web listening on http://{}", bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
