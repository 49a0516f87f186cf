//! Payslip Engine HTTP server.
//!
//! Reads `HOST`, `PORT` and `INDICATORS_DIR` from the environment, loads the
//! indicator store, and serves the API.

use anyhow::Context;
use payslip_engine::api::{AppState, create_router};
use payslip_engine::config::{IndicatorStore, ServerSettings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "payslip_engine=info".into()),
        )
        .init();

    let settings = ServerSettings::from_env().context("reading server settings")?;
    let store = IndicatorStore::load(&settings.indicators_dir).with_context(|| {
        format!(
            "loading indicators from {}",
            settings.indicators_dir.display()
        )
    })?;

    let app = create_router(AppState::new(store));

    let addr = settings.bind_addr()?;
    tracing::info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
