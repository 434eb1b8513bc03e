use anyhow::{Context, Result};
use std::sync::Arc;

use crate::config::Config;
use crate::store::{self, LedgerStore};
use crate::web::{self, AppState};

pub(crate) async fn as_server(config: &Config) -> Result<()> {
    let store: Arc<dyn LedgerStore> = Arc::from(store::open_store(&config.ledger_path));
    let state = AppState::new(store.clone())?;
    let app = web::app().with_state(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    tracing::info!(
        addr = %listener.local_addr()?,
        ledger = %store.describe(),
        "expense dashboard listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;
    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "could not listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
