use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use item_store::{http, Config, JsonFileStore, RecordStore};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = Config::parse();
    let store = Arc::new(JsonFileStore::open(&config.data_file));

    // Surface an unreadable or malformed file at startup instead of on the first request.
    let existing = store
        .list()
        .with_context(|| format!("failed to read {}", config.data_file.display()))?;
    info!(
        data_file = %config.data_file.display(),
        records = existing.len(),
        "record store opened"
    );

    http::serve_with_shutdown(store, config.bind_addr, shutdown_signal())
        .await
        .with_context(|| format!("server error on {}", config.bind_addr))?;

    info!("item API stopped");
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("item_store=debug,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "unable to install ctrl+c handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "unable to install sigterm handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
