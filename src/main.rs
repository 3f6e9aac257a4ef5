use std::sync::Arc;

use anyhow::{Context, Result};
use hmo_scout::refresh::Refresher;
use hmo_scout::scrapers::SyntheticGenerator;
use hmo_scout::server::{build_app, AppState};
use hmo_scout::storage::PropertyStore;
use hmo_scout::Config;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,hmo_scout=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("🏠 HMO Scout");

    let config = Config::from_env().context("Failed to load configuration")?;
    info!("Configuration loaded");

    let store = Arc::new(PropertyStore::new());
    let generator = Arc::new(SyntheticGenerator::new());
    let refresher = Arc::new(Refresher::new(store.clone(), generator, config.refresh.clone()));

    refresher.seed().await;

    let auto_refresh = if config.refresh_enabled {
        Some(refresher.start())
    } else {
        info!("Auto-refresh disabled");
        None
    };

    let app = build_app(AppState::new(store, refresher, config.filter_policy));

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("🚀 API ready on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    if let Some(handle) = auto_refresh {
        handle.stop().await;
    }

    info!("Shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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

    info!("Shutdown signal received");
}
