mod config;
mod routes;
mod ticker;

use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::EnvFilter;

use lucky_core::{FileFlagProvider, RandomSource, TickEngine};

use crate::config::AppConfig;
use crate::routes::{router, AppState};
use crate::ticker::run_ticker;

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
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
    info!("shutdown requested");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cfg = AppConfig::load()?;
    let rng = Arc::new(match cfg.seed {
        Some(seed) => RandomSource::new(seed),
        None => RandomSource::from_entropy(),
    });
    info!(seed_fingerprint = %rng.seed_fingerprint(), "random source ready");

    let engine = Arc::new(TickEngine::new(rng, cfg.tick.clone(), cfg.game.clone()));
    let flags = Arc::new(FileFlagProvider::new(&cfg.flag_path, cfg.fallback_flag.clone()));
    info!(flag_path = %flags.path().display(), "flag provider configured");

    let (stop_tx, stop_rx) = watch::channel(false);
    let ticker = tokio::spawn(run_ticker(engine.clone(), stop_rx));

    let app = router(AppState { engine, flags });
    let listener = tokio::net::TcpListener::bind(&cfg.bind).await?;
    info!("listening on {}", cfg.bind);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let _ = stop_tx.send(true);
    ticker.await?;
    Ok(())
}
