#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::todo)]
#![warn(clippy::panic)]
#![warn(clippy::dbg_macro)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(unreachable_pub)]
#![warn(missing_debug_implementations)]
#![warn(unused_qualifications)]
#![deny(unused_must_use)]

use std::net::SocketAddr;
use timeclock_server::api::AppState;
use timeclock_server::config::Config;
use timeclock_server::{api, domain, storage, telemetry};
use tokio::sync::watch;
use tracing::Instrument;

fn main() -> anyhow::Result<()> {
    // The local-offset lookup only succeeds while the process is still
    // single-threaded, so it has to happen before the runtime is built.
    domain::shift::init_local_offset();

    tokio::runtime::Builder::new_multi_thread().enable_all().build()?.block_on(run())
}

async fn run() -> anyhow::Result<()> {
    let config = Config::load();
    telemetry::init_telemetry(&config.telemetry);

    let boot_span = tracing::info_span!("boot_server");
    let (listener, router, shutdown_rx) = async {
        // Phase 1: infrastructure
        let pool = storage::init_pool(&config.database_url, &config.database).await?;
        storage::run_migrations(&pool).await?;

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        spawn_signal_handler(shutdown_tx);

        // Phase 2: component wiring
        let state = AppState::new(config.clone(), pool);
        let router = api::app_router(state);

        // Phase 3: listener
        let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
        tracing::info!(address = %addr, "listening");
        let listener = tokio::net::TcpListener::bind(addr).await?;

        Ok::<_, anyhow::Error>((listener, router, shutdown_rx))
    }
    .instrument(boot_span)
    .await?;

    let mut shutdown_rx = shutdown_rx;
    axum::serve(listener, router.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.wait_for(|&s| s).await;
        })
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn spawn_signal_handler(shutdown_tx: watch::Sender<bool>) {
    tokio::spawn(async move {
        wait_for_signal().await;
        tracing::info!("Shutdown signal received");
        let _ = shutdown_tx.send(true);
    });
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    let Ok(mut terminate) = signal(SignalKind::terminate()) else {
        let _ = tokio::signal::ctrl_c().await;
        return;
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {}
        _ = terminate.recv() => {}
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
