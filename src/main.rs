//! Vigil Agent — session watchdog for external-auth client shells
//!
//! Main entry point that wires the vault, route guard, and auto-logout
//! watchdog together and keeps the session honest until shutdown.

use std::sync::Arc;

use tracing;
use tracing_subscriber::{fmt, EnvFilter};

use vigil_core::config::AppConfig;
use vigil_core::error::AppError;
use vigil_core::events::{SessionEvent, SessionEvents};
use vigil_core::traits::SystemClock;
use vigil_session::{FileStore, LogoutWatchdog, SessionVault};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Agent error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("VIGIL_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main agent run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Vigil agent v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Open the session vault ───────────────────────────
    let store = FileStore::new(config.storage.session_path()).await?;
    tracing::info!(path = %store.path().display(), "Session vault opened");

    let events = SessionEvents::new();
    let vault = Arc::new(SessionVault::new(
        Arc::new(store),
        Arc::new(SystemClock),
        events.clone(),
        &config.session,
    ));

    // ── Step 2: Report current session state ─────────────────────
    if vault.is_authenticated().await {
        tracing::info!(user_id = ?vault.user_id().await, "Valid session present");
    } else {
        tracing::info!("No valid session present");
    }

    // ── Step 3: Arm the auto-logout watchdog ─────────────────────
    let watchdog = LogoutWatchdog::new(Arc::clone(&vault));
    let mut timer = if config.session.watchdog_enabled {
        watchdog.schedule().await
    } else {
        tracing::info!("Auto-logout watchdog disabled");
        None
    };

    // ── Step 4: Stream session events until shutdown ─────────────
    let mut rx = events.subscribe();
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            event = rx.recv() => {
                match event {
                    Ok(SessionEvent::SignedIn { user_id }) => {
                        tracing::info!(user_id = %user_id, "Session stored");
                        // Re-arm for the new token, disarming the old timer first.
                        if let Some(t) = timer.take() {
                            t.cancel();
                        }
                        timer = watchdog.schedule().await;
                    }
                    Ok(SessionEvent::Expired { user_id }) => {
                        tracing::warn!(user_id = ?user_id, "Session expired");
                    }
                    Ok(SessionEvent::LoggedOut { reason, redirect_to }) => {
                        tracing::info!(reason = %reason, redirect_to = %redirect_to, "Session ended");
                    }
                    Err(e) => {
                        tracing::debug!(error = %e, "Event stream lagged");
                    }
                }
            }
            _ = &mut shutdown => {
                tracing::info!("Shutdown signal received");
                break;
            }
        }
    }

    if let Some(t) = timer.take() {
        t.cancel();
    }

    tracing::info!("Vigil agent shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
