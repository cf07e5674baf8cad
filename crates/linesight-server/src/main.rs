// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

use linesight_core::MachineError;
use linesight_query::{QueryLimits, QueryService};
use linesight_server::{build_router, open_store, AppState, ServerConfig};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).expect("register SIGTERM");
        let mut sigint = signal(SignalKind::interrupt()).expect("register SIGINT");
        tokio::select! {
            _ = sigterm.recv() => {}
            _ = sigint.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

fn init_tracing(log_json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn run(config: ServerConfig) -> Result<(), MachineError> {
    let addr = config.validate()?;
    let store = open_store(&config)?;
    let limits = QueryLimits::default().with_page_size(config.page_size);
    let service = QueryService::new(Arc::new(store), limits);
    let drain = config.shutdown_drain;
    let app = build_router(AppState::new(service, config));

    let listener = TcpListener::bind(addr).await.map_err(|e| {
        MachineError::new("bind_failed", &e.to_string()).with_detail("addr", &addr.to_string())
    })?;
    info!(addr = %addr, "linesight server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            wait_for_shutdown_signal().await;
            info!(drain_ms = drain.as_millis() as u64, "shutdown requested, draining");
            tokio::time::sleep(drain).await;
        })
        .await
        .map_err(|e| MachineError::new("server_failed", &e.to_string()))
}

#[tokio::main]
async fn main() {
    let config = ServerConfig::from_env();
    init_tracing(config.log_json);
    if let Err(err) = run(config).await {
        error!(code = %err.code, details = ?err.details, "{}", err.message);
        std::process::exit(err.exit_code().code());
    }
}
