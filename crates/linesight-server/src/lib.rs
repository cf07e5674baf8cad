// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;
use linesight_query::QueryService;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;

mod config;
mod http;
mod middleware;
mod startup;

pub use config::ServerConfig;
pub use startup::open_store;

pub const CRATE_NAME: &str = "linesight-server";

#[derive(Debug, Clone)]
pub struct AppState {
    pub service: QueryService,
    pub config: Arc<ServerConfig>,
    pub(crate) request_id_seed: Arc<AtomicU64>,
}

impl AppState {
    #[must_use]
    pub fn new(service: QueryService, config: ServerConfig) -> Self {
        Self {
            service,
            config: Arc::new(config),
            request_id_seed: Arc::new(AtomicU64::new(1)),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(http::handlers::healthz_handler))
        .route("/api/inspections", get(http::handlers::inspections_handler))
        .route(
            "/api/inspections/:id",
            get(http::handlers::inspection_detail_handler),
        )
        .route("/api/summary", get(http::handlers::summary_handler))
        .route("/api/ng-pareto", get(http::handlers::pareto_handler))
        .route("/api/trend", get(http::handlers::trend_handler))
        .route("/api/units/:serial", get(http::handlers::unit_handler))
        .route(
            "/api/model-metrics",
            get(http::handlers::model_metrics_handler),
        )
        .route("/api/live-monitor", get(http::handlers::live_monitor_handler))
        .route("/api/export/csv", get(http::export::export_csv_handler))
        .route("/api/export/pdf", post(http::export::export_pdf_handler))
        .route("/api/ingest/:station", post(http::ingest::ingest_handler))
        .layer(from_fn_with_state(
            state.clone(),
            middleware::request_tracing::request_tracing_middleware,
        ))
        .layer(DefaultBodyLimit::max(state.config.max_body_bytes))
        .with_state(state)
}
