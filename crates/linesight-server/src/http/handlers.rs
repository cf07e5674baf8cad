// SPDX-License-Identifier: Apache-2.0

use crate::AppState;
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use linesight_api::{
    authorize, map_error, parse_base_filter, parse_list_params, parse_role, ApiError,
    ApiErrorCode, ApiResponseEnvelope, PaginatedEnvelope, View, ROLE_HEADER,
};
use linesight_query::QueryError;
use serde::Serialize;
use serde_json::json;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, error};

pub(crate) fn api_error_response(err: ApiError) -> Response {
    let status = StatusCode::from_u16(map_error(&err).status_code)
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        error!(code = ?err.code, message = %err.message, "request failed");
    } else {
        debug!(code = ?err.code, message = %err.message, "request rejected");
    }
    (status, Json(json!({"error": err}))).into_response()
}

pub(crate) fn respond(handler: impl FnOnce() -> Result<Response, ApiError>) -> Response {
    handler().unwrap_or_else(api_error_response)
}

pub(crate) fn data_response<T: Serialize>(status: StatusCode, data: T) -> Response {
    (status, Json(ApiResponseEnvelope { data })).into_response()
}

/// Rejects the request unless the caller's role may read `view`.
pub(crate) fn authorize_view(headers: &HeaderMap, view: View) -> Result<(), ApiError> {
    let raw = headers
        .get(ROLE_HEADER)
        .map(|v| v.to_str().unwrap_or("<non-utf8>"));
    authorize(parse_role(raw)?, view)
}

pub(crate) fn query_map(params: HashMap<String, String>) -> BTreeMap<String, String> {
    params.into_iter().collect()
}

/// Engine errors on routes without a record lookup.
pub(crate) fn engine_error(err: QueryError) -> ApiError {
    ApiError::from_query(err, ApiErrorCode::Internal)
}

pub(crate) fn body_bytes(
    body: Result<Bytes, BytesRejection>,
    limit: usize,
) -> Result<Bytes, ApiError> {
    body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::payload_too_large(limit)
        } else {
            ApiError::invalid_payload(&rejection.body_text())
        }
    })
}

pub(crate) async fn healthz_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

pub(crate) async fn inspections_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    respond(|| {
        authorize_view(&headers, View::Inspections)?;
        let params = parse_list_params(&query_map(params))?;
        let page = state
            .service
            .list_inspections(&params.filter, params.cursor.as_deref())
            .map_err(engine_error)?;
        Ok(Json(PaginatedEnvelope::from(page)).into_response())
    })
}

pub(crate) async fn inspection_detail_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    respond(|| {
        authorize_view(&headers, View::Inspections)?;
        let event = state
            .service
            .get_inspection(&id)
            .map_err(|e| ApiError::from_query(e, ApiErrorCode::InspectionNotFound))?;
        Ok(data_response(StatusCode::OK, event))
    })
}

pub(crate) async fn summary_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    respond(|| {
        authorize_view(&headers, View::Overview)?;
        let filter = parse_base_filter(&query_map(params))?;
        let summary = state.service.summarize(&filter).map_err(engine_error)?;
        Ok(data_response(StatusCode::OK, summary))
    })
}

pub(crate) async fn pareto_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    respond(|| {
        authorize_view(&headers, View::Overview)?;
        let filter = parse_base_filter(&query_map(params))?;
        let points = state.service.pareto(&filter).map_err(engine_error)?;
        Ok(data_response(StatusCode::OK, points))
    })
}

pub(crate) async fn trend_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    respond(|| {
        authorize_view(&headers, View::Overview)?;
        let filter = parse_base_filter(&query_map(params))?;
        let points = state.service.trend(&filter).map_err(engine_error)?;
        Ok(data_response(StatusCode::OK, points))
    })
}

pub(crate) async fn unit_handler(
    State(state): State<AppState>,
    Path(serial): Path<String>,
    headers: HeaderMap,
) -> Response {
    respond(|| {
        authorize_view(&headers, View::Units)?;
        let timeline = state
            .service
            .unit_timeline(&serial)
            .map_err(|e| ApiError::from_query(e, ApiErrorCode::UnitNotFound))?;
        Ok(data_response(StatusCode::OK, timeline))
    })
}

pub(crate) async fn model_metrics_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    respond(|| {
        authorize_view(&headers, View::ModelMetrics)?;
        let filter = parse_base_filter(&query_map(params))?;
        let metrics = state.service.model_metrics(&filter).map_err(engine_error)?;
        Ok(data_response(StatusCode::OK, metrics))
    })
}

pub(crate) async fn live_monitor_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    respond(|| {
        authorize_view(&headers, View::LiveMonitor)?;
        let snapshot = state.service.live_snapshot().map_err(engine_error)?;
        Ok(data_response(StatusCode::OK, snapshot))
    })
}
