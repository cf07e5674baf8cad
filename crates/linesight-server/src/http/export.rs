// SPDX-License-Identifier: Apache-2.0

use crate::http::handlers::{
    authorize_view, body_bytes, data_response, engine_error, query_map, respond,
};
use crate::AppState;
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use linesight_api::{parse_list_params, parse_pdf_export, render_csv, View};
use std::collections::HashMap;
use tracing::info;

const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";
const CSV_DISPOSITION: &str = "attachment; filename=\"inspections.csv\"";

/// Every matching inspection, newest first. The cursor is accepted and ignored.
pub(crate) async fn export_csv_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    respond(|| {
        authorize_view(&headers, View::Inspections)?;
        let params = parse_list_params(&query_map(params))?;
        let events = state
            .service
            .export_inspections(&params.filter)
            .map_err(engine_error)?;
        let body = render_csv(&events);
        Ok((
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, CSV_CONTENT_TYPE),
                (header::CONTENT_DISPOSITION, CSV_DISPOSITION),
            ],
            body,
        )
            .into_response())
    })
}

pub(crate) async fn export_pdf_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    respond(|| {
        authorize_view(&headers, View::Inspections)?;
        let body = body_bytes(body, state.config.max_body_bytes)?;
        let job = parse_pdf_export(&body)?;
        info!(job_id = %job.job_id, "pdf export queued");
        Ok(data_response(StatusCode::ACCEPTED, job))
    })
}
