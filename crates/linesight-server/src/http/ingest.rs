// SPDX-License-Identifier: Apache-2.0

use crate::http::handlers::{body_bytes, engine_error, respond};
use crate::AppState;
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use linesight_api::{parse_ingest_payload, IngestResponse};

/// Station-facing write path. Not role gated.
pub(crate) async fn ingest_handler(
    State(state): State<AppState>,
    Path(station): Path<String>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    respond(|| {
        let body = body_bytes(body, state.config.max_body_bytes)?;
        let request = parse_ingest_payload(&station, &body)?;
        let ack = state.service.ingest(request).map_err(engine_error)?;
        Ok(Json(IngestResponse {
            ok: true,
            id: ack.id,
        })
        .into_response())
    })
}
