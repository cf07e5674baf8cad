// SPDX-License-Identifier: Apache-2.0

use linesight_model::FieldError;
use linesight_query::{QueryError, QueryErrorCode};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ApiErrorCode {
    InvalidQueryParameter,
    ValidationFailed,
    InvalidPayload,
    StationMismatch,
    InspectionNotFound,
    UnitNotFound,
    Forbidden,
    PayloadTooLarge,
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
    pub details: Value,
}

impl ApiError {
    #[must_use]
    pub fn new(code: ApiErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
        }
    }

    #[must_use]
    pub fn invalid_param(name: &str, value: &str) -> Self {
        Self::invalid_params(vec![param_error(name, "invalid", value)])
    }

    #[must_use]
    pub(crate) fn invalid_params(field_errors: Vec<Value>) -> Self {
        let message = match field_errors.first().and_then(|e| e["parameter"].as_str()) {
            Some(name) if field_errors.len() == 1 => format!("invalid query parameter: {name}"),
            _ => format!("{} invalid query parameters", field_errors.len()),
        };
        Self::new(
            ApiErrorCode::InvalidQueryParameter,
            message,
            json!({"field_errors": field_errors}),
        )
    }

    #[must_use]
    pub fn validation_failed(field_errors: &[FieldError]) -> Self {
        Self::new(
            ApiErrorCode::ValidationFailed,
            "validation failed",
            json!({"field_errors": field_errors}),
        )
    }

    #[must_use]
    pub fn invalid_payload(reason: &str) -> Self {
        Self::new(
            ApiErrorCode::InvalidPayload,
            "invalid JSON payload",
            json!({"reason": reason}),
        )
    }

    #[must_use]
    pub fn station_mismatch(route: &str, payload: &str) -> Self {
        Self::new(
            ApiErrorCode::StationMismatch,
            format!("station mismatch: URL expects {route}, payload provided {payload}"),
            json!({"route_station": route, "payload_station": payload}),
        )
    }

    #[must_use]
    pub fn forbidden(role: &str, view: &str) -> Self {
        Self::new(
            ApiErrorCode::Forbidden,
            format!("role {role} may not access {view}"),
            json!({"role": role, "view": view}),
        )
    }

    #[must_use]
    pub fn payload_too_large(limit: usize) -> Self {
        Self::new(
            ApiErrorCode::PayloadTooLarge,
            "request body exceeds limit",
            json!({"max_body_bytes": limit}),
        )
    }

    #[must_use]
    pub fn internal(message: &str) -> Self {
        Self::new(ApiErrorCode::Internal, message, json!({}))
    }

    /// Converts an engine error; `not_found` picks the code for a missing record.
    #[must_use]
    pub fn from_query(err: QueryError, not_found: ApiErrorCode) -> Self {
        match err.code {
            QueryErrorCode::Validation => Self::validation_failed(&err.field_errors),
            QueryErrorCode::NotFound => Self::new(not_found, err.message, json!({})),
            _ => Self::internal(&err.message),
        }
    }
}

pub(crate) fn param_error(name: &str, reason: &str, value: &str) -> Value {
    json!({"parameter": name, "reason": reason, "value": value})
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
