// SPDX-License-Identifier: Apache-2.0

use crate::{ApiError, ApiErrorCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiErrorMapping {
    pub status_code: u16,
}

#[must_use]
pub fn map_error(error: &ApiError) -> ApiErrorMapping {
    let status_code = match error.code {
        ApiErrorCode::InvalidQueryParameter
        | ApiErrorCode::ValidationFailed
        | ApiErrorCode::InvalidPayload
        | ApiErrorCode::StationMismatch => 400,
        ApiErrorCode::Forbidden => 403,
        ApiErrorCode::InspectionNotFound | ApiErrorCode::UnitNotFound => 404,
        ApiErrorCode::PayloadTooLarge => 413,
        _ => 500,
    };
    ApiErrorMapping { status_code }
}
