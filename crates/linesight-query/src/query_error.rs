// SPDX-License-Identifier: Apache-2.0

use linesight_model::{FieldError, ValidationError};
use linesight_store::{StoreError, StoreErrorCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum QueryErrorCode {
    Validation,
    NotFound,
    Store,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryError {
    pub code: QueryErrorCode,
    pub message: String,
    pub field_errors: Vec<FieldError>,
}

impl QueryError {
    #[must_use]
    pub fn new(code: QueryErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            field_errors: Vec::new(),
        }
    }

    #[must_use]
    pub fn not_found(kind: &str, key: &str) -> Self {
        Self::new(QueryErrorCode::NotFound, format!("{kind} not found: {key}"))
    }
}

impl std::fmt::Display for QueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for QueryError {}

impl From<ValidationError> for QueryError {
    fn from(value: ValidationError) -> Self {
        Self {
            code: QueryErrorCode::Validation,
            message: value.to_string(),
            field_errors: value.field_errors,
        }
    }
}

impl From<StoreError> for QueryError {
    fn from(value: StoreError) -> Self {
        match value.code {
            StoreErrorCode::DuplicateId => ValidationError::single("id", value.message).into(),
            StoreErrorCode::Validation => match value.validation {
                Some(fields) => fields.into(),
                None => Self::new(QueryErrorCode::Validation, value.message),
            },
            _ => Self::new(QueryErrorCode::Store, value.to_string()),
        }
    }
}
