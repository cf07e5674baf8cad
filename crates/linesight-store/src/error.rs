// SPDX-License-Identifier: Apache-2.0

use linesight_model::ValidationError;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreErrorCode {
    DuplicateId,
    Io,
    Decode,
    Validation,
    Unavailable,
}

impl StoreErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DuplicateId => "duplicate_id",
            Self::Io => "io",
            Self::Decode => "decode",
            Self::Validation => "validation",
            Self::Unavailable => "unavailable",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    pub code: StoreErrorCode,
    pub message: String,
    pub validation: Option<ValidationError>,
}

impl StoreError {
    #[must_use]
    pub fn new(code: StoreErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            validation: None,
        }
    }

    #[must_use]
    pub fn duplicate_id(id: &str) -> Self {
        Self::new(
            StoreErrorCode::DuplicateId,
            format!("inspection id already stored: {id}"),
        )
    }

    #[must_use]
    pub fn unavailable(what: &str) -> Self {
        Self::new(
            StoreErrorCode::Unavailable,
            format!("store {what} lock poisoned"),
        )
    }
}

impl From<ValidationError> for StoreError {
    fn from(value: ValidationError) -> Self {
        Self {
            code: StoreErrorCode::Validation,
            message: value.to_string(),
            validation: Some(value),
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for StoreError {}
