// SPDX-License-Identifier: Apache-2.0

use crate::{
    Features, InspectionResult, Instant, NgCategory, NgCode, Severity, Station, ValidationError,
};
use serde::{Deserialize, Serialize};

/// One camera inspection of one unit at one station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct InspectionEvent {
    pub id: String,
    pub serial: String,
    pub work_order: String,
    pub station: Station,
    pub line: String,
    pub model: String,
    pub model_version: String,
    pub captured_at: Instant,
    pub result: InspectionResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ng_code: Option<NgCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ng_category: Option<NgCategory>,
    pub severity: Severity,
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    pub cycle_time_sec: f64,
    pub image_uri: String,
    pub features: Features,
}

impl InspectionEvent {
    #[must_use]
    pub fn is_ng(&self) -> bool {
        self.result == InspectionResult::Ng
    }

    /// Checks every record-level invariant and reports all violations at once.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = ValidationError::default();
        for (field, value) in [
            ("id", &self.id),
            ("serial", &self.serial),
            ("workOrder", &self.work_order),
            ("line", &self.line),
            ("model", &self.model),
            ("modelVersion", &self.model_version),
            ("imageUri", &self.image_uri),
        ] {
            if value.trim().is_empty() {
                errors.push(field, "must not be empty");
            }
        }
        if let Some(operator) = &self.operator {
            if operator.trim().is_empty() {
                errors.push("operator", "must not be empty when present");
            }
        }
        if !self.confidence.is_finite() || !(0.0..=1.0).contains(&self.confidence) {
            errors.push("confidence", "must be within [0, 1]");
        }
        if !self.cycle_time_sec.is_finite() || self.cycle_time_sec < 0.0 {
            errors.push("cycleTimeSec", "must be a non-negative number");
        }
        match (self.result, self.ng_code) {
            (InspectionResult::Ng, None) => errors.push("ngCode", "required when result is NG"),
            (InspectionResult::Ok, Some(_)) => {
                errors.push("ngCode", "must be absent when result is OK");
            }
            _ => {}
        }
        match (self.ng_code, self.ng_category) {
            (Some(code), Some(category)) if code.category() != category => errors.push(
                "ngCategory",
                format!("{code} belongs to {}, not {category}", code.category()),
            ),
            (Some(_), None) => errors.push("ngCategory", "required when ngCode is present"),
            (None, Some(_)) => errors.push("ngCategory", "must be absent without ngCode"),
            _ => {}
        }
        if self.features.station() != self.station {
            errors.push(
                "features.station",
                format!(
                    "tag {} does not match station {}",
                    self.features.station(),
                    self.station
                ),
            );
        }
        errors.into_result()
    }
}
