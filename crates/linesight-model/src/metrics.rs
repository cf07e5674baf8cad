// SPDX-License-Identifier: Apache-2.0

use crate::{DeploymentKind, Instant, Station, ValidationError};
use serde::{Deserialize, Serialize};

/// Classifier performance over `[window_start, window_end]` for one station build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ModelMetricWindow {
    pub station: Station,
    pub model_version: String,
    pub window_start: Instant,
    pub window_end: Instant,
    pub precision: f64,
    pub recall: f64,
    pub accuracy: f64,
    pub auc: f64,
    pub tp: u64,
    pub fp: u64,
    pub tn: u64,
    #[serde(rename = "fn")]
    pub fn_: u64,
}

impl ModelMetricWindow {
    #[must_use]
    pub fn total(&self) -> u64 {
        self.tp + self.fp + self.tn + self.fn_
    }

    #[must_use]
    pub fn computed_precision(&self) -> Option<f64> {
        ratio(self.tp, self.tp + self.fp)
    }

    #[must_use]
    pub fn computed_recall(&self) -> Option<f64> {
        ratio(self.tp, self.tp + self.fn_)
    }

    /// Closed-interval overlap with an optionally open-ended range.
    #[must_use]
    pub fn intersects(&self, from: Option<&Instant>, to: Option<&Instant>) -> bool {
        from.map_or(true, |from| self.window_end >= *from)
            && to.map_or(true, |to| self.window_start <= *to)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = ValidationError::default();
        if self.model_version.trim().is_empty() {
            errors.push("modelVersion", "must not be empty");
        }
        if self.window_start > self.window_end {
            errors.push("windowEnd", "must not precede windowStart");
        }
        for (field, value) in [
            ("precision", self.precision),
            ("recall", self.recall),
            ("accuracy", self.accuracy),
            ("auc", self.auc),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                errors.push(field, "must be within [0, 1]");
            }
        }
        errors.into_result()
    }
}

fn ratio(numerator: u64, denominator: u64) -> Option<f64> {
    (denominator > 0).then(|| numerator as f64 / denominator as f64)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DeploymentEvent {
    pub id: String,
    pub station: Station,
    pub model_version: String,
    pub deployed_at: Instant,
    #[serde(rename = "type")]
    pub kind: DeploymentKind,
    #[serde(default)]
    pub notes: String,
}

/// Registry entry for a model build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ModelVersion {
    pub id: String,
    pub station: Station,
    pub version: String,
    pub deployed_at: Instant,
    #[serde(default)]
    pub notes: String,
}
