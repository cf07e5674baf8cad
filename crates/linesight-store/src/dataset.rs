// SPDX-License-Identifier: Apache-2.0

use crate::{StoreError, StoreErrorCode};
use linesight_model::{
    DeploymentEvent, InspectionEvent, ModelMetricWindow, ModelVersion, NgTickerEvent,
    StationStatus, Unit, ValidationError,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Serialized store contents, as loaded from a JSON file or built by fixtures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Dataset {
    #[serde(default)]
    pub units: Vec<Unit>,
    #[serde(default)]
    pub inspections: Vec<InspectionEvent>,
    #[serde(default)]
    pub model_versions: Vec<ModelVersion>,
    #[serde(default)]
    pub deployments: Vec<DeploymentEvent>,
    #[serde(default)]
    pub metric_windows: Vec<ModelMetricWindow>,
    #[serde(default)]
    pub station_statuses: Vec<StationStatus>,
    #[serde(default)]
    pub ticker: Vec<NgTickerEvent>,
}

impl Dataset {
    pub fn from_path(path: &Path) -> Result<Self, StoreError> {
        let raw = std::fs::read(path).map_err(|e| {
            StoreError::new(
                StoreErrorCode::Io,
                format!("read dataset {}: {e}", path.display()),
            )
        })?;
        let dataset: Self = serde_json::from_slice(&raw).map_err(|e| {
            StoreError::new(
                StoreErrorCode::Decode,
                format!("decode dataset {}: {e}", path.display()),
            )
        })?;
        tracing::info!(
            path = %path.display(),
            inspections = dataset.inspections.len(),
            units = dataset.units.len(),
            "dataset loaded"
        );
        Ok(dataset)
    }

    /// Record invariants plus uniqueness of inspection ids and unit serials.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = ValidationError::default();
        let mut ids = BTreeSet::new();
        for (i, event) in self.inspections.iter().enumerate() {
            if let Err(e) = event.validate() {
                errors.extend(e.with_prefix(&format!("inspections[{i}]")));
            }
            if !ids.insert(event.id.as_str()) {
                errors.push(format!("inspections[{i}].id"), "duplicate inspection id");
            }
        }
        let mut serials = BTreeSet::new();
        for (i, unit) in self.units.iter().enumerate() {
            if unit.serial.trim().is_empty() {
                errors.push(format!("units[{i}].serial"), "must not be empty");
            }
            if !serials.insert(unit.serial.as_str()) {
                errors.push(format!("units[{i}].serial"), "duplicate unit serial");
            }
        }
        for (i, window) in self.metric_windows.iter().enumerate() {
            if let Err(e) = window.validate() {
                errors.extend(e.with_prefix(&format!("metricWindows[{i}]")));
            }
        }
        errors.into_result()
    }
}
