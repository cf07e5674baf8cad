// SPDX-License-Identifier: Apache-2.0

use crate::BaseFilter;
use linesight_model::{DeploymentEvent, ModelMetricWindow, Station};
use linesight_store::StoreSnapshot;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelMetrics {
    pub metrics: Vec<ModelMetricWindow>,
    pub deployments: Vec<DeploymentEvent>,
}

/// Metric windows and deployments for the selected station and build.
///
/// Here `filter.model` names a model version. Windows are kept when they
/// overlap `[from, to]`; deployments ignore the time range. `line` is not
/// applicable and is ignored.
#[must_use]
pub fn model_metrics(snapshot: &StoreSnapshot, filter: &BaseFilter) -> ModelMetrics {
    let station_ok = |station: Station| filter.station.map_or(true, |s| s == station);
    let version_ok = |version: &str| filter.model.as_deref().map_or(true, |m| m == version);
    ModelMetrics {
        metrics: snapshot
            .metric_windows()
            .iter()
            .filter(|w| station_ok(w.station) && version_ok(&w.model_version))
            .filter(|w| w.intersects(filter.from.as_ref(), filter.to.as_ref()))
            .cloned()
            .collect(),
        deployments: snapshot
            .deployments()
            .iter()
            .filter(|d| station_ok(d.station) && version_ok(&d.model_version))
            .cloned()
            .collect(),
    }
}
