// SPDX-License-Identifier: Apache-2.0

use crate::{Dataset, StoreError};
use linesight_model::{
    DeploymentEvent, InspectionEvent, ModelMetricWindow, ModelVersion, NgTickerEvent,
    StationStatus, Unit,
};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

#[derive(Debug, Default)]
struct ReferenceData {
    units: BTreeMap<String, Unit>,
    model_versions: Vec<ModelVersion>,
    deployments: Vec<DeploymentEvent>,
    metric_windows: Vec<ModelMetricWindow>,
    statuses: Vec<StationStatus>,
}

/// Immutable view of the store at one point in time.
///
/// Inspections keep insertion order; that order is the tie-breaker for every
/// stable sort downstream.
#[derive(Debug, Clone, Default)]
pub struct StoreSnapshot {
    inspections: Vec<InspectionEvent>,
    by_id: HashMap<String, usize>,
    ticker: Vec<NgTickerEvent>,
    reference: Arc<ReferenceData>,
}

impl StoreSnapshot {
    /// Validates `dataset` and indexes it.
    pub fn from_dataset(dataset: Dataset) -> Result<Self, StoreError> {
        dataset.validate()?;
        let Dataset {
            units,
            inspections,
            model_versions,
            deployments,
            metric_windows,
            station_statuses,
            ticker,
        } = dataset;
        let by_id = inspections
            .iter()
            .enumerate()
            .map(|(i, e)| (e.id.clone(), i))
            .collect();
        Ok(Self {
            inspections,
            by_id,
            ticker,
            reference: Arc::new(ReferenceData {
                units: units.into_iter().map(|u| (u.serial.clone(), u)).collect(),
                model_versions,
                deployments,
                metric_windows,
                statuses: station_statuses,
            }),
        })
    }

    pub fn scan<'a, P>(&'a self, mut predicate: P) -> impl Iterator<Item = &'a InspectionEvent>
    where
        P: FnMut(&InspectionEvent) -> bool + 'a,
    {
        self.inspections.iter().filter(move |e| predicate(e))
    }

    #[must_use]
    pub fn inspections(&self) -> &[InspectionEvent] {
        &self.inspections
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&InspectionEvent> {
        self.by_id.get(id).map(|&i| &self.inspections[i])
    }

    #[must_use]
    pub fn contains_id(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    #[must_use]
    pub fn unit(&self, serial: &str) -> Option<&Unit> {
        self.reference.units.get(serial)
    }

    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.reference.units.values()
    }

    #[must_use]
    pub fn model_versions(&self) -> &[ModelVersion] {
        &self.reference.model_versions
    }

    #[must_use]
    pub fn deployments(&self) -> &[DeploymentEvent] {
        &self.reference.deployments
    }

    #[must_use]
    pub fn metric_windows(&self) -> &[ModelMetricWindow] {
        &self.reference.metric_windows
    }

    #[must_use]
    pub fn station_statuses(&self) -> &[StationStatus] {
        &self.reference.statuses
    }

    #[must_use]
    pub fn ticker(&self) -> &[NgTickerEvent] {
        &self.ticker
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inspections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inspections.is_empty()
    }

    /// Copy of `self` with one more inspection and ticker entry. Reference data is shared.
    pub(crate) fn with_appended(
        &self,
        event: InspectionEvent,
        ticker: Option<NgTickerEvent>,
    ) -> Result<Self, StoreError> {
        if self.contains_id(&event.id) {
            return Err(StoreError::duplicate_id(&event.id));
        }
        let mut next = self.clone();
        next.by_id.insert(event.id.clone(), next.inspections.len());
        next.inspections.push(event);
        next.ticker.extend(ticker);
        Ok(next)
    }
}
