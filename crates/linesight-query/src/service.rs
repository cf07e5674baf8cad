// SPDX-License-Identifier: Apache-2.0

use crate::{
    filtered_sorted, ingest, list_inspections, live_snapshot, model_metrics, pareto, summarize,
    trend, unit_timeline, BaseFilter, IngestAck, IngestRequest, InspectionFilter,
    InspectionListItem, LiveSnapshot, ModelMetrics, Page, ParetoPoint, QueryError, QueryLimits,
    Summary, TrendPoint, UnitTimeline,
};
use linesight_model::InspectionEvent;
use linesight_store::InspectionStore;
use std::sync::Arc;

/// Entry point for every read and for ingest. Each read runs against one snapshot.
#[derive(Clone)]
pub struct QueryService {
    store: Arc<dyn InspectionStore>,
    limits: QueryLimits,
}

impl std::fmt::Debug for QueryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryService")
            .field("limits", &self.limits)
            .finish_non_exhaustive()
    }
}

impl QueryService {
    #[must_use]
    pub fn new(store: Arc<dyn InspectionStore>, limits: QueryLimits) -> Self {
        Self { store, limits }
    }

    #[must_use]
    pub fn limits(&self) -> &QueryLimits {
        &self.limits
    }

    pub fn list_inspections(
        &self,
        filter: &InspectionFilter,
        cursor: Option<&str>,
    ) -> Result<Page<InspectionListItem>, QueryError> {
        let snapshot = self.store.snapshot()?;
        Ok(list_inspections(&snapshot, filter, cursor, &self.limits))
    }

    pub fn get_inspection(&self, id: &str) -> Result<InspectionEvent, QueryError> {
        self.store
            .snapshot()?
            .get(id)
            .cloned()
            .ok_or_else(|| QueryError::not_found("inspection", id))
    }

    pub fn summarize(&self, filter: &BaseFilter) -> Result<Summary, QueryError> {
        let snapshot = self.store.snapshot()?;
        Ok(summarize(&snapshot, filter, &self.limits))
    }

    pub fn pareto(&self, filter: &BaseFilter) -> Result<Vec<ParetoPoint>, QueryError> {
        let snapshot = self.store.snapshot()?;
        Ok(pareto(&snapshot, filter, &self.limits))
    }

    pub fn trend(&self, filter: &BaseFilter) -> Result<Vec<TrendPoint>, QueryError> {
        let snapshot = self.store.snapshot()?;
        Ok(trend(&snapshot, filter))
    }

    pub fn unit_timeline(&self, serial: &str) -> Result<UnitTimeline, QueryError> {
        let snapshot = self.store.snapshot()?;
        unit_timeline(&snapshot, serial)
    }

    pub fn model_metrics(&self, filter: &BaseFilter) -> Result<ModelMetrics, QueryError> {
        let snapshot = self.store.snapshot()?;
        Ok(model_metrics(&snapshot, filter))
    }

    pub fn live_snapshot(&self) -> Result<LiveSnapshot, QueryError> {
        let snapshot = self.store.snapshot()?;
        Ok(live_snapshot(&snapshot, &self.limits))
    }

    /// Every matching event in listing order, ignoring pagination.
    pub fn export_inspections(
        &self,
        filter: &InspectionFilter,
    ) -> Result<Vec<InspectionEvent>, QueryError> {
        let snapshot = self.store.snapshot()?;
        Ok(filtered_sorted(&snapshot, filter)
            .into_iter()
            .cloned()
            .collect())
    }

    pub fn ingest(&self, request: IngestRequest) -> Result<IngestAck, QueryError> {
        ingest(self.store.as_ref(), request)
    }
}
