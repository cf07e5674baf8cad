// SPDX-License-Identifier: Apache-2.0

use crate::{QueryError, QueryErrorCode};
use linesight_model::{
    Features, InspectionEvent, InspectionResult, Instant, NgCategory, NgCode, NgTickerEvent,
    Severity, Station, ValidationError,
};
use linesight_store::{InspectionStore, StoreError, StoreErrorCode};
use serde::{Deserialize, Serialize};

/// Inspection as reported by a station, before an id is assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct InspectionDraft {
    pub serial: String,
    pub work_order: String,
    pub station: Station,
    pub line: String,
    pub model: String,
    pub model_version: String,
    pub captured_at: Instant,
    pub result: InspectionResult,
    pub ng_code: Option<NgCode>,
    pub ng_category: Option<NgCategory>,
    pub severity: Severity,
    pub confidence: f64,
    pub operator: Option<String>,
    pub cycle_time_sec: f64,
    pub image_uri: String,
    pub features: Features,
}

impl InspectionDraft {
    /// Builds the stored record. A missing category is derived from the code.
    #[must_use]
    pub fn into_event(self, id: String) -> InspectionEvent {
        InspectionEvent {
            id,
            serial: self.serial,
            work_order: self.work_order,
            station: self.station,
            line: self.line,
            model: self.model,
            model_version: self.model_version,
            captured_at: self.captured_at,
            result: self.result,
            ng_code: self.ng_code,
            ng_category: self.ng_category.or(self.ng_code.map(NgCode::category)),
            severity: self.severity,
            confidence: self.confidence,
            operator: self.operator,
            cycle_time_sec: self.cycle_time_sec,
            image_uri: self.image_uri,
            features: self.features,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IngestRequest {
    /// Caller-chosen id; the store assigns one when absent.
    pub id: Option<String>,
    pub draft: InspectionDraft,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestAck {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticker_id: Option<String>,
}

/// Id carried while the draft is validated, before the store assigns the real one.
const UNASSIGNED_ID: &str = "unassigned";

/// Store-allocated ids retried when a concurrent writer commits the same id first.
const ALLOCATION_ATTEMPTS: usize = 3;

/// Validates and stores one inspection. NG results also publish a ticker entry.
///
/// The draft is validated before the store is touched, so a rejected ingest
/// leaves the store and its id sequence unchanged.
pub fn ingest(
    store: &dyn InspectionStore,
    request: IngestRequest,
) -> Result<IngestAck, QueryError> {
    let supplied = match request.id {
        Some(id) if id.trim().is_empty() => {
            return Err(ValidationError::single("id", "must not be empty").into());
        }
        other => other,
    };
    let mut event = request
        .draft
        .into_event(supplied.clone().unwrap_or_else(|| UNASSIGNED_ID.to_string()));
    event.validate()?;

    match supplied {
        Some(id) => {
            if store.snapshot()?.contains_id(&id) {
                return Err(ValidationError::single("id", "inspection id already exists").into());
            }
            Ok(publish(store, event)?)
        }
        None => {
            let mut attempt = 1;
            loop {
                event.id = store.allocate_id()?;
                match publish(store, event.clone()) {
                    Err(err) if err.code == StoreErrorCode::DuplicateId => {
                        tracing::debug!(inspection_id = %event.id, attempt, "allocated id taken");
                        if attempt == ALLOCATION_ATTEMPTS {
                            return Err(QueryError::new(
                                QueryErrorCode::Store,
                                "no free inspection id after concurrent commits",
                            ));
                        }
                        attempt += 1;
                    }
                    result => break Ok(result?),
                }
            }
        }
    }
}

fn publish(store: &dyn InspectionStore, event: InspectionEvent) -> Result<IngestAck, StoreError> {
    let ticker = NgTickerEvent::for_inspection(&event);
    let ack = IngestAck {
        id: event.id.clone(),
        ticker_id: ticker.as_ref().map(|t| t.id.clone()),
    };
    let (station, result) = (event.station, event.result);
    store.append(event, ticker)?;
    tracing::info!(inspection_id = %ack.id, %station, %result, "inspection ingested");
    Ok(ack)
}
