// SPDX-License-Identifier: Apache-2.0

use crate::QueryError;
use linesight_model::{InspectionEvent, InspectionResult, Instant, NgCode, Station};
use linesight_store::StoreSnapshot;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "NG")]
    Ng,
    /// No inspection has been recorded for the unit yet.
    Unknown,
}

impl From<InspectionResult> for UnitStatus {
    fn from(value: InspectionResult) -> Self {
        match value {
            InspectionResult::Ok => Self::Ok,
            InspectionResult::Ng => Self::Ng,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineStep {
    pub station: Station,
    pub result: InspectionResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ng_code: Option<NgCode>,
    pub captured_at: Instant,
    pub inspection_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
}

impl From<&InspectionEvent> for TimelineStep {
    fn from(event: &InspectionEvent) -> Self {
        Self {
            station: event.station,
            result: event.result,
            ng_code: event.ng_code,
            captured_at: event.captured_at,
            inspection_id: event.id.clone(),
            operator: event.operator.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitTimeline {
    pub serial: String,
    pub line: String,
    pub work_order: String,
    pub model: String,
    pub started_at: Instant,
    pub current_status: UnitStatus,
    pub route: Vec<TimelineStep>,
}

/// Route of one unit through the stations, oldest step first.
pub fn unit_timeline(snapshot: &StoreSnapshot, serial: &str) -> Result<UnitTimeline, QueryError> {
    let unit = snapshot
        .unit(serial)
        .ok_or_else(|| QueryError::not_found("unit", serial))?;
    let mut events: Vec<&InspectionEvent> = snapshot.scan(|e| e.serial == serial).collect();
    events.sort_by(|a, b| a.captured_at.cmp(&b.captured_at));
    let current_status = events
        .last()
        .map_or(UnitStatus::Unknown, |e| UnitStatus::from(e.result));
    Ok(UnitTimeline {
        serial: unit.serial.clone(),
        line: unit.line.clone(),
        work_order: unit.work_order.clone(),
        model: unit.model.clone(),
        started_at: unit.started_at,
        current_status,
        route: events.into_iter().map(TimelineStep::from).collect(),
    })
}
