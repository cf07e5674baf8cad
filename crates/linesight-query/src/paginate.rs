// SPDX-License-Identifier: Apache-2.0

use crate::{InspectionFilter, QueryLimits};
use linesight_model::{InspectionEvent, InspectionResult, Instant, NgCode, Severity, Station};
use linesight_store::StoreSnapshot;
use serde::{Deserialize, Serialize};

/// List projection of an inspection: no features, no image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionListItem {
    pub id: String,
    pub serial: String,
    pub work_order: String,
    pub result: InspectionResult,
    pub station: Station,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ng_code: Option<NgCode>,
    pub severity: Severity,
    pub model_version: String,
    pub confidence: f64,
    pub captured_at: Instant,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
}

impl From<&InspectionEvent> for InspectionListItem {
    fn from(event: &InspectionEvent) -> Self {
        Self {
            id: event.id.clone(),
            serial: event.serial.clone(),
            work_order: event.work_order.clone(),
            result: event.result,
            station: event.station,
            ng_code: event.ng_code,
            severity: event.severity,
            model_version: event.model_version.clone(),
            confidence: event.confidence,
            captured_at: event.captured_at,
            operator: event.operator.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub data: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

/// Matching events, newest first. Equal timestamps keep store order.
#[must_use]
pub fn filtered_sorted<'a>(
    snapshot: &'a StoreSnapshot,
    filter: &InspectionFilter,
) -> Vec<&'a InspectionEvent> {
    let mut events: Vec<&'a InspectionEvent> = snapshot
        .inspections()
        .iter()
        .filter(|e| filter.matches(e))
        .collect();
    events.sort_by(|a, b| b.captured_at.cmp(&a.captured_at));
    events
}

/// One page of the filtered listing.
///
/// `cursor` is the id of the last item of the previous page. A cursor that is
/// not in the current filtered sequence restarts from the first page.
#[must_use]
pub fn list_inspections(
    snapshot: &StoreSnapshot,
    filter: &InspectionFilter,
    cursor: Option<&str>,
    limits: &QueryLimits,
) -> Page<InspectionListItem> {
    let events = filtered_sorted(snapshot, filter);
    let start = match cursor {
        None => 0,
        Some(cursor) => match events.iter().position(|e| e.id == cursor) {
            Some(index) => index + 1,
            None => {
                tracing::debug!(cursor, "stale cursor, restarting listing");
                0
            }
        },
    };
    let size = limits.page_size.max(1);
    let data: Vec<InspectionListItem> = events
        .iter()
        .skip(start)
        .take(size)
        .map(|e| InspectionListItem::from(*e))
        .collect();
    let next_cursor = if data.len() == size {
        data.last().map(|item| item.id.clone())
    } else {
        None
    };
    Page { data, next_cursor }
}
