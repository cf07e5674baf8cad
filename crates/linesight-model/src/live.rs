// SPDX-License-Identifier: Apache-2.0

use crate::{InspectionEvent, Instant, NgCode, Severity, Station, StationHealth};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StationStatus {
    pub station: Station,
    pub line: String,
    pub camera: String,
    pub status: StationHealth,
    pub last_heartbeat: Instant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LiveThumbnail {
    pub station: Station,
    pub image_uri: String,
    pub captured_at: Instant,
}

impl From<&InspectionEvent> for LiveThumbnail {
    fn from(event: &InspectionEvent) -> Self {
        Self {
            station: event.station,
            image_uri: event.image_uri.clone(),
            captured_at: event.captured_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NgTickerEvent {
    pub id: String,
    pub station: Station,
    pub serial: String,
    pub captured_at: Instant,
    pub ng_code: NgCode,
    pub severity: Severity,
}

impl NgTickerEvent {
    /// Ticker entry for an NG inspection; `None` for OK results.
    #[must_use]
    pub fn for_inspection(event: &InspectionEvent) -> Option<Self> {
        let ng_code = event.ng_code.filter(|_| event.is_ng())?;
        Some(Self {
            id: format!("ng-{}", event.id),
            station: event.station,
            serial: event.serial.clone(),
            captured_at: event.captured_at,
            ng_code,
            severity: event.severity,
        })
    }
}
