// SPDX-License-Identifier: Apache-2.0

use crate::QueryLimits;
use linesight_model::{LiveThumbnail, NgTickerEvent, StationStatus};
use linesight_store::StoreSnapshot;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveSnapshot {
    pub statuses: Vec<StationStatus>,
    pub recent_thumbnails: Vec<LiveThumbnail>,
    pub ticker: Vec<NgTickerEvent>,
}

/// Polling view for the live monitor. Thumbnails are the most recently stored inspections.
#[must_use]
pub fn live_snapshot(snapshot: &StoreSnapshot, limits: &QueryLimits) -> LiveSnapshot {
    let inspections = snapshot.inspections();
    let skip = inspections.len().saturating_sub(limits.recent_thumbnails);
    LiveSnapshot {
        statuses: snapshot.station_statuses().to_vec(),
        recent_thumbnails: inspections[skip..].iter().map(LiveThumbnail::from).collect(),
        ticker: snapshot.ticker().to_vec(),
    }
}
