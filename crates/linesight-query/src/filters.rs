// SPDX-License-Identifier: Apache-2.0

use linesight_model::{InspectionEvent, InspectionResult, Instant, NgCode, Station};
use serde::{Deserialize, Serialize};

/// Filter shared by the overview engines. Absent fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Instant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Instant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub station: Option<Station>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl BaseFilter {
    #[must_use]
    pub fn matches(&self, event: &InspectionEvent) -> bool {
        self.station.map_or(true, |s| event.station == s)
            && self.model.as_deref().map_or(true, |m| event.model == m)
            && self.line.as_deref().map_or(true, |l| event.line == l)
            && self.from.map_or(true, |from| event.captured_at >= from)
            && self.to.map_or(true, |to| event.captured_at <= to)
    }
}

/// Listing filter: the base filter plus record-level selectors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionFilter {
    #[serde(flatten)]
    pub base: BaseFilter,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<InspectionResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ng_code: Option<NgCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_order: Option<String>,
}

impl InspectionFilter {
    #[must_use]
    pub fn matches(&self, event: &InspectionEvent) -> bool {
        self.base.matches(event)
            && self.result.map_or(true, |r| event.result == r)
            && self.ng_code.map_or(true, |c| event.ng_code == Some(c))
            && self.serial.as_deref().map_or(true, |s| event.serial == s)
            && self
                .work_order
                .as_deref()
                .map_or(true, |w| event.work_order == w)
    }
}

impl From<BaseFilter> for InspectionFilter {
    fn from(base: BaseFilter) -> Self {
        Self {
            base,
            ..Self::default()
        }
    }
}
