// SPDX-License-Identifier: Apache-2.0

use crate::Station;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ScrewFeatures {
    pub expected: u32,
    pub detected: u32,
    #[serde(default)]
    pub missing_positions: Vec<u32>,
    pub torque_ok: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LabelFeatures {
    pub has_label: bool,
    pub rotation_deg: f64,
    pub ocr_text: String,
    pub mes_match: bool,
    pub print_quality_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DrawingFeatures {
    pub misalignment_mm: f64,
    #[serde(default)]
    pub missing_parts: Vec<String>,
    pub connector_route_ok: bool,
    #[serde(default)]
    pub cosmetic_defects: Vec<String>,
}

/// Station-specific measurements. Encoded as `{"station": <tag>, "data": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "station", content = "data")]
pub enum Features {
    ScrewCheck(ScrewFeatures),
    #[serde(rename = "LabelOCR")]
    LabelOcr(LabelFeatures),
    DrawingConform(DrawingFeatures),
}

impl Features {
    #[must_use]
    pub const fn station(&self) -> Station {
        match self {
            Self::ScrewCheck(_) => Station::ScrewCheck,
            Self::LabelOcr(_) => Station::LabelOCR,
            Self::DrawingConform(_) => Station::DrawingConform,
        }
    }
}
