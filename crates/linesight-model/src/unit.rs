// SPDX-License-Identifier: Apache-2.0

use crate::Instant;
use serde::{Deserialize, Serialize};

/// Physical product unit, created upstream at production start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Unit {
    pub serial: String,
    pub line: String,
    pub work_order: String,
    pub model: String,
    pub started_at: Instant,
}
