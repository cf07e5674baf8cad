// SPDX-License-Identifier: Apache-2.0

use crate::ParseError;
use chrono::{DateTime, DurationRound, SecondsFormat, TimeDelta, Utc};

pub type Instant = DateTime<Utc>;

/// Parses an RFC 3339 instant with any offset and normalizes it to UTC.
pub fn parse_instant(raw: &str) -> Result<Instant, ParseError> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|value| value.with_timezone(&Utc))
        .map_err(|_| ParseError::InvalidInstant(raw.to_string()))
}

#[must_use]
pub fn format_instant(value: &Instant) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Start of the UTC clock hour containing `value`.
#[must_use]
pub fn truncate_to_hour(value: &Instant) -> Instant {
    value
        .duration_trunc(TimeDelta::hours(1))
        .unwrap_or(*value)
}
