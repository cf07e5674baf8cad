// SPDX-License-Identifier: Apache-2.0

use crate::BaseFilter;
use linesight_model::{truncate_to_hour, DeploymentEvent, DeploymentKind, Instant};
use linesight_store::StoreSnapshot;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub bucket_start: Instant,
    pub total: u64,
    pub ok_count: u64,
    pub pass_rate: f64,
    pub model_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<DeploymentKind>,
}

struct Bucket<'a> {
    total: u64,
    ok: u64,
    latest_at: Instant,
    latest_version: &'a str,
}

/// Hourly pass-rate series, ascending by bucket start.
#[must_use]
pub fn trend(snapshot: &StoreSnapshot, filter: &BaseFilter) -> Vec<TrendPoint> {
    let mut buckets: BTreeMap<Instant, Bucket<'_>> = BTreeMap::new();
    for event in snapshot.scan(|e| filter.matches(e)) {
        let bucket = buckets
            .entry(truncate_to_hour(&event.captured_at))
            .or_insert(Bucket {
                total: 0,
                ok: 0,
                latest_at: event.captured_at,
                latest_version: &event.model_version,
            });
        bucket.total += 1;
        if !event.is_ng() {
            bucket.ok += 1;
        }
        // later scan position wins when timestamps tie
        if event.captured_at >= bucket.latest_at {
            bucket.latest_at = event.captured_at;
            bucket.latest_version = &event.model_version;
        }
    }
    buckets
        .into_iter()
        .map(|(start, bucket)| TrendPoint {
            bucket_start: start,
            total: bucket.total,
            ok_count: bucket.ok,
            pass_rate: bucket.ok as f64 / bucket.total as f64,
            model_version: bucket.latest_version.to_string(),
            marker: marker_for(snapshot.deployments(), bucket.latest_version, &start),
        })
        .collect()
}

/// Kind of the most recent deployment of `version` at or before `bucket_start`.
fn marker_for(
    deployments: &[DeploymentEvent],
    version: &str,
    bucket_start: &Instant,
) -> Option<DeploymentKind> {
    deployments
        .iter()
        .filter(|d| d.model_version == version && d.deployed_at <= *bucket_start)
        .max_by_key(|d| d.deployed_at)
        .map(|d| d.kind)
}
