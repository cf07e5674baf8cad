// SPDX-License-Identifier: Apache-2.0

use crate::{BaseFilter, QueryLimits};
use linesight_model::{InspectionEvent, InspectionResult, NgCategory, NgCode};
use linesight_store::StoreSnapshot;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NgCount {
    pub code: NgCode,
    pub count: u64,
    pub ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub ok: u64,
    pub ng: u64,
    pub total: u64,
    pub pass_rate: f64,
    pub ng_rate: f64,
    pub avg_cycle_time: f64,
    pub top_ng: Vec<NgCount>,
    #[serde(rename = "inspectedToday")]
    pub inspected: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParetoPoint {
    pub ng_code: NgCode,
    pub ng_category: NgCategory,
    pub count: u64,
    pub ratio: f64,
}

/// Count per code, ordered by count descending then first appearance.
struct CodeTally {
    slots: BTreeMap<NgCode, (usize, u64, NgCategory)>,
}

impl CodeTally {
    fn new() -> Self {
        Self {
            slots: BTreeMap::new(),
        }
    }

    fn record(&mut self, code: NgCode, category: NgCategory) {
        let next = self.slots.len();
        self.slots.entry(code).or_insert((next, 0, category)).1 += 1;
    }

    fn ranked(self, top_n: usize) -> Vec<(NgCode, u64, NgCategory)> {
        let mut rows: Vec<(usize, NgCode, u64, NgCategory)> = self
            .slots
            .into_iter()
            .map(|(code, (first, count, category))| (first, code, count, category))
            .collect();
        rows.sort_by(|a, b| b.2.cmp(&a.2).then(a.0.cmp(&b.0)));
        rows.into_iter()
            .take(top_n)
            .map(|(_, code, count, category)| (code, count, category))
            .collect()
    }
}

fn rate(part: u64, whole: u64) -> f64 {
    part as f64 / whole.max(1) as f64
}

/// Pass/NG counts and rates over the filtered events.
#[must_use]
pub fn summarize(snapshot: &StoreSnapshot, filter: &BaseFilter, limits: &QueryLimits) -> Summary {
    let mut ok = 0_u64;
    let mut ng = 0_u64;
    let mut cycle_sum = 0.0_f64;
    let mut tally = CodeTally::new();
    for event in snapshot.scan(|e| filter.matches(e)) {
        cycle_sum += event.cycle_time_sec;
        match event.result {
            InspectionResult::Ok => ok += 1,
            InspectionResult::Ng => {
                ng += 1;
                if let Some(code) = event.ng_code {
                    tally.record(code, code.category());
                }
            }
        }
    }
    let total = ok + ng;
    Summary {
        ok,
        ng,
        total,
        pass_rate: rate(ok, total),
        ng_rate: rate(ng, total),
        avg_cycle_time: cycle_sum / total.max(1) as f64,
        top_ng: tally
            .ranked(limits.summary_top_n)
            .into_iter()
            .map(|(code, count, _)| NgCount {
                code,
                count,
                ratio: rate(count, ng),
            })
            .collect(),
        inspected: total,
    }
}

fn pareto_candidate(event: &InspectionEvent) -> Option<(NgCode, NgCategory)> {
    if event.result != InspectionResult::Ng {
        return None;
    }
    Some((event.ng_code?, event.ng_category?))
}

/// Defect codes ranked by frequency among NG events that carry code and category.
#[must_use]
pub fn pareto(
    snapshot: &StoreSnapshot,
    filter: &BaseFilter,
    limits: &QueryLimits,
) -> Vec<ParetoPoint> {
    let mut tally = CodeTally::new();
    let mut subset = 0_u64;
    for (code, category) in snapshot
        .scan(|e| filter.matches(e))
        .filter_map(pareto_candidate)
    {
        subset += 1;
        tally.record(code, category);
    }
    tally
        .ranked(limits.pareto_top_n)
        .into_iter()
        .map(|(ng_code, count, ng_category)| ParetoPoint {
            ng_code,
            ng_category,
            count,
            ratio: rate(count, subset),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use linesight_model::parse_instant;
    use linesight_store::fixtures::{seed_dataset, FIXTURE_ANCHOR};
    use linesight_store::Dataset;

    fn snapshot_of(dataset: Dataset) -> StoreSnapshot {
        StoreSnapshot::from_dataset(dataset).expect("snapshot")
    }

    fn seeded() -> StoreSnapshot {
        snapshot_of(seed_dataset(parse_instant(FIXTURE_ANCHOR).expect("anchor")))
    }

    #[test]
    fn empty_selection_yields_zero_rates() {
        let filter = BaseFilter {
            line: Some("L9".to_string()),
            ..BaseFilter::default()
        };
        let summary = summarize(&seeded(), &filter, &QueryLimits::default());
        assert_eq!(summary.total, 0);
        assert_eq!(summary.pass_rate, 0.0);
        assert_eq!(summary.ng_rate, 0.0);
        assert_eq!(summary.avg_cycle_time, 0.0);
        assert!(summary.top_ng.is_empty());
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let anchor = parse_instant(FIXTURE_ANCHOR).expect("anchor");
        let mut dataset = seed_dataset(anchor);
        // a second SCR_MISSING lifts it above the other two codes
        let mut extra = dataset.inspections[3].clone();
        extra.id = "insp-20000".to_string();
        dataset.inspections.push(extra);
        let limits = QueryLimits {
            summary_top_n: 2,
            ..QueryLimits::default()
        };
        let summary = summarize(&snapshot_of(dataset), &BaseFilter::default(), &limits);
        let codes: Vec<NgCode> = summary.top_ng.iter().map(|n| n.code).collect();
        assert_eq!(codes, vec![NgCode::ScrMissing, NgCode::LblMisread]);
        assert_eq!(summary.top_ng[0].count, 2);
        assert_eq!(summary.top_ng[0].ratio, 0.5);
    }

    #[test]
    fn pareto_ratios_are_against_ng_subset() {
        let points = pareto(&seeded(), &BaseFilter::default(), &QueryLimits::default());
        assert_eq!(points.len(), 3);
        for point in &points {
            assert_eq!(point.count, 1);
            assert!((point.ratio - 1.0 / 3.0).abs() < 1e-12);
            assert_eq!(point.ng_category, point.ng_code.category());
        }
        assert_eq!(points[0].ng_code, NgCode::LblMisread);
    }
}
