// SPDX-License-Identifier: Apache-2.0

use linesight_api::{
    map_error, parse_base_filter, parse_list_params, ApiError, ApiErrorCode, MAX_CURSOR_BYTES,
};
use linesight_model::{format_instant, InspectionResult, NgCode, Station};
use linesight_query::{QueryError, QueryErrorCode};
use proptest::prelude::*;
use std::collections::BTreeMap;

fn query(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn rejected_params(err: &ApiError) -> Vec<String> {
    err.details["field_errors"]
        .as_array()
        .expect("field errors array")
        .iter()
        .map(|e| e["parameter"].as_str().expect("parameter").to_string())
        .collect()
}

#[test]
fn base_filter_parses_every_field() {
    let filter = parse_base_filter(&query(&[
        ("from", "2026-03-10T08:00:00+01:00"),
        ("to", "2026-03-10T12:00:00Z"),
        ("line", "L1"),
        ("station", "DrawingConform"),
        ("model", "HVAC-X100"),
    ]))
    .expect("base filter");
    assert_eq!(
        filter.from.as_ref().map(format_instant).as_deref(),
        Some("2026-03-10T07:00:00Z")
    );
    assert_eq!(filter.station, Some(Station::DrawingConform));
    assert_eq!(filter.line.as_deref(), Some("L1"));
    assert_eq!(filter.model.as_deref(), Some("HVAC-X100"));
}

#[test]
fn malformed_values_are_all_reported() {
    let err = parse_base_filter(&query(&[
        ("from", "last tuesday"),
        ("station", "PaintCheck"),
        ("to", "2026-03-10"),
    ]))
    .expect_err("invalid filter");
    assert_eq!(err.code, ApiErrorCode::InvalidQueryParameter);
    assert_eq!(map_error(&err).status_code, 400);
    assert_eq!(rejected_params(&err), vec!["from", "to", "station"]);
}

#[test]
fn list_params_cover_record_selectors_and_cursor() {
    let params = parse_list_params(&query(&[
        ("result", "NG"),
        ("ngCode", "LBL_MISREAD"),
        ("serial", "AC25W42-L1-00123"),
        ("workOrder", "WO-10001"),
        ("cursor", "insp-10002"),
    ]))
    .expect("list params");
    assert_eq!(params.filter.result, Some(InspectionResult::Ng));
    assert_eq!(params.filter.ng_code, Some(NgCode::LblMisread));
    assert_eq!(params.filter.work_order.as_deref(), Some("WO-10001"));
    assert_eq!(params.cursor.as_deref(), Some("insp-10002"));
}

#[test]
fn unknown_and_oversized_parameters_fail() {
    let long_cursor = "c".repeat(MAX_CURSOR_BYTES + 1);
    let err = parse_list_params(&query(&[("limit", "10"), ("cursor", &long_cursor)]))
        .expect_err("invalid list params");
    assert_eq!(rejected_params(&err), vec!["limit", "cursor"]);
}

#[test]
fn query_errors_map_to_http_statuses() {
    let missing = ApiError::from_query(
        QueryError::not_found("unit", "AC25W42-L9-00001"),
        ApiErrorCode::UnitNotFound,
    );
    assert_eq!(missing.code, ApiErrorCode::UnitNotFound);
    assert_eq!(map_error(&missing).status_code, 404);

    let store = ApiError::from_query(
        QueryError::new(QueryErrorCode::Store, "lock poisoned"),
        ApiErrorCode::InspectionNotFound,
    );
    assert_eq!(map_error(&store).status_code, 500);
    assert_eq!(
        map_error(&ApiError::forbidden("viewer", "model_metrics")).status_code,
        403
    );
    assert_eq!(map_error(&ApiError::payload_too_large(10)).status_code, 413);
}

proptest! {
    #[test]
    fn station_text_is_accepted_only_for_known_names(raw in "[A-Za-z]{0,16}") {
        let result = parse_base_filter(&query(&[("station", &raw)]));
        let known = Station::ALL.iter().any(|s| s.as_str() == raw.as_str());
        if known || raw.is_empty() {
            prop_assert!(result.is_ok());
        } else {
            prop_assert!(result.is_err());
        }
    }
}
