// SPDX-License-Identifier: Apache-2.0

use linesight_model::{
    parse_instant, Features, InspectionEvent, InspectionResult, NgCategory, NgCode,
    NgTickerEvent, ScrewFeatures, Severity, Station,
};
use proptest::prelude::*;
use proptest::test_runner::Config;

fn screw_event() -> InspectionEvent {
    InspectionEvent {
        id: "insp-1".to_string(),
        serial: "AC25W42-L1-00124".to_string(),
        work_order: "WO-10001".to_string(),
        station: Station::ScrewCheck,
        line: "L1".to_string(),
        model: "HVAC-X100".to_string(),
        model_version: "screw-v1.3.2".to_string(),
        captured_at: parse_instant("2026-03-10T09:30:00Z").expect("captured at"),
        result: InspectionResult::Ng,
        ng_code: Some(NgCode::ScrMissing),
        ng_category: Some(NgCategory::Screw),
        severity: Severity::Major,
        confidence: 0.81,
        operator: Some("op-aj".to_string()),
        cycle_time_sec: 23.0,
        image_uri: "/mock-images/screw-ng-00124.jpg".to_string(),
        features: Features::ScrewCheck(ScrewFeatures {
            expected: 8,
            detected: 6,
            missing_positions: vec![5, 7],
            torque_ok: false,
        }),
    }
}

fn fields(event: &InspectionEvent) -> Vec<String> {
    event
        .validate()
        .err()
        .map(|e| e.field_errors.into_iter().map(|f| f.field).collect())
        .unwrap_or_default()
}

#[test]
fn well_formed_ng_event_passes() {
    assert!(screw_event().validate().is_ok());
}

#[test]
fn ng_without_code_is_rejected() {
    let mut event = screw_event();
    event.ng_code = None;
    event.ng_category = None;
    assert_eq!(fields(&event), vec!["ngCode".to_string()]);
}

#[test]
fn ok_with_code_is_rejected() {
    let mut event = screw_event();
    event.result = InspectionResult::Ok;
    assert_eq!(fields(&event), vec!["ngCode".to_string()]);
}

#[test]
fn category_must_follow_code() {
    let mut event = screw_event();
    event.ng_category = Some(NgCategory::Label);
    assert_eq!(fields(&event), vec!["ngCategory".to_string()]);
}

#[test]
fn feature_tag_must_match_station() {
    let mut event = screw_event();
    event.station = Station::LabelOCR;
    assert_eq!(fields(&event), vec!["features.station".to_string()]);
}

#[test]
fn all_violations_are_reported_together() {
    let mut event = screw_event();
    event.serial = " ".to_string();
    event.confidence = 1.5;
    event.cycle_time_sec = f64::NAN;
    assert_eq!(
        fields(&event),
        vec![
            "serial".to_string(),
            "confidence".to_string(),
            "cycleTimeSec".to_string()
        ]
    );
}

#[test]
fn ticker_entries_exist_only_for_ng() {
    let ng = screw_event();
    let entry = NgTickerEvent::for_inspection(&ng).expect("ticker entry");
    assert_eq!(entry.id, "ng-insp-1");
    assert_eq!(entry.ng_code, NgCode::ScrMissing);
    assert_eq!(entry.severity, Severity::Major);

    let mut ok = screw_event();
    ok.result = InspectionResult::Ok;
    ok.ng_code = None;
    ok.ng_category = None;
    assert!(NgTickerEvent::for_inspection(&ok).is_none());
}

#[test]
fn wire_form_uses_camel_case_and_omits_absent_optionals() {
    let mut event = screw_event();
    event.operator = None;
    let json = serde_json::to_value(&event).expect("encode event");
    assert_eq!(json["workOrder"], "WO-10001");
    assert_eq!(json["ngCategory"], "Screw");
    assert_eq!(json["features"]["station"], "ScrewCheck");
    assert!(json.get("operator").is_none());
    let decoded: InspectionEvent = serde_json::from_value(json).expect("decode event");
    assert_eq!(decoded, event);
}

proptest! {
    #![proptest_config(Config::with_cases(128))]
    #[test]
    fn confidence_bounds_are_enforced(confidence in -1.0_f64..2.0_f64) {
        let mut event = screw_event();
        event.confidence = confidence;
        let in_range = (0.0..=1.0).contains(&confidence);
        prop_assert_eq!(event.validate().is_ok(), in_range);
    }
}
