// SPDX-License-Identifier: Apache-2.0

//! Demo line data: two lines, three units, nine inspections and the model
//! history around them. Timestamps are offsets back from `anchor`.

use crate::Dataset;
use chrono::TimeDelta;
use linesight_model::{
    DeploymentEvent, DeploymentKind, DrawingFeatures, Features, InspectionEvent,
    InspectionResult, Instant, LabelFeatures, ModelMetricWindow, ModelVersion, NgCode,
    NgTickerEvent, ScrewFeatures, Severity, Station, StationHealth, StationStatus, Unit,
};

/// Anchor used by tests so fixture timestamps are reproducible.
pub const FIXTURE_ANCHOR: &str = "2026-03-10T12:00:00Z";

pub const SERIAL_L1_123: &str = "AC25W42-L1-00123";
pub const SERIAL_L1_124: &str = "AC25W42-L1-00124";
pub const SERIAL_L2_004: &str = "AC25W42-L2-00004";

const SCREW_VERSION: &str = "screw-v1.3.2";
const LABEL_VERSION: &str = "label-v2.1.0";
const DRAWING_VERSION: &str = "drawing-v1.5.4";

fn hours_before(anchor: Instant, hours: f64) -> Instant {
    anchor - TimeDelta::seconds((hours * 3600.0).round() as i64)
}

fn screw(detected: u32, missing: &[u32], torque_ok: bool) -> Features {
    Features::ScrewCheck(ScrewFeatures {
        expected: 8,
        detected,
        missing_positions: missing.to_vec(),
        torque_ok,
    })
}

fn label(rotation_deg: f64, ocr_text: &str, mes_match: bool, print_quality: f64) -> Features {
    Features::LabelOcr(LabelFeatures {
        has_label: true,
        rotation_deg,
        ocr_text: ocr_text.to_string(),
        mes_match,
        print_quality_score: print_quality,
    })
}

fn drawing(
    misalignment_mm: f64,
    missing_parts: &[&str],
    route_ok: bool,
    cosmetic: &[&str],
) -> Features {
    Features::DrawingConform(DrawingFeatures {
        misalignment_mm,
        missing_parts: missing_parts.iter().map(ToString::to_string).collect(),
        connector_route_ok: route_ok,
        cosmetic_defects: cosmetic.iter().map(ToString::to_string).collect(),
    })
}

struct Row {
    id: &'static str,
    serial: &'static str,
    hours: f64,
    ng: Option<(NgCode, Severity)>,
    confidence: f64,
    cycle_time_sec: f64,
    operator: &'static str,
    features: Features,
}

fn inspection(anchor: Instant, row: Row) -> InspectionEvent {
    let station = row.features.station();
    let (line, work_order, model, tag) = match row.serial {
        SERIAL_L2_004 => ("L2", "WO-10003", "HVAC-Z200", "00004"),
        SERIAL_L1_124 => ("L1", "WO-10001", "HVAC-X100", "00124"),
        _ => ("L1", "WO-10001", "HVAC-X100", "00123"),
    };
    let (model_version, image_kind) = match station {
        Station::ScrewCheck => (SCREW_VERSION, "screw"),
        Station::LabelOCR => (LABEL_VERSION, "label"),
        Station::DrawingConform => (DRAWING_VERSION, "drawing"),
    };
    let verdict = if row.ng.is_some() { "ng" } else { "ok" };
    InspectionEvent {
        id: row.id.to_string(),
        serial: row.serial.to_string(),
        work_order: work_order.to_string(),
        station,
        line: line.to_string(),
        model: model.to_string(),
        model_version: model_version.to_string(),
        captured_at: hours_before(anchor, row.hours),
        result: if row.ng.is_some() {
            InspectionResult::Ng
        } else {
            InspectionResult::Ok
        },
        ng_code: row.ng.map(|(code, _)| code),
        ng_category: row.ng.map(|(code, _)| code.category()),
        severity: row.ng.map_or(Severity::Info, |(_, severity)| severity),
        confidence: row.confidence,
        operator: Some(row.operator.to_string()),
        cycle_time_sec: row.cycle_time_sec,
        image_uri: format!("/mock-images/{image_kind}-{verdict}-{tag}.jpg"),
        features: row.features,
    }
}

#[must_use]
#[rustfmt::skip]
pub fn seed_inspections(anchor: Instant) -> Vec<InspectionEvent> {
    let rows = vec![
        Row { id: "insp-10001", serial: SERIAL_L1_123, hours: 4.0, ng: None, confidence: 0.97, cycle_time_sec: 21.0, operator: "op-aj", features: screw(8, &[], true) },
        Row { id: "insp-10002", serial: SERIAL_L1_123, hours: 3.5, ng: Some((NgCode::LblMisread, Severity::Major)), confidence: 0.62, cycle_time_sec: 18.0, operator: "op-nu", features: label(4.2, "HX-100-AX9", false, 0.74) },
        Row { id: "insp-10003", serial: SERIAL_L1_123, hours: 3.0, ng: None, confidence: 0.9, cycle_time_sec: 26.0, operator: "op-rk", features: drawing(2.1, &[], true, &[]) },
        Row { id: "insp-10004", serial: SERIAL_L1_124, hours: 2.5, ng: Some((NgCode::ScrMissing, Severity::Major)), confidence: 0.81, cycle_time_sec: 23.0, operator: "op-aj", features: screw(6, &[5, 7], false) },
        Row { id: "insp-10005", serial: SERIAL_L1_124, hours: 2.2, ng: None, confidence: 0.89, cycle_time_sec: 17.0, operator: "op-nu", features: label(1.2, "HX-100-AX9", true, 0.9) },
        Row { id: "insp-10006", serial: SERIAL_L1_124, hours: 2.0, ng: Some((NgCode::DrwMisalign, Severity::Critical)), confidence: 0.73, cycle_time_sec: 27.0, operator: "op-rk", features: drawing(7.4, &["Left bracket"], false, &["Scratch on panel"]) },
        Row { id: "insp-10007", serial: SERIAL_L2_004, hours: 1.5, ng: None, confidence: 0.95, cycle_time_sec: 24.0, operator: "op-ml", features: screw(8, &[], true) },
        Row { id: "insp-10008", serial: SERIAL_L2_004, hours: 1.2, ng: None, confidence: 0.92, cycle_time_sec: 19.0, operator: "op-ml", features: label(0.6, "HZ-200-BV1", true, 0.95) },
        Row { id: "insp-10009", serial: SERIAL_L2_004, hours: 1.0, ng: None, confidence: 0.91, cycle_time_sec: 25.0, operator: "op-ml", features: drawing(3.1, &[], true, &[]) },
    ];
    rows.into_iter().map(|row| inspection(anchor, row)).collect()
}

fn unit(
    anchor: Instant,
    serial: &str,
    line: &str,
    work_order: &str,
    model: &str,
    hours: f64,
) -> Unit {
    Unit {
        serial: serial.to_string(),
        line: line.to_string(),
        work_order: work_order.to_string(),
        model: model.to_string(),
        started_at: hours_before(anchor, hours),
    }
}

fn status(
    anchor: Instant,
    station: Station,
    line: &str,
    camera: &str,
    health: StationHealth,
    hours: f64,
) -> StationStatus {
    StationStatus {
        station,
        line: line.to_string(),
        camera: camera.to_string(),
        status: health,
        last_heartbeat: hours_before(anchor, hours),
    }
}

fn window(
    anchor: Instant,
    station: Station,
    model_version: &str,
    span: (f64, f64),
    rates: [f64; 4],
    confusion: [u64; 4],
) -> ModelMetricWindow {
    ModelMetricWindow {
        station,
        model_version: model_version.to_string(),
        window_start: hours_before(anchor, span.0),
        window_end: hours_before(anchor, span.1),
        precision: rates[0],
        recall: rates[1],
        accuracy: rates[2],
        auc: rates[3],
        tp: confusion[0],
        fp: confusion[1],
        tn: confusion[2],
        fn_: confusion[3],
    }
}

fn ticker(
    anchor: Instant,
    id: &str,
    station: Station,
    serial: &str,
    hours: f64,
    ng_code: NgCode,
    severity: Severity,
) -> NgTickerEvent {
    NgTickerEvent {
        id: id.to_string(),
        station,
        serial: serial.to_string(),
        captured_at: hours_before(anchor, hours),
        ng_code,
        severity,
    }
}

/// Full demo dataset with every timestamp relative to `anchor`.
#[must_use]
#[rustfmt::skip]
pub fn seed_dataset(anchor: Instant) -> Dataset {
    Dataset {
        units: vec![
            unit(anchor, SERIAL_L1_123, "L1", "WO-10001", "HVAC-X100", 20.0),
            unit(anchor, SERIAL_L1_124, "L1", "WO-10001", "HVAC-X100", 18.0),
            unit(anchor, SERIAL_L2_004, "L2", "WO-10003", "HVAC-Z200", 8.0),
        ],
        inspections: seed_inspections(anchor),
        model_versions: vec![
            ModelVersion {
                id: "mod-screw-v1".to_string(),
                station: Station::ScrewCheck,
                version: SCREW_VERSION.to_string(),
                deployed_at: hours_before(anchor, 30.0),
                notes: "Torque heuristics tuned; improved false positives.".to_string(),
            },
            ModelVersion {
                id: "mod-label-v1".to_string(),
                station: Station::LabelOCR,
                version: LABEL_VERSION.to_string(),
                deployed_at: hours_before(anchor, 48.0),
                notes: "OCR engine swapped to VisionPro pipeline.".to_string(),
            },
            ModelVersion {
                id: "mod-drawing-v2".to_string(),
                station: Station::DrawingConform,
                version: DRAWING_VERSION.to_string(),
                deployed_at: hours_before(anchor, 16.0),
                notes: "Retrain with 800 new annotated panels.".to_string(),
            },
        ],
        deployments: vec![
            DeploymentEvent {
                id: "dep-1".to_string(),
                station: Station::ScrewCheck,
                model_version: SCREW_VERSION.to_string(),
                deployed_at: hours_before(anchor, 30.0),
                kind: DeploymentKind::Deploy,
                notes: "Baseline release.".to_string(),
            },
            DeploymentEvent {
                id: "dep-2".to_string(),
                station: Station::DrawingConform,
                model_version: DRAWING_VERSION.to_string(),
                deployed_at: hours_before(anchor, 14.0),
                kind: DeploymentKind::Retrain,
                notes: "Retrain after NG spike on misalignment.".to_string(),
            },
        ],
        metric_windows: vec![
            window(anchor, Station::ScrewCheck, SCREW_VERSION, (24.0, 18.0), [0.94, 0.9, 0.96, 0.97], [47, 3, 810, 5]),
            window(anchor, Station::ScrewCheck, SCREW_VERSION, (18.0, 12.0), [0.95, 0.92, 0.97, 0.98], [56, 3, 820, 4]),
            window(anchor, Station::DrawingConform, DRAWING_VERSION, (12.0, 6.0), [0.89, 0.87, 0.93, 0.94], [24, 5, 430, 7]),
            window(anchor, Station::DrawingConform, DRAWING_VERSION, (6.0, 0.0), [0.93, 0.91, 0.95, 0.96], [27, 3, 460, 5]),
        ],
        station_statuses: vec![
            status(anchor, Station::ScrewCheck, "L1", "Cam-01", StationHealth::Online, 0.1),
            status(anchor, Station::LabelOCR, "L1", "Cam-03", StationHealth::Degraded, 0.2),
            status(anchor, Station::DrawingConform, "L1", "Cam-05", StationHealth::Online, 0.1),
            status(anchor, Station::ScrewCheck, "L2", "Cam-02", StationHealth::Online, 0.05),
            status(anchor, Station::LabelOCR, "L2", "Cam-04", StationHealth::Online, 0.05),
            status(anchor, Station::DrawingConform, "L2", "Cam-06", StationHealth::Offline, 1.5),
        ],
        ticker: vec![
            ticker(anchor, "ng-evt-1", Station::LabelOCR, SERIAL_L1_123, 3.5, NgCode::LblMisread, Severity::Major),
            ticker(anchor, "ng-evt-2", Station::ScrewCheck, SERIAL_L1_124, 2.5, NgCode::ScrMissing, Severity::Major),
            ticker(anchor, "ng-evt-3", Station::DrawingConform, SERIAL_L1_124, 2.0, NgCode::DrwMisalign, Severity::Critical),
        ],
    }
}
