// SPDX-License-Identifier: Apache-2.0

use crate::errors::param_error;
use crate::{parse_list_params, ApiError};
use linesight_core::stable_json_hash_hex;
use linesight_model::{format_instant, FieldError, InspectionEvent};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

pub const CSV_COLUMNS: [&str; 10] = [
    "serial",
    "workOrder",
    "station",
    "result",
    "ngCode",
    "severity",
    "modelVersion",
    "confidence",
    "capturedAt",
    "operator",
];

fn quoted(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn csv_cell(event: &InspectionEvent, column: &str) -> String {
    match column {
        "serial" => quoted(&event.serial),
        "workOrder" => quoted(&event.work_order),
        "station" => quoted(event.station.as_str()),
        "result" => quoted(event.result.as_str()),
        "ngCode" => quoted(event.ng_code.map_or("", |c| c.as_str())),
        "severity" => quoted(event.severity.as_str()),
        "modelVersion" => quoted(&event.model_version),
        "confidence" => event.confidence.to_string(),
        "capturedAt" => quoted(&format_instant(&event.captured_at)),
        "operator" => quoted(event.operator.as_deref().unwrap_or("")),
        _ => String::new(),
    }
}

/// Header plus one row per event. Text cells are quoted; absent values are empty strings.
#[must_use]
pub fn render_csv(events: &[InspectionEvent]) -> String {
    let mut lines = Vec::with_capacity(events.len() + 1);
    lines.push(CSV_COLUMNS.join(","));
    for event in events {
        let row: Vec<String> = CSV_COLUMNS.iter().map(|c| csv_cell(event, c)).collect();
        lines.push(row.join(","));
    }
    lines.join("\n")
}

/// Accepted PDF export request. Rendering happens out of band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfExportJob {
    pub job_id: String,
    pub status: String,
    pub message: String,
}

/// Validates a PDF export request and derives its job id.
///
/// The id is a digest of the normalized filter and column list, so repeating a
/// request yields the same job.
pub fn parse_pdf_export(body: &[u8]) -> Result<PdfExportJob, ApiError> {
    let json: Value = if body.iter().all(u8::is_ascii_whitespace) {
        json!({})
    } else {
        serde_json::from_slice(body).map_err(|e| ApiError::invalid_payload(&e.to_string()))?
    };
    let Value::Object(map) = json else {
        return Err(ApiError::invalid_payload("payload must be a JSON object"));
    };

    let mut field_errors = Vec::new();
    for key in map.keys() {
        if !matches!(key.as_str(), "format" | "filters" | "columns") {
            field_errors.push(FieldError::new(key.as_str(), "unknown field"));
        }
    }
    match map.get("format") {
        None | Some(Value::Null) => {}
        Some(Value::String(f)) if f == "pdf" => {}
        Some(_) => field_errors.push(FieldError::new("format", "must be \"pdf\"")),
    }
    let columns = match map.get("columns") {
        None | Some(Value::Null) => CSV_COLUMNS.iter().map(ToString::to_string).collect(),
        Some(Value::Array(items)) => {
            let mut columns = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                match item.as_str() {
                    Some(c) if CSV_COLUMNS.contains(&c) => columns.push(c.to_string()),
                    _ => field_errors.push(FieldError::new(
                        format!("columns[{i}]"),
                        "unknown column",
                    )),
                }
            }
            columns
        }
        Some(_) => {
            field_errors.push(FieldError::new("columns", "must be an array"));
            Vec::new()
        }
    };
    if !field_errors.is_empty() {
        return Err(ApiError::validation_failed(&field_errors));
    }

    let query = filter_query(map.get("filters"))?;
    let params = parse_list_params(&query)?;
    let fingerprint = stable_json_hash_hex(&json!({
        "filters": params.filter,
        "columns": columns,
    }))
    .map_err(|e| ApiError::internal(&e.to_string()))?;
    Ok(PdfExportJob {
        job_id: format!("pdf-{}", &fingerprint[..16]),
        status: "queued".to_string(),
        message: "PDF export request accepted".to_string(),
    })
}

fn filter_query(raw: Option<&Value>) -> Result<BTreeMap<String, String>, ApiError> {
    let mut query = BTreeMap::new();
    let object = match raw {
        None | Some(Value::Null) => return Ok(query),
        Some(Value::Object(object)) => object,
        Some(other) => {
            return Err(ApiError::invalid_params(vec![param_error(
                "filters",
                "must be an object",
                &other.to_string(),
            )]))
        }
    };
    let mut errors = Vec::new();
    for (name, value) in object {
        match value {
            Value::String(s) => {
                query.insert(name.clone(), s.clone());
            }
            Value::Null => {}
            other => errors.push(param_error(name, "must be a string", &other.to_string())),
        }
    }
    if errors.is_empty() {
        Ok(query)
    } else {
        Err(ApiError::invalid_params(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_are_doubled() {
        assert_eq!(quoted(r#"op "night" shift"#), r#""op ""night"" shift""#);
    }

    #[test]
    fn identical_requests_share_a_job() {
        let a = parse_pdf_export(br#"{"filters":{"line":"L1","station":"LabelOCR"}}"#).expect("a");
        let body = br#"{"filters":{"station":"LabelOCR","line":"L1"},"format":"pdf"}"#;
        let b = parse_pdf_export(body).expect("b");
        let c = parse_pdf_export(br#"{"filters":{"line":"L2"}}"#).expect("c");
        assert_eq!(a.job_id, b.job_id);
        assert_ne!(a.job_id, c.job_id);
        assert_eq!(a.status, "queued");
        assert_eq!(a.job_id.len(), "pdf-".len() + 16);
    }

    #[test]
    fn empty_body_requests_everything() {
        let job = parse_pdf_export(b"").expect("empty body");
        let explicit = parse_pdf_export(br#"{"columns":["serial","workOrder","station","result","ngCode","severity","modelVersion","confidence","capturedAt","operator"]}"#)
            .expect("explicit");
        assert_eq!(job.job_id, explicit.job_id);
    }
}
