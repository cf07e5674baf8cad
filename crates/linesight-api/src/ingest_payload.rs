// SPDX-License-Identifier: Apache-2.0

use crate::ApiError;
use linesight_model::{
    parse_instant, Features, FieldError, InspectionResult, NgCategory, NgCode, Severity, Station,
};
use linesight_query::{IngestRequest, InspectionDraft};
use serde_json::{Map, Value};

const INGEST_FIELDS: [&str; 17] = [
    "id",
    "serial",
    "workOrder",
    "station",
    "line",
    "model",
    "modelVersion",
    "capturedAt",
    "result",
    "ngCode",
    "ngCategory",
    "severity",
    "confidence",
    "operator",
    "cycleTimeSec",
    "imageUri",
    "features",
];

struct Fields<'a> {
    map: &'a Map<String, Value>,
    errors: Vec<FieldError>,
}

impl<'a> Fields<'a> {
    fn value(&mut self, name: &str, required: bool) -> Option<&'a Value> {
        match self.map.get(name) {
            Some(Value::Null) | None => {
                if required {
                    self.errors.push(FieldError::new(name, "required"));
                }
                None
            }
            Some(value) => Some(value),
        }
    }

    fn string(&mut self, name: &str, required: bool) -> Option<String> {
        match self.value(name, required)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::String(_) => {
                self.errors.push(FieldError::new(name, "must not be empty"));
                None
            }
            _ => {
                self.errors.push(FieldError::new(name, "must be a string"));
                None
            }
        }
    }

    fn parsed<T, E: std::fmt::Display>(
        &mut self,
        name: &str,
        required: bool,
        parse: impl Fn(&str) -> Result<T, E>,
    ) -> Option<T> {
        let raw = self.string(name, required)?;
        match parse(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                self.errors.push(FieldError::new(name, e.to_string()));
                None
            }
        }
    }

    fn number(&mut self, name: &str) -> Option<f64> {
        match self.value(name, true)?.as_f64() {
            Some(n) => Some(n),
            None => {
                self.errors.push(FieldError::new(name, "must be a number"));
                None
            }
        }
    }

    fn features(&mut self) -> Option<Features> {
        let raw = self.value("features", true)?;
        match serde_json::from_value::<Features>(raw.clone()) {
            Ok(features) => Some(features),
            Err(e) => {
                self.errors.push(FieldError::new("features", e.to_string()));
                None
            }
        }
    }
}

/// Parses a station's inspection report.
///
/// Field problems are reported together as `ValidationFailed`. The station in
/// the route must match the payload station.
pub fn parse_ingest_payload(route_station: &str, body: &[u8]) -> Result<IngestRequest, ApiError> {
    let json: Value =
        serde_json::from_slice(body).map_err(|e| ApiError::invalid_payload(&e.to_string()))?;
    let Value::Object(map) = &json else {
        return Err(ApiError::invalid_payload("payload must be a JSON object"));
    };

    let mut fields = Fields {
        map,
        errors: map
            .keys()
            .filter(|k| !INGEST_FIELDS.contains(&k.as_str()))
            .map(|k| FieldError::new(k.as_str(), "unknown field"))
            .collect(),
    };
    let id = fields.string("id", false);
    let serial = fields.string("serial", true);
    let work_order = fields.string("workOrder", true);
    let station = fields.parsed("station", true, Station::parse);
    let line = fields.string("line", true);
    let model = fields.string("model", true);
    let model_version = fields.string("modelVersion", true);
    let captured_at = fields.parsed("capturedAt", true, parse_instant);
    let result = fields.parsed("result", true, InspectionResult::parse);
    let ng_code = fields.parsed("ngCode", false, NgCode::parse);
    let ng_category = fields.parsed("ngCategory", false, NgCategory::parse);
    let severity = fields.parsed("severity", true, Severity::parse);
    let confidence = fields.number("confidence");
    let operator = fields.string("operator", false);
    let cycle_time_sec = fields.number("cycleTimeSec");
    let image_uri = fields.string("imageUri", true);
    let features = fields.features();

    let draft = match (
        serial,
        work_order,
        station,
        line,
        model,
        model_version,
        captured_at,
        result,
        severity,
        confidence,
        cycle_time_sec,
        image_uri,
        features,
    ) {
        (
            Some(serial),
            Some(work_order),
            Some(station),
            Some(line),
            Some(model),
            Some(model_version),
            Some(captured_at),
            Some(result),
            Some(severity),
            Some(confidence),
            Some(cycle_time_sec),
            Some(image_uri),
            Some(features),
        ) if fields.errors.is_empty() => InspectionDraft {
            serial,
            work_order,
            station,
            line,
            model,
            model_version,
            captured_at,
            result,
            ng_code,
            ng_category,
            severity,
            confidence,
            operator,
            cycle_time_sec,
            image_uri,
            features,
        },
        _ => return Err(ApiError::validation_failed(&fields.errors)),
    };

    if draft.station.as_str() != route_station {
        return Err(ApiError::station_mismatch(
            route_station,
            draft.station.as_str(),
        ));
    }
    Ok(IngestRequest { id, draft })
}
