// SPDX-License-Identifier: Apache-2.0

use crate::errors::{param_error, ApiError};
use linesight_model::{parse_instant, InspectionResult, NgCode, Station};
use linesight_query::{BaseFilter, InspectionFilter};
use serde_json::Value;
use std::collections::BTreeMap;

pub const BASE_FILTER_PARAMS: [&str; 5] = ["from", "to", "line", "station", "model"];
pub const LIST_FILTER_PARAMS: [&str; 5] = ["result", "ngCode", "serial", "workOrder", "cursor"];
pub const MAX_CURSOR_BYTES: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListInspectionsParams {
    pub filter: InspectionFilter,
    pub cursor: Option<String>,
}

/// Collects every parameter problem before failing.
struct ParamReader<'a> {
    query: &'a BTreeMap<String, String>,
    errors: Vec<Value>,
}

impl<'a> ParamReader<'a> {
    fn new(query: &'a BTreeMap<String, String>, allowed: &[&str]) -> Self {
        let errors = query
            .iter()
            .filter(|(name, _)| !allowed.contains(&name.as_str()))
            .map(|(name, value)| param_error(name, "unknown", value))
            .collect();
        Self { query, errors }
    }

    /// Empty values count as absent.
    fn text(&self, name: &str) -> Option<&'a str> {
        self.query
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    fn owned(&self, name: &str) -> Option<String> {
        self.text(name).map(ToString::to_string)
    }

    fn parsed<T, E>(&mut self, name: &str, parse: impl Fn(&str) -> Result<T, E>) -> Option<T> {
        let raw = self.text(name)?;
        match parse(raw) {
            Ok(value) => Some(value),
            Err(_) => {
                self.errors.push(param_error(name, "invalid", raw));
                None
            }
        }
    }

    fn base(&mut self) -> BaseFilter {
        BaseFilter {
            from: self.parsed("from", parse_instant),
            to: self.parsed("to", parse_instant),
            line: self.owned("line"),
            station: self.parsed("station", Station::parse),
            model: self.owned("model"),
        }
    }

    fn finish<T>(self, value: T) -> Result<T, ApiError> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(ApiError::invalid_params(self.errors))
        }
    }
}

/// Filter for summary, pareto, trend and model-metrics requests.
pub fn parse_base_filter(query: &BTreeMap<String, String>) -> Result<BaseFilter, ApiError> {
    let mut reader = ParamReader::new(query, &BASE_FILTER_PARAMS);
    let base = reader.base();
    reader.finish(base)
}

/// Filter and cursor for listing and CSV export.
pub fn parse_list_params(
    query: &BTreeMap<String, String>,
) -> Result<ListInspectionsParams, ApiError> {
    let allowed: Vec<&str> = BASE_FILTER_PARAMS
        .iter()
        .chain(LIST_FILTER_PARAMS.iter())
        .copied()
        .collect();
    let mut reader = ParamReader::new(query, &allowed);
    let base = reader.base();
    let filter = InspectionFilter {
        base,
        result: reader.parsed("result", InspectionResult::parse),
        ng_code: reader.parsed("ngCode", NgCode::parse),
        serial: reader.owned("serial"),
        work_order: reader.owned("workOrder"),
    };
    let cursor = reader.owned("cursor");
    if let Some(value) = &cursor {
        if value.len() > MAX_CURSOR_BYTES {
            reader.errors.push(param_error("cursor", "too long", value));
        }
    }
    reader.finish(ListInspectionsParams { filter, cursor })
}
