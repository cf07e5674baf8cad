// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod error_mapping;
mod errors;
mod export;
mod ingest_payload;
mod params;
mod policy;
mod responses;

pub use error_mapping::{map_error, ApiErrorMapping};
pub use errors::{ApiError, ApiErrorCode};
pub use export::{parse_pdf_export, render_csv, PdfExportJob, CSV_COLUMNS};
pub use ingest_payload::parse_ingest_payload;
pub use params::{
    parse_base_filter, parse_list_params, ListInspectionsParams, BASE_FILTER_PARAMS,
    LIST_FILTER_PARAMS, MAX_CURSOR_BYTES,
};
pub use policy::{authorize, parse_role, Role, View, ROLE_HEADER};
pub use responses::{ApiResponseEnvelope, IngestResponse, PaginatedEnvelope};

pub const CRATE_NAME: &str = "linesight-api";
