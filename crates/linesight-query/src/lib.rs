// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod aggregate;
mod filters;
mod ingest;
mod limits;
mod live;
mod metrics;
mod paginate;
mod query_error;
mod service;
mod timeline;
mod trend;

pub use aggregate::{pareto, summarize, NgCount, ParetoPoint, Summary};
pub use filters::{BaseFilter, InspectionFilter};
pub use ingest::{ingest, IngestAck, InspectionDraft, IngestRequest};
pub use limits::{QueryLimits, DEFAULT_PAGE_SIZE};
pub use live::{live_snapshot, LiveSnapshot};
pub use metrics::{model_metrics, ModelMetrics};
pub use paginate::{filtered_sorted, list_inspections, InspectionListItem, Page};
pub use query_error::{QueryError, QueryErrorCode};
pub use service::QueryService;
pub use timeline::{unit_timeline, TimelineStep, UnitStatus, UnitTimeline};
pub use trend::{trend, TrendPoint};

pub const CRATE_NAME: &str = "linesight-query";
