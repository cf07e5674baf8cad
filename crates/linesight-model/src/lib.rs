// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod enums;
mod features;
mod inspection;
mod live;
mod metrics;
mod time;
mod unit;
mod validation;

pub use enums::{
    DeploymentKind, InspectionResult, NgCategory, NgCode, ParseError, Severity, Station,
    StationHealth,
};
pub use features::{DrawingFeatures, Features, LabelFeatures, ScrewFeatures};
pub use inspection::InspectionEvent;
pub use live::{LiveThumbnail, NgTickerEvent, StationStatus};
pub use metrics::{DeploymentEvent, ModelMetricWindow, ModelVersion};
pub use time::{format_instant, parse_instant, truncate_to_hour, Instant};
pub use unit::Unit;
pub use validation::{FieldError, ValidationError};

pub const CRATE_NAME: &str = "linesight-model";
