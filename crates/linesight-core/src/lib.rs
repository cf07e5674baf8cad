// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod canonical;
mod errors;

pub use canonical::{sha256_hex, stable_json_bytes, stable_json_hash_hex};
pub use errors::{ExitCode, MachineError};

pub const CRATE_NAME: &str = "linesight-core";

pub const ENV_LINESIGHT_BIND: &str = "LINESIGHT_BIND";
pub const ENV_LINESIGHT_LOG_JSON: &str = "LINESIGHT_LOG_JSON";
pub const ENV_LINESIGHT_DATASET_PATH: &str = "LINESIGHT_DATASET_PATH";
pub const ENV_LINESIGHT_PAGE_SIZE: &str = "LINESIGHT_PAGE_SIZE";
pub const ENV_LINESIGHT_MAX_BODY_BYTES: &str = "LINESIGHT_MAX_BODY_BYTES";
pub const ENV_LINESIGHT_SHUTDOWN_DRAIN_MS: &str = "LINESIGHT_SHUTDOWN_DRAIN_MS";
