// SPDX-License-Identifier: Apache-2.0

use crate::ServerConfig;
use chrono::Utc;
use linesight_core::MachineError;
use linesight_store::fixtures::seed_dataset;
use linesight_store::{Dataset, MemoryStore, StoreErrorCode};
use tracing::info;

/// Loads the configured dataset file, or seed fixtures anchored at the current time.
pub fn open_store(config: &ServerConfig) -> Result<MemoryStore, MachineError> {
    let dataset = match &config.dataset_path {
        Some(path) => Dataset::from_path(path).map_err(|e| {
            let code = match e.code {
                StoreErrorCode::Io => "dataset_unreadable",
                _ => "dataset_invalid",
            };
            MachineError::new(code, &e.message).with_detail("path", &path.display().to_string())
        })?,
        None => {
            info!("no dataset configured, serving seed fixtures");
            seed_dataset(Utc::now())
        }
    };
    MemoryStore::from_dataset(dataset)
        .map_err(|e| MachineError::new("dataset_invalid", &e.to_string()))
}
