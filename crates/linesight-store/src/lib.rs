// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod dataset;
mod error;
pub mod fixtures;
mod memory;
mod snapshot;

use linesight_model::{InspectionEvent, NgTickerEvent};
use std::sync::Arc;

pub use dataset::Dataset;
pub use error::{StoreError, StoreErrorCode};
pub use memory::MemoryStore;
pub use snapshot::StoreSnapshot;

pub const CRATE_NAME: &str = "linesight-store";

/// Owner of all inspection records.
///
/// Readers take an immutable [`StoreSnapshot`] and never observe a partially
/// applied write. `append` is the only mutation.
pub trait InspectionStore: Send + Sync {
    fn snapshot(&self) -> Result<Arc<StoreSnapshot>, StoreError>;

    /// Reserves a fresh inspection id that is not present in the store.
    fn allocate_id(&self) -> Result<String, StoreError>;

    /// Publishes `event` and its optional ticker entry in a single step.
    fn append(
        &self,
        event: InspectionEvent,
        ticker: Option<NgTickerEvent>,
    ) -> Result<(), StoreError>;
}
