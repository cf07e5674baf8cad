// SPDX-License-Identifier: Apache-2.0

use crate::{Dataset, InspectionStore, StoreError, StoreSnapshot};
use linesight_model::{InspectionEvent, NgTickerEvent};
use std::sync::{Arc, Mutex, RwLock};

const ID_PREFIX: &str = "insp-";

/// Copy-on-write store. Readers clone the current `Arc`; the single writer
/// builds the next snapshot under `writer` and swaps it in.
#[derive(Debug)]
pub struct MemoryStore {
    current: RwLock<Arc<StoreSnapshot>>,
    writer: Mutex<u64>,
}

impl MemoryStore {
    pub fn from_dataset(dataset: Dataset) -> Result<Self, StoreError> {
        let next_seq = first_free_seq(&dataset);
        let snapshot = StoreSnapshot::from_dataset(dataset)?;
        Ok(Self {
            current: RwLock::new(Arc::new(snapshot)),
            writer: Mutex::new(next_seq),
        })
    }

    #[must_use]
    pub fn empty() -> Self {
        Self {
            current: RwLock::new(Arc::new(StoreSnapshot::default())),
            writer: Mutex::new(1),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::empty()
    }
}

fn first_free_seq(dataset: &Dataset) -> u64 {
    dataset
        .inspections
        .iter()
        .filter_map(|e| e.id.strip_prefix(ID_PREFIX)?.parse::<u64>().ok())
        .max()
        .map_or(1, |max| max.saturating_add(1))
}

impl InspectionStore for MemoryStore {
    fn snapshot(&self) -> Result<Arc<StoreSnapshot>, StoreError> {
        let guard = self
            .current
            .read()
            .map_err(|_| StoreError::unavailable("snapshot"))?;
        Ok(Arc::clone(&guard))
    }

    fn allocate_id(&self) -> Result<String, StoreError> {
        let mut seq = self
            .writer
            .lock()
            .map_err(|_| StoreError::unavailable("writer"))?;
        let snapshot = self.snapshot()?;
        loop {
            let candidate = format!("{ID_PREFIX}{}", *seq);
            *seq = seq.saturating_add(1);
            if !snapshot.contains_id(&candidate) {
                return Ok(candidate);
            }
        }
    }

    fn append(
        &self,
        event: InspectionEvent,
        ticker: Option<NgTickerEvent>,
    ) -> Result<(), StoreError> {
        let _writer = self
            .writer
            .lock()
            .map_err(|_| StoreError::unavailable("writer"))?;
        event.validate()?;
        let next = self.snapshot()?.with_appended(event, ticker)?;
        let mut current = self
            .current
            .write()
            .map_err(|_| StoreError::unavailable("snapshot"))?;
        *current = Arc::new(next);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{seed_dataset, FIXTURE_ANCHOR};
    use linesight_model::parse_instant;

    fn store() -> MemoryStore {
        let anchor = parse_instant(FIXTURE_ANCHOR).expect("anchor");
        MemoryStore::from_dataset(seed_dataset(anchor)).expect("seed store")
    }

    #[test]
    fn allocation_continues_after_seeded_ids() {
        let store = store();
        assert_eq!(store.allocate_id().expect("id"), "insp-10010");
        assert_eq!(store.allocate_id().expect("id"), "insp-10011");
    }

    #[test]
    fn empty_store_starts_at_one() {
        let store = MemoryStore::empty();
        assert_eq!(store.allocate_id().expect("id"), "insp-1");
        assert!(store.snapshot().expect("snapshot").is_empty());
    }

    #[test]
    fn held_snapshot_is_unaffected_by_append() {
        let store = store();
        let before = store.snapshot().expect("snapshot");
        let mut event = before.get("insp-10001").expect("seed event").clone();
        event.id = store.allocate_id().expect("id");
        store.append(event, None).expect("append");
        assert_eq!(before.len(), 9);
        assert_eq!(store.snapshot().expect("snapshot").len(), 10);
    }
}
