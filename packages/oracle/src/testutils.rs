//! In-memory observation storage for tests.

use std::collections::BTreeMap;

use crate::store::ObservationStore;
use crate::types::Observation;

#[derive(Clone, Debug, Default)]
pub struct MemoryObservationStore {
    pub slots: BTreeMap<u32, Observation>,
}

impl MemoryObservationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ObservationStore for MemoryObservationStore {
    fn read_observation(&self, index: u32) -> Observation {
        self.slots.get(&index).cloned().unwrap_or_default()
    }

    fn write_observation(&mut self, index: u32, observation: &Observation) {
        self.slots.insert(index, observation.clone());
    }
}
