use crate::types::Observation;

/// Storage backing the observation ring buffer.
///
/// Slots that were never written read back as `Observation::default()`.
pub trait ObservationStore {
    fn read_observation(&self, index: u32) -> Observation;
    fn write_observation(&mut self, index: u32, observation: &Observation);
}
