// CoveSwap Oracle Package
//
// Bounded ring buffer of cumulative tick and seconds-per-liquidity samples,
// from which time-weighted averages over any retained window are derived.

#![no_std]

#[cfg(any(test, feature = "testutils"))]
extern crate std;

pub mod error;
pub mod observation;
pub mod store;
pub mod types;

#[cfg(feature = "testutils")]
pub mod testutils;

pub use error::OracleError;
pub use observation::{grow, initialize, observe_single, transform, write};
pub use store::ObservationStore;
pub use types::Observation;
