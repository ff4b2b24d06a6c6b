#![no_std]

#[cfg(test)]
extern crate std;

pub mod error;
pub mod fees;
pub mod manager;
pub mod types;

pub use error::PositionError;
pub use fees::calculate_pending_fees;
pub use manager::{collect_owed, credit_owed, has_liquidity, is_empty, update_position};
pub use types::Position;
