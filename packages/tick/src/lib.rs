// CoveSwap Tick Package
//
// Sparse per-tick liquidity records and the 256-bit word bitmap used to
// locate the next initialized tick in a swap.

#![no_std]

#[cfg(any(test, feature = "testutils"))]
extern crate std;

pub mod bitmap;
pub mod error;
pub mod fee_growth;
pub mod store;
pub mod types;
pub mod update;

#[cfg(feature = "testutils")]
pub mod testutils;

pub use bitmap::{compress, flip_tick, next_initialized_tick_within_one_word, position};
pub use error::TickError;
pub use fee_growth::{get_cumulatives_inside, get_fee_growth_inside};
pub use store::TickStore;
pub use types::{Accumulators, TickInfo};
pub use update::{
    clear_tick,
    cross_tick,
    is_valid_tick,
    tick_spacing_to_max_liquidity_per_tick,
    update_tick,
    validate_tick_range,
};
