// CoveSwap Swap Package
//
// The swap step loop and the fee accountant it feeds. Tick storage is
// reached through `coveswap_tick::TickStore`; oracle cumulatives are
// requested lazily through a caller-supplied closure, only when an
// initialized tick is crossed.

#![no_std]

#[cfg(test)]
extern crate std;

pub mod engine;
pub mod error;
pub mod fees;
pub mod types;

pub use engine::{execute_swap, resolve_price_limit};
pub use error::SwapError;
pub use fees::{is_valid_fee_protocol, FeeAccountant};
pub use types::{PoolSnapshot, SwapOutcome, SwapParams};
