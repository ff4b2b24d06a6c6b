// CoveSwap Math Package
//
// Fixed-point price math for the concentrated-liquidity pool. Prices are
// square roots scaled by 2^96 (Q64.96) and fee accumulators are Q128.128,
// both carried in 256-bit integers with 512-bit intermediates where a
// product can exceed a word.

#![no_std]

#[cfg(test)]
extern crate std;

pub mod constants;
pub mod error;
pub mod full_math;
pub mod liquidity;
pub mod sqrt_price;
pub mod swap_math;
pub mod tick_math;

pub use alloy_primitives::U256;

pub use constants::*;
pub use error::MathError;

pub use full_math::{div_rounding_up, mul_div, mul_div_rounding_up, to_u128};

pub use tick_math::{get_sqrt_ratio_at_tick, get_tick_at_sqrt_ratio};

pub use sqrt_price::{get_next_sqrt_price_from_input, get_next_sqrt_price_from_output};

pub use liquidity::{
    add_delta,
    get_amount_0_delta,
    get_amount_1_delta,
    get_amount_0_delta_signed,
    get_amount_1_delta_signed,
};

pub use swap_math::{compute_swap_step, SwapStep};
