// One step of a swap within a single range of constant liquidity.

use alloy_primitives::U256;

use crate::constants::FEE_DENOMINATOR;
use crate::error::MathError;
use crate::full_math::{mul_div, mul_div_rounding_up};
use crate::liquidity::{get_amount_0_delta, get_amount_1_delta};
use crate::sqrt_price::{get_next_sqrt_price_from_input, get_next_sqrt_price_from_output};

/// Outcome of a single swap step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SwapStep {
    /// Price after the step, never beyond the step target
    pub sqrt_price_next_x96: U256,
    /// Input consumed by the step, excluding the fee
    pub amount_in: U256,
    /// Output released by the step
    pub amount_out: U256,
    /// Fee charged on the input side
    pub fee_amount: U256,
}

/// Computes how far the price moves from `sqrt_price_current_x96` toward
/// `sqrt_price_target_x96` given `liquidity` and the remaining amount.
///
/// `amount_remaining > 0` is exact input (fee included in the amount),
/// `amount_remaining < 0` is exact output. The direction is implied by the
/// relative order of the current and target price. `fee_bps` is charged on
/// the input side against a denominator of 10_000.
pub fn compute_swap_step(
    sqrt_price_current_x96: U256,
    sqrt_price_target_x96: U256,
    liquidity: u128,
    amount_remaining: i128,
    fee_bps: u32,
) -> Result<SwapStep, MathError> {
    if fee_bps >= FEE_DENOMINATOR {
        return Err(MathError::OutOfRange);
    }

    let zero_for_one = sqrt_price_current_x96 >= sqrt_price_target_x96;
    let exact_in = amount_remaining >= 0;
    let remaining = U256::from(amount_remaining.unsigned_abs());
    let denominator = U256::from(FEE_DENOMINATOR);
    let fee = U256::from(fee_bps);

    let mut amount_in = U256::ZERO;
    let mut amount_out = U256::ZERO;

    let sqrt_price_next_x96 = if exact_in {
        let remaining_less_fee = mul_div(remaining, denominator - fee, denominator)?;
        amount_in = if zero_for_one {
            get_amount_0_delta(sqrt_price_target_x96, sqrt_price_current_x96, liquidity, true)?
        } else {
            get_amount_1_delta(sqrt_price_current_x96, sqrt_price_target_x96, liquidity, true)?
        };
        if remaining_less_fee >= amount_in {
            sqrt_price_target_x96
        } else {
            get_next_sqrt_price_from_input(
                sqrt_price_current_x96,
                liquidity,
                remaining_less_fee,
                zero_for_one,
            )?
        }
    } else {
        amount_out = if zero_for_one {
            get_amount_1_delta(sqrt_price_target_x96, sqrt_price_current_x96, liquidity, false)?
        } else {
            get_amount_0_delta(sqrt_price_current_x96, sqrt_price_target_x96, liquidity, false)?
        };
        if remaining >= amount_out {
            sqrt_price_target_x96
        } else {
            get_next_sqrt_price_from_output(
                sqrt_price_current_x96,
                liquidity,
                remaining,
                zero_for_one,
            )?
        }
    };

    let reached_target = sqrt_price_target_x96 == sqrt_price_next_x96;

    if zero_for_one {
        if !(reached_target && exact_in) {
            amount_in =
                get_amount_0_delta(sqrt_price_next_x96, sqrt_price_current_x96, liquidity, true)?;
        }
        if !(reached_target && !exact_in) {
            amount_out =
                get_amount_1_delta(sqrt_price_next_x96, sqrt_price_current_x96, liquidity, false)?;
        }
    } else {
        if !(reached_target && exact_in) {
            amount_in =
                get_amount_1_delta(sqrt_price_current_x96, sqrt_price_next_x96, liquidity, true)?;
        }
        if !(reached_target && !exact_in) {
            amount_out =
                get_amount_0_delta(sqrt_price_current_x96, sqrt_price_next_x96, liquidity, false)?;
        }
    }

    // never pay out more than the exact output requested
    if !exact_in && amount_out > remaining {
        amount_out = remaining;
    }

    let fee_amount = if exact_in && sqrt_price_next_x96 != sqrt_price_target_x96 {
        // the step ends mid-range: whatever input is left over is the fee
        remaining
            .checked_sub(amount_in)
            .ok_or(MathError::ArithmeticOverflow)?
    } else {
        mul_div_rounding_up(amount_in, fee, denominator - fee)?
    };

    Ok(SwapStep {
        sqrt_price_next_x96,
        amount_in,
        amount_out,
        fee_amount,
    })
}
