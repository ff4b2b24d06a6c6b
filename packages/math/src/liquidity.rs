// Token amounts backing a liquidity position between two sqrt prices.
//
// Amounts owed *to* the pool are rounded up, amounts paid *by* the pool are
// rounded down, so rounding never leaks value out of the pool.

use alloy_primitives::U256;

use crate::constants::{Q96, RESOLUTION};
use crate::error::MathError;
use crate::full_math::{div_rounding_up, mul_div, mul_div_rounding_up, to_i128};

#[inline]
fn sorted(a: U256, b: U256) -> (U256, U256) {
    if a > b {
        (b, a)
    } else {
        (a, b)
    }
}

/// Amount of token0 between two sqrt prices for `liquidity`:
/// `liquidity * (sqrt_b - sqrt_a) / (sqrt_a * sqrt_b)`.
pub fn get_amount_0_delta(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: u128,
    round_up: bool,
) -> Result<U256, MathError> {
    let (sqrt_a, sqrt_b) = sorted(sqrt_ratio_a_x96, sqrt_ratio_b_x96);
    if sqrt_a.is_zero() {
        return Err(MathError::OutOfRange);
    }

    let numerator1 = U256::from(liquidity) << RESOLUTION;
    let numerator2 = sqrt_b - sqrt_a;

    if round_up {
        div_rounding_up(mul_div_rounding_up(numerator1, numerator2, sqrt_b)?, sqrt_a)
    } else {
        Ok(mul_div(numerator1, numerator2, sqrt_b)? / sqrt_a)
    }
}

/// Amount of token1 between two sqrt prices for `liquidity`:
/// `liquidity * (sqrt_b - sqrt_a)`.
pub fn get_amount_1_delta(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: u128,
    round_up: bool,
) -> Result<U256, MathError> {
    let (sqrt_a, sqrt_b) = sorted(sqrt_ratio_a_x96, sqrt_ratio_b_x96);
    let liquidity = U256::from(liquidity);

    if round_up {
        mul_div_rounding_up(liquidity, sqrt_b - sqrt_a, Q96)
    } else {
        mul_div(liquidity, sqrt_b - sqrt_a, Q96)
    }
}

/// Signed token0 delta for a signed liquidity change.
///
/// Adding liquidity yields a positive amount rounded up (owed to the pool);
/// removing yields a negative amount rounded down in magnitude.
pub fn get_amount_0_delta_signed(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: i128,
) -> Result<i128, MathError> {
    if liquidity < 0 {
        let amount = get_amount_0_delta(
            sqrt_ratio_a_x96,
            sqrt_ratio_b_x96,
            liquidity.unsigned_abs(),
            false,
        )?;
        Ok(-to_i128(amount)?)
    } else {
        let amount =
            get_amount_0_delta(sqrt_ratio_a_x96, sqrt_ratio_b_x96, liquidity as u128, true)?;
        to_i128(amount)
    }
}

/// Signed token1 delta for a signed liquidity change.
pub fn get_amount_1_delta_signed(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: i128,
) -> Result<i128, MathError> {
    if liquidity < 0 {
        let amount = get_amount_1_delta(
            sqrt_ratio_a_x96,
            sqrt_ratio_b_x96,
            liquidity.unsigned_abs(),
            false,
        )?;
        Ok(-to_i128(amount)?)
    } else {
        let amount =
            get_amount_1_delta(sqrt_ratio_a_x96, sqrt_ratio_b_x96, liquidity as u128, true)?;
        to_i128(amount)
    }
}

/// Applies a signed liquidity delta.
///
/// Fails with `InsufficientLiquidity` on underflow and `ArithmeticOverflow`
/// when the sum exceeds `u128::MAX`.
#[inline]
pub fn add_delta(liquidity: u128, delta: i128) -> Result<u128, MathError> {
    if delta < 0 {
        liquidity
            .checked_sub(delta.unsigned_abs())
            .ok_or(MathError::InsufficientLiquidity)
    } else {
        liquidity
            .checked_add(delta as u128)
            .ok_or(MathError::ArithmeticOverflow)
    }
}
