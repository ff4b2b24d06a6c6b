// Single-step sqrt price updates for a given liquidity and amount.

use alloy_primitives::U256;

use crate::constants::{Q96, RESOLUTION};
use crate::error::MathError;
use crate::full_math::{div_rounding_up, mul_div, mul_div_rounding_up};

/// Next sqrt price after adding (or removing) `amount` of token0, rounded up.
///
/// Rounding up keeps the price on the side that never under-charges the trader:
/// `liquidity * sqrt_p / (liquidity ± amount * sqrt_p)`.
fn next_sqrt_price_from_amount_0_rounding_up(
    sqrt_price_x96: U256,
    liquidity: u128,
    amount: U256,
    add: bool,
) -> Result<U256, MathError> {
    if amount.is_zero() {
        return Ok(sqrt_price_x96);
    }
    let numerator1 = U256::from(liquidity) << RESOLUTION;

    if add {
        if let Some(product) = amount.checked_mul(sqrt_price_x96) {
            if let Some(denominator) = numerator1.checked_add(product) {
                return mul_div_rounding_up(numerator1, sqrt_price_x96, denominator);
            }
        }
        // liquidity / (liquidity / sqrt_p + amount), less precise but cannot overflow
        let denominator = (numerator1 / sqrt_price_x96)
            .checked_add(amount)
            .ok_or(MathError::ArithmeticOverflow)?;
        div_rounding_up(numerator1, denominator)
    } else {
        let product = amount
            .checked_mul(sqrt_price_x96)
            .ok_or(MathError::InsufficientLiquidity)?;
        if numerator1 <= product {
            return Err(MathError::InsufficientLiquidity);
        }
        mul_div_rounding_up(numerator1, sqrt_price_x96, numerator1 - product)
    }
}

/// Next sqrt price after adding (or removing) `amount` of token1, rounded down.
fn next_sqrt_price_from_amount_1_rounding_down(
    sqrt_price_x96: U256,
    liquidity: u128,
    amount: U256,
    add: bool,
) -> Result<U256, MathError> {
    let liquidity = U256::from(liquidity);

    if add {
        let quotient = mul_div(amount, Q96, liquidity)?;
        sqrt_price_x96
            .checked_add(quotient)
            .ok_or(MathError::ArithmeticOverflow)
    } else {
        let quotient = mul_div_rounding_up(amount, Q96, liquidity)?;
        if sqrt_price_x96 <= quotient {
            return Err(MathError::InsufficientLiquidity);
        }
        Ok(sqrt_price_x96 - quotient)
    }
}

/// Sqrt price reached after `amount_in` of the input token enters the range.
///
/// Rounds so the price never overshoots the amount actually paid in.
pub fn get_next_sqrt_price_from_input(
    sqrt_price_x96: U256,
    liquidity: u128,
    amount_in: U256,
    zero_for_one: bool,
) -> Result<U256, MathError> {
    if sqrt_price_x96.is_zero() {
        return Err(MathError::OutOfRange);
    }
    if liquidity == 0 {
        return Err(MathError::InsufficientLiquidity);
    }

    if zero_for_one {
        next_sqrt_price_from_amount_0_rounding_up(sqrt_price_x96, liquidity, amount_in, true)
    } else {
        next_sqrt_price_from_amount_1_rounding_down(sqrt_price_x96, liquidity, amount_in, true)
    }
}

/// Sqrt price reached after `amount_out` of the output token leaves the range.
///
/// Rounds so the price always moves at least far enough to cover the output.
pub fn get_next_sqrt_price_from_output(
    sqrt_price_x96: U256,
    liquidity: u128,
    amount_out: U256,
    zero_for_one: bool,
) -> Result<U256, MathError> {
    if sqrt_price_x96.is_zero() {
        return Err(MathError::OutOfRange);
    }
    if liquidity == 0 {
        return Err(MathError::InsufficientLiquidity);
    }

    if zero_for_one {
        next_sqrt_price_from_amount_1_rounding_down(sqrt_price_x96, liquidity, amount_out, false)
    } else {
        next_sqrt_price_from_amount_0_rounding_up(sqrt_price_x96, liquidity, amount_out, false)
    }
}
