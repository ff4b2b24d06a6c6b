// Multiply-then-divide with a 512-bit intermediate.

use alloy_primitives::{Uint, U256};

use crate::error::MathError;

type U512 = Uint<512, 8>;

#[inline]
fn widen(x: U256) -> U512 {
    let l = x.as_limbs();
    U512::from_limbs([l[0], l[1], l[2], l[3], 0, 0, 0, 0])
}

#[inline]
fn narrow(x: U512) -> Result<U256, MathError> {
    let l = x.as_limbs();
    if l[4..].iter().any(|&limb| limb != 0) {
        return Err(MathError::ArithmeticOverflow);
    }
    Ok(U256::from_limbs([l[0], l[1], l[2], l[3]]))
}

/// Computes `floor(a * b / denominator)` without losing precision in the product.
///
/// Fails with `DivisionByZero` if `denominator == 0` and with
/// `ArithmeticOverflow` if the quotient does not fit 256 bits.
pub fn mul_div(a: U256, b: U256, denominator: U256) -> Result<U256, MathError> {
    if denominator.is_zero() {
        return Err(MathError::DivisionByZero);
    }
    let product = widen(a).wrapping_mul(widen(b));
    narrow(product / widen(denominator))
}

/// Computes `ceil(a * b / denominator)`.
pub fn mul_div_rounding_up(a: U256, b: U256, denominator: U256) -> Result<U256, MathError> {
    if denominator.is_zero() {
        return Err(MathError::DivisionByZero);
    }
    let product = widen(a).wrapping_mul(widen(b));
    let denominator = widen(denominator);
    let quotient = narrow(product / denominator)?;
    if (product % denominator).is_zero() {
        Ok(quotient)
    } else {
        quotient
            .checked_add(U256::ONE)
            .ok_or(MathError::ArithmeticOverflow)
    }
}

/// Computes `ceil(a / b)`.
pub fn div_rounding_up(a: U256, b: U256) -> Result<U256, MathError> {
    if b.is_zero() {
        return Err(MathError::DivisionByZero);
    }
    let (quotient, remainder) = a.div_rem(b);
    if remainder.is_zero() {
        Ok(quotient)
    } else {
        // quotient < U256::MAX whenever b > 1, and remainder is zero when b == 1
        Ok(quotient + U256::ONE)
    }
}

/// Narrows a 256-bit value to `u128`.
#[inline]
pub fn to_u128(x: U256) -> Result<u128, MathError> {
    let l = x.as_limbs();
    if l[2] != 0 || l[3] != 0 {
        return Err(MathError::ArithmeticOverflow);
    }
    Ok((l[0] as u128) | ((l[1] as u128) << 64))
}

/// Narrows a 256-bit value to a non-negative `i128`.
#[inline]
pub fn to_i128(x: U256) -> Result<i128, MathError> {
    let v = to_u128(x)?;
    i128::try_from(v).map_err(|_| MathError::ArithmeticOverflow)
}
