// Conversions between ticks and Q64.96 sqrt prices.
//
// sqrt(1.0001^tick) * 2^96 is evaluated as a product of precomputed
// Q128.128 factors sqrt(1.0001^-(2^i)), one per set bit of |tick|. The
// inverse goes through a fixed-point log2.

use alloy_primitives::{I256, U256};

use crate::constants::{MAX_SQRT_RATIO, MAX_TICK, MIN_SQRT_RATIO, MIN_TICK, Q128};
use crate::error::MathError;

/// sqrt(1.0001^-1) in Q128.128.
const TICK_FACTOR_BIT0: u128 = 0xfffcb933bd6fad37aa2d162d1a594001;

/// sqrt(1.0001^-(2^i)) in Q128.128 for bits 1..=19 of |tick|.
const TICK_FACTORS: [(u32, u128); 19] = [
    (0x2, 0xfff97272373d413259a46990580e213a),
    (0x4, 0xfff2e50f5f656932ef12357cf3c7fdcc),
    (0x8, 0xffe5caca7e10e4e61c3624eaa0941cd0),
    (0x10, 0xffcb9843d60f6159c9db58835c926644),
    (0x20, 0xff973b41fa98c081472e6896dfb254c0),
    (0x40, 0xff2ea16466c96a3843ec78b326b52861),
    (0x80, 0xfe5dee046a99a2a811c461f1969c3053),
    (0x100, 0xfcbe86c7900a88aedcffc83b479aa3a4),
    (0x200, 0xf987a7253ac413176f2b074cf7815e54),
    (0x400, 0xf3392b0822b70005940c7a398e4b70f3),
    (0x800, 0xe7159475a2c29b7443b29c7fa6e889d9),
    (0x1000, 0xd097f3bdfd2022b8845ad8f792aa5825),
    (0x2000, 0xa9f746462d870fdf8a65dc1f90e061e5),
    (0x4000, 0x70d869a156d2a1b890bb3df62baf32f7),
    (0x8000, 0x31be135f97d08fd981231505542fcfa6),
    (0x10000, 0x9aa508b5b7a84e1c677de54f3e99bc9),
    (0x20000, 0x5d6af8dedb81196699c329225ee604),
    (0x40000, 0x2216e584f5fa1ea926041bedfe98),
    (0x80000, 0x48a170391f7dc42444e8fa2),
];

/// Returns `sqrt(1.0001^tick) * 2^96`, rounded up.
///
/// Fails with `OutOfRange` if `tick` is outside `[MIN_TICK, MAX_TICK]`.
pub fn get_sqrt_ratio_at_tick(tick: i32) -> Result<U256, MathError> {
    if !(MIN_TICK..=MAX_TICK).contains(&tick) {
        return Err(MathError::OutOfRange);
    }
    let abs_tick = tick.unsigned_abs();

    let mut ratio = if abs_tick & 0x1 != 0 {
        U256::from(TICK_FACTOR_BIT0)
    } else {
        Q128
    };
    for &(bit, factor) in TICK_FACTORS.iter() {
        if abs_tick & bit != 0 {
            // ratio <= 2^128 and factor < 2^128, so the product fits 256 bits
            ratio = ratio.wrapping_mul(U256::from(factor)) >> 128usize;
        }
    }

    if tick > 0 {
        ratio = U256::MAX / ratio;
    }

    // Q128.128 -> Q64.96, rounding up so that get_tick_at_sqrt_ratio is consistent
    let round_up = !(ratio & U256::from(u32::MAX)).is_zero();
    let sqrt_price = ratio >> 32usize;
    Ok(if round_up { sqrt_price + U256::ONE } else { sqrt_price })
}

/// log2 -> log_sqrt(1.0001) multiplier, Q128.128.
const LOG_SQRT_10001: I256 = signed(255738958999603826347141);
/// Error bounds of the log2 approximation, Q128.128.
const TICK_LOW_ERROR: I256 = signed(3402992956809132418596140100660247210);
const TICK_HIGH_ERROR: I256 = signed(291339464771989622907027621153398088495);

const fn signed(value: u128) -> I256 {
    I256::from_raw(U256::from_limbs([value as u64, (value >> 64) as u64, 0, 0]))
}

/// Returns the greatest tick whose sqrt price is `<= sqrt_price_x96`.
///
/// Takes log2 of the Q128.128 ratio (integer part from the most significant
/// bit, 14 fractional bits by repeated squaring), converts it to base
/// sqrt(1.0001) and settles the one-tick ambiguity with a forward check.
///
/// Fails with `OutOfRange` unless `MIN_SQRT_RATIO <= sqrt_price_x96 < MAX_SQRT_RATIO`.
pub fn get_tick_at_sqrt_ratio(sqrt_price_x96: U256) -> Result<i32, MathError> {
    if sqrt_price_x96 < MIN_SQRT_RATIO || sqrt_price_x96 >= MAX_SQRT_RATIO {
        return Err(MathError::OutOfRange);
    }

    let ratio = sqrt_price_x96 << 32usize;
    // ratio >= MIN_SQRT_RATIO << 32, so it has a set bit
    let msb = ratio.bit_len() - 1;

    // normalize to [2^127, 2^128)
    let mut r = if msb >= 128 {
        ratio >> (msb - 127)
    } else {
        ratio << (127 - msb)
    };

    let mut log_2 = I256::from_raw(U256::from(msb))
        .wrapping_sub(I256::from_raw(U256::from(128u8)))
        << 64usize;
    for shift in (50..=63usize).rev() {
        r = r.wrapping_mul(r) >> 127usize;
        let f = r >> 128usize;
        log_2 |= I256::from_raw(f << shift);
        if !f.is_zero() {
            r >>= 1usize;
        }
    }

    let log_sqrt10001 = log_2.wrapping_mul(LOG_SQRT_10001);
    let tick_low = log_sqrt10001.wrapping_sub(TICK_LOW_ERROR).asr(128).low_i32();
    let tick_high = log_sqrt10001.wrapping_add(TICK_HIGH_ERROR).asr(128).low_i32();

    if tick_low == tick_high {
        return Ok(tick_low);
    }
    Ok(if get_sqrt_ratio_at_tick(tick_high)? <= sqrt_price_x96 {
        tick_high
    } else {
        tick_low
    })
}
