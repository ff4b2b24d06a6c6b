use alloy_primitives::U256;
use coveswap_math::{mul_div, to_u128, Q128};

use crate::error::PositionError;
use crate::types::Position;

/// Fees earned since the position's last checkpoint, not yet added to
/// `tokens_owed`.
///
/// Growth deltas are taken modulo 2^256, so a checkpoint taken while the
/// inside value was "negative" still yields the true accrued amount.
pub fn calculate_pending_fees(
    pos: &Position,
    fee_growth_inside_0_x128: U256,
    fee_growth_inside_1_x128: U256,
) -> Result<(u128, u128), PositionError> {
    if pos.liquidity == 0 {
        return Ok((0, 0));
    }

    let liquidity = U256::from(pos.liquidity);

    let delta_0 = fee_growth_inside_0_x128.wrapping_sub(pos.fee_growth_inside_0_last_x128);
    let delta_1 = fee_growth_inside_1_x128.wrapping_sub(pos.fee_growth_inside_1_last_x128);

    let pending_0 = to_u128(mul_div(delta_0, liquidity, Q128)?)?;
    let pending_1 = to_u128(mul_div(delta_1, liquidity, Q128)?)?;

    Ok((pending_0, pending_1))
}
