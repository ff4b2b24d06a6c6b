// Fee Growth Calculations
//
// "Outside" values are relative to the current tick, so growth inside a
// range is derived from the global accumulator minus the growth below the
// lower bound and above the upper bound. Differences are taken modulo 2^256;
// only differences between two snapshots are meaningful.

use alloy_primitives::U256;

use crate::error::TickError;
use crate::store::TickStore;

/// Fee growth per unit of liquidity accrued strictly inside `[lower_tick, upper_tick)`.
pub fn get_fee_growth_inside<S: TickStore>(
    store: &S,
    lower_tick: i32,
    upper_tick: i32,
    current_tick: i32,
    fee_growth_global_0_x128: U256,
    fee_growth_global_1_x128: U256,
) -> (U256, U256) {
    let lower_info = store.read_tick(lower_tick);
    let upper_info = store.read_tick(upper_tick);

    let (fee_growth_below_0, fee_growth_below_1) = if current_tick >= lower_tick {
        (
            lower_info.fee_growth_outside_0_x128,
            lower_info.fee_growth_outside_1_x128,
        )
    } else {
        (
            fee_growth_global_0_x128.wrapping_sub(lower_info.fee_growth_outside_0_x128),
            fee_growth_global_1_x128.wrapping_sub(lower_info.fee_growth_outside_1_x128),
        )
    };

    let (fee_growth_above_0, fee_growth_above_1) = if current_tick < upper_tick {
        (
            upper_info.fee_growth_outside_0_x128,
            upper_info.fee_growth_outside_1_x128,
        )
    } else {
        (
            fee_growth_global_0_x128.wrapping_sub(upper_info.fee_growth_outside_0_x128),
            fee_growth_global_1_x128.wrapping_sub(upper_info.fee_growth_outside_1_x128),
        )
    };

    let fee_growth_inside_0 = fee_growth_global_0_x128
        .wrapping_sub(fee_growth_below_0)
        .wrapping_sub(fee_growth_above_0);

    let fee_growth_inside_1 = fee_growth_global_1_x128
        .wrapping_sub(fee_growth_below_1)
        .wrapping_sub(fee_growth_above_1);

    (fee_growth_inside_0, fee_growth_inside_1)
}

/// Tick cumulative and seconds-per-liquidity accrued inside a range.
///
/// Both bounds must be initialized; snapshots are only comparable while the
/// range stays initialized.
pub fn get_cumulatives_inside<S: TickStore>(
    store: &S,
    lower_tick: i32,
    upper_tick: i32,
    current_tick: i32,
    tick_cumulative: i64,
    seconds_per_liquidity_cumulative_x128: U256,
) -> Result<(i64, U256), TickError> {
    let lower = store.read_tick(lower_tick);
    let upper = store.read_tick(upper_tick);
    if !lower.initialized || !upper.initialized {
        return Err(TickError::NotInitialized);
    }

    let inside = if current_tick < lower_tick {
        (
            lower
                .tick_cumulative_outside
                .wrapping_sub(upper.tick_cumulative_outside),
            lower
                .seconds_per_liquidity_outside_x128
                .wrapping_sub(upper.seconds_per_liquidity_outside_x128),
        )
    } else if current_tick < upper_tick {
        (
            tick_cumulative
                .wrapping_sub(lower.tick_cumulative_outside)
                .wrapping_sub(upper.tick_cumulative_outside),
            seconds_per_liquidity_cumulative_x128
                .wrapping_sub(lower.seconds_per_liquidity_outside_x128)
                .wrapping_sub(upper.seconds_per_liquidity_outside_x128),
        )
    } else {
        (
            upper
                .tick_cumulative_outside
                .wrapping_sub(lower.tick_cumulative_outside),
            upper
                .seconds_per_liquidity_outside_x128
                .wrapping_sub(lower.seconds_per_liquidity_outside_x128),
        )
    };
    Ok(inside)
}
