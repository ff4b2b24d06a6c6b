// Tick Update and Crossing Logic

use coveswap_math::{add_delta, MAX_TICK, MIN_TICK};

use crate::error::TickError;
use crate::store::TickStore;
use crate::types::Accumulators;

/// Check if a tick is within valid range
#[inline]
pub fn is_valid_tick(tick: i32) -> bool {
    (MIN_TICK..=MAX_TICK).contains(&tick)
}

/// Validate the bounds of a position range.
///
/// Both bounds must lie in `[MIN_TICK, MAX_TICK]`, be multiples of
/// `tick_spacing`, and satisfy `tick_lower < tick_upper`.
pub fn validate_tick_range(tick_lower: i32, tick_upper: i32, tick_spacing: i32) -> Result<(), TickError> {
    if tick_spacing <= 0
        || tick_lower >= tick_upper
        || !is_valid_tick(tick_lower)
        || !is_valid_tick(tick_upper)
        || tick_lower % tick_spacing != 0
        || tick_upper % tick_spacing != 0
    {
        return Err(TickError::InvalidTickRange);
    }
    Ok(())
}

/// Largest `liquidity_gross` a single tick may carry for `tick_spacing`.
///
/// Spreads `u128::MAX` evenly over every usable tick so that active
/// liquidity can never overflow, whatever the positions.
pub fn tick_spacing_to_max_liquidity_per_tick(tick_spacing: i32) -> u128 {
    let spacing = tick_spacing.max(1);
    let min_tick = (MIN_TICK / spacing) * spacing;
    let max_tick = (MAX_TICK / spacing) * spacing;
    let num_ticks = ((max_tick - min_tick) / spacing) as u128 + 1;
    u128::MAX / num_ticks
}

/// Update a tick when liquidity is added or removed.
///
/// On first initialization the "outside" values are seeded as if all growth
/// so far happened below the tick when `tick <= tick_current`. Returns
/// whether the tick flipped between initialized and uninitialized.
pub fn update_tick<S: TickStore>(
    store: &mut S,
    tick: i32,
    tick_current: i32,
    liquidity_delta: i128,
    upper: bool,
    max_liquidity: u128,
    accumulators: &Accumulators,
) -> Result<bool, TickError> {
    let mut info = store.read_tick(tick);

    let liquidity_gross_before = info.liquidity_gross;
    let liquidity_gross_after = add_delta(liquidity_gross_before, liquidity_delta)?;

    if liquidity_gross_after > max_liquidity {
        return Err(TickError::LiquidityOverflow);
    }

    let flipped = (liquidity_gross_after == 0) != (liquidity_gross_before == 0);

    if liquidity_gross_before == 0 {
        if tick <= tick_current {
            info.fee_growth_outside_0_x128 = accumulators.fee_growth_global_0_x128;
            info.fee_growth_outside_1_x128 = accumulators.fee_growth_global_1_x128;
            info.seconds_per_liquidity_outside_x128 =
                accumulators.seconds_per_liquidity_cumulative_x128;
            info.tick_cumulative_outside = accumulators.tick_cumulative;
        }
        info.initialized = true;
    }

    info.liquidity_gross = liquidity_gross_after;

    // lower bounds add liquidity when crossed upward, upper bounds remove it
    info.liquidity_net = if upper {
        info.liquidity_net.checked_sub(liquidity_delta)
    } else {
        info.liquidity_net.checked_add(liquidity_delta)
    }
    .ok_or(TickError::LiquidityOverflow)?;

    if liquidity_gross_after == 0 {
        info.initialized = false;
    }

    store.write_tick(tick, &info);

    Ok(flipped)
}

/// Cross a tick boundary during a swap.
///
/// Flips every "outside" value to `global - outside` and returns the
/// `liquidity_net` to apply (negated by the caller when moving down).
pub fn cross_tick<S: TickStore>(store: &mut S, tick: i32, accumulators: &Accumulators) -> i128 {
    let mut info = store.read_tick(tick);

    info.fee_growth_outside_0_x128 = accumulators
        .fee_growth_global_0_x128
        .wrapping_sub(info.fee_growth_outside_0_x128);
    info.fee_growth_outside_1_x128 = accumulators
        .fee_growth_global_1_x128
        .wrapping_sub(info.fee_growth_outside_1_x128);
    info.seconds_per_liquidity_outside_x128 = accumulators
        .seconds_per_liquidity_cumulative_x128
        .wrapping_sub(info.seconds_per_liquidity_outside_x128);
    info.tick_cumulative_outside = accumulators
        .tick_cumulative
        .wrapping_sub(info.tick_cumulative_outside);

    store.write_tick(tick, &info);

    info.liquidity_net
}

/// Remove a tick that no longer holds liquidity.
pub fn clear_tick<S: TickStore>(store: &mut S, tick: i32) {
    store.remove_tick(tick);
}

