// Tick Types

use alloy_primitives::U256;

/// Information stored for each initialized tick
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickInfo {
    /// Total liquidity referencing this tick
    pub liquidity_gross: u128,
    /// Net liquidity change when the price crosses this tick upward
    pub liquidity_net: i128,
    /// Fee growth per unit of liquidity on the other side of this tick, token0
    pub fee_growth_outside_0_x128: U256,
    /// Fee growth per unit of liquidity on the other side of this tick, token1
    pub fee_growth_outside_1_x128: U256,
    /// Tick cumulative on the other side of this tick
    pub tick_cumulative_outside: i64,
    /// Seconds per unit of liquidity on the other side of this tick
    pub seconds_per_liquidity_outside_x128: U256,
    /// True iff `liquidity_gross > 0`
    pub initialized: bool,
}

/// Pool-wide accumulator values at the moment a tick is touched
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Accumulators {
    pub fee_growth_global_0_x128: U256,
    pub fee_growth_global_1_x128: U256,
    pub tick_cumulative: i64,
    pub seconds_per_liquidity_cumulative_x128: U256,
}
