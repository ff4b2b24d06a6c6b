use alloy_primitives::U256;
use coveswap_math::{get_sqrt_ratio_at_tick, Q96};
use coveswap_swap::{PoolSnapshot, SwapError};
use coveswap_tick::testutils::MemoryTickStore;
use coveswap_tick::{flip_tick, update_tick, Accumulators};

pub const TICK_SPACING: i32 = 60;
pub const FEE_BPS: u32 = 30;

/// Register a position's boundary ticks the way a mint does.
pub fn add_range(store: &mut MemoryTickStore, lower: i32, upper: i32, liquidity: u128, current_tick: i32) {
    let acc = Accumulators::default();
    let delta = liquidity as i128;
    if update_tick(store, lower, current_tick, delta, false, u128::MAX, &acc).unwrap() {
        flip_tick(store, lower, TICK_SPACING).unwrap();
    }
    if update_tick(store, upper, current_tick, delta, true, u128::MAX, &acc).unwrap() {
        flip_tick(store, upper, TICK_SPACING).unwrap();
    }
}

/// Pool at tick 0 with `liquidity` active.
pub fn pool_at_tick_zero(liquidity: u128) -> PoolSnapshot {
    PoolSnapshot {
        sqrt_price_x96: Q96,
        tick: 0,
        liquidity,
        tick_spacing: TICK_SPACING,
        fee_bps: FEE_BPS,
        fee_protocol: 0,
        fee_growth_global_0_x128: U256::ZERO,
        fee_growth_global_1_x128: U256::ZERO,
    }
}

/// Single position of 1,000,000 over [-60, 60] around tick 0.
pub fn single_range() -> (MemoryTickStore, PoolSnapshot) {
    let mut store = MemoryTickStore::new();
    add_range(&mut store, -60, 60, 1_000_000, 0);
    (store, pool_at_tick_zero(1_000_000))
}

pub fn no_oracle() -> Result<(i64, U256), SwapError> {
    Ok((0, U256::ZERO))
}

pub fn price(tick: i32) -> U256 {
    get_sqrt_ratio_at_tick(tick).unwrap()
}

pub fn u(s: &str) -> U256 {
    s.parse().unwrap()
}
