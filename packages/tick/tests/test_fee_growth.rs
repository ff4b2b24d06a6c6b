use alloy_primitives::U256;
use coveswap_tick::testutils::MemoryTickStore;
use coveswap_tick::*;

fn with_outside(store: &mut MemoryTickStore, tick: i32, fee0: U256, fee1: U256) {
    store.write_tick(
        tick,
        &TickInfo {
            fee_growth_outside_0_x128: fee0,
            fee_growth_outside_1_x128: fee1,
            initialized: true,
            liquidity_gross: 1,
            ..TickInfo::default()
        },
    );
}

fn n(v: u64) -> U256 {
    U256::from(v)
}

// ============================================================
// FEE GROWTH INSIDE
// ============================================================

#[test]
fn test_all_growth_inside_for_uninitialized_bounds() {
    let store = MemoryTickStore::new();
    assert_eq!(get_fee_growth_inside(&store, -2, 2, 0, n(15), n(15)), (n(15), n(15)));
}

#[test]
fn test_no_growth_inside_when_price_outside() {
    let store = MemoryTickStore::new();
    assert_eq!(get_fee_growth_inside(&store, -2, 2, 4, n(15), n(15)), (n(0), n(0)));
    assert_eq!(get_fee_growth_inside(&store, -2, 2, -4, n(15), n(15)), (n(0), n(0)));
}

#[test]
fn test_subtracts_upper_when_inside() {
    let mut store = MemoryTickStore::new();
    with_outside(&mut store, 2, n(2), n(3));
    assert_eq!(get_fee_growth_inside(&store, -2, 2, 0, n(15), n(15)), (n(13), n(12)));
}

#[test]
fn test_subtracts_lower_when_inside() {
    let mut store = MemoryTickStore::new();
    with_outside(&mut store, -2, n(2), n(3));
    assert_eq!(get_fee_growth_inside(&store, -2, 2, 0, n(15), n(15)), (n(13), n(12)));
}

#[test]
fn test_subtracts_both_bounds_when_inside() {
    let mut store = MemoryTickStore::new();
    with_outside(&mut store, -2, n(2), n(3));
    with_outside(&mut store, 2, n(4), n(1));
    assert_eq!(get_fee_growth_inside(&store, -2, 2, 0, n(15), n(15)), (n(9), n(11)));
}

#[test]
fn test_inside_growth_wraps_modulo_2_256() {
    let mut store = MemoryTickStore::new();
    with_outside(&mut store, -2, U256::MAX - n(3), U256::MAX - n(2));
    with_outside(&mut store, 2, n(3), n(5));
    assert_eq!(get_fee_growth_inside(&store, -2, 2, 0, n(15), n(15)), (n(16), n(13)));
}

// ============================================================
// CUMULATIVES INSIDE
// ============================================================

#[test]
fn test_cumulatives_inside_requires_initialized_bounds() {
    let store = MemoryTickStore::new();
    assert_eq!(
        get_cumulatives_inside(&store, -2, 2, 0, 0, U256::ZERO),
        Err(TickError::NotInitialized)
    );
}

#[test]
fn test_cumulatives_inside_by_position_of_price() {
    let mut store = MemoryTickStore::new();
    for (tick, tc, spl) in [(-2, 10i64, 100u64), (2, 4, 40)] {
        store.write_tick(
            tick,
            &TickInfo {
                liquidity_gross: 1,
                tick_cumulative_outside: tc,
                seconds_per_liquidity_outside_x128: n(spl),
                initialized: true,
                ..TickInfo::default()
            },
        );
    }

    assert_eq!(get_cumulatives_inside(&store, -2, 2, 0, 50, n(500)).unwrap(), (36, n(360)));
    assert_eq!(get_cumulatives_inside(&store, -2, 2, -5, 50, n(500)).unwrap(), (6, n(60)));
    assert_eq!(
        get_cumulatives_inside(&store, -2, 2, 5, 50, n(500)).unwrap(),
        (-6, U256::ZERO.wrapping_sub(n(60)))
    );
}
