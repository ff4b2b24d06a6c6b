mod common;

use common::*;
use coveswap_pool::PoolError;
use soroban_sdk::{testutils::Address as _, testutils::Ledger, vec, Address, Env, U256};

/// Ten seconds at one million liquidity, in Q128
const TEN_SECONDS_PER_MILLION: u128 = 3402823669209384634633746074317682;

/// Pool initialized at t=1000 with [-60, 60] funded and three oracle slots.
/// A swap at t=1010 moves the tick from 0 to -20.
fn pool_with_history(env: &Env) -> TestPool<'_> {
    env.ledger().set_timestamp(1_000);
    let t = setup_pool(env);
    t.mint(-60, 60, 1_000_000);
    t.pool.increase_observation_cardinality_next(&3);

    env.ledger().set_timestamp(1_010);
    let result = t.swap(true, 1_000, &Address::generate(env));
    assert_eq!(result.tick, -20);
    t
}

// ============================================================
// CARDINALITY
// ============================================================

#[test]
fn test_grow_reserves_slots() {
    let env = Env::default();
    env.ledger().set_timestamp(1_000);
    let t = setup_pool(&env);

    t.pool.increase_observation_cardinality_next(&3);
    let state = t.pool.get_pool_state();
    assert_eq!(state.observation_cardinality, 1);
    assert_eq!(state.observation_cardinality_next, 3);
    assert!(!t.pool.get_observation(&2).initialized);

    // shrinking is a no-op
    t.pool.increase_observation_cardinality_next(&2);
    assert_eq!(t.pool.get_pool_state().observation_cardinality_next, 3);
}

#[test]
fn test_cardinality_grows_on_next_write() {
    let env = Env::default();
    let t = pool_with_history(&env);

    let state = t.pool.get_pool_state();
    assert_eq!(state.observation_cardinality, 3);
    assert_eq!(state.observation_index, 1);

    let sample = t.pool.get_observation(&1);
    assert!(sample.initialized);
    assert_eq!(sample.block_timestamp, 1_010);
    assert_eq!(sample.tick_cumulative, 0);
    assert_eq!(
        sample.seconds_per_liquidity_cumulative_x128,
        u256(&env, TEN_SECONDS_PER_MILLION)
    );
}

#[test]
fn test_one_write_per_timestamp() {
    let env = Env::default();
    let t = pool_with_history(&env);
    let trader = Address::generate(&env);

    t.swap(false, 500, &trader);
    t.swap(true, 500, &trader);
    assert_eq!(t.pool.get_pool_state().observation_index, 1);
}

// ============================================================
// OBSERVE
// ============================================================

#[test]
fn test_observe_interpolates_between_samples() {
    let env = Env::default();
    let t = pool_with_history(&env);

    env.ledger().set_timestamp(1_020);
    let result = t.swap(false, 2_000, &Address::generate(&env));
    assert!(result.tick > 0);

    let observed = t.pool.observe(&vec![&env, 0u64, 5, 10, 15, 20]);
    assert_eq!(observed.tick_cumulatives, vec![&env, -200i64, -100, 0, 0, 0]);
    assert_eq!(
        observed.seconds_per_liquidity_cumulative_x128s.get(2).unwrap(),
        u256(&env, TEN_SECONDS_PER_MILLION)
    );
    assert_eq!(
        observed.seconds_per_liquidity_cumulative_x128s.get(4).unwrap(),
        U256::from_u32(&env, 0)
    );

    // past the newest sample the current tick is extrapolated
    env.ledger().set_timestamp(1_030);
    let observed = t.pool.observe(&vec![&env, 0u64]);
    let tick = t.pool.get_pool_state().tick as i64;
    assert_eq!(observed.tick_cumulatives.get(0).unwrap(), -200 + tick * 10);
}

#[test]
fn test_observe_before_oldest_sample_fails() {
    let env = Env::default();
    let t = pool_with_history(&env);
    env.ledger().set_timestamp(1_020);

    assert_eq!(
        t.pool.try_observe(&vec![&env, 21u64]),
        Err(Ok(PoolError::ObservationNotAvailable))
    );
    assert_eq!(
        t.pool.try_observe(&vec![&env, 5_000u64]),
        Err(Ok(PoolError::ObservationNotAvailable))
    );
}

// ============================================================
// CUMULATIVES INSIDE
// ============================================================

#[test]
fn test_snapshot_cumulatives_inside_range() {
    let env = Env::default();
    let t = pool_with_history(&env);
    env.ledger().set_timestamp(1_015);

    let inside = t.pool.snapshot_cumulatives_inside(&-60, &60);
    assert_eq!(inside.tick_cumulative_inside, -100);

    // the difference of two snapshots is what accrued in between
    env.ledger().set_timestamp(1_025);
    let later = t.pool.snapshot_cumulatives_inside(&-60, &60);
    assert_eq!(later.tick_cumulative_inside - inside.tick_cumulative_inside, -200);
}

#[test]
fn test_snapshot_requires_initialized_ticks() {
    let env = Env::default();
    let t = pool_with_history(&env);

    assert_eq!(
        t.pool.try_snapshot_cumulatives_inside(&-120, &120),
        Err(Ok(PoolError::TickNotInitialized))
    );
    assert_eq!(
        t.pool.try_snapshot_cumulatives_inside(&60, &-60),
        Err(Ok(PoolError::InvalidTickRange))
    );
}
