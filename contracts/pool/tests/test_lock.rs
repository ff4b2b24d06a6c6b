mod common;

use common::*;
use coveswap_pool::{DataKey, PoolError};
use soroban_sdk::{testutils::Address as _, vec, Address, Env, U256};

fn lock(env: &Env, t: &TestPool) {
    env.as_contract(&t.pool.address, || {
        env.storage().persistent().set(&DataKey::Locked, &true);
    });
}

#[test]
fn test_mutating_calls_rejected_while_locked() {
    let env = Env::default();
    let t = setup_pool(&env);
    t.mint(-60, 60, 1_000_000);
    let owner = t.callee.address.clone();
    let other = Address::generate(&env);
    lock(&env, &t);
    assert!(t.pool.is_locked());

    assert_eq!(
        t.pool.try_mint(&owner, &owner, &-60, &60, &1_000, &no_data(&env)),
        Err(Ok(PoolError::Locked))
    );
    assert_eq!(t.pool.try_burn(&owner, &-60, &60, &1_000), Err(Ok(PoolError::Locked)));
    assert_eq!(
        t.pool.try_collect(&owner, &other, &-60, &60, &1, &1),
        Err(Ok(PoolError::Locked))
    );
    assert_eq!(
        t.pool.try_swap(&owner, &other, &true, &1_000, &U256::from_u32(&env, 0), &no_data(&env)),
        Err(Ok(PoolError::Locked))
    );
    assert_eq!(
        t.pool.try_flash(&owner, &owner, &10, &10, &no_data(&env)),
        Err(Ok(PoolError::Locked))
    );
    assert_eq!(t.pool.try_set_fee_protocol(&4, &4), Err(Ok(PoolError::Locked)));
    assert_eq!(
        t.pool.try_collect_protocol(&other, &1, &1),
        Err(Ok(PoolError::Locked))
    );
    assert_eq!(
        t.pool.try_increase_observation_cardinality_next(&5),
        Err(Ok(PoolError::Locked))
    );
}

#[test]
fn test_queries_work_while_locked() {
    let env = Env::default();
    let t = setup_pool(&env);
    t.mint(-60, 60, 1_000_000);
    lock(&env, &t);

    assert_eq!(t.pool.get_pool_state().liquidity, 1_000_000);
    assert_eq!(t.pool.get_tick(&-60).liquidity_gross, 1_000_000);
    assert_eq!(t.pool.get_position(&t.callee.address, &-60, &60).liquidity, 1_000_000);
    assert_eq!(t.pool.observe(&vec![&env, 0u64]).tick_cumulatives.len(), 1);
    assert_eq!(t.pool.snapshot_cumulatives_inside(&-60, &60).tick_cumulative_inside, 0);
}

#[test]
fn test_lock_released_after_each_call() {
    let env = Env::default();
    let t = setup_pool(&env);

    t.mint(-60, 60, 1_000_000);
    assert!(!t.pool.is_locked());
    t.swap(true, 1_000, &Address::generate(&env));
    assert!(!t.pool.is_locked());

    // a failed call leaves the pool unlocked
    assert!(t.pool.try_burn(&t.callee.address, &-60, &60, &2_000_000).is_err());
    assert!(!t.pool.is_locked());
    t.pool.burn(&t.callee.address, &-60, &60, &1_000);
}

#[test]
fn test_callback_cannot_reenter_pool() {
    let env = Env::default();
    let t = setup_pool(&env);
    t.mint(-60, 60, 1_000_000);
    let owner = t.callee.address.clone();
    let before = t.pool.get_pool_state();
    let pool_balance0 = t.balance0(&t.pool.address);

    // the host refuses nested calls into a contract already on the stack,
    // ahead of the pool's own flag; either way the outer call fails whole
    t.callee.set_mode(&PayMode::Reenter);
    assert!(t
        .pool
        .try_mint(&owner, &owner, &-60, &60, &1_000, &no_data(&env))
        .is_err());
    assert!(t
        .pool
        .try_swap(&owner, &owner, &false, &1_000, &U256::from_u32(&env, 0), &no_data(&env))
        .is_err());
    t.callee.set_loan(&10, &0);
    assert!(t.pool.try_flash(&owner, &owner, &10, &0, &no_data(&env)).is_err());

    assert_eq!(t.pool.get_pool_state(), before);
    assert_eq!(t.balance0(&t.pool.address), pool_balance0);
    assert!(!t.pool.is_locked());

    // the pool is usable again once the callback settles normally
    t.callee.set_mode(&PayMode::Full);
    t.mint(-60, 60, 1_000);
}
