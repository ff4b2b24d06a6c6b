// Storage module for the pool contract.
//
// One enum for every key. Tick records, bitmap words and observations are
// reached by the library packages through `PoolStore`, which implements
// their storage traits on top of persistent contract storage.

use soroban_sdk::{contracttype, Address, Env, U256};

use coveswap_math::U256 as MathU256;
use coveswap_oracle::{Observation, ObservationStore};
use coveswap_position::Position;
use coveswap_tick::{TickInfo, TickStore};

use crate::error::PoolError;
use crate::types::{ObservationRecord, PoolConfig, PoolState, PositionRecord, TickRecord};
use crate::wide::{from_host, to_host};

// ============================================================
// STORAGE KEYS
// ============================================================

/// All storage keys used in the contract
#[contracttype]
pub enum DataKey {
    /// Initialization flag
    Initialized,
    /// Reentrancy flag, true while a mutating call is in progress
    Locked,
    /// Pool configuration (tokens, fee, spacing)
    PoolConfig,
    /// Pool state (price, liquidity, fees, oracle cursor)
    PoolState,
    /// Tick record by tick index
    Tick(i32),
    /// 256-bit bitmap word by word position
    TickBitmap(i32),
    /// Position by (owner, tick_lower, tick_upper)
    Position(Address, i32, i32),
    /// Oracle ring buffer slot by index
    Observation(u32),
}

// ============================================================
// TTL CONFIGURATION
// ============================================================

/// Storage TTL constants (in ledgers)
pub mod storage_ttl {
    /// Default TTL for persistent storage (about 1 year at 5s per ledger)
    pub const PERSISTENT_LIFETIME_THRESHOLD: u32 = 6_307_200;
    /// Bump amount when extending TTL
    pub const PERSISTENT_BUMP_AMOUNT: u32 = 6_307_200;
}

fn extend_persistent_ttl(env: &Env, key: &DataKey) {
    env.storage().persistent().extend_ttl(
        key,
        storage_ttl::PERSISTENT_LIFETIME_THRESHOLD,
        storage_ttl::PERSISTENT_BUMP_AMOUNT,
    );
}

// ============================================================
// LIFECYCLE FLAGS
// ============================================================

#[inline]
pub fn is_initialized(env: &Env) -> bool {
    env.storage().persistent().has(&DataKey::Initialized)
}

pub fn set_initialized(env: &Env) {
    env.storage().persistent().set(&DataKey::Initialized, &true);
    extend_persistent_ttl(env, &DataKey::Initialized);
}

#[inline]
pub fn is_locked(env: &Env) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Locked)
        .unwrap_or(false)
}

pub fn set_locked(env: &Env, locked: bool) {
    env.storage().persistent().set(&DataKey::Locked, &locked);
    extend_persistent_ttl(env, &DataKey::Locked);
}

// ============================================================
// POOL CONFIG / STATE
// ============================================================

pub fn write_pool_config(env: &Env, config: &PoolConfig) {
    env.storage().persistent().set(&DataKey::PoolConfig, config);
    extend_persistent_ttl(env, &DataKey::PoolConfig);
}

/// Read pool configuration
///
/// # Errors
/// `NotInitialized` before `initialize`
pub fn read_pool_config(env: &Env) -> Result<PoolConfig, PoolError> {
    env.storage()
        .persistent()
        .get(&DataKey::PoolConfig)
        .ok_or(PoolError::NotInitialized)
}

pub fn write_pool_state(env: &Env, state: &PoolState) {
    env.storage().persistent().set(&DataKey::PoolState, state);
    extend_persistent_ttl(env, &DataKey::PoolState);
}

/// Read pool state
///
/// # Errors
/// `NotInitialized` before `initialize`
pub fn read_pool_state(env: &Env) -> Result<PoolState, PoolError> {
    env.storage()
        .persistent()
        .get(&DataKey::PoolState)
        .ok_or(PoolError::NotInitialized)
}

// ============================================================
// POSITION STORAGE
// ============================================================

/// Read a position (default if it was never created)
pub fn read_position(env: &Env, owner: &Address, lower: i32, upper: i32) -> Position {
    env.storage()
        .persistent()
        .get::<_, PositionRecord>(&DataKey::Position(owner.clone(), lower, upper))
        .map(|record| record.to_position())
        .unwrap_or_default()
}

/// Write a position. Drained positions keep their record and fee checkpoint.
pub fn write_position(env: &Env, owner: &Address, lower: i32, upper: i32, pos: &Position) {
    let key = DataKey::Position(owner.clone(), lower, upper);
    env.storage()
        .persistent()
        .set(&key, &PositionRecord::from_position(env, pos));
    extend_persistent_ttl(env, &key);
}

// ============================================================
// TICK / ORACLE STORE
// ============================================================

/// Contract storage seen through the library storage traits
pub struct PoolStore<'a> {
    env: &'a Env,
}

impl<'a> PoolStore<'a> {
    pub fn new(env: &'a Env) -> Self {
        Self { env }
    }
}

impl TickStore for PoolStore<'_> {
    fn read_tick(&self, tick: i32) -> TickInfo {
        self.env
            .storage()
            .persistent()
            .get::<_, TickRecord>(&DataKey::Tick(tick))
            .map(|record| record.to_info())
            .unwrap_or_default()
    }

    fn write_tick(&mut self, tick: i32, info: &TickInfo) {
        let key = DataKey::Tick(tick);
        self.env
            .storage()
            .persistent()
            .set(&key, &TickRecord::from_info(self.env, info));
        extend_persistent_ttl(self.env, &key);
    }

    fn remove_tick(&mut self, tick: i32) {
        self.env.storage().persistent().remove(&DataKey::Tick(tick));
    }

    fn read_bitmap_word(&self, word_pos: i32) -> MathU256 {
        self.env
            .storage()
            .persistent()
            .get::<_, U256>(&DataKey::TickBitmap(word_pos))
            .map(|word| from_host(&word))
            .unwrap_or_default()
    }

    fn write_bitmap_word(&mut self, word_pos: i32, word: MathU256) {
        let key = DataKey::TickBitmap(word_pos);
        if word.is_zero() {
            self.env.storage().persistent().remove(&key);
            return;
        }
        self.env
            .storage()
            .persistent()
            .set(&key, &to_host(self.env, word));
        extend_persistent_ttl(self.env, &key);
    }
}

impl ObservationStore for PoolStore<'_> {
    fn read_observation(&self, index: u32) -> Observation {
        self.env
            .storage()
            .persistent()
            .get::<_, ObservationRecord>(&DataKey::Observation(index))
            .map(|record| record.to_observation())
            .unwrap_or_default()
    }

    fn write_observation(&mut self, index: u32, observation: &Observation) {
        let key = DataKey::Observation(index);
        self.env
            .storage()
            .persistent()
            .set(&key, &ObservationRecord::from_observation(self.env, observation));
        extend_persistent_ttl(self.env, &key);
    }
}
