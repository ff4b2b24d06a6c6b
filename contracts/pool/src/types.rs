// Pool Types
//
// Contract-facing records. 256-bit values are stored as host `U256`s and
// converted at the storage boundary (see `wide`).

use soroban_sdk::{contracttype, Address, Env, Vec, U256};

use coveswap_oracle::Observation;
use coveswap_position::Position;
use coveswap_tick::TickInfo;

use crate::wide::{from_host, to_host};

// ============================================================
// POOL CONFIGURATION
// ============================================================

/// Immutable configuration written once at initialization
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolConfig {
    /// Authorizes protocol fee changes and withdrawals
    pub authority: Address,
    pub token0: Address,
    pub token1: Address,
    /// Trading fee in basis points (e.g., 30 = 0.30%)
    pub fee_bps: u32,
    pub tick_spacing: i32,
    /// Maximum `liquidity_gross` any single tick may reference
    pub max_liquidity_per_tick: u128,
}

// ============================================================
// POOL STATE
// ============================================================

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolState {
    /// Current sqrt price as Q64.96 fixed point
    pub sqrt_price_x96: U256,
    /// Greatest tick whose price is at or below the current price
    pub tick: i32,
    /// Active liquidity in range
    pub liquidity: u128,
    pub fee_growth_global_0_x128: U256,
    pub fee_growth_global_1_x128: U256,
    /// Protocol fees owed in token0, not yet collected
    pub protocol_fees_0: u128,
    pub protocol_fees_1: u128,
    /// Protocol fee denominator for token0 fees, 0 when disabled
    pub fee_protocol_0: u32,
    pub fee_protocol_1: u32,
    /// Slot of the newest observation
    pub observation_index: u32,
    pub observation_cardinality: u32,
    pub observation_cardinality_next: u32,
}

// ============================================================
// TICKS
// ============================================================

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TickRecord {
    pub liquidity_gross: u128,
    pub liquidity_net: i128,
    pub fee_growth_outside_0_x128: U256,
    pub fee_growth_outside_1_x128: U256,
    pub tick_cumulative_outside: i64,
    pub seconds_per_liquidity_outside_x128: U256,
    pub initialized: bool,
}

impl TickRecord {
    pub fn from_info(env: &Env, info: &TickInfo) -> Self {
        Self {
            liquidity_gross: info.liquidity_gross,
            liquidity_net: info.liquidity_net,
            fee_growth_outside_0_x128: to_host(env, info.fee_growth_outside_0_x128),
            fee_growth_outside_1_x128: to_host(env, info.fee_growth_outside_1_x128),
            tick_cumulative_outside: info.tick_cumulative_outside,
            seconds_per_liquidity_outside_x128: to_host(env, info.seconds_per_liquidity_outside_x128),
            initialized: info.initialized,
        }
    }

    pub fn to_info(&self) -> TickInfo {
        TickInfo {
            liquidity_gross: self.liquidity_gross,
            liquidity_net: self.liquidity_net,
            fee_growth_outside_0_x128: from_host(&self.fee_growth_outside_0_x128),
            fee_growth_outside_1_x128: from_host(&self.fee_growth_outside_1_x128),
            tick_cumulative_outside: self.tick_cumulative_outside,
            seconds_per_liquidity_outside_x128: from_host(&self.seconds_per_liquidity_outside_x128),
            initialized: self.initialized,
        }
    }
}

// ============================================================
// POSITIONS
// ============================================================

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PositionRecord {
    pub liquidity: u128,
    pub fee_growth_inside_0_last_x128: U256,
    pub fee_growth_inside_1_last_x128: U256,
    pub tokens_owed_0: u128,
    pub tokens_owed_1: u128,
}

impl PositionRecord {
    pub fn from_position(env: &Env, pos: &Position) -> Self {
        Self {
            liquidity: pos.liquidity,
            fee_growth_inside_0_last_x128: to_host(env, pos.fee_growth_inside_0_last_x128),
            fee_growth_inside_1_last_x128: to_host(env, pos.fee_growth_inside_1_last_x128),
            tokens_owed_0: pos.tokens_owed_0,
            tokens_owed_1: pos.tokens_owed_1,
        }
    }

    pub fn to_position(&self) -> Position {
        Position {
            liquidity: self.liquidity,
            fee_growth_inside_0_last_x128: from_host(&self.fee_growth_inside_0_last_x128),
            fee_growth_inside_1_last_x128: from_host(&self.fee_growth_inside_1_last_x128),
            tokens_owed_0: self.tokens_owed_0,
            tokens_owed_1: self.tokens_owed_1,
        }
    }
}

/// Position view including fees earned since the last checkpoint
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PositionInfo {
    pub liquidity: u128,
    pub fee_growth_inside_0_last_x128: U256,
    pub fee_growth_inside_1_last_x128: U256,
    /// Checkpointed fees plus pending fees
    pub tokens_owed_0: u128,
    pub tokens_owed_1: u128,
}

// ============================================================
// ORACLE
// ============================================================

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ObservationRecord {
    pub block_timestamp: u64,
    pub tick_cumulative: i64,
    pub seconds_per_liquidity_cumulative_x128: U256,
    pub initialized: bool,
}

impl ObservationRecord {
    pub fn from_observation(env: &Env, obs: &Observation) -> Self {
        Self {
            block_timestamp: obs.block_timestamp,
            tick_cumulative: obs.tick_cumulative,
            seconds_per_liquidity_cumulative_x128: to_host(env, obs.seconds_per_liquidity_cumulative_x128),
            initialized: obs.initialized,
        }
    }

    pub fn to_observation(&self) -> Observation {
        Observation {
            block_timestamp: self.block_timestamp,
            tick_cumulative: self.tick_cumulative,
            seconds_per_liquidity_cumulative_x128: from_host(&self.seconds_per_liquidity_cumulative_x128),
            initialized: self.initialized,
        }
    }
}

/// Cumulatives for each requested `seconds_ago`, in request order
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ObserveResult {
    pub tick_cumulatives: Vec<i64>,
    pub seconds_per_liquidity_cumulative_x128s: Vec<U256>,
}

/// Oracle values accrued while the price was inside a range
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CumulativesInside {
    pub tick_cumulative_inside: i64,
    pub seconds_per_liquidity_inside_x128: U256,
}

// ============================================================
// SWAP RESULT
// ============================================================

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SwapResult {
    /// Pool-side token0 delta: positive was paid in, negative was paid out
    pub amount0: i128,
    pub amount1: i128,
    /// Input pulled from the payer, fee included
    pub amount_in: u128,
    pub amount_out: u128,
    pub fee_paid: u128,
    pub sqrt_price_x96: U256,
    pub tick: i32,
    pub liquidity: u128,
}
