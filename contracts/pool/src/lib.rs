#![no_std]

use soroban_sdk::{contract, contractimpl, Address, Bytes, Env, Vec, U256};

// External packages
use coveswap_math::{
    add_delta, get_amount_0_delta_signed, get_amount_1_delta_signed, get_sqrt_ratio_at_tick,
    get_tick_at_sqrt_ratio, mul_div_rounding_up, to_u128, U256 as MathU256, FEE_DENOMINATOR,
    MAX_FEE_BPS, MAX_TICK_SPACING,
};
use coveswap_oracle as oracle;
use coveswap_position::{calculate_pending_fees, collect_owed, credit_owed, update_position, Position};
use coveswap_swap::{execute_swap, is_valid_fee_protocol, FeeAccountant, PoolSnapshot, SwapParams};
use coveswap_tick::{
    clear_tick, flip_tick, get_cumulatives_inside, get_fee_growth_inside,
    tick_spacing_to_max_liquidity_per_tick, update_tick, validate_tick_range, Accumulators,
    TickStore,
};

// Local modules
mod error;
mod events;
mod settlement;
mod storage;
pub mod types;
mod wide;

pub use error::PoolError;
pub use storage::DataKey;

use events::*;
use settlement::to_amount;
use storage::*;
use types::{
    CumulativesInside, ObservationRecord, ObserveResult, PoolConfig, PoolState, PositionInfo,
    SwapResult, TickRecord,
};
use wide::{from_host, to_host};

#[contract]
pub struct CovePool;

#[contractimpl]
impl CovePool {
    // ========================================================
    // INITIALIZATION
    // ========================================================

    /// Initialize the pool at a starting price
    ///
    /// # Arguments
    /// * `authority` - Address allowed to manage protocol fees
    /// * `token0` / `token1` - Pool tokens, ordered by the deployer
    /// * `fee_bps` - Trading fee in basis points (below 10000)
    /// * `tick_spacing` - Distance between usable ticks (1..=16384)
    /// * `sqrt_price_x96` - Initial sqrt price as Q64.96
    pub fn initialize(
        env: Env,
        authority: Address,
        token0: Address,
        token1: Address,
        fee_bps: u32,
        tick_spacing: i32,
        sqrt_price_x96: U256,
    ) -> Result<(), PoolError> {
        authority.require_auth();

        if is_initialized(&env) {
            return Err(PoolError::AlreadyInitialized);
        }
        if fee_bps > MAX_FEE_BPS {
            return Err(PoolError::InvalidFee);
        }
        if tick_spacing <= 0 || tick_spacing > MAX_TICK_SPACING {
            return Err(PoolError::InvalidTickSpacing);
        }

        let tick = get_tick_at_sqrt_ratio(from_host(&sqrt_price_x96))?;
        let (cardinality, cardinality_next) =
            oracle::initialize(&mut PoolStore::new(&env), env.ledger().timestamp());

        write_pool_config(
            &env,
            &PoolConfig {
                authority,
                token0,
                token1,
                fee_bps,
                tick_spacing,
                max_liquidity_per_tick: tick_spacing_to_max_liquidity_per_tick(tick_spacing),
            },
        );
        write_pool_state(
            &env,
            &PoolState {
                sqrt_price_x96: sqrt_price_x96.clone(),
                tick,
                liquidity: 0,
                fee_growth_global_0_x128: U256::from_u32(&env, 0),
                fee_growth_global_1_x128: U256::from_u32(&env, 0),
                protocol_fees_0: 0,
                protocol_fees_1: 0,
                fee_protocol_0: 0,
                fee_protocol_1: 0,
                observation_index: 0,
                observation_cardinality: cardinality,
                observation_cardinality_next: cardinality_next,
            },
        );
        set_initialized(&env);

        emit_initialize(&env, &sqrt_price_x96, tick);
        Ok(())
    }

    // ========================================================
    // LIQUIDITY
    // ========================================================

    /// Add `amount` liquidity to `recipient`'s position
    ///
    /// The owed token amounts are requested from `sender` through its
    /// `mint_callback(amount0, amount1, data)` and verified by balance.
    /// Returns `(amount0, amount1)` paid in.
    pub fn mint(
        env: Env,
        sender: Address,
        recipient: Address,
        tick_lower: i32,
        tick_upper: i32,
        amount: u128,
        data: Bytes,
    ) -> Result<(u128, u128), PoolError> {
        enter(&env)?;
        sender.require_auth();

        if amount == 0 {
            return Err(PoolError::InvalidAmount);
        }
        let liquidity_delta = to_amount(amount)?;

        let config = read_pool_config(&env)?;
        let mut state = read_pool_state(&env)?;
        let (pos, amount0, amount1) = modify_position(
            &env,
            &config,
            &mut state,
            &recipient,
            tick_lower,
            tick_upper,
            liquidity_delta,
        )?;
        write_position(&env, &recipient, tick_lower, tick_upper, &pos);
        write_pool_state(&env, &state);

        let amount0 = amount0.unsigned_abs();
        let amount1 = amount1.unsigned_abs();

        let balance0 = settlement::balance(&env, &config.token0);
        let balance1 = settlement::balance(&env, &config.token1);
        settlement::mint_callback(&env, &sender, amount0, amount1, &data);
        settlement::require_received(&env, &config.token0, balance0, amount0, PoolError::PaymentNotReceived)?;
        settlement::require_received(&env, &config.token1, balance1, amount1, PoolError::PaymentNotReceived)?;

        emit_mint(&env, &recipient, tick_lower, tick_upper, amount, amount0, amount1);
        exit(&env);
        Ok((amount0, amount1))
    }

    /// Remove `amount` liquidity from `owner`'s position
    ///
    /// Nothing is transferred: the released amounts are credited to the
    /// position's owed balances and paid out by `collect`. A zero `amount`
    /// only checkpoints the fees earned so far.
    pub fn burn(
        env: Env,
        owner: Address,
        tick_lower: i32,
        tick_upper: i32,
        amount: u128,
    ) -> Result<(u128, u128), PoolError> {
        enter(&env)?;
        owner.require_auth();

        let liquidity_delta = -to_amount(amount)?;

        let config = read_pool_config(&env)?;
        let mut state = read_pool_state(&env)?;
        let (mut pos, amount0, amount1) = modify_position(
            &env,
            &config,
            &mut state,
            &owner,
            tick_lower,
            tick_upper,
            liquidity_delta,
        )?;

        let amount0 = amount0.unsigned_abs();
        let amount1 = amount1.unsigned_abs();
        if amount0 > 0 || amount1 > 0 {
            credit_owed(&mut pos, amount0, amount1)?;
        }
        write_position(&env, &owner, tick_lower, tick_upper, &pos);
        write_pool_state(&env, &state);

        emit_burn(&env, &owner, tick_lower, tick_upper, amount, amount0, amount1);
        exit(&env);
        Ok((amount0, amount1))
    }

    /// Pay out up to `amount0_requested` / `amount1_requested` of what the
    /// position is owed
    pub fn collect(
        env: Env,
        owner: Address,
        recipient: Address,
        tick_lower: i32,
        tick_upper: i32,
        amount0_requested: u128,
        amount1_requested: u128,
    ) -> Result<(u128, u128), PoolError> {
        enter(&env)?;
        owner.require_auth();

        let config = read_pool_config(&env)?;
        let mut pos = read_position(&env, &owner, tick_lower, tick_upper);
        let (amount0, amount1) = collect_owed(&mut pos, amount0_requested, amount1_requested);
        write_position(&env, &owner, tick_lower, tick_upper, &pos);

        settlement::pay(&env, &config.token0, &recipient, amount0)?;
        settlement::pay(&env, &config.token1, &recipient, amount1)?;

        emit_collect(&env, &owner, &recipient, tick_lower, tick_upper, amount0, amount1);
        exit(&env);
        Ok((amount0, amount1))
    }

    // ========================================================
    // SWAP
    // ========================================================

    /// Swap token0 for token1 (`zero_for_one`) or the reverse
    ///
    /// # Arguments
    /// * `sender` - Pays the input through `swap_callback(amount0, amount1, data)`
    /// * `recipient` - Receives the output
    /// * `amount_specified` - Exact input when positive, exact output when negative
    /// * `sqrt_price_limit_x96` - Price the swap may not pass; zero for no limit
    pub fn swap(
        env: Env,
        sender: Address,
        recipient: Address,
        zero_for_one: bool,
        amount_specified: i128,
        sqrt_price_limit_x96: U256,
        data: Bytes,
    ) -> Result<SwapResult, PoolError> {
        enter(&env)?;
        sender.require_auth();

        let config = read_pool_config(&env)?;
        let mut state = read_pool_state(&env)?;
        let now = env.ledger().timestamp();

        let snapshot = PoolSnapshot {
            sqrt_price_x96: from_host(&state.sqrt_price_x96),
            tick: state.tick,
            liquidity: state.liquidity,
            tick_spacing: config.tick_spacing,
            fee_bps: config.fee_bps,
            fee_protocol: if zero_for_one {
                state.fee_protocol_0
            } else {
                state.fee_protocol_1
            },
            fee_growth_global_0_x128: from_host(&state.fee_growth_global_0_x128),
            fee_growth_global_1_x128: from_host(&state.fee_growth_global_1_x128),
        };
        let params = SwapParams {
            zero_for_one,
            amount_specified,
            sqrt_price_limit_x96: from_host(&sqrt_price_limit_x96),
        };

        let outcome = execute_swap(&mut PoolStore::new(&env), &snapshot, &params, || {
            oracle::observe_single(
                &PoolStore::new(&env),
                now,
                0,
                snapshot.tick,
                state.observation_index,
                snapshot.liquidity,
                state.observation_cardinality,
            )
            .map_err(PoolError::from)
        })?;

        // the sample covers the interval that ends with this swap
        let (index, cardinality) = oracle::write(
            &mut PoolStore::new(&env),
            state.observation_index,
            now,
            state.tick,
            state.liquidity,
            state.observation_cardinality,
            state.observation_cardinality_next,
        )?;
        state.observation_index = index;
        state.observation_cardinality = cardinality;

        state.sqrt_price_x96 = to_host(&env, outcome.sqrt_price_x96);
        state.tick = outcome.tick;
        state.liquidity = outcome.liquidity;
        if zero_for_one {
            state.fee_growth_global_0_x128 = to_host(&env, outcome.fee_growth_global_x128);
            state.protocol_fees_0 = state
                .protocol_fees_0
                .checked_add(outcome.protocol_fee)
                .ok_or(PoolError::ArithmeticOverflow)?;
        } else {
            state.fee_growth_global_1_x128 = to_host(&env, outcome.fee_growth_global_x128);
            state.protocol_fees_1 = state
                .protocol_fees_1
                .checked_add(outcome.protocol_fee)
                .ok_or(PoolError::ArithmeticOverflow)?;
        }
        write_pool_state(&env, &state);

        let (token_in, token_out) = if zero_for_one {
            (&config.token0, &config.token1)
        } else {
            (&config.token1, &config.token0)
        };

        settlement::pay(&env, token_out, &recipient, outcome.amount_out)?;
        if outcome.amount0 != 0 || outcome.amount1 != 0 {
            let balance_in = settlement::balance(&env, token_in);
            settlement::swap_callback(&env, &sender, outcome.amount0, outcome.amount1, &data);
            settlement::require_received(
                &env,
                token_in,
                balance_in,
                outcome.amount_in,
                PoolError::PaymentNotReceived,
            )?;
        }

        emit_swap(
            &env,
            &sender,
            &recipient,
            outcome.amount0,
            outcome.amount1,
            &state.sqrt_price_x96,
            state.liquidity,
            state.tick,
        );
        exit(&env);

        Ok(SwapResult {
            amount0: outcome.amount0,
            amount1: outcome.amount1,
            amount_in: outcome.amount_in,
            amount_out: outcome.amount_out,
            fee_paid: outcome.fee_paid,
            sqrt_price_x96: state.sqrt_price_x96,
            tick: state.tick,
            liquidity: state.liquidity,
        })
    }

    // ========================================================
    // FLASH LOAN
    // ========================================================

    /// Lend `amount0` / `amount1` to `recipient` for the duration of
    /// `sender`'s `flash_callback(fee0, fee1, data)`
    ///
    /// Principal plus the fee must be back in the pool when the callback
    /// returns. Everything paid on top of the principal is distributed like
    /// swap fees.
    pub fn flash(
        env: Env,
        sender: Address,
        recipient: Address,
        amount0: u128,
        amount1: u128,
        data: Bytes,
    ) -> Result<(), PoolError> {
        enter(&env)?;
        sender.require_auth();

        let config = read_pool_config(&env)?;
        let mut state = read_pool_state(&env)?;
        if state.liquidity == 0 {
            return Err(PoolError::InsufficientLiquidity);
        }

        let fee0 = flash_fee(amount0, config.fee_bps)?;
        let fee1 = flash_fee(amount1, config.fee_bps)?;

        let balance0 = settlement::balance(&env, &config.token0);
        let balance1 = settlement::balance(&env, &config.token1);

        settlement::pay(&env, &config.token0, &recipient, amount0)?;
        settlement::pay(&env, &config.token1, &recipient, amount1)?;
        settlement::flash_callback(&env, &sender, fee0, fee1, &data);

        settlement::require_received(&env, &config.token0, balance0, fee0, PoolError::FlashLoanNotRepaid)?;
        settlement::require_received(&env, &config.token1, balance1, fee1, PoolError::FlashLoanNotRepaid)?;

        let paid0 = received_since(&env, &config.token0, balance0)?;
        let paid1 = received_since(&env, &config.token1, balance1)?;

        if paid0 > 0 {
            let mut fees = FeeAccountant::new(
                from_host(&state.fee_growth_global_0_x128),
                state.fee_protocol_0,
            );
            fees.accrue(MathU256::from(paid0), state.liquidity)?;
            state.fee_growth_global_0_x128 = to_host(&env, fees.fee_growth_global_x128());
            state.protocol_fees_0 = state
                .protocol_fees_0
                .checked_add(fees.protocol_fees())
                .ok_or(PoolError::ArithmeticOverflow)?;
        }
        if paid1 > 0 {
            let mut fees = FeeAccountant::new(
                from_host(&state.fee_growth_global_1_x128),
                state.fee_protocol_1,
            );
            fees.accrue(MathU256::from(paid1), state.liquidity)?;
            state.fee_growth_global_1_x128 = to_host(&env, fees.fee_growth_global_x128());
            state.protocol_fees_1 = state
                .protocol_fees_1
                .checked_add(fees.protocol_fees())
                .ok_or(PoolError::ArithmeticOverflow)?;
        }
        write_pool_state(&env, &state);

        emit_flash(&env, &sender, &recipient, amount0, amount1, paid0, paid1);
        exit(&env);
        Ok(())
    }

    // ========================================================
    // PROTOCOL FEES
    // ========================================================

    /// Set the protocol fee denominators (0 disables, otherwise 4..=10)
    pub fn set_fee_protocol(
        env: Env,
        fee_protocol_0: u32,
        fee_protocol_1: u32,
    ) -> Result<(), PoolError> {
        enter(&env)?;
        let config = read_pool_config(&env)?;
        config.authority.require_auth();

        if !is_valid_fee_protocol(fee_protocol_0) || !is_valid_fee_protocol(fee_protocol_1) {
            return Err(PoolError::InvalidFeeProtocol);
        }

        let mut state = read_pool_state(&env)?;
        let old = (state.fee_protocol_0, state.fee_protocol_1);
        state.fee_protocol_0 = fee_protocol_0;
        state.fee_protocol_1 = fee_protocol_1;
        write_pool_state(&env, &state);

        emit_fee_protocol(&env, old, (fee_protocol_0, fee_protocol_1));
        exit(&env);
        Ok(())
    }

    /// Withdraw up to the requested amounts of accrued protocol fees
    pub fn collect_protocol(
        env: Env,
        recipient: Address,
        amount0_requested: u128,
        amount1_requested: u128,
    ) -> Result<(u128, u128), PoolError> {
        enter(&env)?;
        let config = read_pool_config(&env)?;
        config.authority.require_auth();

        let mut state = read_pool_state(&env)?;
        let amount0 = amount0_requested.min(state.protocol_fees_0);
        let amount1 = amount1_requested.min(state.protocol_fees_1);
        state.protocol_fees_0 -= amount0;
        state.protocol_fees_1 -= amount1;
        write_pool_state(&env, &state);

        settlement::pay(&env, &config.token0, &recipient, amount0)?;
        settlement::pay(&env, &config.token1, &recipient, amount1)?;

        emit_collect_protocol(&env, &recipient, amount0, amount1);
        exit(&env);
        Ok((amount0, amount1))
    }

    // ========================================================
    // ORACLE
    // ========================================================

    /// Reserve oracle slots up to `observation_cardinality_next`
    ///
    /// The ring never shrinks: a value at or below the current target is
    /// accepted and leaves the pool untouched, since no error is defined for
    /// it. Requests above 65535 are capped.
    pub fn increase_observation_cardinality_next(
        env: Env,
        observation_cardinality_next: u32,
    ) -> Result<(), PoolError> {
        enter(&env)?;
        let mut state = read_pool_state(&env)?;

        let old = state.observation_cardinality_next;
        let new = oracle::grow(&mut PoolStore::new(&env), old, observation_cardinality_next)?;
        if new != old {
            state.observation_cardinality_next = new;
            write_pool_state(&env, &state);
            emit_observation_cardinality_next(&env, old, new);
        }

        exit(&env);
        Ok(())
    }

    /// Cumulative tick and seconds-per-liquidity as of each `seconds_ago`
    pub fn observe(env: Env, seconds_agos: Vec<u64>) -> Result<ObserveResult, PoolError> {
        let state = read_pool_state(&env)?;
        let store = PoolStore::new(&env);
        let now = env.ledger().timestamp();

        let mut tick_cumulatives = Vec::new(&env);
        let mut seconds_per_liquidity_cumulative_x128s = Vec::new(&env);
        for seconds_ago in seconds_agos.iter() {
            let (tick_cumulative, seconds_per_liquidity) = oracle::observe_single(
                &store,
                now,
                seconds_ago,
                state.tick,
                state.observation_index,
                state.liquidity,
                state.observation_cardinality,
            )?;
            tick_cumulatives.push_back(tick_cumulative);
            seconds_per_liquidity_cumulative_x128s.push_back(to_host(&env, seconds_per_liquidity));
        }

        Ok(ObserveResult {
            tick_cumulatives,
            seconds_per_liquidity_cumulative_x128s,
        })
    }

    /// Oracle values accumulated while the price was inside a range
    ///
    /// Only comparable between snapshots taken while the range stayed
    /// initialized.
    pub fn snapshot_cumulatives_inside(
        env: Env,
        tick_lower: i32,
        tick_upper: i32,
    ) -> Result<CumulativesInside, PoolError> {
        let config = read_pool_config(&env)?;
        let state = read_pool_state(&env)?;
        validate_tick_range(tick_lower, tick_upper, config.tick_spacing)?;

        let store = PoolStore::new(&env);
        let (tick_cumulative, seconds_per_liquidity) = oracle::observe_single(
            &store,
            env.ledger().timestamp(),
            0,
            state.tick,
            state.observation_index,
            state.liquidity,
            state.observation_cardinality,
        )?;
        let (tick_cumulative_inside, seconds_per_liquidity_inside) = get_cumulatives_inside(
            &store,
            tick_lower,
            tick_upper,
            state.tick,
            tick_cumulative,
            seconds_per_liquidity,
        )?;

        Ok(CumulativesInside {
            tick_cumulative_inside,
            seconds_per_liquidity_inside_x128: to_host(&env, seconds_per_liquidity_inside),
        })
    }

    // ========================================================
    // VIEW FUNCTIONS
    // ========================================================

    pub fn is_initialized(env: Env) -> bool {
        is_initialized(&env)
    }

    pub fn is_locked(env: Env) -> bool {
        is_locked(&env)
    }

    /// Current pool state (price, tick, liquidity, fees, oracle cursor)
    pub fn get_pool_state(env: Env) -> Result<PoolState, PoolError> {
        read_pool_state(&env)
    }

    pub fn get_config(env: Env) -> Result<PoolConfig, PoolError> {
        read_pool_config(&env)
    }

    /// Tick record (all zero if the tick holds no liquidity)
    pub fn get_tick(env: Env, tick: i32) -> TickRecord {
        TickRecord::from_info(&env, &PoolStore::new(&env).read_tick(tick))
    }

    /// Bitmap word at `word_pos`; bit `i` marks compressed tick `word_pos * 256 + i`
    pub fn get_tick_bitmap(env: Env, word_pos: i32) -> U256 {
        to_host(&env, PoolStore::new(&env).read_bitmap_word(word_pos))
    }

    pub fn get_observation(env: Env, index: u32) -> ObservationRecord {
        let observation = oracle::ObservationStore::read_observation(&PoolStore::new(&env), index);
        ObservationRecord::from_observation(&env, &observation)
    }

    /// Position record, with fees earned since its last checkpoint added
    /// to the owed balances
    pub fn get_position(
        env: Env,
        owner: Address,
        tick_lower: i32,
        tick_upper: i32,
    ) -> Result<PositionInfo, PoolError> {
        let state = read_pool_state(&env)?;
        let pos = read_position(&env, &owner, tick_lower, tick_upper);

        let (inside0, inside1) = get_fee_growth_inside(
            &PoolStore::new(&env),
            tick_lower,
            tick_upper,
            state.tick,
            from_host(&state.fee_growth_global_0_x128),
            from_host(&state.fee_growth_global_1_x128),
        );
        let (pending0, pending1) = calculate_pending_fees(&pos, inside0, inside1)?;

        Ok(PositionInfo {
            liquidity: pos.liquidity,
            fee_growth_inside_0_last_x128: to_host(&env, pos.fee_growth_inside_0_last_x128),
            fee_growth_inside_1_last_x128: to_host(&env, pos.fee_growth_inside_1_last_x128),
            tokens_owed_0: pos
                .tokens_owed_0
                .checked_add(pending0)
                .ok_or(PoolError::ArithmeticOverflow)?,
            tokens_owed_1: pos
                .tokens_owed_1
                .checked_add(pending1)
                .ok_or(PoolError::ArithmeticOverflow)?,
        })
    }
}

// ========================================================
// LOCK
// ========================================================

/// Take the reentrancy lock. A failed call rolls the flag back with the
/// rest of its writes, so only successful paths need `exit`.
fn enter(env: &Env) -> Result<(), PoolError> {
    if !is_initialized(env) {
        return Err(PoolError::NotInitialized);
    }
    if is_locked(env) {
        return Err(PoolError::Locked);
    }
    set_locked(env, true);
    Ok(())
}

fn exit(env: &Env) {
    set_locked(env, false);
}

// ========================================================
// POSITION HELPERS
// ========================================================

/// Apply `liquidity_delta` to a position and its ticks.
///
/// Returns the updated (unsaved) position and the signed token amounts the
/// change is worth: positive amounts are owed to the pool.
fn modify_position(
    env: &Env,
    config: &PoolConfig,
    state: &mut PoolState,
    owner: &Address,
    tick_lower: i32,
    tick_upper: i32,
    liquidity_delta: i128,
) -> Result<(Position, i128, i128), PoolError> {
    validate_tick_range(tick_lower, tick_upper, config.tick_spacing)?;

    let pos = update_position_and_ticks(env, config, state, owner, tick_lower, tick_upper, liquidity_delta)?;

    let mut amount0 = 0;
    let mut amount1 = 0;
    if liquidity_delta != 0 {
        let sqrt_lower = get_sqrt_ratio_at_tick(tick_lower)?;
        let sqrt_upper = get_sqrt_ratio_at_tick(tick_upper)?;

        if state.tick < tick_lower {
            // range entirely above the price: only token0
            amount0 = get_amount_0_delta_signed(sqrt_lower, sqrt_upper, liquidity_delta)?;
        } else if state.tick < tick_upper {
            let sqrt_price = from_host(&state.sqrt_price_x96);

            let (index, cardinality) = oracle::write(
                &mut PoolStore::new(env),
                state.observation_index,
                env.ledger().timestamp(),
                state.tick,
                state.liquidity,
                state.observation_cardinality,
                state.observation_cardinality_next,
            )?;
            state.observation_index = index;
            state.observation_cardinality = cardinality;

            amount0 = get_amount_0_delta_signed(sqrt_price, sqrt_upper, liquidity_delta)?;
            amount1 = get_amount_1_delta_signed(sqrt_lower, sqrt_price, liquidity_delta)?;
            state.liquidity = add_delta(state.liquidity, liquidity_delta)?;
        } else {
            // range entirely below the price: only token1
            amount1 = get_amount_1_delta_signed(sqrt_lower, sqrt_upper, liquidity_delta)?;
        }
    }

    Ok((pos, amount0, amount1))
}

fn update_position_and_ticks(
    env: &Env,
    config: &PoolConfig,
    state: &PoolState,
    owner: &Address,
    tick_lower: i32,
    tick_upper: i32,
    liquidity_delta: i128,
) -> Result<Position, PoolError> {
    let mut store = PoolStore::new(env);
    let fee_growth_global_0 = from_host(&state.fee_growth_global_0_x128);
    let fee_growth_global_1 = from_host(&state.fee_growth_global_1_x128);

    let mut flipped_lower = false;
    let mut flipped_upper = false;
    if liquidity_delta != 0 {
        let (tick_cumulative, seconds_per_liquidity) = oracle::observe_single(
            &store,
            env.ledger().timestamp(),
            0,
            state.tick,
            state.observation_index,
            state.liquidity,
            state.observation_cardinality,
        )?;
        let accumulators = Accumulators {
            fee_growth_global_0_x128: fee_growth_global_0,
            fee_growth_global_1_x128: fee_growth_global_1,
            tick_cumulative,
            seconds_per_liquidity_cumulative_x128: seconds_per_liquidity,
        };

        flipped_lower = update_tick(
            &mut store,
            tick_lower,
            state.tick,
            liquidity_delta,
            false,
            config.max_liquidity_per_tick,
            &accumulators,
        )?;
        flipped_upper = update_tick(
            &mut store,
            tick_upper,
            state.tick,
            liquidity_delta,
            true,
            config.max_liquidity_per_tick,
            &accumulators,
        )?;

        if flipped_lower {
            flip_tick(&mut store, tick_lower, config.tick_spacing)?;
        }
        if flipped_upper {
            flip_tick(&mut store, tick_upper, config.tick_spacing)?;
        }
    }

    let (inside0, inside1) = get_fee_growth_inside(
        &store,
        tick_lower,
        tick_upper,
        state.tick,
        fee_growth_global_0,
        fee_growth_global_1,
    );

    let mut pos = read_position(env, owner, tick_lower, tick_upper);
    update_position(&mut pos, liquidity_delta, inside0, inside1)?;

    // ticks no longer referenced by any position are dropped
    if liquidity_delta < 0 {
        if flipped_lower {
            clear_tick(&mut store, tick_lower);
        }
        if flipped_upper {
            clear_tick(&mut store, tick_upper);
        }
    }

    Ok(pos)
}

// ========================================================
// FLASH HELPERS
// ========================================================

fn flash_fee(amount: u128, fee_bps: u32) -> Result<u128, PoolError> {
    let fee = mul_div_rounding_up(
        MathU256::from(amount),
        MathU256::from(fee_bps),
        MathU256::from(FEE_DENOMINATOR),
    )?;
    Ok(to_u128(fee)?)
}

/// Pool balance growth of `token` since `before`
fn received_since(env: &Env, token: &Address, before: i128) -> Result<u128, PoolError> {
    let after = settlement::balance(env, token);
    let received = after.checked_sub(before).ok_or(PoolError::ArithmeticOverflow)?;
    u128::try_from(received).map_err(|_| PoolError::FlashLoanNotRepaid)
}
