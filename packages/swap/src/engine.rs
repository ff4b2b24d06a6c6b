use alloy_primitives::U256;
use coveswap_math::{
    add_delta, compute_swap_step, full_math::to_i128, get_sqrt_ratio_at_tick,
    get_tick_at_sqrt_ratio, MathError, MAX_SQRT_RATIO, MAX_TICK, MIN_SQRT_RATIO, MIN_TICK,
};
use coveswap_tick::{cross_tick, next_initialized_tick_within_one_word, Accumulators, TickStore};

use crate::error::SwapError;
use crate::fees::FeeAccountant;
use crate::types::{PoolSnapshot, SwapOutcome, SwapParams};

// ============================================================
// SWAP STATE
// ============================================================

/// Running state of the step loop
struct SwapState {
    /// Specified amount still to be swapped (input or output side)
    amount_specified_remaining: i128,
    /// Amount on the other side accumulated so far
    amount_calculated: i128,
    sqrt_price_x96: U256,
    tick: i32,
    liquidity: u128,
}

/// Values computed for a single step
struct StepComputations {
    sqrt_price_start_x96: U256,
    tick_next: i32,
    initialized: bool,
    sqrt_price_next_x96: U256,
}

// ============================================================
// PRICE LIMIT
// ============================================================

/// Resolve and validate the caller's price limit.
///
/// Zero means no limit: the extreme admissible price in the swap direction,
/// never on the wrong side of the current price. A limit equal to the
/// current price is accepted and produces an empty swap.
pub fn resolve_price_limit(
    zero_for_one: bool,
    sqrt_price_limit_x96: U256,
    sqrt_price_current_x96: U256,
) -> Result<U256, SwapError> {
    if sqrt_price_limit_x96.is_zero() {
        // a pool parked at a ratio bound has nowhere left to go
        return Ok(if zero_for_one {
            (MIN_SQRT_RATIO + U256::ONE).min(sqrt_price_current_x96)
        } else {
            (MAX_SQRT_RATIO - U256::ONE).max(sqrt_price_current_x96)
        });
    }

    let valid = if zero_for_one {
        sqrt_price_limit_x96 <= sqrt_price_current_x96 && sqrt_price_limit_x96 > MIN_SQRT_RATIO
    } else {
        sqrt_price_limit_x96 >= sqrt_price_current_x96 && sqrt_price_limit_x96 < MAX_SQRT_RATIO
    };
    if !valid {
        return Err(SwapError::InvalidPriceLimit);
    }
    Ok(sqrt_price_limit_x96)
}

// ============================================================
// SWAP LOOP
// ============================================================

/// Execute a swap against `store`.
///
/// Steps from initialized tick to initialized tick until the specified amount
/// is exhausted or the price limit is reached, crossing ticks along the way.
/// `observe` yields `(tick_cumulative, seconds_per_liquidity_cumulative_x128)`
/// as of now for the pool state the swap started from; it is called at most
/// once, on the first initialized tick crossed.
///
/// Only tick records are written; persisting the returned price, tick,
/// liquidity and fee values is the caller's job.
pub fn execute_swap<S, F, E>(
    store: &mut S,
    pool: &PoolSnapshot,
    params: &SwapParams,
    mut observe: F,
) -> Result<SwapOutcome, E>
where
    S: TickStore,
    F: FnMut() -> Result<(i64, U256), E>,
    E: From<SwapError>,
{
    if params.amount_specified == 0 {
        return Err(SwapError::InvalidAmount.into());
    }

    let zero_for_one = params.zero_for_one;
    let exact_input = params.amount_specified > 0;
    let sqrt_price_limit_x96 =
        resolve_price_limit(zero_for_one, params.sqrt_price_limit_x96, pool.sqrt_price_x96)?;

    let mut state = SwapState {
        amount_specified_remaining: params.amount_specified,
        amount_calculated: 0,
        sqrt_price_x96: pool.sqrt_price_x96,
        tick: pool.tick,
        liquidity: pool.liquidity,
    };

    let mut fees = FeeAccountant::new(
        if zero_for_one {
            pool.fee_growth_global_0_x128
        } else {
            pool.fee_growth_global_1_x128
        },
        pool.fee_protocol,
    );

    let mut cumulatives: Option<(i64, U256)> = None;
    let mut ticks_crossed = 0u32;

    while state.amount_specified_remaining != 0 && state.sqrt_price_x96 != sqrt_price_limit_x96 {
        let mut step = StepComputations {
            sqrt_price_start_x96: state.sqrt_price_x96,
            tick_next: 0,
            initialized: false,
            sqrt_price_next_x96: U256::ZERO,
        };

        let (tick_next, initialized) =
            next_initialized_tick_within_one_word(store, state.tick, pool.tick_spacing, zero_for_one);
        // the bitmap knows nothing of the tick domain
        step.tick_next = tick_next.clamp(MIN_TICK, MAX_TICK);
        step.initialized = initialized;
        step.sqrt_price_next_x96 = get_sqrt_ratio_at_tick(step.tick_next).map_err(SwapError::from)?;

        let sqrt_price_target_x96 = if zero_for_one {
            step.sqrt_price_next_x96.max(sqrt_price_limit_x96)
        } else {
            step.sqrt_price_next_x96.min(sqrt_price_limit_x96)
        };

        let computed = compute_swap_step(
            state.sqrt_price_x96,
            sqrt_price_target_x96,
            state.liquidity,
            state.amount_specified_remaining,
            pool.fee_bps,
        )
        .map_err(SwapError::from)?;
        state.sqrt_price_x96 = computed.sqrt_price_next_x96;

        apply_step_amounts(&mut state, exact_input, &computed).map_err(SwapError::from)?;
        fees.accrue(computed.fee_amount, state.liquidity)?;

        if state.sqrt_price_x96 == step.sqrt_price_next_x96 {
            if step.initialized {
                let (tick_cumulative, seconds_per_liquidity_cumulative_x128) = match cumulatives {
                    Some(values) => values,
                    None => {
                        let values = observe()?;
                        cumulatives = Some(values);
                        values
                    }
                };

                let accumulators = Accumulators {
                    fee_growth_global_0_x128: if zero_for_one {
                        fees.fee_growth_global_x128()
                    } else {
                        pool.fee_growth_global_0_x128
                    },
                    fee_growth_global_1_x128: if zero_for_one {
                        pool.fee_growth_global_1_x128
                    } else {
                        fees.fee_growth_global_x128()
                    },
                    tick_cumulative,
                    seconds_per_liquidity_cumulative_x128,
                };

                let mut liquidity_net = cross_tick(store, step.tick_next, &accumulators);
                // moving leftward, liquidity_net applies in reverse
                if zero_for_one {
                    liquidity_net = liquidity_net
                        .checked_neg()
                        .ok_or(SwapError::Math(MathError::ArithmeticOverflow))?;
                }
                state.liquidity = add_delta(state.liquidity, liquidity_net).map_err(SwapError::from)?;
                ticks_crossed += 1;
            }

            state.tick = if zero_for_one {
                step.tick_next - 1
            } else {
                step.tick_next
            };
        } else if state.sqrt_price_x96 != step.sqrt_price_start_x96 {
            // moved within the range: recompute the tick from the price
            state.tick = get_tick_at_sqrt_ratio(state.sqrt_price_x96).map_err(SwapError::from)?;
        }
    }

    let consumed = params
        .amount_specified
        .checked_sub(state.amount_specified_remaining)
        .ok_or(SwapError::Math(MathError::ArithmeticOverflow))?;
    let (amount0, amount1) = if zero_for_one == exact_input {
        (consumed, state.amount_calculated)
    } else {
        (state.amount_calculated, consumed)
    };
    let (amount_in, amount_out) = if zero_for_one {
        (amount0, amount1)
    } else {
        (amount1, amount0)
    };

    Ok(SwapOutcome {
        amount0,
        amount1,
        amount_in: amount_in.unsigned_abs(),
        amount_out: amount_out.unsigned_abs(),
        fee_paid: fees.total_fees(),
        protocol_fee: fees.protocol_fees(),
        sqrt_price_x96: state.sqrt_price_x96,
        tick: state.tick,
        liquidity: state.liquidity,
        fee_growth_global_x128: fees.fee_growth_global_x128(),
        ticks_crossed,
    })
}

/// Move a step's amounts from the specified side to the calculated side.
fn apply_step_amounts(
    state: &mut SwapState,
    exact_input: bool,
    step: &coveswap_math::SwapStep,
) -> Result<(), MathError> {
    let amount_in = to_i128(step.amount_in)?;
    let amount_out = to_i128(step.amount_out)?;
    let fee_amount = to_i128(step.fee_amount)?;
    let paid = amount_in
        .checked_add(fee_amount)
        .ok_or(MathError::ArithmeticOverflow)?;

    if exact_input {
        state.amount_specified_remaining = state
            .amount_specified_remaining
            .checked_sub(paid)
            .ok_or(MathError::ArithmeticOverflow)?;
        state.amount_calculated = state
            .amount_calculated
            .checked_sub(amount_out)
            .ok_or(MathError::ArithmeticOverflow)?;
    } else {
        state.amount_specified_remaining = state
            .amount_specified_remaining
            .checked_add(amount_out)
            .ok_or(MathError::ArithmeticOverflow)?;
        state.amount_calculated = state
            .amount_calculated
            .checked_add(paid)
            .ok_or(MathError::ArithmeticOverflow)?;
    }
    Ok(())
}
