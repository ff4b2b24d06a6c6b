// Observation ring buffer operations.
//
// The buffer holds `cardinality` populated slots and grows toward
// `cardinality_next` only when the write index wraps, so samples are never
// reordered. Timestamps are ledger seconds and never wrap.

use alloy_primitives::U256;
use coveswap_math::{MathError, MAX_OBSERVATION_CARDINALITY};

use crate::error::OracleError;
use crate::store::ObservationStore;
use crate::types::Observation;

/// Extrapolate `last` to `block_timestamp` assuming `tick` and `liquidity`
/// held for the whole elapsed interval.
pub fn transform(
    last: &Observation,
    block_timestamp: u64,
    tick: i32,
    liquidity: u128,
) -> Result<Observation, OracleError> {
    let delta = block_timestamp
        .checked_sub(last.block_timestamp)
        .ok_or(OracleError::ObservationNotAvailable)?;
    let delta_signed = i64::try_from(delta).map_err(|_| MathError::ArithmeticOverflow)?;

    let tick_cumulative = (tick as i64)
        .checked_mul(delta_signed)
        .and_then(|growth| last.tick_cumulative.checked_add(growth))
        .ok_or(MathError::ArithmeticOverflow)?;

    let seconds_per_liquidity = (U256::from(delta) << 128usize) / U256::from(liquidity.max(1));
    let seconds_per_liquidity_cumulative_x128 = last
        .seconds_per_liquidity_cumulative_x128
        .checked_add(seconds_per_liquidity)
        .ok_or(MathError::ArithmeticOverflow)?;

    Ok(Observation {
        block_timestamp,
        tick_cumulative,
        seconds_per_liquidity_cumulative_x128,
        initialized: true,
    })
}

/// Seed slot 0. Returns `(cardinality, cardinality_next)`.
pub fn initialize<S: ObservationStore>(store: &mut S, block_timestamp: u64) -> (u32, u32) {
    store.write_observation(
        0,
        &Observation {
            block_timestamp,
            tick_cumulative: 0,
            seconds_per_liquidity_cumulative_x128: U256::ZERO,
            initialized: true,
        },
    );
    (1, 1)
}

/// Record a sample, at most once per timestamp.
///
/// `tick` and `liquidity` are the values in effect *before* the current
/// operation, i.e. since the latest sample. Returns the new
/// `(index, cardinality)`.
#[allow(clippy::too_many_arguments)]
pub fn write<S: ObservationStore>(
    store: &mut S,
    index: u32,
    block_timestamp: u64,
    tick: i32,
    liquidity: u128,
    cardinality: u32,
    cardinality_next: u32,
) -> Result<(u32, u32), OracleError> {
    if cardinality == 0 {
        return Err(OracleError::Uninitialized);
    }
    let last = store.read_observation(index);

    if last.block_timestamp == block_timestamp {
        return Ok((index, cardinality));
    }

    // only grow once the newest sample sits in the last populated slot
    let cardinality_updated = if cardinality_next > cardinality && index == cardinality - 1 {
        cardinality_next
    } else {
        cardinality
    };

    let index_updated = (index + 1) % cardinality_updated;
    let observation = transform(&last, block_timestamp, tick, liquidity)?;
    store.write_observation(index_updated, &observation);

    Ok((index_updated, cardinality_updated))
}

/// Reserve slots up to `next`. A `next` at or below `current` is a no-op.
///
/// Returns the new `cardinality_next`.
pub fn grow<S: ObservationStore>(store: &mut S, current: u32, next: u32) -> Result<u32, OracleError> {
    if current == 0 {
        return Err(OracleError::Uninitialized);
    }
    let next = next.min(MAX_OBSERVATION_CARDINALITY);
    if next <= current {
        return Ok(current);
    }
    // materialize the slots now so later writes only overwrite them
    for i in current..next {
        store.write_observation(i, &Observation::default());
    }
    Ok(next)
}

/// Locate the samples at or around `target`, which must lie within the
/// retained window and before the newest sample.
fn binary_search<S: ObservationStore>(
    store: &S,
    target: u64,
    index: u32,
    cardinality: u32,
) -> Result<(Observation, Observation), OracleError> {
    // oldest slot
    let mut l = (index as u64 + 1) % cardinality as u64;
    // newest slot, unrolled past the end
    let mut r = l + cardinality as u64 - 1;

    loop {
        if l > r {
            return Err(OracleError::ObservationNotAvailable);
        }
        let i = (l + r) / 2;

        let before_or_at = store.read_observation((i % cardinality as u64) as u32);
        if !before_or_at.initialized {
            // reserved but unwritten slot, the real samples are further right
            l = i + 1;
            continue;
        }

        let at_or_after = store.read_observation(((i + 1) % cardinality as u64) as u32);
        let target_at_or_after = before_or_at.block_timestamp <= target;

        if target_at_or_after && target <= at_or_after.block_timestamp {
            return Ok((before_or_at, at_or_after));
        }

        if !target_at_or_after {
            r = i.checked_sub(1).ok_or(OracleError::ObservationNotAvailable)?;
        } else {
            l = i + 1;
        }
    }
}

fn get_surrounding_observations<S: ObservationStore>(
    store: &S,
    target: u64,
    tick: i32,
    index: u32,
    liquidity: u128,
    cardinality: u32,
) -> Result<(Observation, Observation), OracleError> {
    let newest = store.read_observation(index);

    if newest.block_timestamp <= target {
        if newest.block_timestamp == target {
            return Ok((newest.clone(), newest));
        }
        let extrapolated = transform(&newest, target, tick, liquidity)?;
        return Ok((newest, extrapolated));
    }

    let mut oldest = store.read_observation((index + 1) % cardinality);
    if !oldest.initialized {
        oldest = store.read_observation(0);
    }

    if oldest.block_timestamp > target {
        return Err(OracleError::ObservationNotAvailable);
    }

    binary_search(store, target, index, cardinality)
}

/// Cumulative values as of `seconds_ago` before `time`.
///
/// Zero extrapolates from the newest sample using the *current* tick and
/// liquidity; other offsets interpolate linearly between the bracketing
/// samples.
#[allow(clippy::too_many_arguments)]
pub fn observe_single<S: ObservationStore>(
    store: &S,
    time: u64,
    seconds_ago: u64,
    tick: i32,
    index: u32,
    liquidity: u128,
    cardinality: u32,
) -> Result<(i64, U256), OracleError> {
    if cardinality == 0 {
        return Err(OracleError::Uninitialized);
    }

    if seconds_ago == 0 {
        let mut last = store.read_observation(index);
        if last.block_timestamp != time {
            last = transform(&last, time, tick, liquidity)?;
        }
        return Ok((last.tick_cumulative, last.seconds_per_liquidity_cumulative_x128));
    }

    let target = time
        .checked_sub(seconds_ago)
        .ok_or(OracleError::ObservationNotAvailable)?;

    let (before_or_at, at_or_after) =
        get_surrounding_observations(store, target, tick, index, liquidity, cardinality)?;

    if target == before_or_at.block_timestamp {
        Ok((
            before_or_at.tick_cumulative,
            before_or_at.seconds_per_liquidity_cumulative_x128,
        ))
    } else if target == at_or_after.block_timestamp {
        Ok((
            at_or_after.tick_cumulative,
            at_or_after.seconds_per_liquidity_cumulative_x128,
        ))
    } else {
        // strictly between the two samples
        let observation_time_delta = at_or_after.block_timestamp - before_or_at.block_timestamp;
        let target_delta = target - before_or_at.block_timestamp;

        let time_delta_signed =
            i64::try_from(observation_time_delta).map_err(|_| MathError::ArithmeticOverflow)?;
        let target_delta_signed =
            i64::try_from(target_delta).map_err(|_| MathError::ArithmeticOverflow)?;

        let tick_cumulative = at_or_after
            .tick_cumulative
            .checked_sub(before_or_at.tick_cumulative)
            .map(|diff| diff / time_delta_signed)
            .and_then(|rate| rate.checked_mul(target_delta_signed))
            .and_then(|growth| before_or_at.tick_cumulative.checked_add(growth))
            .ok_or(MathError::ArithmeticOverflow)?;

        let seconds_per_liquidity_growth = at_or_after
            .seconds_per_liquidity_cumulative_x128
            .wrapping_sub(before_or_at.seconds_per_liquidity_cumulative_x128)
            .checked_mul(U256::from(target_delta))
            .ok_or(MathError::ArithmeticOverflow)?
            / U256::from(observation_time_delta);
        let seconds_per_liquidity_cumulative_x128 = before_or_at
            .seconds_per_liquidity_cumulative_x128
            .checked_add(seconds_per_liquidity_growth)
            .ok_or(MathError::ArithmeticOverflow)?;

        Ok((tick_cumulative, seconds_per_liquidity_cumulative_x128))
    }
}
