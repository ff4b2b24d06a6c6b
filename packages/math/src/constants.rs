// Constants for the fixed-point price domain.
//
// Grouped by functionality:
// - tick bounds and their sqrt-price images
// - fixed-point scaling factors
// - fee denominators and protocol fee bounds
// - oracle sizing

use alloy_primitives::U256;

// ============================================================
// TICK CONSTANTS
// ============================================================

/// Minimum valid tick value. Price at MIN_TICK is 1.0001^-887272 ≈ 2.94e-39.
pub const MIN_TICK: i32 = -887272;

/// Maximum valid tick value. Price at MAX_TICK is 1.0001^887272 ≈ 3.40e+38.
pub const MAX_TICK: i32 = 887272;

// ============================================================
// SQRT PRICE CONSTANTS (Q64.96 format)
// ============================================================

/// Sqrt price at MIN_TICK, i.e. `get_sqrt_ratio_at_tick(MIN_TICK)`.
pub const MIN_SQRT_RATIO: U256 = U256::from_limbs([4295128739, 0, 0, 0]);

/// Sqrt price at MAX_TICK, i.e. `get_sqrt_ratio_at_tick(MAX_TICK)`.
/// Value: 1461446703485210103287273052203988822378723970342
pub const MAX_SQRT_RATIO: U256 = U256::from_limbs([
    6743328256752651558,
    17280870778742802505,
    4294805859,
    0,
]);

// ============================================================
// FIXED POINT CONSTANTS
// ============================================================

/// Number of fractional bits of a Q64.96 sqrt price.
pub const RESOLUTION: usize = 96;

/// 2^96, a sqrt price of exactly 1.0.
pub const Q96: U256 = U256::from_limbs([0, 1 << 32, 0, 0]);

/// 2^128, scaling factor of fee-growth and seconds-per-liquidity accumulators.
pub const Q128: U256 = U256::from_limbs([0, 0, 1, 0]);

// ============================================================
// FEE CONSTANTS
// ============================================================

/// Fee rates are expressed in basis points of this denominator.
pub const FEE_DENOMINATOR: u32 = 10_000;

/// Largest admissible pool fee rate (exclusive of the denominator).
pub const MAX_FEE_BPS: u32 = FEE_DENOMINATOR - 1;

/// Smallest non-zero protocol fee denominator (a 1/4 skim of every fee).
pub const MIN_FEE_PROTOCOL: u32 = 4;

/// Largest protocol fee denominator (a 1/10 skim of every fee).
pub const MAX_FEE_PROTOCOL: u32 = 10;

// ============================================================
// TICK SPACING / ORACLE CONSTANTS
// ============================================================

/// Largest admissible tick spacing.
pub const MAX_TICK_SPACING: i32 = 16384;

/// Upper bound on the number of retained oracle observations.
pub const MAX_OBSERVATION_CARDINALITY: u32 = 65_535;
