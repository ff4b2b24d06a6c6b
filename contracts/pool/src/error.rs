// Error handling for the pool contract.
//
// Every library error converts into a `PoolError` code. Returning an error
// from an entry point rolls back all storage writes of the invocation.

use coveswap_math::MathError;
use coveswap_oracle::OracleError;
use coveswap_position::PositionError;
use coveswap_swap::SwapError;
use coveswap_tick::TickError;
use soroban_sdk::contracterror;

// ============================================================
// CONTRACT ERRORS
// ============================================================

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum PoolError {
    // Lifecycle errors (100-199)
    /// Pool has already been initialized
    AlreadyInitialized = 100,
    /// Pool has not been initialized
    NotInitialized = 101,
    /// A mutating call is already in progress
    Locked = 102,

    // Configuration errors (200-299)
    /// Fee must be below 10000 bps
    InvalidFee = 200,
    /// Tick spacing must be in 1..=16384
    InvalidTickSpacing = 201,
    /// Protocol fee denominator must be 0 or 4..=10
    InvalidFeeProtocol = 202,

    // Tick errors (300-399)
    /// Bounds unordered, off the spacing grid, or outside the tick domain
    InvalidTickRange = 300,
    /// A tick would hold more than the per-tick liquidity maximum
    TickLiquidityOverflow = 301,
    /// A range bound holds no liquidity
    TickNotInitialized = 302,

    // Liquidity errors (400-499)
    /// Zero where a non-zero amount is required
    InvalidAmount = 400,
    /// Burn exceeds the position, or the pool has no liquidity to lend
    InsufficientLiquidity = 401,

    // Swap errors (500-599)
    /// Price limit on the wrong side of the current price
    InvalidPriceLimit = 500,

    // Oracle errors (600-699)
    /// Requested time precedes the oldest retained observation
    ObservationNotAvailable = 600,

    // Settlement errors (700-799)
    /// Callback did not deliver the amounts owed
    PaymentNotReceived = 700,
    /// Flash loan callback did not return principal plus fee
    FlashLoanNotRepaid = 701,

    // Math errors (800-899)
    /// Arithmetic overflow
    ArithmeticOverflow = 800,
    /// Division by zero
    DivisionByZero = 801,
    /// Tick or price outside the supported domain
    OutOfRange = 802,
}

// ============================================================
// LIBRARY ERROR CONVERSION
// ============================================================

impl From<MathError> for PoolError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::OutOfRange => PoolError::OutOfRange,
            MathError::ArithmeticOverflow => PoolError::ArithmeticOverflow,
            MathError::DivisionByZero => PoolError::DivisionByZero,
            MathError::InsufficientLiquidity => PoolError::InsufficientLiquidity,
        }
    }
}

impl From<TickError> for PoolError {
    fn from(err: TickError) -> Self {
        match err {
            TickError::InvalidTickRange => PoolError::InvalidTickRange,
            TickError::InsufficientLiquidity => PoolError::InsufficientLiquidity,
            TickError::LiquidityOverflow => PoolError::TickLiquidityOverflow,
            TickError::NotInitialized => PoolError::TickNotInitialized,
            TickError::Math(err) => err.into(),
        }
    }
}

impl From<PositionError> for PoolError {
    fn from(err: PositionError) -> Self {
        match err {
            PositionError::InsufficientLiquidity => PoolError::InsufficientLiquidity,
            PositionError::ArithmeticOverflow => PoolError::ArithmeticOverflow,
            PositionError::Math(err) => err.into(),
        }
    }
}

impl From<OracleError> for PoolError {
    fn from(err: OracleError) -> Self {
        match err {
            OracleError::ObservationNotAvailable => PoolError::ObservationNotAvailable,
            OracleError::Uninitialized => PoolError::NotInitialized,
            OracleError::Math(err) => err.into(),
        }
    }
}

impl From<SwapError> for PoolError {
    fn from(err: SwapError) -> Self {
        match err {
            SwapError::InvalidAmount => PoolError::InvalidAmount,
            SwapError::InvalidPriceLimit => PoolError::InvalidPriceLimit,
            SwapError::Tick(err) => err.into(),
            SwapError::Math(err) => err.into(),
        }
    }
}
