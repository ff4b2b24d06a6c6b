use coveswap_math::MathError;

/// Failures of tick bookkeeping.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TickError {
    /// Bounds unordered, outside the tick domain, or not multiples of the spacing
    InvalidTickRange,
    /// A burn would drive `liquidity_gross` below zero
    InsufficientLiquidity,
    /// `liquidity_gross` would exceed the per-tick maximum for the spacing
    LiquidityOverflow,
    /// The tick holds no liquidity
    NotInitialized,
    Math(MathError),
}

impl From<MathError> for TickError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::InsufficientLiquidity => TickError::InsufficientLiquidity,
            other => TickError::Math(other),
        }
    }
}
