/// Failures of the fixed-point primitives.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MathError {
    /// Tick or sqrt price outside `[MIN_TICK, MAX_TICK]` / `[MIN_SQRT_RATIO, MAX_SQRT_RATIO)`
    OutOfRange,
    /// Result does not fit the destination width
    ArithmeticOverflow,
    /// Denominator was zero
    DivisionByZero,
    /// Liquidity underflow, or an output that would exhaust the reserves of the range
    InsufficientLiquidity,
}

impl core::fmt::Display for MathError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            MathError::OutOfRange => "value outside the tick domain",
            MathError::ArithmeticOverflow => "arithmetic overflow",
            MathError::DivisionByZero => "division by zero",
            MathError::InsufficientLiquidity => "insufficient liquidity",
        };
        f.write_str(msg)
    }
}
