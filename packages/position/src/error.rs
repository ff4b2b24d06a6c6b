use coveswap_math::MathError;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PositionError {
    /// Burn exceeds the position's liquidity, or a zero-delta touch of an empty position
    InsufficientLiquidity,
    /// Owed balances would exceed `u128::MAX`
    ArithmeticOverflow,
    Math(MathError),
}

impl From<MathError> for PositionError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::InsufficientLiquidity => PositionError::InsufficientLiquidity,
            MathError::ArithmeticOverflow => PositionError::ArithmeticOverflow,
            other => PositionError::Math(other),
        }
    }
}
