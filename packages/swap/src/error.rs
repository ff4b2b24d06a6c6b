use coveswap_math::MathError;
use coveswap_tick::TickError;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SwapError {
    /// `amount_specified` was zero
    InvalidAmount,
    /// The price limit lies on the wrong side of the current price, or outside the price domain
    InvalidPriceLimit,
    Tick(TickError),
    Math(MathError),
}

impl From<MathError> for SwapError {
    fn from(err: MathError) -> Self {
        SwapError::Math(err)
    }
}

impl From<TickError> for SwapError {
    fn from(err: TickError) -> Self {
        SwapError::Tick(err)
    }
}
