use coveswap_math::MathError;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum OracleError {
    /// The requested time precedes the oldest retained observation
    ObservationNotAvailable,
    /// The ring buffer has never been initialized
    Uninitialized,
    Math(MathError),
}

impl From<MathError> for OracleError {
    fn from(err: MathError) -> Self {
        OracleError::Math(err)
    }
}
