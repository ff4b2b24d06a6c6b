use alloy_primitives::U256;

/// One ring buffer sample
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Observation {
    /// Ledger timestamp (seconds) of the sample
    pub block_timestamp: u64,
    /// Running sum of tick * elapsed seconds
    pub tick_cumulative: i64,
    /// Running sum of elapsed seconds * 2^128 / max(liquidity, 1)
    pub seconds_per_liquidity_cumulative_x128: U256,
    /// False for slots reserved by `grow` but never written
    pub initialized: bool,
}
