use alloy_primitives::U256;

/// Pool values a swap starts from
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolSnapshot {
    pub sqrt_price_x96: U256,
    pub tick: i32,
    pub liquidity: u128,
    pub tick_spacing: i32,
    pub fee_bps: u32,
    /// Protocol fee denominator for the *input* token, 0 when disabled
    pub fee_protocol: u32,
    pub fee_growth_global_0_x128: U256,
    pub fee_growth_global_1_x128: U256,
}

/// Swap request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapParams {
    pub zero_for_one: bool,
    /// Positive for exact input, negative for exact output
    pub amount_specified: i128,
    /// Zero selects the extreme admissible price in the swap direction
    pub sqrt_price_limit_x96: U256,
}

/// Result of a completed swap, before settlement
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SwapOutcome {
    /// Pool-side token0 delta: positive is owed to the pool, negative is paid out
    pub amount0: i128,
    /// Pool-side token1 delta
    pub amount1: i128,
    /// Input pulled from the trader, fee included
    pub amount_in: u128,
    /// Output paid to the recipient
    pub amount_out: u128,
    /// Total fee charged on the input token
    pub fee_paid: u128,
    /// Part of `fee_paid` diverted to protocol fees
    pub protocol_fee: u128,
    pub sqrt_price_x96: U256,
    pub tick: i32,
    pub liquidity: u128,
    /// Updated fee growth of the input token
    pub fee_growth_global_x128: U256,
    pub ticks_crossed: u32,
}
