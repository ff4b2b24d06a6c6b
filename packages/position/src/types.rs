// Position Types

use alloy_primitives::U256;

/// Liquidity and fee state of one (owner, tick_lower, tick_upper) position
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Position {
    /// Liquidity provided by the position
    pub liquidity: u128,
    /// Fee growth inside the range for token0 at the last checkpoint
    pub fee_growth_inside_0_last_x128: U256,
    /// Fee growth inside the range for token1 at the last checkpoint
    pub fee_growth_inside_1_last_x128: U256,
    /// Token0 accrued to the owner and not yet collected
    pub tokens_owed_0: u128,
    /// Token1 accrued to the owner and not yet collected
    pub tokens_owed_1: u128,
}
