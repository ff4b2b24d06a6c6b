// Fee Accountant
//
// Splits each charged fee into a protocol share (1/N of the fee) and a
// liquidity-provider share that raises fee growth per unit of active
// liquidity. With no active liquidity there is nobody to credit, so the
// liquidity-provider share goes to the protocol balance as well.

use alloy_primitives::U256;
use coveswap_math::{mul_div, to_u128, MathError, MAX_FEE_PROTOCOL, MIN_FEE_PROTOCOL, Q128};

use crate::error::SwapError;

/// Protocol fee denominators: 0 (off) or 4..=10.
#[inline]
pub fn is_valid_fee_protocol(fee_protocol: u32) -> bool {
    fee_protocol == 0 || (MIN_FEE_PROTOCOL..=MAX_FEE_PROTOCOL).contains(&fee_protocol)
}

/// Fee bookkeeping for one token over one operation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeeAccountant {
    fee_protocol: u32,
    fee_growth_global_x128: U256,
    protocol_fees: u128,
    total_fees: u128,
}

impl FeeAccountant {
    pub fn new(fee_growth_global_x128: U256, fee_protocol: u32) -> Self {
        Self {
            fee_protocol,
            fee_growth_global_x128,
            protocol_fees: 0,
            total_fees: 0,
        }
    }

    /// Attribute `fee_amount`, charged while `liquidity` was active.
    pub fn accrue(&mut self, fee_amount: U256, liquidity: u128) -> Result<(), SwapError> {
        if fee_amount.is_zero() {
            return Ok(());
        }
        let fee = to_u128(fee_amount)?;

        let protocol_share = if self.fee_protocol > 0 {
            fee / self.fee_protocol as u128
        } else {
            0
        };
        let lp_share = fee - protocol_share;

        let mut protocol_fees = self
            .protocol_fees
            .checked_add(protocol_share)
            .ok_or(MathError::ArithmeticOverflow)?;
        let mut fee_growth_global_x128 = self.fee_growth_global_x128;

        if liquidity > 0 {
            let growth = mul_div(U256::from(lp_share), Q128, U256::from(liquidity))?;
            fee_growth_global_x128 = fee_growth_global_x128
                .checked_add(growth)
                .ok_or(MathError::ArithmeticOverflow)?;
        } else {
            protocol_fees = protocol_fees
                .checked_add(lp_share)
                .ok_or(MathError::ArithmeticOverflow)?;
        }

        self.total_fees = self
            .total_fees
            .checked_add(fee)
            .ok_or(MathError::ArithmeticOverflow)?;
        self.protocol_fees = protocol_fees;
        self.fee_growth_global_x128 = fee_growth_global_x128;
        Ok(())
    }

    pub fn fee_growth_global_x128(&self) -> U256 {
        self.fee_growth_global_x128
    }

    /// Fees diverted to the protocol so far
    pub fn protocol_fees(&self) -> u128 {
        self.protocol_fees
    }

    /// All fees charged so far
    pub fn total_fees(&self) -> u128 {
        self.total_fees
    }
}
