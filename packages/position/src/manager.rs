// Position Management Logic

use alloy_primitives::U256;
use coveswap_math::add_delta;

use crate::error::PositionError;
use crate::fees::calculate_pending_fees;
use crate::types::Position;

/// Checkpoint a position's fees and apply a liquidity delta.
///
/// 1. owed += liquidity * (inside - inside_last) / 2^128
/// 2. inside_last = inside
/// 3. liquidity += liquidity_delta
///
/// A zero delta only refreshes the fees, and is rejected for a position
/// without liquidity. Nothing is written on failure.
pub fn update_position(
    pos: &mut Position,
    liquidity_delta: i128,
    fee_growth_inside_0_x128: U256,
    fee_growth_inside_1_x128: U256,
) -> Result<(), PositionError> {
    let liquidity_next = if liquidity_delta == 0 {
        if !has_liquidity(pos) {
            return Err(PositionError::InsufficientLiquidity);
        }
        pos.liquidity
    } else {
        add_delta(pos.liquidity, liquidity_delta)?
    };

    let (owed_0, owed_1) =
        calculate_pending_fees(pos, fee_growth_inside_0_x128, fee_growth_inside_1_x128)?;
    let tokens_owed_0 = pos
        .tokens_owed_0
        .checked_add(owed_0)
        .ok_or(PositionError::ArithmeticOverflow)?;
    let tokens_owed_1 = pos
        .tokens_owed_1
        .checked_add(owed_1)
        .ok_or(PositionError::ArithmeticOverflow)?;

    pos.liquidity = liquidity_next;
    pos.fee_growth_inside_0_last_x128 = fee_growth_inside_0_x128;
    pos.fee_growth_inside_1_last_x128 = fee_growth_inside_1_x128;
    pos.tokens_owed_0 = tokens_owed_0;
    pos.tokens_owed_1 = tokens_owed_1;

    Ok(())
}

/// Credit principal released by a burn to the owed balances.
pub fn credit_owed(pos: &mut Position, amount_0: u128, amount_1: u128) -> Result<(), PositionError> {
    let tokens_owed_0 = pos
        .tokens_owed_0
        .checked_add(amount_0)
        .ok_or(PositionError::ArithmeticOverflow)?;
    let tokens_owed_1 = pos
        .tokens_owed_1
        .checked_add(amount_1)
        .ok_or(PositionError::ArithmeticOverflow)?;
    pos.tokens_owed_0 = tokens_owed_0;
    pos.tokens_owed_1 = tokens_owed_1;
    Ok(())
}

/// Take up to `(max_0, max_1)` from the owed balances.
///
/// Returns the amounts to pay out; moving the tokens is the caller's job.
pub fn collect_owed(pos: &mut Position, max_0: u128, max_1: u128) -> (u128, u128) {
    let amount_0 = max_0.min(pos.tokens_owed_0);
    let amount_1 = max_1.min(pos.tokens_owed_1);
    pos.tokens_owed_0 -= amount_0;
    pos.tokens_owed_1 -= amount_1;
    (amount_0, amount_1)
}

// ============================================================
// POSITION HELPERS
// ============================================================

/// Check if a position has any liquidity
#[inline]
pub fn has_liquidity(pos: &Position) -> bool {
    pos.liquidity > 0
}

/// A position with no liquidity and nothing left to collect
#[inline]
pub fn is_empty(pos: &Position) -> bool {
    pos.liquidity == 0 && pos.tokens_owed_0 == 0 && pos.tokens_owed_1 == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use coveswap_math::Q128;

    fn growth(units: u64) -> U256 {
        Q128 * U256::from(units)
    }

    #[test]
    fn test_first_mint_checkpoints_without_fees() {
        let mut pos = Position::default();
        update_position(&mut pos, 100, growth(5), growth(7)).unwrap();

        assert_eq!(pos.liquidity, 100);
        assert_eq!(pos.tokens_owed_0, 0);
        assert_eq!(pos.tokens_owed_1, 0);
        assert_eq!(pos.fee_growth_inside_0_last_x128, growth(5));
        assert_eq!(pos.fee_growth_inside_1_last_x128, growth(7));
    }

    #[test]
    fn test_fees_accrue_on_touch() {
        let mut pos = Position::default();
        update_position(&mut pos, 100, growth(5), growth(7)).unwrap();
        update_position(&mut pos, 0, growth(6), growth(10)).unwrap();

        assert_eq!(pos.tokens_owed_0, 100);
        assert_eq!(pos.tokens_owed_1, 300);
        assert_eq!(pos.liquidity, 100);
    }

    #[test]
    fn test_fees_accrue_across_wrapped_growth() {
        let mut pos = Position {
            liquidity: 2,
            fee_growth_inside_0_last_x128: U256::MAX - Q128 + U256::ONE,
            ..Position::default()
        };
        // inside moved from -1.0 to +1.0 per liquidity unit
        update_position(&mut pos, 0, Q128, U256::ZERO).unwrap();
        assert_eq!(pos.tokens_owed_0, 4);
    }

    #[test]
    fn test_burn_more_than_liquidity_fails_without_mutation() {
        let mut pos = Position::default();
        update_position(&mut pos, 10, growth(1), growth(1)).unwrap();
        let before = pos.clone();

        assert_eq!(
            update_position(&mut pos, -11, growth(2), growth(2)),
            Err(PositionError::InsufficientLiquidity)
        );
        assert_eq!(pos, before);
    }

    #[test]
    fn test_poke_of_empty_position_fails() {
        let mut pos = Position::default();
        assert_eq!(
            update_position(&mut pos, 0, growth(1), growth(1)),
            Err(PositionError::InsufficientLiquidity)
        );
    }

    #[test]
    fn test_collect_takes_at_most_owed() {
        let mut pos = Position {
            tokens_owed_0: 50,
            tokens_owed_1: 20,
            ..Position::default()
        };
        assert_eq!(collect_owed(&mut pos, 30, u128::MAX), (30, 20));
        assert_eq!((pos.tokens_owed_0, pos.tokens_owed_1), (20, 0));
        assert!(!is_empty(&pos));

        assert_eq!(collect_owed(&mut pos, u128::MAX, u128::MAX), (20, 0));
        assert!(is_empty(&pos));
    }

    #[test]
    fn test_credit_owed_overflow() {
        let mut pos = Position {
            tokens_owed_0: u128::MAX,
            ..Position::default()
        };
        assert_eq!(credit_owed(&mut pos, 1, 0), Err(PositionError::ArithmeticOverflow));
        assert_eq!(pos.tokens_owed_0, u128::MAX);
        credit_owed(&mut pos, 0, 7).unwrap();
        assert_eq!(pos.tokens_owed_1, 7);
        assert!(has_liquidity(&Position { liquidity: 1, ..Position::default() }));
    }
}
