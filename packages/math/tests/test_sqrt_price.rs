mod common;

use common::{price_1_1, price_121_100, u};
use coveswap_math::*;

const ONE_E18: u128 = 1_000_000_000_000_000_000;
const ONE_E17: u128 = 100_000_000_000_000_000;

// ============================================================
// NEXT PRICE FROM INPUT
// ============================================================

#[test]
fn test_input_rejects_zero_price_or_liquidity() {
    assert_eq!(
        get_next_sqrt_price_from_input(U256::ZERO, 1, U256::from(ONE_E17), false),
        Err(MathError::OutOfRange)
    );
    assert_eq!(
        get_next_sqrt_price_from_input(price_1_1(), 0, U256::from(ONE_E17), true),
        Err(MathError::InsufficientLiquidity)
    );
}

#[test]
fn test_input_zero_amount_keeps_price() {
    let price = price_1_1();
    assert_eq!(
        get_next_sqrt_price_from_input(price, ONE_E17, U256::ZERO, true).unwrap(),
        price
    );
    assert_eq!(
        get_next_sqrt_price_from_input(price, ONE_E17, U256::ZERO, false).unwrap(),
        price
    );
}

#[test]
fn test_input_token1_raises_price() {
    let next =
        get_next_sqrt_price_from_input(price_1_1(), ONE_E18, U256::from(ONE_E17), false).unwrap();
    assert_eq!(next, u("87150978765690771352898345369"));
    assert_eq!(next, price_121_100());
}

#[test]
fn test_input_token0_lowers_price() {
    let next =
        get_next_sqrt_price_from_input(price_1_1(), ONE_E18, U256::from(ONE_E17), true).unwrap();
    assert_eq!(next, u("72025602285694852357767227579"));
}

#[test]
fn test_input_huge_token0_amount_does_not_overflow() {
    // amount * price overflows 256 bits, so the fallback formula is used
    let next = get_next_sqrt_price_from_input(price_1_1(), 1, U256::MAX >> 1usize, true).unwrap();
    assert_eq!(next, U256::ONE);
}

// ============================================================
// NEXT PRICE FROM OUTPUT
// ============================================================

#[test]
fn test_output_token1_lowers_price() {
    let next =
        get_next_sqrt_price_from_output(price_1_1(), ONE_E18, U256::from(ONE_E17), true).unwrap();
    assert_eq!(next, u("71305346262837903834189555302"));
}

#[test]
fn test_output_token0_raises_price() {
    let next =
        get_next_sqrt_price_from_output(price_1_1(), ONE_E18, U256::from(ONE_E17), false).unwrap();
    assert_eq!(next, u("88031291682515930659493278152"));
}

#[test]
fn test_output_cannot_exhaust_reserves() {
    let price = u("20282409603651670423947251286016");
    // exactly the virtual reserves of token0
    assert_eq!(
        get_next_sqrt_price_from_output(price, 1024, U256::from(4u8), false),
        Err(MathError::InsufficientLiquidity)
    );
    // exactly the virtual reserves of token1
    assert_eq!(
        get_next_sqrt_price_from_output(price, 1024, U256::from(262_144u32), true),
        Err(MathError::InsufficientLiquidity)
    );
}
