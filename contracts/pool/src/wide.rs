// Conversion between the contract's `U256` host values and the 256-bit
// integers the math packages compute with.

use coveswap_math::U256 as MathU256;
use soroban_sdk::{Bytes, Env, U256};

#[inline]
pub fn to_host(env: &Env, value: MathU256) -> U256 {
    U256::from_be_bytes(env, &Bytes::from_array(env, &value.to_be_bytes::<32>()))
}

#[inline]
pub fn from_host(value: &U256) -> MathU256 {
    let mut buf = [0u8; 32];
    value.to_be_bytes().copy_into_slice(&mut buf);
    MathU256::from_be_bytes(buf)
}
