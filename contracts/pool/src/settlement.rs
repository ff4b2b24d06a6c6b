// Settlement with the token contracts and the caller's callback contract.
//
// Payment is never taken on trust: balances are read before the callback
// and compared afterwards.

use soroban_sdk::{token, vec, Address, Bytes, Env, IntoVal, Symbol};

use crate::error::PoolError;

pub fn mint_callback(env: &Env, payer: &Address, amount0: u128, amount1: u128, data: &Bytes) {
    env.invoke_contract::<()>(
        payer,
        &Symbol::new(env, "mint_callback"),
        vec![
            env,
            amount0.into_val(env),
            amount1.into_val(env),
            data.clone().into_val(env),
        ],
    );
}

pub fn swap_callback(env: &Env, payer: &Address, amount0: i128, amount1: i128, data: &Bytes) {
    env.invoke_contract::<()>(
        payer,
        &Symbol::new(env, "swap_callback"),
        vec![
            env,
            amount0.into_val(env),
            amount1.into_val(env),
            data.clone().into_val(env),
        ],
    );
}

pub fn flash_callback(env: &Env, payer: &Address, fee0: u128, fee1: u128, data: &Bytes) {
    env.invoke_contract::<()>(
        payer,
        &Symbol::new(env, "flash_callback"),
        vec![
            env,
            fee0.into_val(env),
            fee1.into_val(env),
            data.clone().into_val(env),
        ],
    );
}

/// Pool balance of `token`
pub fn balance(env: &Env, token: &Address) -> i128 {
    token::Client::new(env, token).balance(&env.current_contract_address())
}

/// Pay `amount` of `token` out of the pool; zero is a no-op
pub fn pay(env: &Env, token: &Address, to: &Address, amount: u128) -> Result<(), PoolError> {
    if amount == 0 {
        return Ok(());
    }
    let amount = to_amount(amount)?;
    token::Client::new(env, token).transfer(&env.current_contract_address(), to, &amount);
    Ok(())
}

/// Check that the pool balance grew by at least `owed` since `before`.
pub fn require_received(
    env: &Env,
    token: &Address,
    before: i128,
    owed: u128,
    err: PoolError,
) -> Result<(), PoolError> {
    let expected = before
        .checked_add(to_amount(owed)?)
        .ok_or(PoolError::ArithmeticOverflow)?;
    if balance(env, token) < expected {
        return Err(err);
    }
    Ok(())
}

/// Token amounts are `i128` on the host
#[inline]
pub fn to_amount(value: u128) -> Result<i128, PoolError> {
    i128::try_from(value).map_err(|_| PoolError::ArithmeticOverflow)
}
