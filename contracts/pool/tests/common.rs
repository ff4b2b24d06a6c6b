#![allow(dead_code)]

use coveswap_pool::types::SwapResult;
use coveswap_pool::{CovePool, CovePoolClient};
use soroban_sdk::{
    contract, contractimpl, contracttype, testutils::Address as _, token, Address, Bytes, Env, U256,
};

// Test constants
pub const DEFAULT_FEE_BPS: u32 = 30; // 0.30%
pub const DEFAULT_TICK_SPACING: i32 = 60;
pub const Q96: u128 = 1u128 << 96; // price = 1.0
pub const CALLEE_FUNDS: i128 = 1_000_000_000_000_000_000;

/// sqrt prices of ticks used across the tests
pub const SQRT_PRICE_NEG_120: u128 = 78754240422856966435523493930;
pub const SQRT_PRICE_NEG_60: u128 = 78990846045029531151608375686;
pub const SQRT_PRICE_POS_60: u128 = 79466191966197645195421774833;

// ============================================================
// CALLBACK CONTRACT
// ============================================================

/// How the callback contract settles what the pool asks for
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PayMode {
    /// Pay everything owed (flash: principal plus fee)
    Full,
    /// Pay one unit less than owed
    Short,
    /// Flash only: return the principal without the fee
    PrincipalOnly,
    /// Pay nothing
    Nothing,
    /// Call back into the pool instead of paying
    Reenter,
}

#[contracttype]
enum CalleeKey {
    Pool,
    Token0,
    Token1,
    Mode,
    Loan,
}

/// Settles pool callbacks out of its own balances
#[contract]
pub struct TestCallee;

#[contractimpl]
impl TestCallee {
    pub fn setup(env: Env, pool: Address, token0: Address, token1: Address) {
        let storage = env.storage().instance();
        storage.set(&CalleeKey::Pool, &pool);
        storage.set(&CalleeKey::Token0, &token0);
        storage.set(&CalleeKey::Token1, &token1);
        storage.set(&CalleeKey::Mode, &PayMode::Full);
        storage.set(&CalleeKey::Loan, &(0u128, 0u128));
    }

    pub fn set_mode(env: Env, mode: PayMode) {
        env.storage().instance().set(&CalleeKey::Mode, &mode);
    }

    /// Principal of the next flash loan, returned in the flash callback
    pub fn set_loan(env: Env, amount0: u128, amount1: u128) {
        env.storage().instance().set(&CalleeKey::Loan, &(amount0, amount1));
    }

    pub fn mint_callback(env: Env, amount0: u128, amount1: u128, _data: Bytes) {
        settle(&env, amount0, amount1, mode(&env));
    }

    pub fn swap_callback(env: Env, amount0: i128, amount1: i128, _data: Bytes) {
        let owed0 = if amount0 > 0 { amount0 as u128 } else { 0 };
        let owed1 = if amount1 > 0 { amount1 as u128 } else { 0 };
        settle(&env, owed0, owed1, mode(&env));
    }

    pub fn flash_callback(env: Env, fee0: u128, fee1: u128, _data: Bytes) {
        let (loan0, loan1): (u128, u128) = env.storage().instance().get(&CalleeKey::Loan).unwrap();
        match mode(&env) {
            PayMode::PrincipalOnly => settle(&env, loan0, loan1, PayMode::Full),
            other => settle(&env, loan0 + fee0, loan1 + fee1, other),
        }
    }
}

fn mode(env: &Env) -> PayMode {
    env.storage().instance().get(&CalleeKey::Mode).unwrap()
}

fn settle(env: &Env, amount0: u128, amount1: u128, mode: PayMode) {
    let storage = env.storage().instance();
    if mode == PayMode::Reenter {
        let pool: Address = storage.get(&CalleeKey::Pool).unwrap();
        let me = env.current_contract_address();
        CovePoolClient::new(env, &pool).swap(&me, &me, &true, &1_000, &U256::from_u32(env, 0), &Bytes::new(env));
        return;
    }
    let pool: Address = storage.get(&CalleeKey::Pool).unwrap();
    let token0: Address = storage.get(&CalleeKey::Token0).unwrap();
    let token1: Address = storage.get(&CalleeKey::Token1).unwrap();

    for (token, amount) in [(token0, amount0), (token1, amount1)] {
        let amount = match mode {
            PayMode::Nothing => 0,
            PayMode::Short => amount.saturating_sub(1),
            _ => amount,
        };
        if amount > 0 {
            token::Client::new(env, &token).transfer(
                &env.current_contract_address(),
                &pool,
                &(amount as i128),
            );
        }
    }
}

// ============================================================
// POOL SETUP
// ============================================================

pub struct TestPool<'a> {
    pub pool: CovePoolClient<'a>,
    pub callee: TestCalleeClient<'a>,
    pub authority: Address,
    pub token0: Address,
    pub token1: Address,
}

impl TestPool<'_> {
    pub fn balance0(&self, who: &Address) -> i128 {
        token::Client::new(&self.pool.env, &self.token0).balance(who)
    }

    pub fn balance1(&self, who: &Address) -> i128 {
        token::Client::new(&self.pool.env, &self.token1).balance(who)
    }

    /// Mint through the callback contract, which also owns the position
    pub fn mint(&self, tick_lower: i32, tick_upper: i32, amount: u128) -> (u128, u128) {
        let env = &self.pool.env;
        self.pool.mint(
            &self.callee.address,
            &self.callee.address,
            &tick_lower,
            &tick_upper,
            &amount,
            &Bytes::new(env),
        )
    }

    /// Exact-input or exact-output swap without a price limit
    pub fn swap(&self, zero_for_one: bool, amount_specified: i128, recipient: &Address) -> SwapResult {
        let env = &self.pool.env;
        self.pool.swap(
            &self.callee.address,
            recipient,
            &zero_for_one,
            &amount_specified,
            &U256::from_u32(env, 0),
            &Bytes::new(env),
        )
    }
}

/// Pool at price 1.0 with default fee and spacing
pub fn setup_pool(env: &Env) -> TestPool<'_> {
    setup_custom_pool(env, DEFAULT_FEE_BPS, DEFAULT_TICK_SPACING, U256::from_u128(env, Q96))
}

pub fn setup_custom_pool(env: &Env, fee_bps: u32, tick_spacing: i32, sqrt_price_x96: U256) -> TestPool<'_> {
    env.mock_all_auths();
    env.cost_estimate().budget().reset_unlimited();

    let pool = deploy_pool(env);
    let authority = Address::generate(env);
    let token0 = create_token(env, &authority);
    let token1 = create_token(env, &authority);

    pool.initialize(&authority, &token0, &token1, &fee_bps, &tick_spacing, &sqrt_price_x96);

    let callee = TestCalleeClient::new(env, &env.register(TestCallee, ()));
    callee.setup(&pool.address, &token0, &token1);
    mint_tokens(env, &token0, &callee.address, CALLEE_FUNDS);
    mint_tokens(env, &token1, &callee.address, CALLEE_FUNDS);

    TestPool {
        pool,
        callee,
        authority,
        token0,
        token1,
    }
}

/// Registered but not initialized
pub fn deploy_pool(env: &Env) -> CovePoolClient<'_> {
    let pool_id = env.register(CovePool, ());
    CovePoolClient::new(env, &pool_id)
}

/// Create a test token
pub fn create_token(env: &Env, admin: &Address) -> Address {
    let token_id = env.register_stellar_asset_contract_v2(admin.clone());
    token_id.address()
}

/// Mint tokens to an address
pub fn mint_tokens(env: &Env, token: &Address, to: &Address, amount: i128) {
    use soroban_sdk::token::StellarAssetClient;
    let client = StellarAssetClient::new(env, token);
    client.mint(to, &amount);
}

pub fn u256(env: &Env, value: u128) -> U256 {
    U256::from_u128(env, value)
}

pub fn no_data(env: &Env) -> Bytes {
    Bytes::new(env)
}
