use soroban_sdk::{Address, Env, Symbol, U256};

// ============================================================
// EVENT NAMES
// ============================================================

/// Event name constants
pub struct EventName;

impl EventName {
    pub fn initialize(env: &Env) -> Symbol {
        Symbol::new(env, "initialize")
    }

    pub fn mint(env: &Env) -> Symbol {
        Symbol::new(env, "mint")
    }

    pub fn burn(env: &Env) -> Symbol {
        Symbol::new(env, "burn")
    }

    pub fn collect(env: &Env) -> Symbol {
        Symbol::new(env, "collect")
    }

    pub fn swap(env: &Env) -> Symbol {
        Symbol::new(env, "swap")
    }

    pub fn flash(env: &Env) -> Symbol {
        Symbol::new(env, "flash")
    }

    pub fn observation_cardinality_next(env: &Env) -> Symbol {
        Symbol::new(env, "obs_next")
    }

    pub fn fee_protocol(env: &Env) -> Symbol {
        Symbol::new(env, "fee_proto")
    }

    pub fn collect_protocol(env: &Env) -> Symbol {
        Symbol::new(env, "coll_proto")
    }
}

// ============================================================
// EVENT EMITTERS
// ============================================================

/// Emit pool initialized event
pub fn emit_initialize(env: &Env, sqrt_price_x96: &U256, tick: i32) {
    env.events().publish(
        (EventName::initialize(env),),
        (sqrt_price_x96.clone(), tick),
    );
}

/// Emit mint event
pub fn emit_mint(
    env: &Env,
    owner: &Address,
    tick_lower: i32,
    tick_upper: i32,
    liquidity: u128,
    amount0: u128,
    amount1: u128,
) {
    env.events().publish(
        (EventName::mint(env), owner.clone()),
        (tick_lower, tick_upper, liquidity, amount0, amount1),
    );
}

/// Emit burn event
pub fn emit_burn(
    env: &Env,
    owner: &Address,
    tick_lower: i32,
    tick_upper: i32,
    liquidity: u128,
    amount0: u128,
    amount1: u128,
) {
    env.events().publish(
        (EventName::burn(env), owner.clone()),
        (tick_lower, tick_upper, liquidity, amount0, amount1),
    );
}

/// Emit collect fees event
pub fn emit_collect(
    env: &Env,
    owner: &Address,
    recipient: &Address,
    tick_lower: i32,
    tick_upper: i32,
    amount0: u128,
    amount1: u128,
) {
    env.events().publish(
        (EventName::collect(env), owner.clone()),
        (recipient.clone(), tick_lower, tick_upper, amount0, amount1),
    );
}

/// Emit swap event
pub fn emit_swap(
    env: &Env,
    sender: &Address,
    recipient: &Address,
    amount0: i128,
    amount1: i128,
    sqrt_price_x96: &U256,
    liquidity: u128,
    tick: i32,
) {
    env.events().publish(
        (EventName::swap(env), sender.clone()),
        (recipient.clone(), amount0, amount1, sqrt_price_x96.clone(), liquidity, tick),
    );
}

/// Emit flash loan event; `paid` is what came back on top of the principal
pub fn emit_flash(
    env: &Env,
    sender: &Address,
    recipient: &Address,
    amount0: u128,
    amount1: u128,
    paid0: u128,
    paid1: u128,
) {
    env.events().publish(
        (EventName::flash(env), sender.clone()),
        (recipient.clone(), amount0, amount1, paid0, paid1),
    );
}

/// Emit observation cardinality growth
pub fn emit_observation_cardinality_next(env: &Env, old: u32, new: u32) {
    env.events().publish(
        (EventName::observation_cardinality_next(env),),
        (old, new),
    );
}

/// Emit protocol fee change
pub fn emit_fee_protocol(env: &Env, old: (u32, u32), new: (u32, u32)) {
    env.events().publish(
        (EventName::fee_protocol(env),),
        (old.0, old.1, new.0, new.1),
    );
}

/// Emit protocol fee withdrawal
pub fn emit_collect_protocol(env: &Env, recipient: &Address, amount0: u128, amount1: u128) {
    env.events().publish(
        (EventName::collect_protocol(env),),
        (recipient.clone(), amount0, amount1),
    );
}
