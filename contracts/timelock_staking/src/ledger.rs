use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::ContractError;

// ── Storage keys ────────────────────────────────────────────────────────────

const POSITION: Symbol = symbol_short!("POS");

// ~30 days / ~180 days of 5-second ledgers.
const TTL_THRESHOLD: u32 = 518_400;
const TTL_EXTEND_TO: u32 = 3_110_400;

// ── Types ───────────────────────────────────────────────────────────────────

/// A participant's single live stake.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakePosition {
    pub principal: Address,
    /// Always positive while the position exists.
    pub amount: i128,
    /// Tick the current lock began; reset by compound.
    pub start_tick: u64,
    pub lock_duration_days: u32,
    /// Rate copied from the tier table when the lock began.
    pub yield_rate_bps: u32,
    /// Last accrual checkpoint.
    pub last_claim_tick: u64,
    /// Yield paid out or rolled into principal over the position's life.
    pub total_claimed: i128,
}

// ── Storage helpers ─────────────────────────────────────────────────────────

fn position_key(principal: &Address) -> (Symbol, Address) {
    (POSITION, principal.clone())
}

fn extend_ttl(env: &Env, key: &(Symbol, Address)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Returns the live position for `principal`, if any.
pub fn get(env: &Env, principal: &Address) -> Option<StakePosition> {
    let key = position_key(principal);
    let position: Option<StakePosition> = env.storage().persistent().get(&key);
    if position.is_some() {
        extend_ttl(env, &key);
    }
    position
}

/// Stores a brand-new position.
///
/// Fails with `AlreadyExists` if the principal already holds one.
pub fn insert_new(env: &Env, position: &StakePosition) -> Result<(), ContractError> {
    let key = position_key(&position.principal);
    if env.storage().persistent().has(&key) {
        return Err(ContractError::AlreadyExists);
    }
    env.storage().persistent().set(&key, position);
    extend_ttl(env, &key);
    Ok(())
}

/// Overwrites an existing position in place.
///
/// Fails with `NotFound` if the principal has no position.
pub fn replace(env: &Env, position: &StakePosition) -> Result<(), ContractError> {
    let key = position_key(&position.principal);
    if !env.storage().persistent().has(&key) {
        return Err(ContractError::NotFound);
    }
    env.storage().persistent().set(&key, position);
    extend_ttl(env, &key);
    Ok(())
}

/// Deletes the principal's position and returns what was stored.
pub fn remove(env: &Env, principal: &Address) -> Result<StakePosition, ContractError> {
    let key = position_key(principal);
    let position: StakePosition = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(ContractError::NotFound)?;
    env.storage().persistent().remove(&key);
    Ok(position)
}
