use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::ContractError;

// ── Storage keys ────────────────────────────────────────────────────────────

const CONFIG: Symbol = symbol_short!("CONFIG");
const PENDING_OWNER: Symbol = symbol_short!("PEND_OWN");

// Instance TTL window, same horizon as position entries.
const INSTANCE_TTL_THRESHOLD: u32 = 518_400;
const INSTANCE_TTL_EXTEND_TO: u32 = 3_110_400;

/// Deployment-time configuration, written once by `initialize`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakingConfig {
    /// Sole holder of the owner-gated operations.
    pub owner: Address,
    /// Token contract of the staked (and paid-out) asset.
    pub token: Address,
    /// Ledger ticks per logical day; scales every lock duration.
    pub ticks_per_day: u64,
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&CONFIG)
}

pub fn load_config(env: &Env) -> Result<StakingConfig, ContractError> {
    env.storage()
        .instance()
        .get(&CONFIG)
        .ok_or(ContractError::NotInitialized)
}

pub fn store_config(env: &Env, config: &StakingConfig) {
    env.storage().instance().set(&CONFIG, config);
}

/// Keeps the contract instance (config, aggregates, code) alive.
pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND_TO);
}

/// Guard: `caller` must be the configured owner.
pub fn require_owner(config: &StakingConfig, caller: &Address) -> Result<(), ContractError> {
    if *caller != config.owner {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

// ── Pending owner (two-step transfer) ───────────────────────────────────────

pub fn pending_owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&PENDING_OWNER)
}

pub fn set_pending_owner(env: &Env, new_owner: &Address) {
    env.storage().instance().set(&PENDING_OWNER, new_owner);
}

pub fn clear_pending_owner(env: &Env) {
    env.storage().instance().remove(&PENDING_OWNER);
}
