#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

use crate::lock::current_tick;

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the contract is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub token: Address,
    pub ticks_per_day: u64,
    pub tick: u64,
}

/// Fired when a participant opens a position.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PositionOpenedEvent {
    pub staker: Address,
    pub amount: i128,
    pub lock_duration_days: u32,
    pub yield_rate_bps: u32,
    pub maturity_tick: u64,
    pub new_total_staked: i128,
    pub tick: u64,
}

/// Fired when accrued yield is paid out without closing the position.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardClaimedEvent {
    pub staker: Address,
    pub reward: i128,
    pub total_claimed: i128,
    pub tick: u64,
}

/// Fired when a matured position is closed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MatureExitEvent {
    pub staker: Address,
    pub principal: i128,
    pub reward: i128,
    pub new_total_staked: i128,
    pub tick: u64,
}

/// Fired when a position is closed before maturity.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EarlyExitEvent {
    pub staker: Address,
    pub principal: i128,
    pub returned: i128,
    pub penalty: i128,
    pub new_total_staked: i128,
    pub tick: u64,
}

/// Fired when yield is rolled back into principal.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CompoundedEvent {
    pub staker: Address,
    pub reward: i128,
    pub new_amount: i128,
    pub old_rate_bps: u32,
    pub new_rate_bps: u32,
    pub new_lock_duration_days: u32,
    pub maturity_tick: u64,
    pub tick: u64,
}

/// Fired when the owner tops up the reward reserve.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolFundedEvent {
    pub funder: Address,
    pub amount: i128,
    pub penalty_pool: i128,
    pub tick: u64,
}

/// Fired when the emergency pause flips.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PauseToggledEvent {
    pub owner: Address,
    pub paused: bool,
    pub tick: u64,
}

/// Fired when the owner opens or closes the protocol to new positions.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProtocolActiveSetEvent {
    pub owner: Address,
    pub active: bool,
    pub tick: u64,
}

/// Fired when an ownership transfer is proposed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerTransferProposedEvent {
    pub current_owner: Address,
    pub proposed_owner: Address,
    pub tick: u64,
}

/// Fired when the proposed owner accepts.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerTransferAcceptedEvent {
    pub old_owner: Address,
    pub new_owner: Address,
    pub tick: u64,
}

/// Fired when a pending ownership transfer is withdrawn.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerTransferCancelledEvent {
    pub owner: Address,
    pub cancelled_proposed: Address,
    pub tick: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(env: &Env, owner: Address, token: Address, ticks_per_day: u64) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            owner,
            token,
            ticks_per_day,
            tick: current_tick(env),
        },
    );
}

pub fn publish_position_opened(
    env: &Env,
    staker: Address,
    amount: i128,
    lock_duration_days: u32,
    yield_rate_bps: u32,
    maturity_tick: u64,
    new_total_staked: i128,
) {
    env.events().publish(
        (symbol_short!("OPENED"), staker.clone()),
        PositionOpenedEvent {
            staker,
            amount,
            lock_duration_days,
            yield_rate_bps,
            maturity_tick,
            new_total_staked,
            tick: current_tick(env),
        },
    );
}

pub fn publish_reward_claimed(env: &Env, staker: Address, reward: i128, total_claimed: i128) {
    env.events().publish(
        (symbol_short!("CLAIMED"), staker.clone()),
        RewardClaimedEvent {
            staker,
            reward,
            total_claimed,
            tick: current_tick(env),
        },
    );
}

pub fn publish_mature_exit(
    env: &Env,
    staker: Address,
    principal: i128,
    reward: i128,
    new_total_staked: i128,
) {
    env.events().publish(
        (symbol_short!("MAT_EXIT"), staker.clone()),
        MatureExitEvent {
            staker,
            principal,
            reward,
            new_total_staked,
            tick: current_tick(env),
        },
    );
}

pub fn publish_early_exit(
    env: &Env,
    staker: Address,
    principal: i128,
    returned: i128,
    penalty: i128,
    new_total_staked: i128,
) {
    env.events().publish(
        (symbol_short!("EARLY_EX"), staker.clone()),
        EarlyExitEvent {
            staker,
            principal,
            returned,
            penalty,
            new_total_staked,
            tick: current_tick(env),
        },
    );
}

#[allow(clippy::too_many_arguments)]
pub fn publish_compounded(
    env: &Env,
    staker: Address,
    reward: i128,
    new_amount: i128,
    old_rate_bps: u32,
    new_rate_bps: u32,
    new_lock_duration_days: u32,
    maturity_tick: u64,
) {
    env.events().publish(
        (symbol_short!("COMPOUND"), staker.clone()),
        CompoundedEvent {
            staker,
            reward,
            new_amount,
            old_rate_bps,
            new_rate_bps,
            new_lock_duration_days,
            maturity_tick,
            tick: current_tick(env),
        },
    );
}

pub fn publish_pool_funded(env: &Env, funder: Address, amount: i128, penalty_pool: i128) {
    env.events().publish(
        (symbol_short!("FUNDED"), funder.clone()),
        PoolFundedEvent {
            funder,
            amount,
            penalty_pool,
            tick: current_tick(env),
        },
    );
}

pub fn publish_pause_toggled(env: &Env, owner: Address, paused: bool) {
    env.events().publish(
        (symbol_short!("PAUSE"),),
        PauseToggledEvent {
            owner,
            paused,
            tick: current_tick(env),
        },
    );
}

pub fn publish_protocol_active_set(env: &Env, owner: Address, active: bool) {
    env.events().publish(
        (symbol_short!("ACTIVE"),),
        ProtocolActiveSetEvent {
            owner,
            active,
            tick: current_tick(env),
        },
    );
}

pub fn publish_owner_transfer_proposed(env: &Env, current_owner: Address, proposed_owner: Address) {
    env.events().publish(
        (symbol_short!("OWN_PROP"), current_owner.clone()),
        OwnerTransferProposedEvent {
            current_owner,
            proposed_owner,
            tick: current_tick(env),
        },
    );
}

pub fn publish_owner_transfer_accepted(env: &Env, old_owner: Address, new_owner: Address) {
    env.events().publish(
        (symbol_short!("OWN_ACPT"), new_owner.clone()),
        OwnerTransferAcceptedEvent {
            old_owner,
            new_owner,
            tick: current_tick(env),
        },
    );
}

pub fn publish_owner_transfer_cancelled(env: &Env, owner: Address, cancelled_proposed: Address) {
    env.events().publish(
        (symbol_short!("OWN_CNCL"), owner.clone()),
        OwnerTransferCancelledEvent {
            owner,
            cancelled_proposed,
            tick: current_tick(env),
        },
    );
}
