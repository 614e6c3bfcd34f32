use soroban_sdk::{contracttype, Env};

use crate::ledger::StakePosition;

/// Snapshot of where a position stands relative to its lock.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LockStatus {
    pub matured: bool,
    pub start_tick: u64,
    pub maturity_tick: u64,
    /// Zero once matured.
    pub ticks_remaining: u64,
}

/// The logical clock: the ledger sequence number of the running invocation.
pub fn current_tick(env: &Env) -> u64 {
    u64::from(env.ledger().sequence())
}

/// Number of ticks a lock of `lock_duration_days` spans.
pub fn lock_ticks(lock_duration_days: u32, ticks_per_day: u64) -> u64 {
    u64::from(lock_duration_days).saturating_mul(ticks_per_day)
}

pub fn maturity_tick(position: &StakePosition, ticks_per_day: u64) -> u64 {
    position
        .start_tick
        .saturating_add(lock_ticks(position.lock_duration_days, ticks_per_day))
}

/// True once at least one full lock duration has elapsed since `start_tick`.
pub fn is_matured(position: &StakePosition, current_tick: u64, ticks_per_day: u64) -> bool {
    current_tick.saturating_sub(position.start_tick)
        >= lock_ticks(position.lock_duration_days, ticks_per_day)
}

pub fn lock_status(position: &StakePosition, current_tick: u64, ticks_per_day: u64) -> LockStatus {
    let maturity_tick = maturity_tick(position, ticks_per_day);
    LockStatus {
        matured: is_matured(position, current_tick, ticks_per_day),
        start_tick: position.start_tick,
        maturity_tick,
        ticks_remaining: maturity_tick.saturating_sub(current_tick),
    }
}
