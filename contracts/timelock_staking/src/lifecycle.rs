//! Per-participant state machine.
//!
//! ```text
//!   NoPosition ──open──▶ Active ──mature_exit / early_exit──▶ NoPosition
//!                         │  ▲
//!                         └──┘ claim, compound
//! ```
//!
//! Every transition here is a pure function of the caller's current
//! position, the protocol aggregates and the clock. It either returns the
//! complete next state (position and aggregates together) or an error, and
//! never touches storage. The contract entrypoints load the inputs, call one
//! transition and commit its output in full.

use soroban_sdk::{contracttype, Address};

use crate::{
    aggregates::ProtocolAggregates,
    ledger::StakePosition,
    lock, rewards, tiers, ContractError,
};

/// Clock reading shared by every transition in one invocation.
#[derive(Clone, Copy, Debug)]
pub struct Clock {
    pub now: u64,
    pub ticks_per_day: u64,
}

/// Outcome of either exit path. `payout = principal + reward - penalty`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExitSummary {
    /// Tokens handed back to the participant (principal plus any yield).
    pub payout: i128,
    pub principal: i128,
    pub reward: i128,
    pub penalty: i128,
}

/// Outcome of rolling yield back into the position.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CompoundSummary {
    pub reward: i128,
    pub new_amount: i128,
    pub old_rate_bps: u32,
    pub new_rate_bps: u32,
    pub new_lock_duration_days: u32,
    pub maturity_tick: u64,
}

/// Yield accrued on `position` since its last checkpoint.
pub fn pending_reward(position: &StakePosition, clock: Clock) -> Result<i128, ContractError> {
    rewards::accrue(
        position.amount,
        position.yield_rate_bps,
        position.lock_duration_days,
        clock.now.saturating_sub(position.last_claim_tick),
        clock.ticks_per_day,
    )
}

/// A stake is only accepted if one full lock period of yield and the
/// early-exit penalty on it both fit in `i128`; otherwise the position could
/// never leave the ledger.
fn check_serviceable(
    amount: i128,
    rate_bps: u32,
    duration_days: u32,
    ticks_per_day: u64,
) -> Result<(), ContractError> {
    let full_term = lock::lock_ticks(duration_days, ticks_per_day);
    rewards::accrue(amount, rate_bps, duration_days, full_term, ticks_per_day)
        .and_then(|_| rewards::early_exit_penalty(amount))
        .map(|_| ())
        .map_err(|_| ContractError::InvalidAmount)
}

pub fn open(
    existing: Option<&StakePosition>,
    aggregates: &ProtocolAggregates,
    principal: &Address,
    amount: i128,
    duration_days: u32,
    clock: Clock,
) -> Result<(StakePosition, ProtocolAggregates), ContractError> {
    if !aggregates.protocol_active || aggregates.emergency_pause {
        return Err(ContractError::Unauthorized);
    }
    if existing.is_some() {
        return Err(ContractError::AlreadyExists);
    }
    if amount <= 0 {
        return Err(ContractError::InvalidAmount);
    }
    let yield_rate_bps = tiers::yield_rate_for(duration_days).ok_or(ContractError::InvalidTier)?;
    check_serviceable(amount, yield_rate_bps, duration_days, clock.ticks_per_day)?;

    let position = StakePosition {
        principal: principal.clone(),
        amount,
        start_tick: clock.now,
        lock_duration_days: duration_days,
        yield_rate_bps,
        last_claim_tick: clock.now,
        total_claimed: 0,
    };

    let mut next = aggregates.clone();
    next.record_open(amount)?;

    Ok((position, next))
}

pub fn claim(
    existing: Option<&StakePosition>,
    aggregates: &ProtocolAggregates,
    clock: Clock,
) -> Result<(StakePosition, ProtocolAggregates, i128), ContractError> {
    if aggregates.emergency_pause {
        return Err(ContractError::Unauthorized);
    }
    let current = existing.ok_or(ContractError::NotFound)?;

    let reward = pending_reward(current, clock)?;
    if reward <= 0 {
        return Err(ContractError::NoRewardsAvailable);
    }

    let mut position = current.clone();
    position.last_claim_tick = clock.now;
    position.total_claimed = position
        .total_claimed
        .checked_add(reward)
        .ok_or(ContractError::CalculationOverflow)?;

    let mut next = aggregates.clone();
    next.record_claim(reward)?;

    Ok((position, next, reward))
}

/// Exit after the lock has elapsed: principal plus every tick of unclaimed
/// yield.
pub fn mature_exit(
    existing: Option<&StakePosition>,
    aggregates: &ProtocolAggregates,
    clock: Clock,
) -> Result<(ProtocolAggregates, ExitSummary), ContractError> {
    let current = existing.ok_or(ContractError::NotFound)?;
    if !lock::is_matured(current, clock.now, clock.ticks_per_day) {
        return Err(ContractError::LockStateConflict);
    }

    let reward = pending_reward(current, clock)?;
    let payout = current
        .amount
        .checked_add(reward)
        .ok_or(ContractError::CalculationOverflow)?;

    let mut next = aggregates.clone();
    next.record_mature_exit(current.amount, reward)?;

    Ok((
        next,
        ExitSummary {
            payout,
            principal: current.amount,
            reward,
            penalty: 0,
        },
    ))
}

/// Exit before the lock has elapsed. Pending yield is forfeited and a fixed
/// share of principal stays behind in the penalty pool.
pub fn early_exit(
    existing: Option<&StakePosition>,
    aggregates: &ProtocolAggregates,
    clock: Clock,
) -> Result<(ProtocolAggregates, ExitSummary), ContractError> {
    let current = existing.ok_or(ContractError::NotFound)?;
    if lock::is_matured(current, clock.now, clock.ticks_per_day) {
        return Err(ContractError::LockStateConflict);
    }

    let penalty = rewards::early_exit_penalty(current.amount)?;
    let payout = current.amount - penalty;

    let mut next = aggregates.clone();
    next.record_early_exit(current.amount, penalty)?;

    Ok((
        next,
        ExitSummary {
            payout,
            principal: current.amount,
            reward: 0,
            penalty,
        },
    ))
}

/// Roll accrued yield into principal and restart the lock, optionally on a
/// longer tier. The new tier's rate is frozen into the position.
pub fn compound(
    existing: Option<&StakePosition>,
    aggregates: &ProtocolAggregates,
    new_duration_days: u32,
    clock: Clock,
) -> Result<(StakePosition, ProtocolAggregates, CompoundSummary), ContractError> {
    if aggregates.emergency_pause {
        return Err(ContractError::Unauthorized);
    }
    let current = existing.ok_or(ContractError::NotFound)?;

    let reward = pending_reward(current, clock)?;
    if reward <= 0 {
        return Err(ContractError::NoRewardsAvailable);
    }

    let new_rate_bps =
        tiers::yield_rate_for(new_duration_days).ok_or(ContractError::InvalidTier)?;
    if new_duration_days < current.lock_duration_days {
        return Err(ContractError::InvalidTier);
    }

    let new_amount = current
        .amount
        .checked_add(reward)
        .ok_or(ContractError::CalculationOverflow)?;
    check_serviceable(new_amount, new_rate_bps, new_duration_days, clock.ticks_per_day)?;
    let total_claimed = current
        .total_claimed
        .checked_add(reward)
        .ok_or(ContractError::CalculationOverflow)?;

    let position = StakePosition {
        principal: current.principal.clone(),
        amount: new_amount,
        start_tick: clock.now,
        lock_duration_days: new_duration_days,
        yield_rate_bps: new_rate_bps,
        last_claim_tick: clock.now,
        total_claimed,
    };

    let mut next = aggregates.clone();
    next.record_compound(reward)?;

    let summary = CompoundSummary {
        reward,
        new_amount,
        old_rate_bps: current.yield_rate_bps,
        new_rate_bps,
        new_lock_duration_days: new_duration_days,
        maturity_tick: lock::maturity_tick(&position, clock.ticks_per_day),
    };

    Ok((position, next, summary))
}
