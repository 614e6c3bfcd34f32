#![no_std]

pub mod admin;
pub mod aggregates;
pub mod events;
pub mod ledger;
pub mod lifecycle;
pub mod lock;
pub mod rewards;
pub mod tiers;

use soroban_sdk::{contract, contractimpl, token, Address, Env, Vec};

pub use admin::StakingConfig;
pub use aggregates::ProtocolAggregates;
pub use ledger::StakePosition;
pub use lifecycle::{CompoundSummary, ExitSummary};
pub use lock::LockStatus;

use lifecycle::Clock;

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    /// Non-owner on an owner operation, or a gated operation while the
    /// protocol is inactive or paused.
    Unauthorized = 3,
    NotFound = 4,
    AlreadyExists = 5,
    InvalidAmount = 6,
    /// Unsupported duration, or compounding into a shorter one.
    InvalidTier = 7,
    /// `mature_exit` before maturity or `early_exit` after it.
    LockStateConflict = 8,
    NoRewardsAvailable = 9,
    CalculationOverflow = 10,
    InvalidInput = 11,
    /// The reward reserve (`penalty_pool`) cannot cover the yield owed.
    InsufficientReserve = 12,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct TimeLockStakingContract;

#[contractimpl]
impl TimeLockStakingContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the contract.
    ///
    /// * `owner`         – holder of the pause switch and pool funding.
    /// * `token`         – SAC address of the staked asset; rewards are paid
    ///                     in the same asset.
    /// * `ticks_per_day` – ledger sequence numbers per logical day.
    pub fn initialize(
        env: Env,
        owner: Address,
        token: Address,
        ticks_per_day: u64,
    ) -> Result<(), ContractError> {
        if admin::is_initialized(&env) {
            return Err(ContractError::AlreadyInitialized);
        }
        if ticks_per_day == 0 {
            return Err(ContractError::InvalidInput);
        }

        admin::store_config(
            &env,
            &StakingConfig {
                owner: owner.clone(),
                token: token.clone(),
                ticks_per_day,
            },
        );
        aggregates::store(&env, &ProtocolAggregates::genesis());
        admin::bump_instance(&env);

        events::publish_initialized(&env, owner, token, ticks_per_day);

        Ok(())
    }

    // ── Lifecycle ───────────────────────────────────────────────────────────

    /// Lock `amount` tokens for `duration_days` at that tier's rate.
    pub fn open(
        env: Env,
        staker: Address,
        amount: i128,
        duration_days: u32,
    ) -> Result<(), ContractError> {
        let config = admin::load_config(&env)?;
        staker.require_auth();

        let clock = Self::clock(&env, &config);
        let existing = ledger::get(&env, &staker);
        let (position, stats) = lifecycle::open(
            existing.as_ref(),
            &aggregates::load(&env),
            &staker,
            amount,
            duration_days,
            clock,
        )?;

        ledger::insert_new(&env, &position)?;
        aggregates::store(&env, &stats);
        admin::bump_instance(&env);

        token::Client::new(&env, &config.token).transfer(
            &staker,
            &env.current_contract_address(),
            &amount,
        );

        events::publish_position_opened(
            &env,
            staker,
            amount,
            position.lock_duration_days,
            position.yield_rate_bps,
            lock::maturity_tick(&position, config.ticks_per_day),
            stats.total_staked,
        );

        Ok(())
    }

    /// Pay out the yield accrued since the last checkpoint and keep the
    /// position running. The reward is drawn from the reserve.
    pub fn claim(env: Env, staker: Address) -> Result<i128, ContractError> {
        let config = admin::load_config(&env)?;
        staker.require_auth();

        let clock = Self::clock(&env, &config);
        let existing = ledger::get(&env, &staker);
        let (position, stats, reward) =
            lifecycle::claim(existing.as_ref(), &aggregates::load(&env), clock)?;

        ledger::replace(&env, &position)?;
        aggregates::store(&env, &stats);
        admin::bump_instance(&env);

        token::Client::new(&env, &config.token).transfer(
            &env.current_contract_address(),
            &staker,
            &reward,
        );

        events::publish_reward_claimed(&env, staker, reward, position.total_claimed);

        Ok(reward)
    }

    /// Close a matured position, returning principal plus unclaimed yield.
    ///
    /// Not gated by the emergency pause.
    pub fn mature_exit(env: Env, staker: Address) -> Result<ExitSummary, ContractError> {
        let config = admin::load_config(&env)?;
        staker.require_auth();

        let clock = Self::clock(&env, &config);
        let existing = ledger::get(&env, &staker);
        let (stats, summary) =
            lifecycle::mature_exit(existing.as_ref(), &aggregates::load(&env), clock)?;

        ledger::remove(&env, &staker)?;
        aggregates::store(&env, &stats);
        admin::bump_instance(&env);

        token::Client::new(&env, &config.token).transfer(
            &env.current_contract_address(),
            &staker,
            &summary.payout,
        );

        events::publish_mature_exit(
            &env,
            staker,
            summary.principal,
            summary.reward,
            stats.total_staked,
        );

        Ok(summary)
    }

    /// Close a position before maturity. Pending yield is forfeited and the
    /// penalty share of principal moves to the penalty pool.
    ///
    /// Not gated by the emergency pause.
    pub fn early_exit(env: Env, staker: Address) -> Result<ExitSummary, ContractError> {
        let config = admin::load_config(&env)?;
        staker.require_auth();

        let clock = Self::clock(&env, &config);
        let existing = ledger::get(&env, &staker);
        let (stats, summary) =
            lifecycle::early_exit(existing.as_ref(), &aggregates::load(&env), clock)?;

        ledger::remove(&env, &staker)?;
        aggregates::store(&env, &stats);
        admin::bump_instance(&env);

        token::Client::new(&env, &config.token).transfer(
            &env.current_contract_address(),
            &staker,
            &summary.payout,
        );

        events::publish_early_exit(
            &env,
            staker,
            summary.principal,
            summary.payout,
            summary.penalty,
            stats.total_staked,
        );

        Ok(summary)
    }

    /// Roll accrued yield into principal and restart the lock on
    /// `new_duration_days`, which may not be shorter than the current tier.
    pub fn compound(
        env: Env,
        staker: Address,
        new_duration_days: u32,
    ) -> Result<CompoundSummary, ContractError> {
        let config = admin::load_config(&env)?;
        staker.require_auth();

        let clock = Self::clock(&env, &config);
        let existing = ledger::get(&env, &staker);
        let (position, stats, summary) = lifecycle::compound(
            existing.as_ref(),
            &aggregates::load(&env),
            new_duration_days,
            clock,
        )?;

        ledger::replace(&env, &position)?;
        aggregates::store(&env, &stats);
        admin::bump_instance(&env);

        events::publish_compounded(
            &env,
            staker,
            summary.reward,
            summary.new_amount,
            summary.old_rate_bps,
            summary.new_rate_bps,
            summary.new_lock_duration_days,
            summary.maturity_tick,
        );

        Ok(summary)
    }

    // ── View functions ───────────────────────────────────────────────────────

    pub fn get_position(env: Env, principal: Address) -> Option<StakePosition> {
        ledger::get(&env, &principal)
    }

    /// Yield `principal` could claim right now; zero without a position.
    pub fn pending_reward(env: Env, principal: Address) -> Result<i128, ContractError> {
        let config = admin::load_config(&env)?;
        match ledger::get(&env, &principal) {
            Some(position) => lifecycle::pending_reward(&position, Self::clock(&env, &config)),
            None => Ok(0),
        }
    }

    pub fn protocol_stats(env: Env) -> ProtocolAggregates {
        aggregates::load(&env)
    }

    /// Lock progress for `principal`, or `None` without a position.
    pub fn lock_status(env: Env, principal: Address) -> Result<Option<LockStatus>, ContractError> {
        let config = admin::load_config(&env)?;
        let now = lock::current_tick(&env);
        Ok(ledger::get(&env, &principal)
            .map(|position| lock::lock_status(&position, now, config.ticks_per_day)))
    }

    /// False when `principal` has no position.
    pub fn is_matured(env: Env, principal: Address) -> Result<bool, ContractError> {
        let config = admin::load_config(&env)?;
        let now = lock::current_tick(&env);
        Ok(ledger::get(&env, &principal)
            .is_some_and(|position| lock::is_matured(&position, now, config.ticks_per_day)))
    }

    pub fn tier_rate(_env: Env, duration_days: u32) -> Option<u32> {
        tiers::yield_rate_for(duration_days)
    }

    /// Supported lock durations in days, shortest first.
    pub fn supported_tiers(env: Env) -> Vec<u32> {
        let mut out = Vec::new(&env);
        for (days, _) in tiers::TIERS.iter() {
            out.push_back(*days);
        }
        out
    }

    pub fn get_config(env: Env) -> Result<StakingConfig, ContractError> {
        admin::load_config(&env)
    }

    pub fn is_initialized(env: Env) -> bool {
        admin::is_initialized(&env)
    }

    pub fn get_owner(env: Env) -> Result<Address, ContractError> {
        Ok(admin::load_config(&env)?.owner)
    }

    pub fn get_pending_owner(env: Env) -> Option<Address> {
        admin::pending_owner(&env)
    }

    // ── Admin functions ──────────────────────────────────────────────────────

    /// Move `amount` tokens from the owner into the reward reserve that
    /// `claim`, `mature_exit` and `compound` draw yield from.
    ///
    /// Returns the new `penalty_pool` balance.
    pub fn fund_pool(env: Env, owner: Address, amount: i128) -> Result<i128, ContractError> {
        let config = admin::load_config(&env)?;
        owner.require_auth();
        admin::require_owner(&config, &owner)?;

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        let mut stats = aggregates::load(&env);
        stats.record_funding(amount)?;
        aggregates::store(&env, &stats);
        admin::bump_instance(&env);

        token::Client::new(&env, &config.token).transfer(
            &owner,
            &env.current_contract_address(),
            &amount,
        );

        events::publish_pool_funded(&env, owner, amount, stats.penalty_pool);

        Ok(stats.penalty_pool)
    }

    /// Flip the emergency pause and return the new value.
    ///
    /// While paused, `open`, `claim` and `compound` fail with `Unauthorized`;
    /// both exits and every view keep working.
    pub fn toggle_pause(env: Env, owner: Address) -> Result<bool, ContractError> {
        let config = admin::load_config(&env)?;
        owner.require_auth();
        admin::require_owner(&config, &owner)?;

        let mut stats = aggregates::load(&env);
        stats.emergency_pause = !stats.emergency_pause;
        aggregates::store(&env, &stats);
        admin::bump_instance(&env);

        events::publish_pause_toggled(&env, owner, stats.emergency_pause);

        Ok(stats.emergency_pause)
    }

    /// Open (`true`) or close (`false`) the protocol to new positions.
    pub fn set_protocol_active(env: Env, owner: Address, active: bool) -> Result<(), ContractError> {
        let config = admin::load_config(&env)?;
        owner.require_auth();
        admin::require_owner(&config, &owner)?;

        let mut stats = aggregates::load(&env);
        stats.protocol_active = active;
        aggregates::store(&env, &stats);
        admin::bump_instance(&env);

        events::publish_protocol_active_set(&env, owner, active);

        Ok(())
    }

    // ── Owner transfer (two-step) ──────────────────────────────────────────

    /// Propose a new owner. The proposed address must call `accept_owner`.
    pub fn propose_owner(
        env: Env,
        current_owner: Address,
        new_owner: Address,
    ) -> Result<(), ContractError> {
        let config = admin::load_config(&env)?;
        current_owner.require_auth();
        admin::require_owner(&config, &current_owner)?;

        admin::set_pending_owner(&env, &new_owner);
        admin::bump_instance(&env);

        events::publish_owner_transfer_proposed(&env, current_owner, new_owner);

        Ok(())
    }

    pub fn accept_owner(env: Env, new_owner: Address) -> Result<(), ContractError> {
        let mut config = admin::load_config(&env)?;
        new_owner.require_auth();

        let pending = admin::pending_owner(&env).ok_or(ContractError::InvalidInput)?;
        if new_owner != pending {
            return Err(ContractError::Unauthorized);
        }

        let old_owner = config.owner.clone();
        config.owner = new_owner.clone();
        admin::store_config(&env, &config);
        admin::clear_pending_owner(&env);
        admin::bump_instance(&env);

        events::publish_owner_transfer_accepted(&env, old_owner, new_owner);

        Ok(())
    }

    pub fn cancel_owner_transfer(env: Env, current_owner: Address) -> Result<(), ContractError> {
        let config = admin::load_config(&env)?;
        current_owner.require_auth();
        admin::require_owner(&config, &current_owner)?;

        let pending = admin::pending_owner(&env).ok_or(ContractError::InvalidInput)?;
        admin::clear_pending_owner(&env);
        admin::bump_instance(&env);

        events::publish_owner_transfer_cancelled(&env, current_owner, pending);

        Ok(())
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn clock(env: &Env, config: &StakingConfig) -> Clock {
        Clock {
            now: lock::current_tick(env),
            ticks_per_day: config.ticks_per_day,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
