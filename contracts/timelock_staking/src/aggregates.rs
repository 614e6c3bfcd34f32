use soroban_sdk::{contracttype, symbol_short, Env, Symbol};

use crate::ContractError;

const AGGREGATES: Symbol = symbol_short!("AGGR");

/// Protocol-wide running totals and operational flags.
///
/// `total_staked` always equals the sum of live position amounts and
/// `total_participants` the number of live positions. `penalty_pool` is the
/// reward reserve: early-exit penalties and owner funding go in, every unit
/// of yield paid or compounded comes out, so custody always holds at least
/// `total_staked + penalty_pool`. Each lifecycle
/// operation applies exactly one `record_*` delta and stores the result in
/// the same invocation as the ledger write.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProtocolAggregates {
    pub total_staked: i128,
    pub total_participants: u32,
    pub total_rewards_distributed: i128,
    pub penalty_pool: i128,
    pub protocol_active: bool,
    pub emergency_pause: bool,
}

impl ProtocolAggregates {
    /// State right after `initialize`: open for business, nothing staked.
    pub fn genesis() -> Self {
        Self {
            total_staked: 0,
            total_participants: 0,
            total_rewards_distributed: 0,
            penalty_pool: 0,
            protocol_active: true,
            emergency_pause: false,
        }
    }

    pub fn record_open(&mut self, amount: i128) -> Result<(), ContractError> {
        self.total_staked = add(self.total_staked, amount)?;
        self.total_participants = self
            .total_participants
            .checked_add(1)
            .ok_or(ContractError::CalculationOverflow)?;
        Ok(())
    }

    pub fn record_claim(&mut self, reward: i128) -> Result<(), ContractError> {
        self.draw_reward(reward)
    }

    pub fn record_mature_exit(&mut self, amount: i128, reward: i128) -> Result<(), ContractError> {
        self.draw_reward(reward)?;
        self.remove_participant(amount)
    }

    pub fn record_early_exit(&mut self, amount: i128, penalty: i128) -> Result<(), ContractError> {
        self.remove_participant(amount)?;
        self.penalty_pool = add(self.penalty_pool, penalty)?;
        Ok(())
    }

    /// Compounded yield moves from the reserve into principal, so it counts
    /// both as staked and as distributed. The participant count does not
    /// change.
    pub fn record_compound(&mut self, reward: i128) -> Result<(), ContractError> {
        self.draw_reward(reward)?;
        self.total_staked = add(self.total_staked, reward)?;
        Ok(())
    }

    pub fn record_funding(&mut self, amount: i128) -> Result<(), ContractError> {
        self.penalty_pool = add(self.penalty_pool, amount)?;
        Ok(())
    }

    fn draw_reward(&mut self, reward: i128) -> Result<(), ContractError> {
        if reward > self.penalty_pool {
            return Err(ContractError::InsufficientReserve);
        }
        self.penalty_pool -= reward;
        self.total_rewards_distributed = add(self.total_rewards_distributed, reward)?;
        Ok(())
    }

    fn remove_participant(&mut self, amount: i128) -> Result<(), ContractError> {
        self.total_staked = self
            .total_staked
            .checked_sub(amount)
            .ok_or(ContractError::CalculationOverflow)?;
        self.total_participants = self
            .total_participants
            .checked_sub(1)
            .ok_or(ContractError::CalculationOverflow)?;
        Ok(())
    }
}

fn add(total: i128, delta: i128) -> Result<i128, ContractError> {
    total
        .checked_add(delta)
        .ok_or(ContractError::CalculationOverflow)
}

// ── Storage ─────────────────────────────────────────────────────────────────

pub fn load(env: &Env) -> ProtocolAggregates {
    env.storage()
        .instance()
        .get(&AGGREGATES)
        .unwrap_or_else(ProtocolAggregates::genesis)
}

pub fn store(env: &Env, aggregates: &ProtocolAggregates) {
    env.storage().instance().set(&AGGREGATES, aggregates);
}
