use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env,
};
use timelock_staking::{TimeLockStakingContract, TimeLockStakingContractClient};

pub const TICKS_PER_DAY: u64 = 10;
pub const START: u32 = 100;
pub const RESERVE: i128 = 1_000_000_000_000;

pub struct Harness {
    pub env: Env,
    pub client: TimeLockStakingContractClient<'static>,
    pub owner: Address,
    pub token: Address,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_reserve(RESERVE)
    }

    /// Deployment whose owner has deposited `reserve` through `fund_pool`.
    pub fn with_reserve(reserve: i128) -> Self {
        let env = Env::default();
        env.mock_all_auths();
        env.ledger().with_mut(|li| {
            li.sequence_number = START;
            li.min_persistent_entry_ttl = 500_000;
        });

        let token = env
            .register_stellar_asset_contract_v2(Address::generate(&env))
            .address();
        let contract_id = env.register(TimeLockStakingContract, ());
        let client = TimeLockStakingContractClient::new(&env, &contract_id);

        let owner = Address::generate(&env);
        client.initialize(&owner, &token, &TICKS_PER_DAY);
        if reserve > 0 {
            StellarAssetClient::new(&env, &token).mint(&owner, &reserve);
            client.fund_pool(&owner, &reserve);
        }

        Harness {
            env,
            client,
            owner,
            token,
        }
    }

    pub fn staker(&self, balance: i128) -> Address {
        let staker = Address::generate(&self.env);
        StellarAssetClient::new(&self.env, &self.token).mint(&staker, &balance);
        staker
    }

    /// Tokens held by the staking contract.
    pub fn custody(&self) -> i128 {
        TokenClient::new(&self.env, &self.token).balance(&self.client.address)
    }

    pub fn now(&self) -> u64 {
        u64::from(self.env.ledger().sequence())
    }

    pub fn advance(&self, ticks: u32) {
        let now = self.env.ledger().sequence();
        self.env.ledger().set_sequence_number(now + ticks);
    }
}
