#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env,
};
use timelock_staking::{TimeLockStakingContract, TimeLockStakingContractClient};

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Open { amount: i64, days: u16 },
    Claim,
    MatureExit,
    EarlyExit,
    Compound { days: u16 },
    TogglePause,
    Advance { ticks: u16 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().with_mut(|li| {
        li.sequence_number = 1;
        li.min_persistent_entry_ttl = 5_000_000;
    });

    let token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let contract_id = env.register(TimeLockStakingContract, ());
    let client = TimeLockStakingContractClient::new(&env, &contract_id);

    let owner = Address::generate(&env);
    client.initialize(&owner, &token, &10);

    let sac = StellarAssetClient::new(&env, &token);
    sac.mint(&owner, &i128::from(i64::MAX));
    client.fund_pool(&owner, &i128::from(i64::MAX));
    let custody = TokenClient::new(&env, &token);

    let mut users = vec![];
    for _ in 0..4 {
        let user = Address::generate(&env);
        sac.mint(&user, &i128::from(i64::MAX));
        users.push(user);
    }

    // Any panic here is a bug: every rejection must come back as a
    // ContractError, never as a host trap from overflow.
    for (i, action) in actions.into_iter().enumerate() {
        let caller = &users[i % users.len()];
        match action {
            FuzzAction::Open { amount, days } => {
                let _ = client.try_open(caller, &i128::from(amount), &u32::from(days));
            }
            FuzzAction::Claim => {
                let _ = client.try_claim(caller);
            }
            FuzzAction::MatureExit => {
                let _ = client.try_mature_exit(caller);
            }
            FuzzAction::EarlyExit => {
                let _ = client.try_early_exit(caller);
            }
            FuzzAction::Compound { days } => {
                let _ = client.try_compound(caller, &u32::from(days));
            }
            FuzzAction::TogglePause => {
                let _ = client.try_toggle_pause(&owner);
            }
            FuzzAction::Advance { ticks } => {
                let now = env.ledger().sequence();
                env.ledger().set_sequence_number(now.saturating_add(u32::from(ticks)));
            }
        }

        let stats = client.protocol_stats();
        let live: Vec<_> = users.iter().filter_map(|u| client.get_position(u)).collect();
        assert_eq!(stats.total_participants as usize, live.len());
        assert_eq!(stats.total_staked, live.iter().map(|p| p.amount).sum::<i128>());
        assert_eq!(custody.balance(&contract_id), stats.total_staked + stats.penalty_pool);
    }
});
