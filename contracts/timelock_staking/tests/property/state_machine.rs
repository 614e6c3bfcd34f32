//! Property-based state machine tests for the TimeLockStaking contract.
//!
//! Random operation sequences from a handful of participants are replayed
//! against one deployment. After every step, successful or not:
//! - `total_staked` equals the sum of live position amounts
//! - `total_participants` equals the number of live positions
//! - every live position satisfies `start_tick <= last_claim_tick <= now`
//! - custody holds exactly `total_staked + penalty_pool`, so yield is never
//!   paid out of another participant's stake
//! - a failed operation changed nothing
//!
//! The reserve starts small so that `InsufficientReserve` rejections show up
//! alongside successful payouts.

use proptest::prelude::*;
use proptest_derive::Arbitrary;
use soroban_sdk::Address;
use timelock_staking::{ContractError, ProtocolAggregates, StakePosition};

use crate::common::Harness;

const STAKERS: usize = 4;
const THIN_RESERVE: i128 = 2_000;

#[derive(Clone, Debug, Arbitrary)]
enum Op {
    Open {
        #[proptest(strategy = "0usize..STAKERS")]
        who: usize,
        #[proptest(strategy = "-10i128..100_000")]
        amount: i128,
        #[proptest(strategy = "prop::sample::select(vec![7u32, 30, 90, 180, 365])")]
        days: u32,
    },
    Claim {
        #[proptest(strategy = "0usize..STAKERS")]
        who: usize,
    },
    MatureExit {
        #[proptest(strategy = "0usize..STAKERS")]
        who: usize,
    },
    EarlyExit {
        #[proptest(strategy = "0usize..STAKERS")]
        who: usize,
    },
    Compound {
        #[proptest(strategy = "0usize..STAKERS")]
        who: usize,
        #[proptest(strategy = "prop::sample::select(vec![30u32, 90, 180, 365, 400])")]
        days: u32,
    },
    TogglePause,
    Advance {
        #[proptest(strategy = "1u32..800")]
        ticks: u32,
    },
}

fn snapshot(h: &Harness, stakers: &[Address]) -> (ProtocolAggregates, Vec<Option<StakePosition>>) {
    (
        h.client.protocol_stats(),
        stakers.iter().map(|s| h.client.get_position(s)).collect(),
    )
}

/// Applies `op`, returning `Some(error)` if it was rejected.
fn apply(h: &Harness, stakers: &[Address], op: &Op) -> Option<ContractError> {
    let outcome = match op {
        Op::Open { who, amount, days } => h.client.try_open(&stakers[*who], amount, days).map(|_| ()),
        Op::Claim { who } => h.client.try_claim(&stakers[*who]).map(|_| ()),
        Op::MatureExit { who } => h.client.try_mature_exit(&stakers[*who]).map(|_| ()),
        Op::EarlyExit { who } => h.client.try_early_exit(&stakers[*who]).map(|_| ()),
        Op::Compound { who, days } => h.client.try_compound(&stakers[*who], days).map(|_| ()),
        Op::TogglePause => h.client.try_toggle_pause(&h.owner).map(|_| ()),
        Op::Advance { ticks } => {
            h.advance(*ticks);
            Ok(())
        }
    };
    match outcome {
        Ok(_) => None,
        Err(Ok(e)) => Some(e),
        Err(Err(e)) => panic!("host error outside the contract's error set: {e:?}"),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_aggregates_always_match_ledger(ops in prop::collection::vec(any::<Op>(), 1..40)) {
        let h = Harness::with_reserve(THIN_RESERVE);
        let stakers: Vec<Address> = (0..STAKERS).map(|_| h.staker(10_000_000)).collect();

        for op in &ops {
            let before = snapshot(&h, &stakers);
            let failed = apply(&h, &stakers, op);
            let (stats, positions) = snapshot(&h, &stakers);

            if failed.is_some() {
                prop_assert_eq!(&before.0, &stats, "rejected {:?} touched aggregates", op);
                prop_assert_eq!(&before.1, &positions, "rejected {:?} touched the ledger", op);
            }

            let live: Vec<&StakePosition> = positions.iter().flatten().collect();
            let staked: i128 = live.iter().map(|p| p.amount).sum();
            prop_assert_eq!(stats.total_staked, staked);
            prop_assert_eq!(stats.total_participants as usize, live.len());
            prop_assert!(stats.penalty_pool >= 0);
            prop_assert_eq!(h.custody(), stats.total_staked + stats.penalty_pool);

            let now = h.now();
            for p in live {
                prop_assert!(p.amount > 0);
                prop_assert!(p.start_tick <= p.last_claim_tick);
                prop_assert!(p.last_claim_tick <= now);
            }
        }
    }

    /// A successful claim or compound always leaves nothing pending.
    #[test]
    fn prop_checkpoint_zeroes_pending(ops in prop::collection::vec(any::<Op>(), 1..30)) {
        let h = Harness::new();
        let stakers: Vec<Address> = (0..STAKERS).map(|_| h.staker(10_000_000)).collect();

        for op in &ops {
            let failed = apply(&h, &stakers, op);
            if failed.is_none() {
                if let Op::Claim { who } | Op::Compound { who, .. } = op {
                    prop_assert_eq!(h.client.pending_reward(&stakers[*who]), 0);
                }
            }
        }
    }
}
