//! Properties of reward accrual and the early-exit penalty, checked through
//! the deployed contract.

use proptest::prelude::*;
use timelock_staking::tiers;

use crate::common::{Harness, RESERVE, TICKS_PER_DAY};

fn tier() -> impl Strategy<Value = (u32, u32)> {
    prop::sample::select(tiers::TIERS.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// `pending_reward` never decreases as the clock advances and always
    /// equals the closed-form accrual for the ticks elapsed.
    #[test]
    fn prop_pending_reward_is_monotonic(
        amount in 1i128..=1_000_000_000,
        (days, rate) in tier(),
        steps in prop::collection::vec(0u32..500, 1..12),
    ) {
        let h = Harness::new();
        let staker = h.staker(amount);
        h.client.open(&staker, &amount, &days);
        let opened_at = h.now();

        let mut last = 0i128;
        for step in steps {
            h.advance(step);
            let pending = h.client.pending_reward(&staker);
            prop_assert!(pending >= last);

            let elapsed = i128::from(h.now() - opened_at);
            let expected = amount * i128::from(rate) * elapsed
                / (10_000 * i128::from(days) * i128::from(TICKS_PER_DAY));
            prop_assert_eq!(pending, expected);
            last = pending;
        }
    }

    /// Early exit returns exactly `A - floor(A * 2000 / 10000)` and moves the
    /// rest into the penalty pool.
    #[test]
    fn prop_early_exit_penalty_is_exact(
        amount in 1i128..=1_000_000_000_000,
        (days, _rate) in tier(),
        wait in 0u32..300,
    ) {
        let h = Harness::new();
        let staker = h.staker(amount);
        h.client.open(&staker, &amount, &days);
        h.advance(wait);

        let summary = h.client.early_exit(&staker);
        let penalty = amount * 2_000 / 10_000;
        prop_assert_eq!(summary.penalty, penalty);
        prop_assert_eq!(summary.payout, amount - penalty);
        prop_assert_eq!(h.client.protocol_stats().penalty_pool, RESERVE + penalty);
        prop_assert_eq!(h.custody(), RESERVE + penalty);
    }

    /// Compounding freezes the new tier's rate and zeroes pending yield.
    #[test]
    fn prop_compound_freezes_new_rate(
        amount in 1_000i128..=1_000_000,
        wait in 50u32..3_000,
        upgrade in 0usize..4,
    ) {
        let h = Harness::new();
        let staker = h.staker(amount);
        h.client.open(&staker, &amount, &30);
        h.advance(wait);

        let (new_days, new_rate) = tiers::TIERS[upgrade];
        let reward = h.client.pending_reward(&staker);
        prop_assume!(reward > 0);

        let summary = h.client.compound(&staker, &new_days);
        let position = h.client.get_position(&staker).unwrap();

        prop_assert_eq!(summary.reward, reward);
        prop_assert_eq!(position.amount, amount + reward);
        prop_assert_eq!(position.yield_rate_bps, new_rate);
        prop_assert_eq!(position.start_tick, h.now());
        prop_assert_eq!(h.client.pending_reward(&staker), 0);
    }
}
