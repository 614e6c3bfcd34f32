use crate::ContractError;

/// Denominator for every basis-point quantity (10 000 bps = 100 %).
pub const BPS_DENOMINATOR: i128 = 10_000;

/// Share of principal forfeited on an early exit, in basis points (20 %).
pub const EARLY_EXIT_PENALTY_BPS: i128 = 2_000;

// ── Core reward engine ──────────────────────────────────────────────────────

/// Yield owed on a position for `ticks_elapsed` ticks since its last
/// checkpoint.
///
/// ```text
/// reward = stake × rate_bps × ticks_elapsed
///          ─────────────────────────────────────────────
///          10_000 × lock_duration_days × ticks_per_day
/// ```
///
/// The rate is the total yield over one full lock period, paid linearly per
/// tick. The full product is formed before the single division so the result
/// truncates exactly once. Accrual is not capped at one period: a position
/// left past maturity keeps earning at the same slope.
///
/// # Errors
/// `CalculationOverflow` if any intermediate product leaves `i128`, or if the
/// divisor is zero.
pub fn accrue(
    stake_amount: i128,
    rate_bps: u32,
    lock_duration_days: u32,
    ticks_elapsed: u64,
    ticks_per_day: u64,
) -> Result<i128, ContractError> {
    if stake_amount <= 0 || ticks_elapsed == 0 {
        return Ok(0);
    }

    let numerator = stake_amount
        .checked_mul(i128::from(rate_bps))
        .and_then(|v| v.checked_mul(i128::from(ticks_elapsed)))
        .ok_or(ContractError::CalculationOverflow)?;

    let period = BPS_DENOMINATOR
        .checked_mul(i128::from(lock_duration_days))
        .and_then(|v| v.checked_mul(i128::from(ticks_per_day)))
        .ok_or(ContractError::CalculationOverflow)?;

    numerator
        .checked_div(period)
        .ok_or(ContractError::CalculationOverflow)
}

/// Principal forfeited when a position exits before maturity.
///
/// `floor(amount × 2 000 / 10 000)`
pub fn early_exit_penalty(amount: i128) -> Result<i128, ContractError> {
    amount
        .checked_mul(EARLY_EXIT_PENALTY_BPS)
        .map(|v| v / BPS_DENOMINATOR)
        .ok_or(ContractError::CalculationOverflow)
}

// ── Unit tests ──────────────────────────────────────────────────────────────
// Pure arithmetic, no Soroban environment needed.
