//! Static lock-duration tier table.
//!
//! Each supported lock duration maps to a fixed annual yield rate in basis
//! points. The table never changes at runtime; positions copy the rate when
//! they are opened or compounded and never read it back from here.

/// Supported `(lock_duration_days, yield_rate_bps)` pairs, shortest first.
pub const TIERS: [(u32, u32); 4] = [(30, 500), (90, 1_000), (180, 1_500), (365, 2_000)];

/// Returns the yield rate for `duration_days`, or `None` if the duration is
/// not one of the supported tiers.
pub fn yield_rate_for(duration_days: u32) -> Option<u32> {
    TIERS
        .iter()
        .find(|(days, _)| *days == duration_days)
        .map(|(_, rate)| *rate)
}

pub fn is_supported_tier(duration_days: u32) -> bool {
    yield_rate_for(duration_days).is_some()
}
