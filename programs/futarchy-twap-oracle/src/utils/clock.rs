use crate::error::OracleError;
use crate::utils::constants::MILLIS_PER_SECOND;
use anchor_lang::prelude::*;

/// Converts a cluster unix timestamp (seconds) into the oracle's millisecond clock.
///
/// Negative timestamps only show up on misconfigured local validators; they are
/// rejected instead of being cast into a huge unsigned value.
#[inline]
pub fn unix_seconds_to_millis(unix_timestamp: i64) -> Result<u64> {
    require!(unix_timestamp >= 0, OracleError::InvalidClock);

    (unix_timestamp as u64)
        .checked_mul(MILLIS_PER_SECOND)
        .ok_or_else(|| error!(OracleError::ArithmeticOverflow))
}

/// Current cluster time in milliseconds.
pub fn clock_now_millis() -> Result<u64> {
    unix_seconds_to_millis(Clock::get()?.unix_timestamp)
}
