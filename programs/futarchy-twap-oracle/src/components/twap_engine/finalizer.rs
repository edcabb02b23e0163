use crate::components::twap_engine::safe_math::{floor_div_to_price, wide_sub, Price, WideInt};
use crate::error::OracleError;
use anchor_lang::prelude::*;

/// Derives a finished window's TWAP from the integral delta across it.
///
/// TWAP = (cumulative_at_window_end - cumulative_at_window_start) / window_size
///
/// The quotient is floored. Over many windows this leaves a small downward
/// bias (under one price unit per window); consumers gating on thresholds
/// rely on the exact floored values, so it must not be rounded.
#[inline]
pub fn finalize_window_twap(
    window_end_cumulative: WideInt,
    window_start_cumulative: WideInt,
    window_size: u64,
) -> Result<Price> {
    require!(window_size > 0, OracleError::InvalidWindowSize);
    require!(
        window_end_cumulative >= window_start_cumulative,
        OracleError::CumulativeRegression
    );

    let delta = wide_sub(window_end_cumulative, window_start_cumulative)?;
    floor_div_to_price(delta, window_size)
}
