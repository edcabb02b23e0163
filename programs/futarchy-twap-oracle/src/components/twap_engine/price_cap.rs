use crate::components::twap_engine::safe_math::{saturating_narrow, wide, Price};
use crate::utils::constants::PPM_SCALE;

/// Largest move a single window may make away from `baseline`.
///
/// # Floor of One
///
/// `baseline * ppm / 1_000_000` rounds to zero for small baselines at small
/// ppm values. A zero step would pin the oracle to its baseline forever, so the
/// step never drops below one price unit.
///
/// The product is formed in 256 bits; with `ppm <= 1_000_000` the quotient is
/// at most `baseline` and always narrows back losslessly.
#[inline]
pub fn cap_step(baseline: Price, cap_step_ppm: u64) -> Price {
    let scaled = wide(baseline) * wide(cap_step_ppm as u128) / wide(PPM_SCALE as u128);
    saturating_narrow(scaled).max(1)
}

/// Clamps `raw_price` into `[baseline - step, baseline + step]`, saturating at
/// the representable bounds.
#[inline]
pub fn cap_price(baseline: Price, raw_price: Price, cap_step_ppm: u64) -> Price {
    let step = cap_step(baseline, cap_step_ppm);
    clamp_to_band(baseline, raw_price, step)
}

#[inline(always)]
pub(crate) fn clamp_to_band(baseline: Price, raw_price: Price, step: Price) -> Price {
    raw_price.clamp(baseline.saturating_sub(step), baseline.saturating_add(step))
}

/// Moves `baseline` by `deviation` towards `target`.
#[inline(always)]
pub(crate) fn shift_towards(baseline: Price, target: Price, deviation: Price) -> Price {
    if target >= baseline {
        baseline.saturating_add(deviation)
    } else {
        baseline.saturating_sub(deviation)
    }
}
