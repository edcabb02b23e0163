use crate::components::twap_engine::finalizer::finalize_window_twap;
use crate::components::twap_engine::price_cap::{cap_price, cap_step, shift_towards};
use crate::components::twap_engine::safe_math::{
    checked_time_add, checked_time_mul, price_time_product, wide, wide_add, wide_div, wide_mul,
    wide_sub, Price, Timestamp, WideInt,
};
use crate::error::OracleError;
use crate::state::oracle_state::TwapOracle;
use anchor_lang::prelude::*;

/// Backlogs at least this long get a log line; they usually mean the market
/// went quiet for a while and the next trade is catching the oracle up.
const LARGE_BACKLOG_WINDOWS: u64 = 1_000;

/// Summary of one `accumulate` call, used for event emission and assertions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AccumulationReport {
    pub timestamp: Timestamp,
    pub raw_price: Price,
    /// Price recorded by the final stage that ran.
    pub capped_price: Price,
    /// Window boundaries crossed, including the backlog ramp.
    pub windows_finalized: u64,
    /// Full windows consumed by the closed-form ramp.
    pub backlog_windows: u64,
    pub window_twap: Price,
    pub window_end: Timestamp,
}

impl AccumulationReport {
    pub(crate) fn snapshot(oracle: &TwapOracle, raw_price: Price) -> Self {
        Self {
            timestamp: oracle.last_timestamp,
            raw_price,
            capped_price: oracle.last_price,
            windows_finalized: 0,
            backlog_windows: 0,
            window_twap: oracle.last_window_twap,
            window_end: oracle.last_window_end,
        }
    }
}

/// Advances `oracle` from its current clock to `target` in up to three stages.
///
/// Callers must have checked `target > oracle.last_timestamp`. The oracle may
/// be left half-advanced on error; `TwapOracle::accumulate` runs this against
/// a scratch copy and only commits on success.
pub(crate) fn accumulate_stages(
    oracle: &mut TwapOracle,
    target: Timestamp,
    raw_price: Price,
) -> Result<AccumulationReport> {
    let mut windows_finalized = 0u64;
    let mut backlog_windows = 0u64;

    // Stage A: fill the window we are currently inside.
    let boundary = oracle.next_window_boundary()?;
    if oracle.last_timestamp < boundary {
        let stage_end = target.min(boundary);
        accumulate_partial(oracle, stage_end - oracle.last_timestamp, raw_price)?;

        if oracle.last_timestamp == boundary {
            finalize_current_window(oracle)?;
            windows_finalized += 1;
        }
    }

    // Stage B: whole windows in closed form.
    let full_windows = (target - oracle.last_timestamp) / oracle.window_size;
    if full_windows > 0 {
        ramp_full_windows(oracle, full_windows, raw_price)?;
        windows_finalized += full_windows;
        backlog_windows = full_windows;
    }

    // Stage C: trailing partial window, never reaches a boundary.
    if target > oracle.last_timestamp {
        accumulate_partial(oracle, target - oracle.last_timestamp, raw_price)?;
    }

    Ok(AccumulationReport {
        windows_finalized,
        backlog_windows,
        ..AccumulationReport::snapshot(oracle, raw_price)
    })
}

/// Integrates a capped price over `duration` without crossing a boundary.
fn accumulate_partial(oracle: &mut TwapOracle, duration: Timestamp, raw_price: Price) -> Result<()> {
    let capped = cap_price(oracle.last_window_twap, raw_price, oracle.cap_step_ppm);
    let contribution = price_time_product(capped, duration)?;

    oracle.total_cumulative_price = wide_add(oracle.total_cumulative_price, contribution)?;
    oracle.last_price = capped;
    oracle.last_timestamp = checked_time_add(oracle.last_timestamp, duration)?;
    Ok(())
}

fn finalize_current_window(oracle: &mut TwapOracle) -> Result<()> {
    let twap = finalize_window_twap(
        oracle.total_cumulative_price,
        oracle.last_window_end_cumulative_price,
        oracle.window_size,
    )?;

    oracle.last_window_twap = twap;
    oracle.last_window_end = oracle.last_timestamp;
    oracle.last_window_end_cumulative_price = oracle.total_cumulative_price;
    Ok(())
}

/// Per-stage totals of the closed-form ramp.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct RampOutcome {
    /// Sum of the per-window prices over the whole stage.
    pub price_sum: WideInt,
    /// Price held during (and finalized for) the last window of the stage.
    pub final_price: Price,
}

/// Closed form of `window_count` consecutive single-window caps at a fixed step.
///
/// # Ramp Shape
///
/// Window `i` (1-based) sits at `baseline ± min(i * step, gap)`. The first
/// `floor(gap / step)` windows each take a whole step ("ramp"); every later
/// window has already reached `raw_price` and holds there ("flat"). A window
/// that would overshoot `raw_price` by part of a step is flat, so no window
/// ever leaves the interval between baseline and raw price.
///
/// ```text
/// deviation_sum = step * r * (r + 1) / 2 + gap * (n - r),   r = min(n, floor(gap / step))
/// price_sum     = n * baseline ± deviation_sum
/// ```
pub(crate) fn closed_form_ramp(
    baseline: Price,
    raw_price: Price,
    step: Price,
    window_count: u64,
) -> Result<RampOutcome> {
    let gap = baseline.abs_diff(raw_price);
    let n = wide(window_count as u128);

    let whole_steps = gap
        .checked_div(step)
        .ok_or_else(|| error!(OracleError::ArithmeticOverflow))?;
    let ramp_windows = wide(whole_steps).min(n);
    let flat_windows = wide_sub(n, ramp_windows)?;

    // r * (r + 1) is always even, so the halving is exact.
    let ramp_pairs = wide_mul(ramp_windows, wide_add(ramp_windows, WideInt::ONE)?)?;
    let triangle = wide_div(ramp_pairs, wide(2))?;
    let ramp_deviation = wide_mul(wide(step), triangle)?;
    let flat_deviation = wide_mul(wide(gap), flat_windows)?;
    let deviation_sum = wide_add(ramp_deviation, flat_deviation)?;

    let base_sum = wide_mul(wide(baseline), n)?;
    let price_sum = if raw_price >= baseline {
        wide_add(base_sum, deviation_sum)?
    } else {
        wide_sub(base_sum, deviation_sum)?
    };

    let final_deviation = wide_mul(wide(step), n)?.min(wide(gap)).as_u128();
    let final_price = shift_towards(baseline, raw_price, final_deviation);

    Ok(RampOutcome {
        price_sum,
        final_price,
    })
}

fn ramp_full_windows(oracle: &mut TwapOracle, window_count: u64, raw_price: Price) -> Result<()> {
    if window_count >= LARGE_BACKLOG_WINDOWS {
        msg!("TWAP oracle ramping backlog of {} windows", window_count);
    }

    let baseline = oracle.last_window_twap;
    let step = cap_step(baseline, oracle.cap_step_ppm);
    let outcome = closed_form_ramp(baseline, raw_price, step, window_count)?;

    let window_size = oracle.window_size;
    let stage_duration = checked_time_mul(window_count, window_size)?;
    let stage_integral = wide_mul(outcome.price_sum, wide(window_size as u128))?;
    let total = wide_add(oracle.total_cumulative_price, stage_integral)?;

    // Only the last window of the stage seeds the next baseline; finalize it
    // from its own integral delta.
    let last_window_start = wide_sub(total, price_time_product(outcome.final_price, window_size)?)?;
    let twap = finalize_window_twap(total, last_window_start, window_size)?;

    oracle.total_cumulative_price = total;
    oracle.last_window_twap = twap;
    oracle.last_price = outcome.final_price;
    oracle.last_window_end = checked_time_add(oracle.last_window_end, stage_duration)?;
    oracle.last_window_end_cumulative_price = total;
    oracle.last_timestamp = checked_time_add(oracle.last_timestamp, stage_duration)?;
    Ok(())
}
