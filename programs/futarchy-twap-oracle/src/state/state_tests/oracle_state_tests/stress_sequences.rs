//! Long deterministic churn. Invariants are checked after every call.

use super::helpers::{
    assert_oracle_invariants, oracle_fixture, oracle_with_window, ONE_PERCENT_PPM, WINDOW,
};
use crate::components::twap_engine::price_cap::cap_step;

/// xorshift64, so the sequence is identical on every run.
fn next_random(state: &mut u64) -> u64 {
    *state ^= *state << 13;
    *state ^= *state >> 7;
    *state ^= *state << 17;
    *state
}

#[test]
fn dense_small_steps_across_many_windows() {
    let mut oracle = oracle_fixture(10_000, ONE_PERCENT_PPM);
    let mut now = 0u64;
    let mut finalized = 0u64;

    while now < 5 * WINDOW {
        now += 7;
        let report = oracle.accumulate(now, 10_000 + (now % 500) as u128).unwrap();
        finalized += report.windows_finalized;
        assert_oracle_invariants(&oracle);
    }

    assert_eq!(finalized, oracle.last_window_end() / WINDOW);
}

#[test]
fn randomised_gaps_and_prices_keep_invariants() {
    let mut oracle = oracle_fixture(1_000_000, 25_000);
    let mut seed = 0x9E37_79B9_7F4A_7C15u64;
    let mut now = 0u64;

    for _ in 0..2_000 {
        let gap = next_random(&mut seed) % (WINDOW * 4);
        let raw = (next_random(&mut seed) % 4_000_000) as u128;
        now += gap;

        let baseline = oracle.current_window_twap();
        let report = oracle.accumulate(now, raw).unwrap();

        if gap > 0 && report.windows_finalized == 0 {
            assert!(report.capped_price.abs_diff(baseline) <= cap_step(baseline, 25_000));
        }
        assert_eq!(oracle.last_timestamp(), now);
        assert_oracle_invariants(&oracle);
    }
}

#[test]
fn one_millisecond_windows_survive_long_gaps() {
    let mut oracle = oracle_with_window(500, ONE_PERCENT_PPM, 1);
    let mut now = 0u64;

    for gap in [1u64, 2, 3, 1_000, 1, 10_000_000, 5] {
        now += gap;
        let report = oracle.accumulate(now, 1_000).unwrap();

        assert_eq!(report.windows_finalized, gap);
        assert_eq!(oracle.last_window_end(), now);
        assert_oracle_invariants(&oracle);
    }

    assert_eq!(oracle.current_window_twap(), 1_000);
}
