//! Test harness for the `TwapOracle` accumulation state machine.
//!
//! - `helpers`: fixtures, sequential-window drivers, invariant assertions.
//! - `core_unit_tests`: construction, validation, sequencing, atomicity.
//! - `scenarios`: worked numeric examples with hand-computed expectations.
//! - `window_boundaries`: stage A/B/C transitions, truncation, start delay.
//! - `attack_scenarios`: spikes, sustained pushes, crashes, long backlogs.
//! - `property_tests`: proptest coverage of caps, equivalence, truncation.
//! - `stress_sequences`: long churn sequences checked after every call.

pub mod stress_sequences;
