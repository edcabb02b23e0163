pub mod oracle_account;
pub mod oracle_state;

pub use oracle_account::*;
pub use oracle_state::*;

#[cfg(test)]
pub mod state_tests;
