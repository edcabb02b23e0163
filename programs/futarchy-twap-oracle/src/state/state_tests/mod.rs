pub mod oracle_account_tests;
pub mod oracle_state_tests;
