use anchor_lang::prelude::*;

#[event]
pub struct OracleInitialized {
    pub oracle: Pubkey,
    pub market: Pubkey,
    pub authority: Pubkey,
    pub initial_price: u128,
    pub cap_step_ppm: u64,
    pub window_size: u64,
    pub accumulation_start: u64,
}

#[event]
pub struct ObservationAccumulated {
    pub oracle: Pubkey,
    pub timestamp: u64,
    pub raw_price: u128,
    pub capped_price: u128,
    pub windows_finalized: u64,
}

#[event]
pub struct WindowFinalized {
    pub oracle: Pubkey,
    pub window_end: u64,
    pub window_twap: u128,
    pub windows_crossed: u64, // > 1 when a backlog was ramped in one call
}

#[event]
pub struct TwapRead {
    pub oracle: Pubkey,
    pub timestamp: u64,
    pub window_twap: u128,
}
