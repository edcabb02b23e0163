#![allow(unexpected_cfgs)]
use anchor_lang::prelude::*;

pub mod components;
pub mod error;
pub mod instructions;
pub mod state;
pub mod utils;

pub use instructions::*;

declare_id!("BknrieHgxcNR5dFk9TRXLitZXaGTLcNNm38BAVycvKvv");

#[program]
pub mod futarchy_twap_oracle {
    use super::*;

    pub fn initialize_oracle(
        ctx: Context<InitializeOracle>,
        config: InitializeOracleConfig,
    ) -> Result<()> {
        instructions::process_initialize_oracle(ctx, config)
    }

    pub fn accumulate_observation(
        ctx: Context<AccumulateObservation>,
        raw_price: u128,
    ) -> Result<()> {
        instructions::process_accumulate_observation(ctx, raw_price)
    }

    pub fn read_twap(ctx: Context<ReadTwap>, raw_price: u128) -> Result<u128> {
        instructions::process_read_twap(ctx, raw_price)
    }
}
