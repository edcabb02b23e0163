use crate::instructions::accumulate_observation::{apply_observation, emit_accumulation_events};
use crate::state::oracle_account::OracleAccount;
use crate::utils::clock::clock_now_millis;
use crate::utils::events::TwapRead;
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct ReadTwap<'info> {
    #[account(mut, has_one = authority)]
    pub oracle_account: AccountLoader<'info, OracleAccount>,

    pub authority: Signer<'info>,
}

/// Write-through read: folds `raw_price` in at the current cluster time and
/// returns the latest finalized window TWAP via return data.
pub fn process_read_twap(ctx: Context<ReadTwap>, raw_price: u128) -> Result<u128> {
    let now_ms = clock_now_millis()?;
    let oracle_key = ctx.accounts.oracle_account.key();
    let mut account = ctx.accounts.oracle_account.load_mut()?;

    if let Some(report) = apply_observation(&mut account, now_ms, raw_price)? {
        emit_accumulation_events(oracle_key, &report);
    }

    let window_twap = account.load_oracle().current_window_twap();

    emit!(TwapRead {
        oracle: oracle_key,
        timestamp: now_ms,
        window_twap,
    });

    Ok(window_twap)
}
