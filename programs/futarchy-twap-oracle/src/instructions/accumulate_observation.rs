use crate::components::twap_engine::window_accumulator::AccumulationReport;
use crate::state::oracle_account::OracleAccount;
use crate::utils::clock::clock_now_millis;
use crate::utils::events::{ObservationAccumulated, WindowFinalized};
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct AccumulateObservation<'info> {
    #[account(mut, has_one = authority)]
    pub oracle_account: AccountLoader<'info, OracleAccount>,

    pub authority: Signer<'info>,
}

/// Applies one observation to the stored oracle.
///
/// Returns `None` when the observation lands before the start delay has
/// elapsed: such observations are dropped without touching the account.
pub fn apply_observation(
    account: &mut OracleAccount,
    now_ms: u64,
    raw_price: u128,
) -> Result<Option<AccumulationReport>> {
    let mut oracle = account.load_oracle();

    if !oracle.has_started(now_ms) {
        msg!(
            "TWAP oracle not started: now={} start={}",
            now_ms,
            oracle.accumulation_start()
        );
        return Ok(None);
    }

    let report = oracle.accumulate(now_ms, raw_price)?;
    account.store_oracle(&oracle);
    Ok(Some(report))
}

pub(crate) fn emit_accumulation_events(oracle: Pubkey, report: &AccumulationReport) {
    emit!(ObservationAccumulated {
        oracle,
        timestamp: report.timestamp,
        raw_price: report.raw_price,
        capped_price: report.capped_price,
        windows_finalized: report.windows_finalized,
    });

    if report.windows_finalized > 0 {
        emit!(WindowFinalized {
            oracle,
            window_end: report.window_end,
            window_twap: report.window_twap,
            windows_crossed: report.windows_finalized,
        });
    }
}

pub fn process_accumulate_observation(
    ctx: Context<AccumulateObservation>,
    raw_price: u128,
) -> Result<()> {
    let now_ms = clock_now_millis()?;
    let oracle_key = ctx.accounts.oracle_account.key();
    let mut account = ctx.accounts.oracle_account.load_mut()?;

    if let Some(report) = apply_observation(&mut account, now_ms, raw_price)? {
        emit_accumulation_events(oracle_key, &report);
    }

    Ok(())
}
