use crate::state::oracle_account::{OracleAccount, Version};
use crate::state::oracle_state::{OracleConfig, TwapOracle};
use crate::utils::clock::clock_now_millis;
use crate::utils::constants::ORACLE_SEED;
use crate::utils::events::OracleInitialized;
use anchor_lang::prelude::*;

/// Market-supplied oracle parameters.
///
/// Genesis is not part of the argument: it is taken from the cluster clock
/// when the instruction lands, so a market cannot backdate its oracle.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug)]
pub struct InitializeOracleConfig {
    pub initial_price: u128,
    pub cap_step_ppm: u64,
    /// Milliseconds.
    pub window_size: u64,
    /// Milliseconds after genesis before the integral starts accruing.
    pub start_delay: u64,
}

impl InitializeOracleConfig {
    pub fn into_oracle_config(self, genesis_timestamp: u64) -> OracleConfig {
        OracleConfig {
            initial_price: self.initial_price,
            cap_step_ppm: self.cap_step_ppm,
            window_size: self.window_size,
            genesis_timestamp,
            start_delay: self.start_delay,
        }
    }
}

#[derive(Accounts)]
pub struct InitializeOracle<'info> {
    #[account(
        init,
        payer = authority,
        space = OracleAccount::SPACE,
        seeds = [ORACLE_SEED, market.key().as_ref()],
        bump,
    )]
    pub oracle_account: AccountLoader<'info, OracleAccount>,

    /// CHECK: only used as a PDA seed; the market program validates its own accounts
    pub market: UncheckedAccount<'info>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

/// Fills a freshly allocated account with a validated oracle.
pub fn write_new_oracle_account(
    account: &mut OracleAccount,
    authority: Pubkey,
    market: Pubkey,
    bump: u8,
    oracle: &TwapOracle,
) {
    account.authority = authority;
    account.market = market;
    account.version = Version::CURRENT;
    account.bump = bump;
    account._padding = [0; 3];
    account.reserved = [0; 8];
    account.store_oracle(oracle);
}

pub fn process_initialize_oracle(
    ctx: Context<InitializeOracle>,
    config: InitializeOracleConfig,
) -> Result<()> {
    let genesis = clock_now_millis()?;
    let oracle = TwapOracle::with_config(&config.into_oracle_config(genesis))?;

    let mut account = ctx.accounts.oracle_account.load_init()?;
    write_new_oracle_account(
        &mut account,
        ctx.accounts.authority.key(),
        ctx.accounts.market.key(),
        ctx.bumps.oracle_account,
        &oracle,
    );

    msg!(
        "TWAP oracle initialized: start={} window={}ms cap={}ppm",
        oracle.accumulation_start(),
        oracle.window_size(),
        oracle.cap_step_ppm()
    );

    emit!(OracleInitialized {
        oracle: ctx.accounts.oracle_account.key(),
        market: ctx.accounts.market.key(),
        authority: ctx.accounts.authority.key(),
        initial_price: oracle.initial_price(),
        cap_step_ppm: oracle.cap_step_ppm(),
        window_size: oracle.window_size(),
        accumulation_start: oracle.accumulation_start(),
    });

    Ok(())
}
