use crate::components::twap_engine::safe_math::{Price, WideInt};
use crate::state::oracle_state::TwapOracle;
use crate::utils::constants::{ORACLE_VERSION_MAJOR, ORACLE_VERSION_MINOR, ORACLE_VERSION_PATCH};
use anchor_lang::prelude::*;
use bytemuck::{Pod, Zeroable};

/// On-chain image of a market's `TwapOracle`.
///
/// # Layout Strategy
///
/// 128- and 256-bit integers have platform-dependent alignment (16 bytes on
/// x86_64, 8 on SBF), which would make the zero-copy layout differ between
/// the program and off-chain readers. Wide values are therefore stored as
/// little-endian `u64` words, keeping every field 8-byte aligned and the
/// struct free of implicit padding (a requirement for `Pod`).
#[account(zero_copy)]
#[repr(C)]
pub struct OracleAccount {
    pub authority: Pubkey,
    pub market: Pubkey,

    pub last_price: [u64; 2],
    pub last_window_twap: [u64; 2],
    pub initial_price: [u64; 2],
    pub total_cumulative_price: [u64; 4],
    pub last_window_end_cumulative_price: [u64; 4],

    pub last_timestamp: u64,
    pub last_window_end: u64,
    pub window_size: u64,
    pub cap_step_ppm: u64,
    pub accumulation_start: u64,

    pub version: Version,
    pub bump: u8,
    pub _padding: [u8; 3],

    pub reserved: [u64; 8], // reserved for future use
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
#[repr(C)]
pub struct Version {
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
    pub _padding: u8, // Padding for alignment
}

impl Version {
    pub const CURRENT: Self = Self {
        major: ORACLE_VERSION_MAJOR,
        minor: ORACLE_VERSION_MINOR,
        patch: ORACLE_VERSION_PATCH,
        _padding: 0,
    };
}

#[inline(always)]
pub fn price_to_words(value: Price) -> [u64; 2] {
    [value as u64, (value >> 64) as u64]
}

#[inline(always)]
pub fn price_from_words(words: [u64; 2]) -> Price {
    (words[0] as u128) | ((words[1] as u128) << 64)
}

#[inline(always)]
pub fn wide_to_words(value: WideInt) -> [u64; 4] {
    let (hi, lo) = value.into_words();
    let [w0, w1] = price_to_words(lo);
    let [w2, w3] = price_to_words(hi);
    [w0, w1, w2, w3]
}

#[inline(always)]
pub fn wide_from_words(words: [u64; 4]) -> WideInt {
    let lo = price_from_words([words[0], words[1]]);
    let hi = price_from_words([words[2], words[3]]);
    WideInt::from_words(hi, lo)
}

impl OracleAccount {
    pub const SPACE: usize = 8 + core::mem::size_of::<OracleAccount>();

    /// Decodes the stored words into a working oracle.
    pub fn load_oracle(&self) -> TwapOracle {
        TwapOracle {
            last_price: price_from_words(self.last_price),
            last_timestamp: self.last_timestamp,
            last_window_end: self.last_window_end,
            last_window_twap: price_from_words(self.last_window_twap),
            total_cumulative_price: wide_from_words(self.total_cumulative_price),
            last_window_end_cumulative_price: wide_from_words(self.last_window_end_cumulative_price),
            window_size: self.window_size,
            cap_step_ppm: self.cap_step_ppm,
            initial_price: price_from_words(self.initial_price),
            accumulation_start: self.accumulation_start,
        }
    }

    /// Writes every oracle field back; identity fields are left untouched.
    pub fn store_oracle(&mut self, oracle: &TwapOracle) {
        self.last_price = price_to_words(oracle.last_price);
        self.last_timestamp = oracle.last_timestamp;
        self.last_window_end = oracle.last_window_end;
        self.last_window_twap = price_to_words(oracle.last_window_twap);
        self.total_cumulative_price = wide_to_words(oracle.total_cumulative_price);
        self.last_window_end_cumulative_price =
            wide_to_words(oracle.last_window_end_cumulative_price);
        self.window_size = oracle.window_size;
        self.cap_step_ppm = oracle.cap_step_ppm;
        self.initial_price = price_to_words(oracle.initial_price);
        self.accumulation_start = oracle.accumulation_start;
    }

    pub fn is_initialized(&self) -> bool {
        self.window_size > 0
    }
}
