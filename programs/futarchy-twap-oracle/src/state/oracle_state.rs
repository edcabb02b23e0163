use crate::components::twap_engine::safe_math::{
    checked_time_add, floor_div_to_price, Price, Timestamp, WideInt,
};
use crate::components::twap_engine::window_accumulator::{accumulate_stages, AccumulationReport};
use crate::error::OracleError;
use crate::utils::constants::{DEFAULT_WINDOW_SIZE_MS, MAX_CAP_STEP_PPM, MIN_CAP_STEP_PPM};
use anchor_lang::prelude::*;

/// Construction parameters for a market's oracle. Immutable once applied.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct OracleConfig {
    /// Baseline for the first window. Should sit close to the expected spot
    /// price; a far-off value takes many windows to ramp away from.
    pub initial_price: Price,
    /// Maximum move per window, in parts per million of the baseline.
    pub cap_step_ppm: u64,
    /// Length of one accumulation window in milliseconds.
    pub window_size: u64,
    pub genesis_timestamp: Timestamp,
    /// Accumulation begins this many milliseconds after genesis.
    pub start_delay: u64,
}

impl OracleConfig {
    pub fn validate(&self) -> Result<()> {
        require!(
            (MIN_CAP_STEP_PPM..=MAX_CAP_STEP_PPM).contains(&self.cap_step_ppm),
            OracleError::InvalidCapStepPpm
        );
        require!(self.initial_price > 0, OracleError::ZeroInitialPrice);
        require!(self.window_size > 0, OracleError::InvalidWindowSize);
        self.accumulation_start()?;
        Ok(())
    }

    pub fn accumulation_start(&self) -> Result<Timestamp> {
        self.genesis_timestamp
            .checked_add(self.start_delay)
            .ok_or_else(|| error!(OracleError::InvalidStartDelay))
    }
}

/// Windowed, step-capped TWAP accumulator for a single market.
///
/// # State Machine
///
/// The oracle keeps one running integral of capped price over time. Time is
/// cut into fixed windows starting at `accumulation_start`; whenever a window
/// closes, its average becomes the baseline that caps every observation in
/// the following window. A single observation can therefore move the
/// baseline by at most one cap step per window, no matter how extreme it is.
///
/// # Atomicity
///
/// `accumulate` is the only mutator. It advances a scratch copy and commits
/// only after every stage and the postcondition succeed, so a failed call
/// leaves the oracle bit-for-bit unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TwapOracle {
    pub(crate) last_price: Price,
    pub(crate) last_timestamp: Timestamp,
    pub(crate) last_window_end: Timestamp,
    pub(crate) last_window_twap: Price,
    pub(crate) total_cumulative_price: WideInt,
    pub(crate) last_window_end_cumulative_price: WideInt,
    pub(crate) window_size: u64,
    pub(crate) cap_step_ppm: u64,
    pub(crate) initial_price: Price,
    pub(crate) accumulation_start: Timestamp,
}

impl TwapOracle {
    /// Oracle with the default one-minute window and genesis at zero.
    pub fn new(initial_price: Price, cap_step_ppm: u64, start_delay: u64) -> Result<Self> {
        Self::with_config(&OracleConfig {
            initial_price,
            cap_step_ppm,
            window_size: DEFAULT_WINDOW_SIZE_MS,
            genesis_timestamp: 0,
            start_delay,
        })
    }

    pub fn with_config(config: &OracleConfig) -> Result<Self> {
        config.validate()?;
        let start = config.accumulation_start()?;

        Ok(Self {
            last_price: config.initial_price,
            last_timestamp: start,
            last_window_end: start,
            last_window_twap: config.initial_price,
            total_cumulative_price: WideInt::ZERO,
            last_window_end_cumulative_price: WideInt::ZERO,
            window_size: config.window_size,
            cap_step_ppm: config.cap_step_ppm,
            initial_price: config.initial_price,
            accumulation_start: start,
        })
    }

    /// Folds a raw observation into the oracle, advancing its clock to `timestamp`.
    ///
    /// A timestamp equal to the current clock is a no-op (several trades can
    /// land in the same millisecond); an older timestamp is rejected.
    pub fn accumulate(
        &mut self,
        timestamp: Timestamp,
        raw_price: Price,
    ) -> Result<AccumulationReport> {
        require!(self.window_size > 0, OracleError::InvalidWindowSize);
        require_gte!(
            self.last_timestamp,
            self.last_window_end,
            OracleError::ClockBehindWindowEnd
        );

        if timestamp == self.last_timestamp {
            return Ok(AccumulationReport::snapshot(self, raw_price));
        }
        require!(timestamp > self.last_timestamp, OracleError::TimestampRegression);

        let mut staged = *self;
        let report = accumulate_stages(&mut staged, timestamp, raw_price)?;

        require!(
            staged.last_timestamp == timestamp,
            OracleError::AccumulationPostconditionFailed
        );

        *self = staged;
        Ok(report)
    }

    /// Write-through read: accumulates the observation, then returns the
    /// freshly finalized window TWAP.
    pub fn observe_and_read(&mut self, timestamp: Timestamp, raw_price: Price) -> Result<Price> {
        self.accumulate(timestamp, raw_price)?;
        Ok(self.current_window_twap())
    }

    /// Average of the capped price over the whole accumulation period.
    pub fn twap_since_start(&self) -> Result<Price> {
        let elapsed = self.last_timestamp.saturating_sub(self.accumulation_start);
        require!(elapsed > 0, OracleError::TwapNotReady);
        floor_div_to_price(self.total_cumulative_price, elapsed)
    }

    /// True once `timestamp` is past the start delay.
    #[inline]
    pub fn has_started(&self, timestamp: Timestamp) -> bool {
        timestamp > self.accumulation_start
    }

    pub fn next_window_boundary(&self) -> Result<Timestamp> {
        checked_time_add(self.last_window_end, self.window_size)
    }

    #[inline]
    pub fn last_price(&self) -> Price {
        self.last_price
    }

    #[inline]
    pub fn last_timestamp(&self) -> Timestamp {
        self.last_timestamp
    }

    #[inline]
    pub fn current_window_twap(&self) -> Price {
        self.last_window_twap
    }

    #[inline]
    pub fn last_window_end(&self) -> Timestamp {
        self.last_window_end
    }

    #[inline]
    pub fn total_cumulative_price(&self) -> WideInt {
        self.total_cumulative_price
    }

    #[inline]
    pub fn last_window_end_cumulative_price(&self) -> WideInt {
        self.last_window_end_cumulative_price
    }

    #[inline]
    pub fn window_size(&self) -> u64 {
        self.window_size
    }

    #[inline]
    pub fn cap_step_ppm(&self) -> u64 {
        self.cap_step_ppm
    }

    #[inline]
    pub fn initial_price(&self) -> Price {
        self.initial_price
    }

    #[inline]
    pub fn accumulation_start(&self) -> Timestamp {
        self.accumulation_start
    }
}
