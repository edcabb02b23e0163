use anchor_lang::prelude::*;

#[error_code]
pub enum OracleError {
    #[msg("Cap step must be between 1 and 1_000_000 parts per million")]
    InvalidCapStepPpm,
    #[msg("Initial price must be non-zero")]
    ZeroInitialPrice,
    #[msg("Window size must be non-zero")]
    InvalidWindowSize,
    #[msg("Genesis timestamp plus start delay overflows the oracle clock")]
    InvalidStartDelay,
    #[msg("Observation timestamp is older than the oracle clock")]
    TimestampRegression,
    #[msg("Oracle clock is behind the last finalized window")]
    ClockBehindWindowEnd,
    #[msg("Cluster clock reported a negative timestamp")]
    InvalidClock,
    #[msg("Accumulation did not advance the oracle clock to the requested timestamp")]
    AccumulationPostconditionFailed,
    #[msg("Cumulative price integral moved backwards")]
    CumulativeRegression,
    #[msg("Wide arithmetic result does not fit its target type")]
    ArithmeticOverflow,
    #[msg("No accumulated time to average over yet")]
    TwapNotReady,
}

/// Coarse classification of oracle failures.
///
/// Callers (and tests) care about which side is at fault: a bad configuration,
/// an out-of-order caller, or a bug inside the accumulator itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Sequence,
    InternalInvariant,
    Arithmetic,
    Read,
}

impl OracleError {
    pub fn category(self) -> ErrorCategory {
        match self {
            OracleError::InvalidCapStepPpm
            | OracleError::ZeroInitialPrice
            | OracleError::InvalidWindowSize
            | OracleError::InvalidStartDelay => ErrorCategory::Configuration,
            OracleError::TimestampRegression
            | OracleError::ClockBehindWindowEnd
            | OracleError::InvalidClock => ErrorCategory::Sequence,
            OracleError::AccumulationPostconditionFailed | OracleError::CumulativeRegression => {
                ErrorCategory::InternalInvariant
            }
            OracleError::ArithmeticOverflow => ErrorCategory::Arithmetic,
            OracleError::TwapNotReady => ErrorCategory::Read,
        }
    }
}
