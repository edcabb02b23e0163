/// Cap step constants
pub const PPM_SCALE: u64 = 1_000_000;
pub const MIN_CAP_STEP_PPM: u64 = 1; // anything lower would freeze the oracle
pub const MAX_CAP_STEP_PPM: u64 = PPM_SCALE; // 100% per window

/// Window constants (milliseconds)
pub const DEFAULT_WINDOW_SIZE_MS: u64 = 60_000;
pub const MILLIS_PER_SECOND: u64 = 1_000;

/// Prices are quote units per base unit scaled by 1e12.
pub const PRICE_SCALE: u128 = 1_000_000_000_000;

/// Account layout version
pub const ORACLE_VERSION_MAJOR: u8 = 0;
pub const ORACLE_VERSION_MINOR: u8 = 1;
pub const ORACLE_VERSION_PATCH: u8 = 0;

/// PDA seed constants
pub const ORACLE_SEED: &[u8] = b"twap_oracle";
