pub mod accumulate_observation;
pub mod initialize_oracle;
pub mod read_twap;

pub use accumulate_observation::*;
pub use initialize_oracle::*;
pub use read_twap::*;
