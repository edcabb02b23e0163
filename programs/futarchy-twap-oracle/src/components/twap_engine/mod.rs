pub mod finalizer;
pub mod price_cap;
pub mod safe_math;
pub mod window_accumulator;

pub use finalizer::*;
pub use price_cap::*;
pub use safe_math::*;
pub use window_accumulator::AccumulationReport;
