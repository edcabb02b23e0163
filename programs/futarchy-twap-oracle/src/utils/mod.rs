pub mod clock;
pub mod constants;
pub mod events;

pub use clock::*;
