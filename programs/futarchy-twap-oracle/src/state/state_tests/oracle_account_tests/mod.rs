//! Zero-copy account image of the oracle and the instruction-level paths that
//! read and write it.

pub mod layout_zero_copy;
