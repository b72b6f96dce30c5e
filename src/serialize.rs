//! `serde` adapters for big integers on the wire.

pub mod big_uint;
pub mod hash;
