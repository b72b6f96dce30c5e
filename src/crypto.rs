//! Arbitrary-precision arithmetic over an election's prime field.

pub mod arith;
pub mod group;
pub mod hash;
