//! Voter-side computation for a collector-blinded, publicly verifiable e-voting protocol
//! (Zou et al., 2017).
//!
//! A voter's selection for a question is placed in their secret slot of two positional vote
//! vectors ([`encode`]), which are then blinded with every collector's shares and committed to
//! ([`ballot`]). [`cast`] runs both for every question of an election.

pub mod ballot;
pub mod cast;
pub mod check;
pub mod crypto;
pub mod encode;
pub mod errors;
pub mod options;
pub mod schema;
pub mod serialize;

pub use cast::cast;
pub use errors::Error;
pub use options::Options;

#[cfg(test)]
mod test_protocol;
