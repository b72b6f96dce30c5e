//! Positional encoding of a vote.
//!
//! The field has `N * R` bits: `R` slots of `N` bits, one slot per location. A voter at
//! location `L` who picks candidate `c` sets bit `L*N + c` of the forward vector. The reverse
//! vector holds the same pattern with the candidate order flipped, placed in the slot mirrored
//! from the top of the field. Summing forward vectors over all voters counts the votes for each
//! candidate per slot; the reverse sums are an independent cross-check.

use num::traits::{ToPrimitive, Zero};
use num::BigUint;
use std::collections::BTreeSet;
use tracing::{debug, instrument};

use crate::crypto::arith::bit_length;
use crate::errors::Error;
use crate::options::ReverseAlignment;
use crate::schema::{CandidateSelection, EncryptedLocation, VotingVectorPair};

/// Encode a selection at a location into its forward and reverse vectors.
#[instrument(skip_all)]
pub fn encode(
    selection: &CandidateSelection,
    location: &EncryptedLocation,
    num_candidates: usize,
    num_registered: usize,
    alignment: ReverseAlignment,
) -> Result<VotingVectorPair, Error> {
    let total_bits = field_width(num_candidates, num_registered)?;
    selection.check(num_candidates)?;
    let slot = slot_index(location, num_registered)?;

    if selection.is_empty() {
        return Ok(VotingVectorPair {
            forward: BigUint::zero(),
            reverse: BigUint::zero(),
        });
    }

    // `slot < R` and `N * R` fits, so this does too
    let bit_shift = slot * num_candidates;

    let forward = forward_pattern(selection) << bit_shift;

    let reverse_bits_set = reverse_pattern(selection, num_candidates);
    let pattern_width = match alignment {
        ReverseAlignment::SlotTop => bit_length(&reverse_bits_set) as usize,
        ReverseAlignment::Mirrored => num_candidates,
    };
    // Non-negative: the pattern is at most `N` bits and `bit_shift <= N*R - N`.
    let reverse = reverse_bits_set << (total_bits - (bit_shift + pattern_width));

    // Vector widths would reveal the location, so only public sizes are logged.
    debug!(
        total_bits,
        candidates = selection.len(),
        "encoded vote vectors"
    );

    Ok(VotingVectorPair { forward, reverse })
}

/// One bit per chosen candidate, candidate 0 in the lowest bit.
fn forward_pattern(selection: &CandidateSelection) -> BigUint {
    selection
        .iter()
        .fold(BigUint::zero(), |acc, c| acc | (BigUint::from(1_u8) << c))
}

/// One bit per chosen candidate, candidate 0 in the highest of the `N` bits.
fn reverse_pattern(selection: &CandidateSelection, num_candidates: usize) -> BigUint {
    selection.iter().fold(BigUint::zero(), |acc, c| {
        acc | (BigUint::from(1_u8) << (num_candidates - (c + 1)))
    })
}

/// Split a forward vector (or a sum of forward vectors that never carried across slots) back
/// into the candidate bits of each slot, lowest location first.
pub fn slots(
    vector: &BigUint,
    num_candidates: usize,
    num_registered: usize,
) -> Result<Vec<BTreeSet<usize>>, Error> {
    let width = field_width(num_candidates, num_registered)?;
    let bits = vector.bits();
    if bits > width as u64 {
        return Err(Error::VectorTooWide { bits, width });
    }

    Ok((0..num_registered)
        .map(|slot| {
            (0..num_candidates)
                .filter(|c| vector.bit((slot * num_candidates + c) as u64))
                .collect()
        })
        .collect())
}

/// The width `N * R` of the vote vector field.
pub fn field_width(num_candidates: usize, num_registered: usize) -> Result<usize, Error> {
    if num_candidates == 0 || num_registered == 0 {
        return Err(Error::EmptyField {
            num_candidates,
            num_registered,
        });
    }
    num_candidates
        .checked_mul(num_registered)
        .ok_or(Error::FieldTooWide {
            num_candidates,
            num_registered,
        })
}

fn slot_index(location: &EncryptedLocation, num_registered: usize) -> Result<usize, Error> {
    match location.0.to_usize() {
        Some(slot) if slot < num_registered => Ok(slot),
        _ => Err(Error::LocationOutOfRange { num_registered }),
    }
}
