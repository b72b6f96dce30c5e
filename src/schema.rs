use num::traits::Zero;
use num::{BigInt, BigUint};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::convert::TryFrom;

use crate::crypto::group::{Element, Exponent, Group};
use crate::errors::Error;

/// The public cryptographic parameters of one election.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ElectionParameters {
    /// The prime modulus `p` of the field used for commitments.
    #[serde(with = "crate::serialize::big_uint")]
    pub prime: BigUint,

    /// A primitive root `g` modulo `p`.
    #[serde(with = "crate::serialize::big_uint")]
    pub generator: BigUint,

    /// The number of registered voters `R`, which is also the number of locations.
    pub num_registered: usize,

    /// The number of candidates `N` of each question, in question order.
    pub num_candidates: Vec<usize>,
}

impl ElectionParameters {
    pub fn group(&self) -> Result<Group, Error> {
        Group::new(self.prime.clone(), self.generator.clone())
    }
}

/// One collector's contribution to one question. Every value lies in `[0, p - 1)`.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct CollectorQuestionShare {
    /// Subtracted from the forward vector to derive the secret `s`.
    #[serde(with = "crate::serialize::big_uint")]
    pub forward_verification_share: BigUint,

    /// Subtracted from the reverse vector to derive the secret `s'`.
    #[serde(with = "crate::serialize::big_uint")]
    pub reverse_verification_share: BigUint,

    /// Added to `s` to form the published forward ballot.
    #[serde(with = "crate::serialize::big_uint")]
    pub forward_ballot_share: BigUint,

    /// Added to `s'` to form the published reverse ballot.
    #[serde(with = "crate::serialize::big_uint")]
    pub reverse_ballot_share: BigUint,
}

impl CollectorQuestionShare {
    /// The four shares, labelled, in field order.
    pub fn labelled(&self) -> [(&'static str, &BigUint); 4] {
        [
            ("forward verification share", &self.forward_verification_share),
            ("reverse verification share", &self.reverse_verification_share),
            ("forward ballot share", &self.forward_ballot_share),
            ("reverse ballot share", &self.reverse_ballot_share),
        ]
    }
}

/// One collector's share of a voter's location.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationShare(#[serde(with = "crate::serialize::big_uint")] pub BigUint);

/// The voter's private slot in the vote vector, the same for every question of an election.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncryptedLocation(#[serde(with = "crate::serialize::big_uint")] pub BigUint);

impl EncryptedLocation {
    /// Recombine the collectors' location shares: their sum modulo `p - 1`.
    pub fn from_shares(shares: &[LocationShare], group: &Group) -> EncryptedLocation {
        let total = shares
            .iter()
            .fold(BigUint::zero(), |acc, share| acc + &share.0);
        EncryptedLocation(group.exponent(&BigInt::from(total)).as_uint().clone())
    }
}

/// The candidate indices a voter chose for one question.
///
/// Usually exactly one, but the encoding handles any number, including none.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct CandidateSelection {
    candidates: BTreeSet<usize>,
}

impl CandidateSelection {
    /// Build a selection, rejecting an index chosen twice.
    pub fn new(candidates: Vec<usize>) -> Result<CandidateSelection, Error> {
        let mut set = BTreeSet::new();
        for c in candidates {
            if !set.insert(c) {
                return Err(Error::DuplicateCandidate(c));
            }
        }
        Ok(CandidateSelection { candidates: set })
    }

    pub fn single(candidate: usize) -> CandidateSelection {
        let mut candidates = BTreeSet::new();
        candidates.insert(candidate);
        CandidateSelection { candidates }
    }

    /// The chosen indices in increasing order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.candidates.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Check every index against the number of candidates on the question.
    pub fn check(&self, num_candidates: usize) -> Result<(), Error> {
        match self.candidates.iter().next_back() {
            Some(&index) if index >= num_candidates => Err(Error::CandidateOutOfRange {
                index,
                num_candidates,
            }),
            _ => Ok(()),
        }
    }
}

impl TryFrom<Vec<usize>> for CandidateSelection {
    type Error = Error;

    fn try_from(candidates: Vec<usize>) -> Result<Self, Self::Error> {
        CandidateSelection::new(candidates)
    }
}

impl From<CandidateSelection> for Vec<usize> {
    fn from(selection: CandidateSelection) -> Vec<usize> {
        selection.candidates.into_iter().collect()
    }
}

/// The two positional encodings of one vote.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct VotingVectorPair {
    #[serde(with = "crate::serialize::big_uint")]
    pub forward: BigUint,

    #[serde(with = "crate::serialize::big_uint")]
    pub reverse: BigUint,
}

/// The published result of one ballot computation.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct BallotOutput {
    /// `s + Σ forward ballot shares (mod p - 1)`
    pub forward_ballot: Exponent,

    /// `s' + Σ reverse ballot shares (mod p - 1)`
    pub reverse_ballot: Exponent,

    /// `g^s (mod p)`
    pub g_s: Element,

    /// `g^s' (mod p)`
    pub g_s_prime: Element,

    /// `g^(s s') (mod p)`
    pub g_s_s_prime: Element,
}

/// What the caller hands over for one voter: the election, the voter's location shares, and
/// per question the selection and every collector's shares.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct BallotRequest {
    pub parameters: ElectionParameters,

    /// One share per collector, summed modulo `p - 1` into the encrypted location.
    pub location_shares: Vec<LocationShare>,

    /// One entry per question, in the order of `parameters.num_candidates`.
    pub questions: Vec<QuestionRequest>,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct QuestionRequest {
    pub selection: CandidateSelection,

    /// Exactly one entry per collector.
    pub collector_shares: Vec<CollectorQuestionShare>,
}

/// A ballot as handed back to the caller for submission, with the voter's receipt.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Submission {
    #[serde(flatten)]
    pub ballot: BallotOutput,

    #[serde(with = "crate::serialize::hash")]
    pub receipt: BigUint,
}
