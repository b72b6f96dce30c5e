//! Blinding a voter's vote vectors with the collectors' shares, and committing to the result.
//!
//! With `V`/`V'` the forward/reverse vectors and `p` the election prime:
//!
//! * `s  = V  - Σ forward verification shares (mod p - 1)`
//! * `s' = V' - Σ reverse verification shares (mod p - 1)`
//! * published ballots `s + Σ forward ballot shares` and `s' + Σ reverse ballot shares`,
//!   both mod `p - 1`
//! * commitments `g^s`, `g^s'` and `g^(s s')`, mod `p`
//!
//! Anyone holding `g^s` and `g^s'` can relate them through `g^(s s')` without learning either
//! secret.

use num::{BigInt, BigUint};
use sha2::Sha256;
use tracing::{debug, error, instrument, warn};

use crate::crypto::group::{Exponent, Group};
use crate::crypto::hash::hash_uints;
use crate::errors::Error;
use crate::options::ReverseVerification;
use crate::schema::{BallotOutput, CollectorQuestionShare, Submission, VotingVectorPair};

/// The voter's blinded secrets for one question. These never leave the voter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Secrets {
    pub secret: Exponent,
    pub secret_prime: Exponent,
}

/// Plain integer sums of the collectors' shares, taken before any reduction.
#[derive(Debug, Default)]
struct ShareTotals {
    forward_verification: BigUint,
    reverse_verification: BigUint,
    forward_ballot: BigUint,
    reverse_ballot: BigUint,
}

impl ShareTotals {
    fn sum(shares: &[CollectorQuestionShare], verification: ReverseVerification) -> ShareTotals {
        let mut totals = ShareTotals::default();
        for share in shares {
            totals.forward_verification += &share.forward_verification_share;
            totals.reverse_verification += match verification {
                ReverseVerification::ReverseShares => &share.reverse_verification_share,
                ReverseVerification::ForwardShares => &share.forward_verification_share,
            };
            totals.forward_ballot += &share.forward_ballot_share;
            totals.reverse_ballot += &share.reverse_ballot_share;
        }
        totals
    }
}

/// Compute the published ballot for one question.
pub fn compute(
    vectors: &VotingVectorPair,
    group: &Group,
    shares: &[CollectorQuestionShare],
    verification: ReverseVerification,
) -> Result<BallotOutput, Error> {
    compute_with_secrets(vectors, group, shares, verification).map(|(ballot, _)| ballot)
}

/// Compute the published ballot for one question, also returning the secrets it was derived
/// from.
#[instrument(skip_all, err, fields(collectors = shares.len()))]
pub fn compute_with_secrets(
    vectors: &VotingVectorPair,
    group: &Group,
    shares: &[CollectorQuestionShare],
    verification: ReverseVerification,
) -> Result<(BallotOutput, Secrets), Error> {
    check_shares(group, shares)?;
    if verification == ReverseVerification::ForwardShares {
        warn!("reverse secret derived from forward verification shares");
    }

    let totals = ShareTotals::sum(shares, verification);

    let secret = group.exponent(&(int(&vectors.forward) - int(&totals.forward_verification)));
    let secret_prime =
        group.exponent(&(int(&vectors.reverse) - int(&totals.reverse_verification)));

    // The exponent of the cross term is the product itself, not its residue.
    let g_s = group.gen_pow(secret.as_uint());
    let g_s_prime = group.gen_pow(secret_prime.as_uint());
    let g_s_s_prime = group.gen_pow(&(secret.as_uint() * secret_prime.as_uint()));

    let forward_ballot = group.exponent(&(int(secret.as_uint()) + int(&totals.forward_ballot)));
    let reverse_ballot =
        group.exponent(&(int(secret_prime.as_uint()) + int(&totals.reverse_ballot)));

    debug!(modulus_bits = group.modulus().bits(), "computed ballot");

    let ballot = BallotOutput {
        forward_ballot,
        reverse_ballot,
        g_s,
        g_s_prime,
        g_s_s_prime,
    };
    let secrets = Secrets {
        secret,
        secret_prime,
    };
    Ok((ballot, secrets))
}

/// Every collector must be present, and every share must be a residue mod `p - 1`.
fn check_shares(group: &Group, shares: &[CollectorQuestionShare]) -> Result<(), Error> {
    if shares.is_empty() {
        error!("no collector shares supplied");
        return Err(Error::MissingCollectorShares);
    }
    for (collector, share) in shares.iter().enumerate() {
        for &(kind, value) in share.labelled().iter() {
            if value >= group.modulus() {
                error!(collector, kind, "collector share out of range");
                return Err(Error::ShareOutOfRange { collector, kind });
            }
        }
    }
    Ok(())
}

fn int(x: &BigUint) -> BigInt {
    BigInt::from(x.clone())
}

impl BallotOutput {
    /// The Diffie-Hellman cross-check `(g^s)^s' = g^(s s') = (g^s')^s (mod p)`.
    pub fn check_commitments(&self, group: &Group, secrets: &Secrets) -> bool {
        let left = group.pow(&self.g_s, secrets.secret_prime.as_uint());
        let right = group.pow(&self.g_s_prime, secrets.secret.as_uint());
        left == self.g_s_s_prime && right == self.g_s_s_prime
    }

    /// A SHA-256 fingerprint of the five published values, in publication order.
    pub fn receipt(&self) -> BigUint {
        hash_uints::<Sha256>(&[
            self.forward_ballot.as_uint(),
            self.reverse_ballot.as_uint(),
            self.g_s.as_uint(),
            self.g_s_prime.as_uint(),
            self.g_s_s_prime.as_uint(),
        ])
    }

    pub fn into_submission(self) -> Submission {
        let receipt = self.receipt();
        Submission {
            ballot: self,
            receipt,
        }
    }
}
