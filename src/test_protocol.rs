use num::bigint::RandBigInt;
use num::traits::Zero;
use num::{BigInt, BigUint};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::crypto::group::Group;
use crate::encode::slots;
use crate::options::{Options, ReverseAlignment};
use crate::schema::{
    BallotOutput, BallotRequest, CandidateSelection, CollectorQuestionShare, ElectionParameters,
    LocationShare, QuestionRequest,
};

const NUM_COLLECTORS: usize = 3;
const NUM_VOTERS: usize = 5;
const NUM_CANDIDATES: [usize; 2] = [3, 4];

/// Shares one collector hands out for one question across all voters. Ballot shares are drawn
/// so that, summed over voters, they cancel the verification shares mod `p - 1`.
fn collector_question_shares(
    rng: &mut impl Rng,
    group: &Group,
) -> Vec<CollectorQuestionShare> {
    let m = group.modulus();
    let mut shares = (0..NUM_VOTERS)
        .map(|_| CollectorQuestionShare {
            forward_verification_share: rng.gen_biguint_below(m),
            reverse_verification_share: rng.gen_biguint_below(m),
            forward_ballot_share: rng.gen_biguint_below(m),
            reverse_ballot_share: rng.gen_biguint_below(m),
        })
        .collect::<Vec<_>>();

    let balance = |shares: &[CollectorQuestionShare],
                   verification: fn(&CollectorQuestionShare) -> &BigUint,
                   ballot: fn(&CollectorQuestionShare) -> &BigUint| {
        let mut diff = BigInt::zero();
        for s in &shares[..NUM_VOTERS - 1] {
            diff += BigInt::from(verification(s).clone()) - BigInt::from(ballot(s).clone());
        }
        diff += BigInt::from(verification(&shares[NUM_VOTERS - 1]).clone());
        group.exponent(&diff).as_uint().clone()
    };

    let forward = balance(
        &shares,
        |s| &s.forward_verification_share,
        |s| &s.forward_ballot_share,
    );
    let reverse = balance(
        &shares,
        |s| &s.reverse_verification_share,
        |s| &s.reverse_ballot_share,
    );
    let last = &mut shares[NUM_VOTERS - 1];
    last.forward_ballot_share = forward;
    last.reverse_ballot_share = reverse;
    shares
}

fn sum_forward(ballots: &[&BallotOutput], group: &Group) -> BigUint {
    let total = ballots
        .iter()
        .fold(BigUint::zero(), |acc, b| acc + b.forward_ballot.as_uint());
    total % group.modulus()
}

#[test]
fn published_ballots_sum_to_the_tally() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let group = Group::modp_2048();

    // shares[question][collector][voter]
    let shares = NUM_CANDIDATES
        .iter()
        .map(|_| {
            (0..NUM_COLLECTORS)
                .map(|_| collector_question_shares(&mut rng, group))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    // voter i sits at location (2i + 1) mod 5, a permutation of the slots
    let locations = (0..NUM_VOTERS)
        .map(|i| (2 * i + 1) % NUM_VOTERS)
        .collect::<Vec<_>>();
    let selections = (0..NUM_VOTERS)
        .map(|_| {
            NUM_CANDIDATES
                .iter()
                .map(|&n| CandidateSelection::single(rng.gen_range(0..n)))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    let ballots = (0..NUM_VOTERS)
        .map(|voter| {
            // split the location into one random share per collector
            let mut location_shares = (0..NUM_COLLECTORS - 1)
                .map(|_| rng.gen_biguint_below(group.modulus()))
                .collect::<Vec<_>>();
            let partial = location_shares
                .iter()
                .fold(BigInt::zero(), |acc, s| acc - BigInt::from(s.clone()));
            location_shares.push(
                group
                    .exponent(&(partial + BigInt::from(locations[voter])))
                    .as_uint()
                    .clone(),
            );

            let request = BallotRequest {
                parameters: ElectionParameters {
                    prime: group.prime().clone(),
                    generator: group.generator().clone(),
                    num_registered: NUM_VOTERS,
                    num_candidates: NUM_CANDIDATES.to_vec(),
                },
                location_shares: location_shares.into_iter().map(LocationShare).collect(),
                questions: (0..NUM_CANDIDATES.len())
                    .map(|q| QuestionRequest {
                        selection: selections[voter][q].clone(),
                        collector_shares: (0..NUM_COLLECTORS)
                            .map(|c| shares[q][c][voter].clone())
                            .collect(),
                    })
                    .collect(),
            };
            let options = Options {
                reverse_alignment: ReverseAlignment::Mirrored,
                ..Options::default()
            };
            crate::cast(&request, &options).unwrap()
        })
        .collect::<Vec<_>>();

    for (q, &n) in NUM_CANDIDATES.iter().enumerate() {
        let question_ballots = ballots.iter().map(|b| &b[q]).collect::<Vec<_>>();
        let tally = sum_forward(&question_ballots, group);
        let decoded = slots(&tally, n, NUM_VOTERS).unwrap();

        for voter in 0..NUM_VOTERS {
            let expected = selections[voter][q].iter().collect::<Vec<_>>();
            let got = decoded[locations[voter]].iter().copied().collect::<Vec<_>>();
            assert_eq!(got, expected, "question {} voter {}", q, voter);
        }
    }
}
