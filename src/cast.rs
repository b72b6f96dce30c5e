use tracing::{info, instrument};

use crate::ballot;
use crate::check::check;
use crate::encode::encode;
use crate::errors::Error;
use crate::options::Options;
use crate::schema::{BallotOutput, BallotRequest, EncryptedLocation};

/// Compute one voter's ballot for every question of an election.
///
/// The whole request is validated up front, so either every question yields a ballot or none
/// does.
#[instrument(skip_all, fields(questions = request.questions.len()))]
pub fn cast(request: &BallotRequest, options: &Options) -> Result<Vec<BallotOutput>, Error> {
    let group = check(request)?;
    let location = EncryptedLocation::from_shares(&request.location_shares, &group);
    let num_registered = request.parameters.num_registered;

    let ballots = request
        .questions
        .iter()
        .zip(&request.parameters.num_candidates)
        .map(|(question, &num_candidates)| {
            let vectors = encode(
                &question.selection,
                &location,
                num_candidates,
                num_registered,
                options.reverse_alignment,
            )?;
            ballot::compute(
                &vectors,
                &group,
                &question.collector_shares,
                options.reverse_verification,
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    info!(
        collectors = request.location_shares.len(),
        "computed ballots"
    );
    Ok(ballots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ReverseAlignment;
    use crate::schema::{
        CandidateSelection, CollectorQuestionShare, ElectionParameters, LocationShare,
        QuestionRequest,
    };
    use num::BigUint;

    fn zero_share() -> CollectorQuestionShare {
        CollectorQuestionShare {
            forward_verification_share: BigUint::from(0_u8),
            reverse_verification_share: BigUint::from(0_u8),
            forward_ballot_share: BigUint::from(0_u8),
            reverse_ballot_share: BigUint::from(0_u8),
        }
    }

    fn request(location_shares: &[u32]) -> BallotRequest {
        BallotRequest {
            parameters: ElectionParameters {
                prime: BigUint::from(23_u8),
                generator: BigUint::from(5_u8),
                num_registered: 3,
                num_candidates: vec![2],
            },
            location_shares: location_shares
                .iter()
                .map(|&s| LocationShare(BigUint::from(s)))
                .collect(),
            questions: vec![QuestionRequest {
                selection: CandidateSelection::single(0),
                collector_shares: vec![zero_share(), zero_share()],
            }],
        }
    }

    #[test]
    fn single_question() {
        let ballots = cast(&request(&[8, 15]), &Options::default()).unwrap();
        assert_eq!(ballots.len(), 1);
        assert_eq!(*ballots[0].forward_ballot.as_uint(), BigUint::from(4_u8));
        assert_eq!(*ballots[0].reverse_ballot.as_uint(), BigUint::from(8_u8));
        assert_eq!(*ballots[0].g_s.as_uint(), BigUint::from(4_u8));
    }

    #[test]
    fn alignment_option_is_applied() {
        // Candidate 0 sets the top bit of its slot either way; candidate 1 does not.
        let mut r = request(&[1, 0]);
        r.questions[0].selection = CandidateSelection::single(1);
        let options = Options {
            reverse_alignment: ReverseAlignment::Mirrored,
            ..Options::default()
        };
        let slot_top = cast(&r, &Options::default()).unwrap();
        let mirrored = cast(&r, &options).unwrap();
        assert_eq!(slot_top[0].forward_ballot, mirrored[0].forward_ballot);
        assert_ne!(slot_top[0].reverse_ballot, mirrored[0].reverse_ballot);
    }

    #[test]
    fn location_outside_the_field() {
        // 2 + 3 = 5 (mod 22), but there are only three locations
        let err = cast(&request(&[2, 3]), &Options::default()).unwrap_err();
        assert!(matches!(err, Error::LocationOutOfRange { .. }));
    }

    #[test]
    fn partial_collector_set_is_rejected() {
        let mut r = request(&[1, 0, 0]);
        r.questions[0].collector_shares.truncate(1);
        match cast(&r, &Options::default()) {
            Err(Error::Invalid(errs)) => assert_eq!(
                errs,
                vec!["in question 0: 1 collector shares supplied for 3 collectors".to_owned()]
            ),
            other => panic!("partial collector set accepted: {:?}", other),
        }
    }

    #[test]
    fn invalid_request_computes_nothing() {
        let mut r = request(&[1, 0]);
        r.questions[0].collector_shares.clear();
        assert!(matches!(
            cast(&r, &Options::default()),
            Err(Error::Invalid(_))
        ));
    }
}
