use tracing::error;

use crate::crypto::group::Group;
use crate::encode::field_width;
use crate::errors::{Error, ErrorContext};
use crate::schema::{BallotRequest, ElectionParameters, QuestionRequest};

/// Validate a whole ballot request, reporting every problem rather than only the first.
/// On success, returns the election's group.
pub fn check(r: &BallotRequest) -> Result<Group, Error> {
    let mut errs = vec![];
    let group = {
        let mut ctx = ErrorContext::new(&mut errs);

        let group = check_parameters(&mut ctx.scope("parameters"), &r.parameters);

        ctx.check(
            !r.location_shares.is_empty(),
            "no location shares supplied",
        );
        ctx.check(
            r.questions.len() == r.parameters.num_candidates.len(),
            &Error::QuestionCountMismatch {
                questions: r.questions.len(),
                expected: r.parameters.num_candidates.len(),
            }
            .to_string(),
        );

        for (i, (q, &num_candidates)) in r
            .questions
            .iter()
            .zip(&r.parameters.num_candidates)
            .enumerate()
        {
            check_question(
                &mut ctx.scope(&format!("question {}", i)),
                group.as_ref(),
                q,
                num_candidates,
                r.location_shares.len(),
            );
        }

        group
    };

    match group {
        Some(group) if errs.is_empty() => Ok(group),
        _ => {
            error!(errors = errs.len(), "ballot request failed validation");
            Err(Error::Invalid(errs))
        }
    }
}

fn check_parameters(ctx: &mut ErrorContext, p: &ElectionParameters) -> Option<Group> {
    ctx.check(p.num_registered > 0, "no registered voters");
    ctx.check(!p.num_candidates.is_empty(), "no questions");
    for (i, &n) in p.num_candidates.iter().enumerate() {
        ctx.scope(&format!("question {}", i))
            .check_result(field_width(n, p.num_registered.max(1)));
    }
    ctx.check_result(p.group())
}

fn check_question(
    ctx: &mut ErrorContext,
    group: Option<&Group>,
    q: &QuestionRequest,
    num_candidates: usize,
    num_collectors: usize,
) {
    ctx.scope("selection")
        .check_result(q.selection.check(num_candidates));
    if q.collector_shares.is_empty() {
        ctx.check(false, &Error::MissingCollectorShares.to_string());
    } else {
        // Each collector contributed one location share.
        ctx.check(
            num_collectors == 0 || q.collector_shares.len() == num_collectors,
            &Error::CollectorCountMismatch {
                shares: q.collector_shares.len(),
                collectors: num_collectors,
            }
            .to_string(),
        );
    }

    // Share ranges depend on the modulus, so they can only be checked against a valid group.
    if let Some(group) = group {
        for (c, share) in q.collector_shares.iter().enumerate() {
            let mut ctx = ctx.scope(&format!("collector {}", c));
            for &(kind, value) in share.labelled().iter() {
                ctx.check(
                    value < group.modulus(),
                    &format!("{} is not below the modulus", kind),
                );
            }
        }
    }
}
