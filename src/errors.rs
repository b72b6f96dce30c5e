use thiserror::Error;

/// Caller contract violations. None of these are retryable: the inputs are wrong, and a ballot
/// computed from them would not verify.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid group: {0}")]
    InvalidGroup(&'static str),

    #[error("vote vector field is empty: {num_candidates} candidates, {num_registered} registered voters")]
    EmptyField {
        num_candidates: usize,
        num_registered: usize,
    },

    #[error("vote vector field is too wide: {num_candidates} candidates x {num_registered} registered voters")]
    FieldTooWide {
        num_candidates: usize,
        num_registered: usize,
    },

    #[error("candidate index {index} out of range for {num_candidates} candidates")]
    CandidateOutOfRange { index: usize, num_candidates: usize },

    #[error("candidate index {0} selected more than once")]
    DuplicateCandidate(usize),

    /// Carries no location: it is the voter's secret.
    #[error("encrypted location out of range for {num_registered} registered voters")]
    LocationOutOfRange { num_registered: usize },

    #[error("no collector shares supplied")]
    MissingCollectorShares,

    #[error("{shares} collector shares supplied for {collectors} collectors")]
    CollectorCountMismatch { shares: usize, collectors: usize },

    #[error("{kind} of collector {collector} is not below the modulus")]
    ShareOutOfRange {
        collector: usize,
        kind: &'static str,
    },

    #[error("{questions} questions supplied for an election with {expected}")]
    QuestionCountMismatch { questions: usize, expected: usize },

    #[error("vote vector has {bits} bits, wider than its {width}-bit field")]
    VectorTooWide { bits: u64, width: usize },

    #[error("invalid ballot request:\n{}", .0.join("\n"))]
    Invalid(Vec<String>),
}

/// Collects validation failures, prefixing each with the path of scopes it was found in.
pub struct ErrorContext<'a> {
    errs: &'a mut Vec<String>,
    prefix: String,
}

impl<'a> ErrorContext<'a> {
    pub fn new(errs: &'a mut Vec<String>) -> ErrorContext<'a> {
        ErrorContext {
            errs,
            prefix: String::new(),
        }
    }

    pub fn check(&mut self, cond: bool, msg: &str) {
        if !cond {
            self.errs.push(format!("{}{}", self.prefix, msg));
        }
    }

    /// Record the error of a fallible check, if any.
    pub fn check_result<T>(&mut self, result: Result<T, Error>) -> Option<T> {
        match result {
            Ok(val) => Some(val),
            Err(err) => {
                self.errs.push(format!("{}{}", self.prefix, err));
                None
            }
        }
    }

    pub fn scope<'b>(&'b mut self, desc: &str) -> ErrorContext<'b> {
        ErrorContext {
            errs: &mut *self.errs,
            prefix: format!("{}in {}: ", self.prefix, desc),
        }
    }
}
