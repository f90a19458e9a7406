use thiserror::Error;

/// Conditions the scoring core refuses to paper over.
///
/// Everything else (bad attendance, corrupt weights, too few labels) degrades
/// to a defined fallback instead of an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    #[error("need {required} feedback entries to score, only have {actual}")]
    InsufficientFeedback { required: usize, actual: usize },
}
