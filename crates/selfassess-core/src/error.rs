//! Survey error types.
//!
//! Every rejected engine operation returns one of these and leaves the
//! engine state untouched.

use thiserror::Error;

/// Errors that can occur when driving a survey.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurveyError {
    /// A section argument outside `1..=5`.
    #[error("invalid section {0}: sections are numbered 1 to 5")]
    InvalidSection(u32),

    /// A rating value outside `0..=3`, or a question index outside `1..=30`.
    #[error("invalid answer {value} for question {question}: questions are 1 to 30, ratings 0 to 3")]
    InvalidRating { question: u32, value: u32 },

    /// Attempt to advance or finalize while the gating section has unanswered questions.
    #[error("please answer all questions in part {section} before proceeding ({answered}/{total} answered)")]
    IncompleteSection {
        section: u32,
        answered: usize,
        total: usize,
    },

    /// Attempt to move before section 1 or past section 5.
    #[error("cannot move from part {from} to part {to}: parts range from 1 to 5")]
    Boundary { from: u32, to: i64 },

    /// A persisted snapshot that failed validation.
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// A total score with no interpretation band.
    #[error("score {0} is outside the 0 to 90 range")]
    ScoreOutOfRange(u32),
}

impl SurveyError {
    /// Returns `true` if the error is a validation message meant for the
    /// person taking the survey rather than a caller bug.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            SurveyError::IncompleteSection { .. } | SurveyError::Boundary { .. }
        )
    }
}
