use thiserror::Error;

use crate::roster::StudentId;
use crate::survey::QuestionId;

/// Errors raised while constructing a question.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuestionError {
    #[error("question text must not be empty")]
    EmptyText,

    #[error("a choice question needs at least 2 options, got {count}")]
    TooFewOptions { count: usize },

    #[error("duplicate option '{0}'")]
    DuplicateOption(String),

    #[error("numeric bounds are inverted: min {min} must be less than max {max}")]
    InvertedBounds { min: i64, max: i64 },
}

/// An answer that does not fit the shape or range of the question it is
/// compared against.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("invalid answer for question {question_id}: {reason}")]
pub struct InvalidAnswer {
    pub question_id: QuestionId,
    pub reason: String,
}

impl InvalidAnswer {
    pub fn new(question_id: QuestionId, reason: impl Into<String>) -> Self {
        Self {
            question_id,
            reason: reason.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SurveyError {
    #[error("question id {0} appears more than once")]
    DuplicateQuestion(QuestionId),
}

/// Roster and grouping bookkeeping errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RosterError {
    #[error("student name must not be empty (id {0})")]
    EmptyName(StudentId),

    #[error("student id {0} is already enrolled")]
    DuplicateStudent(StudentId),

    #[error("no student with id {0} is enrolled")]
    UnknownStudent(StudentId),
}
