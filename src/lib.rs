//! Score how well groups of people fit together, based on their answers to a
//! survey whose questions carry configurable criteria and weights.

pub mod config;
pub mod error;
pub mod grouping;
pub mod output;
pub mod roster;
pub mod session;
pub mod survey;

pub use error::{InvalidAnswer, QuestionError, RosterError, SurveyError};
