pub mod answer;
pub mod criterion;
pub mod engine;
pub mod question;

pub use answer::{Answer, AnswerContent};
pub use criterion::{
    Criterion, CriterionKind, HeterogeneousCriterion, HomogeneousCriterion, LonelyMemberCriterion,
};
pub use engine::{Normalization, QuestionScore, ScoreResult, Survey};
pub use question::{Choices, Question, QuestionId, QuestionKind};
