use serde::{Deserialize, Serialize};
use std::fmt;

use super::answer::Answer;
use super::question::Question;
use crate::error::InvalidAnswer;

/// A policy for scoring a group's collective answers to one question.
///
/// Implementations return a value in `[0, 1]` and fail if any answer is not
/// valid for `question`.
pub trait Criterion: fmt::Debug + Send + Sync {
    fn name(&self) -> &str;

    fn score_answers(&self, question: &Question, answers: &[&Answer]) -> Result<f64, InvalidAnswer>;
}

/// Rewards groups whose answers are similar to each other.
///
/// The score is the mean similarity over every pair of answers. A lone answer
/// scores 1.0.
#[derive(Debug, Clone, Copy, Default)]
pub struct HomogeneousCriterion;

impl Criterion for HomogeneousCriterion {
    fn name(&self) -> &str {
        "homogeneous"
    }

    fn score_answers(&self, question: &Question, answers: &[&Answer]) -> Result<f64, InvalidAnswer> {
        validate_all(question, answers)?;
        mean_pairwise_similarity(question, answers)
    }
}

/// Rewards groups whose answers differ; `1 - homogeneous`. A lone answer
/// scores 0.0.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeterogeneousCriterion;

impl Criterion for HeterogeneousCriterion {
    fn name(&self) -> &str {
        "heterogeneous"
    }

    fn score_answers(&self, question: &Question, answers: &[&Answer]) -> Result<f64, InvalidAnswer> {
        validate_all(question, answers)?;
        Ok(1.0 - mean_pairwise_similarity(question, answers)?)
    }
}

/// Scores 0.0 if anyone gave an answer nobody else in the group gave,
/// otherwise 1.0.
#[derive(Debug, Clone, Copy, Default)]
pub struct LonelyMemberCriterion;

impl Criterion for LonelyMemberCriterion {
    fn name(&self) -> &str {
        "lonely_member"
    }

    fn score_answers(&self, question: &Question, answers: &[&Answer]) -> Result<f64, InvalidAnswer> {
        validate_all(question, answers)?;

        // Answers match when they mean the same thing, e.g. 5 and 5.0, or
        // the same checkbox set in a different order
        for (i, answer) in answers.iter().enumerate() {
            let mut shared = false;
            for (j, other) in answers.iter().enumerate() {
                if i != j && question.similarity(answer, other)? == 1.0 {
                    shared = true;
                    break;
                }
            }
            if !shared {
                return Ok(0.0);
            }
        }

        Ok(1.0)
    }
}

fn validate_all(question: &Question, answers: &[&Answer]) -> Result<(), InvalidAnswer> {
    answers.iter().try_for_each(|answer| question.check(answer))
}

fn mean_pairwise_similarity(question: &Question, answers: &[&Answer]) -> Result<f64, InvalidAnswer> {
    if answers.len() < 2 {
        return Ok(1.0);
    }

    let mut total = 0.0;
    let mut pairs = 0usize;
    for (i, first) in answers.iter().enumerate() {
        for second in &answers[i + 1..] {
            total += question.similarity(first, second)?;
            pairs += 1;
        }
    }

    Ok(total / pairs as f64)
}

/// Named criteria that can be selected from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CriterionKind {
    #[default]
    Homogeneous,
    Heterogeneous,
    LonelyMember,
}

impl CriterionKind {
    pub fn build(self) -> Box<dyn Criterion> {
        match self {
            CriterionKind::Homogeneous => Box::new(HomogeneousCriterion),
            CriterionKind::Heterogeneous => Box::new(HeterogeneousCriterion),
            CriterionKind::LonelyMember => Box::new(LonelyMemberCriterion),
        }
    }
}
