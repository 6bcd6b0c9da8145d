use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, warn};

use super::answer::Answer;
use super::criterion::{Criterion, HomogeneousCriterion};
use super::question::{Question, QuestionId};
use crate::error::{InvalidAnswer, SurveyError};
use crate::roster::Respondent;

const DEFAULT_WEIGHT: u32 = 1;

/// How the sum of weighted per-question scores is turned into one score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Normalization {
    /// Divide by the number of questions. Weights scale the result.
    #[default]
    QuestionCount,
    /// Divide by the sum of weights. Uniformly scaling weights has no effect.
    TotalWeight,
}

/// One registered question together with its scoring configuration.
#[derive(Debug)]
struct SurveyEntry {
    question: Question,
    criterion: Box<dyn Criterion>,
    weight: u32,
}

/// The questions used to judge group quality, each with a criterion and a
/// positive weight.
#[derive(Debug)]
pub struct Survey {
    entries: Vec<SurveyEntry>,
    index: HashMap<QuestionId, usize>,
    normalization: Normalization,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionScore {
    pub question_id: QuestionId,
    pub criterion: String,
    pub raw: f64,      // Criterion result in [0, 1]
    pub weight: u32,
    pub weighted: f64, // raw * weight
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreResult {
    pub score: f64,
    /// Set when an invalid or missing answer zeroed the whole score
    pub invalid: Option<InvalidAnswer>,
    pub breakdown: Vec<QuestionScore>,
}

impl ScoreResult {
    fn zero() -> Self {
        Self {
            score: 0.0,
            invalid: None,
            breakdown: Vec::new(),
        }
    }
}

impl Survey {
    /// Register every question with the homogeneous criterion and weight 1.
    pub fn new(questions: impl IntoIterator<Item = Question>) -> Result<Self, SurveyError> {
        let mut entries = Vec::new();
        let mut index = HashMap::new();

        for question in questions {
            if index.insert(question.id(), entries.len()).is_some() {
                return Err(SurveyError::DuplicateQuestion(question.id()));
            }
            entries.push(SurveyEntry {
                question,
                criterion: Box::new(HomogeneousCriterion),
                weight: DEFAULT_WEIGHT,
            });
        }

        Ok(Self {
            entries,
            index,
            normalization: Normalization::default(),
        })
    }

    pub fn with_normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }

    pub fn normalization(&self) -> Normalization {
        self.normalization
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether a question with the same id is registered
    pub fn contains(&self, question: &Question) -> bool {
        self.index.contains_key(&question.id())
    }

    /// Registered questions in registration order
    pub fn questions(&self) -> Vec<&Question> {
        self.entries.iter().map(|e| &e.question).collect()
    }

    pub fn weight(&self, question: &Question) -> Option<u32> {
        self.entry(question).map(|e| e.weight)
    }

    pub fn criterion(&self, question: &Question) -> Option<&dyn Criterion> {
        self.entry(question).map(|e| e.criterion.as_ref())
    }

    /// Set the weight for `question`.
    ///
    /// Returns false and changes nothing if the question is not registered or
    /// `weight` is zero.
    pub fn set_weight(&mut self, weight: u32, question: &Question) -> bool {
        if weight == 0 {
            warn!(question_id = question.id(), "ignoring zero weight");
            return false;
        }
        match self.entry_mut(question) {
            Some(entry) => {
                entry.weight = weight;
                true
            }
            None => false,
        }
    }

    /// Set the criterion for `question`.
    ///
    /// Returns false and changes nothing if the question is not registered.
    pub fn set_criterion(&mut self, criterion: Box<dyn Criterion>, question: &Question) -> bool {
        match self.entry_mut(question) {
            Some(entry) => {
                entry.criterion = criterion;
                true
            }
            None => false,
        }
    }

    fn entry(&self, question: &Question) -> Option<&SurveyEntry> {
        self.index.get(&question.id()).map(|&i| &self.entries[i])
    }

    fn entry_mut(&mut self, question: &Question) -> Option<&mut SurveyEntry> {
        let i = *self.index.get(&question.id())?;
        self.entries.get_mut(i)
    }

    /// Quality score for one group of people.
    ///
    /// Never fails: an empty survey scores 0.0, and so does a group in which
    /// any member has an invalid or missing answer to any question.
    pub fn score_students<'a, R>(&self, people: impl IntoIterator<Item = &'a R>) -> f64
    where
        R: Respondent + ?Sized + 'a,
    {
        self.score_breakdown(people).score
    }

    /// Like [`Survey::score_students`], keeping the per-question detail.
    pub fn score_breakdown<'a, R>(&self, people: impl IntoIterator<Item = &'a R>) -> ScoreResult
    where
        R: Respondent + ?Sized + 'a,
    {
        if self.entries.is_empty() {
            return ScoreResult::zero();
        }

        let people: Vec<&R> = people.into_iter().collect();
        match self.weighted_scores(&people) {
            Ok(breakdown) => {
                let total: f64 = breakdown.iter().map(|s| s.weighted).sum();
                let divisor = match self.normalization {
                    Normalization::QuestionCount => breakdown.len() as f64,
                    Normalization::TotalWeight => {
                        breakdown.iter().map(|s| f64::from(s.weight)).sum()
                    }
                };
                ScoreResult {
                    score: total / divisor,
                    invalid: None,
                    breakdown,
                }
            }
            Err(invalid) => {
                warn!(
                    question_id = invalid.question_id,
                    reason = %invalid.reason,
                    "invalid answer, group scores 0"
                );
                ScoreResult {
                    invalid: Some(invalid),
                    ..ScoreResult::zero()
                }
            }
        }
    }

    fn weighted_scores<R>(&self, people: &[&R]) -> Result<Vec<QuestionScore>, InvalidAnswer>
    where
        R: Respondent + ?Sized,
    {
        let mut scores = Vec::with_capacity(self.entries.len());

        for entry in &self.entries {
            let question = &entry.question;
            let answers = people
                .iter()
                .map(|person| {
                    person
                        .answer_for(question)
                        .ok_or_else(|| InvalidAnswer::new(question.id(), "a group member has no answer"))
                })
                .collect::<Result<Vec<&Answer>, _>>()?;

            let raw = entry.criterion.score_answers(question, &answers)?;
            let weighted = raw * f64::from(entry.weight);
            debug!(
                question_id = question.id(),
                criterion = entry.criterion.name(),
                raw,
                weighted,
                "scored question"
            );

            scores.push(QuestionScore {
                question_id: question.id(),
                criterion: entry.criterion.name().to_string(),
                raw,
                weight: entry.weight,
                weighted,
            });
        }

        Ok(scores)
    }

    /// Mean of [`Survey::score_students`] over every group; 0.0 when there
    /// are no groups.
    pub fn score_grouping<'a, G, R>(&self, grouping: G) -> f64
    where
        G: IntoIterator,
        G::Item: IntoIterator<Item = &'a R>,
        R: Respondent + ?Sized + 'a,
    {
        let mut total = 0.0;
        let mut groups = 0usize;
        for group in grouping {
            total += self.score_students(group);
            groups += 1;
        }

        if groups == 0 {
            return 0.0;
        }
        total / groups as f64
    }
}

impl fmt::Display for Survey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", entry.question)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::Student;
    use crate::survey::{HeterogeneousCriterion, LonelyMemberCriterion};

    fn sleep() -> Question {
        Question::numeric(1, "Hours of sleep?", 0, 10).unwrap()
    }

    fn early() -> Question {
        Question::yes_no(2, "Early riser?").unwrap()
    }

    fn student(id: u32, hours: i64, early_riser: bool) -> Student {
        let mut s = Student::new(id, format!("student-{}", id));
        s.set_answer(&sleep(), Answer::new(hours));
        s.set_answer(&early(), Answer::new(early_riser));
        s
    }

    #[test]
    fn test_empty_survey_scores_zero() {
        let survey = Survey::new(Vec::new()).unwrap();
        let people = [student(1, 2, true), student(2, 8, false)];
        assert_eq!(survey.score_students(&people), 0.0);
        assert!(survey.is_empty());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let other = Question::yes_no(1, "Same id").unwrap();
        let result = Survey::new(vec![sleep(), other]);
        assert_eq!(result.unwrap_err(), SurveyError::DuplicateQuestion(1));
    }

    #[test]
    fn test_questions_in_registration_order() {
        let survey = Survey::new(vec![early(), sleep()]).unwrap();
        let ids: Vec<_> = survey.questions().iter().map(|q| q.id()).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(survey.len(), 2);
        assert!(survey.contains(&sleep()));
    }

    #[test]
    fn test_defaults() {
        let survey = Survey::new(vec![sleep()]).unwrap();
        assert_eq!(survey.weight(&sleep()), Some(1));
        assert_eq!(survey.criterion(&sleep()).map(|c| c.name()), Some("homogeneous"));
        assert_eq!(survey.weight(&early()), None);
    }

    #[test]
    fn test_set_weight_unregistered() {
        let mut survey = Survey::new(vec![sleep()]).unwrap();
        assert!(!survey.set_weight(3, &early()));
        assert_eq!(survey.weight(&sleep()), Some(1));
        assert_eq!(survey.weight(&early()), None);
    }

    #[test]
    fn test_set_weight_registered() {
        let mut survey = Survey::new(vec![sleep()]).unwrap();
        assert!(survey.set_weight(3, &sleep()));
        assert_eq!(survey.weight(&sleep()), Some(3));
    }

    #[test]
    fn test_set_weight_zero_rejected() {
        let mut survey = Survey::new(vec![sleep()]).unwrap();
        assert!(!survey.set_weight(0, &sleep()));
        assert_eq!(survey.weight(&sleep()), Some(1));
    }

    #[test]
    fn test_set_criterion() {
        let mut survey = Survey::new(vec![sleep()]).unwrap();
        assert!(survey.set_criterion(Box::new(HeterogeneousCriterion), &sleep()));
        assert!(!survey.set_criterion(Box::new(HeterogeneousCriterion), &early()));
        assert_eq!(survey.criterion(&sleep()).map(|c| c.name()), Some("heterogeneous"));
    }

    #[test]
    fn test_single_numeric_question() {
        let survey = Survey::new(vec![sleep()]).unwrap();
        let people = [student(1, 2, true), student(2, 8, true)];
        let score = survey.score_students(&people);
        assert!((score - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_average_over_questions() {
        // sleep: 0.4, early: 0.0 -> (0.4 + 0.0) / 2
        let survey = Survey::new(vec![sleep(), early()]).unwrap();
        let people = [student(1, 2, true), student(2, 8, false)];
        let score = survey.score_students(&people);
        assert!((score - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_weight_scales_contribution() {
        // sleep weighted 3: (1.2 + 1.0) / 2
        let mut survey = Survey::new(vec![sleep(), early()]).unwrap();
        survey.set_weight(3, &sleep());
        let people = [student(1, 2, true), student(2, 8, true)];
        let score = survey.score_students(&people);
        assert!((score - 1.1).abs() < 1e-9);
    }

    #[test]
    fn test_doubling_weights_question_count() {
        let people = [student(1, 2, true), student(2, 8, true)];
        let mut survey = Survey::new(vec![sleep(), early()]).unwrap();
        let before = survey.score_students(&people);
        survey.set_weight(2, &sleep());
        survey.set_weight(2, &early());
        let after = survey.score_students(&people);
        assert!((after - 2.0 * before).abs() < 1e-9);
    }

    #[test]
    fn test_doubling_weights_total_weight() {
        let people = [student(1, 2, true), student(2, 8, false)];
        let mut survey = Survey::new(vec![sleep(), early()])
            .unwrap()
            .with_normalization(Normalization::TotalWeight);
        survey.set_weight(3, &sleep());
        let before = survey.score_students(&people);
        survey.set_weight(6, &sleep());
        survey.set_weight(2, &early());
        let after = survey.score_students(&people);
        assert!((after - before).abs() < 1e-9);
        // (0.4 * 3 + 0.0 * 1) / 4
        assert!((before - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_answer_zeroes_whole_score() {
        let survey = Survey::new(vec![early(), sleep()]).unwrap();
        let mut bad = student(2, 8, true);
        bad.set_answer(&sleep(), Answer::new(99));
        let people = [student(1, 8, true), bad];

        let result = survey.score_breakdown(&people);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.invalid.map(|e| e.question_id), Some(1));
        assert!(result.breakdown.is_empty());
    }

    #[test]
    fn test_missing_answer_zeroes_score() {
        let survey = Survey::new(vec![sleep()]).unwrap();
        let people = [student(1, 2, true), Student::new(2, "no answers")];
        assert_eq!(survey.score_students(&people), 0.0);
    }

    #[test]
    fn test_breakdown_reports_each_question() {
        let mut survey = Survey::new(vec![sleep(), early()]).unwrap();
        survey.set_criterion(Box::new(LonelyMemberCriterion), &early());
        survey.set_weight(2, &early());
        let people = [student(1, 2, true), student(2, 8, true)];

        let result = survey.score_breakdown(&people);
        assert!(result.invalid.is_none());
        assert_eq!(result.breakdown.len(), 2);
        assert_eq!(result.breakdown[1].criterion, "lonely_member");
        assert_eq!(result.breakdown[1].raw, 1.0);
        assert_eq!(result.breakdown[1].weighted, 2.0);
    }

    #[test]
    fn test_score_grouping_empty() {
        let survey = Survey::new(vec![sleep()]).unwrap();
        let grouping: Vec<Vec<&Student>> = Vec::new();
        assert_eq!(survey.score_grouping(grouping), 0.0);
    }

    #[test]
    fn test_score_grouping_averages_groups() {
        let survey = Survey::new(vec![sleep()]).unwrap();
        let (a, b, c, d) = (
            student(1, 2, true),
            student(2, 8, true),
            student(3, 5, true),
            student(4, 5, true),
        );
        // 0.4 and 1.0
        let grouping = vec![vec![&a, &b], vec![&c, &d]];
        let score = survey.score_grouping(grouping);
        assert!((score - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_score_grouping_invalid_group_counts_as_zero() {
        let survey = Survey::new(vec![sleep()]).unwrap();
        let a = student(1, 5, true);
        let b = student(2, 5, true);
        let lost = Student::new(3, "lost");
        let grouping = vec![vec![&a, &b], vec![&lost]];
        assert!((survey.score_grouping(grouping) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_display_lists_questions() {
        let survey = Survey::new(vec![sleep(), early()]).unwrap();
        assert_eq!(
            survey.to_string(),
            "Hours of sleep? (0 to 10)\nEarly riser? (yes/no)"
        );
    }
}
