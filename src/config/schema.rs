use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::roster::StudentId;
use crate::survey::{Answer, CriterionKind, Normalization, QuestionId};

/// A complete scoring session: the survey, the students' answers, and the
/// groups to score.
///
/// Example YAML:
/// ```yaml
/// name: CSC148
/// normalization: question_count
/// questions:
///   - id: 1
///     text: "How many hours per week can you meet?"
///     type: numeric
///     min: 0
///     max: 10
///     weight: 2
///   - id: 2
///     text: "Which days work for you?"
///     type: checkbox
///     options: ["mon", "wed", "fri"]
///     criterion: lonely_member
/// students:
///   - id: 1
///     name: Misha
///     answers:
///       1: 4
///       2: ["mon", "fri"]
/// groups:
///   - [1, 2]
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Course name shown in reports
    #[serde(default)]
    pub name: Option<String>,

    /// How weighted question scores are averaged (default: question_count)
    #[serde(default)]
    pub normalization: Option<Normalization>,

    pub questions: Vec<QuestionConfig>,

    #[serde(default)]
    pub students: Vec<StudentConfig>,

    /// Each group is a list of student ids
    #[serde(default)]
    pub groups: Vec<Vec<StudentId>>,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    MultipleChoice,
    YesNo,
    Checkbox,
    Numeric,
}

/// One survey question.
///
/// `options` is required for `multiple_choice` and `checkbox`; `min` and
/// `max` for `numeric`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct QuestionConfig {
    pub id: QuestionId,
    pub text: String,

    #[serde(rename = "type")]
    pub kind: QuestionType,

    #[serde(default)]
    pub options: Option<Vec<String>>,

    #[serde(default)]
    pub min: Option<i64>,

    #[serde(default)]
    pub max: Option<i64>,

    /// Positive weight (default: 1)
    #[serde(default)]
    pub weight: Option<u32>,

    /// Criterion used to score a group's answers (default: homogeneous)
    #[serde(default)]
    pub criterion: Option<CriterionKind>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct StudentConfig {
    pub id: StudentId,
    pub name: String,

    /// Answers keyed by question id
    #[serde(default)]
    pub answers: BTreeMap<QuestionId, Answer>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::survey::AnswerContent;

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
name: CSC148
normalization: total_weight
questions:
  - id: 1
    text: "Hours per week?"
    type: numeric
    min: 0
    max: 10
    weight: 2
  - id: 2
    text: "Days?"
    type: checkbox
    options: ["mon", "wed", "fri"]
    criterion: lonely_member
students:
  - id: 1
    name: Misha
    answers:
      1: 4
      2: ["mon", "fri"]
groups:
  - [1]
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.name.as_deref(), Some("CSC148"));
        assert_eq!(config.normalization, Some(Normalization::TotalWeight));
        assert_eq!(config.questions.len(), 2);
        assert_eq!(config.questions[0].kind, QuestionType::Numeric);
        assert_eq!(config.questions[0].weight, Some(2));
        assert_eq!(config.questions[1].criterion, Some(CriterionKind::LonelyMember));

        let answers = &config.students[0].answers;
        assert_eq!(answers[&1].content(), &AnswerContent::Integer(4));
        assert_eq!(config.groups, vec![vec![1]]);
    }

    #[test]
    fn test_minimal_config_parse() {
        let yaml = r#"
questions:
  - id: 1
    text: "Early riser?"
    type: yes_no
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert!(config.name.is_none());
        assert!(config.students.is_empty());
        assert!(config.groups.is_empty());
        assert!(config.questions[0].options.is_none());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = r#"
questions:
  - id: 1
    text: "Early riser?"
    type: yes_no
    colour: red
"#;
        assert!(serde_saphyr::from_str::<Config>(yaml).is_err());
    }
}
