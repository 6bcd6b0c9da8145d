use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::RosterError;
use crate::grouping::{Group, Grouping};
use crate::roster::{Course, Student};
use crate::survey::{Question, QuestionId, QuestionScore, Survey};

/// Everything needed to score a grouping, built from a session file.
#[derive(Debug)]
pub struct Session {
    pub survey: Survey,
    pub course: Course,
    pub grouping: Grouping,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupReport {
    pub members: Vec<String>,
    pub score: f64,
    /// Why the group scored 0, if an answer was invalid or missing
    pub invalid: Option<String>,
    pub questions: Vec<QuestionScore>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub course: Option<String>,
    pub score: f64,
    pub groups: Vec<GroupReport>,
}

impl Session {
    /// Build the survey, roster and grouping described by `config`.
    ///
    /// Run [`crate::config::validate_config`] first for a complete list of
    /// problems; this stops at the first one.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut questions: Vec<Question> = Vec::with_capacity(config.questions.len());
        for (i, entry) in config.questions.iter().enumerate() {
            let question = entry
                .build()
                .with_context(|| format!("questions[{}] is invalid", i))?;
            questions.push(question);
        }
        let by_id: HashMap<QuestionId, Question> =
            questions.iter().map(|q| (q.id(), q.clone())).collect();

        let mut survey = Survey::new(questions)?
            .with_normalization(config.normalization.unwrap_or_default());
        for entry in &config.questions {
            let question = &by_id[&entry.id];
            if let Some(weight) = entry.weight {
                if !survey.set_weight(weight, question) {
                    bail!("question {}: weight must be greater than 0", entry.id);
                }
            }
            if let Some(kind) = entry.criterion {
                survey.set_criterion(kind.build(), question);
            }
        }

        let mut students = Vec::with_capacity(config.students.len());
        for entry in &config.students {
            let mut student = Student::new(entry.id, entry.name.as_str());
            for (question_id, answer) in &entry.answers {
                let Some(question) = by_id.get(question_id) else {
                    bail!("student {} answered unknown question {}", entry.id, question_id);
                };
                student.set_answer(question, answer.clone());
            }
            students.push(student);
        }
        let mut course = Course::new(config.name.clone().unwrap_or_default());
        course.enroll_students(students)?;

        let mut grouping = Grouping::new();
        for (i, members) in config.groups.iter().enumerate() {
            if !grouping.add_group(Group::new(members.iter().copied())) {
                bail!("groups[{}] is empty or overlaps an earlier group", i);
            }
        }

        info!(
            questions = survey.len(),
            students = course.len(),
            groups = grouping.len(),
            "session loaded"
        );

        Ok(Self {
            survey,
            course,
            grouping,
        })
    }

    /// Score every group and the grouping as a whole.
    pub fn report(&self) -> Result<Report, RosterError> {
        let groups = self.course.resolve_grouping(&self.grouping)?;

        let reports: Vec<GroupReport> = groups
            .iter()
            .map(|members| {
                let result = self.survey.score_breakdown(members.iter().copied());
                debug!(score = result.score, members = members.len(), "scored group");
                GroupReport {
                    members: members.iter().map(|s| s.name.clone()).collect(),
                    score: result.score,
                    invalid: result.invalid.map(|e| e.to_string()),
                    questions: result.breakdown,
                }
            })
            .collect();

        // Same mean as Survey::score_grouping, without scoring each group again
        let score = if reports.is_empty() {
            0.0
        } else {
            reports.iter().map(|g| g.score).sum::<f64>() / reports.len() as f64
        };

        Ok(Report {
            course: Some(self.course.name.clone()).filter(|n| !n.is_empty()),
            score,
            groups: reports,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SESSION: &str = r#"
name: CSC148
questions:
  - id: 1
    text: "Hours?"
    type: numeric
    min: 0
    max: 10
  - id: 2
    text: "Early riser?"
    type: yes_no
    weight: 3
    criterion: heterogeneous
students:
  - id: 1
    name: Misha
    answers: { 1: 2, 2: true }
  - id: 2
    name: Diane
    answers: { 1: 8, 2: false }
  - id: 3
    name: Mario
    answers: { 1: 5, 2: true }
groups:
  - [1, 2]
  - [3]
"#;

    fn session() -> Session {
        let config: Config = serde_saphyr::from_str(SESSION).unwrap();
        Session::from_config(&config).unwrap()
    }

    #[test]
    fn test_from_config_applies_settings() {
        let session = session();
        let questions = session.survey.questions();
        assert_eq!(session.survey.weight(questions[1]), Some(3));
        assert_eq!(
            session.survey.criterion(questions[1]).map(|c| c.name()),
            Some("heterogeneous")
        );
        assert_eq!(session.course.len(), 3);
        assert_eq!(session.grouping.len(), 2);
    }

    #[test]
    fn test_report_scores() {
        let report = session().report().unwrap();
        assert_eq!(report.course.as_deref(), Some("CSC148"));
        assert_eq!(report.groups.len(), 2);

        // group 1: (0.4 + 1.0 * 3) / 2
        assert!((report.groups[0].score - 1.7).abs() < 1e-9);
        // group 2: (1.0 + 0.0 * 3) / 2
        assert!((report.groups[1].score - 0.5).abs() < 1e-9);
        assert!((report.score - 1.1).abs() < 1e-9);
        assert_eq!(report.groups[0].members, vec!["Misha", "Diane"]);
    }

    #[test]
    fn test_report_score_matches_grouping_score() {
        let session = session();
        let report = session.report().unwrap();
        let groups = session.course.resolve_grouping(&session.grouping).unwrap();
        let expected = session.survey.score_grouping(groups);
        assert!((report.score - expected).abs() < 1e-9);
    }

    #[test]
    fn test_report_without_groups() {
        let yaml = SESSION.replace("groups:\n  - [1, 2]\n  - [3]\n", "");
        let config: Config = serde_saphyr::from_str(&yaml).unwrap();
        assert!(config.groups.is_empty());
        let report = Session::from_config(&config).unwrap().report().unwrap();
        assert!(report.groups.is_empty());
        assert_eq!(report.score, 0.0);
    }

    #[test]
    fn test_report_marks_invalid_group() {
        let yaml = SESSION.replace("{ 1: 8, 2: false }", "{ 1: 80, 2: false }");
        let config: Config = serde_saphyr::from_str(&yaml).unwrap();
        let report = Session::from_config(&config).unwrap().report().unwrap();
        assert_eq!(report.groups[0].score, 0.0);
        assert!(report.groups[0].invalid.is_some());
        assert!(report.groups[0].questions.is_empty());
    }

    #[test]
    fn test_from_config_rejects_overlapping_groups() {
        let yaml = SESSION.replace("  - [3]\n", "  - [2, 3]\n");
        let config: Config = serde_saphyr::from_str(&yaml).unwrap();
        let err = Session::from_config(&config).unwrap_err();
        assert!(err.to_string().contains("groups[1]"));
    }
}
