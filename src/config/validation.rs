use std::collections::{HashMap, HashSet};

use super::schema::Config;
use crate::roster::StudentId;
use crate::survey::{Question, QuestionId};

/// Validate a session file before building anything from it.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    // Questions: shape, weight, unique ids
    let mut questions: HashMap<QuestionId, Question> = HashMap::new();
    for (i, entry) in config.questions.iter().enumerate() {
        match entry.build() {
            Ok(question) => {
                if questions.insert(entry.id, question).is_some() {
                    errors.push(format!("questions[{}].id: duplicate id {}", i, entry.id));
                }
            }
            Err(e) => errors.push(format!("questions[{}]: {}", i, e)),
        }
        if entry.weight == Some(0) {
            errors.push(format!("questions[{}].weight: must be greater than 0", i));
        }
    }

    // Students: names, unique ids, answers that fit their questions
    let mut student_ids = HashSet::new();
    for (i, student) in config.students.iter().enumerate() {
        if student.name.is_empty() {
            errors.push(format!("students[{}].name: must not be empty", i));
        }
        if !student_ids.insert(student.id) {
            errors.push(format!("students[{}].id: duplicate id {}", i, student.id));
        }
        for (question_id, answer) in &student.answers {
            match questions.get(question_id) {
                None => errors.push(format!(
                    "students[{}].answers.{}: no such question",
                    i, question_id
                )),
                Some(question) => {
                    if let Err(e) = question.check(answer) {
                        errors.push(format!(
                            "students[{}].answers.{}: {}",
                            i, question_id, e.reason
                        ));
                    }
                }
            }
        }
    }

    // Groups: non-empty, known students, disjoint
    let mut grouped: HashMap<StudentId, usize> = HashMap::new();
    for (i, group) in config.groups.iter().enumerate() {
        if group.is_empty() {
            errors.push(format!("groups[{}]: must have at least one member", i));
        }
        for &id in group {
            if !student_ids.contains(&id) {
                errors.push(format!("groups[{}]: unknown student {}", i, id));
            }
            if let Some(previous) = grouped.insert(id, i) {
                errors.push(format!(
                    "groups[{}]: student {} is already in groups[{}]",
                    i, id, previous
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
