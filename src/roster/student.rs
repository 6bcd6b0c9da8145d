use std::collections::HashMap;
use std::fmt;

use super::Respondent;
use crate::survey::{Answer, Question, QuestionId};

pub type StudentId = u32;

#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    answers: HashMap<QuestionId, Answer>,
}

impl Student {
    pub fn new(id: StudentId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            answers: HashMap::new(),
        }
    }

    /// Record an answer to `question`, replacing any earlier one
    pub fn set_answer(&mut self, question: &Question, answer: Answer) {
        self.answers.insert(question.id(), answer);
    }

    pub fn answer_count(&self) -> usize {
        self.answers.len()
    }
}

impl Respondent for Student {
    fn answer_for(&self, question: &Question) -> Option<&Answer> {
        self.answers.get(&question.id())
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
