use serde::{Deserialize, Serialize};
use std::fmt;

use super::question::Question;

/// The raw content of a response. Which variant is acceptable depends on the
/// question being answered.
///
/// Deserializes untagged from YAML, so `true`, `3`, `"red"` and
/// `["a", "b"]` all parse directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerContent {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    Choices(Vec<String>),
}

impl AnswerContent {
    /// Integral value of this content, if it has one.
    ///
    /// Floats count only when they have no fractional part.
    pub fn as_integral(&self) -> Option<f64> {
        match self {
            AnswerContent::Integer(n) => Some(*n as f64),
            AnswerContent::Float(f) if f.is_finite() && f.fract() == 0.0 => Some(*f),
            _ => None,
        }
    }
}

impl fmt::Display for AnswerContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerContent::Bool(true) => write!(f, "yes"),
            AnswerContent::Bool(false) => write!(f, "no"),
            AnswerContent::Integer(n) => write!(f, "{}", n),
            AnswerContent::Float(n) => write!(f, "{}", n),
            AnswerContent::Text(s) => write!(f, "{}", s),
            AnswerContent::Choices(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

impl From<bool> for AnswerContent {
    fn from(value: bool) -> Self {
        AnswerContent::Bool(value)
    }
}

impl From<i32> for AnswerContent {
    fn from(value: i32) -> Self {
        AnswerContent::Integer(value.into())
    }
}

impl From<i64> for AnswerContent {
    fn from(value: i64) -> Self {
        AnswerContent::Integer(value)
    }
}

impl From<f64> for AnswerContent {
    fn from(value: f64) -> Self {
        AnswerContent::Float(value)
    }
}

impl From<&str> for AnswerContent {
    fn from(value: &str) -> Self {
        AnswerContent::Text(value.to_string())
    }
}

impl From<String> for AnswerContent {
    fn from(value: String) -> Self {
        AnswerContent::Text(value)
    }
}

impl From<Vec<&str>> for AnswerContent {
    fn from(values: Vec<&str>) -> Self {
        AnswerContent::Choices(values.into_iter().map(String::from).collect())
    }
}

impl From<Vec<String>> for AnswerContent {
    fn from(values: Vec<String>) -> Self {
        AnswerContent::Choices(values)
    }
}

/// One person's response to one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Answer {
    content: AnswerContent,
}

impl Answer {
    pub fn new(content: impl Into<AnswerContent>) -> Self {
        Self {
            content: content.into(),
        }
    }

    pub fn content(&self) -> &AnswerContent {
        &self.content
    }

    /// Whether this answer is acceptable for `question`
    pub fn is_valid(&self, question: &Question) -> bool {
        question.validate_answer(self)
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.content, f)
    }
}
