use std::collections::HashSet;
use std::fmt;

use super::answer::{Answer, AnswerContent};
use crate::error::{InvalidAnswer, QuestionError};

pub type QuestionId = u32;

/// Distinct answer options shared by multiple choice and checkbox questions.
#[derive(Debug, Clone, PartialEq)]
pub struct Choices {
    options: Vec<String>,
}

impl Choices {
    /// Requires at least 2 options and no duplicates.
    pub fn new<S: Into<String>>(options: impl IntoIterator<Item = S>) -> Result<Self, QuestionError> {
        let options: Vec<String> = options.into_iter().map(Into::into).collect();
        if options.len() < 2 {
            return Err(QuestionError::TooFewOptions {
                count: options.len(),
            });
        }

        let mut seen = HashSet::new();
        for option in &options {
            if !seen.insert(option.as_str()) {
                return Err(QuestionError::DuplicateOption(option.clone()));
            }
        }

        Ok(Self { options })
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn contains(&self, value: &str) -> bool {
        self.options.iter().any(|o| o == value)
    }
}

/// The shape of answers a question accepts.
///
/// Yes/no questions are single choice over the fixed options `{true, false}`;
/// checkbox questions reuse [`Choices`] but accept subsets.
#[derive(Debug, Clone, PartialEq)]
pub enum QuestionKind {
    MultipleChoice(Choices),
    YesNo,
    Checkbox(Choices),
    Numeric { min: i64, max: i64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    id: QuestionId,
    text: String,
    kind: QuestionKind,
}

impl Question {
    fn build(id: QuestionId, text: impl Into<String>, kind: QuestionKind) -> Result<Self, QuestionError> {
        let text = text.into();
        if text.is_empty() {
            return Err(QuestionError::EmptyText);
        }
        Ok(Self { id, text, kind })
    }

    pub fn multiple_choice<S: Into<String>>(
        id: QuestionId,
        text: impl Into<String>,
        options: impl IntoIterator<Item = S>,
    ) -> Result<Self, QuestionError> {
        let choices = Choices::new(options)?;
        Self::build(id, text, QuestionKind::MultipleChoice(choices))
    }

    pub fn yes_no(id: QuestionId, text: impl Into<String>) -> Result<Self, QuestionError> {
        Self::build(id, text, QuestionKind::YesNo)
    }

    pub fn checkbox<S: Into<String>>(
        id: QuestionId,
        text: impl Into<String>,
        options: impl IntoIterator<Item = S>,
    ) -> Result<Self, QuestionError> {
        let choices = Choices::new(options)?;
        Self::build(id, text, QuestionKind::Checkbox(choices))
    }

    /// Integer answers between `min` and `max` inclusive. Requires `min < max`.
    pub fn numeric(
        id: QuestionId,
        text: impl Into<String>,
        min: i64,
        max: i64,
    ) -> Result<Self, QuestionError> {
        if min >= max {
            return Err(QuestionError::InvertedBounds { min, max });
        }
        Self::build(id, text, QuestionKind::Numeric { min, max })
    }

    pub fn id(&self) -> QuestionId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> &QuestionKind {
        &self.kind
    }

    pub fn validate_answer(&self, answer: &Answer) -> bool {
        self.check(answer).is_ok()
    }

    /// Similarity in `[0, 1]` between two answers to this question.
    ///
    /// Fails if either answer is not valid for this question.
    pub fn similarity(&self, first: &Answer, second: &Answer) -> Result<f64, InvalidAnswer> {
        self.check(first)?;
        self.check(second)?;

        let similarity = match (&self.kind, first.content(), second.content()) {
            (QuestionKind::Numeric { min, max }, a, b) => {
                let (a, b) = (self.integral(a)?, self.integral(b)?);
                1.0 - (b - a).abs() / (*max as f64 - *min as f64)
            }
            (QuestionKind::Checkbox(_), AnswerContent::Choices(a), AnswerContent::Choices(b)) => {
                jaccard(a, b)
            }
            (QuestionKind::MultipleChoice(_) | QuestionKind::YesNo, a, b) => {
                if a == b {
                    1.0
                } else {
                    0.0
                }
            }
            _ => return Err(self.invalid("answer shapes do not match")),
        };

        Ok(similarity)
    }

    /// Validate `answer`, describing the problem when it does not fit.
    pub fn check(&self, answer: &Answer) -> Result<(), InvalidAnswer> {
        match (&self.kind, answer.content()) {
            (QuestionKind::MultipleChoice(choices), AnswerContent::Text(value)) => {
                if choices.contains(value) {
                    Ok(())
                } else {
                    Err(self.invalid(format!("'{}' is not one of the options", value)))
                }
            }
            (QuestionKind::MultipleChoice(_), _) => Err(self.invalid("expected a single option")),
            (QuestionKind::YesNo, AnswerContent::Bool(_)) => Ok(()),
            (QuestionKind::YesNo, _) => Err(self.invalid("expected a yes/no answer")),
            (QuestionKind::Checkbox(choices), AnswerContent::Choices(selected)) => {
                if selected.is_empty() {
                    return Err(self.invalid("at least one option must be selected"));
                }
                let mut seen = HashSet::new();
                for item in selected {
                    if !seen.insert(item.as_str()) {
                        return Err(self.invalid(format!("option '{}' selected twice", item)));
                    }
                    if !choices.contains(item) {
                        return Err(self.invalid(format!("'{}' is not one of the options", item)));
                    }
                }
                Ok(())
            }
            (QuestionKind::Checkbox(_), _) => Err(self.invalid("expected a list of options")),
            (QuestionKind::Numeric { min, max }, content) => {
                let value = self.integral(content)?;
                if value < *min as f64 || value > *max as f64 {
                    Err(self.invalid(format!("{} is outside {}..={}", value, min, max)))
                } else {
                    Ok(())
                }
            }
        }
    }

    fn integral(&self, content: &AnswerContent) -> Result<f64, InvalidAnswer> {
        content
            .as_integral()
            .ok_or_else(|| self.invalid("expected a whole number"))
    }

    fn invalid(&self, reason: impl Into<String>) -> InvalidAnswer {
        InvalidAnswer::new(self.id, reason)
    }
}

/// |a ∩ b| / |a ∪ b| over the distinct members of each list
fn jaccard(a: &[String], b: &[String]) -> f64 {
    let a: HashSet<&str> = a.iter().map(String::as_str).collect();
    let b: HashSet<&str> = b.iter().map(String::as_str).collect();
    let union = a.union(&b).count();
    if union == 0 {
        return 1.0;
    }
    a.intersection(&b).count() as f64 / union as f64
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            QuestionKind::MultipleChoice(choices) => {
                write!(f, "{} (one of: {})", self.text, choices.options().join(", "))
            }
            QuestionKind::YesNo => write!(f, "{} (yes/no)", self.text),
            QuestionKind::Checkbox(choices) => {
                write!(f, "{} (any of: {})", self.text, choices.options().join(", "))
            }
            QuestionKind::Numeric { min, max } => {
                write!(f, "{} ({} to {})", self.text, min, max)
            }
        }
    }
}
