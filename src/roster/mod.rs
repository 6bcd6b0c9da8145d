mod course;
mod student;

pub use course::Course;
pub use student::{Student, StudentId};

use crate::survey::{Answer, Question};

/// Anything that can report its answer to a survey question.
pub trait Respondent {
    fn answer_for(&self, question: &Question) -> Option<&Answer>;

    fn has_answer(&self, question: &Question) -> bool {
        self.answer_for(question).is_some()
    }
}

impl<T: Respondent + ?Sized> Respondent for &T {
    fn answer_for(&self, question: &Question) -> Option<&Answer> {
        (**self).answer_for(question)
    }
}
