use std::collections::HashSet;

use super::{Respondent, Student, StudentId};
use crate::error::RosterError;
use crate::grouping::Grouping;
use crate::survey::Survey;

#[derive(Debug, Clone, Default)]
pub struct Course {
    pub name: String,
    students: Vec<Student>,
}

impl Course {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            students: Vec::new(),
        }
    }

    /// Enroll every student in `students`, or none of them.
    ///
    /// Fails on an empty name or an id that is already enrolled or repeated
    /// within the batch.
    pub fn enroll_students(&mut self, students: Vec<Student>) -> Result<(), RosterError> {
        let mut ids: HashSet<StudentId> = self.students.iter().map(|s| s.id).collect();
        for student in &students {
            if student.name.is_empty() {
                return Err(RosterError::EmptyName(student.id));
            }
            if !ids.insert(student.id) {
                return Err(RosterError::DuplicateStudent(student.id));
            }
        }
        self.students.extend(students);
        Ok(())
    }

    /// Whether every enrolled student has a valid answer to every question in
    /// `survey`
    pub fn all_answered(&self, survey: &Survey) -> bool {
        self.students.iter().all(|student| {
            survey.questions().into_iter().all(|q| {
                student
                    .answer_for(q)
                    .is_some_and(|answer| answer.is_valid(q))
            })
        })
    }

    /// Enrolled students ordered by id
    pub fn students(&self) -> Vec<&Student> {
        let mut students: Vec<&Student> = self.students.iter().collect();
        students.sort_by_key(|s| s.id);
        students
    }

    pub fn student(&self, id: StudentId) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Look up the members of every group in `grouping`.
    pub fn resolve_grouping(&self, grouping: &Grouping) -> Result<Vec<Vec<&Student>>, RosterError> {
        grouping
            .groups()
            .iter()
            .map(|group| {
                group
                    .members()
                    .iter()
                    .map(|&id| self.student(id).ok_or(RosterError::UnknownStudent(id)))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect()
    }
}
