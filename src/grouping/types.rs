use std::collections::HashSet;
use std::fmt;

use crate::roster::StudentId;

/// A set of students who will work together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    members: Vec<StudentId>,
}

impl Group {
    /// Repeated ids are dropped, keeping the first occurrence.
    pub fn new(members: impl IntoIterator<Item = StudentId>) -> Self {
        let mut seen = HashSet::new();
        let members = members.into_iter().filter(|id| seen.insert(*id)).collect();
        Self { members }
    }

    pub fn members(&self) -> &[StudentId] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, id: StudentId) -> bool {
        self.members.contains(&id)
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<String> = self.members.iter().map(|id| id.to_string()).collect();
        write!(f, "[{}]", ids.join(", "))
    }
}

/// A partition of students into disjoint, non-empty groups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grouping {
    groups: Vec<Group>,
}

impl Grouping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `group` unless it is empty or shares a member with a group already
    /// in this grouping. Returns whether it was added.
    pub fn add_group(&mut self, group: Group) -> bool {
        if group.is_empty() {
            return false;
        }
        let overlaps = group
            .members()
            .iter()
            .any(|&id| self.groups.iter().any(|g| g.contains(id)));
        if overlaps {
            return false;
        }
        self.groups.push(group);
        true
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl fmt::Display for Grouping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, group) in self.groups.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", group)?;
        }
        Ok(())
    }
}
