//! Courses the student has marked as already taken.

use std::collections::HashSet;

use crate::models::CourseId;

/// Set of taken course ids, remembering the order they were picked in.
///
/// Only explicit toggles change it; filtering the catalog never does.
///
/// Equality compares membership only. The pick order returned by
/// [`SelectionSet::ids`] is the request payload order and is not part of
/// identity: removing and re-adding an id moves it to the end.
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    members: HashSet<CourseId>,
    order: Vec<CourseId>,
}

impl PartialEq for SelectionSet {
    fn eq(&self, other: &Self) -> bool {
        self.members == other.members
    }
}

impl Eq for SelectionSet {}

impl SelectionSet {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `id` if absent, removes it if present.
    ///
    /// Returns whether `id` is selected afterwards.
    pub fn toggle(&mut self, id: CourseId) -> bool {
        if self.members.remove(&id) {
            self.order.retain(|selected| *selected != id);
            false
        } else {
            self.members.insert(id);
            self.order.push(id);
            true
        }
    }

    /// Returns true if `id` is selected.
    pub fn contains(&self, id: CourseId) -> bool {
        self.members.contains(&id)
    }

    /// Number of selected courses.
    pub fn count(&self) -> usize {
        self.members.len()
    }

    /// Returns true if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Selected ids in the order they were picked.
    pub fn ids(&self) -> &[CourseId] {
        &self.order
    }

    /// Removes every selection (full page reset only).
    pub fn clear(&mut self) {
        self.members.clear();
        self.order.clear();
    }
}
