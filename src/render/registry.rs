use std::collections::hash_set;
use std::collections::HashSet;

use crate::handle::Shared;

/// Set of live handles for one render category, keyed by identity.
pub struct RenderRegistry<T> {
    members: HashSet<Shared<T>>,
}

impl<T> RenderRegistry<T> {
    pub fn new() -> Self {
        Self { members: HashSet::new() }
    }

    /// Returns false when the handle was already a member; nothing changes then.
    pub fn insert(&mut self, handle: Shared<T>) -> bool {
        self.members.insert(handle)
    }

    /// Returns true iff the handle was a member and is now gone.
    pub fn remove(&mut self, handle: &Shared<T>) -> bool {
        self.members.remove(handle)
    }

    pub fn contains(&self, handle: &Shared<T>) -> bool {
        self.members.contains(handle)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }

    /// Iteration order is unspecified.
    pub fn iter(&self) -> hash_set::Iter<'_, Shared<T>> {
        self.members.iter()
    }
}

impl<T> Default for RenderRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> IntoIterator for &'a RenderRegistry<T> {
    type Item = &'a Shared<T>;
    type IntoIter = hash_set::Iter<'a, Shared<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
