//! The ordered staging list.
//!
//! Insertion order is display order is submission order. Only the
//! [`FileStagingController`](crate::FileStagingController) mutates a
//! list; everything else sees it through a shared reference.

use crate::types::{FileMeta, StagedFile};

/// Ordered collection of staged files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagingList<H>(Vec<StagedFile<H>>);

impl<H> StagingList<H> {
    /// Create an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Number of staged files.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if nothing is staged.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the staged file at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&StagedFile<H>> {
        self.0.get(index)
    }

    /// Iterate staged files in order.
    pub fn iter(&self) -> std::slice::Iter<'_, StagedFile<H>> {
        self.0.iter()
    }

    /// Whether a file with the same (name, size) key is already staged.
    #[must_use]
    pub fn contains(&self, meta: &FileMeta) -> bool {
        self.0.iter().any(|f| f.meta().key() == meta.key())
    }

    /// Sum of the staged file sizes in bytes.
    #[must_use]
    pub fn total_size(&self) -> u64 {
        self.0.iter().map(StagedFile::size).sum()
    }

    pub(crate) fn push(&mut self, file: StagedFile<H>) {
        self.0.push(file);
    }

    pub(crate) fn remove(&mut self, index: usize) -> Option<StagedFile<H>> {
        (index < self.0.len()).then(|| self.0.remove(index))
    }

    pub(crate) fn clear(&mut self) {
        self.0.clear();
    }
}

impl<H> Default for StagingList<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, H> IntoIterator for &'a StagingList<H> {
    type Item = &'a StagedFile<H>;
    type IntoIter = std::slice::Iter<'a, StagedFile<H>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staged(name: &str, size: u64) -> StagedFile<()> {
        StagedFile::new(FileMeta::new(name, size, "image/png"), ())
    }

    #[test]
    fn remove_out_of_bounds_is_none() {
        let mut list = StagingList::new();
        list.push(staged("a.png", 1));
        assert!(list.remove(1).is_none());
        assert!(list.remove(usize::MAX).is_none());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn remove_keeps_relative_order() {
        let mut list = StagingList::new();
        for name in ["a.png", "b.png", "c.png", "d.png"] {
            list.push(staged(name, 1));
        }
        let removed = list.remove(1).map(|f| f.name().to_owned());
        assert_eq!(removed.as_deref(), Some("b.png"));
        let names: Vec<_> = list.iter().map(StagedFile::name).collect();
        assert_eq!(names, ["a.png", "c.png", "d.png"]);
    }

    #[test]
    fn contains_requires_name_and_size() {
        let mut list = StagingList::new();
        list.push(staged("a.png", 10));
        assert!(list.contains(&FileMeta::new("a.png", 10, "image/jpeg")));
        assert!(!list.contains(&FileMeta::new("a.png", 11, "image/png")));
        assert!(!list.contains(&FileMeta::new("b.png", 10, "image/png")));
    }

    #[test]
    fn total_size_sums_entries() {
        let mut list = StagingList::new();
        list.push(staged("a.png", 10));
        list.push(staged("b.png", 32));
        assert_eq!(list.total_size(), 42);
        list.clear();
        assert_eq!(list.total_size(), 0);
        assert!(list.is_empty());
    }
}
