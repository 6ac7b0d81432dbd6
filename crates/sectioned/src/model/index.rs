//! Index paths for addressing cells in a sectioned list.

use std::fmt;

/// The position of a cell: its section and its item within that section.
///
/// Index paths are positional. They are only meaningful against the list
/// state they were obtained from; after a committed update the same path may
/// address a different cell, or none at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct IndexPath {
    /// Section index.
    pub section: usize,
    /// Item index within the section.
    pub item: usize,
}

impl IndexPath {
    /// Create a new index path.
    #[inline]
    pub const fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }
}

impl fmt::Display for IndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.section, self.item)
    }
}

impl From<(usize, usize)> for IndexPath {
    fn from((section, item): (usize, usize)) -> Self {
        Self { section, item }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_path_ordering() {
        let a = IndexPath::new(0, 5);
        let b = IndexPath::new(1, 0);
        assert!(a < b);
        assert_eq!(IndexPath::from((1, 0)), b);
    }

    #[test]
    fn test_index_path_display() {
        assert_eq!(IndexPath::new(2, 7).to_string(), "[2, 7]");
    }
}
