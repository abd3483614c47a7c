//! Defines the in-memory pattern database types.

use std::collections::HashMap;

use crate::{pdb::partition::TileGroup, puzzle::packing::StateKey};

/// A pattern database for one [`TileGroup`].
///
/// Maps the packed pattern of the group's tiles (every other tile zeroed) to the minimum number
/// of in-group tile moves needed to bring the group home. The table is immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatternDb {
    group: TileGroup,
    table: HashMap<StateKey, u8>,
}

impl PatternDb {
    pub(crate) fn new(group: TileGroup, table: HashMap<StateKey, u8>) -> Self {
        Self { group, table }
    }

    /// The tile group the database is for.
    #[must_use]
    pub fn group(&self) -> &TileGroup {
        &self.group
    }

    /// The cost of a packed pattern, or `None` if the pattern is not in the database.
    #[must_use]
    pub fn lookup(&self, key: StateKey) -> Option<u8> {
        self.table.get(&key).copied()
    }

    /// The number of patterns in the database.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Checks if the database contains no patterns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Iterates over the `(pattern key, cost)` entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (StateKey, u8)> + '_ {
        self.table.iter().map(|(&key, &cost)| (key, cost))
    }
}

/// The pattern databases of one board size: one [`PatternDb`] per group of the partition, in
/// partition order.
///
/// Read-only once built or loaded, so a set can be shared freely between threads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatternDbSet {
    size: usize,
    databases: Vec<PatternDb>,
}

impl PatternDbSet {
    pub(crate) fn new(size: usize, databases: Vec<PatternDb>) -> Self {
        Self { size, databases }
    }

    /// The board size the databases are for.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// The per-group databases, in partition order.
    #[must_use]
    pub fn databases(&self) -> &[PatternDb] {
        &self.databases
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_db() -> PatternDb {
        let mut table = HashMap::new();
        table.insert(0x123, 0u8);
        table.insert(0x456, 7u8);
        PatternDb::new(TileGroup::new([1, 2]), table)
    }

    #[test]
    fn test_lookup() {
        let db = sample_db();
        assert_eq!(db.lookup(0x123), Some(0));
        assert_eq!(db.lookup(0x456), Some(7));
        assert_eq!(db.lookup(0x789), None);
    }

    #[test]
    fn test_len_and_is_empty() {
        let db = sample_db();
        assert_eq!(db.len(), 2);
        assert!(!db.is_empty());

        let empty = PatternDb::new(TileGroup::new([3]), HashMap::new());
        assert_eq!(empty.len(), 0);
        assert!(empty.is_empty());
        assert_eq!(empty.lookup(0x123), None);
    }

    #[test]
    fn test_iter_yields_all_entries() {
        let db = sample_db();
        let mut entries: Vec<_> = db.iter().collect();
        entries.sort_unstable();
        assert_eq!(entries, vec![(0x123, 0), (0x456, 7)]);
    }

    #[test]
    fn test_set_accessors() {
        let set = PatternDbSet::new(3, vec![sample_db()]);
        assert_eq!(set.size(), 3);
        assert_eq!(set.databases().len(), 1);
        assert_eq!(set.databases()[0].group().tiles(), &[1, 2]);
    }
}
