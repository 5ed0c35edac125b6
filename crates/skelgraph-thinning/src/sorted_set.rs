use std::collections::BTreeSet;
use std::ops::Bound;

/// An ordered, duplicate-free container with range queries.
///
/// Every rule of the thinning engine looks up the nodes and edges around a
/// pixel through [`SortedSet::range`], so the total order of `T` decides which
/// items a neighbourhood query sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortedSet<T> {
    items: BTreeSet<T>,
}

impl<T: Ord> Default for SortedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> SortedSet<T> {
    /// Create an empty set.
    pub fn new() -> Self {
        Self {
            items: BTreeSet::new(),
        }
    }

    /// Create a set from items in any order; duplicates are dropped.
    pub fn from_unsorted(items: Vec<T>) -> Self {
        Self {
            items: items.into_iter().collect(),
        }
    }

    /// Number of items in the set.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate the items in ascending order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + '_ {
        self.items.iter()
    }

    /// Whether `item` is in the set.
    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }

    /// Items in the half-open interval `[lo, hi)`, in ascending order.
    ///
    /// An inverted interval yields nothing.
    pub fn range<'a>(&'a self, lo: &'a T, hi: &'a T) -> impl Iterator<Item = &'a T> + 'a {
        let hi = if hi < lo { lo } else { hi };
        self.items
            .range::<T, _>((Bound::Included(lo), Bound::Excluded(hi)))
    }

    /// Remove a single item, returning whether it was present.
    pub fn remove(&mut self, item: &T) -> bool {
        self.items.remove(item)
    }

    /// Insert every item of the batch, returning how many were new.
    pub fn insert_batch(&mut self, batch: impl IntoIterator<Item = T>) -> usize {
        batch
            .into_iter()
            .map(|item| self.items.insert(item))
            .filter(|inserted| *inserted)
            .count()
    }

    /// Set difference with the batch, returning how many items were removed.
    pub fn remove_batch<'a>(&mut self, batch: impl IntoIterator<Item = &'a T>) -> usize
    where
        T: 'a,
    {
        batch
            .into_iter()
            .map(|item| self.items.remove(item))
            .filter(|removed| *removed)
            .count()
    }
}

impl<T: Ord> FromIterator<T> for SortedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> IntoIterator for &'a SortedSet<T> {
    type Item = &'a T;
    type IntoIter = std::collections::btree_set::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
