use std::collections::{BTreeMap, BTreeSet};
use std::hash::Hash;

/// Type alias for sets, we use this to hide which type of `HashSet` we are actually using.
pub type Set<S> = fxhash::FxHashSet<S>;
/// Type alias for maps, we use this to hide which type of `HashMap` we are actually using.
pub type Map<K, V> = fxhash::FxHashMap<K, V>;

/// Type alias for sets with a canonical iteration order. Used wherever reproducibility
/// matters, for example for the members of a composite state or the blocks of a partition.
pub type OrderedSet<S> = BTreeSet<S>;
/// Type alias for maps with a canonical iteration order.
pub type OrderedMap<K, V> = BTreeMap<K, V>;

/// A partition groups elements of type `I` into disjoint, non-empty blocks. It is the
/// representation of an equivalence relation that partition refinement operates on.
#[derive(Debug, Clone)]
pub struct Partition<I: Hash + Eq>(Vec<OrderedSet<I>>);

impl<I: Hash + Eq> std::ops::Deref for Partition<I> {
    type Target = Vec<OrderedSet<I>>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a, I: Hash + Eq> IntoIterator for &'a Partition<I> {
    type Item = &'a OrderedSet<I>;
    type IntoIter = std::slice::Iter<'a, OrderedSet<I>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<I: Hash + Eq> PartialEq for Partition<I> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|block| other.contains(block))
    }
}
impl<I: Hash + Eq> Eq for Partition<I> {}

impl<I: Hash + Eq + Ord> Partition<I> {
    /// Returns the size of the partition, i.e. the number of blocks.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Builds a new partition from an iterator that yields iterators which yield elements
    /// of type `I`. Empty blocks are dropped.
    pub fn new<X: IntoIterator<Item = I>, Y: IntoIterator<Item = X>>(iter: Y) -> Self {
        Self(
            iter.into_iter()
                .map(|block| block.into_iter().collect::<OrderedSet<_>>())
                .filter(|block| !block.is_empty())
                .collect(),
        )
    }

    /// Returns the position of the block that contains `element`, if any.
    pub fn block_of(&self, element: &I) -> Option<usize> {
        self.0.iter().position(|block| block.contains(element))
    }
}

impl<I: Hash + Eq + Ord> From<Vec<OrderedSet<I>>> for Partition<I> {
    fn from(value: Vec<OrderedSet<I>>) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::Partition;

    #[test]
    fn partition_drops_empty_blocks() {
        let partition = Partition::new([vec![0, 1], vec![], vec![2]]);
        assert_eq!(partition.size(), 2);
    }

    #[test]
    fn partition_equality_ignores_block_order() {
        let left = Partition::new([vec![0, 1], vec![2]]);
        let right = Partition::new([vec![2], vec![1, 0]]);
        assert_eq!(left, right);
        assert_ne!(left, Partition::new([vec![0], vec![1], vec![2]]));
    }

    #[test]
    fn block_lookup() {
        let partition = Partition::new([vec![0, 1], vec![2]]);
        assert_eq!(partition.block_of(&1), Some(0));
        assert_eq!(partition.block_of(&2), Some(1));
        assert_eq!(partition.block_of(&3), None);
    }
}
