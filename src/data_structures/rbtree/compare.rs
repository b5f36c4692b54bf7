use std::cmp::Ordering;

/// Strict total order over keys.
///
/// Implementations must be antisymmetric, transitive and trichotomous;
/// the tree's shape is only meaningful under such an order. Any
/// `Fn(&K, &K) -> Ordering` closure qualifies.
pub trait Compare<K: ?Sized> {
    fn compare(&self, lhs: &K, rhs: &K) -> Ordering;
}

/// The key type's own [`Ord`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NaturalOrder;

impl<K: Ord + ?Sized> Compare<K> for NaturalOrder {
    fn compare(&self, lhs: &K, rhs: &K) -> Ordering {
        lhs.cmp(rhs)
    }
}

impl<K: ?Sized, F> Compare<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    fn compare(&self, lhs: &K, rhs: &K) -> Ordering {
        self(lhs, rhs)
    }
}
