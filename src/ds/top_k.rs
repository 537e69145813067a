//! Bounded top-k selection.
//!
//! Keeps the `k` items that come *first* in `T`'s `Ord` order out of an
//! arbitrary stream, in O(n log k) time and O(k) memory. With
//! [`RankKey`](crate::store::entity::RankKey) "first" means highest score,
//! ties broken by name, so the selection always agrees with the rank index.
//!
//! ## Architecture
//!
//! ```text
//!   capacity k = 3, candidates arrive in any order
//!
//!   heap: BinaryHeap<T>  (max-heap: the worst retained item sits on top)
//!
//!      push (130,D)  → [ (130,D) ]
//!      push (120,A)  → [ (120,A) (130,D) ]
//!      push ( 60,E)  → [ ( 60,E) (130,D) (120,A) ]      full
//!      push ( 99,U)  → (99,U) beats top (60,E): pop, push
//!                    → [ ( 99,U) (130,D) (120,A) ]
//!      push ( 10,X)  → worse than top: discarded
//!
//!   into_sorted_vec() → [ (130,D) (120,A) (99,U) ]
//! ```
//!
//! A candidate only displaces the top when it is strictly better, so equal
//! keys never churn the heap.

use std::collections::BinaryHeap;

/// Size-capped selector retaining the first `capacity` items in `Ord` order.
///
/// # Example
///
/// ```
/// use std::cmp::Reverse;
///
/// use rankkit::ds::TopKSelector;
///
/// // Reverse(score) puts high scores first.
/// let mut top = TopKSelector::new(2);
/// for score in [5, 42, 17, 8] {
///     top.push(Reverse(score));
/// }
/// let best: Vec<i32> = top.into_sorted_vec().into_iter().map(|r| r.0).collect();
/// assert_eq!(best, vec![42, 17]);
/// ```
#[derive(Debug, Clone)]
pub struct TopKSelector<T: Ord> {
    heap: BinaryHeap<T>,
    capacity: usize,
}

impl<T: Ord> TopKSelector<T> {
    /// Creates a selector that retains at most `capacity` items.
    ///
    /// A zero capacity is raised to 1. Nothing is allocated up front, so
    /// `capacity` may exceed any realistic input size.
    pub fn new(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::new(),
            capacity: capacity.max(1),
        }
    }

    /// Builds a selector and feeds it every item of `items`.
    ///
    /// The heap is pre-sized from the iterator's lower size bound, never
    /// from `capacity` alone.
    pub fn select<I>(capacity: usize, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let items = items.into_iter();
        let mut selector = Self::new(capacity);
        let expected = items.size_hint().0.min(selector.capacity);
        selector.heap.reserve(expected.saturating_add(1));
        selector.extend(items);
        selector
    }

    /// Offers `item`; returns `true` if it was retained.
    pub fn push(&mut self, item: T) -> bool {
        if self.heap.len() < self.capacity {
            self.heap.push(item);
            return true;
        }
        match self.heap.peek() {
            Some(worst) if item < *worst => {
                self.heap.pop();
                self.heap.push(item);
                true
            },
            _ => false,
        }
    }

    /// The retained item that would be evicted next.
    pub fn peek_worst(&self) -> Option<&T> {
        self.heap.peek()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Consumes the selector, returning retained items best first.
    pub fn into_sorted_vec(self) -> Vec<T> {
        // BinaryHeap::into_sorted_vec is ascending, which is best-first here.
        self.heap.into_sorted_vec()
    }
}

impl<T: Ord> Extend<T> for TopKSelector<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}
