//! Size-augmented AVL tree with O(log n) rank and select.
//!
//! Keys are kept in ascending `Ord` order; the "first" key is rank 1. Callers
//! that need a descending order encode it in their key's `Ord` impl (see
//! [`RankKey`](crate::store::entity::RankKey)).
//!
//! ## Architecture
//!
//! ```text
//!                          ┌──────────────────────────────┐
//!   root: Option<Box<Node>>│ key=(120,"A") h=3 size=5     │
//!                          └──────────────┬───────────────┘
//!                     ┌───────────────────┴───────────────────┐
//!          ┌──────────▼──────────┐                 ┌──────────▼──────────┐
//!          │ key=(130,"D") h=2   │                 │ key=(60,"E") h=2    │
//!          │ size=2              │                 │ size=2              │
//!          └──────────┬──────────┘                 └──────────┬──────────┘
//!              ┌──────┘                                       └──────┐
//!   ┌──────────▼──────────┐                             ┌──────────▼──────────┐
//!   │ key=(140,"K") h=1   │                             │ key=(50,"Z") h=1    │
//!   │ size=1              │                             │ size=1              │
//!   └─────────────────────┘                             └─────────────────────┘
//!
//!   rank((120,"A")):  descend from root
//!     at A: Equal  → acc + size(left) + 1 = 0 + 2 + 1 = 3
//!
//!   select(4):        descend from root
//!     at A: size(left)=2, 4 > 3  → k = 4 - 3 = 1, go right
//!     at E: size(left)=0, k == 1 → E
//! ```
//!
//! ## Operations
//!
//! | Operation         | Description                               | Complexity |
//! |-------------------|-------------------------------------------|------------|
//! | `insert`          | Insert a new key (duplicate is a no-op)   | O(log n)   |
//! | `remove`          | Remove a key (absent key is a no-op)      | O(log n)   |
//! | `get`             | Payload lookup by key                     | O(log n)   |
//! | `rank`            | 1-based position of a key                 | O(log n)   |
//! | `select`          | Key/payload at a 1-based position         | O(log n)   |
//! | `iter`            | In-order traversal                        | O(n)       |
//! | `iter_from_rank`  | In-order traversal starting at a position | O(log n + m) |
//!
//! ## Invariants
//!
//! - Every node's cached `height` and `size` match its subtrees.
//! - For every node, `|height(left) - height(right)| <= 1`.
//! - In-order traversal is strictly increasing.
//!
//! [`RankTree::check_invariants`] verifies all three and is exercised by the
//! property tests after every mutation.
//!
//! ## Example Usage
//!
//! ```
//! use rankkit::ds::RankTree;
//!
//! let mut tree = RankTree::new();
//! tree.insert(30, "c");
//! tree.insert(10, "a");
//! tree.insert(20, "b");
//!
//! assert_eq!(tree.rank(&20), Some(2));
//! assert_eq!(tree.select(1), Some((&10, &"a")));
//! assert_eq!(tree.remove(&10), Some("a"));
//! assert_eq!(tree.rank(&20), Some(1));
//! ```
use std::cmp::Ordering;
use std::fmt::Debug;

use crate::error::InvariantError;

type Link<K, V> = Option<Box<Node<K, V>>>;

#[derive(Debug, Clone)]
struct Node<K, V> {
    key: K,
    value: V,
    height: u32,
    size: usize,
    left: Link<K, V>,
    right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    fn leaf(key: K, value: V) -> Box<Self> {
        Box::new(Self {
            key,
            value,
            height: 1,
            size: 1,
            left: None,
            right: None,
        })
    }

    #[inline]
    fn update(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
        self.size = 1 + size(&self.left) + size(&self.right);
    }

    #[inline]
    fn balance_factor(&self) -> i64 {
        i64::from(height(&self.left)) - i64::from(height(&self.right))
    }
}

#[inline]
fn height<K, V>(link: &Link<K, V>) -> u32 {
    link.as_ref().map_or(0, |node| node.height)
}

#[inline]
fn size<K, V>(link: &Link<K, V>) -> usize {
    link.as_ref().map_or(0, |node| node.size)
}

fn rotate_right<K, V>(mut y: Box<Node<K, V>>) -> Box<Node<K, V>> {
    match y.left.take() {
        Some(mut x) => {
            y.left = x.right.take();
            y.update();
            x.right = Some(y);
            x.update();
            x
        },
        None => y,
    }
}

fn rotate_left<K, V>(mut x: Box<Node<K, V>>) -> Box<Node<K, V>> {
    match x.right.take() {
        Some(mut y) => {
            x.right = y.left.take();
            x.update();
            y.left = Some(x);
            y.update();
            y
        },
        None => x,
    }
}

/// Restores the AVL property at `node` after one of its subtrees changed.
///
/// Direction is picked from the child's balance factor. After an insert the
/// child leans towards the side the new key went to, so this is the same
/// decision as comparing the inserted key against the child's key.
fn rebalance<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    node.update();
    let bf = node.balance_factor();
    if bf > 1 {
        if node.left.as_ref().is_some_and(|left| left.balance_factor() < 0) {
            node.left = node.left.take().map(rotate_left);
        }
        return rotate_right(node);
    }
    if bf < -1 {
        if node
            .right
            .as_ref()
            .is_some_and(|right| right.balance_factor() > 0)
        {
            node.right = node.right.take().map(rotate_right);
        }
        return rotate_left(node);
    }
    node
}

fn insert_node<K: Ord, V>(link: Link<K, V>, key: K, value: V) -> (Box<Node<K, V>>, bool) {
    let Some(mut node) = link else {
        return (Node::leaf(key, value), true);
    };
    let inserted = match key.cmp(&node.key) {
        Ordering::Less => {
            let (child, inserted) = insert_node(node.left.take(), key, value);
            node.left = Some(child);
            inserted
        },
        Ordering::Greater => {
            let (child, inserted) = insert_node(node.right.take(), key, value);
            node.right = Some(child);
            inserted
        },
        Ordering::Equal => false,
    };
    if inserted {
        (rebalance(node), true)
    } else {
        (node, false)
    }
}

fn remove_min<K, V>(mut node: Box<Node<K, V>>) -> (Link<K, V>, (K, V)) {
    match node.left.take() {
        None => {
            let Node {
                key, value, right, ..
            } = *node;
            (right, (key, value))
        },
        Some(left) => {
            let (left, min) = remove_min(left);
            node.left = left;
            (Some(rebalance(node)), min)
        },
    }
}

fn remove_node<K: Ord, V>(link: Link<K, V>, key: &K) -> (Link<K, V>, Option<(K, V)>) {
    let Some(mut node) = link else {
        return (None, None);
    };
    let removed = match key.cmp(&node.key) {
        Ordering::Less => {
            let (child, removed) = remove_node(node.left.take(), key);
            node.left = child;
            removed
        },
        Ordering::Greater => {
            let (child, removed) = remove_node(node.right.take(), key);
            node.right = child;
            removed
        },
        Ordering::Equal => match (node.left.take(), node.right.take()) {
            (None, None) => {
                let Node { key, value, .. } = *node;
                return (None, Some((key, value)));
            },
            (Some(child), None) | (None, Some(child)) => {
                let Node { key, value, .. } = *node;
                return (Some(child), Some((key, value)));
            },
            (Some(left), Some(right)) => {
                // Two children: the in-order successor takes this node's place.
                let (right, (succ_key, succ_value)) = remove_min(right);
                node.left = Some(left);
                node.right = right;
                let key = std::mem::replace(&mut node.key, succ_key);
                let value = std::mem::replace(&mut node.value, succ_value);
                Some((key, value))
            },
        },
    };
    match removed {
        Some(entry) => (Some(rebalance(node)), Some(entry)),
        None => (Some(node), None),
    }
}

/// Balanced ordered map with positional queries.
///
/// # Type Parameters
///
/// - `K`: Key type; its `Ord` impl defines rank order (rank 1 = smallest).
/// - `V`: Payload stored alongside each key.
///
/// # Example
///
/// ```
/// use std::cmp::Reverse;
///
/// use rankkit::ds::RankTree;
///
/// // Descending order via Reverse
/// let mut tree = RankTree::new();
/// for score in [120, 130, 60] {
///     tree.insert(Reverse(score), ());
/// }
/// let order: Vec<i64> = tree.iter().map(|(k, _)| k.0).collect();
/// assert_eq!(order, vec![130, 120, 60]);
/// assert_eq!(tree.rank(&Reverse(120)), Some(2));
/// ```
#[derive(Debug, Clone)]
pub struct RankTree<K, V> {
    root: Link<K, V>,
}

impl<K, V> RankTree<K, V>
where
    K: Ord,
{
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Returns the number of keys.
    #[inline]
    pub fn len(&self) -> usize {
        size(&self.root)
    }

    /// Returns `true` if the tree holds no keys.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the height of the tree (0 when empty).
    #[inline]
    pub fn height(&self) -> u32 {
        height(&self.root)
    }

    /// Removes every key.
    pub fn clear(&mut self) {
        self.root = None;
    }

    /// Inserts `key` with `value`.
    ///
    /// Returns `false` and leaves the tree untouched if an equal key is
    /// already present; changing a key means `remove` then `insert`.
    ///
    /// # Example
    ///
    /// ```
    /// use rankkit::ds::RankTree;
    ///
    /// let mut tree = RankTree::new();
    /// assert!(tree.insert(1, "a"));
    /// assert!(!tree.insert(1, "b"));
    /// assert_eq!(tree.get(&1), Some(&"a"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> bool {
        let (root, inserted) = insert_node(self.root.take(), key, value);
        self.root = Some(root);
        inserted
    }

    /// Removes `key`, returning its payload. Absent keys are a no-op.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes `key`, returning the stored key and payload.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let (root, removed) = remove_node(self.root.take(), key);
        self.root = root;
        removed
    }

    fn find(&self, key: &K) -> Option<&Node<K, V>> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(node),
            };
        }
        None
    }

    /// Returns the payload stored under `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.find(key).map(|node| &node.value)
    }

    /// Returns `true` if `key` is present.
    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Number of keys strictly ordered before `key` (present or not).
    pub fn count_before(&self, key: &K) -> usize {
        let mut count = 0;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match key.cmp(&node.key) {
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Greater => {
                    count += size(&node.left) + 1;
                    current = node.right.as_deref();
                },
                Ordering::Equal => return count + size(&node.left),
            }
        }
        count
    }

    /// Returns the 1-based position of `key`, or `None` if it is absent.
    ///
    /// # Example
    ///
    /// ```
    /// use rankkit::ds::RankTree;
    ///
    /// let mut tree = RankTree::new();
    /// for k in [5, 1, 9, 3] {
    ///     tree.insert(k, ());
    /// }
    /// assert_eq!(tree.rank(&5), Some(3));
    /// assert_eq!(tree.rank(&4), None);
    /// ```
    pub fn rank(&self, key: &K) -> Option<usize> {
        let mut acc = 0;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match key.cmp(&node.key) {
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Greater => {
                    acc += size(&node.left) + 1;
                    current = node.right.as_deref();
                },
                Ordering::Equal => return Some(acc + size(&node.left) + 1),
            }
        }
        None
    }

    /// Returns the entry at 1-based position `rank`.
    pub fn select(&self, rank: usize) -> Option<(&K, &V)> {
        if rank == 0 || rank > self.len() {
            return None;
        }
        let mut remaining = rank;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            let left = size(&node.left);
            match remaining.cmp(&(left + 1)) {
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Equal => return Some((&node.key, &node.value)),
                Ordering::Greater => {
                    remaining -= left + 1;
                    current = node.right.as_deref();
                },
            }
        }
        None
    }

    /// Returns the rank-1 entry.
    pub fn first(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some((&node.key, &node.value))
    }

    /// Returns the last-ranked entry.
    pub fn last(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some((&node.key, &node.value))
    }

    /// In-order iterator over all entries.
    pub fn iter(&self) -> Iter<'_, K, V> {
        let mut iter = Iter {
            stack: Vec::with_capacity(self.height() as usize),
            remaining: self.len(),
        };
        iter.push_left_spine(self.root.as_deref());
        iter
    }

    /// In-order iterator starting at 1-based position `rank`.
    ///
    /// `rank == 0` is treated as 1; a rank past the end yields nothing.
    ///
    /// # Example
    ///
    /// ```
    /// use rankkit::ds::RankTree;
    ///
    /// let mut tree = RankTree::new();
    /// for k in 1..=10 {
    ///     tree.insert(k, ());
    /// }
    /// let window: Vec<i32> = tree.iter_from_rank(4).take(3).map(|(k, _)| *k).collect();
    /// assert_eq!(window, vec![4, 5, 6]);
    /// ```
    pub fn iter_from_rank(&self, rank: usize) -> Iter<'_, K, V> {
        let rank = rank.max(1);
        let len = self.len();
        let mut iter = Iter {
            stack: Vec::with_capacity(self.height() as usize),
            remaining: 0,
        };
        if rank > len {
            return iter;
        }
        iter.remaining = len - (rank - 1);
        let mut remaining = rank;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            let left = size(&node.left);
            match remaining.cmp(&(left + 1)) {
                Ordering::Less => {
                    iter.stack.push(node);
                    current = node.left.as_deref();
                },
                Ordering::Equal => {
                    iter.stack.push(node);
                    break;
                },
                Ordering::Greater => {
                    remaining -= left + 1;
                    current = node.right.as_deref();
                },
            }
        }
        iter
    }

    /// Up to `len` entries starting at 1-based position `start`.
    pub fn range_by_rank(&self, start: usize, len: usize) -> std::iter::Take<Iter<'_, K, V>> {
        self.iter_from_rank(start).take(len)
    }

    /// Verifies ordering, cached heights/sizes and AVL balance.
    pub fn check_invariants(&self) -> Result<(), InvariantError>
    where
        K: Debug,
    {
        fn walk<K: Ord + Debug, V>(link: &Link<K, V>) -> Result<(u32, usize), InvariantError> {
            let Some(node) = link else {
                return Ok((0, 0));
            };
            let (lh, ls) = walk(&node.left)?;
            let (rh, rs) = walk(&node.right)?;
            let expected_height = 1 + lh.max(rh);
            if node.height != expected_height {
                return Err(InvariantError::new(format!(
                    "node {:?}: cached height {} != {}",
                    node.key, node.height, expected_height
                )));
            }
            let expected_size = 1 + ls + rs;
            if node.size != expected_size {
                return Err(InvariantError::new(format!(
                    "node {:?}: cached size {} != {}",
                    node.key, node.size, expected_size
                )));
            }
            if lh.abs_diff(rh) > 1 {
                return Err(InvariantError::new(format!(
                    "node {:?}: unbalanced (left height {}, right height {})",
                    node.key, lh, rh
                )));
            }
            Ok((expected_height, expected_size))
        }

        walk(&self.root)?;

        let mut prev: Option<&K> = None;
        for (key, _) in self.iter() {
            if let Some(prev) = prev
                && prev >= key
            {
                return Err(InvariantError::new(format!(
                    "in-order keys not strictly increasing: {:?} then {:?}",
                    prev, key
                )));
            }
            prev = Some(key);
        }
        Ok(())
    }
}

impl<K, V> Default for RankTree<K, V>
where
    K: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, K, V> IntoIterator for &'a RankTree<K, V>
where
    K: Ord,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator over a [`RankTree`].
#[derive(Debug)]
pub struct Iter<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn push_left_spine(&mut self, mut current: Option<&'a Node<K, V>>) {
        while let Some(node) = current {
            self.stack.push(node);
            current = node.left.as_deref();
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.remaining = self.remaining.saturating_sub(1);
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
