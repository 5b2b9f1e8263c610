//! Depth-first traversal of ragged value trees and coordinate
//! enumeration of rectangular shapes.
//!
//! Raw input data arrives as arbitrarily nested lists: one value per
//! cell, grouped by row, layer, or period, with no fixed depth.
//! [`Value::walk`] flattens such a tree into its scalar leaves while
//! reporting enough structural metadata (position within the current
//! level, change in nesting depth) for a consumer to reconstruct the
//! grouping. [`IndexIter`] walks the coordinate space of a dense
//! rectangular shape in row-major order, which is the order leaves
//! are matched to array cells.
//!
//! ## Examples
//!
//! ```rust
//! use siminput::tree;
//!
//! let data = tree!([[1, 2], [3]]);
//! let leaves: Vec<i64> = data.leaves().filter_map(|v| v.as_i64()).collect();
//! assert_eq!(leaves, vec![1, 2, 3]);
//! assert_eq!(data.leaf_count(), 3);
//! ```

use crate::Value;

/// Structural metadata attached to each scalar leaf yielded by
/// [`Value::walk`].
///
/// `nesting_change` is the signed change in nesting depth relative to
/// the previously yielded record: positive when the traversal first
/// descends into deeper levels, negative once a level has been fully
/// exhausted, and zero while staying at the same level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TraversalRecord<'a> {
    /// The scalar leaf itself. Never a list.
    pub value: &'a Value,
    /// Whether this leaf is the last element of its enclosing level.
    pub last_in_level: bool,
    /// Whether this leaf is the first element of its enclosing level.
    pub first_in_level: bool,
    /// Signed nesting-depth change since the previous record.
    pub nesting_change: i64,
}

struct Frame<'a> {
    items: &'a [Value],
    pos: usize,
    // local nesting delta, reset to 0 after each scalar emission
    nesting: i64,
    // delta carried in at descent, restored (negated) on ascent
    entry: i64,
}

/// Lazy depth-first iterator over the scalar leaves of a [`Value`].
///
/// Created by [`Value::walk`]. Uses an explicit frame stack, so the
/// nesting depth of the input is not limited by the native call
/// stack.
pub struct TreeIter<'a> {
    scalar: Option<&'a Value>,
    stack: Vec<Frame<'a>>,
}

impl<'a> TreeIter<'a> {
    fn new(root: &'a Value) -> Self {
        match root {
            Value::List(items) => TreeIter {
                scalar: None,
                stack: vec![Frame {
                    items,
                    pos: 0,
                    nesting: 0,
                    entry: 0,
                }],
            },
            scalar => TreeIter {
                scalar: Some(scalar),
                stack: Vec::new(),
            },
        }
    }
}

impl<'a> Iterator for TreeIter<'a> {
    type Item = TraversalRecord<'a>;

    fn next(&mut self) -> Option<TraversalRecord<'a>> {
        if let Some(value) = self.scalar.take() {
            return Some(TraversalRecord {
                value,
                last_in_level: true,
                first_in_level: true,
                nesting_change: 0,
            });
        }
        loop {
            let frame = self.stack.last_mut()?;
            if frame.pos >= frame.items.len() {
                let finished_entry = frame.entry;
                self.stack.pop();
                if let Some(parent) = self.stack.last_mut() {
                    parent.nesting = -finished_entry;
                }
                continue;
            }
            let items = frame.items;
            let index = frame.pos;
            frame.pos += 1;
            match &items[index] {
                Value::List(children) => {
                    let entry = frame.nesting + 1;
                    self.stack.push(Frame {
                        items: children,
                        pos: 0,
                        nesting: entry,
                        entry,
                    });
                }
                scalar => {
                    let record = TraversalRecord {
                        value: scalar,
                        last_in_level: index + 1 == items.len(),
                        first_in_level: index == 0,
                        nesting_change: frame.nesting,
                    };
                    frame.nesting = 0;
                    return Some(record);
                }
            }
        }
    }
}

impl Value {
    /// Returns a lazy depth-first iterator of [`TraversalRecord`]s
    /// over this tree.
    ///
    /// Each scalar leaf is visited exactly once, left to right. A
    /// bare scalar yields a single record; an empty list (at any
    /// depth) yields nothing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use siminput::tree;
    ///
    /// let data = tree!([1, [2, [3]], 4]);
    /// let deltas: Vec<i64> = data.walk().map(|r| r.nesting_change).collect();
    /// assert_eq!(deltas, vec![0, 1, 1, -1]);
    /// ```
    pub fn walk(&self) -> TreeIter<'_> {
        TreeIter::new(self)
    }

    /// Returns an iterator over the scalar leaves only, without
    /// structural metadata.
    pub fn leaves(&self) -> impl Iterator<Item = &Value> {
        self.walk().map(|record| record.value)
    }

    /// Counts the scalar leaves of this tree.
    ///
    /// A bare `Null` counts as zero, any other bare scalar as one.
    /// `Null` values inside a list still count as leaves.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use siminput::{tree, Value};
    ///
    /// assert_eq!(tree!([[1, 2], [3]]).leaf_count(), 3);
    /// assert_eq!(Value::Null.leaf_count(), 0);
    /// assert_eq!(Value::Int(5).leaf_count(), 1);
    /// ```
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        if self.is_null() {
            return 0;
        }
        self.walk().count()
    }

    /// Returns the left-most scalar leaf, descending into first
    /// elements repeatedly.
    ///
    /// Returns `None` for an empty list or when the first-element
    /// chain dead-ends in an empty list.
    #[must_use]
    pub fn first_leaf(&self) -> Option<&Value> {
        match self {
            Value::List(items) => items.first().and_then(Value::first_leaf),
            scalar => Some(scalar),
        }
    }

    /// Returns `true` if this tree contains no scalar leaves at any
    /// depth: an empty list, or a list whose every element is itself
    /// an all-empty list.
    ///
    /// A bare scalar is "empty" only when falsy-equivalent (`Null`,
    /// zero, or empty text).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use siminput::tree;
    ///
    /// assert!(tree!([[], [[]]]).is_all_empty());
    /// assert!(!tree!([[], [1]]).is_all_empty());
    /// ```
    #[must_use]
    pub fn is_all_empty(&self) -> bool {
        match self {
            Value::List(items) => items.iter().all(|item| item.is_list() && item.is_all_empty()),
            scalar => scalar.is_falsy(),
        }
    }

    /// Returns `true` for a bare scalar, or a single-element list
    /// whose element is not itself a non-empty list.
    #[must_use]
    pub fn has_single_item(&self) -> bool {
        match self {
            Value::List(items) => {
                if items.len() != 1 {
                    return false;
                }
                match &items[0] {
                    Value::List(inner) => inner.is_empty(),
                    _ => true,
                }
            }
            _ => true,
        }
    }
}

/// Enumerates every coordinate of a rectangular N-dimensional shape
/// in row-major (last-axis-fastest) order.
///
/// Yields exactly the product of the dimension sizes, starting at the
/// all-zero coordinate and ending at the all-`(size - 1)` coordinate.
/// A shape containing a zero dimension, or an empty shape, yields
/// nothing. The iterator is single-pass; restart by constructing a
/// new one.
///
/// # Examples
///
/// ```rust
/// use siminput::IndexIter;
///
/// let coords: Vec<Vec<usize>> = IndexIter::new(&[2, 2]).collect();
/// assert_eq!(coords, vec![vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1]]);
/// ```
pub struct IndexIter {
    shape: Vec<usize>,
    location: Vec<usize>,
    first: bool,
    done: bool,
}

impl IndexIter {
    #[must_use]
    pub fn new(shape: &[usize]) -> Self {
        let done = shape.is_empty() || shape.contains(&0);
        IndexIter {
            shape: shape.to_vec(),
            location: vec![0; shape.len()],
            first: true,
            done,
        }
    }
}

impl Iterator for IndexIter {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.done {
            return None;
        }
        if self.first {
            self.first = false;
            return Some(self.location.clone());
        }
        for axis in (0..self.shape.len()).rev() {
            if self.location[axis] + 1 < self.shape[axis] {
                self.location[axis] += 1;
                for trailing in &mut self.location[axis + 1..] {
                    *trailing = 0;
                }
                return Some(self.location.clone());
            }
        }
        self.done = true;
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree;

    fn records(value: &Value) -> Vec<(i64, bool, bool, i64)> {
        value
            .walk()
            .map(|r| {
                (
                    r.value.as_i64().expect("integer leaf"),
                    r.last_in_level,
                    r.first_in_level,
                    r.nesting_change,
                )
            })
            .collect()
    }

    #[test]
    fn test_walk_flat_list() {
        let data = tree!([1, 2, 3]);
        assert_eq!(
            records(&data),
            vec![
                (1, false, true, 0),
                (2, false, false, 0),
                (3, true, false, 0),
            ]
        );
    }

    #[test]
    fn test_walk_bare_scalar() {
        let data = Value::Int(9);
        assert_eq!(records(&data), vec![(9, true, true, 0)]);
    }

    #[test]
    fn test_walk_descend_and_ascend() {
        let data = tree!([1, [2, [3]], 4]);
        assert_eq!(
            records(&data),
            vec![
                (1, false, true, 0),
                (2, false, true, 1),
                (3, true, true, 1),
                (4, true, false, -1),
            ]
        );
    }

    #[test]
    fn test_walk_sibling_sublists() {
        let data = tree!([[1, 2], [3]]);
        assert_eq!(
            records(&data),
            vec![
                (1, false, true, 1),
                (2, true, false, 0),
                (3, true, true, 0),
            ]
        );
    }

    #[test]
    fn test_walk_empty_trees() {
        assert_eq!(tree!([]).walk().count(), 0);
        assert_eq!(tree!([[], [[]]]).walk().count(), 0);
    }

    #[test]
    fn test_leaf_count_matches_direct_count() {
        fn direct(value: &Value) -> usize {
            match value {
                Value::List(items) => items.iter().map(direct).sum(),
                _ => 1,
            }
        }
        let data = tree!([[1, [2, 3]], [], [[4], 5], 6]);
        assert_eq!(data.leaf_count(), direct(&data));
        assert_eq!(data.leaf_count(), 6);
    }

    #[test]
    fn test_first_leaf() {
        assert_eq!(tree!([[5, 6], 7]).first_leaf(), Some(&Value::Int(5)));
        assert_eq!(Value::Int(8).first_leaf(), Some(&Value::Int(8)));
        assert_eq!(tree!([]).first_leaf(), None);
        assert_eq!(tree!([[], 1]).first_leaf(), None);
    }

    #[test]
    fn test_is_all_empty() {
        assert!(tree!([]).is_all_empty());
        assert!(tree!([[], [[]]]).is_all_empty());
        assert!(!tree!([[], [1]]).is_all_empty());
        assert!(!Value::Int(1).is_all_empty());
        assert!(Value::Null.is_all_empty());
    }

    #[test]
    fn test_has_single_item() {
        assert!(Value::Int(3).has_single_item());
        assert!(tree!([3]).has_single_item());
        assert!(tree!([[]]).has_single_item());
        assert!(!tree!([1, 2]).has_single_item());
        assert!(!tree!([[1]]).has_single_item());
    }

    #[test]
    fn test_index_iter_row_major() {
        let coords: Vec<Vec<usize>> = IndexIter::new(&[2, 3]).collect();
        assert_eq!(
            coords,
            vec![
                vec![0, 0],
                vec![0, 1],
                vec![0, 2],
                vec![1, 0],
                vec![1, 1],
                vec![1, 2],
            ]
        );
    }

    #[test]
    fn test_index_iter_rank_one() {
        let coords: Vec<Vec<usize>> = IndexIter::new(&[4]).collect();
        assert_eq!(coords, vec![vec![0], vec![1], vec![2], vec![3]]);
    }

    #[test]
    fn test_index_iter_degenerate_shapes() {
        assert_eq!(IndexIter::new(&[]).count(), 0);
        assert_eq!(IndexIter::new(&[3, 0, 2]).count(), 0);
    }

    #[test]
    fn test_index_iter_exhaustion_is_permanent() {
        let mut iter = IndexIter::new(&[2]);
        assert!(iter.next().is_some());
        assert!(iter.next().is_some());
        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
    }
}
