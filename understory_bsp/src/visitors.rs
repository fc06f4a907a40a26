// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stock visitors for [`BspTree::climb_tree`][crate::BspTree::climb_tree].
//!
//! A visitor is any `FnMut(&mut Leaf, &Aabb2D<T>, u64)`: it receives the
//! leaf's ids, the leaf's reconstructed cell, and the traversal generation.
//! These two maintain leaf membership; hit-testing visitors are usually
//! closures written at the call site.
//!
//! ```rust
//! use understory_bsp::{visitors, Aabb2D, BspTree, Depth, Partition};
//!
//! let mut tree = BspTree::<f64>::new();
//! tree.create(16, Depth::Auto);
//! tree.init(Aabb2D::new(0.0, 0.0, 64.0, 64.0), Partition::Both);
//!
//! let r = Aabb2D::new(1.0, 1.0, 2.0, 2.0);
//! tree.climb_tree(r, visitors::insert(5));
//! tree.climb_tree(r, visitors::remove(5));
//! assert!(tree.leaves().iter().all(|leaf| leaf.is_empty()));
//! ```

use crate::leaf::Leaf;
use crate::types::Aabb2D;

/// Append `id` to each visited leaf.
///
/// Appends unconditionally; inserting the same id twice over the same
/// rectangle leaves two entries.
pub fn insert<T>(id: usize) -> impl FnMut(&mut Leaf, &Aabb2D<T>, u64) {
    move |leaf, _cell, _generation| leaf.push(id)
}

/// Remove one occurrence of `id` from each visited leaf, if present.
pub fn remove<T>(id: usize) -> impl FnMut(&mut Leaf, &Aabb2D<T>, u64) {
    move |leaf, _cell, _generation| {
        leaf.remove(id);
    }
}
