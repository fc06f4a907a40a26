// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Item-owning index that keeps a [`BspTree`] in sync with item rectangles.

use alloc::vec::Vec;
use core::fmt::Debug;

use hashbrown::HashMap;

use crate::tree::{BspTree, Depth, Partition};
use crate::types::{Aabb2D, Scalar};
use crate::util::debug_event;

#[derive(Copy, Clone, Debug)]
struct Item<T> {
    rect: Aabb2D<T>,
    // Generation of the last query that reported this item.
    visited: u64,
}

/// Items keyed by id, spatially indexed by a [`BspTree`].
///
/// The index owns each item's rectangle, so removals and moves always take
/// the id out of exactly the leaves it was put into. Queries walk the tree,
/// test candidates against their exact rectangle, and report each id at most
/// once even when it spans several leaves.
///
/// Items may lie partly or wholly outside `bounds`; they land in the edge
/// leaves and stay queryable.
///
/// # Example
///
/// ```rust
/// use understory_bsp::{Aabb2D, ItemIndex};
///
/// let mut items = ItemIndex::new(Aabb2D::new(0, 0, 800, 600));
/// items.insert(1, Aabb2D::new(10, 10, 110, 30));
/// items.insert(2, Aabb2D::new(10, 40, 110, 60));
///
/// assert_eq!(items.query_point(50, 20), vec![1]);
///
/// items.update(1, Aabb2D::new(400, 300, 500, 320));
/// assert!(items.query_point(50, 20).is_empty());
/// assert_eq!(items.query_rect(Aabb2D::new(0, 0, 800, 600)).len(), 2);
/// ```
pub struct ItemIndex<T: Scalar> {
    tree: BspTree<T>,
    items: HashMap<usize, Item<T>>,
    bounds: Aabb2D<T>,
    partition: Partition,
    depth: Depth,
}

impl<T: Scalar> Debug for ItemIndex<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ItemIndex")
            .field("bounds", &self.bounds)
            .field("partition", &self.partition)
            .field("depth", &self.depth)
            .field("items", &self.items.len())
            .field("tree", &self.tree)
            .finish()
    }
}

impl<T: Scalar> ItemIndex<T> {
    /// Create an empty index over `bounds`, alternating split planes and
    /// choosing the depth from the item count.
    pub fn new(bounds: Aabb2D<T>) -> Self {
        Self::with_options(bounds, Partition::Both, Depth::Auto)
    }

    /// Create an empty index with an explicit partition mode and depth policy.
    ///
    /// With [`Depth::Auto`] the tree is rebuilt deeper as the item count
    /// crosses each power of ten; with [`Depth::Fixed`] it never changes depth.
    pub fn with_options(bounds: Aabb2D<T>, partition: Partition, depth: Depth) -> Self {
        let mut index = Self {
            tree: BspTree::new(),
            items: HashMap::new(),
            bounds,
            partition,
            depth,
        };
        index.rebuild();
        index
    }

    /// Insert or replace the item `id`.
    ///
    /// Returns the previous rectangle if the id was already present.
    pub fn insert(&mut self, id: usize, rect: Aabb2D<T>) -> Option<Aabb2D<T>> {
        let previous = self.items.insert(id, Item { rect, visited: 0 });
        if let Some(old) = previous {
            self.tree.remove_leaf(old.rect, id);
        }
        if self.depth.resolve(self.items.len()) > self.tree.depth() {
            self.rebuild();
        } else {
            self.tree.insert_leaf(rect, id);
        }
        previous.map(|item| item.rect)
    }

    /// Move the item `id` to `rect`. Returns `false` if there is no such item.
    pub fn update(&mut self, id: usize, rect: Aabb2D<T>) -> bool {
        let Some(item) = self.items.get_mut(&id) else {
            return false;
        };
        let old = core::mem::replace(&mut item.rect, rect);
        if old != rect {
            self.tree.remove_leaf(old, id);
            self.tree.insert_leaf(rect, id);
        }
        true
    }

    /// Remove the item `id`, returning its rectangle.
    pub fn remove(&mut self, id: usize) -> Option<Aabb2D<T>> {
        let item = self.items.remove(&id)?;
        self.tree.remove_leaf(item.rect, id);
        Some(item.rect)
    }

    /// Rectangle of the item `id`.
    pub fn get(&self, id: usize) -> Option<Aabb2D<T>> {
        self.items.get(&id).map(|item| item.rect)
    }

    /// Whether the item `id` is present.
    pub fn contains(&self, id: usize) -> bool {
        self.items.contains_key(&id)
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether there are no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Remove every item and shrink the tree back to its minimum size.
    pub fn clear(&mut self) {
        self.items.clear();
        self.rebuild();
    }

    /// The region the tree is split over.
    pub fn bounds(&self) -> Aabb2D<T> {
        self.bounds
    }

    /// Re-split over new bounds and re-insert every item.
    pub fn set_bounds(&mut self, bounds: Aabb2D<T>) {
        self.bounds = bounds;
        self.rebuild();
    }

    /// Recreate the tree for the current item count and re-insert every item.
    pub fn rebuild(&mut self) {
        self.tree.create(self.items.len(), self.depth);
        self.tree.init(self.bounds, self.partition);
        for (&id, item) in &self.items {
            self.tree.insert_leaf(item.rect, id);
        }
        debug_event!(
            items = self.items.len(),
            depth = self.tree.depth(),
            "item index rebuilt"
        );
    }

    /// The underlying tree.
    pub fn tree(&self) -> &BspTree<T> {
        &self.tree
    }

    /// Visit items whose rectangle overlaps `rect` (edges included).
    ///
    /// Calls `f(id, item_rect)` once per matching item, in leaf order.
    pub fn visit_rect<F: FnMut(usize, Aabb2D<T>)>(&mut self, rect: Aabb2D<T>, f: F) {
        self.visit_matching(rect, |item| item.overlaps(&rect), f);
    }

    /// Collect the ids of items whose rectangle overlaps `rect`.
    pub fn query_rect(&mut self, rect: Aabb2D<T>) -> Vec<usize> {
        let mut out = Vec::new();
        self.visit_rect(rect, |id, _| out.push(id));
        out
    }

    /// Visit items whose rectangle contains the point (edges included).
    pub fn visit_point<F: FnMut(usize, Aabb2D<T>)>(&mut self, x: T, y: T, f: F) {
        self.visit_matching(
            Aabb2D::from_point(x, y),
            |item| item.contains_point(x, y),
            f,
        );
    }

    /// Collect the ids of items whose rectangle contains the point.
    pub fn query_point(&mut self, x: T, y: T) -> Vec<usize> {
        let mut out = Vec::new();
        self.visit_point(x, y, |id, _| out.push(id));
        out
    }

    // Climb with `query` and report each candidate once per traversal if
    // `accept` holds for its exact rectangle.
    fn visit_matching<P, F>(&mut self, query: Aabb2D<T>, accept: P, mut f: F)
    where
        P: Fn(&Aabb2D<T>) -> bool,
        F: FnMut(usize, Aabb2D<T>),
    {
        let items = &mut self.items;
        self.tree.climb_tree(query, |leaf, _cell, generation| {
            for &id in leaf.iter() {
                let Some(item) = items.get_mut(&id) else {
                    continue;
                };
                if item.visited != generation && accept(&item.rect) {
                    item.visited = generation;
                    f(id, item.rect);
                }
            }
        });
    }
}
