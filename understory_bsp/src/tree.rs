// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The BSP tree: flat node and leaf arrays with arithmetic child indexing.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::leaf::Leaf;
use crate::types::{Aabb2D, Axis, Scalar};
use crate::util::{auto_depth, debug_event};
use crate::visitors;

/// Deepest tree [`BspTree::create`] will allocate (2^20 leaves).
pub const MAX_DEPTH: u32 = 20;

/// Depth reported by a tree that has never been created.
pub const DEFAULT_DEPTH: u32 = 6;

/// Requested tree depth for [`BspTree::create`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Depth {
    /// Two levels per decimal digit of the expected item count.
    #[default]
    Auto,
    /// An explicit depth.
    Fixed(u32),
}

impl Depth {
    /// The depth `create` would use for `expected_items`, clamped to
    /// `1..=MAX_DEPTH`.
    ///
    /// ```
    /// use understory_bsp::Depth;
    ///
    /// assert_eq!(Depth::Auto.resolve(0), 1);
    /// assert_eq!(Depth::Auto.resolve(1000), 8);
    /// assert_eq!(Depth::Fixed(3).resolve(1000), 3);
    /// ```
    pub const fn resolve(self, expected_items: usize) -> u32 {
        let depth = match self {
            Self::Auto => auto_depth(expected_items),
            Self::Fixed(depth) => depth,
        };
        if depth < 1 {
            1
        } else if depth > MAX_DEPTH {
            MAX_DEPTH
        } else {
            depth
        }
    }
}

/// How [`BspTree::init`] picks split planes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Partition {
    /// Every node splits along x.
    Vertical,
    /// Every node splits along y.
    Horizontal,
    /// Even levels split along x, odd levels along y.
    #[default]
    Both,
}

impl Partition {
    /// Split axis for a node at `level` (the root is level 0).
    #[inline]
    pub const fn axis_at(self, level: u32) -> Axis {
        match self {
            Self::Vertical => Axis::X,
            Self::Horizontal => Axis::Y,
            Self::Both => {
                if level & 1 == 0 {
                    Axis::X
                } else {
                    Axis::Y
                }
            }
        }
    }
}

/// Split plane of a node.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Plane {
    /// Not initialized; descent stops here.
    #[default]
    None,
    /// Splits along x at `pos`.
    Vertical,
    /// Splits along y at `pos`.
    Horizontal,
}

impl Plane {
    /// The axis this plane splits, if any.
    #[inline]
    pub const fn axis(self) -> Option<Axis> {
        match self {
            Self::None => None,
            Self::Vertical => Some(Axis::X),
            Self::Horizontal => Some(Axis::Y),
        }
    }
}

impl From<Axis> for Plane {
    #[inline]
    fn from(axis: Axis) -> Self {
        match axis {
            Axis::X => Self::Vertical,
            Axis::Y => Self::Horizontal,
        }
    }
}

/// Internal node of the tree.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Node<T> {
    /// Split plane.
    pub plane: Plane,
    /// Split coordinate along the plane's axis.
    pub pos: T,
}

impl<T: Scalar> Default for Node<T> {
    fn default() -> Self {
        Self {
            plane: Plane::None,
            pos: T::zero(),
        }
    }
}

#[inline(always)]
const fn first_child(index: usize) -> usize {
    2 * index + 1
}

/// Level of the node (or leaf) at `index` in heap order; the root is 0.
#[inline(always)]
const fn level_of(index: usize) -> u32 {
    (index + 1).ilog2()
}

/// Binary space partition over a 2D region, bucketing integer item ids by
/// leaf cell.
///
/// The tree is a complete binary tree of fixed depth stored as two flat
/// arrays: `2^depth - 1` nodes and `2^depth` leaves. Node `i` has its back
/// child at `2i + 1` and its front child at `2i + 2`; indices past the node
/// array address leaves. Leaf cells are never stored; descent rebuilds them
/// from the region given to [`init`][Self::init] and each node's split.
///
/// The tree stores ids only. Whoever owns the items must pass the same
/// rectangle to [`insert_leaf`][Self::insert_leaf] and
/// [`remove_leaf`][Self::remove_leaf] for a given id.
///
/// # Example
///
/// ```rust
/// use understory_bsp::{Aabb2D, BspTree, Depth, Partition};
///
/// let mut tree = BspTree::<i32>::new();
/// tree.create(1000, Depth::Auto);
/// assert_eq!(tree.depth(), 8);
/// tree.init(Aabb2D::new(0, 0, 1000, 1000), Partition::Both);
///
/// tree.insert_leaf(Aabb2D::new(10, 10, 20, 20), 42);
///
/// let mut found = false;
/// tree.climb_tree(Aabb2D::new(15, 15, 16, 16), |leaf, _cell, _generation| {
///     found |= leaf.contains(&42);
/// });
/// assert!(found);
/// ```
pub struct BspTree<T: Scalar> {
    depth: u32,
    visited: u64,
    bounds: Option<Aabb2D<T>>,
    nodes: Vec<Node<T>>,
    leaves: Vec<Leaf>,
}

impl<T: Scalar> Debug for BspTree<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let items: usize = self.leaves.iter().map(|l| l.len()).sum();
        f.debug_struct("BspTree")
            .field("depth", &self.depth)
            .field("bounds", &self.bounds)
            .field("nodes", &self.nodes.len())
            .field("leaves", &self.leaves.len())
            .field("leaf_entries", &items)
            .field("generation", &self.visited)
            .finish_non_exhaustive()
    }
}

impl<T: Scalar> Default for BspTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Scalar> BspTree<T> {
    /// Create an empty tree. Call [`create`][Self::create] and
    /// [`init`][Self::init] before use.
    pub const fn new() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            visited: 0,
            bounds: None,
            nodes: Vec::new(),
            leaves: Vec::new(),
        }
    }

    /// Allocate a tree sized for `expected_items` items.
    ///
    /// Any previous nodes and leaves are discarded. The new nodes carry no
    /// split until [`init`][Self::init] runs.
    pub fn create(&mut self, expected_items: usize, depth: Depth) {
        self.depth = depth.resolve(expected_items);
        let leaf_count = 1_usize << self.depth;

        self.nodes.clear();
        self.nodes.resize(leaf_count - 1, Node::default());
        self.leaves.clear();
        self.leaves.resize_with(leaf_count, Leaf::default);
        self.bounds = None;

        debug_event!(
            depth = self.depth,
            expected_items,
            leaves = leaf_count,
            "bsp tree created"
        );
    }

    /// Drop all nodes and leaves. Safe to call repeatedly.
    pub fn destroy(&mut self) {
        self.nodes.clear();
        self.leaves.clear();
        self.bounds = None;
        debug_event!("bsp tree destroyed");
    }

    /// Split `area` over the whole tree.
    #[inline]
    pub fn init(&mut self, area: Aabb2D<T>, partition: Partition) {
        self.init_subtree(area, self.depth, partition, 0);
    }

    /// Split `area` over at most `depth` levels of the subtree rooted at
    /// node `root_index`.
    ///
    /// Each visited node splits its region at the center along the axis
    /// `partition` picks for its level; the back child gets the half below
    /// the split and the front child the half from the split on. Leaves are
    /// not touched. Does nothing if `root_index` is not a node.
    pub fn init_subtree(
        &mut self,
        area: Aabb2D<T>,
        depth: u32,
        partition: Partition,
        root_index: usize,
    ) {
        if root_index >= self.nodes.len() {
            return;
        }
        if root_index == 0 {
            self.bounds = Some(area);
        }
        self.init_node(area, depth, partition, root_index);
        debug_event!(
            ?area,
            depth,
            ?partition,
            root_index,
            "bsp tree initialized"
        );
    }

    fn init_node(&mut self, area: Aabb2D<T>, depth: u32, partition: Partition, index: usize) {
        if depth == 0 {
            return;
        }
        let Some(node) = self.nodes.get_mut(index) else {
            return;
        };
        let axis = partition.axis_at(level_of(index));
        let pos = area.center(axis);
        *node = Node {
            plane: axis.into(),
            pos,
        };

        let (back, front) = area.split(axis, pos);
        let child = first_child(index);
        self.init_node(back, depth - 1, partition, child);
        self.init_node(front, depth - 1, partition, child + 1);
    }

    /// Visit every leaf whose cell `query` touches.
    ///
    /// Calls `visitor(leaf, cell, generation)` once per such leaf, back
    /// child before front child at each node. `generation` is bumped once
    /// per call, so visitors can tell queries apart without clearing state.
    /// Along a node's axis the back child is entered when the query's
    /// minimum is below the split and the front child when its maximum is
    /// at or beyond it, so a zero-width query on a split lands in the front
    /// cell only.
    ///
    /// Does nothing on an empty tree. Descent stops at nodes that were
    /// never initialized.
    pub fn climb_tree<F>(&mut self, query: Aabb2D<T>, mut visitor: F)
    where
        F: FnMut(&mut Leaf, &Aabb2D<T>, u64),
    {
        if self.nodes.is_empty() {
            return;
        }
        self.visited += 1;
        let Some(cell) = self.bounds else {
            return;
        };
        climb(
            &self.nodes,
            &mut self.leaves,
            &query,
            cell,
            0,
            self.visited,
            &mut visitor,
        );
    }

    /// Add `id` to every leaf whose cell `rect` touches.
    #[inline]
    pub fn insert_leaf(&mut self, rect: Aabb2D<T>, id: usize) {
        self.climb_tree(rect, visitors::insert(id));
    }

    /// Remove one occurrence of `id` from every leaf whose cell `rect` touches.
    #[inline]
    pub fn remove_leaf(&mut self, rect: Aabb2D<T>, id: usize) {
        self.climb_tree(rect, visitors::remove(id));
    }

    /// Empty every leaf, keeping the partition.
    pub fn clear_leaves(&mut self) {
        for leaf in &mut self.leaves {
            leaf.clear();
        }
    }

    /// Reconstruct the cell of leaf `leaf` by descending from the root.
    ///
    /// Returns `None` for an out-of-range leaf, before `init`, or when a node
    /// on the path was never initialized.
    pub fn leaf_cell(&self, leaf: usize) -> Option<Aabb2D<T>> {
        if leaf >= self.leaves.len() {
            return None;
        }
        let mut cell = self.bounds?;
        // In one-based heap order the bits below the leading one spell the
        // path from the root: 0 for back, 1 for front.
        let path = self.nodes.len() + leaf + 1;
        let mut index = 0;
        for bit in (0..path.ilog2()).rev() {
            let node = self.nodes.get(index)?;
            let (back, front) = cell.split(node.plane.axis()?, node.pos);
            index = first_child(index);
            if (path >> bit) & 1 == 1 {
                cell = front;
                index += 1;
            } else {
                cell = back;
            }
        }
        Some(cell)
    }

    /// Current depth; [`DEFAULT_DEPTH`] before the first `create`.
    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Traversal generation of the most recent [`climb_tree`][Self::climb_tree].
    #[inline]
    pub fn generation(&self) -> u64 {
        self.visited
    }

    /// Region passed to the last root-level initialization.
    #[inline]
    pub fn bounds(&self) -> Option<Aabb2D<T>> {
        self.bounds
    }

    /// Whether the tree holds no nodes (never created, or destroyed).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of internal nodes.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of leaves.
    #[inline]
    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    /// Node at `index`, if any.
    #[inline]
    pub fn node(&self, index: usize) -> Option<&Node<T>> {
        self.nodes.get(index)
    }

    /// Leaf at `index`, if any.
    #[inline]
    pub fn leaf(&self, index: usize) -> Option<&Leaf> {
        self.leaves.get(index)
    }

    /// Mutable leaf at `index`, if any.
    #[inline]
    pub fn leaf_mut(&mut self, index: usize) -> Option<&mut Leaf> {
        self.leaves.get_mut(index)
    }

    /// All leaves in index order.
    #[inline]
    pub fn leaves(&self) -> &[Leaf] {
        &self.leaves
    }
}

fn climb<T, F>(
    nodes: &[Node<T>],
    leaves: &mut [Leaf],
    query: &Aabb2D<T>,
    cell: Aabb2D<T>,
    index: usize,
    generation: u64,
    visitor: &mut F,
) where
    T: Scalar,
    F: FnMut(&mut Leaf, &Aabb2D<T>, u64),
{
    let Some(node) = nodes.get(index) else {
        if let Some(leaf) = leaves.get_mut(index - nodes.len()) {
            visitor(leaf, &cell, generation);
        }
        return;
    };
    let Some(axis) = node.plane.axis() else {
        return;
    };
    let pos = node.pos;
    let (min, max) = query.extent(axis);
    let (back, front) = cell.split(axis, pos);
    let child = first_child(index);
    if min < pos {
        climb(nodes, leaves, query, back, child, generation, visitor);
    }
    if max >= pos {
        climb(nodes, leaves, query, front, child + 1, generation, visitor);
    }
}
