// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory BSP: a binary space partition for 2D hit-testing and region queries.
//!
//! [`BspTree`] splits a fixed region into a complete binary tree of cells and
//! buckets opaque integer item ids by the cells their rectangles touch. It never
//! stores item geometry; callers pass a rectangle on every insert, remove, and
//! query, and receive matching leaves through a visitor closure.
//!
//! - [`BspTree::create`] sizes the tree, either from an expected item count
//!   ([`Depth::Auto`], two levels per decimal digit) or an explicit depth.
//! - [`BspTree::init`] splits a region at cell centers, alternating vertical and
//!   horizontal planes or using one axis only ([`Partition`]).
//! - [`BspTree::climb_tree`] walks every leaf a query rectangle touches, handing
//!   the visitor the leaf, its reconstructed cell, and a traversal generation.
//! - [`visitors::insert`] and [`visitors::remove`] maintain leaf membership.
//!
//! [`ItemIndex`] (feature `item_index`) sits on top: it owns item rectangles,
//! keeps the tree in sync as items move, grows the tree as the item count
//! grows, and answers deduplicated point and rectangle queries.
//!
//! Coordinates are generic over [`Scalar`] (`i32`, `i64`, `f32`, `f64`).
//!
//! ## Features
//!
//! - `item_index` *(default)*: enables [`ItemIndex`], backed by `hashbrown`.
//! - `kurbo`: conversions between [`Aabb2D<f64>`] and `kurbo::Rect`. Pair with
//!   `std` *(default)* or `libm`.
//! - `tracing`: emits `debug` events when trees are created, initialized,
//!   destroyed, or rebuilt.
//!
//! # Example
//!
//! ```rust
//! use understory_bsp::{Aabb2D, BspTree, Depth, Partition};
//!
//! let mut tree = BspTree::<i32>::new();
//! tree.create(100, Depth::Auto);
//! tree.init(Aabb2D::new(0, 0, 640, 480), Partition::Both);
//!
//! tree.insert_leaf(Aabb2D::new(10, 10, 50, 30), 1);
//! tree.insert_leaf(Aabb2D::new(600, 400, 630, 470), 2);
//!
//! // Candidates near a point; the caller checks exact geometry.
//! let mut candidates = Vec::new();
//! tree.climb_tree(Aabb2D::from_point(20, 20), |leaf, _cell, _generation| {
//!     candidates.extend_from_slice(leaf);
//! });
//! assert_eq!(candidates, vec![1]);
//! ```
//!
//! ### Float semantics
//!
//! This crate assumes no NaNs for floating-point coordinates. Debug builds may assert.

#![no_std]

extern crate alloc;

#[cfg(feature = "item_index")]
mod items;
mod leaf;
mod tree;
mod types;
pub(crate) mod util;
pub mod visitors;

#[cfg(feature = "item_index")]
pub use items::ItemIndex;
pub use leaf::Leaf;
pub use tree::{BspTree, DEFAULT_DEPTH, Depth, MAX_DEPTH, Node, Partition, Plane};
pub use types::{Aabb2D, Axis, Scalar};
