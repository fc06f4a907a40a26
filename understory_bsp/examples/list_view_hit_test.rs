// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hit-testing an icon-mode list view: a grid of item rectangles, a rubber-band
//! selection, and a few items dragged to new positions.

use understory_bsp::{Aabb2D, ItemIndex};

const COLUMNS: i32 = 40;
const CELL: i32 = 64;
const ICON: i32 = 48;

fn main() {
    let mut view = ItemIndex::new(Aabb2D::new(0, 0, COLUMNS * CELL, 25 * CELL));
    for (id, slot) in (0..1000_i32).enumerate() {
        let x = (slot % COLUMNS) * CELL;
        let y = (slot / COLUMNS) * CELL;
        view.insert(id, Aabb2D::from_xywh(x, y, ICON, ICON));
    }
    println!("{} items, tree depth {}", view.len(), view.tree().depth());

    // Mouse press over the third icon in the second row.
    let hits = view.query_point(2 * CELL + 10, CELL + 10);
    println!("hit at (138, 74): {hits:?}");

    // Rubber band over the top-left corner.
    let mut selected = view.query_rect(Aabb2D::new(0, 0, 150, 100));
    selected.sort_unstable();
    println!("rubber band selects {selected:?}");

    // Drag the selection to the far corner.
    for id in &selected {
        if let Some(r) = view.get(*id) {
            view.update(*id, Aabb2D::from_xywh(r.min_x + 2000, r.min_y + 1400, ICON, ICON));
        }
    }
    let moved = view.query_rect(Aabb2D::new(2000, 1400, 2200, 1600));
    println!("after drag, {} items near (2000, 1400)", moved.len());

    let mut leaf_sizes: Vec<_> = view.tree().leaves().iter().map(|l| l.len()).collect();
    leaf_sizes.sort_unstable();
    println!(
        "leaf occupancy: min {}, median {}, max {}",
        leaf_sizes.first().copied().unwrap_or(0),
        leaf_sizes.get(leaf_sizes.len() / 2).copied().unwrap_or(0),
        leaf_sizes.last().copied().unwrap_or(0),
    );
}
