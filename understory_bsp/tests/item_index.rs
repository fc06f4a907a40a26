// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `ItemIndex` against a linear scan.

#![cfg(feature = "item_index")]

use proptest::prelude::*;
use understory_bsp::{Aabb2D, Depth, ItemIndex, Partition};

fn rect() -> impl Strategy<Value = Aabb2D<i64>> {
    (-200..=1200_i64, -200..=1200_i64, 0..=250_i64, 0..=250_i64)
        .prop_map(|(x, y, w, h)| Aabb2D::from_xywh(x, y, w, h))
}

fn brute_force(rects: &[Option<Aabb2D<i64>>], query: &Aabb2D<i64>) -> Vec<usize> {
    rects
        .iter()
        .enumerate()
        .filter_map(|(id, r)| r.filter(|r| r.overlaps(query)).map(|_| id))
        .collect()
}

proptest! {
    #[test]
    fn queries_match_linear_scan(
        rects in prop::collection::vec(rect(), 0..120),
        moves in prop::collection::vec((0..120_usize, rect()), 0..40),
        removals in prop::collection::vec(0..120_usize, 0..20),
        query in rect(),
    ) {
        let mut items = ItemIndex::new(Aabb2D::new(0, 0, 1000, 1000));
        let mut model: Vec<Option<Aabb2D<i64>>> = Vec::new();
        for (id, r) in rects.iter().enumerate() {
            items.insert(id, *r);
            model.push(Some(*r));
        }
        for (id, r) in &moves {
            let present = model.get(*id).is_some_and(Option::is_some);
            prop_assert_eq!(items.update(*id, *r), present);
            if present {
                model[*id] = Some(*r);
            }
        }
        for id in &removals {
            let expected = model.get_mut(*id).and_then(Option::take);
            prop_assert_eq!(items.remove(*id), expected);
        }

        let mut hits = items.query_rect(query);
        hits.sort_unstable();
        prop_assert_eq!(hits, brute_force(&model, &query));
    }

    #[test]
    fn single_axis_partitions_agree(
        rects in prop::collection::vec(rect(), 0..80),
        query in rect(),
        depth in 1..=10_u32,
    ) {
        let bounds = Aabb2D::new(0, 0, 1000, 1000);
        let mut results = Vec::new();
        for partition in [Partition::Both, Partition::Vertical, Partition::Horizontal] {
            let mut items = ItemIndex::with_options(bounds, partition, Depth::Fixed(depth));
            for (id, r) in rects.iter().enumerate() {
                items.insert(id, *r);
            }
            let mut hits = items.query_rect(query);
            hits.sort_unstable();
            results.push(hits);
        }
        prop_assert_eq!(&results[0], &results[1]);
        prop_assert_eq!(&results[0], &results[2]);
    }
}
