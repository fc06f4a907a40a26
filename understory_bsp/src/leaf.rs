// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Leaf buckets holding item ids.

use core::fmt::Debug;
use core::ops::Deref;

use smallvec::SmallVec;

/// A terminal bucket of the tree: the ids of items whose rectangle touches
/// the leaf's cell.
///
/// Order is insertion order but carries no meaning. The same id may appear
/// more than once if it was inserted more than once; [`remove`][Self::remove]
/// takes out a single occurrence.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Leaf {
    items: SmallVec<[usize; 4]>,
}

impl Leaf {
    /// Append an id.
    #[inline]
    pub fn push(&mut self, id: usize) {
        self.items.push(id);
    }

    /// Remove one occurrence of `id`. Returns whether one was found.
    pub fn remove(&mut self, id: usize) -> bool {
        match self.items.iter().position(|&i| i == id) {
            Some(at) => {
                self.items.remove(at);
                true
            }
            None => false,
        }
    }

    /// Drop every id.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// The ids as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.items
    }
}

impl Deref for Leaf {
    type Target = [usize];

    #[inline]
    fn deref(&self) -> &[usize] {
        &self.items
    }
}

impl Debug for Leaf {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}
