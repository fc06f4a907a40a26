// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types and helpers.
//!
//! Two readings of [`Aabb2D`] appear in this crate:
//!
//! - **Query and item rectangles** are closed: both edges belong to the box
//!   (see [`Aabb2D::contains_point`] and [`Aabb2D::overlaps`]).
//! - **Leaf cells** are half-open: `[min, max)` on both axes (see
//!   [`Aabb2D::cell_contains_point`] and [`Aabb2D::touches_cell`]).

use core::fmt::Debug;

/// Coordinate axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal axis; a split along it is a vertical plane.
    X,
    /// Vertical axis; a split along it is a horizontal plane.
    Y,
}

/// Axis-aligned bounding box in 2D.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Aabb2D<T> {
    /// Minimum x (left)
    pub min_x: T,
    /// Minimum y (top)
    pub min_y: T,
    /// Maximum x (right)
    pub max_x: T,
    /// Maximum y (bottom)
    pub max_y: T,
}

impl<T> Aabb2D<T> {
    /// Create a new AABB from min/max corners.
    #[inline(always)]
    pub const fn new(min_x: T, min_y: T, max_x: T, max_y: T) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }
}

impl<T: Copy> Aabb2D<T> {
    /// A degenerate box covering exactly one point.
    #[inline]
    pub const fn from_point(x: T, y: T) -> Self {
        Self::new(x, y, x, y)
    }

    /// Minimum and maximum along `axis`.
    #[inline]
    pub const fn extent(&self, axis: Axis) -> (T, T) {
        match axis {
            Axis::X => (self.min_x, self.max_x),
            Axis::Y => (self.min_y, self.max_y),
        }
    }

    /// Split at `pos` along `axis` into `(back, front)`.
    ///
    /// The back half ends at `pos`, the front half starts at it; the other
    /// axis is inherited unchanged. Read as half-open cells the two halves
    /// tile `self` exactly when `pos` lies within its extent.
    #[inline]
    pub const fn split(&self, axis: Axis, pos: T) -> (Self, Self) {
        let mut back = *self;
        let mut front = *self;
        match axis {
            Axis::X => {
                back.max_x = pos;
                front.min_x = pos;
            }
            Axis::Y => {
                back.max_y = pos;
                front.min_y = pos;
            }
        }
        (back, front)
    }
}

impl<T: Copy + PartialOrd> Aabb2D<T> {
    /// Whether this AABB contains the point.
    #[inline]
    pub fn contains_point(&self, x: T, y: T) -> bool {
        self.min_x <= x && self.min_y <= y && x <= self.max_x && y <= self.max_y
    }

    /// Whether the point lies in this box read as a half-open cell.
    ///
    /// The maximum edges are excluded, so neighbouring cells produced by
    /// [`split`][Self::split] never both claim a point.
    #[inline]
    pub fn cell_contains_point(&self, x: T, y: T) -> bool {
        self.min_x <= x && self.min_y <= y && x < self.max_x && y < self.max_y
    }

    /// Determines whether this AABB overlaps with another in any way.
    ///
    /// Note that the edge of the AABB is considered to be part of itself, meaning
    /// that two AABBs that share an edge are considered to overlap.
    ///
    /// # Examples
    ///
    /// ```
    /// use understory_bsp::Aabb2D;
    ///
    /// let aabb1 = Aabb2D::new(0.0, 0.0, 10.0, 10.0);
    /// let aabb2 = Aabb2D::new(10.0, 0.0, 20.0, 10.0);
    /// assert!(aabb1.overlaps(&aabb2));
    ///
    /// let aabb2 = Aabb2D::new(11.0, 0.0, 20.0, 10.0);
    /// assert!(!aabb1.overlaps(&aabb2));
    /// ```
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y
    }

    /// Whether this closed query box touches `cell` read as a half-open cell.
    ///
    /// This is the test BSP descent applies one axis at a time: a query
    /// whose maximum edge sits exactly on a cell's minimum edge touches it,
    /// one whose minimum edge sits on a cell's maximum edge does not.
    ///
    /// ```
    /// use understory_bsp::Aabb2D;
    ///
    /// let cell = Aabb2D::new(10, 0, 20, 10);
    /// assert!(Aabb2D::new(0, 0, 10, 5).touches_cell(&cell));
    /// assert!(!Aabb2D::new(20, 0, 30, 5).touches_cell(&cell));
    /// ```
    #[inline]
    pub fn touches_cell(&self, cell: &Self) -> bool {
        self.min_x < cell.max_x
            && self.max_x >= cell.min_x
            && self.min_y < cell.max_y
            && self.max_y >= cell.min_y
    }

    /// Return true if the AABB is empty or inverted (no area). Assumes no NaN.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.max_x <= self.min_x || self.max_y <= self.min_y
    }
}

impl<T: Scalar> Aabb2D<T> {
    /// Create an AABB from origin and size.
    #[inline]
    pub fn from_xywh(x: T, y: T, w: T, h: T) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: T::add(x, w),
            max_y: T::add(y, h),
        }
    }

    /// Center coordinate along `axis`.
    #[inline]
    pub fn center(&self, axis: Axis) -> T {
        let (lo, hi) = self.extent(axis);
        T::mid(lo, hi)
    }

    /// Compute the area of an AABB using the scalar's widened accumulator type.
    #[inline]
    pub fn area(&self) -> T::Acc {
        let w = T::max(T::sub(self.max_x, self.min_x), T::zero());
        let h = T::max(T::sub(self.max_y, self.min_y), T::zero());
        T::widen(w) * T::widen(h)
    }
}

/// Numeric scalar abstraction for 2D AABBs.
///
/// Provides the handful of operations partitioning needs (midpoints for
/// split planes) and a widened accumulator type for area (e.g., f32→f64,
/// i64→i128).
pub trait Scalar: Copy + PartialOrd + Debug {
    /// Widened accumulator type suitable for area computations.
    type Acc: Copy
        + PartialOrd
        + core::ops::Add<Output = Self::Acc>
        + core::ops::Sub<Output = Self::Acc>
        + core::ops::Mul<Output = Self::Acc>
        + Debug;

    /// Add two scalar values.
    fn add(a: Self, b: Self) -> Self;

    /// Subtract two scalar values: a - b.
    fn sub(a: Self, b: Self) -> Self;

    /// Zero value for the scalar type.
    fn zero() -> Self;

    /// Max of the two scalar values.
    fn max(a: Self, b: Self) -> Self;

    /// Midpoint between a and b, never outside `[min(a, b), max(a, b)]`.
    fn mid(a: Self, b: Self) -> Self;

    /// Convert a scalar to the accumulator type.
    fn widen(v: Self) -> Self::Acc;
}

impl Scalar for f32 {
    type Acc = f64;

    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a + b
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a - b
    }

    #[inline(always)]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn max(a: Self, b: Self) -> Self {
        Self::max(a, b)
    }

    #[inline]
    fn mid(a: Self, b: Self) -> Self {
        debug_assert!(!a.is_nan() && !b.is_nan(), "NaN coordinate");
        0.5 * (a + b)
    }

    #[inline]
    fn widen(v: Self) -> Self::Acc {
        v as f64
    }
}

impl Scalar for f64 {
    type Acc = Self;

    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a + b
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a - b
    }

    #[inline(always)]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn max(a: Self, b: Self) -> Self {
        Self::max(a, b)
    }

    #[inline]
    fn mid(a: Self, b: Self) -> Self {
        debug_assert!(!a.is_nan() && !b.is_nan(), "NaN coordinate");
        0.5 * (a + b)
    }

    #[inline(always)]
    fn widen(v: Self) -> Self::Acc {
        v
    }
}

impl Scalar for i32 {
    type Acc = i64;

    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a.saturating_add(b)
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a.saturating_sub(b)
    }

    #[inline(always)]
    fn zero() -> Self {
        0
    }

    #[inline]
    fn max(a: Self, b: Self) -> Self {
        core::cmp::max(a, b)
    }

    #[inline]
    fn mid(a: Self, b: Self) -> Self {
        // Floor average without overflow.
        (a & b) + ((a ^ b) >> 1)
    }

    #[inline]
    fn widen(v: Self) -> Self::Acc {
        v.into()
    }
}

impl Scalar for i64 {
    type Acc = i128;

    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a.saturating_add(b)
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a.saturating_sub(b)
    }

    #[inline(always)]
    fn zero() -> Self {
        0
    }

    #[inline]
    fn max(a: Self, b: Self) -> Self {
        core::cmp::max(a, b)
    }

    #[inline]
    fn mid(a: Self, b: Self) -> Self {
        // Floor average without overflow.
        (a & b) + ((a ^ b) >> 1)
    }

    #[inline]
    fn widen(v: Self) -> Self::Acc {
        v.into()
    }
}

#[cfg(feature = "kurbo")]
impl From<kurbo::Rect> for Aabb2D<f64> {
    #[inline]
    fn from(r: kurbo::Rect) -> Self {
        let r = r.abs();
        Self::new(r.x0, r.y0, r.x1, r.y1)
    }
}

#[cfg(feature = "kurbo")]
impl From<Aabb2D<f64>> for kurbo::Rect {
    #[inline]
    fn from(a: Aabb2D<f64>) -> Self {
        Self::new(a.min_x, a.min_y, a.max_x, a.max_y)
    }
}
