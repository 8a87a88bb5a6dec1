//! Planar geometry helpers shared by navigation and decision making.
//!
//! World coordinates are continuous `f64` values with the origin in the top-left
//! corner of the arena. Angles are radians measured with `atan2(dy, dx)`.
//!
//! Displacements and forces are plain [`glam::DVec2`] values. [`Point`] stays a
//! named struct so snapshots serialize as `{"x": .., "y": ..}`.

use std::f64::consts::{PI, TAU};
use std::fmt;
use std::ops::{Add, Sub};

use glam::DVec2;

/// A displacement or force in world coordinates.
pub type Vector = DVec2;

/// A position in world coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn to_vec(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        self.to_vec().distance(other.to_vec())
    }

    /// Absolute bearing from `self` towards `other`.
    #[inline]
    pub fn bearing(self, other: Point) -> f64 {
        (other - self).to_angle()
    }

    /// Offsets the point by `length` along `angle`.
    pub fn project(self, angle: f64, length: f64) -> Point {
        self + DVec2::from_angle(angle) * length
    }

    /// Clamps both coordinates into `[min, max]` on their axis.
    ///
    /// `min` must not exceed `max` on either axis.
    pub fn clamp(self, min: Point, max: Point) -> Point {
        self.to_vec().clamp(min.to_vec(), max.to_vec()).into()
    }

    pub fn is_finite(self) -> bool {
        self.to_vec().is_finite()
    }
}

impl From<DVec2> for Point {
    fn from(v: DVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

impl Sub for Point {
    type Output = DVec2;

    fn sub(self, rhs: Point) -> DVec2 {
        self.to_vec() - rhs.to_vec()
    }
}

impl Add<DVec2> for Point {
    type Output = Point;

    fn add(self, rhs: DVec2) -> Point {
        (self.to_vec() + rhs).into()
    }
}

/// Rotates `v` into a frame whose x-axis points along `facing`.
///
/// For an agent facing `facing`, the returned `x` is the forward component
/// and `y` the strafe (rightward in screen coordinates) component.
#[inline]
pub fn to_local(v: DVec2, facing: f64) -> DVec2 {
    DVec2::from_angle(-facing).rotate(v)
}

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: Point, b: Point) -> f64 {
    a.distance(b)
}

/// Signed angle to turn from heading `from` to heading `to`, in `(-π, π]`.
pub fn rel_angle(from: f64, to: f64) -> f64 {
    let mut delta = (to - from) % TAU;
    if delta > PI {
        delta -= TAU;
    } else if delta <= -PI {
        delta += TAU;
    }
    delta
}
