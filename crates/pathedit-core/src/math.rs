//! Plain 2D vector math used by the path model and the segment commands.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

/// A 2D vector in field coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    /// Creates a new vector.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Midpoint between this vector and another.
    pub fn midpoint(self, other: Vector) -> Vector {
        Vector::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Point reflection of `other` through `self`.
    ///
    /// Used to synthesize tangent-continuous middle controls: the mirror of
    /// the neighboring segment's tangent control through a shared endpoint.
    pub fn mirror(self, other: Vector) -> Vector {
        Vector::new(2.0 * self.x - other.x, 2.0 * self.y - other.y)
    }

    /// Euclidean distance to another vector.
    pub fn distance(self, other: Vector) -> f64 {
        (other - self).length()
    }

    /// Euclidean length.
    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Vector::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, rhs: f64) -> Vector {
        Vector::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector::new(-self.x, -self.y)
    }
}
