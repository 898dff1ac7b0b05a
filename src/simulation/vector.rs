//! Immutable 2D vector used for particle state
//!
//! `Vector2D` wraps an `nalgebra` `Vector2<f64>` and exposes the small
//! arithmetic surface the integrators need. Every operation returns a new value.

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use nalgebra::Vector2;

use crate::simulation::errors::VectorError;
use crate::simulation::output::format_float;

pub type NVec2 = Vector2<f64>;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2D(NVec2);

impl Vector2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self(NVec2::new(x, y))
    }

    pub fn zeros() -> Self {
        Self(NVec2::zeros())
    }

    pub fn x(&self) -> f64 {
        self.0.x
    }

    pub fn y(&self) -> f64 {
        self.0.y
    }

    pub fn add(&self, other: &Vector2D) -> Vector2D {
        Self(self.0 + other.0)
    }

    pub fn scalar_product(&self, n: f64) -> Vector2D {
        Self(self.0 * n)
    }

    pub fn dot_product(&self, other: &Vector2D) -> f64 {
        self.0.dot(&other.0)
    }

    /// Euclidean length, `sqrt(v · v)` with the exact IEEE square root
    pub fn abs(&self) -> f64 {
        self.dot_product(self).sqrt()
    }

    /// Component access: `0 -> x`, `1 -> y`
    pub fn component(&self, index: usize) -> Result<f64, VectorError> {
        match index {
            0 => Ok(self.0.x),
            1 => Ok(self.0.y),
            _ => Err(VectorError::IndexOutOfRange(index)),
        }
    }
}

impl From<NVec2> for Vector2D {
    fn from(v: NVec2) -> Self {
        Self(v)
    }
}

impl From<[f64; 2]> for Vector2D {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl Add for Vector2D {
    type Output = Vector2D;

    fn add(self, rhs: Vector2D) -> Vector2D {
        Vector2D::add(&self, &rhs)
    }
}

impl Sub for Vector2D {
    type Output = Vector2D;

    fn sub(self, rhs: Vector2D) -> Vector2D {
        Self(self.0 - rhs.0)
    }
}

impl Neg for Vector2D {
    type Output = Vector2D;

    fn neg(self) -> Vector2D {
        Self(-self.0)
    }
}

// vector * vector is the dot product
impl Mul for Vector2D {
    type Output = f64;

    fn mul(self, rhs: Vector2D) -> f64 {
        self.dot_product(&rhs)
    }
}

impl Mul<f64> for Vector2D {
    type Output = Vector2D;

    fn mul(self, rhs: f64) -> Vector2D {
        self.scalar_product(rhs)
    }
}

impl Mul<Vector2D> for f64 {
    type Output = Vector2D;

    fn mul(self, rhs: Vector2D) -> Vector2D {
        rhs.scalar_product(self)
    }
}

impl Div<f64> for Vector2D {
    type Output = Vector2D;

    fn div(self, rhs: f64) -> Vector2D {
        Self(self.0 / rhs)
    }
}

impl AddAssign for Vector2D {
    fn add_assign(&mut self, rhs: Vector2D) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Vector2D {
    fn sub_assign(&mut self, rhs: Vector2D) {
        self.0 -= rhs.0;
    }
}

impl fmt::Display for Vector2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", format_float(self.0.x), format_float(self.0.y))
    }
}
