use std::ops::{Index, Mul, Neg};

use super::Point;

/// Displacement between two points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector(pub [f64; 2]);

impl Vector {
  pub fn squared_magnitude(&self) -> f64 {
    self.0[0] * self.0[0] + self.0[1] * self.0[1]
  }

  pub fn dot(&self, other: &Vector) -> f64 {
    self.0[0] * other.0[0] + self.0[1] * other.0[1]
  }

  pub fn cross(&self, other: &Vector) -> f64 {
    self.0[0] * other.0[1] - self.0[1] * other.0[0]
  }

  /// Rotated a quarter turn counter-clockwise.
  pub fn perpendicular(&self) -> Vector {
    Vector([-self.0[1], self.0[0]])
  }

  pub fn is_zero(&self) -> bool {
    self.0 == [0.0, 0.0]
  }
}

impl Index<usize> for Vector {
  type Output = f64;
  fn index(&self, index: usize) -> &f64 {
    self.0.index(index)
  }
}

impl From<Point> for Vector {
  fn from(point: Point) -> Vector {
    Vector(point.array)
  }
}

impl Mul<f64> for Vector {
  type Output = Vector;
  fn mul(self, rhs: f64) -> Vector {
    Vector([self.0[0] * rhs, self.0[1] * rhs])
  }
}

impl Neg for Vector {
  type Output = Vector;
  fn neg(self) -> Vector {
    Vector([-self.0[0], -self.0[1]])
  }
}
