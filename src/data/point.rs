use geometry_predicates::predicates::orient2d;
use rand::distributions::{Distribution, Standard};
use rand::Rng;
use std::ops::{Add, Index, Sub};

use super::Vector;
use crate::utils::approx_eq;

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Point {
  pub array: [f64; 2],
}

// Random sampling in the unit square.
impl Distribution<Point> for Standard {
  fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Point {
    Point::new([rng.gen(), rng.gen()])
  }
}

impl Point {
  pub const fn new(array: [f64; 2]) -> Point {
    Point { array }
  }

  pub fn x(&self) -> f64 {
    self.array[0]
  }

  pub fn y(&self) -> f64 {
    self.array[1]
  }

  pub fn is_finite(&self) -> bool {
    self.array.iter().all(|c| c.is_finite())
  }

  /// Both coordinates within [`EPSILON`](crate::EPSILON) of each other.
  pub fn approx_eq(&self, other: &Point) -> bool {
    approx_eq(self.x(), other.x()) && approx_eq(self.y(), other.y())
  }

  pub fn squared_euclidean_distance(&self, rhs: &Point) -> f64 {
    (*self - *rhs).squared_magnitude()
  }

  pub fn midpoint(&self, other: &Point) -> Point {
    Point::new([
      (self.x() + other.x()) / 2.0,
      (self.y() + other.y()) / 2.0,
    ])
  }

  /// Twice the signed area of the triangle `self`, `q`, `r`. Positive when the
  /// three points make a left turn. The sign is exact.
  pub fn orient(&self, q: &Point, r: &Point) -> f64 {
    orient2d(self.array, q.array, r.array)
  }

  /// Angle of `other` as seen from `self`, in `(-pi, pi]`.
  pub fn angle_to(&self, other: &Point) -> f64 {
    (other.y() - self.y()).atan2(other.x() - self.x())
  }
}

impl Index<usize> for Point {
  type Output = f64;
  fn index(&self, key: usize) -> &f64 {
    self.array.index(key)
  }
}

impl From<(f64, f64)> for Point {
  fn from(point: (f64, f64)) -> Point {
    Point::new([point.0, point.1])
  }
}

impl From<[f64; 2]> for Point {
  fn from(array: [f64; 2]) -> Point {
    Point::new(array)
  }
}

impl From<Vector> for Point {
  fn from(vector: Vector) -> Point {
    Point::new(vector.0)
  }
}

impl Sub for Point {
  type Output = Vector;
  fn sub(self, rhs: Point) -> Vector {
    Vector([self.x() - rhs.x(), self.y() - rhs.y()])
  }
}

impl Add<Vector> for Point {
  type Output = Point;
  fn add(self, rhs: Vector) -> Point {
    Point::new([self.x() + rhs[0], self.y() + rhs[1]])
  }
}
