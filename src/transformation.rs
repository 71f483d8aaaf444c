use std::ops::Mul;

use crate::data::{Point, Rectangle, Vector};
use crate::Error;

/// Affine map of the plane as a 3x3 homogeneous matrix.
///
/// Quarter turns, mirrors and integer translations are exact on integer
/// coordinates, which makes them suitable for checking that a diagram does not
/// depend on how its input is oriented.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform([[f64; 3]; 3]);

impl Transform {
  pub fn identity() -> Transform {
    Transform([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]])
  }

  pub fn translate(vec: Vector) -> Transform {
    Transform([[1.0, 0.0, vec[0]], [0.0, 1.0, vec[1]], [0.0, 0.0, 1.0]])
  }

  pub fn scale(vec: Vector) -> Transform {
    Transform([[vec[0], 0.0, 0.0], [0.0, vec[1], 0.0], [0.0, 0.0, 1.0]])
  }

  pub fn uniform_scale(v: f64) -> Transform {
    Transform::scale(Vector([v, v]))
  }

  /// Counter-clockwise rotation about the origin by `turns` quarter turns.
  pub fn rotate_quarter_turns(turns: i32) -> Transform {
    let (cos, sin) = match turns.rem_euclid(4) {
      0 => (1.0, 0.0),
      1 => (0.0, 1.0),
      2 => (-1.0, 0.0),
      _ => (0.0, -1.0),
    };
    Transform([[cos, -sin, 0.0], [sin, cos, 0.0], [0.0, 0.0, 1.0]])
  }

  /// Reflection across the vertical axis `x = 0`.
  pub fn mirror_x() -> Transform {
    Transform::scale(Vector([-1.0, 1.0]))
  }

  /// Conjugates `self` so that it acts around `center` instead of the origin.
  pub fn about(self, center: Point) -> Transform {
    let offset = Vector::from(center);
    Transform::translate(offset) * self * Transform::translate(-offset)
  }

  /// The bounding box of the transformed corners of `rect`. Exact for the
  /// axis-preserving transforms built above.
  pub fn apply_rectangle(&self, rect: &Rectangle) -> Result<Rectangle, Error> {
    let corners = rect.corners().map(|corner| self * corner);
    let min_x = corners.iter().map(Point::x).fold(f64::INFINITY, f64::min);
    let min_y = corners.iter().map(Point::y).fold(f64::INFINITY, f64::min);
    let max_x = corners.iter().map(Point::x).fold(f64::NEG_INFINITY, f64::max);
    let max_y = corners.iter().map(Point::y).fold(f64::NEG_INFINITY, f64::max);
    Rectangle::new(min_x, min_y, max_x, max_y)
  }
}

impl Mul for Transform {
  type Output = Transform;
  fn mul(self, other: Transform) -> Transform {
    &self * &other
  }
}

impl Mul<&Transform> for &Transform {
  type Output = Transform;
  fn mul(self, other: &Transform) -> Transform {
    let mut m = [[0.0; 3]; 3];
    for (i, row) in m.iter_mut().enumerate() {
      for (j, cell) in row.iter_mut().enumerate() {
        *cell = (0..3).map(|k| self.0[i][k] * other.0[k][j]).sum();
      }
    }
    Transform(m)
  }
}

impl Mul<Point> for &Transform {
  type Output = Point;
  fn mul(self, p: Point) -> Point {
    let m = &self.0;
    let x = m[0][0] * p.x() + m[0][1] * p.y() + m[0][2];
    let y = m[1][0] * p.x() + m[1][1] * p.y() + m[1][2];
    let w = m[2][0] * p.x() + m[2][1] * p.y() + m[2][2];
    Point::new([x / w, y / w])
  }
}

impl Mul<Point> for Transform {
  type Output = Point;
  fn mul(self, p: Point) -> Point {
    &self * p
  }
}

impl Mul<&Point> for &Transform {
  type Output = Point;
  fn mul(self, p: &Point) -> Point {
    self * *p
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  use proptest::prelude::*;
  use test_strategy::proptest;

  #[test]
  fn quarter_turn_about_center() {
    let t = Transform::rotate_quarter_turns(1).about(Point::new([500.0, 500.0]));
    assert_eq!(t * Point::new([1000.0, 500.0]), Point::new([500.0, 1000.0]));
    assert_eq!(t * Point::new([0.0, 0.0]), Point::new([1000.0, 0.0]));
  }

  #[test]
  fn mirror_about_center() {
    let t = Transform::mirror_x().about(Point::new([500.0, 500.0]));
    assert_eq!(t * Point::new([100.0, 7.0]), Point::new([900.0, 7.0]));
  }

  #[test]
  fn rectangles_follow_the_transform() {
    let rect = Rectangle::new(0.0, 0.0, 200.0, 100.0).unwrap();
    let t = Transform::rotate_quarter_turns(1);
    assert_eq!(
      t.apply_rectangle(&rect).unwrap(),
      Rectangle::new(-100.0, 0.0, 0.0, 200.0).unwrap()
    );
  }

  #[proptest]
  fn four_turns_are_identity(#[strategy(-1000i32..1000)] x: i32, #[strategy(-1000i32..1000)] y: i32) {
    let p = Point::new([f64::from(x), f64::from(y)]);
    let t = Transform::rotate_quarter_turns(1);
    let full = t * t * t * t;
    prop_assert_eq!(full, Transform::identity());
    prop_assert_eq!(full * p, p);
    prop_assert_eq!(Transform::rotate_quarter_turns(-1) * (t * p), p);
  }
}
