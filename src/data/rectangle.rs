use rand::Rng;

use super::{Point, Vector};
use crate::utils::{approx_eq, definitely_greater, definitely_less};
use crate::Error;

/// Axis-aligned clipping boundary. Always non-empty with finite bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
  min: Point,
  max: Point,
}

impl Rectangle {
  /// ```rust
  /// # use rvoronoi::data::Rectangle;
  /// # use rvoronoi::Error;
  /// assert!(Rectangle::new(0.0, 0.0, 10.0, 5.0).is_ok());
  /// assert_eq!(Rectangle::new(0.0, 0.0, 0.0, 5.0), Err(Error::InvalidBoundary));
  /// assert_eq!(Rectangle::new(0.0, f64::NAN, 1.0, 5.0), Err(Error::DegenerateInput));
  /// ```
  pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Result<Rectangle, Error> {
    if ![min_x, min_y, max_x, max_y].iter().all(|c| c.is_finite()) {
      return Err(Error::DegenerateInput);
    }
    if min_x >= max_x || min_y >= max_y {
      return Err(Error::InvalidBoundary);
    }
    Ok(Rectangle {
      min: Point::new([min_x, min_y]),
      max: Point::new([max_x, max_y]),
    })
  }

  pub fn min_x(&self) -> f64 {
    self.min.x()
  }

  pub fn min_y(&self) -> f64 {
    self.min.y()
  }

  pub fn max_x(&self) -> f64 {
    self.max.x()
  }

  pub fn max_y(&self) -> f64 {
    self.max.y()
  }

  pub fn width(&self) -> f64 {
    self.max_x() - self.min_x()
  }

  pub fn height(&self) -> f64 {
    self.max_y() - self.min_y()
  }

  pub fn area(&self) -> f64 {
    self.width() * self.height()
  }

  pub fn center(&self) -> Point {
    self.min.midpoint(&self.max)
  }

  /// Corners in counter-clockwise order starting at the top-left one.
  pub fn corners(&self) -> [Point; 4] {
    [
      Point::new([self.min_x(), self.max_y()]),
      Point::new([self.min_x(), self.min_y()]),
      Point::new([self.max_x(), self.min_y()]),
      Point::new([self.max_x(), self.max_y()]),
    ]
  }

  /// Inside or on the border, with [`EPSILON`](crate::EPSILON) slack.
  pub fn contains(&self, p: &Point) -> bool {
    !definitely_less(p.x(), self.min_x())
      && !definitely_greater(p.x(), self.max_x())
      && !definitely_less(p.y(), self.min_y())
      && !definitely_greater(p.y(), self.max_y())
  }

  pub fn on_border(&self, p: &Point) -> bool {
    self.contains(p) && Side::WALK.iter().any(|side| side.holds(self, p))
  }

  /// Moves every coordinate that is within [`EPSILON`](crate::EPSILON) of a
  /// bound exactly onto that bound.
  pub fn snap(&self, p: &Point) -> Point {
    let snap = |c: f64, lo: f64, hi: f64| {
      if approx_eq(c, lo) {
        lo
      } else if approx_eq(c, hi) {
        hi
      } else {
        c
      }
    };
    Point::new([
      snap(p.x(), self.min_x(), self.max_x()),
      snap(p.y(), self.min_y(), self.max_y()),
    ])
  }

  /// Liang-Barsky clipping of the parametric line `origin + t * direction` for
  /// `t` in `[t0, t1]`. Returns the sub-range that lies inside the rectangle, or
  /// `None` if the line misses it. The range may be empty (`t0 == t1`).
  pub fn clip_line(
    &self,
    origin: Point,
    direction: Vector,
    mut t0: f64,
    mut t1: f64,
  ) -> Option<(f64, f64)> {
    // Inside while p * t <= q for every pair.
    let constraints = [
      (-direction[0], origin.x() - self.min_x()),
      (direction[0], self.max_x() - origin.x()),
      (-direction[1], origin.y() - self.min_y()),
      (direction[1], self.max_y() - origin.y()),
    ];
    for (p, q) in constraints {
      if p == 0.0 {
        if q < 0.0 {
          return None;
        }
        continue;
      }
      let r = q / p;
      if p < 0.0 {
        if r > t1 {
          return None;
        }
        t0 = t0.max(r);
      } else {
        if r < t0 {
          return None;
        }
        t1 = t1.min(r);
      }
    }
    Some((t0, t1))
  }

  /// Parameter range of the segment `a -> b` that lies inside the rectangle.
  pub fn clip_segment(&self, a: Point, b: Point) -> Option<(f64, f64)> {
    self.clip_line(a, b - a, 0.0, 1.0)
  }

  pub fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Point {
    Point::new([
      rng.gen_range(self.min_x()..=self.max_x()),
      rng.gen_range(self.min_y()..=self.max_y()),
    ])
  }
}

/// Rectangle sides, in the order a counter-clockwise walk visits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
  Left,
  Bottom,
  Right,
  Top,
}

impl Side {
  pub const WALK: [Side; 4] = [Side::Left, Side::Bottom, Side::Right, Side::Top];

  pub fn next(self) -> Side {
    match self {
      Side::Left => Side::Bottom,
      Side::Bottom => Side::Right,
      Side::Right => Side::Top,
      Side::Top => Side::Left,
    }
  }

  /// `p` lies on the line through this side.
  pub fn holds(self, bounds: &Rectangle, p: &Point) -> bool {
    match self {
      Side::Left => approx_eq(p.x(), bounds.min_x()),
      Side::Bottom => approx_eq(p.y(), bounds.min_y()),
      Side::Right => approx_eq(p.x(), bounds.max_x()),
      Side::Top => approx_eq(p.y(), bounds.max_y()),
    }
  }

  /// A counter-clockwise walk starting at `p` runs along this side. Points at
  /// the far corner of a side belong to the next one.
  pub fn leaves_from(self, bounds: &Rectangle, p: &Point) -> bool {
    self.holds(bounds, p)
      && match self {
        Side::Left => definitely_greater(p.y(), bounds.min_y()),
        Side::Bottom => definitely_less(p.x(), bounds.max_x()),
        Side::Right => definitely_less(p.y(), bounds.max_y()),
        Side::Top => definitely_greater(p.x(), bounds.min_x()),
      }
  }

  /// The corner where a counter-clockwise walk leaves this side.
  pub fn end_corner(self, bounds: &Rectangle) -> Point {
    let [top_left, bottom_left, bottom_right, top_right] = bounds.corners();
    match self {
      Side::Left => bottom_left,
      Side::Bottom => bottom_right,
      Side::Right => top_right,
      Side::Top => top_left,
    }
  }
}
