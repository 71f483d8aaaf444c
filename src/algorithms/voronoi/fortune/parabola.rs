//! Closed-form geometry of the beachline.
//!
//! Every arc is a parabola with its site as focus and the sweep line
//! `y = directrix` as directrix. The sweep advances towards increasing `y`, so
//! arcs open downwards and their sites lie below or on the directrix.

use crate::data::Point;
use crate::utils::approx_zero;

/// The `x` coordinate where the arc of `left` meets the arc of `right`, for two
/// arcs that are adjacent on the beachline in that order.
///
/// A site on the directrix is a degenerate vertical arc; the breakpoint is then
/// the site itself.
pub(crate) fn breakpoint(left: Point, right: Point, directrix: f64) -> f64 {
  let right_depth = right.y() - directrix;
  if approx_zero(right_depth) {
    return right.x();
  }
  let left_depth = left.y() - directrix;
  if approx_zero(left_depth) {
    return left.x();
  }
  // Intersect the two parabolas, shifted so that `right` sits on x = 0.
  let hl = left.x() - right.x();
  let aby2 = 1.0 / right_depth - 1.0 / left_depth;
  let b = hl / left_depth;
  if aby2 == 0.0 {
    return (right.x() + left.x()) / 2.0;
  }
  let discriminant = b * b
    - 2.0
      * aby2
      * (hl * hl / (-2.0 * left_depth) - left.y() + left_depth / 2.0 + right.y()
        - right_depth / 2.0);
  (-b + discriminant.max(0.0).sqrt()) / aby2 + right.x()
}

/// Center of the circle through `a`, `b` and `c`, or `None` when the three
/// points are collinear.
///
/// Collinearity is decided by the exact orientation sign, so thin triangles of
/// sites that are very close together still get their center.
pub(crate) fn circumcenter(a: Point, b: Point, c: Point) -> Option<Point> {
  if a.orient(&b, &c) == 0.0 {
    return None;
  }
  let (bx, by) = (b.x() - a.x(), b.y() - a.y());
  let (cx, cy) = (c.x() - a.x(), c.y() - a.y());
  let d = 2.0 * (bx * cy - by * cx);
  if d == 0.0 {
    return None;
  }
  let hb = bx * bx + by * by;
  let hc = cx * cx + cy * cy;
  let center = Point::new([
    (cy * hb - by * hc) / d + a.x(),
    (bx * hc - cx * hb) / d + a.y(),
  ]);
  center.is_finite().then_some(center)
}

/// Where and when the middle arc of three consecutive arcs vanishes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Convergence {
  /// The future Voronoi vertex.
  pub center: Point,
  /// Sweep position at which the arc shrinks to nothing: the top of the circle.
  pub y: f64,
}

/// Checks whether the arc of `middle` is squeezed out by its neighbours. This
/// only happens when the breakpoints on either side converge, i.e. when
/// `left -> middle -> right` turns clockwise.
pub(crate) fn convergence(left: Point, middle: Point, right: Point) -> Option<Convergence> {
  let (ax, ay) = (left.x() - middle.x(), left.y() - middle.y());
  let (cx, cy) = (right.x() - middle.x(), right.y() - middle.y());
  // The turn is decided by the exact sign alone. The rounded `d` only has to
  // agree with it to be usable as a divisor.
  let turn = left.orient(&right, &middle);
  let d = 2.0 * (ax * cy - ay * cx);
  if turn >= 0.0 || d >= 0.0 {
    return None;
  }
  let ha = ax * ax + ay * ay;
  let hc = cx * cx + cy * cy;
  let x = (cy * ha - ay * hc) / d;
  let y = (ax * hc - cx * ha) / d;
  let center = Point::new([x + middle.x(), y + middle.y()]);
  if !center.is_finite() {
    return None;
  }
  Some(Convergence {
    center,
    y: center.y() + (x * x + y * y).sqrt(),
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  use claims::{assert_none, assert_some};
  use proptest::prelude::*;
  use test_strategy::proptest;

  fn parabola_y(focus: Point, directrix: f64, x: f64) -> f64 {
    let dx = x - focus.x();
    (dx * dx + focus.y() * focus.y() - directrix * directrix) / (2.0 * (focus.y() - directrix))
  }

  #[test]
  fn equal_heights_meet_halfway() {
    let left = Point::new([0.0, 0.0]);
    let right = Point::new([1000.0, 0.0]);
    assert_eq!(breakpoint(left, right, 500.0), 500.0);
  }

  #[test]
  fn site_on_directrix_is_the_breakpoint() {
    let low = Point::new([100.0, 0.0]);
    let fresh = Point::new([300.0, 50.0]);
    assert_eq!(breakpoint(low, fresh, 50.0), 300.0);
    assert_eq!(breakpoint(fresh, low, 50.0), 300.0);
  }

  #[test]
  fn stacked_sites() {
    // Arcs of (500, 100) and (500, 500) with the sweep at y = 900.
    let low = Point::new([500.0, 100.0]);
    let high = Point::new([500.0, 500.0]);
    let left = breakpoint(low, high, 900.0);
    let right = breakpoint(high, low, 900.0);
    assert!((left - (500.0 - 400.0 * 2f64.sqrt())).abs() < 1e-9);
    assert!((right - (500.0 + 400.0 * 2f64.sqrt())).abs() < 1e-9);
  }

  #[proptest]
  fn breakpoint_is_equidistant(
    #[strategy(0.0..1000.0f64)] lx: f64,
    #[strategy(0.0..500.0f64)] ly: f64,
    #[strategy(0.0..1000.0f64)] rx: f64,
    #[strategy(0.0..500.0f64)] ry: f64,
  ) {
    let directrix = 600.0;
    let left = Point::new([lx, ly]);
    let right = Point::new([rx, ry]);
    let x = breakpoint(left, right, directrix);
    let yl = parabola_y(left, directrix, x);
    let yr = parabola_y(right, directrix, x);
    prop_assert!((yl - yr).abs() <= 1e-6 * yl.abs().max(1.0));
  }

  #[test]
  fn circumcenter_of_right_triangle() {
    let center = assert_some!(circumcenter(
      Point::new([0.0, 0.0]),
      Point::new([500.0, 500.0]),
      Point::new([1000.0, 0.0])
    ));
    assert_eq!(center, Point::new([500.0, 0.0]));
    assert_none!(circumcenter(
      Point::new([0.0, 0.0]),
      Point::new([1.0, 1.0]),
      Point::new([2.0, 2.0])
    ));
  }

  #[test]
  fn convergence_needs_a_clockwise_turn() {
    let left = Point::new([250.0, 750.0]);
    let middle = Point::new([250.0, 250.0]);
    let right = Point::new([750.0, 250.0]);
    let event = assert_some!(convergence(left, middle, right));
    assert_eq!(event.center, Point::new([500.0, 500.0]));
    assert!((event.y - (500.0 + 250.0 * 2f64.sqrt())).abs() < 1e-9);
    assert_none!(convergence(right, middle, left));
  }

  #[test]
  fn thin_triangles_still_converge() {
    // Twice the signed area is about 4e-10, yet the turn is a real one.
    let left = Point::new([500.0, 500.0]);
    let middle = Point::new([500.000002, 500.0]);
    let right = Point::new([500.0000013, 500.0001]);
    let event = assert_some!(convergence(left, middle, right));
    let r = event.center.squared_euclidean_distance(&middle).sqrt();
    let ra = event.center.squared_euclidean_distance(&left).sqrt();
    assert!((r - ra).abs() <= 1e-6 * r);
    assert!(event.y >= middle.y());

    let center = assert_some!(circumcenter(left, right, middle));
    assert!(center.approx_eq(&event.center));
  }

  #[test]
  fn collinear_arcs_never_converge() {
    assert_none!(convergence(
      Point::new([500.0, 100.0]),
      Point::new([500.0, 500.0]),
      Point::new([500.0, 900.0])
    ));
  }

  #[proptest]
  fn convergence_center_is_equidistant(
    #[strategy(0.0..1000.0f64)] ax: f64,
    #[strategy(0.0..1000.0f64)] ay: f64,
    #[strategy(0.0..1000.0f64)] bx: f64,
    #[strategy(0.0..1000.0f64)] by: f64,
    #[strategy(0.0..1000.0f64)] cx: f64,
    #[strategy(0.0..1000.0f64)] cy: f64,
  ) {
    let (a, b, c) = (Point::new([ax, ay]), Point::new([bx, by]), Point::new([cx, cy]));
    if let Some(event) = convergence(a, b, c) {
      let r = event.center.squared_euclidean_distance(&b).sqrt();
      let ra = event.center.squared_euclidean_distance(&a).sqrt();
      let rc = event.center.squared_euclidean_distance(&c).sqrt();
      prop_assert!((r - ra).abs() <= 1e-6 * r.max(1.0));
      prop_assert!((r - rc).abs() <= 1e-6 * r.max(1.0));
      prop_assert!((event.y - event.center.y() - r).abs() <= 1e-6 * r.max(1.0));
    }
  }
}
