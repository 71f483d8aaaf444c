// This module contains strategies for:
//  * sites in general position
//  * sites on a coarse lattice, which are full of degeneracies: collinear
//    rows, co-circular squares and sites on the border
//  * tight clusters, where distinct sites form very thin triangles
// A Strategy is a way to generate a shrinkable value.
use crate::data::{Point, Rectangle};

use proptest::collection::vec;
use proptest::prelude::*;

/// Up to `max_len` sites drawn uniformly from `bounds`.
pub fn arb_sites(bounds: Rectangle, max_len: usize) -> impl Strategy<Value = Vec<Point>> {
  let point = (
    bounds.min_x()..=bounds.max_x(),
    bounds.min_y()..=bounds.max_y(),
  )
    .prop_map(|(x, y)| Point::new([x, y]));
  vec(point, 0..=max_len)
}

/// Up to `max_len` sites on the `(steps + 1) x (steps + 1)` lattice spanning
/// `bounds`, border included. Repeats are likely.
pub fn arb_lattice_sites(
  bounds: Rectangle,
  steps: u32,
  max_len: usize,
) -> impl Strategy<Value = Vec<Point>> {
  let point = (0..=steps, 0..=steps).prop_map(move |(i, j)| {
    let fx = f64::from(i) / f64::from(steps);
    let fy = f64::from(j) / f64::from(steps);
    Point::new([
      bounds.min_x() + fx * bounds.width(),
      bounds.min_y() + fy * bounds.height(),
    ])
  });
  vec(point, 0..=max_len)
}

/// Up to `max_len` sites within `spread` of `corner`, towards increasing `x`
/// and `y`.
pub fn arb_cluster_sites(
  corner: Point,
  spread: f64,
  max_len: usize,
) -> impl Strategy<Value = Vec<Point>> {
  let point = (0.0..spread, 0.0..spread)
    .prop_map(move |(dx, dy)| Point::new([corner.x() + dx, corner.y() + dy]));
  vec(point, 0..=max_len)
}

#[cfg(test)]
mod tests {
  use super::*;
  use test_strategy::proptest;

  fn square() -> Rectangle {
    Rectangle::new(0.0, 0.0, 1000.0, 1000.0).unwrap()
  }

  #[proptest]
  fn sites_stay_inside(#[strategy(arb_sites(square(), 20))] sites: Vec<Point>) {
    prop_assert!(sites.len() <= 20);
    prop_assert!(sites.iter().all(|p| square().contains(p)));
  }

  #[proptest]
  fn lattice_sites_are_on_the_lattice(
    #[strategy(arb_lattice_sites(square(), 4, 20))] sites: Vec<Point>,
  ) {
    for p in sites {
      prop_assert_eq!(p.x() % 250.0, 0.0);
      prop_assert_eq!(p.y() % 250.0, 0.0);
    }
  }

  #[proptest]
  fn clusters_are_tight(
    #[strategy(arb_cluster_sites(Point::new([500.0, 500.0]), 1e-3, 20))] sites: Vec<Point>,
  ) {
    for p in sites {
      prop_assert!((500.0..=500.001).contains(&p.x()));
      prop_assert!((500.0..=500.001).contains(&p.y()));
    }
  }
}
