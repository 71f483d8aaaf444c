//! Quadratic reference tessellation.
//!
//! Each cell starts out as the whole rectangle and is cut down by the half-plane
//! closer to its site than to every other site. Slow, but hard to get wrong,
//! which makes it the yardstick for [`tessellate`](super::fortune::tessellate).
use tracing::debug;

use super::prepare_sites;
use crate::data::{Point, Rectangle, Vector};
use crate::utils::EPSILON;
use crate::Error;

/// Cell polygons, one per input site, counter-clockwise. Repeated sites get an
/// empty polygon, exactly like the sweep.
pub fn cell_polygons(sites: &[Point], bounds: Rectangle) -> Result<Vec<Vec<Point>>, Error> {
  let prepared = prepare_sites(sites, &bounds)?;
  let mut polygons = vec![Vec::new(); prepared.points.len()];
  let mut scratch = Vec::new();
  for &site in &prepared.sweep_order {
    let center = prepared.points[site];
    let mut polygon = bounds.corners().to_vec();
    for &other in &prepared.sweep_order {
      if other == site {
        continue;
      }
      let normal = prepared.points[other] - center;
      let midpoint = center.midpoint(&prepared.points[other]);
      clip(&mut polygon, midpoint, normal, &mut scratch);
      if polygon.is_empty() {
        break;
      }
    }
    polygons[site] = polygon;
  }
  debug!(cells = prepared.sweep_order.len(), "naive tessellation finished");
  Ok(polygons)
}

/// Signed area of a closed polygon.
pub fn polygon_area(polygon: &[Point]) -> f64 {
  polygon
    .iter()
    .zip(polygon.iter().cycle().skip(1))
    .map(|(a, b)| a.x() * b.y() - b.x() * a.y())
    .sum::<f64>()
    / 2.0
}

// Keeps the part of `polygon` where `(p - point) . normal <= 0`.
fn clip(polygon: &mut Vec<Point>, point: Point, normal: Vector, scratch: &mut Vec<Point>) {
  let distance = |p: &Point| (*p - point).dot(&normal);
  if polygon.iter().all(|p| distance(p) <= EPSILON) {
    return;
  }
  scratch.clear();
  for (i, &a) in polygon.iter().enumerate() {
    let b = polygon[(i + 1) % polygon.len()];
    let (da, db) = (distance(&a), distance(&b));
    if da <= EPSILON {
      scratch.push(a);
    }
    if (da <= EPSILON) != (db <= EPSILON) {
      let t = da / (da - db);
      scratch.push(a + (b - a) * t);
    }
  }
  std::mem::swap(polygon, scratch);
  if polygon.len() < 3 {
    polygon.clear();
  }
}
