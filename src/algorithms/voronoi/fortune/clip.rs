use tracing::debug;

use crate::data::dcel::{Dcel, EdgeId};
use crate::data::{Point, Rectangle, Vector};

/// Bounds every edge by the rectangle. Unbounded edges become segments, edges
/// outside the rectangle or shorter than [`EPSILON`](crate::EPSILON) are
/// removed and every endpoint near the border is snapped onto it.
pub(crate) fn clip_edges(dcel: &mut Dcel, points: &[Point], bounds: &Rectangle) {
  dcel.snap_vertices(bounds);
  let mut removed = 0;
  let ids: Vec<EdgeId> = dcel.edge_ids().collect();
  for edge in ids {
    let keep = connect_edge(dcel, edge, points, bounds)
      && clip_edge(dcel, edge, bounds)
      && !is_degenerate(dcel, edge);
    if !keep {
      dcel.remove_edge(edge);
      removed += 1;
    }
  }
  debug!(removed, "clipped edges");
}

// Direction in which the bisector runs, keeping the left site on its left.
fn bisector_direction(left: Point, right: Point) -> Vector {
  (right - left).perpendicular()
}

// Gives an edge that is missing its end a finite end on the border. Also
// replaces a missing or outside start. Returns false if nothing of the edge
// lies inside the rectangle.
fn connect_edge(dcel: &mut Dcel, edge: EdgeId, points: &[Point], bounds: &Rectangle) -> bool {
  let entry = dcel.edge(edge).clone();
  if entry.end.is_some() {
    return true;
  }
  let (Some(left), Some(right)) = (entry.left, entry.right) else {
    return false;
  };
  let (left, right) = (points[left], points[right]);
  let direction = bisector_direction(left, right);
  if direction.is_zero() {
    return false;
  }
  let (origin, t_min) = match entry.start {
    Some(start) => (dcel.vertex(start), 0.0),
    None => (left.midpoint(&right), f64::NEG_INFINITY),
  };
  let Some((t0, t1)) = bounds.clip_line(origin, direction, t_min, f64::INFINITY) else {
    return false;
  };
  if entry.start.is_none() || t0 > 0.0 {
    let start = dcel.add_vertex(bounds.snap(&(origin + direction * t0)));
    dcel.edge_mut(edge).start = Some(start);
  }
  let end = dcel.add_vertex(bounds.snap(&(origin + direction * t1)));
  dcel.edge_mut(edge).end = Some(end);
  true
}

// Liang-Barsky on a finite edge. Endpoints outside the rectangle are replaced
// by new vertices on the border.
fn clip_edge(dcel: &mut Dcel, edge: EdgeId, bounds: &Rectangle) -> bool {
  let entry = dcel.edge(edge).clone();
  let (Some(start), Some(end)) = (entry.start, entry.end) else {
    return false;
  };
  let (a, b) = (dcel.vertex(start), dcel.vertex(end));
  let Some((t0, t1)) = bounds.clip_segment(a, b) else {
    return false;
  };
  let direction = b - a;
  if t0 > 0.0 {
    let start = dcel.add_vertex(bounds.snap(&(a + direction * t0)));
    dcel.edge_mut(edge).start = Some(start);
  }
  if t1 < 1.0 {
    let end = dcel.add_vertex(bounds.snap(&(a + direction * t1)));
    dcel.edge_mut(edge).end = Some(end);
  }
  true
}

fn is_degenerate(dcel: &Dcel, edge: EdgeId) -> bool {
  let entry = dcel.edge(edge);
  match (entry.start, entry.end) {
    (Some(start), Some(end)) => dcel.vertex(start).approx_eq(&dcel.vertex(end)),
    _ => true,
  }
}
