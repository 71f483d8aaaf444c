use tracing::{error, trace};

use super::super::Sites;
use crate::data::dcel::{Dcel, HalfEdgeId, VertexId};
use crate::data::{Point, Rectangle, Side, SiteId};
use crate::{Error, Invariant};

/// Orders the edges of every cell counter-clockwise and closes the gaps along
/// the rectangle border. Returns one ring of half-edges per site; repeated
/// sites get an empty ring.
pub(crate) fn close_cells(
  dcel: &mut Dcel,
  sites: &Sites,
  bounds: &Rectangle,
) -> Result<Vec<Vec<HalfEdgeId>>, Error> {
  let mut rings = vec![Vec::new(); sites.points.len()];
  match sites.sweep_order.as_slice() {
    [] => {
      border_ring(dcel, bounds, None);
    }
    [only] => {
      rings[*only] = border_ring(dcel, bounds, Some(*only));
    }
    order => {
      for &site in order {
        rings[site] = close_cell(dcel, &sites.points, bounds, site)?;
      }
    }
  }
  Ok(rings)
}

// The whole rectangle, counter-clockwise from the top-left corner.
fn border_ring(dcel: &mut Dcel, bounds: &Rectangle, site: Option<SiteId>) -> Vec<HalfEdgeId> {
  let corners: Vec<VertexId> = bounds
    .corners()
    .iter()
    .map(|&corner| dcel.add_vertex(corner))
    .collect();
  (0..corners.len())
    .map(|i| dcel.create_border_edge(site, corners[i], corners[(i + 1) % corners.len()]))
    .collect()
}

fn close_cell(
  dcel: &mut Dcel,
  points: &[Point],
  bounds: &Rectangle,
  site: SiteId,
) -> Result<Vec<HalfEdgeId>, Error> {
  let center = points[site];
  let mut ring: Vec<(f64, HalfEdgeId)> = dcel
    .site_edges(site)
    .iter()
    .filter(|&&edge| dcel.edge(edge).is_complete())
    .map(|&edge| {
      let half_edge = dcel.half_edge_of(edge, site);
      let angle = dcel
        .neighbor(half_edge)
        .map_or(0.0, |neighbor| center.angle_to(&points[neighbor]));
      (angle, half_edge)
    })
    .collect();
  if ring.is_empty() {
    error!(site, "site has no edges");
    return Err(Invariant::EmptyCell(site).into());
  }
  ring.sort_by(|a, b| a.0.total_cmp(&b.0));
  let mut ring: Vec<HalfEdgeId> = ring.into_iter().map(|(_, half_edge)| half_edge).collect();

  let mut i = 0;
  while i < ring.len() {
    let from = endpoint(dcel, ring[i], site, Dcel::destination)?;
    let to = endpoint(dcel, ring[(i + 1) % ring.len()], site, Dcel::origin)?;
    if !dcel.vertex(from).approx_eq(&dcel.vertex(to)) {
      let border = walk_border(dcel, bounds, site, from, to)?;
      let inserted = border.len();
      ring.splice(i + 1..i + 1, border);
      i += inserted;
    }
    i += 1;
  }

  if ring.len() < 3 {
    error!(site, edges = ring.len(), "cell is not a polygon");
    return Err(Invariant::OpenCell(site).into());
  }
  trace!(site, edges = ring.len(), "closed cell");
  Ok(ring)
}

fn endpoint(
  dcel: &Dcel,
  half_edge: HalfEdgeId,
  site: SiteId,
  which: fn(&Dcel, HalfEdgeId) -> Option<VertexId>,
) -> Result<VertexId, Error> {
  which(dcel, half_edge).ok_or(Error::InternalInconsistency(Invariant::OpenCell(site)))
}

// Border edges from `from` to `to`, counter-clockwise along the rectangle.
fn walk_border(
  dcel: &mut Dcel,
  bounds: &Rectangle,
  site: SiteId,
  from: VertexId,
  to: VertexId,
) -> Result<Vec<HalfEdgeId>, Error> {
  let start = dcel.vertex(from);
  let target = dcel.vertex(to);
  let Some(mut side) = Side::WALK
    .into_iter()
    .find(|side| side.leaves_from(bounds, &start))
  else {
    error!(site, x = start.x(), y = start.y(), "gap does not start on the border");
    return Err(Invariant::OpenCell(site).into());
  };
  let mut cursor = from;
  let mut border = Vec::new();
  // The start side, three full sides and the final side.
  for _ in 0..=Side::WALK.len() {
    let last = side.holds(bounds, &target);
    let next = if last {
      to
    } else {
      dcel.add_vertex(side.end_corner(bounds))
    };
    border.push(dcel.create_border_edge(Some(site), cursor, next));
    if last {
      return Ok(border);
    }
    cursor = next;
    side = side.next();
  }
  error!(site, "border walk did not reach its target");
  Err(Invariant::OpenCell(site).into())
}

#[cfg(test)]
mod tests {
  use super::*;

  use claims::{assert_err_eq, assert_ok};

  fn square() -> Rectangle {
    Rectangle::new(0.0, 0.0, 1000.0, 1000.0).unwrap()
  }

  fn path(dcel: &Dcel, ring: &[HalfEdgeId]) -> Vec<Point> {
    ring
      .iter()
      .map(|&h| dcel.vertex(dcel.origin(h).unwrap()))
      .collect()
  }

  #[test]
  fn corner_walk() {
    let mut dcel = Dcel::new(1);
    let from = dcel.add_vertex(Point::new([0.0, 500.0]));
    let to = dcel.add_vertex(Point::new([500.0, 0.0]));
    let border = assert_ok!(walk_border(&mut dcel, &square(), 0, from, to));
    assert_eq!(
      path(&dcel, &border),
      vec![Point::new([0.0, 500.0]), Point::new([0.0, 0.0])]
    );
    assert_eq!(dcel.destination(border[1]), Some(to));
  }

  #[test]
  fn walk_around_three_corners() {
    let mut dcel = Dcel::new(1);
    let from = dcel.add_vertex(Point::new([1000.0, 300.0]));
    let to = dcel.add_vertex(Point::new([0.0, 300.0]));
    let border = assert_ok!(walk_border(&mut dcel, &square(), 0, from, to));
    assert_eq!(
      path(&dcel, &border),
      vec![
        Point::new([1000.0, 300.0]),
        Point::new([1000.0, 1000.0]),
        Point::new([0.0, 1000.0]),
      ]
    );
  }

  #[test]
  fn walk_from_a_corner() {
    let mut dcel = Dcel::new(1);
    let from = dcel.add_vertex(Point::new([0.0, 0.0]));
    let to = dcel.add_vertex(Point::new([1000.0, 500.0]));
    let border = assert_ok!(walk_border(&mut dcel, &square(), 0, from, to));
    assert_eq!(
      path(&dcel, &border),
      vec![Point::new([0.0, 0.0]), Point::new([1000.0, 0.0])]
    );
  }

  #[test]
  fn walk_needs_a_border_start() {
    let mut dcel = Dcel::new(1);
    let from = dcel.add_vertex(Point::new([500.0, 500.0]));
    let to = dcel.add_vertex(Point::new([0.0, 0.0]));
    assert_err_eq!(
      walk_border(&mut dcel, &square(), 0, from, to),
      Error::InternalInconsistency(Invariant::OpenCell(0))
    );
  }

  #[test]
  fn single_site_gets_the_rectangle() {
    let mut dcel = Dcel::new(1);
    let ring = border_ring(&mut dcel, &square(), Some(0));
    assert_eq!(
      path(&dcel, &ring),
      vec![
        Point::new([0.0, 1000.0]),
        Point::new([0.0, 0.0]),
        Point::new([1000.0, 0.0]),
        Point::new([1000.0, 1000.0]),
      ]
    );
    assert!(ring.iter().all(|&h| dcel.face(h) == Some(0)));
  }
}
