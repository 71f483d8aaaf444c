use std::collections::BTreeSet;

use super::dcel::{Dcel, HalfEdgeId};
use super::{Point, Rectangle, SiteId};
use crate::utils::EPSILON;
use crate::{Error, Invariant};

/// A segment of the clipped diagram.
///
/// Walking from `start` to `end`, the cell of `left` lies on the left. Pieces
/// of the rectangle border have no `right` site; with no input sites at all the
/// border has no `left` site either.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
  pub start: Point,
  pub end: Point,
  pub left: Option<SiteId>,
  pub right: Option<SiteId>,
}

impl Edge {
  pub fn is_border(&self) -> bool {
    self.right.is_none()
  }

  pub fn length(&self) -> f64 {
    self.start.squared_euclidean_distance(&self.end).sqrt()
  }
}

/// One side of an [`Edge`], oriented counter-clockwise around its cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalfEdge {
  /// Index into [`Diagram::edges`].
  pub edge: usize,
  pub start: Point,
  pub end: Point,
  /// The site on the other side, `None` for the rectangle border.
  pub neighbor: Option<SiteId>,
}

/// The region of the rectangle closer to one site than to any other.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
  site: SiteId,
  point: Point,
  half_edges: Vec<HalfEdge>,
  duplicate_of: Option<SiteId>,
}

impl Cell {
  pub fn site(&self) -> SiteId {
    self.site
  }

  pub fn site_point(&self) -> Point {
    self.point
  }

  /// Boundary of the cell, counter-clockwise. Each half-edge ends where the
  /// next one starts.
  pub fn half_edges(&self) -> &[HalfEdge] {
    &self.half_edges
  }

  pub fn edge_ids(&self) -> impl Iterator<Item = usize> + '_ {
    self.half_edges.iter().map(|half_edge| half_edge.edge)
  }

  /// Polygon corners, counter-clockwise.
  pub fn vertices(&self) -> impl Iterator<Item = Point> + '_ {
    self.half_edges.iter().map(|half_edge| half_edge.start)
  }

  /// Adjacent sites in boundary order, without repeats.
  pub fn neighbors(&self) -> Vec<SiteId> {
    let mut seen = BTreeSet::new();
    self
      .half_edges
      .iter()
      .filter_map(|half_edge| half_edge.neighbor)
      .filter(|neighbor| seen.insert(*neighbor))
      .collect()
  }

  /// Empty cells belong to repeated sites.
  pub fn duplicate_of(&self) -> Option<SiteId> {
    self.duplicate_of
  }

  pub fn is_empty(&self) -> bool {
    self.half_edges.is_empty()
  }

  /// At least three half-edges, each ending where the next one starts.
  pub fn is_closed(&self) -> bool {
    self.half_edges.len() >= 3
      && self
        .half_edges
        .iter()
        .zip(self.half_edges.iter().cycle().skip(1))
        .all(|(a, b)| a.end.approx_eq(&b.start))
  }

  /// Signed area. Positive for a counter-clockwise boundary.
  pub fn area(&self) -> f64 {
    self
      .half_edges
      .iter()
      .map(|half_edge| shoelace(half_edge.start, half_edge.end))
      .sum::<f64>()
      / 2.0
  }

  pub fn centroid(&self) -> Option<Point> {
    let area = self.area();
    if area.abs() < EPSILON {
      return None;
    }
    let (mut cx, mut cy) = (0.0, 0.0);
    for half_edge in &self.half_edges {
      let (a, b) = (half_edge.start, half_edge.end);
      let cross = shoelace(a, b);
      cx += (a.x() + b.x()) * cross;
      cy += (a.y() + b.y()) * cross;
    }
    Some(Point::new([cx / (6.0 * area), cy / (6.0 * area)]))
  }
}

fn shoelace(a: Point, b: Point) -> f64 {
  a.x() * b.y() - b.x() * a.y()
}

/// A Voronoi diagram clipped to a rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagram {
  bounds: Rectangle,
  sites: Vec<Point>,
  edges: Vec<Edge>,
  cells: Vec<Cell>,
}

impl Diagram {
  pub(crate) fn assemble(
    dcel: &Dcel,
    sites: Vec<Point>,
    duplicate_of: Vec<Option<SiteId>>,
    bounds: Rectangle,
    rings: &[Vec<HalfEdgeId>],
  ) -> Diagram {
    let mut index = vec![None; dcel.edge_ids().count()];
    let mut edges = Vec::new();
    for id in dcel.edge_ids() {
      let entry = dcel.edge(id);
      if let (false, Some(start), Some(end)) = (entry.removed, entry.start, entry.end) {
        index[id.0] = Some(edges.len());
        edges.push(Edge {
          start: dcel.vertex(start),
          end: dcel.vertex(end),
          left: entry.left,
          right: entry.right,
        });
      }
    }

    let cells = rings
      .iter()
      .enumerate()
      .map(|(site, ring)| Cell {
        site,
        point: sites[site],
        half_edges: ring
          .iter()
          .filter_map(|&half_edge| {
            let edge = index[half_edge.edge().0]?;
            Some(HalfEdge {
              edge,
              start: dcel.vertex(dcel.origin(half_edge)?),
              end: dcel.vertex(dcel.destination(half_edge)?),
              neighbor: dcel.neighbor(half_edge),
            })
          })
          .collect(),
        duplicate_of: duplicate_of[site],
      })
      .collect();

    Diagram {
      bounds,
      sites,
      edges,
      cells,
    }
  }

  pub fn bounds(&self) -> &Rectangle {
    &self.bounds
  }

  /// The input sites, snapped onto the border where they were within
  /// [`EPSILON`](crate::EPSILON) of it.
  pub fn sites(&self) -> &[Point] {
    &self.sites
  }

  pub fn edges(&self) -> &[Edge] {
    &self.edges
  }

  /// One cell per input site, in input order.
  pub fn cells(&self) -> &[Cell] {
    &self.cells
  }

  /// # Panics
  ///
  /// Panics if `site` is not an index into the input sites.
  pub fn cell(&self, site: SiteId) -> &Cell {
    &self.cells[site]
  }

  /// Number of distinct edge endpoints, merging points closer than
  /// [`EPSILON`](crate::EPSILON).
  pub fn vertex_count(&self) -> usize {
    let mut points: Vec<Point> = self
      .edges
      .iter()
      .flat_map(|edge| [edge.start, edge.end])
      .collect();
    points.sort_by(|a, b| a.x().total_cmp(&b.x()).then(a.y().total_cmp(&b.y())));
    let mut distinct: Vec<Point> = Vec::new();
    for p in points {
      let seen = distinct
        .iter()
        .rev()
        .take_while(|q| p.x() - q.x() < EPSILON)
        .any(|q| q.approx_eq(&p));
      if !seen {
        distinct.push(p);
      }
    }
    distinct.len()
  }

  /// Checks the structural invariants of the diagram:
  ///
  /// * every cell of a distinct site is a closed counter-clockwise polygon,
  /// * every interior edge borders exactly the cells of its two sites and
  ///   every border edge exactly the cell of its site,
  /// * `V - E + F = 2` for the planar graph made of the edges,
  /// * the cell areas add up to the area of the rectangle.
  pub fn validate(&self) -> Result<(), Error> {
    let mut uses = vec![0usize; self.edges.len()];
    for cell in &self.cells {
      if cell.duplicate_of.is_some() {
        if !cell.is_empty() {
          return Err(Invariant::OpenCell(cell.site).into());
        }
        continue;
      }
      if !cell.is_closed() {
        return Err(Invariant::OpenCell(cell.site).into());
      }
      if cell.area() <= 0.0 {
        return Err(Invariant::DegenerateCell(cell.site).into());
      }
      for half_edge in &cell.half_edges {
        let edge = &self.edges[half_edge.edge];
        if edge.left != Some(cell.site) && edge.right != Some(cell.site) {
          return Err(Invariant::UnsharedEdge(half_edge.edge).into());
        }
        uses[half_edge.edge] += 1;
      }
    }
    for (index, edge) in self.edges.iter().enumerate() {
      let expected = usize::from(edge.left.is_some()) + usize::from(edge.right.is_some());
      if uses[index] != expected {
        return Err(Invariant::UnsharedEdge(index).into());
      }
    }

    let owned = self.cells.iter().filter(|cell| !cell.is_empty()).count();
    let faces = owned.max(1) + 1;
    let euler = self.vertex_count() as i64 - self.edges.len() as i64 + faces as i64;
    if euler != 2 {
      return Err(Invariant::EulerCharacteristic.into());
    }

    if owned > 0 {
      let covered: f64 = self.cells.iter().map(Cell::area).sum();
      let area = self.bounds.area();
      if (covered - area).abs() > EPSILON * area {
        return Err(Invariant::CoverageMismatch.into());
      }
    }
    Ok(())
  }
}
