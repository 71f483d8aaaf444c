use tracing::trace;

use crate::data::{Point, Rectangle, SiteId};

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexId(pub usize);

impl std::fmt::Debug for VertexId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
    write!(f, "VertexId({})", self.0)
  }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(pub usize);

impl std::fmt::Debug for EdgeId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
    write!(f, "EdgeId({})", self.0)
  }
}

impl EdgeId {
  /// Runs `start -> end` with the left site on its left.
  pub fn left_half(self) -> HalfEdgeId {
    HalfEdgeId((self.0 << 1) | 1)
  }

  /// Runs `end -> start` with the right site on its left.
  pub fn right_half(self) -> HalfEdgeId {
    HalfEdgeId(self.0 << 1)
  }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HalfEdgeId(pub usize);

impl std::fmt::Debug for HalfEdgeId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
    write!(f, "HalfEdgeId({})", self.0)
  }
}

impl HalfEdgeId {
  pub fn twin(self) -> HalfEdgeId {
    HalfEdgeId(self.0 ^ 1)
  }

  pub fn edge(self) -> EdgeId {
    EdgeId(self.0 >> 1)
  }

  fn is_left(self) -> bool {
    self.0 & 1 == 1
  }
}

/// A bisector between two sites, or a piece of the rectangle border.
///
/// Walking from `start` to `end`, `left` lies on the left and `right` on the
/// right. Border edges have no right site. Either endpoint stays `None` until
/// the sweep or the clipping pass fixes it.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeEntry {
  pub left: Option<SiteId>,
  pub right: Option<SiteId>,
  pub start: Option<VertexId>,
  pub end: Option<VertexId>,
  pub removed: bool,
}

impl EdgeEntry {
  pub fn is_complete(&self) -> bool {
    !self.removed && self.start.is_some() && self.end.is_some()
  }
}

/// Edge and vertex arena shared by the sweep, the clipper and the cell
/// assembler. Each edge owns the half-edges `2e` (right side) and `2e + 1`
/// (left side).
#[derive(Debug, Clone, Default)]
pub struct Dcel {
  vertices: Vec<Point>,
  edges: Vec<EdgeEntry>,
  site_edges: Vec<Vec<EdgeId>>,
}

impl Dcel {
  pub fn new(site_count: usize) -> Dcel {
    Dcel {
      vertices: Vec::new(),
      edges: Vec::new(),
      site_edges: vec![Vec::new(); site_count],
    }
  }

  pub fn add_vertex(&mut self, point: Point) -> VertexId {
    self.vertices.push(point);
    VertexId(self.vertices.len() - 1)
  }

  pub fn vertex(&self, id: VertexId) -> Point {
    self.vertices[id.0]
  }

  pub fn vertex_count(&self) -> usize {
    self.vertices.len()
  }

  pub fn edge(&self, id: EdgeId) -> &EdgeEntry {
    &self.edges[id.0]
  }

  pub fn edge_mut(&mut self, id: EdgeId) -> &mut EdgeEntry {
    &mut self.edges[id.0]
  }

  pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> {
    (0..self.edges.len()).map(EdgeId)
  }

  /// Edges that were ever created between `site` and another site.
  pub fn site_edges(&self, site: SiteId) -> &[EdgeId] {
    &self.site_edges[site]
  }

  /// Starts tracing the bisector between two neighbouring arcs, given in
  /// beachline order. Without a vertex the edge is born unbounded on both ends.
  pub fn create_edge_pair(
    &mut self,
    left_arc: SiteId,
    right_arc: SiteId,
    vertex: Option<VertexId>,
  ) -> EdgeId {
    let id = EdgeId(self.edges.len());
    let entry = match vertex {
      None => EdgeEntry {
        left: Some(right_arc),
        right: Some(left_arc),
        start: None,
        end: None,
        removed: false,
      },
      Some(_) => EdgeEntry {
        left: Some(left_arc),
        right: Some(right_arc),
        start: vertex,
        end: None,
        removed: false,
      },
    };
    trace!(?id, left_arc, right_arc, ?vertex, "create edge");
    self.edges.push(entry);
    self.site_edges[left_arc].push(id);
    self.site_edges[right_arc].push(id);
    id
  }

  /// Records that the breakpoint between `left_arc` and `right_arc` (in
  /// beachline order) has reached `vertex`.
  pub fn finalize_edge(
    &mut self,
    edge: EdgeId,
    left_arc: SiteId,
    right_arc: SiteId,
    vertex: VertexId,
  ) {
    let entry = &mut self.edges[edge.0];
    if entry.start.is_none() && entry.end.is_none() {
      entry.start = Some(vertex);
      entry.left = Some(right_arc);
      entry.right = Some(left_arc);
    } else if entry.right == Some(right_arc) {
      entry.end = Some(vertex);
    } else {
      entry.start = Some(vertex);
    }
    trace!(?edge, left_arc, right_arc, ?vertex, "finalize edge");
  }

  /// Adds a piece of the rectangle border running `from -> to` with `site` on
  /// its left. Returns the half-edge that belongs to `site`.
  pub fn create_border_edge(
    &mut self,
    site: Option<SiteId>,
    from: VertexId,
    to: VertexId,
  ) -> HalfEdgeId {
    let id = EdgeId(self.edges.len());
    self.edges.push(EdgeEntry {
      left: site,
      right: None,
      start: Some(from),
      end: Some(to),
      removed: false,
    });
    id.left_half()
  }

  pub fn remove_edge(&mut self, edge: EdgeId) {
    trace!(?edge, "remove edge");
    self.edges[edge.0].removed = true;
  }

  /// Moves every vertex within [`EPSILON`](crate::EPSILON) of the border onto it.
  pub fn snap_vertices(&mut self, bounds: &Rectangle) {
    for vertex in self.vertices.iter_mut() {
      *vertex = bounds.snap(vertex);
    }
  }

  /// The half-edge of `edge` whose face is `site`.
  pub fn half_edge_of(&self, edge: EdgeId, site: SiteId) -> HalfEdgeId {
    if self.edges[edge.0].left == Some(site) {
      edge.left_half()
    } else {
      edge.right_half()
    }
  }

  pub fn origin(&self, half_edge: HalfEdgeId) -> Option<VertexId> {
    let entry = &self.edges[half_edge.edge().0];
    if half_edge.is_left() {
      entry.start
    } else {
      entry.end
    }
  }

  pub fn destination(&self, half_edge: HalfEdgeId) -> Option<VertexId> {
    self.origin(half_edge.twin())
  }

  /// The site whose cell lies on the left of `half_edge`.
  pub fn face(&self, half_edge: HalfEdgeId) -> Option<SiteId> {
    let entry = &self.edges[half_edge.edge().0];
    if half_edge.is_left() {
      entry.left
    } else {
      entry.right
    }
  }

  /// The site across `half_edge`, `None` for the rectangle border.
  pub fn neighbor(&self, half_edge: HalfEdgeId) -> Option<SiteId> {
    self.face(half_edge.twin())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  use claims::assert_some_eq;

  fn graph() -> (Dcel, VertexId, VertexId) {
    let mut dcel = Dcel::new(3);
    let a = dcel.add_vertex(Point::new([0.0, 0.0]));
    let b = dcel.add_vertex(Point::new([1.0, 1.0]));
    (dcel, a, b)
  }

  #[test]
  fn twins_pair_up() {
    let h = EdgeId(7).left_half();
    assert_eq!(h.twin(), EdgeId(7).right_half());
    assert_eq!(h.twin().twin(), h);
    assert_eq!(h.edge(), EdgeId(7));
    assert_eq!(h.twin().edge(), EdgeId(7));
  }

  #[test]
  fn unbounded_edge_swaps_sites() {
    let (mut dcel, _, _) = graph();
    let e = dcel.create_edge_pair(0, 1, None);
    assert_eq!(dcel.edge(e).right, Some(0));
    assert_eq!(dcel.edge(e).left, Some(1));
    assert_eq!(dcel.site_edges(0), &[e]);
    assert_eq!(dcel.site_edges(1), &[e]);
  }

  #[test]
  fn anchored_edge_keeps_sites() {
    let (mut dcel, a, _) = graph();
    let e = dcel.create_edge_pair(0, 1, Some(a));
    assert_eq!(dcel.edge(e).left, Some(0));
    assert_eq!(dcel.edge(e).right, Some(1));
    assert_eq!(dcel.edge(e).start, Some(a));
    assert_eq!(dcel.edge(e).end, None);
  }

  #[test]
  fn finalize_fills_both_ends() {
    let (mut dcel, a, b) = graph();
    let e = dcel.create_edge_pair(0, 1, None);
    // First vertex resets the orientation.
    dcel.finalize_edge(e, 1, 0, a);
    assert_eq!(dcel.edge(e).start, Some(a));
    assert_eq!(dcel.edge(e).left, Some(0));
    assert_eq!(dcel.edge(e).right, Some(1));
    // Arcs seen in the opposite order close the other end.
    dcel.finalize_edge(e, 0, 1, b);
    assert_eq!(dcel.edge(e).start, Some(a));
    assert_eq!(dcel.edge(e).end, Some(b));
    assert!(dcel.edge(e).is_complete());
  }

  #[test]
  fn half_edges_run_around_their_face() {
    let (mut dcel, a, b) = graph();
    let e = dcel.create_edge_pair(2, 1, Some(a));
    dcel.finalize_edge(e, 2, 1, b);
    let h = dcel.half_edge_of(e, 2);
    assert_eq!(h, e.left_half());
    assert_some_eq!(dcel.origin(h), a);
    assert_some_eq!(dcel.destination(h), b);
    assert_some_eq!(dcel.face(h), 2);
    assert_some_eq!(dcel.neighbor(h), 1);
    let t = dcel.half_edge_of(e, 1);
    assert_eq!(t, h.twin());
    assert_some_eq!(dcel.origin(t), b);
  }

  #[test]
  fn border_edges_face_inwards() {
    let (mut dcel, a, b) = graph();
    let h = dcel.create_border_edge(Some(0), a, b);
    assert_some_eq!(dcel.origin(h), a);
    assert_some_eq!(dcel.destination(h), b);
    assert_some_eq!(dcel.face(h), 0);
    assert_eq!(dcel.neighbor(h), None);
  }

  #[test]
  fn snapping_moves_vertices() {
    let (mut dcel, a, _) = graph();
    let bounds = Rectangle::new(0.0, -1.0, 2.0, 2.0).unwrap();
    dcel.vertices[a.0] = Point::new([1e-12, 0.5]);
    dcel.snap_vertices(&bounds);
    assert_eq!(dcel.vertex(a), Point::new([0.0, 0.5]));
  }
}
