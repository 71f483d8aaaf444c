//! Fortune's sweep-line construction of a bounded Voronoi diagram.
//!
//! # High-level workflow
//! 1. **Sites** are validated, snapped onto the border when they sit within
//!    [`EPSILON`](crate::EPSILON) of it and sorted by `y`, then `x`. Repeated
//!    sites are folded onto their first occurrence.
//! 2. **Sweep** – A horizontal line moves towards increasing `y`. The beachline
//!    holds one parabolic arc per site visible from the line. Site events split
//!    the arc above them, circle events remove an arc squeezed out by its
//!    neighbours and emit a Voronoi vertex. Breakpoints between arcs trace the
//!    edges.
//! 3. **Clipping** – Edges that are still unbounded become rays or lines and are
//!    clipped to the rectangle (Liang-Barsky). Edges left outside, or shorter
//!    than [`EPSILON`](crate::EPSILON), are dropped.
//! 4. **Cells** – The edges of each site are sorted by the angle to the
//!    neighbouring site, giving a counter-clockwise ring. Gaps in the ring are
//!    closed by walking the rectangle border counter-clockwise.
//! 5. **Check** – The finished diagram is validated. A broken cell, a badly
//!    shared edge, a wrong Euler characteristic or a gap in the coverage is
//!    returned as [`Error::InternalInconsistency`].
//!
//! The beachline is a linked list searched linearly, so a run costs
//! `O(n^2)` in the worst case. Circle events are invalidated lazily and
//! discarded when they reach the front of the queue.
mod beachline;
mod cells;
mod clip;
mod events;
mod parabola;

use std::collections::VecDeque;
use tracing::{debug, error, trace};

use self::beachline::{ArcId, Beachline};
use self::events::{CircleEvent, CircleId, Event, EventQueue};
use self::parabola::{circumcenter, convergence};
use super::{prepare_sites, Sites};
use crate::data::dcel::{Dcel, EdgeId};
use crate::data::{Diagram, Point, Rectangle, SiteId};
use crate::utils::{approx_eq, EPSILON};
use crate::{Error, Invariant};

/// Computes the Voronoi diagram of `sites` clipped to `bounds`.
///
/// Every site must lie inside `bounds` or on its border. Repeated sites are
/// allowed: the first one in sweep order owns the cell and the others get an
/// empty cell that points at it.
///
/// ```rust
/// # use rvoronoi::data::{Point, Rectangle};
/// # use rvoronoi::Error;
/// let bounds = Rectangle::new(0.0, 0.0, 1000.0, 1000.0)?;
/// let diagram = rvoronoi::tessellate(&[Point::new([500.0, 500.0])], bounds)?;
/// assert_eq!(diagram.edges().len(), 4);
/// assert_eq!(diagram.cell(0).area(), 1e6);
/// # Ok::<(), Error>(())
/// ```
#[tracing::instrument(level = "debug", skip_all, fields(sites = sites.len()))]
pub fn tessellate(sites: &[Point], bounds: Rectangle) -> Result<Diagram, Error> {
  let prepared = prepare_sites(sites, &bounds)?;
  let mut sweep = Sweep::new(&prepared);
  sweep.run()?;
  let mut dcel = sweep.into_dcel();
  clip::clip_edges(&mut dcel, &prepared.points, &bounds);
  let rings = cells::close_cells(&mut dcel, &prepared, &bounds)?;
  let diagram = Diagram::assemble(
    &dcel,
    prepared.points,
    prepared.duplicate_of,
    bounds,
    &rings,
  );
  checked(diagram)
}

// A diagram that breaks closure, duality, Euler or coverage is never handed out.
fn checked(diagram: Diagram) -> Result<Diagram, Error> {
  if let Err(err) = diagram.validate() {
    error!(%err, "tessellation produced an invalid diagram");
    return Err(err);
  }
  debug!(
    edges = diagram.edges().len(),
    vertices = diagram.vertex_count(),
    "tessellation finished"
  );
  Ok(diagram)
}

/// [`tessellate`] over plain coordinate pairs.
pub fn tessellate_xy(
  sites: &[(f64, f64)],
  min_x: f64,
  min_y: f64,
  max_x: f64,
  max_y: f64,
) -> Result<Diagram, Error> {
  let bounds = Rectangle::new(min_x, min_y, max_x, max_y)?;
  let sites: Vec<Point> = sites.iter().copied().map(Point::from).collect();
  tessellate(&sites, bounds)
}

// State of one sweep. Owns the beachline, the event queue and the edges traced
// so far.
struct Sweep<'a> {
  points: &'a [Point],
  queue: EventQueue,
  beachline: Beachline,
  dcel: Dcel,
  directrix: f64,
}

impl<'a> Sweep<'a> {
  fn new(sites: &'a Sites) -> Sweep<'a> {
    Sweep {
      points: &sites.points,
      queue: EventQueue::new(&sites.sweep_order),
      beachline: Beachline::new(),
      dcel: Dcel::new(sites.points.len()),
      directrix: f64::NEG_INFINITY,
    }
  }

  fn into_dcel(self) -> Dcel {
    self.dcel
  }

  fn run(&mut self) -> Result<(), Error> {
    while let Some(event) = self.queue.pop(self.points) {
      match event {
        Event::Site(site) => self.insert_arc(site)?,
        Event::Circle(id) => self.remove_arc(id)?,
      }
    }
    debug!(
      arcs = self.beachline.len(),
      circle_events = self.queue.circles_scheduled(),
      vertices = self.dcel.vertex_count(),
      "sweep finished"
    );
    Ok(())
  }

  fn site_point(&self, arc: ArcId) -> Point {
    self.points[self.beachline.site(arc)]
  }

  fn insert_arc(&mut self, site: SiteId) -> Result<(), Error> {
    let point = self.points[site];
    self.directrix = point.y();
    let (left, right) = self.beachline.locate(point.x(), self.directrix, self.points);
    trace!(site, ?left, ?right, "site event");
    let arc = self.beachline.insert_after(left, site);

    match (left, right) {
      (None, None) => {}
      // Strictly inside an arc: split it in two around the new one.
      (Some(left), Some(right)) if left == right => {
        self.detach_circle_event(left);
        let left_site = self.beachline.site(left);
        let twin = self.beachline.insert_after(Some(arc), left_site);
        let edge = self.dcel.create_edge_pair(left_site, site, None);
        self.beachline.arc_mut(arc).edge = Some(edge);
        self.beachline.arc_mut(twin).edge = Some(edge);
        self.check_circle_event(left);
        self.check_circle_event(twin);
      }
      // Beyond the end of a line of sites that all sit on the sweep line.
      (Some(left), None) => {
        let edge = self.dcel.create_edge_pair(self.beachline.site(left), site, None);
        self.beachline.arc_mut(arc).edge = Some(edge);
      }
      (None, Some(right)) => {
        let edge = self.dcel.create_edge_pair(site, self.beachline.site(right), None);
        self.beachline.arc_mut(right).edge = Some(edge);
      }
      // Exactly on a breakpoint: the breakpoint becomes a Voronoi vertex.
      (Some(left), Some(right)) => {
        self.detach_circle_event(left);
        self.detach_circle_event(right);
        let left_site = self.beachline.site(left);
        let right_site = self.beachline.site(right);
        let center = circumcenter(self.points[left_site], point, self.points[right_site])
          .ok_or(Invariant::CollinearBreakpoint)?;
        let vertex = self.dcel.add_vertex(center);
        let traced = self.left_edge(right)?;
        self
          .dcel
          .finalize_edge(traced, left_site, right_site, vertex);
        let edge = self.dcel.create_edge_pair(left_site, site, Some(vertex));
        self.beachline.arc_mut(arc).edge = Some(edge);
        let edge = self.dcel.create_edge_pair(site, right_site, Some(vertex));
        self.beachline.arc_mut(right).edge = Some(edge);
        self.check_circle_event(left);
        self.check_circle_event(right);
      }
    }
    Ok(())
  }

  fn remove_arc(&mut self, id: CircleId) -> Result<(), Error> {
    let event = self.queue.circle(id).clone();
    let arc = event.arc;
    if !event.valid || !self.beachline.arc(arc).active {
      return Err(Invariant::StaleCircleEvent.into());
    }
    let center = event.center;
    self.directrix = event.y;
    trace!(?arc, x = center.x(), y = center.y(), "circle event");
    let vertex = self.dcel.add_vertex(center);

    let mut left = self.beachline.prev(arc).ok_or(Invariant::DetachedArc)?;
    let mut right = self.beachline.next(arc).ok_or(Invariant::DetachedArc)?;
    let mut collapsing = VecDeque::from([arc]);
    self.detach_arc(arc);

    // Arcs that vanish at the same vertex are handled in one go.
    while self.converges_at(left, center) {
      let prev = self.beachline.prev(left).ok_or(Invariant::DetachedArc)?;
      collapsing.push_front(left);
      self.detach_arc(left);
      left = prev;
    }
    collapsing.push_front(left);
    self.detach_circle_event(left);

    while self.converges_at(right, center) {
      let next = self.beachline.next(right).ok_or(Invariant::DetachedArc)?;
      collapsing.push_back(right);
      self.detach_arc(right);
      right = next;
    }
    collapsing.push_back(right);
    self.detach_circle_event(right);

    for i in 1..collapsing.len() {
      let (a, b) = (collapsing[i - 1], collapsing[i]);
      let edge = self.left_edge(b)?;
      let (site_a, site_b) = (self.beachline.site(a), self.beachline.site(b));
      self.dcel.finalize_edge(edge, site_a, site_b, vertex);
    }

    let edge = self.dcel.create_edge_pair(
      self.beachline.site(left),
      self.beachline.site(right),
      Some(vertex),
    );
    self.beachline.arc_mut(right).edge = Some(edge);
    self.check_circle_event(left);
    self.check_circle_event(right);
    Ok(())
  }

  fn left_edge(&self, arc: ArcId) -> Result<EdgeId, Error> {
    Ok(
      self
        .beachline
        .arc(arc)
        .edge
        .ok_or(Invariant::UntracedBreakpoint)?,
    )
  }

  // `arc` has a pending circle event at (nearly) the same vertex.
  fn converges_at(&self, arc: ArcId, center: Point) -> bool {
    match self.beachline.arc(arc).circle {
      Some(id) => {
        let other = self.queue.circle(id).center;
        approx_eq(other.x(), center.x()) && approx_eq(other.y(), center.y())
      }
      None => false,
    }
  }

  fn detach_circle_event(&mut self, arc: ArcId) {
    if let Some(id) = self.beachline.arc_mut(arc).circle.take() {
      self.queue.invalidate(id);
    }
  }

  fn detach_arc(&mut self, arc: ArcId) {
    self.detach_circle_event(arc);
    self.beachline.remove(arc);
  }

  // Schedules the disappearance of `arc` if its neighbours squeeze it out.
  fn check_circle_event(&mut self, arc: ArcId) {
    self.detach_circle_event(arc);
    let (Some(left), Some(right)) = (self.beachline.prev(arc), self.beachline.next(arc)) else {
      return;
    };
    if self.beachline.site(left) == self.beachline.site(right) {
      return;
    }
    let Some(event) = convergence(
      self.site_point(left),
      self.site_point(arc),
      self.site_point(right),
    ) else {
      return;
    };
    if event.y < self.directrix - EPSILON {
      trace!(?arc, y = event.y, "circle event behind the sweep line");
      return;
    }
    let id = self.queue.push_circle(CircleEvent {
      arc,
      center: event.center,
      y: event.y,
      valid: true,
    });
    self.beachline.arc_mut(arc).circle = Some(id);
  }
}
