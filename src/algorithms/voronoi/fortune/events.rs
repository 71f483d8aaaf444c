use ordered_float::OrderedFloat;
use std::collections::BTreeMap;
use tracing::trace;

use super::beachline::ArcId;
use crate::data::{Point, SiteId};

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct CircleId(pub usize);

impl std::fmt::Debug for CircleId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
    write!(f, "CircleId({})", self.0)
  }
}

/// A predicted disappearance of `arc`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CircleEvent {
  pub arc: ArcId,
  /// Voronoi vertex created when the event fires.
  pub center: Point,
  /// Sweep position of the event.
  pub y: f64,
  /// Cleared when the arc or one of its neighbours changes first.
  pub valid: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Event {
  Site(SiteId),
  Circle(CircleId),
}

// Circle events are ordered by sweep position, then by x. Ties pop in
// insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct CircleKey {
  y: OrderedFloat<f64>,
  x: OrderedFloat<f64>,
  seq: usize,
}

/// Merges the pre-sorted site events with circle events discovered on the way.
#[derive(Debug, Clone, Default)]
pub(crate) struct EventQueue {
  // Reversed sweep order: the next site sits at the back.
  sites: Vec<SiteId>,
  circles: BTreeMap<CircleKey, CircleId>,
  pool: Vec<CircleEvent>,
}

impl EventQueue {
  pub fn new(sweep_order: &[SiteId]) -> EventQueue {
    EventQueue {
      sites: sweep_order.iter().rev().copied().collect(),
      circles: BTreeMap::new(),
      pool: Vec::new(),
    }
  }

  pub fn push_circle(&mut self, event: CircleEvent) -> CircleId {
    let id = CircleId(self.pool.len());
    let key = CircleKey {
      y: OrderedFloat(event.y),
      x: OrderedFloat(event.center.x()),
      seq: id.0,
    };
    trace!(?id, arc = ?event.arc, y = event.y, "schedule circle event");
    self.pool.push(event);
    self.circles.insert(key, id);
    id
  }

  /// Marks the event as stale. It stays queued and is dropped when it reaches
  /// the front.
  pub fn invalidate(&mut self, id: CircleId) {
    trace!(?id, "invalidate circle event");
    self.pool[id.0].valid = false;
  }

  pub fn circle(&self, id: CircleId) -> &CircleEvent {
    &self.pool[id.0]
  }

  /// Number of circle events ever scheduled.
  pub fn circles_scheduled(&self) -> usize {
    self.pool.len()
  }

  fn discard_stale(&mut self) {
    while let Some((_, id)) = self.circles.first_key_value() {
      if self.pool[id.0].valid {
        break;
      }
      self.circles.pop_first();
    }
  }

  /// Removes and returns the next event. A site wins a tie against a circle
  /// event at the same position.
  pub fn pop(&mut self, points: &[Point]) -> Option<Event> {
    self.discard_stale();
    let next_site = self.sites.last().copied();
    let next_circle = self.circles.first_key_value().map(|(key, id)| (*key, *id));
    match (next_site, next_circle) {
      (Some(site), Some((key, _))) if site_precedes(points[site], key) => {
        self.sites.pop();
        Some(Event::Site(site))
      }
      (Some(site), None) => {
        self.sites.pop();
        Some(Event::Site(site))
      }
      (_, Some((key, id))) => {
        self.circles.remove(&key);
        Some(Event::Circle(id))
      }
      (None, None) => None,
    }
  }
}

fn site_precedes(site: Point, key: CircleKey) -> bool {
  site.y() < key.y.0 || (site.y() == key.y.0 && site.x() <= key.x.0)
}

#[cfg(test)]
mod tests {
  use super::*;

  use claims::assert_some_eq;

  fn circle(arc: usize, x: f64, y: f64) -> CircleEvent {
    CircleEvent {
      arc: ArcId(arc),
      center: Point::new([x, y - 1.0]),
      y,
      valid: true,
    }
  }

  #[test]
  fn sites_come_out_in_order() {
    let points = [Point::new([0.0, 0.0]), Point::new([1.0, 0.0])];
    let mut queue = EventQueue::new(&[1, 0]);
    assert_some_eq!(queue.pop(&points), Event::Site(1));
    assert_some_eq!(queue.pop(&points), Event::Site(0));
    assert_eq!(queue.pop(&points), None);
  }

  #[test]
  fn circles_interleave_with_sites() {
    let points = [Point::new([0.0, 0.0]), Point::new([0.0, 10.0])];
    let mut queue = EventQueue::new(&[0, 1]);
    let early = queue.push_circle(circle(0, 5.0, 5.0));
    let tie = queue.push_circle(circle(1, 0.0, 10.0));
    assert_some_eq!(queue.pop(&points), Event::Site(0));
    assert_some_eq!(queue.pop(&points), Event::Circle(early));
    // Site wins the tie.
    assert_some_eq!(queue.pop(&points), Event::Site(1));
    assert_some_eq!(queue.pop(&points), Event::Circle(tie));
    assert_eq!(queue.pop(&points), None);
  }

  #[test]
  fn equal_circles_pop_in_insertion_order() {
    let mut queue = EventQueue::new(&[]);
    let first = queue.push_circle(circle(0, 5.0, 5.0));
    let second = queue.push_circle(circle(1, 5.0, 5.0));
    assert_some_eq!(queue.pop(&[]), Event::Circle(first));
    assert_some_eq!(queue.pop(&[]), Event::Circle(second));
  }

  #[test]
  fn stale_circles_are_skipped() {
    let mut queue = EventQueue::new(&[]);
    let stale = queue.push_circle(circle(0, 1.0, 1.0));
    let live = queue.push_circle(circle(1, 1.0, 2.0));
    queue.invalidate(stale);
    assert!(!queue.circle(stale).valid);
    assert_some_eq!(queue.pop(&[]), Event::Circle(live));
    assert_eq!(queue.pop(&[]), None);
    assert_eq!(queue.circles_scheduled(), 2);
  }
}
