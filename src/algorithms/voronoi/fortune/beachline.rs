use super::events::CircleId;
use super::parabola::breakpoint;
use crate::data::dcel::EdgeId;
use crate::data::{Point, SiteId};
use crate::utils::{approx_eq, EPSILON};

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct ArcId(pub usize);

impl std::fmt::Debug for ArcId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
    write!(f, "ArcId({})", self.0)
  }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Arc {
  pub site: SiteId,
  pub prev: Option<ArcId>,
  pub next: Option<ArcId>,
  /// Edge traced by the breakpoint on the left of this arc.
  pub edge: Option<EdgeId>,
  /// Pending circle event that would remove this arc.
  pub circle: Option<CircleId>,
  pub active: bool,
}

/// Arcs ordered by `x`, stored as a doubly linked list in an arena. Removed
/// arcs keep their slot.
#[derive(Debug, Clone, Default)]
pub(crate) struct Beachline {
  arcs: Vec<Arc>,
  head: Option<ArcId>,
  len: usize,
}

impl Beachline {
  pub fn new() -> Beachline {
    Beachline::default()
  }

  pub fn len(&self) -> usize {
    self.len
  }

  pub fn arc(&self, id: ArcId) -> &Arc {
    &self.arcs[id.0]
  }

  pub fn arc_mut(&mut self, id: ArcId) -> &mut Arc {
    &mut self.arcs[id.0]
  }

  pub fn prev(&self, id: ArcId) -> Option<ArcId> {
    self.arcs[id.0].prev
  }

  pub fn next(&self, id: ArcId) -> Option<ArcId> {
    self.arcs[id.0].next
  }

  pub fn site(&self, id: ArcId) -> SiteId {
    self.arcs[id.0].site
  }

  #[cfg(test)]
  pub fn iter(&self) -> impl Iterator<Item = ArcId> + '_ {
    std::iter::successors(self.head, move |&id| self.next(id))
  }

  /// Inserts a fresh arc for `site` right after `after`, or at the front.
  pub fn insert_after(&mut self, after: Option<ArcId>, site: SiteId) -> ArcId {
    let id = ArcId(self.arcs.len());
    let next = match after {
      Some(prev) => self.next(prev),
      None => self.head,
    };
    self.arcs.push(Arc {
      site,
      prev: after,
      next,
      edge: None,
      circle: None,
      active: true,
    });
    match after {
      Some(prev) => self.arcs[prev.0].next = Some(id),
      None => self.head = Some(id),
    }
    if let Some(next) = next {
      self.arcs[next.0].prev = Some(id);
    }
    self.len += 1;
    id
  }

  /// Unlinks `id`. The arc keeps its own `prev` and `next` fields.
  pub fn remove(&mut self, id: ArcId) {
    let Arc { prev, next, .. } = self.arcs[id.0];
    match prev {
      Some(prev) => self.arcs[prev.0].next = next,
      None => self.head = next,
    }
    if let Some(next) = next {
      self.arcs[next.0].prev = prev;
    }
    self.arcs[id.0].active = false;
    self.len -= 1;
  }

  pub fn left_break_point(&self, id: ArcId, directrix: f64, points: &[Point]) -> f64 {
    let site = points[self.site(id)];
    if approx_eq(site.y(), directrix) {
      return site.x();
    }
    match self.prev(id) {
      Some(prev) => breakpoint(points[self.site(prev)], site, directrix),
      None => f64::NEG_INFINITY,
    }
  }

  pub fn right_break_point(&self, id: ArcId, directrix: f64, points: &[Point]) -> f64 {
    if let Some(next) = self.next(id) {
      return self.left_break_point(next, directrix, points);
    }
    let site = points[self.site(id)];
    if approx_eq(site.y(), directrix) {
      site.x()
    } else {
      f64::INFINITY
    }
  }

  /// Finds the arcs a new site at `x` falls between.
  ///
  /// * `(Some(a), Some(a))`: strictly inside arc `a`.
  /// * `(Some(a), Some(b))`: on the breakpoint between `a` and `b`.
  /// * `(Some(a), None)`: past the last arc, only possible while every arc
  ///   still lies on the sweep line.
  /// * `(None, Some(b))`: before the first arc, same condition.
  /// * `(None, None)`: the beachline is empty.
  pub fn locate(
    &self,
    x: f64,
    directrix: f64,
    points: &[Point],
  ) -> (Option<ArcId>, Option<ArcId>) {
    let mut cursor = self.head;
    while let Some(arc) = cursor {
      let dxl = self.left_break_point(arc, directrix, points) - x;
      let dxr = x - self.right_break_point(arc, directrix, points);
      if dxl <= EPSILON && dxr > EPSILON {
        match self.next(arc) {
          Some(next) => {
            cursor = Some(next);
            continue;
          }
          None => return (Some(arc), None),
        }
      }
      return if dxl > -EPSILON {
        (self.prev(arc), Some(arc))
      } else if dxr > -EPSILON {
        (Some(arc), self.next(arc))
      } else {
        (Some(arc), Some(arc))
      };
    }
    (None, None)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn line(sites: &[SiteId]) -> Beachline {
    let mut beachline = Beachline::new();
    let mut last = None;
    for &site in sites {
      last = Some(beachline.insert_after(last, site));
    }
    beachline
  }

  fn sites(beachline: &Beachline) -> Vec<SiteId> {
    beachline.iter().map(|arc| beachline.site(arc)).collect()
  }

  #[test]
  fn insert_and_remove_keep_links() {
    let mut beachline = line(&[0, 1, 2]);
    assert_eq!(sites(&beachline), vec![0, 1, 2]);
    let front = beachline.insert_after(None, 3);
    assert_eq!(sites(&beachline), vec![3, 0, 1, 2]);
    beachline.remove(ArcId(1));
    assert_eq!(sites(&beachline), vec![3, 0, 2]);
    assert!(!beachline.arc(ArcId(1)).active);
    beachline.remove(front);
    assert_eq!(sites(&beachline), vec![0, 2]);
    assert_eq!(beachline.prev(ArcId(0)), None);
    assert_eq!(beachline.len(), 2);
  }

  #[test]
  fn locate_on_empty_line() {
    assert_eq!(Beachline::new().locate(0.0, 0.0, &[]), (None, None));
  }

  #[test]
  fn locate_inside_single_arc() {
    let points = [Point::new([500.0, 100.0])];
    let beachline = line(&[0]);
    assert_eq!(
      beachline.locate(500.0, 500.0, &points),
      (Some(ArcId(0)), Some(ArcId(0)))
    );
  }

  #[test]
  fn locate_past_flat_arcs() {
    let points = [Point::new([100.0, 500.0]), Point::new([500.0, 500.0])];
    let beachline = line(&[0, 1]);
    assert_eq!(
      beachline.locate(900.0, 500.0, &points),
      (Some(ArcId(1)), None)
    );
  }

  #[test]
  fn locate_between_arcs() {
    let points = [
      Point::new([0.0, 0.0]),
      Point::new([1000.0, 0.0]),
      Point::new([250.0, 500.0]),
    ];
    let beachline = line(&[0, 1]);
    // The breakpoint of two equal-height arcs sits halfway.
    assert_eq!(
      beachline.locate(500.0, 500.0, &points),
      (Some(ArcId(0)), Some(ArcId(1)))
    );
    assert_eq!(
      beachline.locate(250.0, 500.0, &points),
      (Some(ArcId(0)), Some(ArcId(0)))
    );
    assert_eq!(
      beachline.locate(750.0, 500.0, &points),
      (Some(ArcId(1)), Some(ArcId(1)))
    );
  }
}
