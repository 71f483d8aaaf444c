//! Voronoi diagrams clipped to a rectangle.
//!
//! [`fortune`] is the production sweep. [`naive`] clips the rectangle by one
//! half-plane per neighbour and serves as a slow reference.
pub mod fortune;
pub mod naive;

use tracing::debug;

use crate::data::{Point, Rectangle, SiteId};
use crate::utils::EPSILON;
use crate::Error;

/// Input sites after validation.
#[derive(Debug, Clone)]
pub(crate) struct Sites {
  /// Snapped copies of the caller's sites, indexed by [`SiteId`].
  pub points: Vec<Point>,
  /// For a repeated site, the earlier site in sweep order that owns the cell.
  pub duplicate_of: Vec<Option<SiteId>>,
  /// Distinct sites sorted by `y`, then `x`.
  pub sweep_order: Vec<SiteId>,
}

impl Sites {
  pub fn unique_count(&self) -> usize {
    self.sweep_order.len()
  }
}

/// Rejects non-finite and out-of-bounds sites, snaps sites that sit within
/// [`EPSILON`] of the border onto it and folds duplicates.
pub(crate) fn prepare_sites(sites: &[Point], bounds: &Rectangle) -> Result<Sites, Error> {
  let mut points = Vec::with_capacity(sites.len());
  for (index, site) in sites.iter().enumerate() {
    if !site.is_finite() {
      return Err(Error::DegenerateInput);
    }
    if !bounds.contains(site) {
      return Err(Error::SiteOutOfBounds(index));
    }
    points.push(bounds.snap(site));
  }

  let mut order: Vec<SiteId> = (0..points.len()).collect();
  order.sort_by(|&a, &b| {
    let (p, q) = (points[a], points[b]);
    p.y()
      .total_cmp(&q.y())
      .then(p.x().total_cmp(&q.x()))
      .then(a.cmp(&b))
  });

  let mut duplicate_of = vec![None; points.len()];
  let mut sweep_order: Vec<SiteId> = Vec::with_capacity(points.len());
  for site in order {
    let p = points[site];
    let owner = sweep_order
      .iter()
      .rev()
      .take_while(|&&other| p.y() - points[other].y() < EPSILON)
      .find(|&&other| points[other].approx_eq(&p))
      .copied();
    match owner {
      Some(owner) => duplicate_of[site] = Some(owner),
      None => sweep_order.push(site),
    }
  }
  let sites = Sites {
    points,
    duplicate_of,
    sweep_order,
  };
  debug!(
    sites = sites.points.len(),
    unique = sites.unique_count(),
    "prepared sites"
  );
  Ok(sites)
}
