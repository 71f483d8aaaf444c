// #![deny(warnings)]
#![deny(clippy::cast_lossless)]
#![doc(test(no_crate_inject))]
//! Bounded planar Voronoi diagrams.
//!
//! [`tessellate`] runs Fortune's sweep over a set of sites, clips the result to a
//! [`Rectangle`](data::Rectangle) and returns a [`Diagram`](data::Diagram) in which
//! every site owns a closed, counter-clockwise cell.
//!
//! ```rust
//! # use rvoronoi::data::{Point, Rectangle};
//! # use rvoronoi::Error;
//! let bounds = Rectangle::new(0.0, 0.0, 1000.0, 1000.0)?;
//! let sites = [Point::new([500.0, 700.0]), Point::new([500.0, 300.0])];
//! let diagram = rvoronoi::tessellate(&sites, bounds)?;
//!
//! assert_eq!(diagram.edges().len(), 7);
//! assert_eq!(diagram.cell(0).half_edges().len(), 4);
//! # Ok::<(), Error>(())
//! ```
pub mod algorithms;
pub mod data;
mod transformation;
mod utils;

pub use algorithms::voronoi::fortune::{tessellate, tessellate_xy};
pub use transformation::Transform;
pub use utils::EPSILON;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
  /// `min_x >= max_x` or `min_y >= max_y`.
  InvalidBoundary,
  /// A site or bound is NaN or infinite.
  DegenerateInput,
  /// The site with this index lies outside the rectangle.
  SiteOutOfBounds(usize),
  /// The sweep or the clipping pass broke one of its own invariants. This is a
  /// bug in the algorithm, never a problem with the input.
  InternalInconsistency(Invariant),
}

/// Invariants whose violation is reported as [`Error::InternalInconsistency`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invariant {
  /// The edges of this site's cell do not form a single closed cycle.
  OpenCell(usize),
  /// This site ended the run without any edge.
  EmptyCell(usize),
  /// This site's cell has zero or negative (clockwise) area.
  DegenerateCell(usize),
  /// A circle event refers to an arc that lacks a neighbour on either side.
  DetachedArc,
  /// A circle event was processed after its arc had left the beachline.
  StaleCircleEvent,
  /// A breakpoint between two arcs has no edge tracing it.
  UntracedBreakpoint,
  /// A site fell on a breakpoint whose arcs are collinear with it.
  CollinearBreakpoint,
  /// This edge is not shared by the expected number of cells.
  UnsharedEdge(usize),
  /// `V - E + F != 2` for the clipped planar graph.
  EulerCharacteristic,
  /// The cell areas do not add up to the area of the rectangle.
  CoverageMismatch,
}

impl std::fmt::Display for Error {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
    match self {
      Error::InvalidBoundary => write!(f, "Invalid boundary"),
      Error::DegenerateInput => write!(f, "Non-finite coordinate"),
      Error::SiteOutOfBounds(site) => write!(f, "Site {} lies outside the boundary", site),
      Error::InternalInconsistency(invariant) => {
        write!(f, "Algorithm invariant violated: {}", invariant)
      }
    }
  }
}

impl std::fmt::Display for Invariant {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
    match self {
      Invariant::OpenCell(site) => write!(f, "cell of site {} is not closed", site),
      Invariant::EmptyCell(site) => write!(f, "cell of site {} has no edges", site),
      Invariant::DegenerateCell(site) => write!(f, "cell of site {} has no area", site),
      Invariant::DetachedArc => write!(f, "collapsing arc has no neighbours"),
      Invariant::StaleCircleEvent => write!(f, "circle event refers to a removed arc"),
      Invariant::UntracedBreakpoint => write!(f, "breakpoint without an edge"),
      Invariant::CollinearBreakpoint => write!(f, "site on a collinear breakpoint"),
      Invariant::UnsharedEdge(edge) => write!(f, "edge {} has the wrong number of cells", edge),
      Invariant::EulerCharacteristic => write!(f, "Euler characteristic is not 2"),
      Invariant::CoverageMismatch => write!(f, "cells do not cover the boundary"),
    }
  }
}

impl std::error::Error for Error {}

impl From<Invariant> for Error {
  fn from(invariant: Invariant) -> Error {
    Error::InternalInconsistency(invariant)
  }
}

#[cfg(test)]
pub mod testing;
