pub(crate) mod dcel;
mod diagram;
pub(crate) mod point;
mod rectangle;
mod vector;

pub use diagram::*;
pub use point::Point;
pub use rectangle::{Rectangle, Side};
pub use vector::Vector;

/// Index of a site in the caller's input slice.
pub type SiteId = usize;
