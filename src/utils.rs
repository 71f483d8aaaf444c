/// Tolerance shared by every degeneracy test in the crate: coincident sites,
/// collinear arc triples, sites on the sweep line, points on the rectangle
/// border, coincident circle events and zero-length edges.
pub const EPSILON: f64 = 1e-9;

pub(crate) fn approx_eq(a: f64, b: f64) -> bool {
  (a - b).abs() < EPSILON
}

pub(crate) fn approx_zero(a: f64) -> bool {
  a.abs() < EPSILON
}

// `a < b` by more than the tolerance.
pub(crate) fn definitely_less(a: f64, b: f64) -> bool {
  a < b - EPSILON
}

// `a > b` by more than the tolerance.
pub(crate) fn definitely_greater(a: f64, b: f64) -> bool {
  a - EPSILON > b
}
