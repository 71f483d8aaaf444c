pub mod voronoi;

#[doc(inline)]
pub use voronoi::fortune::tessellate;
