//! CPU rasterization of the story viewport.

pub mod compose;
pub(crate) mod raster;
