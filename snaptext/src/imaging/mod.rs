//! Image decoding and enhancement for OCR.
//!
//! [`loader`] turns raw bytes or a file path into a [`Raster`]; [`enhance`]
//! holds the fixed set of enhancement strategies that produce OCR candidates
//! from an original raster.

pub mod enhance;
pub mod loader;

pub use enhance::Strategy;
pub use loader::{ColorMode, Raster};
