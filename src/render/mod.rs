//! Result overlay rendering module
//!
//! This module contains:
//! - Image-to-view mapping of symbol locations (overlay.rs)
//! - Image rendering using tiny-skia, for saving to file (image.rs)

pub mod image;
pub mod overlay;
