//! Image loading and processing module
//!
//! This module consolidates:
//! - Source image loading (image.rs)
//! - Dilate/erode filtering (morphology.rs)
//! - QR code decoding engine (qr.rs)

pub mod image;
pub mod morphology;
pub mod qr;
