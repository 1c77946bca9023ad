//! Decoded symbol as returned by a recognition engine

use super::direction::Directions;
use super::geometry::{Quad, Rect};
use super::symbology::Symbologies;

/// One decoded barcode with its location in image space
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedSymbol {
    pub symbology: Symbologies,
    /// The decoded content
    pub text: String,
    /// Direction the symbol was read along
    pub direction: Directions,
    /// Axis-aligned bounds; extents may be negative
    pub bounding_rect: Rect,
    /// Rotation-preserving outline
    pub quad: Quad,
}

impl DecodedSymbol {
    pub fn symbology_name(&self) -> &'static str {
        self.symbology.display_name().unwrap_or("Unknown")
    }

    pub fn direction_name(&self) -> &'static str {
        self.direction.compass_name().unwrap_or("Unknown")
    }
}
