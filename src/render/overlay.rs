//! Mapping of decoded symbol locations from image space to view space
//!
//! Shared between the on-screen view and the exported overlay image.

use crate::domain::{DecodedSymbol, Point, Quad, Rect, Size};

/// Pen constants for the two overlay kinds
pub mod pen {
    /// Bounding rectangle stroke colour (blue)
    pub const RECT_COLOR: [u8; 4] = [0, 0, 255, 255];
    /// Bounding rectangle stroke width in view pixels
    pub const RECT_WIDTH: f32 = 4.0;
    /// Oriented outline stroke colour (orange)
    pub const QUAD_COLOR: [u8; 4] = [255, 165, 0, 255];
    /// Oriented outline stroke width in view pixels
    pub const QUAD_WIDTH: f32 = 1.0;
}

/// Image-to-view transform: `view = image * zoom + origin`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    pub zoom: f64,
    pub origin: Point,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ViewTransform {
    pub const IDENTITY: ViewTransform = ViewTransform {
        zoom: 1.0,
        origin: Point::new(0, 0),
    };

    pub fn new(zoom: f64, origin: Point) -> Self {
        Self { zoom, origin }
    }

    /// Zoom for best fit that only ever shrinks
    pub fn fit_zoom(image: Size, viewport: Size) -> f64 {
        if image.width == 0 || image.height == 0 {
            return 1.0;
        }
        let zx = viewport.width as f64 / image.width as f64;
        let zy = viewport.height as f64 / image.height as f64;
        zx.min(zy).min(1.0)
    }

    fn scale(&self, v: i32) -> i32 {
        (v as f64 * self.zoom) as i32
    }

    pub fn map_point(&self, p: Point) -> Point {
        Point::new(self.scale(p.x), self.scale(p.y)).offset(self.origin)
    }

    /// Normalizes negative extents before scaling
    pub fn map_rect(&self, r: Rect) -> Rect {
        let r = r.normalized();
        Rect::new(
            self.scale(r.x),
            self.scale(r.y),
            self.scale(r.width),
            self.scale(r.height),
        )
        .translate(self.origin)
    }

    pub fn map_quad(&self, q: Quad) -> Quad {
        q.map(|p| self.map_point(p))
    }
}

/// Which overlay kinds are shown
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverlayVisibility {
    pub bounding_rects: bool,
    pub bounding_boxes: bool,
}

impl Default for OverlayVisibility {
    fn default() -> Self {
        Self {
            bounding_rects: true,
            bounding_boxes: true,
        }
    }
}

/// View-space shapes ready to draw
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OverlayShapes {
    pub rects: Vec<Rect>,
    pub quads: Vec<Quad>,
}

impl OverlayShapes {
    pub fn build(
        results: &[DecodedSymbol],
        transform: &ViewTransform,
        visibility: OverlayVisibility,
    ) -> Self {
        let mut shapes = OverlayShapes::default();
        for symbol in results {
            if visibility.bounding_rects {
                shapes.rects.push(transform.map_rect(symbol.bounding_rect));
            }
            if visibility.bounding_boxes {
                shapes.quads.push(transform.map_quad(symbol.quad));
            }
        }
        shapes
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty() && self.quads.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognition::orchestrator::tests::symbol;

    #[test]
    fn test_identity_keeps_point() {
        let p = Point::new(37, -4);
        assert_eq!(ViewTransform::IDENTITY.map_point(p), p);
    }

    #[test]
    fn test_zoom_and_offset() {
        let t = ViewTransform::new(2.0, Point::new(10, 5));
        assert_eq!(t.map_point(Point::new(3, 4)), Point::new(16, 13));
    }

    #[test]
    fn test_rect_normalized_before_scaling() {
        let t = ViewTransform::new(2.0, Point::new(1, 1));
        assert_eq!(t.map_rect(Rect::new(10, 10, -5, -5)), Rect::new(11, 11, 10, 10));
    }

    #[test]
    fn test_scaling_truncates() {
        let t = ViewTransform::new(0.5, Point::default());
        assert_eq!(t.map_point(Point::new(3, 5)), Point::new(1, 2));
    }

    #[test]
    fn test_fit_zoom_only_shrinks() {
        assert_eq!(
            ViewTransform::fit_zoom(Size::new(100, 50), Size::new(400, 400)),
            1.0
        );
        assert_eq!(
            ViewTransform::fit_zoom(Size::new(800, 400), Size::new(400, 400)),
            0.5
        );
    }

    #[test]
    fn test_visibility_filters_shapes() {
        let results = [symbol("a"), symbol("b")];
        let t = ViewTransform::IDENTITY;
        let both = OverlayShapes::build(&results, &t, OverlayVisibility::default());
        assert_eq!(both.rects.len(), 2);
        assert_eq!(both.quads.len(), 2);
        assert_eq!(both.rects[0], Rect::new(5, 5, 5, 5));

        let rects_only = OverlayShapes::build(
            &results,
            &t,
            OverlayVisibility {
                bounding_rects: true,
                bounding_boxes: false,
            },
        );
        assert!(rects_only.quads.is_empty());

        let none = OverlayShapes::build(
            &results,
            &t,
            OverlayVisibility {
                bounding_rects: false,
                bounding_boxes: false,
            },
        );
        assert!(none.is_empty());
    }
}
