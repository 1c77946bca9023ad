//! Geometric types for decoded symbol locations

/// A point in integer pixel coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Translate the point by the given offset
    pub fn offset(self, by: Point) -> Point {
        Point {
            x: self.x + by.x,
            y: self.y + by.y,
        }
    }
}

/// Axis-aligned rectangle as reported by the engine.
///
/// Width and height may be negative; call [`Rect::normalized`] before
/// doing anything that assumes a top-left origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle from origin and extent
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Smallest rectangle containing all of `points`
    pub fn bounding(points: &[Point]) -> Option<Rect> {
        let first = points.first()?;
        let (mut left, mut top, mut right, mut bottom) = (first.x, first.y, first.x, first.y);
        for p in &points[1..] {
            left = left.min(p.x);
            top = top.min(p.y);
            right = right.max(p.x);
            bottom = bottom.max(p.y);
        }
        Some(Rect::new(left, top, right - left, bottom - top))
    }

    /// Shift the origin so width and height are non-negative
    pub fn normalized(self) -> Rect {
        let mut r = self;
        if r.width < 0 {
            r.x += r.width;
            r.width = -r.width;
        }
        if r.height < 0 {
            r.y += r.height;
            r.height = -r.height;
        }
        r
    }

    /// Translate the rectangle by the given offset
    pub fn translate(self, by: Point) -> Rect {
        Rect {
            x: self.x + by.x,
            y: self.y + by.y,
            ..self
        }
    }
}

/// Oriented quadrilateral built from the start and end edge point pairs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Quad {
    pub start_edge: [Point; 2],
    pub end_edge: [Point; 2],
}

impl Quad {
    pub fn new(start_edge: [Point; 2], end_edge: [Point; 2]) -> Self {
        Self {
            start_edge,
            end_edge,
        }
    }

    /// Corners in drawing order: start[0], start[1], end[1], end[0]
    pub fn corners(&self) -> [Point; 4] {
        [
            self.start_edge[0],
            self.start_edge[1],
            self.end_edge[1],
            self.end_edge[0],
        ]
    }

    /// Apply `f` to every point
    pub fn map(self, mut f: impl FnMut(Point) -> Point) -> Quad {
        Quad {
            start_edge: [f(self.start_edge[0]), f(self.start_edge[1])],
            end_edge: [f(self.end_edge[0]), f(self.end_edge[1])],
        }
    }
}

/// Image or viewport dimensions in pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_negative_extent() {
        let r = Rect::new(10, 10, -5, -5).normalized();
        assert_eq!(r, Rect::new(5, 5, 5, 5));
    }

    #[test]
    fn test_normalize_leaves_positive_extent() {
        let r = Rect::new(1, 2, 3, 4);
        assert_eq!(r.normalized(), r);
    }

    #[test]
    fn test_bounding_rect() {
        let points = [
            Point::new(4, 9),
            Point::new(12, 2),
            Point::new(7, 15),
            Point::new(1, 6),
        ];
        assert_eq!(Rect::bounding(&points), Some(Rect::new(1, 2, 11, 13)));
        assert_eq!(Rect::bounding(&[]), None);
    }

    #[test]
    fn test_quad_corner_order() {
        let q = Quad::new(
            [Point::new(0, 0), Point::new(0, 10)],
            [Point::new(20, 0), Point::new(20, 10)],
        );
        assert_eq!(
            q.corners(),
            [
                Point::new(0, 0),
                Point::new(0, 10),
                Point::new(20, 10),
                Point::new(20, 0)
            ]
        );
    }
}
