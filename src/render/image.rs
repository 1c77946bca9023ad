//! Overlay rendering using tiny-skia
//!
//! Draws view-space overlay shapes onto an RgbaImage for saving to disk.

use image::RgbaImage;
use tiny_skia::{LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

use super::overlay::{OverlayShapes, pen};
use crate::domain::Quad;

/// Convert RgbaImage to Pixmap, apply drawing function, and copy back
fn with_pixmap(img: &mut RgbaImage, f: impl FnOnce(&mut Pixmap)) {
    let (w, h) = (img.width(), img.height());
    let Some(size) = tiny_skia::IntSize::from_wh(w, h) else {
        return;
    };
    let Some(mut pixmap) = Pixmap::from_vec(img.as_raw().clone(), size) else {
        return;
    };

    f(&mut pixmap);

    img.copy_from_slice(pixmap.data());
}

fn build_quad_path(quad: &Quad) -> Option<tiny_skia::Path> {
    let [p1, p2, p3, p4] = quad.corners();
    let mut pb = PathBuilder::new();
    pb.move_to(p1.x as f32, p1.y as f32);
    pb.line_to(p2.x as f32, p2.y as f32);
    pb.line_to(p3.x as f32, p3.y as f32);
    pb.line_to(p4.x as f32, p4.y as f32);
    pb.close();
    pb.finish()
}

fn pen_paint([r, g, b, a]: [u8; 4]) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    paint
}

/// Draw bounding rectangles (blue) and oriented outlines (orange)
pub fn draw_overlays_on_image(img: &mut RgbaImage, shapes: &OverlayShapes) {
    if shapes.is_empty() {
        return;
    }

    with_pixmap(img, |pixmap| {
        let rect_paint = pen_paint(pen::RECT_COLOR);
        let rect_stroke = Stroke {
            width: pen::RECT_WIDTH,
            line_join: LineJoin::Miter,
            ..Default::default()
        };
        for r in &shapes.rects {
            let Some(rect) = tiny_skia::Rect::from_xywh(
                r.x as f32,
                r.y as f32,
                r.width as f32,
                r.height as f32,
            ) else {
                continue;
            };
            let path = PathBuilder::from_rect(rect);
            pixmap.stroke_path(&path, &rect_paint, &rect_stroke, Transform::identity(), None);
        }

        let quad_paint = pen_paint(pen::QUAD_COLOR);
        let quad_stroke = Stroke {
            width: pen::QUAD_WIDTH,
            ..Default::default()
        };
        for quad in &shapes.quads {
            if let Some(path) = build_quad_path(quad) {
                pixmap.stroke_path(&path, &quad_paint, &quad_stroke, Transform::identity(), None);
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Point, Rect};
    use image::Rgba;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    #[test]
    fn test_rect_outline_is_drawn_blue() {
        let mut img = RgbaImage::from_pixel(40, 40, WHITE);
        let shapes = OverlayShapes {
            rects: vec![Rect::new(10, 10, 20, 20)],
            quads: vec![],
        };
        draw_overlays_on_image(&mut img, &shapes);

        let edge = img.get_pixel(10, 20);
        assert!(edge[2] > 200 && edge[0] < 60, "edge pixel {:?}", edge);
        // interior untouched
        assert_eq!(img.get_pixel(20, 20), &WHITE);
    }

    #[test]
    fn test_quad_outline_is_drawn() {
        let mut img = RgbaImage::from_pixel(40, 40, WHITE);
        let shapes = OverlayShapes {
            rects: vec![],
            quads: vec![Quad::new(
                [Point::new(5, 5), Point::new(5, 30)],
                [Point::new(30, 5), Point::new(30, 30)],
            )],
        };
        draw_overlays_on_image(&mut img, &shapes);
        assert_ne!(img.get_pixel(5, 18), &WHITE);
        assert_eq!(img.get_pixel(18, 18), &WHITE);
    }

    #[test]
    fn test_empty_shapes_leave_image_alone() {
        let mut img = RgbaImage::from_pixel(4, 4, WHITE);
        draw_overlays_on_image(&mut img, &OverlayShapes::default());
        assert!(img.pixels().all(|p| *p == WHITE));
    }
}
