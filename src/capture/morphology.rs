//! Morphological filtering (dilate/erode) of dark regions

use image::{Rgba, RgbaImage};

use super::image::SourceImage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MorphologyMode {
    #[default]
    None,
    /// Grow dark regions
    Dilate,
    /// Shrink dark regions
    Erode,
}

impl MorphologyMode {
    pub fn label(self) -> &'static str {
        match self {
            MorphologyMode::None => "None",
            MorphologyMode::Dilate => "Dilate",
            MorphologyMode::Erode => "Erode",
        }
    }

    /// Parse a mode name, ignoring case
    pub fn from_label(name: &str) -> Option<Self> {
        [Self::None, Self::Dilate, Self::Erode]
            .into_iter()
            .find(|mode| mode.label().eq_ignore_ascii_case(name))
    }
}

fn luminance(p: &Rgba<u8>) -> u32 {
    (299 * p[0] as u32 + 587 * p[1] as u32 + 114 * p[2] as u32) / 1000
}

/// Return a filtered copy of `image`. `None` is the identity.
///
/// Each output pixel takes the colour of the darkest (dilate) or brightest
/// (erode) pixel in its 3x3 neighbourhood; alpha is kept from the source.
pub fn apply(image: &SourceImage, mode: MorphologyMode) -> SourceImage {
    let pick_darker = match mode {
        MorphologyMode::None => return image.clone(),
        MorphologyMode::Dilate => true,
        MorphologyMode::Erode => false,
    };

    let src = &image.rgba;
    let (w, h) = src.dimensions();
    let mut out = RgbaImage::new(w, h);

    for y in 0..h {
        for x in 0..w {
            let mut best = *src.get_pixel(x, y);
            let mut best_lum = luminance(&best);
            for ny in y.saturating_sub(1)..=(y + 1).min(h - 1) {
                for nx in x.saturating_sub(1)..=(x + 1).min(w - 1) {
                    let p = src.get_pixel(nx, ny);
                    let lum = luminance(p);
                    if (pick_darker && lum < best_lum) || (!pick_darker && lum > best_lum) {
                        best = *p;
                        best_lum = lum;
                    }
                }
            }
            best[3] = src.get_pixel(x, y)[3];
            out.put_pixel(x, y, best);
        }
    }

    log::debug!("Applied {} morphology to {}x{} image", mode.label(), w, h);
    image.with_pixels(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    fn dot_image() -> SourceImage {
        let mut rgba = RgbaImage::from_pixel(5, 5, WHITE);
        rgba.put_pixel(2, 2, BLACK);
        SourceImage::from_rgba(rgba)
    }

    fn dark_pixels(img: &SourceImage) -> usize {
        img.rgba.pixels().filter(|p| **p == BLACK).count()
    }

    #[test]
    fn test_none_is_identity() {
        let img = dot_image();
        let out = apply(&img, MorphologyMode::None);
        assert_eq!(out.rgba, img.rgba);
    }

    #[test]
    fn test_dilate_grows_dark_dot() {
        let out = apply(&dot_image(), MorphologyMode::Dilate);
        assert_eq!(dark_pixels(&out), 9);
        assert_eq!(out.rgba.get_pixel(0, 0), &WHITE);
        assert_eq!(out.rgba.get_pixel(1, 3), &BLACK);
    }

    #[test]
    fn test_erode_removes_isolated_dot() {
        let out = apply(&dot_image(), MorphologyMode::Erode);
        assert_eq!(dark_pixels(&out), 0);
    }

    #[test]
    fn test_filter_is_derived_from_input_only() {
        let img = dot_image();
        let once = apply(&img, MorphologyMode::Dilate);
        let again = apply(&img, MorphologyMode::Dilate);
        assert_eq!(once.rgba, again.rgba);
        assert_eq!(dark_pixels(&img), 1);
    }

    #[test]
    fn test_mode_from_label() {
        assert_eq!(MorphologyMode::from_label("erode"), Some(MorphologyMode::Erode));
        assert_eq!(MorphologyMode::from_label("NONE"), Some(MorphologyMode::None));
        assert_eq!(MorphologyMode::from_label("open"), None);
    }
}
