use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use super::status::{StatusLog, WELCOME};
use crate::capture::image::SourceImage;
use crate::capture::morphology::MorphologyMode;
use crate::config::AppConfig;
use crate::domain::{DecodedSymbol, Directions, OptionState, Point, Size, Symbologies};
use crate::render::image::draw_overlays_on_image;
use crate::render::overlay::{OverlayShapes, OverlayVisibility, ViewTransform};

/// The loaded image and the filtered copy on display
#[derive(Clone, Debug, Default)]
pub struct ImageState {
    /// Unfiltered original; filters are always applied to this
    pub original: Option<SourceImage>,
    /// What the viewer shows and what gets decoded
    pub displayed: Option<SourceImage>,
    /// Filter applied to `displayed`; every load resets it to `None`
    pub morphology: MorphologyMode,
}

impl ImageState {
    pub fn is_loaded(&self) -> bool {
        self.displayed.is_some()
    }
}

#[derive(Clone, Debug)]
pub struct ViewState {
    pub shrink_to_fit: bool,
    pub viewport: Option<Size>,
    pub origin: Point,
    pub visibility: OverlayVisibility,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            shrink_to_fit: false,
            viewport: None,
            origin: Point::default(),
            visibility: OverlayVisibility::default(),
        }
    }
}

/// Everything one recognition session owns
#[derive(Clone, Debug)]
pub struct Session {
    pub options: OptionState,
    /// Symbologies the engine can read; only these are offered
    pub supported: Symbologies,
    pub image: ImageState,
    /// Most recent result set, if a decode has completed since the last load
    pub results: Option<Vec<DecodedSymbol>>,
    pub view: ViewState,
    /// Whether the Recognize action is enabled
    pub recognize_enabled: bool,
    /// A decode is in flight
    pub recognizing: bool,
    pub status: StatusLog,
}

impl Session {
    pub fn new(config: &AppConfig, supported: Symbologies) -> Self {
        let mut status = StatusLog::default();
        status.push(WELCOME);
        Self {
            options: config.option_state(supported),
            supported,
            image: ImageState::default(),
            results: None,
            view: ViewState {
                shrink_to_fit: config.shrink_to_fit,
                visibility: OverlayVisibility {
                    bounding_rects: config.show_bounding_rects,
                    bounding_boxes: config.show_bounding_boxes,
                },
                ..ViewState::default()
            },
            recognize_enabled: false,
            recognizing: false,
            status,
        }
    }

    /// Symbology list entries in display order
    pub fn offered_symbologies(&self) -> Vec<(Symbologies, &'static str)> {
        Symbologies::offered(self.supported)
    }

    /// Direction list entries in display order
    pub fn offered_directions(&self) -> Vec<(Directions, &'static str)> {
        Directions::catalog().collect()
    }

    /// Recompute readiness with no pending toggle
    pub fn validate_recognize(&mut self) {
        self.recognize_enabled = self.options.is_ready(self.image.is_loaded(), 0, 0);
    }

    pub fn view_transform(&self) -> ViewTransform {
        let zoom = match (&self.image.displayed, self.view.viewport) {
            (Some(img), Some(viewport)) if self.view.shrink_to_fit => {
                ViewTransform::fit_zoom(img.size(), viewport)
            }
            _ => 1.0,
        };
        ViewTransform::new(zoom, self.view.origin)
    }

    /// View-space overlay shapes for the current results
    pub fn overlay_shapes(&self) -> OverlayShapes {
        match &self.results {
            Some(results) => {
                OverlayShapes::build(results, &self.view_transform(), self.view.visibility)
            }
            None => OverlayShapes::default(),
        }
    }

    /// The view as the user sees it: the displayed image scaled and
    /// placed by the view transform, with result overlays on top.
    ///
    /// The canvas is the viewport when one is known, otherwise just large
    /// enough for the placed image.
    pub fn render_view(&self) -> Option<RgbaImage> {
        let displayed = self.image.displayed.as_ref()?;
        let transform = self.view_transform();
        let scaled = if transform.zoom < 1.0 {
            let w = ((displayed.width() as f64 * transform.zoom) as u32).max(1);
            let h = ((displayed.height() as f64 * transform.zoom) as u32).max(1);
            imageops::resize(&displayed.rgba, w, h, FilterType::Triangle)
        } else {
            displayed.rgba.clone()
        };

        let origin = transform.origin;
        let (width, height) = match self.view.viewport {
            Some(viewport) => (viewport.width, viewport.height),
            None => (
                scaled.width() + origin.x.max(0) as u32,
                scaled.height() + origin.y.max(0) as u32,
            ),
        };
        let mut canvas = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));
        imageops::overlay(&mut canvas, &scaled, origin.x as i64, origin.y as i64);

        draw_overlays_on_image(&mut canvas, &self.overlay_shapes());
        Some(canvas)
    }
}
