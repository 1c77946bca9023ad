//! QR code decoding engine using rqrr

use image::{GrayImage, Luma};

use super::image::SourceImage;
use crate::domain::{
    DecodedSymbol, Directions, Point, Quad, RecognitionRequest, Rect, ScanInterval, Symbologies,
};
use crate::recognition::engine::{DecodingEngine, EngineError};

/// Grey level used to binarise when automatic thresholding is off
pub const DEFAULT_THRESHOLD_LEVEL: u8 = 128;

/// Reads QR codes. Scan interval is validated but has no effect on this
/// reader, which locates finder patterns over the whole image.
#[derive(Debug, Clone)]
pub struct QrEngine {
    threshold_level: u8,
}

impl Default for QrEngine {
    fn default() -> Self {
        Self {
            threshold_level: DEFAULT_THRESHOLD_LEVEL,
        }
    }
}

impl QrEngine {
    fn validate(&self, request: &RecognitionRequest) -> Result<(), EngineError> {
        let interval = request.scan_interval.get();
        if !(ScanInterval::MIN..=ScanInterval::MAX).contains(&interval) {
            return Err(EngineError::OutOfRange(format!(
                "scan interval {} is outside {}..={}",
                interval,
                ScanInterval::MIN,
                ScanInterval::MAX
            )));
        }
        if request.expected_count.get() == 0 {
            return Err(EngineError::OutOfRange(
                "expected barcode count must be at least 1".to_string(),
            ));
        }
        let unsupported = request.symbologies - self.supported_symbologies();
        if !unsupported.is_empty() {
            return Err(EngineError::Unsupported(unsupported.names().join(", ")));
        }
        Ok(())
    }

    fn prepare_gray(&self, image: &SourceImage, thresholding: bool) -> GrayImage {
        let mut gray = image.to_luma8();
        if !thresholding {
            let level = self.threshold_level;
            for p in gray.pixels_mut() {
                *p = Luma([if p[0] < level { 0 } else { 255 }]);
            }
        }
        gray
    }
}

impl DecodingEngine for QrEngine {
    fn name(&self) -> &str {
        "rqrr"
    }

    fn supported_symbologies(&self) -> Symbologies {
        Symbologies::QR
    }

    fn decode(
        &self,
        image: &SourceImage,
        thresholding: bool,
        request: &RecognitionRequest,
    ) -> Result<Vec<DecodedSymbol>, EngineError> {
        use rqrr::PreparedImage;

        self.validate(request)?;
        if image.width() == 0 || image.height() == 0 {
            return Err(EngineError::Decode("image has no pixels".to_string()));
        }

        let gray = self.prepare_gray(image, thresholding);
        let mut prepared = PreparedImage::prepare(gray);
        let grids = prepared.detect_grids();
        log::debug!("rqrr found {} candidate grids", grids.len());

        let limit = request.expected_count.get() as usize;
        let mut results = Vec::new();
        for grid in grids {
            let content = match grid.decode() {
                Ok((_, content)) => content,
                Err(e) => {
                    log::debug!("Skipping undecodable grid: {:?}", e);
                    continue;
                }
            };

            // bounds run clockwise from the top-left finder pattern
            let b = &grid.bounds;
            let [tl, tr, br, bl] = [0, 1, 2, 3].map(|i| Point::new(b[i].x, b[i].y));
            let direction = Directions::from_vector((tr.x - tl.x) as f32, (tr.y - tl.y) as f32);
            if !request.directions.contains(direction) {
                log::debug!(
                    "Skipping QR code read {:?}, not in selected directions",
                    direction
                );
                continue;
            }

            let Some(bounding_rect) = Rect::bounding(&[tl, tr, br, bl]) else {
                continue;
            };
            results.push(DecodedSymbol {
                symbology: Symbologies::QR,
                text: content,
                direction,
                bounding_rect,
                quad: Quad::new([tl, bl], [tr, br]),
            });
            if results.len() >= limit {
                break;
            }
        }

        Ok(results)
    }
}
