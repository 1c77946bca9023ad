//! Source image type for loaded files

use std::path::{Path, PathBuf};

use image::{GrayImage, RgbaImage};
use thiserror::Error;

use crate::domain::Size;

/// File extensions offered in the open dialog
pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "bmp", "tif", "tiff", "webp", "pnm", "pbm", "pgm", "ppm", "tga",
];

#[derive(Error, Debug)]
pub enum ImageLoadError {
    #[error("Unable to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl ImageLoadError {
    pub fn path(&self) -> &Path {
        match self {
            ImageLoadError::Io { path, .. } | ImageLoadError::Decode { path, .. } => path,
        }
    }
}

/// A decoded in-memory image. Cloning copies the pixels.
#[derive(Clone, Debug)]
pub struct SourceImage {
    pub rgba: RgbaImage,
    pub path: Option<PathBuf>,
}

impl SourceImage {
    /// Load and decode an image file
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ImageLoadError> {
        let path = path.as_ref();
        let reader = image::ImageReader::open(path)
            .and_then(|r| r.with_guessed_format())
            .map_err(|source| ImageLoadError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let decoded = reader.decode().map_err(|source| ImageLoadError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        let rgba = decoded.to_rgba8();
        log::debug!(
            "SourceImage loaded {}: {}x{} pixels",
            path.display(),
            rgba.width(),
            rgba.height()
        );
        Ok(Self {
            rgba,
            path: Some(path.to_path_buf()),
        })
    }

    #[cfg(test)]
    pub fn from_rgba(rgba: RgbaImage) -> Self {
        Self { rgba, path: None }
    }

    /// Same provenance, different pixels
    pub fn with_pixels(&self, rgba: RgbaImage) -> Self {
        Self {
            rgba,
            path: self.path.clone(),
        }
    }

    pub fn width(&self) -> u32 {
        self.rgba.width()
    }

    pub fn height(&self) -> u32 {
        self.rgba.height()
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    pub fn to_luma8(&self) -> GrayImage {
        image::DynamicImage::ImageRgba8(self.rgba.clone()).to_luma8()
    }
}
