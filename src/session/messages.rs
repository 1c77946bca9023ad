//! Message types for a recognition session
//!
//! This module contains:
//! - Msg enum with nested sub-enums for organized message handling
//! - Effect enum for work the session asks its driver to perform

use std::path::PathBuf;

use crate::capture::image::{ImageLoadError, SourceImage};
use crate::capture::morphology::MorphologyMode;
use crate::domain::RecognitionRequest;
use crate::recognition::orchestrator::RecognitionError;
use crate::recognition::worker::RecognitionOutcome;

// ============================================================================
// Option List Types
// ============================================================================

/// Checked list box actions (symbologies and scan directions)
#[derive(Debug, Clone)]
pub enum ListMsg {
    /// An item is about to change its checked state.
    /// Fired before the list's own selection reflects the change.
    ItemCheck { index: usize, checked: bool },
    /// Check every offered item
    SelectAll,
    /// Uncheck every item
    ClearAll,
}

// ============================================================================
// View Types
// ============================================================================

/// Viewer display messages
#[derive(Debug, Clone)]
pub enum ViewMsg {
    /// Shrink the image to fit the viewport (never enlarges)
    ShrinkToFit(bool),
    /// Show axis-aligned bounding rectangles
    ShowBoundingRects(bool),
    /// Show oriented bounding boxes
    ShowBoundingBoxes(bool),
    /// Viewport resized
    Viewport(u32, u32),
    /// Image origin within the viewport changed
    Origin(i32, i32),
}

// ============================================================================
// Session Messages
// ============================================================================

#[derive(Debug)]
pub enum Msg {
    /// Open an image file
    Open(PathBuf),
    /// Image load finished
    Loaded(Result<SourceImage, ImageLoadError>),
    /// Symbology list actions
    Symbology(ListMsg),
    /// Scan direction list actions
    Direction(ListMsg),
    /// Scan interval slider moved
    ScanInterval(i32),
    /// Expected barcode count slider moved
    ExpectedCount(i64),
    /// Automatic thresholding toggled
    Thresholding(bool),
    /// Morphology filter selected
    Morphology(MorphologyMode),
    /// Viewer display changes
    View(ViewMsg),
    /// Recognize button pressed
    Recognize,
    /// Recognition finished
    Recognized(Result<RecognitionOutcome, RecognitionError>),
}

impl Msg {
    /// Short label for logs; the payloads can hold whole images
    pub fn label(&self) -> &'static str {
        match self {
            Msg::Open(_) => "Open",
            Msg::Loaded(_) => "Loaded",
            Msg::Symbology(_) => "Symbology",
            Msg::Direction(_) => "Direction",
            Msg::ScanInterval(_) => "ScanInterval",
            Msg::ExpectedCount(_) => "ExpectedCount",
            Msg::Thresholding(_) => "Thresholding",
            Msg::Morphology(_) => "Morphology",
            Msg::View(_) => "View",
            Msg::Recognize => "Recognize",
            Msg::Recognized(_) => "Recognized",
        }
    }
}

/// Work requested by the session
#[derive(Debug)]
pub enum Effect {
    /// Load the image at this path and reply with `Msg::Loaded`
    LoadImage(PathBuf),
    /// Decode `image` off-thread and reply with `Msg::Recognized`
    StartRecognition {
        image: SourceImage,
        request: RecognitionRequest,
    },
    /// Overlays or the displayed image changed
    Redraw,
    /// Show a message to the user
    Notify(String),
}
