//! Single synchronous recognition call against an engine

use thiserror::Error;

use super::engine::{DecodingEngine, EngineError};
use crate::capture::image::SourceImage;
use crate::domain::{DecodedSymbol, RecognitionRequest};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecognitionError {
    #[error("An image needs to be loaded first.")]
    NoImage,

    #[error("Range error in options: {0}")]
    InvalidOptions(String),

    #[error("General error: {0}")]
    EngineFailure(String),

    #[error("A recognition is already running")]
    Busy,

    #[error("Recognition cancelled")]
    Cancelled,
}

impl From<EngineError> for RecognitionError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::OutOfRange(_) | EngineError::Unsupported(_) => {
                RecognitionError::InvalidOptions(e.to_string())
            }
            EngineError::Decode(msg) => RecognitionError::EngineFailure(msg),
        }
    }
}

/// Per-invocation progress, reported through the log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecognitionPhase {
    #[default]
    Idle,
    Validating,
    Decoding,
    Succeeded,
    Failed,
}

/// Run one decode.
///
/// An empty symbology selection returns no symbols without calling the
/// engine. Engine order of the returned symbols is preserved.
pub fn recognize(
    engine: &dyn DecodingEngine,
    image: Option<&SourceImage>,
    request: &RecognitionRequest,
) -> Result<Vec<DecodedSymbol>, RecognitionError> {
    let mut phase = RecognitionPhase::Idle;
    let mut advance = |next: RecognitionPhase| {
        log::debug!("recognition {:?} -> {:?}", phase, next);
        phase = next;
    };

    advance(RecognitionPhase::Validating);
    let Some(image) = image else {
        advance(RecognitionPhase::Failed);
        return Err(RecognitionError::NoImage);
    };
    if request.symbologies.is_empty() {
        log::info!("No symbologies selected, skipping {}", engine.name());
        advance(RecognitionPhase::Succeeded);
        return Ok(Vec::new());
    }

    advance(RecognitionPhase::Decoding);
    match engine.decode(image, request.thresholding, request) {
        Ok(symbols) => {
            log::info!("{} decoded {} symbols", engine.name(), symbols.len());
            advance(RecognitionPhase::Succeeded);
            Ok(symbols)
        }
        Err(e) => {
            log::warn!("{} failed: {}", engine.name(), e);
            advance(RecognitionPhase::Failed);
            Err(e.into())
        }
    }
}
