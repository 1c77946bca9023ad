//! Boundary to the barcode decoding engine

use thiserror::Error;

use crate::capture::image::SourceImage;
use crate::domain::{DecodedSymbol, RecognitionRequest, Symbologies};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A request parameter is outside the range the engine accepts
    #[error("{0}")]
    OutOfRange(String),

    /// The request names symbologies this engine cannot read
    #[error("unsupported symbologies: {0}")]
    Unsupported(String),

    #[error("{0}")]
    Decode(String),
}

/// A barcode reader. Implementations must be callable from a worker thread.
pub trait DecodingEngine: Send + Sync {
    /// Short engine identifier for logs
    fn name(&self) -> &str;

    /// Symbologies this engine can read; only these are offered to the user
    fn supported_symbologies(&self) -> Symbologies;

    /// Locate and decode symbols. Order of the returned symbols is the
    /// engine's own and is preserved by callers.
    fn decode(
        &self,
        image: &SourceImage,
        thresholding: bool,
        request: &RecognitionRequest,
    ) -> Result<Vec<DecodedSymbol>, EngineError>;
}
