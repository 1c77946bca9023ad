//! Off-thread recognition with a single in-flight slot

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use tokio::task::JoinHandle;

use super::engine::DecodingEngine;
use super::orchestrator::{RecognitionError, recognize};
use crate::capture::image::SourceImage;
use crate::domain::{DecodedSymbol, RecognitionRequest};

/// Symbols from one decode plus how long it took
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionOutcome {
    pub symbols: Vec<DecodedSymbol>,
    pub elapsed: Duration,
}

/// Releases the in-flight slot when dropped
struct InFlightSlot(Arc<AtomicBool>);

impl Drop for InFlightSlot {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Runs decodes on the blocking pool, at most one at a time
pub struct Recognizer {
    engine: Arc<dyn DecodingEngine>,
    in_flight: Arc<AtomicBool>,
}

impl Recognizer {
    pub fn new(engine: Arc<dyn DecodingEngine>) -> Self {
        Self {
            engine,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Start a decode of `image`. Must be called from within a tokio runtime.
    pub fn start(
        &self,
        image: SourceImage,
        request: RecognitionRequest,
    ) -> Result<RecognitionHandle, RecognitionError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            log::warn!("Recognition requested while another is in flight");
            return Err(RecognitionError::Busy);
        }
        let slot = InFlightSlot(self.in_flight.clone());

        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = cancelled.clone();
        let engine = self.engine.clone();
        let task = tokio::task::spawn_blocking(move || {
            let _slot = slot;
            if flag.load(Ordering::Acquire) {
                return Err(RecognitionError::Cancelled);
            }
            let started = Instant::now();
            let symbols = recognize(engine.as_ref(), Some(&image), &request)?;
            Ok(RecognitionOutcome {
                symbols,
                elapsed: started.elapsed(),
            })
        });

        Ok(RecognitionHandle { task, cancelled })
    }
}

/// A running decode
pub struct RecognitionHandle {
    task: JoinHandle<Result<RecognitionOutcome, RecognitionError>>,
    cancelled: Arc<AtomicBool>,
}

impl RecognitionHandle {
    /// Best effort: a decode that has not started is skipped, one already
    /// inside the engine runs to completion and its result is discarded.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Resolve to the outcome. Not to be called again once it has returned.
    pub async fn wait(&mut self) -> Result<RecognitionOutcome, RecognitionError> {
        let result = (&mut self.task).await.map_err(|e| {
            log::error!("Recognition task failed: {}", e);
            RecognitionError::EngineFailure(format!("recognition task failed: {e}"))
        })?;
        if self.cancelled.load(Ordering::Acquire) {
            return Err(RecognitionError::Cancelled);
        }
        result
    }
}
