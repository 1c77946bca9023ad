//! Message handlers for a recognition session

use super::messages::{Effect, ListMsg, Msg, ViewMsg};
use super::state::Session;
use crate::capture::morphology::{self, MorphologyMode};
use crate::domain::{ExpectedBarcodeCount, Point, ScanInterval, Size};
use crate::recognition::orchestrator::RecognitionError;
use crate::recognition::worker::RecognitionOutcome;

/// Membership change a pending toggle will cause
fn pending_delta(was_selected: bool, checked: bool) -> i32 {
    match (was_selected, checked) {
        (false, true) => 1,
        (true, false) => -1,
        _ => 0,
    }
}

impl Session {
    pub fn update(&mut self, msg: Msg) -> Option<Effect> {
        if self.recognizing && blocked_while_recognizing(&msg) {
            log::warn!("Ignoring {} while recognition is in flight", msg.label());
            return None;
        }

        match msg {
            Msg::Open(path) => {
                log::info!("Opening {}", path.display());
                Some(Effect::LoadImage(path))
            }
            Msg::Loaded(Ok(image)) => {
                self.image.original = Some(image);
                self.image.morphology = MorphologyMode::None;
                self.image.displayed = self.image.original.clone();
                self.results = None;
                self.validate_recognize();
                Some(Effect::Redraw)
            }
            Msg::Loaded(Err(err)) => {
                log::error!("{}", err);
                let text = format!("Unable to load file {}.", err.path().display());
                self.status.push(text.clone());
                Some(Effect::Notify(text))
            }
            Msg::Symbology(list) => self.handle_symbology_list(list),
            Msg::Direction(list) => self.handle_direction_list(list),
            Msg::ScanInterval(value) => {
                let interval = ScanInterval::clamped(value);
                if interval.get() as i32 != value {
                    log::warn!("Scan interval {} clamped to {}", value, interval.get());
                }
                self.options.set_scan_interval(interval);
                None
            }
            Msg::ExpectedCount(value) => {
                let count = ExpectedBarcodeCount::clamped(value);
                if count.get() as i64 != value {
                    log::warn!("Expected barcode count {} clamped to {}", value, count.get());
                }
                self.options.set_expected_count(count);
                None
            }
            Msg::Thresholding(flag) => {
                self.options.set_thresholding(flag);
                None
            }
            Msg::Morphology(mode) => self.handle_morphology(mode),
            Msg::View(view) => self.handle_view(view),
            Msg::Recognize => self.handle_recognize(),
            Msg::Recognized(result) => self.handle_recognized(result),
        }
    }

    fn handle_symbology_list(&mut self, msg: ListMsg) -> Option<Effect> {
        match msg {
            ListMsg::ItemCheck { index, checked } => {
                let Some((sym, name)) = self.offered_symbologies().get(index).copied() else {
                    log::error!("Symbology list index {} out of range", index);
                    return None;
                };
                let delta = pending_delta(self.options.symbologies().contains(sym), checked);
                self.recognize_enabled = self.options.is_ready(self.image.is_loaded(), delta, 0);
                if let Err(err) = self.options.toggle_symbology(sym, checked) {
                    log::error!("Failed to toggle {}: {}", name, err);
                }
            }
            ListMsg::SelectAll => {
                self.options.select_all_symbologies(self.supported);
                self.validate_recognize();
            }
            ListMsg::ClearAll => {
                self.options.clear_symbologies();
                self.validate_recognize();
            }
        }
        None
    }

    fn handle_direction_list(&mut self, msg: ListMsg) -> Option<Effect> {
        match msg {
            ListMsg::ItemCheck { index, checked } => {
                let Some((dir, name)) = self.offered_directions().get(index).copied() else {
                    log::error!("Direction list index {} out of range", index);
                    return None;
                };
                let delta = pending_delta(self.options.directions().contains(dir), checked);
                self.recognize_enabled = self.options.is_ready(self.image.is_loaded(), 0, delta);
                if let Err(err) = self.options.toggle_direction(dir, checked) {
                    log::error!("Failed to toggle {}: {}", name, err);
                }
            }
            ListMsg::SelectAll => {
                self.options.select_all_directions();
                self.validate_recognize();
            }
            ListMsg::ClearAll => {
                self.options.clear_directions();
                self.validate_recognize();
            }
        }
        None
    }

    fn handle_morphology(&mut self, mode: MorphologyMode) -> Option<Effect> {
        let Some(original) = self.image.original.as_ref() else {
            let text = "Please select a file to open.";
            self.status.push(text);
            return Some(Effect::Notify(text.to_string()));
        };
        // always filter a fresh copy of the original
        self.image.displayed = Some(morphology::apply(original, mode));
        self.image.morphology = mode;
        Some(Effect::Redraw)
    }

    fn handle_view(&mut self, msg: ViewMsg) -> Option<Effect> {
        match msg {
            ViewMsg::ShrinkToFit(flag) => {
                self.view.shrink_to_fit = flag;
                self.image.is_loaded().then_some(Effect::Redraw)
            }
            ViewMsg::ShowBoundingRects(flag) => {
                self.view.visibility.bounding_rects = flag;
                self.results.is_some().then_some(Effect::Redraw)
            }
            ViewMsg::ShowBoundingBoxes(flag) => {
                self.view.visibility.bounding_boxes = flag;
                self.results.is_some().then_some(Effect::Redraw)
            }
            ViewMsg::Viewport(w, h) => {
                self.view.viewport = Some(Size::new(w, h));
                self.image.is_loaded().then_some(Effect::Redraw)
            }
            ViewMsg::Origin(x, y) => {
                self.view.origin = Point::new(x, y);
                self.image.is_loaded().then_some(Effect::Redraw)
            }
        }
    }

    fn handle_recognize(&mut self) -> Option<Effect> {
        if self.recognizing {
            log::warn!("Recognize pressed while a recognition is running");
            return None;
        }
        let Some(image) = self.image.displayed.clone() else {
            let text = RecognitionError::NoImage.to_string();
            self.status.push(text.clone());
            return Some(Effect::Notify(text));
        };
        if !self.recognize_enabled {
            log::warn!("Recognize pressed while disabled");
            return None;
        }
        self.recognizing = true;
        Some(Effect::StartRecognition {
            image,
            request: self.options.snapshot(),
        })
    }

    fn handle_recognized(
        &mut self,
        result: Result<RecognitionOutcome, RecognitionError>,
    ) -> Option<Effect> {
        self.recognizing = false;
        match result {
            Ok(outcome) => {
                self.status.push_results(&outcome.symbols, outcome.elapsed);
                self.results = Some(outcome.symbols);
            }
            Err(err @ (RecognitionError::InvalidOptions(_) | RecognitionError::EngineFailure(_))) => {
                self.status.push(err.to_string());
                self.status.push("0 total barcodes found.");
                self.results = Some(Vec::new());
            }
            Err(err) => {
                self.status.push(err.to_string());
                return None;
            }
        }
        Some(Effect::Redraw)
    }
}

/// Messages that would change the options or the image under decode
fn blocked_while_recognizing(msg: &Msg) -> bool {
    matches!(
        msg,
        Msg::Open(_)
            | Msg::Loaded(_)
            | Msg::Morphology(_)
            | Msg::Symbology(_)
            | Msg::Direction(_)
            | Msg::ScanInterval(_)
            | Msg::ExpectedCount(_)
            | Msg::Thresholding(_)
    )
}
