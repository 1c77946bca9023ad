//! Recognition options and the readiness check that gates decoding

use thiserror::Error;

use super::direction::Directions;
use super::symbology::Symbologies;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionError {
    #[error("Unknown symbology: {0}")]
    UnknownSymbology(String),

    #[error("Unknown scan direction: {0}")]
    UnknownDirection(String),

    #[error("{name} must be in {min}..={max}, got {value}")]
    OutOfRange {
        name: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
}

/// Spacing between scan lines used by the engine, in [1, 20]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ScanInterval(u8);

impl ScanInterval {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 20;
    pub const DEFAULT: u8 = 5;

    pub fn new(value: i32) -> Result<Self, OptionError> {
        if (Self::MIN as i32..=Self::MAX as i32).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(OptionError::OutOfRange {
                name: "scan interval",
                value: value as i64,
                min: Self::MIN as i64,
                max: Self::MAX as i64,
            })
        }
    }

    /// Input-boundary constructor: behaves like a bounded slider
    pub fn clamped(value: i32) -> Self {
        Self(value.clamp(Self::MIN as i32, Self::MAX as i32) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for ScanInterval {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

/// Number of barcodes the engine should look for before stopping. No upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExpectedBarcodeCount(u32);

impl ExpectedBarcodeCount {
    pub const MIN: u32 = 1;

    pub fn new(value: i64) -> Result<Self, OptionError> {
        match u32::try_from(value) {
            Ok(v) if v >= Self::MIN => Ok(Self(v)),
            _ => Err(OptionError::OutOfRange {
                name: "expected barcode count",
                value,
                min: Self::MIN as i64,
                max: u32::MAX as i64,
            }),
        }
    }

    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(Self::MIN as i64, u32::MAX as i64) as u32)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for ExpectedBarcodeCount {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

/// Immutable snapshot of the options, taken when a decode starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecognitionRequest {
    pub symbologies: Symbologies,
    pub directions: Directions,
    pub scan_interval: ScanInterval,
    pub expected_count: ExpectedBarcodeCount,
    pub thresholding: bool,
}

/// Current recognition parameters, mutated one user action at a time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionState {
    symbologies: Symbologies,
    directions: Directions,
    scan_interval: ScanInterval,
    expected_count: ExpectedBarcodeCount,
    thresholding: bool,
}

impl Default for OptionState {
    fn default() -> Self {
        Self {
            symbologies: Symbologies::empty(),
            directions: Directions::empty(),
            scan_interval: ScanInterval::default(),
            expected_count: ExpectedBarcodeCount::default(),
            thresholding: true,
        }
    }
}

impl OptionState {
    pub fn new(symbologies: Symbologies, directions: Directions) -> Self {
        Self {
            symbologies,
            directions,
            ..Self::default()
        }
    }

    pub fn symbologies(&self) -> Symbologies {
        self.symbologies
    }

    pub fn directions(&self) -> Directions {
        self.directions
    }

    pub fn scan_interval(&self) -> ScanInterval {
        self.scan_interval
    }

    pub fn expected_count(&self) -> ExpectedBarcodeCount {
        self.expected_count
    }

    pub fn thresholding(&self) -> bool {
        self.thresholding
    }

    pub fn toggle_symbology(&mut self, id: Symbologies, enabled: bool) -> Result<(), OptionError> {
        if !id.is_single() {
            return Err(OptionError::UnknownSymbology(format!("{:#x}", id.bits())));
        }
        if enabled {
            self.symbologies |= id;
        } else {
            self.symbologies &= !id;
        }
        Ok(())
    }

    pub fn toggle_direction(&mut self, id: Directions, enabled: bool) -> Result<(), OptionError> {
        if !id.is_single() {
            return Err(OptionError::UnknownDirection(format!("{:#x}", id.bits())));
        }
        if enabled {
            self.directions |= id;
        } else {
            self.directions &= !id;
        }
        Ok(())
    }

    pub fn select_all_symbologies(&mut self, supported: Symbologies) {
        self.symbologies = supported;
    }

    pub fn clear_symbologies(&mut self) {
        self.symbologies = Symbologies::empty();
    }

    pub fn select_all_directions(&mut self) {
        self.directions = Directions::all();
    }

    pub fn clear_directions(&mut self) {
        self.directions = Directions::empty();
    }

    pub fn set_scan_interval(&mut self, value: ScanInterval) {
        self.scan_interval = value;
    }

    pub fn set_expected_count(&mut self, value: ExpectedBarcodeCount) {
        self.expected_count = value;
    }

    pub fn set_thresholding(&mut self, flag: bool) {
        self.thresholding = flag;
    }

    /// Whether a decode may be started.
    ///
    /// The deltas pre-correct the counts for a toggle that is being applied
    /// but not yet reflected in the selection (+1, -1 or 0).
    pub fn is_ready(
        &self,
        image_loaded: bool,
        pending_symbology_delta: i32,
        pending_direction_delta: i32,
    ) -> bool {
        image_loaded
            && self.symbologies.count() + pending_symbology_delta != 0
            && self.directions.count() + pending_direction_delta != 0
    }

    pub fn snapshot(&self) -> RecognitionRequest {
        RecognitionRequest {
            symbologies: self.symbologies,
            directions: self.directions,
            scan_interval: self.scan_interval,
            expected_count: self.expected_count,
            thresholding: self.thresholding,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = OptionState::default();
        assert_eq!(options.scan_interval().get(), 5);
        assert_eq!(options.expected_count().get(), 1);
        assert!(options.thresholding());
        assert!(options.symbologies().is_empty());
    }

    #[test]
    fn test_toggle_replay_is_last_write_wins() {
        let mut options = OptionState::default();
        let ops = [
            (Symbologies::QR, true),
            (Symbologies::CODE_39, true),
            (Symbologies::EAN_13, true),
            (Symbologies::QR, false),
            (Symbologies::EAN_13, false),
            (Symbologies::EAN_13, true),
        ];
        for (id, enabled) in ops {
            options.toggle_symbology(id, enabled).unwrap();
        }
        assert_eq!(
            options.symbologies(),
            Symbologies::CODE_39 | Symbologies::EAN_13
        );
    }

    #[test]
    fn test_disjoint_toggles_are_order_independent() {
        let mut a = OptionState::default();
        a.toggle_direction(Directions::EAST, true).unwrap();
        a.toggle_direction(Directions::NORTH, true).unwrap();
        let mut b = OptionState::default();
        b.toggle_direction(Directions::NORTH, true).unwrap();
        b.toggle_direction(Directions::EAST, true).unwrap();
        assert_eq!(a.directions(), b.directions());
    }

    #[test]
    fn test_toggle_rejects_compound_ids() {
        let mut options = OptionState::default();
        assert!(matches!(
            options.toggle_symbology(Symbologies::QR | Symbologies::AZTEC, true),
            Err(OptionError::UnknownSymbology(_))
        ));
        assert!(matches!(
            options.toggle_direction(Directions::empty(), true),
            Err(OptionError::UnknownDirection(_))
        ));
        assert!(options.symbologies().is_empty());
    }

    #[test]
    fn test_not_ready_without_image() {
        let options = OptionState::new(Symbologies::all(), Directions::all());
        assert!(!options.is_ready(false, 0, 0));
        assert!(!options.is_ready(false, 1, 1));
    }

    #[test]
    fn test_ready_needs_both_selections() {
        let mut options = OptionState::new(Symbologies::QR, Directions::empty());
        assert!(!options.is_ready(true, 0, 0));
        options.toggle_direction(Directions::EAST, true).unwrap();
        assert!(options.is_ready(true, 0, 0));
        options.clear_symbologies();
        options.clear_directions();
        assert!(!options.is_ready(true, 0, 0));
    }

    #[test]
    fn test_pending_delta_disables_before_commit() {
        // last checked symbology is being unchecked; the selection still holds it
        let options = OptionState::new(Symbologies::QR, Directions::EAST);
        assert!(options.is_ready(true, 0, 0));
        assert!(!options.is_ready(true, -1, 0));
        assert!(!options.is_ready(true, 0, -1));
    }

    #[test]
    fn test_pending_delta_enables_before_commit() {
        let options = OptionState::new(Symbologies::empty(), Directions::EAST);
        assert!(options.is_ready(true, 1, 0));
    }

    #[test]
    fn test_scan_interval_bounds() {
        assert!(ScanInterval::new(0).is_err());
        assert!(ScanInterval::new(21).is_err());
        assert_eq!(ScanInterval::new(20).unwrap().get(), 20);
        assert_eq!(ScanInterval::clamped(25).get(), 20);
        assert_eq!(ScanInterval::clamped(-3).get(), 1);
    }

    #[test]
    fn test_expected_count_has_no_upper_bound() {
        assert!(ExpectedBarcodeCount::new(0).is_err());
        assert_eq!(ExpectedBarcodeCount::new(500).unwrap().get(), 500);
        assert_eq!(ExpectedBarcodeCount::clamped(-4).get(), 1);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut options = OptionState::new(Symbologies::QR, Directions::EAST);
        let request = options.snapshot();
        options.toggle_symbology(Symbologies::QR, false).unwrap();
        options.set_thresholding(false);
        assert_eq!(request.symbologies, Symbologies::QR);
        assert!(request.thresholding);
    }
}
