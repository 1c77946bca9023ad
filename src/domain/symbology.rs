//! Barcode symbology flags and their display names

use bitflags::bitflags;

use super::options::OptionError;

bitflags! {
    /// Set of barcode symbologies. Each symbology is an independent flag.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Symbologies: u32 {
        const AZTEC = 1 << 0;
        const AUSTRALIA_POST = 1 << 1;
        const CODABAR = 1 << 2;
        const CODE_11 = 1 << 3;
        const CODE_128 = 1 << 4;
        const CODE_32 = 1 << 5;
        const CODE_39 = 1 << 6;
        const CODE_93 = 1 << 7;
        const DATA_MATRIX = 1 << 8;
        const EAN_13 = 1 << 9;
        const EAN_8 = 1 << 10;
        const I2OF5 = 1 << 11;
        const INTELLIGENT_MAIL = 1 << 12;
        const ITF_14 = 1 << 13;
        const MICRO_QR = 1 << 14;
        const PATCH = 1 << 15;
        const PDF_417 = 1 << 16;
        const PLANET = 1 << 17;
        const PLUS_2 = 1 << 18;
        const PLUS_5 = 1 << 19;
        const POSTNET = 1 << 20;
        const QR = 1 << 21;
        const RM4SCC = 1 << 22;
        const RSS_14 = 1 << 23;
        const RSS_LIMITED = 1 << 24;
        const TELEPEN = 1 << 25;
        const UPC_A = 1 << 26;
        const UPC_E = 1 << 27;
    }
}

/// Symbologies in the order they are offered to the user
const CATALOG: &[(Symbologies, &str)] = &[
    (Symbologies::AZTEC, "Aztec"),
    (Symbologies::AUSTRALIA_POST, "Australia Post"),
    (Symbologies::CODABAR, "Codabar"),
    (Symbologies::CODE_11, "Code 11"),
    (Symbologies::CODE_128, "Code 128"),
    (Symbologies::CODE_32, "Code 32"),
    (Symbologies::CODE_39, "Code 39"),
    (Symbologies::CODE_93, "Code 93"),
    (Symbologies::DATA_MATRIX, "Data Matrix"),
    (Symbologies::EAN_13, "Ean 13"),
    (Symbologies::EAN_8, "Ean 8"),
    (Symbologies::I2OF5, "I 2 of 5"),
    (Symbologies::INTELLIGENT_MAIL, "Intelligent Mail"),
    (Symbologies::ITF_14, "ITF-14"),
    (Symbologies::MICRO_QR, "Micro QR Code"),
    (Symbologies::PATCH, "Patch"),
    (Symbologies::PDF_417, "PDF 417"),
    (Symbologies::PLANET, "Planet"),
    (Symbologies::PLUS_2, "Plus 2"),
    (Symbologies::PLUS_5, "Plus 5"),
    (Symbologies::POSTNET, "Postnet"),
    (Symbologies::QR, "QR"),
    (Symbologies::RM4SCC, "Royal Mail +4 State Customer Code"),
    (Symbologies::RSS_14, "RSS-14"),
    (Symbologies::RSS_LIMITED, "RSS Limited"),
    (Symbologies::TELEPEN, "Telepen"),
    (Symbologies::UPC_A, "UPC A"),
    (Symbologies::UPC_E, "UPC E"),
];

impl Symbologies {
    /// Every known symbology with its display name, in presentation order
    pub fn catalog() -> impl Iterator<Item = (Symbologies, &'static str)> {
        CATALOG.iter().copied()
    }

    /// Catalog entries restricted to `supported`, preserving order
    pub fn offered(supported: Symbologies) -> Vec<(Symbologies, &'static str)> {
        Self::catalog()
            .filter(|(sym, _)| supported.contains(*sym))
            .collect()
    }

    /// True if this value is exactly one known symbology
    pub fn is_single(self) -> bool {
        self.bits().count_ones() == 1 && Symbologies::all().contains(self)
    }

    /// Display name of a single symbology
    pub fn display_name(self) -> Option<&'static str> {
        Self::catalog()
            .find(|(sym, _)| *sym == self)
            .map(|(_, name)| name)
    }

    /// Look up a symbology by its display name (case-insensitive)
    pub fn from_display_name(name: &str) -> Result<Symbologies, OptionError> {
        let needle = name.trim();
        Self::catalog()
            .find(|(_, n)| n.eq_ignore_ascii_case(needle))
            .map(|(sym, _)| sym)
            .ok_or_else(|| OptionError::UnknownSymbology(name.to_string()))
    }

    /// Display names of every symbology in the set
    pub fn names(self) -> Vec<&'static str> {
        Self::catalog()
            .filter(|(sym, _)| self.contains(*sym))
            .map(|(_, name)| name)
            .collect()
    }

    /// Number of symbologies selected
    pub fn count(self) -> i32 {
        self.bits().count_ones() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_covers_every_flag() {
        let union = Symbologies::catalog().fold(Symbologies::empty(), |acc, (s, _)| acc | s);
        assert_eq!(union, Symbologies::all());
        assert_eq!(Symbologies::catalog().count(), 28);
    }

    #[test]
    fn test_display_name_lookup() {
        assert_eq!(Symbologies::CODE_39.display_name(), Some("Code 39"));
        assert_eq!(
            Symbologies::from_display_name("qr").unwrap(),
            Symbologies::QR
        );
        assert!(matches!(
            Symbologies::from_display_name("Maxicode"),
            Err(OptionError::UnknownSymbology(_))
        ));
        assert_eq!((Symbologies::QR | Symbologies::CODE_39).display_name(), None);
    }

    #[test]
    fn test_offered_preserves_catalog_order() {
        let offered = Symbologies::offered(Symbologies::UPC_E | Symbologies::AZTEC);
        let names: Vec<_> = offered.iter().map(|(_, n)| *n).collect();
        assert_eq!(names, vec!["Aztec", "UPC E"]);
    }

    #[test]
    fn test_is_single() {
        assert!(Symbologies::QR.is_single());
        assert!(!Symbologies::empty().is_single());
        assert!(!(Symbologies::QR | Symbologies::PATCH).is_single());
    }
}
