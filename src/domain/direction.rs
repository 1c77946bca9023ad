//! Scan direction flags

use bitflags::bitflags;

use super::options::OptionError;

bitflags! {
    /// Set of compass directions the engine reads symbols along
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Directions: u8 {
        const EAST = 1 << 0;
        const WEST = 1 << 1;
        const SOUTH = 1 << 2;
        const NORTH = 1 << 3;
        const NORTH_EAST = 1 << 4;
        const SOUTH_EAST = 1 << 5;
        const SOUTH_WEST = 1 << 6;
        const NORTH_WEST = 1 << 7;
    }
}

/// (flag, compass name, display name) in presentation order
const CATALOG: &[(Directions, &str, &str)] = &[
    (Directions::EAST, "East", "Left to Right"),
    (Directions::WEST, "West", "Right to Left"),
    (Directions::SOUTH, "South", "Top to Bottom"),
    (Directions::NORTH, "North", "Bottom to Top"),
    (Directions::NORTH_EAST, "NorthEast", "Bottom Left to Top Right"),
    (Directions::SOUTH_EAST, "SouthEast", "Top Left to Bottom Right"),
    (Directions::SOUTH_WEST, "SouthWest", "Top Right to Bottom Left"),
    (Directions::NORTH_WEST, "NorthWest", "Bottom Right to Top Left"),
];

impl Directions {
    /// Every direction with its display name, in presentation order
    pub fn catalog() -> impl Iterator<Item = (Directions, &'static str)> {
        CATALOG.iter().map(|(dir, _, name)| (*dir, *name))
    }

    /// True if this value is exactly one direction
    pub fn is_single(self) -> bool {
        self.bits().count_ones() == 1
    }

    /// Compass name of a single direction ("East", "NorthWest", ...)
    pub fn compass_name(self) -> Option<&'static str> {
        CATALOG
            .iter()
            .find(|(dir, _, _)| *dir == self)
            .map(|(_, compass, _)| *compass)
    }

    /// Look up a direction by display or compass name (case-insensitive)
    pub fn from_label(name: &str) -> Result<Directions, OptionError> {
        let needle = name.trim();
        CATALOG
            .iter()
            .find(|(_, compass, display)| {
                compass.eq_ignore_ascii_case(needle) || display.eq_ignore_ascii_case(needle)
            })
            .map(|(dir, _, _)| *dir)
            .ok_or_else(|| OptionError::UnknownDirection(name.to_string()))
    }

    /// Display names of every direction in the set
    pub fn names(self) -> Vec<&'static str> {
        Self::catalog()
            .filter(|(dir, _)| self.contains(*dir))
            .map(|(_, name)| name)
            .collect()
    }

    /// Number of directions selected
    pub fn count(self) -> i32 {
        self.bits().count_ones() as i32
    }

    /// Direction of travel from `dx, dy` in image space (y grows downward),
    /// snapped to the nearest of the eight compass points
    pub fn from_vector(dx: f32, dy: f32) -> Directions {
        const SECTORS: [Directions; 8] = [
            Directions::EAST,
            Directions::NORTH_EAST,
            Directions::NORTH,
            Directions::NORTH_WEST,
            Directions::WEST,
            Directions::SOUTH_WEST,
            Directions::SOUTH,
            Directions::SOUTH_EAST,
        ];
        let degrees = (-dy).atan2(dx).to_degrees();
        let sector = ((degrees + 22.5).rem_euclid(360.0) / 45.0) as usize;
        SECTORS[sector % 8]
    }
}
