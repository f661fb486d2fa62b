//! Strip orientations of the PICMIC sensor and orientation bit sets.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three strip directions.
///
/// The letters are the colours used on the sensor map: Y (yellow, 0°),
/// B (blue, 60°), R (red, 30°).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Orientation {
    Y,
    B,
    R,
}

impl Orientation {
    pub const ALL: [Orientation; 3] = [Orientation::Y, Orientation::B, Orientation::R];

    /// Offset added to the table's strip number to get the normalized index.
    ///
    /// With these offsets every Y/B/R triple crossing satisfies
    /// `-1 <= y - b - r <= 1`.
    #[inline]
    pub fn offset(self) -> i32 {
        match self {
            Orientation::Y => -1,
            Orientation::B => -2,
            Orientation::R => -427,
        }
    }

    #[inline]
    pub fn letter(self) -> char {
        match self {
            Orientation::Y => 'Y',
            Orientation::B => 'B',
            Orientation::R => 'R',
        }
    }

    pub fn from_letter(c: char) -> Option<Self> {
        match c {
            'Y' => Some(Orientation::Y),
            'B' => Some(Orientation::B),
            'R' => Some(Orientation::R),
            _ => None,
        }
    }

    #[inline]
    pub fn bit(self) -> u8 {
        match self {
            Orientation::Y => 0b001,
            Orientation::B => 0b010,
            Orientation::R => 0b100,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Set of orientations that took part in a cluster.
///
/// Numeric values: `Y|B|R = 7`, `Y|B = 3`, `Y|R = 5`, `B|R = 6`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrientationSet(u8);

impl OrientationSet {
    pub const EMPTY: OrientationSet = OrientationSet(0);
    pub const ALL: OrientationSet = OrientationSet(0b111);

    pub fn of(orientations: &[Orientation]) -> Self {
        Self(orientations.iter().fold(0, |acc, o| acc | o.bit()))
    }

    #[inline]
    pub fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn contains(self, o: Orientation) -> bool {
        self.0 & o.bit() != 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}
