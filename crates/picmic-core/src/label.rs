//! Address-table labels: `Y12`, `B851`, `R0`, `D3`.

use crate::Orientation;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Line label stored in the address table for one sensor cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineLabel {
    /// A functional cell on strip `strip` of the given orientation (table numbering).
    Line { orientation: Orientation, strip: i32 },
    /// A non-functional cell.
    Dummy { id: i32 },
}

impl LineLabel {
    /// Largest table strip number a label may carry.
    pub const MAX_STRIP: i32 = 1023;

    /// Strip index with the orientation offset applied.
    ///
    /// `None` for dummy cells and for strips outside `0..=MAX_STRIP`.
    pub fn normalized(self) -> Option<(Orientation, i32)> {
        match self {
            LineLabel::Line { orientation, strip } if (0..=Self::MAX_STRIP).contains(&strip) => {
                strip
                    .checked_add(orientation.offset())
                    .map(|value| (orientation, value))
            }
            LineLabel::Line { .. } | LineLabel::Dummy { .. } => None,
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LabelParseError {
    #[error("empty label")]
    Empty,
    #[error("unknown label letter {0:?}")]
    UnknownLetter(char),
    #[error("invalid strip number in label {0:?}")]
    InvalidNumber(String),
    #[error("strip {0} is outside 0..={max}", max = LineLabel::MAX_STRIP)]
    StripOutOfRange(u32),
}

impl FromStr for LineLabel {
    type Err = LabelParseError;

    /// Accepts `Y12` as well as the bracketed `Y(12)` / `Y[12]` spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let letter = chars.next().ok_or(LabelParseError::Empty)?;
        let digits = chars.as_str();
        let digits = digits
            .strip_prefix(['(', '['])
            .and_then(|d| d.strip_suffix([')', ']']))
            .unwrap_or(digits);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(LabelParseError::InvalidNumber(s.to_string()));
        }
        let number: u32 = digits
            .parse()
            .map_err(|_| LabelParseError::InvalidNumber(s.to_string()))?;

        if letter == 'D' {
            let id = i32::try_from(number)
                .map_err(|_| LabelParseError::InvalidNumber(s.to_string()))?;
            return Ok(LineLabel::Dummy { id });
        }
        let orientation =
            Orientation::from_letter(letter).ok_or(LabelParseError::UnknownLetter(letter))?;
        let strip = i32::try_from(number)
            .ok()
            .filter(|strip| *strip <= Self::MAX_STRIP)
            .ok_or(LabelParseError::StripOutOfRange(number))?;
        Ok(LineLabel::Line { orientation, strip })
    }
}

impl fmt::Display for LineLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineLabel::Line { orientation, strip } => write!(f, "{orientation}{strip}"),
            LineLabel::Dummy { id } => write!(f, "D{id}"),
        }
    }
}
