//! Aspect ratios for cropping.

use std::fmt;
use std::str::FromStr;

use crate::error::ConvertError;

/// A width:height proportion with both components positive.
///
/// Only constructible through [`AspectRatio::new`] or parsing, so every
/// value held by the rest of the crate is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AspectRatio {
    width: u32,
    height: u32,
}

/// Square 1:1 ratio, the first preset.
pub const SQUARE: AspectRatio = AspectRatio { width: 1, height: 1 };

/// Ratios offered by the front ends without typing.
pub const PRESETS: &[AspectRatio] = &[
    SQUARE,
    AspectRatio { width: 4, height: 3 },
    AspectRatio { width: 3, height: 4 },
    AspectRatio { width: 16, height: 9 },
    AspectRatio { width: 9, height: 16 },
    AspectRatio { width: 3, height: 2 },
    AspectRatio { width: 2, height: 3 },
];

impl AspectRatio {
    pub fn new(width: u32, height: u32) -> Result<Self, ConvertError> {
        if width == 0 || height == 0 {
            return Err(ConvertError::InvalidRatio { width, height });
        }
        Ok(AspectRatio { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.width, self.height)
    }
}

impl FromStr for AspectRatio {
    type Err = ConvertError;

    /// Parse `"W:H"`.
    ///
    /// Whitespace around the whole text is ignored; the components must be
    /// plain decimal digits, so signs and inner spaces are rejected.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = || ConvertError::InvalidRatioFormat(text.to_string());

        let (w, h) = text.trim().split_once(':').ok_or_else(invalid)?;
        let width = parse_component(w).ok_or_else(invalid)?;
        let height = parse_component(h).ok_or_else(invalid)?;

        AspectRatio::new(width, height).map_err(|_| invalid())
    }
}

fn parse_component(text: &str) -> Option<u32> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}
