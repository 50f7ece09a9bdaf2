//! Color utilities for chart series
//!
//! Colors are emitted as CSS color strings, the form the rendering surface
//! consumes directly.

use std::fmt;

use serde::{Serialize, Serializer};

/// Fill used by every single-series dataset
pub const DATASET_FILL: Rgba = Rgba::new(75, 192, 192, 0.6);

/// Border used by bar and line datasets
pub const DATASET_BORDER: Rgba = Rgba::new(75, 192, 192, 1.0);

/// Hue step between consecutive slices
const SLICE_HUE_STEP: usize = 30;

/// RGB color with alpha, rendered as `rgba(r, g, b, a)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// HSL color, rendered as `hsl(h, s%, l%)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hsl {
    pub hue: u16,
    pub saturation: u8,
    pub lightness: u8,
}

impl Hsl {
    pub const fn new(hue: u16, saturation: u8, lightness: u8) -> Self {
        Self { hue, saturation, lightness }
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({}, {}%, {}%)", self.hue, self.saturation, self.lightness)
    }
}

impl Serialize for Hsl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Color of the slice at `index`.
///
/// Depends on position only: reordering the categories recolors them.
pub fn slice_color(index: usize) -> Hsl {
    Hsl::new(((index * SLICE_HUE_STEP) % 360) as u16, 70, 70)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_strings() {
        assert_eq!(DATASET_FILL.to_string(), "rgba(75, 192, 192, 0.6)");
        assert_eq!(DATASET_BORDER.to_string(), "rgba(75, 192, 192, 1)");
        assert_eq!(slice_color(1).to_string(), "hsl(30, 70%, 70%)");
    }

    #[test]
    fn test_slice_hue_wraps() {
        assert_eq!(slice_color(0), slice_color(12));
        assert_eq!(slice_color(13).hue, 30);
    }
}
