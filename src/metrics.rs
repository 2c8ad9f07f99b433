//! Text measurement port.
//!
//! Layout treats measurement as an opaque, deterministic oracle: the host
//! supplies pixel widths for whole runs plus the font's fixed line height.
//! No shaping or kerning is modeled beyond what the oracle reports.

/// Measurement hook for the active font.
///
/// Implementations must be deterministic within one layout call: the
/// wrapper measures each word exactly once and trusts the result.
pub trait TextMeasurer {
    /// Rendered pixel width of `text` in the active font.
    fn measure_px(&self, text: &str) -> i32;

    /// Fixed line height of the active font in pixels.
    fn line_height_px(&self) -> i32;

    /// Advance width of a single space.
    ///
    /// Default measures `" "` through [`measure_px`](Self::measure_px).
    fn space_px(&self) -> i32 {
        self.measure_px(" ")
    }
}

/// Fixed-advance measurer for hosts without a real font, and for tests.
///
/// Width is `advance_px` per byte, which matches how bitmap system fonts
/// on small monochrome targets behave for ASCII content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonospaceMeasurer {
    /// Advance per byte in pixels.
    pub advance_px: i32,
    /// Line height in pixels.
    pub line_height_px: i32,
}

impl MonospaceMeasurer {
    /// Create a measurer with the given per-byte advance and line height.
    pub fn new(advance_px: i32, line_height_px: i32) -> Self {
        Self {
            advance_px,
            line_height_px,
        }
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure_px(&self, text: &str) -> i32 {
        (text.len() as i32).saturating_mul(self.advance_px)
    }

    fn line_height_px(&self) -> i32 {
        self.line_height_px
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monospace_width_is_per_byte() {
        let m = MonospaceMeasurer::new(6, 14);
        assert_eq!(m.measure_px("hello"), 30);
        assert_eq!(m.space_px(), 6);
        assert_eq!(m.line_height_px(), 14);
    }

    #[test]
    fn empty_text_measures_zero() {
        let m = MonospaceMeasurer::new(6, 14);
        assert_eq!(m.measure_px(""), 0);
    }
}
