//! Layout output: positioned segments, link records, and the caller-owned
//! buffer they accumulate into.
//!
//! The buffer is pre-sized once and reused across layout calls. Capacity
//! is a runtime parameter, not a compile-time constant, and running out of
//! room drops further output instead of reallocating. Already-accumulated
//! output stays valid; the drop counters make truncation observable.

use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// One drawable, non-wrapping run of glyphs at an absolute position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSegment {
    /// Left edge in pixels.
    pub x: i32,
    /// Top edge in pixels.
    pub y: i32,
    /// Text to draw. Never wraps; capped at the configured byte limit.
    pub text: String,
    /// Measured width in pixels, trailing tracking excluded.
    pub width: i32,
}

/// Geometry of one wrapped line of a hyperlink.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkSegment {
    /// Left edge in pixels.
    pub x: i32,
    /// Top edge in pixels.
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
}

/// Axis-aligned rectangle in page coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge in pixels.
    pub x: i32,
    /// Top edge in pixels.
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl BoundingBox {
    /// Whether the point lies inside this rectangle.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// A finalized, hit-testable hyperlink region, possibly spanning lines.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    /// Destination URL, capped at the configured byte limit.
    pub url: String,
    /// Minimal rectangle covering every segment's line box.
    pub bounds: BoundingBox,
    /// Per-line geometry, in emission order.
    pub segments: Vec<LinkSegment>,
}

/// Pre-sized, reusable layout output buffer.
///
/// One layout invocation owns the buffer exclusively for its duration; a
/// new call must not begin until the previous call's output has been
/// consumed or copied out.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LayoutOutput {
    segments: Vec<TextSegment>,
    links: Vec<LinkRecord>,
    // Explicit caps: Vec::with_capacity may round up, and the drop
    // threshold must not drift with allocator behavior.
    max_segments: usize,
    max_links: usize,
    line_height_px: i32,
    dropped_segments: usize,
    dropped_links: usize,
}

impl LayoutOutput {
    /// Allocate a buffer holding at most `max_segments` text segments and
    /// `max_links` link records.
    pub fn with_capacity(max_segments: usize, max_links: usize) -> Self {
        Self {
            segments: Vec::with_capacity(max_segments),
            links: Vec::with_capacity(max_links),
            max_segments,
            max_links,
            line_height_px: 0,
            dropped_segments: 0,
            dropped_links: 0,
        }
    }

    /// Clear all output and counters for the next layout call, keeping the
    /// allocated capacity.
    pub fn reset(&mut self) {
        self.segments.clear();
        self.links.clear();
        self.line_height_px = 0;
        self.dropped_segments = 0;
        self.dropped_links = 0;
    }

    /// Ordered drawable segments.
    pub fn segments(&self) -> &[TextSegment] {
        &self.segments
    }

    /// Ordered link records.
    pub fn links(&self) -> &[LinkRecord] {
        &self.links
    }

    /// Line height of the font this page was laid out with.
    ///
    /// Zero when the buffer holds no laid-out page.
    pub fn line_height_px(&self) -> i32 {
        self.line_height_px
    }

    /// Segments dropped because the buffer was full.
    pub fn dropped_segments(&self) -> usize {
        self.dropped_segments
    }

    /// Link records dropped because the buffer was full.
    pub fn dropped_links(&self) -> usize {
        self.dropped_links
    }

    /// Total page height in pixels: the bottom edge of the lowest line.
    pub fn content_height(&self) -> i32 {
        self.segments
            .iter()
            .map(|seg| seg.y + self.line_height_px)
            .max()
            .unwrap_or(0)
    }

    /// First link whose region contains the point, if any.
    ///
    /// The bounding box is a cheap pre-test; the per-line segments decide,
    /// so the dead corner of an L-shaped two-line link does not hit.
    pub fn link_at(&self, x: i32, y: i32) -> Option<&LinkRecord> {
        self.links
            .iter()
            .filter(|link| link.bounds.contains(x, y))
            .find(|link| {
                link.segments.iter().any(|seg| {
                    x >= seg.x
                        && x < seg.x + seg.width
                        && y >= seg.y
                        && y < seg.y + self.line_height_px
                })
            })
    }

    pub(crate) fn set_line_height_px(&mut self, line_height_px: i32) {
        self.line_height_px = line_height_px;
    }

    /// Append a segment, dropping it when the buffer is full.
    ///
    /// Returns whether the segment was stored.
    pub(crate) fn push_segment(&mut self, segment: TextSegment) -> bool {
        if self.segments.len() >= self.max_segments {
            if self.dropped_segments == 0 {
                log::warn!(
                    "segment buffer full (cap={}); dropping further segments",
                    self.max_segments
                );
            }
            self.dropped_segments += 1;
            return false;
        }
        self.segments.push(segment);
        true
    }

    /// Append a link record, dropping it when the buffer is full.
    pub(crate) fn push_link(&mut self, link: LinkRecord) -> bool {
        if self.links.len() >= self.max_links {
            if self.dropped_links == 0 {
                log::warn!(
                    "link buffer full (cap={}); dropping further links",
                    self.max_links
                );
            }
            self.dropped_links += 1;
            return false;
        }
        self.links.push(link);
        true
    }
}
