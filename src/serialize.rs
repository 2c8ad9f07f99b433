//! Wire formats for layout output.
//!
//! Two encodings: the reference JSON consumed by existing scripting-side
//! renderers (flat array of tagged elements with `x`/`y`/`w`/`h` fields),
//! and a compact postcard envelope for caching laid-out pages.

use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::output::{LayoutOutput, LinkRecord, TextSegment};

/// Version byte for the cached-page envelope. Bump on layout-affecting
/// format changes; decode refuses mismatched payloads.
pub const CACHE_FORMAT_VERSION: u8 = 1;

/// Serialization failure.
#[derive(Debug)]
pub enum SerializeError {
    /// JSON encoding failed.
    Json(serde_json::Error),
    /// Postcard encoding or decoding failed.
    Postcard(postcard::Error),
    /// Cached payload was written by an incompatible version.
    UnsupportedVersion {
        /// Version byte found in the payload.
        found: u8,
        /// Version this build understands.
        expected: u8,
    },
}

impl core::fmt::Display for SerializeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "json encode failed: {}", err),
            Self::Postcard(err) => write!(f, "postcard codec failed: {}", err),
            Self::UnsupportedVersion { found, expected } => write!(
                f,
                "unsupported cached page version: found={} expected={}",
                found, expected
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SerializeError {}

impl From<serde_json::Error> for SerializeError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<postcard::Error> for SerializeError {
    fn from(value: postcard::Error) -> Self {
        Self::Postcard(value)
    }
}

#[derive(Serialize)]
struct TextWire<'a> {
    tag: &'static str,
    text: &'a str,
    x: i32,
    y: i32,
    w: i32,
    h: i32,
}

#[derive(Serialize)]
struct SegmentWire {
    x: i32,
    y: i32,
    w: i32,
}

#[derive(Serialize)]
struct LinkWire<'a> {
    tag: &'static str,
    url: &'a str,
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    segments: Vec<SegmentWire>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum ElementWire<'a> {
    Text(TextWire<'a>),
    Link(LinkWire<'a>),
}

fn text_wire(seg: &TextSegment, line_height_px: i32) -> ElementWire<'_> {
    ElementWire::Text(TextWire {
        tag: "text",
        text: &seg.text,
        x: seg.x,
        y: seg.y,
        w: seg.width,
        h: line_height_px,
    })
}

fn link_wire(link: &LinkRecord) -> ElementWire<'_> {
    ElementWire::Link(LinkWire {
        tag: "link",
        url: &link.url,
        x: link.bounds.x,
        y: link.bounds.y,
        w: link.bounds.width,
        h: link.bounds.height,
        segments: link
            .segments
            .iter()
            .map(|seg| SegmentWire {
                x: seg.x,
                y: seg.y,
                w: seg.width,
            })
            .collect(),
    })
}

/// Encode a laid-out page as the reference JSON array: every text
/// segment in emission order, followed by every link record.
pub fn page_to_json(out: &LayoutOutput) -> Result<String, SerializeError> {
    let line_height_px = out.line_height_px();
    let elements: Vec<ElementWire<'_>> = out
        .segments()
        .iter()
        .map(|seg| text_wire(seg, line_height_px))
        .chain(out.links().iter().map(link_wire))
        .collect();
    Ok(serde_json::to_string(&elements)?)
}

/// A laid-out page in persistable form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedPage {
    /// Envelope version, [`CACHE_FORMAT_VERSION`] when produced here.
    pub version: u8,
    /// Line height the page was laid out with.
    pub line_height_px: i32,
    /// Drawable segments in emission order.
    pub segments: Vec<TextSegment>,
    /// Link records in emission order.
    pub links: Vec<LinkRecord>,
}

impl CachedPage {
    /// Snapshot a layout buffer for caching.
    pub fn from_output(out: &LayoutOutput) -> Self {
        Self {
            version: CACHE_FORMAT_VERSION,
            line_height_px: out.line_height_px(),
            segments: out.segments().to_vec(),
            links: out.links().to_vec(),
        }
    }

    /// Rebuild a layout buffer sized exactly for this page.
    pub fn to_output(&self) -> LayoutOutput {
        let mut out = LayoutOutput::with_capacity(self.segments.len(), self.links.len());
        out.set_line_height_px(self.line_height_px);
        for seg in &self.segments {
            out.push_segment(seg.clone());
        }
        for link in &self.links {
            out.push_link(link.clone());
        }
        out
    }
}

/// Encode a cached page into the compact postcard envelope.
pub fn encode_page(page: &CachedPage) -> Result<Vec<u8>, SerializeError> {
    Ok(postcard::to_allocvec(page)?)
}

/// Decode a cached page, refusing incompatible versions.
pub fn decode_page(bytes: &[u8]) -> Result<CachedPage, SerializeError> {
    let page: CachedPage = postcard::from_bytes(bytes)?;
    if page.version != CACHE_FORMAT_VERSION {
        return Err(SerializeError::UnsupportedVersion {
            found: page.version,
            expected: CACHE_FORMAT_VERSION,
        });
    }
    Ok(page)
}
