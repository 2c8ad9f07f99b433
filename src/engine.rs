//! Layout engine: event walker, paragraph spacing, and link aggregation.
//!
//! The engine drives the word wrapper over a flattened document event
//! stream and fills a caller-owned [`LayoutOutput`]. One session owns its
//! cursor and output buffer exclusively; layout is synchronous and
//! re-entrancy is not supported.

use alloc::string::String;
use smallvec::SmallVec;

use crate::event::{DocEvent, ExtractStrategy};
use crate::metrics::TextMeasurer;
use crate::output::{BoundingBox, LayoutOutput, LinkRecord, LinkSegment};
use crate::wrap::{wrap_run, Cursor, WrapParams};

/// Layout parameters for one page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutConfig {
    /// Horizontal pixel budget for wrapped text.
    pub content_width: i32,
    /// Extra pixel spacing after each token beyond its measured width.
    ///
    /// Segments accumulate whole lines, so the renderer must draw with
    /// the same tracking for glyphs to land on the cursor positions.
    pub tracking: i32,
    /// Text segment buffer capacity.
    pub max_segments: usize,
    /// Link record buffer capacity.
    pub max_links: usize,
    /// Per-link line-geometry capacity.
    pub max_link_segments: usize,
    /// Byte cap for one segment's text.
    pub max_segment_bytes: usize,
    /// Byte cap for a stored link URL.
    pub max_url_bytes: usize,
}

impl LayoutConfig {
    /// Config for a full page width minus symmetric horizontal padding.
    pub fn for_page_width(page_width: i32, horizontal_padding: i32) -> Self {
        Self {
            content_width: (page_width - 2 * horizontal_padding).max(1),
            ..Self::default()
        }
    }

    /// Allocate an output buffer sized to this config's capacities.
    pub fn new_output(&self) -> LayoutOutput {
        LayoutOutput::with_capacity(self.max_segments, self.max_links)
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            // 400px screen minus 10px padding per side.
            content_width: 380,
            tracking: 0,
            max_segments: 512,
            max_links: 64,
            max_link_segments: 16,
            max_segment_bytes: 512,
            max_url_bytes: 256,
        }
    }
}

/// Deterministic layout engine over document event streams.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayoutEngine {
    cfg: LayoutConfig,
}

impl LayoutEngine {
    /// Create an engine with the given config.
    pub fn new(cfg: LayoutConfig) -> Self {
        Self { cfg }
    }

    /// The engine's config.
    pub fn config(&self) -> &LayoutConfig {
        &self.cfg
    }

    /// Start a streaming session writing into `out`.
    ///
    /// `out` is reset first. With no measurer, or one reporting a
    /// non-positive line height, the session refuses to run and leaves
    /// `out` empty.
    pub fn start_session<'a>(
        &self,
        metrics: Option<&'a dyn TextMeasurer>,
        out: &'a mut LayoutOutput,
    ) -> LayoutSession<'a> {
        out.reset();
        let metrics = match metrics {
            Some(m) if m.line_height_px() > 0 => Some(m),
            Some(_) => {
                log::warn!("layout refused: measurer reports non-positive line height");
                None
            }
            None => {
                log::warn!("layout refused: no text measurer configured");
                None
            }
        };
        let line_height_px = metrics.map(|m| m.line_height_px()).unwrap_or(0);
        let space_px = metrics.map(|m| m.space_px()).unwrap_or(0);
        out.set_line_height_px(line_height_px);
        LayoutSession {
            cfg: self.cfg,
            metrics,
            out,
            cursor: Cursor::default(),
            line_height_px,
            space_px,
            block_seen: false,
            span: None,
        }
    }

    /// Lay out a complete event stream into `out`.
    pub fn layout_events<'e, I>(
        &self,
        events: I,
        metrics: Option<&dyn TextMeasurer>,
        out: &mut LayoutOutput,
    ) where
        I: IntoIterator<Item = DocEvent<'e>>,
    {
        let mut session = self.start_session(metrics, out);
        for ev in events {
            session.push_event(ev);
        }
        session.finish();
    }

    /// Extract `document` through `strategy` and lay the result out.
    pub fn layout_document(
        &self,
        strategy: &dyn ExtractStrategy,
        document: &str,
        metrics: Option<&dyn TextMeasurer>,
        out: &mut LayoutOutput,
    ) {
        let mut session = self.start_session(metrics, out);
        strategy.extract(document, &mut |ev| session.push_event(ev));
        session.finish();
    }
}

/// Accumulates wrapped pieces of the currently open hyperlink.
struct LinkSpan {
    url: String,
    segments: SmallVec<[LinkSegment; 8]>,
}

/// One in-flight layout pass over an event stream.
pub struct LayoutSession<'a> {
    cfg: LayoutConfig,
    metrics: Option<&'a dyn TextMeasurer>,
    out: &'a mut LayoutOutput,
    cursor: Cursor,
    line_height_px: i32,
    space_px: i32,
    block_seen: bool,
    span: Option<LinkSpan>,
}

impl LayoutSession<'_> {
    /// Feed one event. Malformed sequences never fail; they degrade to
    /// no-ops per the walker's transition rules.
    pub fn push_event(&mut self, ev: DocEvent<'_>) {
        if self.metrics.is_none() {
            return;
        }
        match ev {
            DocEvent::ParagraphStart | DocEvent::CodeBlockStart => self.begin_block(),
            DocEvent::ParagraphEnd | DocEvent::CodeBlockEnd | DocEvent::Other => {}
            DocEvent::Text(text) | DocEvent::Code(text) => self.layout_run(text),
            DocEvent::SoftBreak => {
                if self.cursor.x > 0 && self.cursor.x + self.space_px <= self.cfg.content_width {
                    self.cursor.x += self.space_px + self.cfg.tracking;
                }
            }
            DocEvent::HardBreak => {
                self.cursor.y += self.line_height_px;
                self.cursor.x = 0;
            }
            DocEvent::LinkStart(url) => {
                // A link opening inside an open span implicitly closes the
                // outer one; its eventual LinkEnd is then a no-op.
                self.finalize_span();
                self.span = Some(LinkSpan {
                    url: String::from(truncate_at_boundary(url, self.cfg.max_url_bytes)),
                    segments: SmallVec::new(),
                });
            }
            DocEvent::LinkEnd => self.finalize_span(),
        }
    }

    /// Current pen position.
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Close the session.
    ///
    /// Segments were emitted as each literal was processed, so there is
    /// nothing to flush; a span left open by a malformed stream is
    /// finalized so its text stays hit-testable.
    pub fn finish(mut self) {
        self.finalize_span();
    }

    fn begin_block(&mut self) {
        if self.block_seen {
            self.cursor.y += 2 * self.line_height_px;
            self.cursor.x = 0;
        }
        self.block_seen = true;
    }

    fn layout_run(&mut self, text: &str) {
        let Some(metrics) = self.metrics else {
            return;
        };
        let params = WrapParams {
            metrics,
            content_width: self.cfg.content_width,
            tracking: self.cfg.tracking,
            line_height_px: self.line_height_px,
            space_px: self.space_px,
            max_segment_bytes: self.cfg.max_segment_bytes,
        };
        let out = &mut *self.out;
        let mut span = self.span.as_mut();
        let max_link_segments = self.cfg.max_link_segments;
        wrap_run(text, &mut self.cursor, &params, &mut |seg| {
            let geometry = LinkSegment {
                x: seg.x,
                y: seg.y,
                width: seg.width,
            };
            // Dropped segments contribute no link geometry either.
            if !out.push_segment(seg) {
                return;
            }
            if let Some(span) = span.as_deref_mut() {
                if span.segments.len() < max_link_segments {
                    span.segments.push(geometry);
                }
            }
        });
    }

    /// Reduce the open span to a [`LinkRecord`]: the minimal rectangle
    /// covering every accumulated line box, plus the per-line geometry.
    fn finalize_span(&mut self) {
        let Some(span) = self.span.take() else {
            return;
        };
        if span.segments.is_empty() {
            return;
        }
        let mut min_x = i32::MAX;
        let mut min_y = i32::MAX;
        let mut max_right = i32::MIN;
        let mut max_y = i32::MIN;
        for seg in &span.segments {
            min_x = min_x.min(seg.x);
            min_y = min_y.min(seg.y);
            max_right = max_right.max(seg.x + seg.width);
            max_y = max_y.max(seg.y);
        }
        let bounds = BoundingBox {
            x: min_x,
            y: min_y,
            width: max_right - min_x,
            height: (max_y - min_y) + self.line_height_px,
        };
        self.out.push_link(LinkRecord {
            url: span.url,
            bounds,
            segments: span.segments.into_vec(),
        });
    }
}

fn truncate_at_boundary(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let mut end = max_bytes;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
