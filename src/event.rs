//! Document event stream contract and pluggable extraction strategies.
//!
//! The layout engine does not parse markup. An upstream parser walks the
//! document tree and flattens it into the ordered [`DocEvent`] sequence
//! consumed here. Payload strings borrow from the parsed document; the
//! engine copies only what it keeps into its bounded output buffers.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;

/// One flattened block/inline event from the document parser.
///
/// The stream contract: every `LinkStart` is followed by exactly one
/// matching `LinkEnd` before the stream ends, and text payloads are fully
/// decoded (no entity or markup residue). The walker stays well defined
/// even when a parser violates this; see the engine's failure semantics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocEvent<'a> {
    /// Paragraph block opens.
    ParagraphStart,
    /// Paragraph block closes.
    ParagraphEnd,
    /// Fenced/indented code block opens. Spaced like a paragraph.
    CodeBlockStart,
    /// Code block closes.
    CodeBlockEnd,
    /// Hyperlink span opens with its destination URL.
    LinkStart(&'a str),
    /// Hyperlink span closes.
    LinkEnd,
    /// Literal text run.
    Text(&'a str),
    /// Inline or block code literal. Laid out exactly like text.
    Code(&'a str),
    /// Collapsible break between lines of source text.
    SoftBreak,
    /// Forced line break.
    HardBreak,
    /// Any node kind this layer does not position (emphasis, html, ...).
    ///
    /// The upstream walker still visits such nodes' children, so their
    /// text arrives as ordinary `Text` events.
    Other,
}

/// Converts one raw document into a layout event stream.
///
/// Implementations wrap a concrete parser (cmark, an HTML tokenizer, a
/// site-specific scraper) and emit events in document order through the
/// provided sink.
pub trait ExtractStrategy {
    /// Walk `document` and emit its flattened event stream.
    fn extract(&self, document: &str, emit: &mut dyn FnMut(DocEvent<'_>));
}

/// Strategy lookup keyed by a document's declared origin.
///
/// Replaces per-source hard-coded branching: callers register one
/// strategy per origin (e.g. a hostname) plus a default for everything
/// else.
#[derive(Default)]
pub struct StrategyRegistry {
    by_origin: BTreeMap<String, Box<dyn ExtractStrategy>>,
    fallback: Option<Box<dyn ExtractStrategy>>,
}

impl StrategyRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the strategy used for documents from `origin`.
    ///
    /// A later registration for the same origin replaces the earlier one.
    pub fn register(&mut self, origin: &str, strategy: Box<dyn ExtractStrategy>) {
        self.by_origin.insert(String::from(origin), strategy);
    }

    /// Register the strategy used when no origin matches.
    pub fn register_default(&mut self, strategy: Box<dyn ExtractStrategy>) {
        self.fallback = Some(strategy);
    }

    /// Resolve the strategy for `origin`, falling back to the default.
    pub fn strategy_for(&self, origin: &str) -> Option<&dyn ExtractStrategy> {
        self.by_origin
            .get(origin)
            .or(self.fallback.as_ref())
            .map(AsRef::as_ref)
    }
}

impl core::fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StrategyRegistry")
            .field("origins", &self.by_origin.len())
            .field("has_fallback", &self.fallback.is_some())
            .finish()
    }
}
