//! Bounded-memory markdown/HTML layout for small fixed-width displays.
//!
//! `md-layout` turns a flattened stream of document events (text runs,
//! link spans, breaks, paragraph boundaries) into pixel-positioned text
//! segments with greedy word wrap, plus hit-testable multi-line link
//! regions. Parsing and drawing stay outside: a parser feeds
//! [`DocEvent`]s in, a [`TextMeasurer`] answers width queries, and the
//! caller draws the resulting segments however the target wants.
//!
//! Output lands in a caller-owned, pre-sized [`LayoutOutput`] buffer.
//! Capacities are runtime parameters; when a buffer fills, further output
//! is dropped and counted instead of reallocating, which keeps one layout
//! call at a fixed memory ceiling on constrained targets.
//!
//! ```
//! use md_layout::{DocEvent, LayoutConfig, LayoutEngine, MonospaceMeasurer};
//!
//! let cfg = LayoutConfig::for_page_width(400, 10);
//! let engine = LayoutEngine::new(cfg);
//! let metrics = MonospaceMeasurer::new(6, 14);
//! let mut out = cfg.new_output();
//!
//! engine.layout_events(
//!     [
//!         DocEvent::ParagraphStart,
//!         DocEvent::Text("hello "),
//!         DocEvent::LinkStart("https://example.com"),
//!         DocEvent::Text("world"),
//!         DocEvent::LinkEnd,
//!         DocEvent::ParagraphEnd,
//!     ],
//!     Some(&metrics),
//!     &mut out,
//! );
//!
//! assert_eq!(out.segments().len(), 2);
//! assert_eq!(out.links().len(), 1);
//! assert!(out.link_at(out.links()[0].bounds.x, 0).is_some());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(
    not(test),
    deny(
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented
    )
)]

extern crate alloc;

mod engine;
mod event;
mod metrics;
mod output;
mod serialize;
mod wrap;

pub use engine::{LayoutConfig, LayoutEngine, LayoutSession};
pub use event::{DocEvent, ExtractStrategy, StrategyRegistry};
pub use metrics::{MonospaceMeasurer, TextMeasurer};
pub use output::{BoundingBox, LayoutOutput, LinkRecord, LinkSegment, TextSegment};
pub use serialize::{
    decode_page, encode_page, page_to_json, CachedPage, SerializeError, CACHE_FORMAT_VERSION,
};
pub use wrap::Cursor;
