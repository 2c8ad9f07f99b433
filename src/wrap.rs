//! Greedy word wrapper.
//!
//! Wraps one literal text run against the measurement port, starting from
//! the caller's cursor, and emits finished line segments through a sink.
//! Tokenization is on the ASCII space only; newlines and tabs are
//! normalized upstream into space/break events before they reach here.

use alloc::string::String;
use core::mem;

use crate::metrics::TextMeasurer;
use crate::output::TextSegment;

/// Pen position in pixels, top-left origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cursor {
    /// Horizontal position. Reset to 0 on every line break.
    pub x: i32,
    /// Vertical position. Never decreases within one layout call.
    pub y: i32,
}

/// Per-call wrap parameters, with font metrics sampled once up front.
pub(crate) struct WrapParams<'a> {
    pub metrics: &'a dyn TextMeasurer,
    pub content_width: i32,
    pub tracking: i32,
    pub line_height_px: i32,
    pub space_px: i32,
    pub max_segment_bytes: usize,
}

/// Wrap `text` from `cursor`, emitting one segment per produced line
/// piece and advancing the cursor past the run.
///
/// Rules, in order:
/// - leading spaces at line start are skipped outright;
/// - a space advances `x` by `space + tracking` only when `x + space`
///   still fits, otherwise it is dropped (a trailing space at a wrap
///   boundary is invisible);
/// - a word that does not fit on a started line closes the current
///   segment and wraps; a word wider than the content width on an empty
///   line is placed anyway and overflows rather than being split.
pub(crate) fn wrap_run(
    text: &str,
    cursor: &mut Cursor,
    params: &WrapParams<'_>,
    emit: &mut dyn FnMut(TextSegment),
) {
    let bytes = text.as_bytes();
    let mut seg_text = String::new();
    let mut seg_x = 0;
    let mut seg_y = 0;
    let mut seg_width = 0;
    // Spaces that advanced the cursor but are not yet in the segment
    // text. Materialized on the next word so drawn glyphs stay in sync
    // with cursor advances; discarded when the line wraps instead.
    let mut pending_spaces = 0usize;

    let mut flush = |seg_text: &mut String, seg_x: i32, seg_y: i32, seg_width: i32| {
        if seg_text.is_empty() {
            return;
        }
        emit(TextSegment {
            x: seg_x,
            y: seg_y,
            text: mem::take(seg_text),
            width: seg_width,
        });
    };

    let mut pos = 0;
    while pos < bytes.len() {
        if bytes[pos] == b' ' {
            pos += 1;
            if cursor.x == 0 {
                continue;
            }
            if cursor.x + params.space_px <= params.content_width {
                cursor.x += params.space_px + params.tracking;
                if !seg_text.is_empty() {
                    pending_spaces += 1;
                }
            }
            continue;
        }

        let word_start = pos;
        while pos < bytes.len() && bytes[pos] != b' ' {
            pos += 1;
        }
        let word = &text[word_start..pos];
        let word_width = params.metrics.measure_px(word);

        if cursor.x > 0 && cursor.x + word_width > params.content_width {
            flush(&mut seg_text, seg_x, seg_y, seg_width);
            cursor.y += params.line_height_px;
            cursor.x = 0;
            pending_spaces = 0;
        }

        if !seg_text.is_empty()
            && seg_text.len() + pending_spaces + word.len() > params.max_segment_bytes
        {
            // Byte cap reached: split at the current x, no line break.
            // The dropped pending spaces already advanced the cursor.
            flush(&mut seg_text, seg_x, seg_y, seg_width);
            pending_spaces = 0;
        }

        if seg_text.is_empty() {
            seg_x = cursor.x;
            seg_y = cursor.y;
        } else {
            for _ in 0..pending_spaces {
                seg_text.push(' ');
            }
        }
        pending_spaces = 0;
        seg_text.push_str(word);
        seg_width = cursor.x + word_width - seg_x;
        cursor.x += word_width + params.tracking;
    }

    flush(&mut seg_text, seg_x, seg_y, seg_width);
}
