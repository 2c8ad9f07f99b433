//! End-to-end layout scenarios over the public API.

use md_layout::{DocEvent, LayoutConfig, LayoutEngine, LayoutOutput, MonospaceMeasurer};

const ADVANCE: i32 = 6;
const LINE_H: i32 = 14;

fn layout(content_width: i32, events: &[DocEvent<'_>]) -> LayoutOutput {
    let cfg = LayoutConfig {
        content_width,
        ..LayoutConfig::default()
    };
    let metrics = MonospaceMeasurer::new(ADVANCE, LINE_H);
    let mut out = cfg.new_output();
    LayoutEngine::new(cfg).layout_events(events.iter().copied(), Some(&metrics), &mut out);
    out
}

fn paragraph(text: &str) -> [DocEvent<'_>; 3] {
    [
        DocEvent::ParagraphStart,
        DocEvent::Text(text),
        DocEvent::ParagraphEnd,
    ]
}

#[test]
fn hello_world_wraps_at_hello_width_plus_one() {
    let hello_width = ADVANCE * 5;
    let out = layout(hello_width + 1, &paragraph("hello world"));

    let segments = out.segments();
    assert_eq!(segments.len(), 2, "segments: {segments:?}");
    assert_eq!((segments[0].x, segments[0].y), (0, 0));
    assert_eq!(segments[0].text, "hello");
    assert_eq!((segments[1].x, segments[1].y), (0, LINE_H));
    assert_eq!(segments[1].text, "world");
}

#[test]
fn second_paragraph_starts_two_line_heights_down() {
    let mut events = Vec::new();
    events.extend(paragraph("first"));
    events.extend(paragraph("second"));
    let out = layout(200, &events);

    assert_eq!(out.segments()[0].y, 0);
    assert_eq!(out.segments()[1].y, 2 * LINE_H);
}

#[test]
fn link_wrapping_across_two_lines_has_double_height_bounds() {
    // Content width fits "click" but not "click here".
    let out = layout(
        6 * ADVANCE,
        &[
            DocEvent::ParagraphStart,
            DocEvent::LinkStart("https://example.com/docs"),
            DocEvent::Text("click here"),
            DocEvent::LinkEnd,
            DocEvent::ParagraphEnd,
        ],
    );

    assert_eq!(out.links().len(), 1);
    let link = &out.links()[0];
    assert_eq!(link.segments.len(), 2, "link segments: {:?}", link.segments);
    assert_eq!(link.bounds.height, 2 * LINE_H);

    // Every constituent segment lies within the bounding box.
    for seg in &link.segments {
        assert!(link.bounds.contains(seg.x, seg.y));
        assert!(link.bounds.contains(seg.x + seg.width - 1, seg.y + LINE_H - 1));
    }
}

#[test]
fn more_words_than_capacity_truncates_instead_of_failing() {
    let cfg = LayoutConfig {
        content_width: 5 * ADVANCE,
        max_segments: 10,
        ..LayoutConfig::default()
    };
    let metrics = MonospaceMeasurer::new(ADVANCE, LINE_H);
    let mut out = cfg.new_output();

    // Every word wraps onto its own line, so each becomes a segment.
    let text = "alpha beta gamma delta epsilon zeta eta theta iota kappa lambda mu nu";
    LayoutEngine::new(cfg).layout_events(
        [
            DocEvent::ParagraphStart,
            DocEvent::Text(text),
            DocEvent::ParagraphEnd,
        ],
        Some(&metrics),
        &mut out,
    );

    assert_eq!(out.segments().len(), 10, "output stops at capacity");
    assert!(out.dropped_segments() > 0);
}

#[test]
fn layout_without_a_measurer_returns_empty_output() {
    let cfg = LayoutConfig::default();
    let mut out = cfg.new_output();
    LayoutEngine::new(cfg).layout_events(
        [
            DocEvent::ParagraphStart,
            DocEvent::Text("some text"),
            DocEvent::LinkStart("https://example.com"),
            DocEvent::Text("a link"),
            DocEvent::LinkEnd,
            DocEvent::ParagraphEnd,
        ],
        None,
        &mut out,
    );

    assert!(out.segments().is_empty());
    assert!(out.links().is_empty());
    assert_eq!(out.content_height(), 0);
}

#[test]
fn no_segment_overflows_unless_alone_on_its_line() {
    let content_width = 12 * ADVANCE;
    let out = layout(
        content_width,
        &[
            DocEvent::ParagraphStart,
            DocEvent::Text("a few short words then absolutely-gigantic-token and more text"),
            DocEvent::HardBreak,
            DocEvent::Text("tail line"),
            DocEvent::ParagraphEnd,
        ],
    );

    for seg in out.segments() {
        let fits = seg.x + seg.width <= content_width;
        let overlong_alone = seg.x == 0 && seg.width > content_width;
        assert!(
            fits || overlong_alone,
            "segment neither fits nor is an overlong lone word: {seg:?}"
        );
    }
}

#[test]
fn y_is_monotone_across_a_whole_document() {
    let mut events = Vec::new();
    events.extend(paragraph("the quick brown fox jumps over the lazy dog"));
    events.extend([
        DocEvent::ParagraphStart,
        DocEvent::Text("line one"),
        DocEvent::HardBreak,
        DocEvent::Text("line two"),
        DocEvent::SoftBreak,
        DocEvent::Text("continued"),
        DocEvent::ParagraphEnd,
    ]);
    events.extend(paragraph("closing paragraph"));
    let out = layout(10 * ADVANCE, &events);

    let mut prev_y = 0;
    for seg in out.segments() {
        assert!(seg.y >= prev_y, "y regressed at {seg:?}");
        prev_y = seg.y;
    }
    assert_eq!(out.content_height(), prev_y + LINE_H);
}

#[test]
fn hit_test_resolves_the_right_link() {
    let out = layout(
        200,
        &[
            DocEvent::ParagraphStart,
            DocEvent::LinkStart("https://first.example"),
            DocEvent::Text("first"),
            DocEvent::LinkEnd,
            DocEvent::SoftBreak,
            DocEvent::LinkStart("https://second.example"),
            DocEvent::Text("second"),
            DocEvent::LinkEnd,
            DocEvent::ParagraphEnd,
        ],
    );

    assert_eq!(out.links().len(), 2);
    let first = &out.links()[0];
    let second = &out.links()[1];
    assert_eq!(
        out.link_at(first.bounds.x, first.bounds.y).map(|l| l.url.as_str()),
        Some("https://first.example")
    );
    assert_eq!(
        out.link_at(second.bounds.x, second.bounds.y).map(|l| l.url.as_str()),
        Some("https://second.example")
    );
    // Between the two links there is a gap: the separating space.
    let gap_x = first.bounds.x + first.bounds.width;
    assert!(out.link_at(gap_x, first.bounds.y).is_none());
}

#[test]
fn empty_document_yields_empty_page() {
    let out = layout(200, &[]);
    assert!(out.segments().is_empty());
    assert!(out.links().is_empty());
    assert_eq!(out.content_height(), 0);
}

#[test]
fn rerunning_layout_reuses_the_buffer() {
    let cfg = LayoutConfig {
        content_width: 200,
        ..LayoutConfig::default()
    };
    let metrics = MonospaceMeasurer::new(ADVANCE, LINE_H);
    let engine = LayoutEngine::new(cfg);
    let mut out = cfg.new_output();

    engine.layout_events(paragraph("first pass"), Some(&metrics), &mut out);
    assert_eq!(out.segments().len(), 1);

    engine.layout_events(paragraph("second"), Some(&metrics), &mut out);
    assert_eq!(out.segments().len(), 1, "previous pass must be cleared");
    assert_eq!(out.segments()[0].text, "second");
}
