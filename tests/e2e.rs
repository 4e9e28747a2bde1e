mod common;

use common::synthetic_image::{cross_u8, plot_u8};
use segment_tracer::classify::ThresholdClassifier;
use segment_tracer::diagnostics::TraceReport;
use segment_tracer::image::ImageU8;
use segment_tracer::segments::{make_segments, Segment, SegmentOptions};

fn anchors(segment: &Segment) -> Vec<(usize, usize)> {
    segment.anchors().map(|a| (a.x, a.y)).collect()
}

#[test]
fn horizontal_line_matches_reference_trace() {
    let (width, height) = (4usize, 5usize);
    let buffer = plot_u8(width, height, |_| 2.0);
    let image = ImageU8::new(width, height, &buffer);

    let result = make_segments(&image, &ThresholdClassifier::default(), &SegmentOptions::default())
        .expect("trace");

    assert_eq!(result.segments.len(), 1);
    let segment = &result.segments[0];
    assert_eq!(anchors(segment), vec![(0, 2), (1, 2), (2, 2), (3, 2)]);
    assert_eq!(segment.line_count(), 3);
    assert!((segment.length() - 3.0).abs() < 1e-6, "length={}", segment.length());
}

#[test]
fn gentle_sine_is_traced_without_splits() {
    let _ = env_logger::builder().is_test(true).try_init();

    let (width, height) = (160usize, 48usize);
    let curve = |x: f32| 24.0 + 10.0 * (x / 12.0).sin();
    let buffer = plot_u8(width, height, curve);
    let image = ImageU8::new(width, height, &buffer);
    let options = SegmentOptions {
        min_length: 3,
        point_separation: 8.0,
        ..SegmentOptions::default()
    };

    let result = make_segments(&image, &ThresholdClassifier::default(), &options).expect("trace");
    assert_eq!(
        result.segments.len(),
        1,
        "expected one segment, stats={:?}",
        result.stats
    );
    let segment = &result.segments[0];
    assert_eq!(segment.line_count(), width - 1);
    for anchor in segment.anchors() {
        let expected = curve(anchor.x as f32);
        assert!(
            (anchor.y as f32 - expected).abs() <= 0.5 + 1e-4,
            "anchor {anchor:?} strays from curve value {expected:.2}"
        );
    }

    let points = result.fill_points(&options);
    let expected_points = (segment.length() / options.point_separation).floor() as usize + 1;
    assert_eq!(points.len(), expected_points);
}

#[test]
fn retiring_at_the_right_edge_simplifies_the_sine() {
    let (width, height) = (160usize, 48usize);
    let buffer = plot_u8(width, height, |x| 24.0 + 10.0 * (x / 12.0).sin());
    let image = ImageU8::new(width, height, &buffer);
    let options = SegmentOptions {
        retire_at_right_edge: true,
        ..SegmentOptions::default()
    };

    let result = make_segments(&image, &ThresholdClassifier::default(), &options).expect("trace");
    assert_eq!(result.segments.len(), 1);
    let segment = &result.segments[0];
    assert!(
        segment.line_count() < (width - 1) * 2 / 3,
        "folding kept {} lines",
        segment.line_count()
    );
    assert_eq!(segment.first().x, 0);
    assert_eq!(segment.last().x, width - 1);
    assert_eq!(segment.traced_len(), width);
    assert_eq!(
        result.stats.points_folded,
        width - 1 - segment.line_count()
    );
}

#[test]
fn crossing_lines_split_at_the_crossing() {
    let size = 21usize;
    let buffer = cross_u8(size);
    let image = ImageU8::new(size, size, &buffer);

    let result = make_segments(&image, &ThresholdClassifier::default(), &SegmentOptions::default())
        .expect("trace");

    assert_eq!(result.stats.branch_runs, 1);
    let traced: Vec<_> = result.segments.iter().map(anchors).collect();
    assert_eq!(traced.len(), 4, "segments: {traced:?}");
    assert!(traced.iter().flatten().all(|&(x, _)| x != size / 2));
    // Left arms retire at the crossing and fold down to their endpoints.
    assert_eq!(traced[0], vec![(0, 0), (9, 9)]);
    assert_eq!(traced[1], vec![(0, 20), (9, 11)]);
}

#[test]
fn report_serializes_with_camel_case_keys() {
    let buffer = cross_u8(21);
    let image = ImageU8::new(21, 21, &buffer);
    let options = SegmentOptions::default();
    let result = make_segments(&image, &ThresholdClassifier::default(), &options).expect("trace");

    let report = TraceReport::from_result(&result, &options);
    let json = serde_json::to_value(&report).expect("serialize");
    assert_eq!(json["input"]["width"], 21);
    assert_eq!(json["stats"]["branchRuns"], 1);
    assert_eq!(json["segments"].as_array().map(Vec::len), Some(4));
    assert!(json["segments"][0]["lineCount"].is_number());
    assert_eq!(json["options"]["minLength"], 2);
    assert_eq!(json["options"]["retireAtRightEdge"], false);
    assert!(json["options"].get("min_length").is_none());
}
