use segment_tracer::classify::ThresholdClassifier;
use segment_tracer::image::ImageU8;
use segment_tracer::segments::{make_segments, SegmentOptions};

fn main() {
    // Demo stub: draws a dark sine wave on a white canvas and traces it
    let w = 320usize;
    let h = 120usize;
    let mut gray = vec![255u8; w * h];
    for x in 0..w {
        let y = (h as f32 * 0.5 + 40.0 * (x as f32 / 25.0).sin()).round() as usize;
        gray[y.min(h - 1) * w + x] = 0;
    }
    let img = ImageU8::new(w, h, &gray);

    let options = SegmentOptions::default();
    match make_segments(&img, &ThresholdClassifier::default(), &options) {
        Ok(res) => println!(
            "segments={} points={} latency_ms={:.3}",
            res.segments.len(),
            res.fill_points(&options).len(),
            res.elapsed_ms
        ),
        Err(err) => eprintln!("Error: {err}"),
    }
}
