#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod classify;
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod segments;

// Tool support: JSON configs for the binaries.
pub mod config;

// --- High-level re-exports -------------------------------------------------

// Main entry points: sweep + results.
pub use crate::error::TraceError;
pub use crate::segments::{make_segments, make_segments_with, SegmentOptions, SegmentResult};

// Diagnostics returned with every sweep.
pub use crate::diagnostics::{SegmentStats, TraceReport};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use segment_tracer::prelude::*;
///
/// # fn main() {
/// let (w, h) = (640usize, 480usize);
/// let gray = vec![255u8; w * h];
/// let img = ImageU8::new(w, h, &gray);
///
/// let options = SegmentOptions::default();
/// let result = make_segments(&img, &ThresholdClassifier::default(), &options).unwrap();
/// println!("segments={} points={}", result.segments.len(), result.fill_points(&options).len());
/// # }
/// ```
pub mod prelude {
    pub use crate::classify::{PixelClassifier, Polarity, ThresholdClassifier};
    pub use crate::image::ImageU8;
    pub use crate::segments::{make_segments, Segment, SegmentOptions, SegmentResult};
}
