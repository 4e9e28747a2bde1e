//! Column-sweep segment tracer.
//!
//! This module turns a binarized raster into piecewise-linear curves
//! ("segments") in a single left-to-right pass over the image columns:
//!
//! - Column masks: each column is classified pixel by pixel into a boolean
//!   mask by a [`PixelClassifier`](crate::classify::PixelClassifier). Three
//!   masks are kept in a sliding window: previous, current and lookahead.
//! - Runs: maximal vertical spans of active rows in the current column. Each
//!   run is compared with the previous and lookahead masks over a window
//!   dilated by one row, so diagonal contact counts as a connection.
//! - Branch rejection: a run touching more than one run on either side sits
//!   on a branch or merge and is dropped. Only single-thread paths are traced.
//! - Ownership: a second sliding window records which segment owns each row
//!   of the previous and current column. A run next to one owned span extends
//!   that segment with its midpoint; an unowned run starts a new segment.
//! - Retirement: a segment that does not continue into the current column is
//!   finalized once. Segments shorter than `(min_length - 1) *
//!   point_separation` are pruned; the rest have redundant interior anchors
//!   folded away.
//!
//! Segments still open after the last column (or at a cancelled column) are
//! returned exactly as traced unless
//! [`SegmentOptions::retire_at_right_edge`] asks for a final retire pass.
//!
//! Complexity
//! - Every pixel is classified exactly once and every mask row is visited a
//!   bounded number of times, giving O(W*H) per sweep. Buffers are allocated
//!   once per sweep.
//!
//! See also
//! - `crate::diagnostics` for the counters and report types.
//! - `crate::image::io` for loading inputs and rendering overlays.

mod factory;
mod options;
mod progress;
mod scene;
mod segment;
mod window;

pub use factory::{SegmentFactory, SegmentResult};
pub use options::SegmentOptions;
pub use progress::{CancelAt, LogProgress, SweepProgress};
pub use scene::{RecordingScene, SegmentScene};
pub use segment::{Anchor, Segment, SegmentId};

use crate::classify::PixelClassifier;
use crate::error::TraceError;
use crate::image::ImageView;

/// Trace all single-thread curves of `image`.
pub fn make_segments<I, C>(
    image: &I,
    classifier: &C,
    options: &SegmentOptions,
) -> Result<SegmentResult, TraceError>
where
    I: ImageView + ?Sized,
    C: PixelClassifier<I> + ?Sized,
{
    make_segments_with(image, classifier, options, &mut (), &mut ())
}

/// Same as [`make_segments`] but reports progress, honours cancellation and
/// registers every created segment with `scene`.
pub fn make_segments_with<I, C>(
    image: &I,
    classifier: &C,
    options: &SegmentOptions,
    progress: &mut dyn SweepProgress,
    scene: &mut dyn SegmentScene,
) -> Result<SegmentResult, TraceError>
where
    I: ImageView + ?Sized,
    C: PixelClassifier<I> + ?Sized,
{
    Ok(SegmentFactory::new(image, classifier, options, progress, scene)?.run())
}
