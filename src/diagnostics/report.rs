use crate::diagnostics::{SegmentDescriptor, SegmentStats, TimingBreakdown};
use crate::segments::{SegmentOptions, SegmentResult};
use serde::Serialize;

/// JSON summary of one traced image.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceReport {
    pub input: InputDescriptor,
    pub options: OptionsDescriptor,
    pub stats: SegmentStats,
    pub cancelled: bool,
    pub timings: TimingBreakdown,
    pub segments: Vec<SegmentDescriptor>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
}

/// Options echoed into the report, keyed like the rest of the report.
///
/// The tool config keeps the field names of [`SegmentOptions`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsDescriptor {
    pub min_length: usize,
    pub point_separation: f32,
    pub fold_tolerance_px: f32,
    pub retire_at_right_edge: bool,
    pub prune_threshold: f32,
}

impl From<&SegmentOptions> for OptionsDescriptor {
    fn from(options: &SegmentOptions) -> Self {
        Self {
            min_length: options.min_length,
            point_separation: options.point_separation,
            fold_tolerance_px: options.fold_tolerance_px,
            retire_at_right_edge: options.retire_at_right_edge,
            prune_threshold: options.prune_threshold(),
        }
    }
}

impl TraceReport {
    pub fn from_result(result: &SegmentResult, options: &SegmentOptions) -> Self {
        let mut timings = TimingBreakdown::default();
        timings.push("sweep", result.elapsed_ms);
        Self {
            input: InputDescriptor {
                width: result.width,
                height: result.height,
            },
            options: options.into(),
            stats: result.stats,
            cancelled: result.cancelled,
            timings,
            segments: result
                .segments
                .iter()
                .map(SegmentDescriptor::from_segment)
                .collect(),
        }
    }
}
