use crate::segments::{Anchor, Segment, SegmentId};
use serde::{Deserialize, Serialize};

/// Counters collected during one sweep.
///
/// `lines_created`, `points_folded` and `lines_too_short` are the headline
/// numbers logged after every sweep; the remaining fields break down how runs
/// and segments were handled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentStats {
    /// Anchors appended to an existing segment (continuations).
    pub lines_created: usize,
    /// Interior anchors removed by folding.
    pub points_folded: usize,
    /// Line pieces of segments pruned for being too short.
    pub lines_too_short: usize,
    pub segments_started: usize,
    pub segments_pruned: usize,
    /// Runs dropped because they touch a branch or merge.
    pub branch_runs: usize,
    /// Runs whose owner count disagreed with the raw left-run count.
    pub adjacency_mismatches: usize,
    pub columns_scanned: usize,
}

/// Geometry snapshot of a traced segment.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentDescriptor {
    pub id: SegmentId,
    pub anchors: Vec<Anchor>,
    pub length: f32,
    pub line_count: usize,
    pub traced_columns: usize,
}

impl SegmentDescriptor {
    pub fn from_segment(seg: &Segment) -> Self {
        Self {
            id: seg.id(),
            anchors: seg.anchors().collect(),
            length: seg.length(),
            line_count: seg.line_count(),
            traced_columns: seg.traced_len(),
        }
    }
}
