use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use super::options::SegmentOptions;

/// Identifier of a segment within one sweep. Ids are handed out in creation
/// order and are never reused, even after the segment is pruned. The id is
/// the segment's arena slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SegmentId(pub usize);

impl SegmentId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

/// One traced sample: the run midpoint `y` in image column `x`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Anchor {
    pub x: usize,
    pub y: usize,
}

impl Anchor {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    #[inline]
    fn to_vector(self) -> Vector2<f32> {
        Vector2::new(self.x as f32, self.y as f32)
    }
}

/// Polyline traced through consecutive image columns, one anchor per column.
///
/// Every appended anchor is kept in `trace`; folding only drops indices from
/// `kept`, so the original samples stay available when checking whether a
/// longer chord still represents the traced path.
#[derive(Clone, Debug)]
pub struct Segment {
    id: SegmentId,
    trace: Vec<Anchor>,
    kept: Vec<usize>,
}

impl Segment {
    pub fn new(id: SegmentId, start: Anchor) -> Self {
        Self {
            id,
            trace: vec![start],
            kept: vec![0],
        }
    }

    pub fn id(&self) -> SegmentId {
        self.id
    }

    /// Append the anchor of the next column this segment continues into.
    pub fn append_column(&mut self, x: usize, y: usize) {
        debug_assert!(
            x > self.last().x,
            "segment {:?}: column {x} appended after column {}",
            self.id,
            self.last().x
        );
        self.kept.push(self.trace.len());
        self.trace.push(Anchor::new(x, y));
    }

    /// Anchors that survived folding, in column order.
    pub fn anchors(&self) -> impl ExactSizeIterator<Item = Anchor> + '_ {
        self.kept.iter().map(|&i| self.trace[i])
    }

    pub fn first(&self) -> Anchor {
        self.trace[0]
    }

    pub fn last(&self) -> Anchor {
        self.trace[self.trace.len() - 1]
    }

    /// Number of columns that contributed an anchor, folded or not.
    pub fn traced_len(&self) -> usize {
        self.trace.len()
    }

    /// Sum of the Euclidean lengths of the line pieces between kept anchors.
    pub fn length(&self) -> f32 {
        self.kept
            .windows(2)
            .map(|w| (self.trace[w[1]].to_vector() - self.trace[w[0]].to_vector()).norm())
            .sum()
    }

    pub fn line_count(&self) -> usize {
        self.kept.len().saturating_sub(1)
    }

    /// Fold away interior anchors that the neighbouring chord already
    /// represents within `tolerance` pixels.
    ///
    /// An anchor is dropped only if it, and every anchor folded earlier
    /// between the same surviving neighbours, lies within `tolerance` of the
    /// chord. This keeps slowly curving traces (think `y = 0.001 x²`) from
    /// collapsing into a single chord. Passes repeat until nothing folds, so
    /// calling this again on the result is a no-op. Endpoints never fold.
    pub fn remove_unneeded_lines(&mut self, tolerance: f32, folded: &mut usize) {
        loop {
            let removed = self.fold_pass(tolerance);
            if removed == 0 {
                break;
            }
            *folded += removed;
        }
    }

    fn fold_pass(&mut self, tolerance: f32) -> usize {
        if self.kept.len() < 3 {
            return 0;
        }
        let mut survivors = Vec::with_capacity(self.kept.len());
        survivors.push(self.kept[0]);
        let mut removed = 0;
        for pair in self.kept[1..].windows(2) {
            let (candidate, right) = (pair[0], pair[1]);
            let left = survivors[survivors.len() - 1];
            if self.chord_covers(left, right, tolerance) {
                removed += 1;
            } else {
                survivors.push(candidate);
            }
        }
        survivors.push(self.kept[self.kept.len() - 1]);
        self.kept = survivors;
        removed
    }

    fn chord_covers(&self, left: usize, right: usize, tolerance: f32) -> bool {
        let a = self.trace[left].to_vector();
        let b = self.trace[right].to_vector();
        let tol_sq = tolerance * tolerance;
        self.trace[left + 1..right]
            .iter()
            .all(|p| distance_sq_to_chord(p.to_vector(), a, b) <= tol_sq)
    }

    /// Resample the traced path at arc lengths `k * point_separation`,
    /// starting at the first anchor.
    ///
    /// Sampling walks every traced anchor, folded or not, so the result does
    /// not depend on folding. Pruning measures the same unfolded path, hence
    /// a segment that survived pruning yields at least `min_length` points.
    pub fn fill_points(&self, options: &SegmentOptions) -> Vec<[f32; 2]> {
        let separation = options.point_separation;
        let first = self.first().to_vector();
        let mut points = vec![[first.x, first.y]];
        if !(separation.is_finite() && separation > 0.0) {
            return points;
        }

        let mut travelled = 0.0f32;
        let mut k = 1usize;
        let mut prev = first;
        for anchor in &self.trace[1..] {
            let next = anchor.to_vector();
            let delta = next - prev;
            let piece = delta.norm();
            if piece > 0.0 {
                loop {
                    let target = k as f32 * separation;
                    if target > travelled + piece {
                        break;
                    }
                    let p = prev + delta * ((target - travelled) / piece);
                    points.push([p.x, p.y]);
                    k += 1;
                }
                travelled += piece;
            }
            prev = next;
        }
        points
    }
}

/// Squared distance from `p` to the closed segment `a`-`b`.
fn distance_sq_to_chord(p: Vector2<f32>, a: Vector2<f32>, b: Vector2<f32>) -> f32 {
    let ab = b - a;
    let len_sq = ab.norm_squared();
    if len_sq <= f32::EPSILON {
        return (p - a).norm_squared();
    }
    let t = ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    (p - (a + ab * t)).norm_squared()
}
