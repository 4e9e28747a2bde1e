//! Sliding column buffers for the sweep.
//!
//! Three mask columns (previous, current, lookahead) and two ownership
//! columns (previous, current) are allocated once per sweep and rotated in
//! place as the sweep advances.
use std::ops::Range;

use super::segment::SegmentId;

/// Maximal span `start..=stop` of active rows within one column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Run {
    pub start: usize,
    pub stop: usize,
}

impl Run {
    /// Row midpoint, rounded half up.
    #[inline]
    pub(crate) fn midpoint(self) -> usize {
        (self.start + self.stop + 1) / 2
    }

    /// Rows of a neighbouring column that count as touching this run,
    /// diagonal neighbours included.
    #[inline]
    pub(crate) fn adjacency(self, height: usize) -> Range<usize> {
        self.start.saturating_sub(1)..(self.stop + 2).min(height)
    }
}

/// Find the next run at or below row `*cursor`, advancing the cursor past it.
pub(crate) fn next_run(column: &[bool], cursor: &mut usize) -> Option<Run> {
    let mut y = *cursor;
    while y < column.len() && !column[y] {
        y += 1;
    }
    if y >= column.len() {
        *cursor = y;
        return None;
    }
    let start = y;
    while y < column.len() && column[y] {
        y += 1;
    }
    *cursor = y;
    Some(Run { start, stop: y - 1 })
}

/// Number of runs in a (clipped) column slice.
pub(crate) fn count_runs(column: &[bool]) -> usize {
    let mut cursor = 0;
    let mut runs = 0;
    while next_run(column, &mut cursor).is_some() {
        runs += 1;
    }
    runs
}

/// Which segment, if any, owns the rows adjacent to a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LeftOwner {
    Unowned,
    Single(SegmentId),
    Ambiguous(usize),
}

impl LeftOwner {
    pub(crate) fn count(self) -> usize {
        match self {
            Self::Unowned => 0,
            Self::Single(_) => 1,
            Self::Ambiguous(n) => n,
        }
    }
}

/// Classify an ownership slice by its spans of identical non-empty owners.
pub(crate) fn left_owner(owners: &[Option<SegmentId>]) -> LeftOwner {
    let mut spans = 0;
    let mut first = None;
    let mut prev = None;
    for &owner in owners {
        if owner.is_some() && owner != prev {
            spans += 1;
            first = first.or(owner);
        }
        prev = owner;
    }
    match (spans, first) {
        (1, Some(id)) => LeftOwner::Single(id),
        (0, _) | (_, None) => LeftOwner::Unowned,
        (n, _) => LeftOwner::Ambiguous(n),
    }
}

pub(crate) struct ColumnWindow {
    /// prev, curr, next
    masks: [Vec<bool>; 3],
    /// prev, curr
    owners: [Vec<Option<SegmentId>>; 2],
}

impl ColumnWindow {
    pub(crate) fn new(height: usize) -> Self {
        Self {
            masks: [vec![false; height], vec![false; height], vec![false; height]],
            owners: [vec![None; height], vec![None; height]],
        }
    }

    #[inline]
    pub(crate) fn prev_mask(&self) -> &[bool] {
        &self.masks[0]
    }

    #[inline]
    pub(crate) fn curr_mask(&self) -> &[bool] {
        &self.masks[1]
    }

    #[inline]
    pub(crate) fn next_mask(&self) -> &[bool] {
        &self.masks[2]
    }

    pub(crate) fn curr_mask_mut(&mut self) -> &mut [bool] {
        &mut self.masks[1]
    }

    pub(crate) fn next_mask_mut(&mut self) -> &mut [bool] {
        &mut self.masks[2]
    }

    #[inline]
    pub(crate) fn prev_owner(&self) -> &[Option<SegmentId>] {
        &self.owners[0]
    }

    pub(crate) fn reset_current_owner(&mut self) {
        self.owners[1].fill(None);
    }

    pub(crate) fn claim(&mut self, run: Run, id: SegmentId) {
        self.owners[1][run.start..=run.stop].fill(Some(id));
    }

    /// Shift every buffer one column to the left. The lookahead mask now holds
    /// stale data and must be reloaded by the caller.
    pub(crate) fn scroll(&mut self) {
        self.masks.rotate_left(1);
        self.owners.swap(0, 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(bits: &str) -> Vec<bool> {
        bits.chars().map(|c| c == '#').collect()
    }

    #[test]
    fn runs_are_maximal_and_closed_by_the_border() {
        let col = column(".##..#.###");
        let mut cursor = 0;
        let mut runs = Vec::new();
        while let Some(run) = next_run(&col, &mut cursor) {
            runs.push((run.start, run.stop));
        }
        assert_eq!(runs, vec![(1, 2), (5, 5), (7, 9)]);
        assert_eq!(count_runs(&col), 3);
        assert_eq!(count_runs(&column("....")), 0);
    }

    #[test]
    fn midpoint_rounds_half_up() {
        assert_eq!(Run { start: 2, stop: 2 }.midpoint(), 2);
        assert_eq!(Run { start: 2, stop: 3 }.midpoint(), 3);
        assert_eq!(Run { start: 2, stop: 4 }.midpoint(), 3);
        assert_eq!(Run { start: 0, stop: 1 }.midpoint(), 1);
    }

    #[test]
    fn adjacency_window_is_clipped_to_the_column() {
        assert_eq!(Run { start: 0, stop: 0 }.adjacency(5), 0..2);
        assert_eq!(Run { start: 2, stop: 3 }.adjacency(5), 1..5);
        assert_eq!(Run { start: 4, stop: 4 }.adjacency(5), 3..5);
    }

    #[test]
    fn owner_spans_count_changes_of_reference() {
        let a = Some(SegmentId(0));
        let b = Some(SegmentId(1));
        assert_eq!(left_owner(&[None, None]), LeftOwner::Unowned);
        assert_eq!(left_owner(&[None, a, a]), LeftOwner::Single(SegmentId(0)));
        assert_eq!(left_owner(&[a, None, b]), LeftOwner::Ambiguous(2));
        assert_eq!(left_owner(&[a, b]), LeftOwner::Ambiguous(2));
    }

    #[test]
    fn scroll_rotates_masks_and_owners() {
        let mut window = ColumnWindow::new(3);
        window.curr_mask_mut()[1] = true;
        window.next_mask_mut()[2] = true;
        window.claim(Run { start: 1, stop: 1 }, SegmentId(7));
        window.scroll();
        assert_eq!(window.prev_mask(), &[false, true, false]);
        assert_eq!(window.curr_mask(), &[false, false, true]);
        assert_eq!(window.prev_owner(), &[None, Some(SegmentId(7)), None]);
    }
}
