use log::{debug, info, trace};
use rayon::prelude::*;
use std::time::Instant;

use super::options::SegmentOptions;
use super::progress::SweepProgress;
use super::scene::SegmentScene;
use super::segment::{Anchor, Segment, SegmentId};
use super::window::{count_runs, left_owner, next_run, ColumnWindow, LeftOwner, Run};
use crate::classify::PixelClassifier;
use crate::diagnostics::SegmentStats;
use crate::error::TraceError;
use crate::image::ImageView;

/// Segments surviving one sweep plus the counters collected along the way.
#[derive(Clone, Debug)]
pub struct SegmentResult {
    /// Kept segments in creation order.
    pub segments: Vec<Segment>,
    pub stats: SegmentStats,
    /// True when the progress collaborator stopped the sweep early.
    pub cancelled: bool,
    pub width: usize,
    pub height: usize,
    pub elapsed_ms: f64,
}

impl SegmentResult {
    /// Resample every kept segment, concatenated in segment order.
    pub fn fill_points(&self, options: &SegmentOptions) -> Vec<[f32; 2]> {
        self.segments
            .par_iter()
            .flat_map_iter(|segment| segment.fill_points(options))
            .collect()
    }
}

/// Single left-to-right sweep turning classified pixels into segments.
///
/// The factory owns the sliding column buffers and the segment arena for the
/// duration of one [`run`](Self::run). Arena slots are indexed by
/// [`SegmentId`]; a pruned segment leaves an empty slot so ids stay stable.
pub struct SegmentFactory<'a, I: ?Sized, C: ?Sized> {
    image: &'a I,
    classifier: &'a C,
    options: &'a SegmentOptions,
    progress: &'a mut dyn SweepProgress,
    scene: &'a mut dyn SegmentScene,
    width: usize,
    height: usize,
    window: ColumnWindow,
    slots: Vec<Option<Segment>>,
    stats: SegmentStats,
}

impl<'a, I, C> SegmentFactory<'a, I, C>
where
    I: ImageView + ?Sized,
    C: PixelClassifier<I> + ?Sized,
{
    /// Validate inputs and allocate the column buffers.
    pub fn new(
        image: &'a I,
        classifier: &'a C,
        options: &'a SegmentOptions,
        progress: &'a mut dyn SweepProgress,
        scene: &'a mut dyn SegmentScene,
    ) -> Result<Self, TraceError> {
        let width = image.width();
        let height = image.height();
        if width == 0 || height == 0 {
            return Err(TraceError::EmptyImage { width, height });
        }
        options.validate()?;
        Ok(Self {
            image,
            classifier,
            options,
            progress,
            scene,
            width,
            height,
            window: ColumnWindow::new(height),
            slots: Vec::new(),
            stats: SegmentStats::default(),
        })
    }

    pub fn run(mut self) -> SegmentResult {
        let started = Instant::now();

        // The previous column starts out as the all-inactive image border.
        self.load_mask(Some(0), MaskSlot::Curr);
        self.load_mask(Some(1), MaskSlot::Next);

        let mut cancelled = false;
        for x in 0..self.width {
            self.progress.report_progress(x, self.width);
            if self.progress.is_cancelled() {
                debug!("SegmentFactory::make_segments cancelled at column={x}");
                cancelled = true;
                break;
            }

            self.match_runs_to_segments(x);
            self.stats.columns_scanned += 1;

            self.window.scroll();
            self.load_mask(Some(x + 2), MaskSlot::Next);
        }

        if !cancelled {
            if self.options.retire_at_right_edge {
                self.window.reset_current_owner();
                self.retire_segments(self.width);
            }
            self.progress.report_progress(self.width, self.width);
        }

        info!(
            "SegmentFactory::make_segments linesCreated={} linesTooShortSoRemoved={} linesFoldedTogether={}",
            self.stats.lines_created, self.stats.lines_too_short, self.stats.points_folded
        );

        SegmentResult {
            segments: self.slots.into_iter().flatten().collect(),
            stats: self.stats,
            cancelled,
            width: self.width,
            height: self.height,
            elapsed_ms: started.elapsed().as_secs_f64() * 1000.0,
        }
    }

    /// Classify column `x` into the given mask buffer; columns outside the
    /// image read as inactive.
    fn load_mask(&mut self, column: Option<usize>, slot: MaskSlot) {
        let column = column.filter(|&x| x < self.width);
        let (image, classifier) = (self.image, self.classifier);
        let mask = match slot {
            MaskSlot::Curr => self.window.curr_mask_mut(),
            MaskSlot::Next => self.window.next_mask_mut(),
        };
        match column {
            Some(x) => {
                for (y, active) in mask.iter_mut().enumerate() {
                    *active = classifier.is_active(image, x, y);
                }
            }
            None => mask.fill(false),
        }
    }

    fn match_runs_to_segments(&mut self, x: usize) {
        self.window.reset_current_owner();

        let mut cursor = 0;
        while let Some(run) = next_run(self.window.curr_mask(), &mut cursor) {
            self.finish_run(x, run);
        }

        self.retire_segments(x);
    }

    fn finish_run(&mut self, x: usize, run: Run) {
        let rows = run.adjacency(self.height);
        let runs_on_left = count_runs(&self.window.prev_mask()[rows.clone()]);
        let runs_on_right = count_runs(&self.window.next_mask()[rows.clone()]);
        trace!(
            "SegmentFactory::finish_run column={x} rows={}-{} runsOnLeft={runs_on_left} runsOnRight={runs_on_right}",
            run.start,
            run.stop
        );

        // A run touching several runs on either side sits on a branch or a
        // merge; only single-thread paths are traced.
        if runs_on_left > 1 || runs_on_right > 1 {
            self.stats.branch_runs += 1;
            return;
        }

        let owner = left_owner(&self.window.prev_owner()[rows]);
        if owner.count() != runs_on_left {
            self.stats.adjacency_mismatches += 1;
            trace!(
                "SegmentFactory::finish_run column={x} rows={}-{} runsOnLeft={runs_on_left} segmentsOnLeft={}",
                run.start,
                run.stop,
                owner.count()
            );
        }

        let y = run.midpoint();
        let id = match owner {
            LeftOwner::Unowned => self.start_segment(Anchor::new(x, y)),
            LeftOwner::Single(id) => {
                self.extend_segment(id, x, y);
                id
            }
            LeftOwner::Ambiguous(_) => {
                self.stats.branch_runs += 1;
                return;
            }
        };
        self.window.claim(run, id);
    }

    fn start_segment(&mut self, start: Anchor) -> SegmentId {
        let id = SegmentId(self.slots.len());
        self.scene.attach(id, start);
        self.slots.push(Some(Segment::new(id, start)));
        self.stats.segments_started += 1;
        id
    }

    fn extend_segment(&mut self, id: SegmentId, x: usize, y: usize) {
        // Pruned segments never own rows of a later column.
        if let Some(segment) = self.slots.get_mut(id.index()).and_then(Option::as_mut) {
            segment.append_column(x, y);
            self.stats.lines_created += 1;
        }
    }

    /// Finalize every segment of the previous column that did not continue
    /// into column `x`.
    fn retire_segments(&mut self, x: usize) {
        let mut last_seen = None;
        for y in 0..self.height {
            let Some(id) = self.window.prev_owner()[y] else {
                continue;
            };
            // A segment owns one contiguous run per column.
            if last_seen == Some(id) {
                continue;
            }
            last_seen = Some(id);
            self.retire(id, x);
        }
    }

    fn retire(&mut self, id: SegmentId, x: usize) {
        let threshold = self.options.prune_threshold();
        let Some(slot) = self.slots.get_mut(id.index()) else {
            return;
        };
        let Some(segment) = slot.as_mut() else {
            return;
        };
        if segment.last().x >= x {
            // Continued into column x.
            return;
        }

        if segment.length() < threshold {
            self.stats.lines_too_short += segment.line_count();
            self.stats.segments_pruned += 1;
            *slot = None;
            self.scene.detach(id);
        } else {
            segment.remove_unneeded_lines(
                self.options.fold_tolerance_px,
                &mut self.stats.points_folded,
            );
        }
    }
}

#[derive(Clone, Copy)]
enum MaskSlot {
    Curr,
    Next,
}
