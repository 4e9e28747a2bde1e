use std::sync::atomic::{AtomicBool, Ordering};

/// Per-column progress notification and cooperative cancellation.
///
/// The sweep calls [`report_progress`](Self::report_progress) before each
/// column and then polls [`is_cancelled`](Self::is_cancelled). A cancelled
/// sweep keeps everything retired so far and stops before the polled column.
pub trait SweepProgress {
    fn report_progress(&mut self, _column: usize, _width: usize) {}

    fn is_cancelled(&self) -> bool {
        false
    }
}

impl SweepProgress for () {}

/// Cancellation flag shared with another thread.
impl SweepProgress for &AtomicBool {
    fn is_cancelled(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

/// Cancels the sweep once the given column is reached.
#[derive(Clone, Copy, Debug)]
pub struct CancelAt {
    column: usize,
    reached: bool,
}

impl CancelAt {
    pub fn new(column: usize) -> Self {
        Self {
            column,
            reached: false,
        }
    }
}

impl SweepProgress for CancelAt {
    fn report_progress(&mut self, column: usize, _width: usize) {
        self.reached = column >= self.column;
    }

    fn is_cancelled(&self) -> bool {
        self.reached
    }
}

/// Logs sweep progress at debug level every `step` columns.
#[derive(Clone, Copy, Debug)]
pub struct LogProgress {
    step: usize,
}

impl LogProgress {
    pub fn every(step: usize) -> Self {
        Self { step: step.max(1) }
    }
}

impl SweepProgress for LogProgress {
    fn report_progress(&mut self, column: usize, width: usize) {
        if column % self.step == 0 || column == width {
            log::debug!("SegmentFactory::make_segments column={column}/{width}");
        }
    }
}
