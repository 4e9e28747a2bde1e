//! Diagnostics data model exposed by the tracer and its tools.
//!
//! `SegmentStats` is returned with every sweep; `TraceReport` bundles it with
//! segment geometry and timings for JSON output.

pub mod report;
pub mod segments;
pub mod timing;

pub use report::{InputDescriptor, OptionsDescriptor, TraceReport};
pub use segments::{SegmentDescriptor, SegmentStats};
pub use timing::{StageTiming, TimingBreakdown};
