use serde::{Deserialize, Serialize};

use crate::error::TraceError;

/// Thresholds steering pruning, folding and resampling of traced segments.
///
/// - `min_length`: minimum number of resampled points a segment must
///   support. Retired segments shorter than `(min_length - 1) *
///   point_separation` are discarded.
/// - `point_separation`: distance in pixels between resampled points.
/// - `fold_tolerance_px`: how far an interior anchor may sit from the chord of
///   its neighbours and still be folded away.
/// - `retire_at_right_edge`: also retire the segments still open after the
///   last column. Off by default: segments reaching the right image border
///   are returned exactly as traced.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentOptions {
    pub min_length: usize,
    pub point_separation: f32,
    pub fold_tolerance_px: f32,
    pub retire_at_right_edge: bool,
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self {
            min_length: 2,
            point_separation: 10.0,
            fold_tolerance_px: 0.5,
            retire_at_right_edge: false,
        }
    }
}

impl SegmentOptions {
    /// Length below which a retired segment is discarded.
    pub fn prune_threshold(&self) -> f32 {
        self.min_length.saturating_sub(1) as f32 * self.point_separation
    }

    pub fn validate(&self) -> Result<(), TraceError> {
        if self.min_length == 0 {
            return Err(TraceError::InvalidOptions("min_length must be at least 1"));
        }
        if !self.point_separation.is_finite() || self.point_separation <= 0.0 {
            return Err(TraceError::InvalidOptions(
                "point_separation must be finite and positive",
            ));
        }
        if !self.fold_tolerance_px.is_finite() || self.fold_tolerance_px < 0.0 {
            return Err(TraceError::InvalidOptions(
                "fold_tolerance_px must be finite and non-negative",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prune_threshold_scales_with_separation() {
        let options = SegmentOptions {
            min_length: 4,
            point_separation: 2.5,
            ..SegmentOptions::default()
        };
        assert_eq!(options.prune_threshold(), 7.5);
    }

    #[test]
    fn validate_rejects_degenerate_values() {
        let zero_len = SegmentOptions {
            min_length: 0,
            ..SegmentOptions::default()
        };
        assert!(zero_len.validate().is_err());

        let nan_sep = SegmentOptions {
            point_separation: f32::NAN,
            ..SegmentOptions::default()
        };
        assert!(nan_sep.validate().is_err());

        assert!(SegmentOptions::default().validate().is_ok());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let options: SegmentOptions = serde_json::from_str(r#"{ "min_length": 5 }"#).unwrap();
        assert_eq!(options.min_length, 5);
        assert_eq!(options.point_separation, SegmentOptions::default().point_separation);
        assert!(!options.retire_at_right_edge);
    }
}
