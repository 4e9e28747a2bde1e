use crate::classify::ThresholdClassifier;
use crate::segments::SegmentOptions;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct SegmentToolConfig {
    #[serde(rename = "input")]
    pub input: PathBuf,
    #[serde(default)]
    pub classifier: ThresholdClassifier,
    #[serde(default)]
    pub segments: SegmentOptions,
    pub output: SegmentOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct SegmentOutputConfig {
    #[serde(rename = "segments_json")]
    pub segments_json: PathBuf,
    /// Evenly spaced points resampled from every kept segment.
    #[serde(default)]
    pub points_json: Option<PathBuf>,
    /// Source image with the traced segments drawn on top.
    #[serde(default)]
    pub overlay_image: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<SegmentToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&data).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

fn parse_config(data: &str) -> Result<SegmentToolConfig, serde_json::Error> {
    serde_json::from_str(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Polarity;

    #[test]
    fn minimal_config_uses_defaults() {
        let config = parse_config(
            r#"{ "input": "plot.png", "output": { "segments_json": "out/segments.json" } }"#,
        )
        .unwrap();
        assert_eq!(config.input, PathBuf::from("plot.png"));
        assert_eq!(config.classifier, ThresholdClassifier::default());
        assert_eq!(config.segments, SegmentOptions::default());
        assert!(config.output.points_json.is_none());
    }

    #[test]
    fn sections_override_defaults() {
        let config = parse_config(
            r#"{
                "input": "plot.png",
                "classifier": { "threshold": 60, "polarity": "light" },
                "segments": { "min_length": 4, "point_separation": 5.0 },
                "output": { "segments_json": "s.json", "overlay_image": "o.png" }
            }"#,
        )
        .unwrap();
        assert_eq!(config.classifier.threshold, 60);
        assert_eq!(config.classifier.polarity, Polarity::Light);
        assert_eq!(config.segments.min_length, 4);
        assert_eq!(config.segments.prune_threshold(), 15.0);
        assert_eq!(config.output.overlay_image, Some(PathBuf::from("o.png")));
    }
}
