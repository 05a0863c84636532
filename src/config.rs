use std::fs;
use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

/// Rendering-quality knobs for the command interpreter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpreterConfig {
    /// Line segments per cubic curve
    pub curve_segments: u32,
    /// Arc segments per pixel of radius
    pub arc_segment_density: f32,
    /// Lower bound on arc segments
    pub min_arc_segments: u32,
    /// Upper bound on arc segments, so huge radii stay cheap to tessellate
    pub max_arc_segments: u32,
    /// Added to circle and ellipse radii so small shapes are not under-filled
    pub circle_radius_bias: i32,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            curve_segments: 22,
            arc_segment_density: 0.5,
            min_arc_segments: 8,
            max_arc_segments: 256,
            circle_radius_bias: 1,
        }
    }
}

impl InterpreterConfig {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("invalid interpreter config")
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("in {}", path.display()))
    }

    /// Segment count for an arc of `radius` pixels
    pub fn arc_segments(&self, radius: f32) -> u32 {
        let scaled = (radius.abs() * self.arc_segment_density) as u32;
        scaled
            .min(self.max_arc_segments)
            .max(self.min_arc_segments)
            .max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = InterpreterConfig::from_json(r#"{ "curve_segments": 40 }"#).unwrap();
        assert_eq!(config.curve_segments, 40);
        assert_eq!(config.min_arc_segments, 8);
        assert_eq!(config.circle_radius_bias, 1);
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(InterpreterConfig::from_json("{ curve_segments: }").is_err());
    }

    #[test]
    fn test_arc_segments_scale_with_radius() {
        let config = InterpreterConfig::default();
        assert_eq!(config.arc_segments(4.0), 8);
        assert_eq!(config.arc_segments(100.0), 50);
        assert!(config.arc_segments(200.0) > config.arc_segments(100.0));
    }

    #[test]
    fn test_arc_segments_capped_for_huge_radius() {
        let config = InterpreterConfig::default();
        assert_eq!(config.arc_segments(1.0e9), 256);
        assert_eq!(config.arc_segments(f32::INFINITY), 256);
        assert_eq!(config.arc_segments(f32::NAN), 8);
    }

    #[test]
    fn test_minimum_wins_over_inverted_cap() {
        let config = InterpreterConfig {
            min_arc_segments: 16,
            max_arc_segments: 4,
            ..InterpreterConfig::default()
        };
        assert_eq!(config.arc_segments(1.0e6), 16);
    }
}
