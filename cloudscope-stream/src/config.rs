//! Decoder configuration

use serde::{Deserialize, Serialize};

/// Calibration range for intensity-mode color mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntensityRange {
    pub min: f32,
    pub max: f32,
}

impl IntensityRange {
    /// Remap an intensity reading linearly into [0, 1], clamped at the
    /// calibration bounds.
    pub fn normalize(&self, value: f32) -> f32 {
        let span = self.max - self.min;
        if span <= f32::EPSILON {
            return 0.0;
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }
}

impl Default for IntensityRange {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 3700.0,
        }
    }
}

/// Configuration for the streaming side of the pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StreamConfig {
    pub intensity_range: IntensityRange,
}
