//! View-side configuration
//!
//! All values are tunable per deployment; the defaults are the ones the
//! system ships with, not normative behavior.

use serde::{Deserialize, Serialize};

/// Scale factors and thresholds for gesture interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureConfig {
    /// Screen-pixel to rotation-degree factor for single-finger drags.
    /// Multiplied by `density / 3.0` at interpreter construction so
    /// behavior matches across screen resolutions.
    pub drag_factor: f32,
    /// Screen-pixel factor for two-finger drags.
    pub multi_drag_factor: f32,
    /// Pinch scale-delta to camera Z translation factor.
    pub zoom_factor: f32,
    /// Two-finger drag pans the camera when false (the default); when
    /// true it instead rotates the object in place about the camera's
    /// axes.
    pub multi_drag_rotates_object: bool,
    /// Maximum gap between taps recognized as a double-tap.
    pub double_tap_window_ms: u64,
    /// Maximum distance in pixels between taps of a double-tap.
    pub double_tap_slop_px: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            drag_factor: 0.08,
            multi_drag_factor: 0.1,
            zoom_factor: 3.0,
            multi_drag_rotates_object: false,
            double_tap_window_ms: 350,
            double_tap_slop_px: 64.0,
        }
    }
}

/// Configuration for the viewing side of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    pub gesture: GestureConfig,
    /// How far behind the origin the camera starts, along -Z.
    pub default_camera_distance: f32,
    /// Point primitive size handed to the draw routine.
    pub point_size: f32,
    /// Full-deflection camera translation per render tick for
    /// continuous-speed input.
    pub max_speed_per_frame: f32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            gesture: GestureConfig::default(),
            default_camera_distance: 10.0,
            point_size: 10.0,
            max_speed_per_frame: 0.07,
        }
    }
}
