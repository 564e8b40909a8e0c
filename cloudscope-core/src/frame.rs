//! Decoded point-cloud frame buffers

use serde::{Deserialize, Serialize};

/// One decoded point-cloud snapshot: flat position and color buffers plus
/// the source coordinate-frame identifier.
///
/// Invariant: `positions.len() == 3 * len()` and
/// `colors.len() == 4 * len()`. The buffers only grow; clearing keeps the
/// allocation so steady-state decoding reuses storage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PointCloudFrame {
    positions: Vec<f32>,
    colors: Vec<f32>,
    frame_id: String,
}

impl PointCloudFrame {
    /// Create a new empty frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a frame with buffer capacity for `points` points.
    pub fn with_capacity(points: usize) -> Self {
        Self {
            positions: Vec::with_capacity(points * 3),
            colors: Vec::with_capacity(points * 4),
            frame_id: String::new(),
        }
    }

    /// The number of points in the frame.
    pub fn len(&self) -> usize {
        self.positions.len() / 3
    }

    /// Check if the frame has no points.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Flat `[x, y, z, ...]` position buffer, 3 floats per point.
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Flat `[r, g, b, a, ...]` color buffer in [0, 1], 4 floats per point.
    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    /// The source coordinate-frame identifier.
    pub fn frame_id(&self) -> &str {
        &self.frame_id
    }

    /// Set the source coordinate-frame identifier.
    pub fn set_frame_id(&mut self, frame_id: &str) {
        self.frame_id.clear();
        self.frame_id.push_str(frame_id);
    }

    /// Append one point with its RGBA color.
    pub fn push_point(&mut self, x: f32, y: f32, z: f32, color: [f32; 4]) {
        self.positions.extend_from_slice(&[x, y, z]);
        self.colors.extend_from_slice(&color);
    }

    /// Drop all points but keep the allocated capacity.
    pub fn clear(&mut self) {
        self.positions.clear();
        self.colors.clear();
        self.frame_id.clear();
    }

    /// Make sure the buffers can hold `points` points, reallocating only
    /// when the existing capacity is insufficient.
    pub fn reserve_points(&mut self, points: usize) {
        let want = points * 3;
        if self.positions.capacity() < want {
            self.positions.reserve(want - self.positions.len());
        }
        let want = points * 4;
        if self.colors.capacity() < want {
            self.colors.reserve(want - self.colors.len());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_maintains_buffer_ratio() {
        let mut frame = PointCloudFrame::new();
        frame.push_point(1.0, 2.0, 3.0, [0.5, 0.5, 0.5, 1.0]);
        frame.push_point(4.0, 5.0, 6.0, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(frame.len(), 2);
        assert_eq!(frame.positions().len(), 6);
        assert_eq!(frame.colors().len(), 8);
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut frame = PointCloudFrame::with_capacity(16);
        for i in 0..16 {
            frame.push_point(i as f32, 0.0, 0.0, [0.0, 0.0, 0.0, 1.0]);
        }
        let cap = frame.positions.capacity();
        frame.clear();
        assert!(frame.is_empty());
        assert_eq!(frame.positions.capacity(), cap);
    }

    #[test]
    fn reserve_points_only_grows() {
        let mut frame = PointCloudFrame::with_capacity(8);
        let cap = frame.positions.capacity();
        frame.reserve_points(4);
        assert_eq!(frame.positions.capacity(), cap);
        frame.reserve_points(64);
        assert!(frame.positions.capacity() >= 64 * 3);
        assert!(frame.colors.capacity() >= 64 * 4);
    }
}
