//! Incoming point-cloud message model
//!
//! Mirrors the surface of a sensor_msgs/PointCloud2 message that the
//! decoder actually consumes: dimensions, strides, the ordered field
//! layout, and the raw byte payload.

use serde::{Deserialize, Serialize};

/// Field datatype codes, matching sensor_msgs/PointField.
pub mod datatype {
    pub const INT8: u8 = 1;
    pub const UINT8: u8 = 2;
    pub const INT16: u8 = 3;
    pub const UINT16: u8 = 4;
    pub const INT32: u8 = 5;
    pub const UINT32: u8 = 6;
    pub const FLOAT32: u8 = 7;
    pub const FLOAT64: u8 = 8;
}

/// One entry of a message's declared field layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointField {
    pub name: String,
    pub datatype: u8,
    pub offset: u32,
}

impl PointField {
    pub fn new(name: &str, datatype: u8, offset: u32) -> Self {
        Self {
            name: name.to_string(),
            datatype,
            offset,
        }
    }
}

/// A raw point-cloud message as delivered by the transport layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointCloudMessage {
    /// Source coordinate-frame identifier.
    pub frame_id: String,
    /// Number of rows; only unordered single-row clouds (height 1) are
    /// supported by the decoder.
    pub height: u32,
    /// Bytes per point record.
    pub point_step: u32,
    /// Bytes per row; `row_step / point_step` gives the point count.
    pub row_step: u32,
    /// Ordered field layout of each point record.
    pub fields: Vec<PointField>,
    /// Raw little-endian point records.
    pub data: Vec<u8>,
}

impl PointCloudMessage {
    /// Build an unordered (height 1) message; `row_step` is derived from
    /// the payload length.
    pub fn unordered(
        frame_id: &str,
        fields: Vec<PointField>,
        point_step: u32,
        data: Vec<u8>,
    ) -> Self {
        Self {
            frame_id: frame_id.to_string(),
            height: 1,
            point_step,
            row_step: data.len() as u32,
            fields,
            data,
        }
    }

    /// The number of point records declared by the strides.
    pub fn point_count(&self) -> usize {
        if self.point_step == 0 {
            0
        } else {
            (self.row_step / self.point_step) as usize
        }
    }
}
