//! Binary point-cloud decoder
//!
//! Decodes one message at a time into a privately-owned back buffer and
//! publishes the result to the shared [`FrameStore`]. All validation
//! happens before the back buffer is touched; a frame either decodes
//! completely and swaps in, or is dropped wholesale.

use crate::config::StreamConfig;
use crate::msg::{datatype, PointCloudMessage};
use byteorder::{LittleEndian, ReadBytesExt};
use cloudscope_core::{Error, FrameStore, PointCloudFrame, Result, Vector3};
use log::debug;
use std::io::Cursor;
use std::sync::Arc;
use std::time::Instant;

/// How the color payload of each point record is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColorMode {
    /// Packed color channel: three bytes in B, G, R source order.
    PackedBgr,
    /// Single trailing float remapped through the intensity calibration.
    Intensity,
}

/// Streaming decoder that writes into the frame store's back buffer.
pub struct CloudDecoder {
    store: Arc<FrameStore>,
    back: PointCloudFrame,
    config: StreamConfig,
}

impl CloudDecoder {
    /// Create a decoder publishing into `store` with default calibration.
    pub fn new(store: Arc<FrameStore>) -> Self {
        Self::with_config(store, StreamConfig::default())
    }

    /// Create a decoder with explicit configuration.
    pub fn with_config(store: Arc<FrameStore>, config: StreamConfig) -> Self {
        Self {
            store,
            back: PointCloudFrame::new(),
            config,
        }
    }

    /// Decode one message, publish the resulting frame, and return the
    /// cloud's centroid (mean position).
    ///
    /// On error the previously published frame stays visible and the
    /// message is dropped; nothing is partially applied.
    pub fn ingest(&mut self, msg: &PointCloudMessage) -> Result<Vector3<f32>> {
        let mode = Self::validate(msg)?;
        let num_points = msg.point_count();

        let started = Instant::now();
        self.back.clear();
        self.back.reserve_points(num_points);
        self.back.set_frame_id(&msg.frame_id);

        let mut centroid = Vector3::zeros();
        let mut cursor = Cursor::new(msg.data.as_slice());

        for _ in 0..num_points {
            let record_begin = cursor.position();
            let record_end = record_begin + u64::from(msg.point_step);
            if record_end > msg.data.len() as u64 {
                self.back.clear();
                return Err(Error::MalformedFrame(format!(
                    "data truncated: point record ends at byte {} of {}",
                    record_end,
                    msg.data.len()
                )));
            }

            let x = read_f32(&mut cursor)?;
            let y = read_f32(&mut cursor)?;
            let z = read_f32(&mut cursor)?;
            centroid += Vector3::new(x, y, z);

            // One float reserved for padding/index between XYZ and color.
            read_f32(&mut cursor)?;

            let color = match mode {
                ColorMode::PackedBgr => {
                    let b = f32::from(read_u8(&mut cursor)?) / 255.0;
                    let g = f32::from(read_u8(&mut cursor)?) / 255.0;
                    let r = f32::from(read_u8(&mut cursor)?) / 255.0;
                    [r, g, b, 1.0]
                }
                ColorMode::Intensity => {
                    let intensity = self.config.intensity_range.normalize(read_f32(&mut cursor)?);
                    [intensity, intensity, intensity, 1.0]
                }
            };

            self.back.push_point(x, y, z, color);

            // Skip whatever the declared stride carries beyond the fields
            // understood here.
            if cursor.position() > record_end {
                self.back.clear();
                return Err(Error::MalformedFrame(format!(
                    "point step {} is narrower than the declared fields",
                    msg.point_step
                )));
            }
            cursor.set_position(record_end);
        }

        if num_points > 0 {
            centroid /= num_points as f32;
        }

        self.store.publish(&mut self.back);
        debug!(
            "decoded {} points ({:?} mode) from '{}' in {:?}",
            num_points,
            mode,
            msg.frame_id,
            started.elapsed()
        );
        Ok(centroid)
    }

    /// Check the message layout contract and pick the color mode.
    fn validate(msg: &PointCloudMessage) -> Result<ColorMode> {
        if msg.height != 1 {
            return Err(Error::MalformedFrame(format!(
                "unsupported height {}: only unordered single-row clouds are supported",
                msg.height
            )));
        }
        if msg.fields.len() < 4 {
            return Err(Error::MalformedFrame(format!(
                "expected at least 4 declared fields, got {}",
                msg.fields.len()
            )));
        }
        for field in &msg.fields[..3] {
            if field.datatype != datatype::FLOAT32 {
                return Err(Error::MalformedFrame(format!(
                    "field '{}' has datatype {}, expected FLOAT32 x/y/z",
                    field.name, field.datatype
                )));
            }
        }

        let mode = match msg.fields[3].name.as_str() {
            "rgb" | "rgba" => ColorMode::PackedBgr,
            _ => ColorMode::Intensity,
        };
        debug!(
            "color mode for '{}': {:?} (fourth field '{}')",
            msg.frame_id, mode, msg.fields[3].name
        );
        Ok(mode)
    }
}

fn read_f32(cursor: &mut Cursor<&[u8]>) -> Result<f32> {
    cursor
        .read_f32::<LittleEndian>()
        .map_err(|_| Error::MalformedFrame("data truncated inside point record".to_string()))
}

fn read_u8(cursor: &mut Cursor<&[u8]>) -> Result<u8> {
    cursor
        .read_u8()
        .map_err(|_| Error::MalformedFrame("data truncated inside point record".to_string()))
}
