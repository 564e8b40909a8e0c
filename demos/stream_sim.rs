//! End-to-end pipeline demo
//!
//! Simulates a lidar feed on a producer thread, decodes each message
//! into the shared frame store, drives the view with scripted touch
//! gestures, and "renders" by printing frame and camera state once per
//! tick. Run with `RUST_LOG=debug` to see the decoder's log lines.

use byteorder::{LittleEndian, WriteBytesExt};
use cloudscope_core::FrameStore;
use cloudscope_stream::{datatype, CloudDecoder, PointCloudMessage, PointField};
use cloudscope_view::{PointCloudScene, TouchAction, TouchEvent, TouchPoint, ViewConfig};
use log::info;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Build one simulated sweep: a ring of points whose intensity varies
/// along the circumference.
fn sweep_message(tick: usize) -> PointCloudMessage {
    let fields = vec![
        PointField::new("x", datatype::FLOAT32, 0),
        PointField::new("y", datatype::FLOAT32, 4),
        PointField::new("z", datatype::FLOAT32, 8),
        PointField::new("index", datatype::FLOAT32, 12),
        PointField::new("intensity", datatype::FLOAT32, 16),
    ];

    let mut data = Vec::new();
    let n = 360;
    for i in 0..n {
        let theta = (i as f32 + tick as f32) * std::f32::consts::TAU / n as f32;
        data.write_f32::<LittleEndian>(3.0 * theta.cos()).unwrap();
        data.write_f32::<LittleEndian>(0.2 * (tick as f32 * 0.1).sin()).unwrap();
        data.write_f32::<LittleEndian>(3.0 * theta.sin()).unwrap();
        data.write_f32::<LittleEndian>(i as f32).unwrap();
        data.write_f32::<LittleEndian>(3700.0 * (i as f32 / n as f32)).unwrap();
    }
    PointCloudMessage::unordered("lidar_link", fields, 20, data)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let store = Arc::new(FrameStore::new());
    let mut decoder = CloudDecoder::new(store.clone());
    let mut scene = PointCloudScene::new(store, ViewConfig::default(), 3.0);

    // Producer: decode a sweep every few milliseconds and report the
    // centroid back over a channel, like a subscription callback would.
    let (centroid_tx, centroid_rx) = mpsc::channel();
    let producer = thread::spawn(move || {
        for tick in 0..60 {
            let msg = sweep_message(tick);
            match decoder.ingest(&msg) {
                Ok(centroid) => centroid_tx.send(centroid).expect("consumer gone"),
                Err(e) => log::warn!("dropping frame: {e}"),
            }
            thread::sleep(Duration::from_millis(5));
        }
    });

    // Scripted interaction: a one-finger drag, then a two-finger spread.
    let gestures = [
        TouchEvent::new(TouchAction::Down, vec![TouchPoint::new(200.0, 200.0)], 0),
        TouchEvent::new(TouchAction::Move, vec![TouchPoint::new(260.0, 180.0)], 16),
        TouchEvent::new(TouchAction::Up, vec![], 32),
        TouchEvent::new(
            TouchAction::Down,
            vec![TouchPoint::new(150.0, 200.0), TouchPoint::new(250.0, 200.0)],
            500,
        ),
        TouchEvent::new(
            TouchAction::Move,
            vec![TouchPoint::new(100.0, 200.0), TouchPoint::new(300.0, 200.0)],
            516,
        ),
        TouchEvent::new(TouchAction::Up, vec![], 532),
    ];
    let mut gestures = gestures.into_iter();

    // Render loop: one tick per "display refresh".
    for tick in 0..120 {
        while let Ok(centroid) = centroid_rx.try_recv() {
            scene.apply_centroid(centroid);
        }
        if tick % 20 == 10 {
            if let Some(event) = gestures.next() {
                scene.handle_touch(&event);
            }
        }

        scene.render_with(|frame, eye, object| {
            if tick % 30 == 0 {
                let camera_in_view = eye.transform_point(&object.position());
                println!(
                    "tick {tick:3}: {} points from '{}', object at {:.2?} in view space",
                    frame.len(),
                    frame.frame_id(),
                    camera_in_view
                );
            }
        });
        thread::sleep(Duration::from_millis(4));
    }

    producer.join().expect("producer panicked");
    info!("stream finished");

    let camera = scene.controller().camera().position();
    println!(
        "final camera position: ({:.3}, {:.3}, {:.3})",
        camera.x, camera.y, camera.z
    );
    Ok(())
}
