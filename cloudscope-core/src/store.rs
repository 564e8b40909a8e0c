//! Double-buffered frame store
//!
//! The producer decodes into a back buffer it owns privately, outside any
//! lock, then publishes it here; only the O(1) reference swap and the
//! render pass's read run under the store's single mutex. Holding the
//! lock for the whole read closure keeps a swap from starting while a
//! draw is mid-flight.

use crate::frame::PointCloudFrame;
use std::sync::Mutex;

#[derive(Debug, Default)]
struct FrontSlot {
    frame: PointCloudFrame,
    published: u64,
}

/// The render-visible side of the producer/consumer frame hand-off.
#[derive(Debug, Default)]
pub struct FrameStore {
    front: Mutex<FrontSlot>,
}

impl FrameStore {
    /// Create an empty store. Before the first publish, readers see an
    /// empty frame rather than an error.
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap the writer's back buffer with the front buffer. No data is
    /// copied; the previous front frame lands in `back` for reuse by the
    /// next decode.
    pub fn publish(&self, back: &mut PointCloudFrame) {
        let mut slot = self.front.lock().expect("frame store lock poisoned");
        std::mem::swap(&mut slot.frame, back);
        slot.published += 1;
    }

    /// Run `f` against the current front frame. The store lock is held
    /// for the duration of the closure, so the frame cannot be swapped
    /// out underneath a render pass.
    pub fn with_front<R>(&self, f: impl FnOnce(&PointCloudFrame) -> R) -> R {
        let slot = self.front.lock().expect("frame store lock poisoned");
        f(&slot.frame)
    }

    /// How many frames have ever been published.
    pub fn frame_count(&self) -> u64 {
        self.front.lock().expect("frame store lock poisoned").published
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn uniform_frame(value: f32, points: usize) -> PointCloudFrame {
        let mut frame = PointCloudFrame::new();
        for _ in 0..points {
            frame.push_point(value, value, value, [value, value, value, 1.0]);
        }
        frame
    }

    #[test]
    fn empty_store_reads_empty_frame() {
        let store = FrameStore::new();
        assert_eq!(store.frame_count(), 0);
        store.with_front(|frame| {
            assert!(frame.is_empty());
        });
    }

    #[test]
    fn publish_swaps_front_and_back() {
        let store = FrameStore::new();
        let mut back = uniform_frame(1.0, 4);

        store.publish(&mut back);
        assert!(back.is_empty()); // got the old (empty) front for reuse
        store.with_front(|frame| assert_eq!(frame.len(), 4));

        back = uniform_frame(2.0, 8);
        store.publish(&mut back);
        assert_eq!(back.len(), 4); // previous front came back
        store.with_front(|frame| {
            assert_eq!(frame.len(), 8);
            assert_eq!(frame.positions()[0], 2.0);
        });
        assert_eq!(store.frame_count(), 2);
    }

    #[test]
    fn readers_never_observe_mixed_frames() {
        // Each published frame is internally uniform; a reader seeing two
        // different values in one frame would prove a torn swap.
        let store = Arc::new(FrameStore::new());
        let writer_store = store.clone();

        let writer = thread::spawn(move || {
            let mut back = PointCloudFrame::new();
            for i in 1..200u32 {
                back.clear();
                let value = i as f32;
                for _ in 0..50 {
                    back.push_point(value, value, value, [1.0, 1.0, 1.0, 1.0]);
                }
                writer_store.publish(&mut back);
            }
        });

        let reader = thread::spawn(move || {
            for _ in 0..500 {
                store.with_front(|frame| {
                    let positions = frame.positions();
                    if let Some(&first) = positions.first() {
                        assert!(positions.iter().all(|&v| v == first));
                        assert_eq!(frame.len(), 50);
                    }
                });
            }
        });

        writer.join().unwrap();
        reader.join().unwrap();
    }
}
