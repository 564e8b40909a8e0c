//! Render-tick glue
//!
//! Ties the shared frame store, the controller, and the gesture
//! interpreter together and exposes the one call the host's draw
//! scheduler makes per display refresh.

use crate::config::ViewConfig;
use crate::controller::SceneController;
use crate::gesture::{GestureInterpreter, TouchEvent};
use cloudscope_core::{FrameStore, PointCloudFrame, Transform, Vector3};
use std::sync::Arc;

/// One visualized point-cloud stream: shared frame store plus the view
/// state the user manipulates.
pub struct PointCloudScene {
    store: Arc<FrameStore>,
    controller: SceneController,
    gestures: GestureInterpreter,
    point_size: f32,
}

impl PointCloudScene {
    /// Create a scene reading frames from `store`. `density` is the host
    /// display's density factor, used to scale gesture sensitivity.
    pub fn new(store: Arc<FrameStore>, config: ViewConfig, density: f32) -> Self {
        Self {
            store,
            controller: SceneController::new(&config),
            gestures: GestureInterpreter::new(config.gesture, density),
            point_size: config.point_size,
        }
    }

    /// The camera/object controller, for host-driven input such as
    /// joystick speed sliders.
    pub fn controller(&self) -> &SceneController {
        &self.controller
    }

    /// Mutable access to the controller.
    pub fn controller_mut(&mut self) -> &mut SceneController {
        &mut self.controller
    }

    /// Forward a touch event from the host UI layer.
    pub fn handle_touch(&mut self, event: &TouchEvent) {
        self.gestures.handle(event, &mut self.controller);
    }

    /// Re-base the rotation pivot onto a freshly decoded centroid.
    pub fn apply_centroid(&mut self, centroid: Vector3<f32>) {
        self.controller.set_origin(centroid);
    }

    /// Point primitive size for the draw routine.
    pub fn point_size(&self) -> f32 {
        self.point_size
    }

    /// Run one display tick: apply continuous camera speed, derive the
    /// eye matrix, and hand the draw routine the current front frame
    /// with the eye and object transforms. The frame store lock is held
    /// for the duration of `draw`, so the producer cannot swap buffers
    /// mid-pass. Before any frame has been decoded, `draw` sees an empty
    /// frame.
    pub fn render_with<R>(
        &mut self,
        draw: impl FnOnce(&PointCloudFrame, &Transform, &Transform) -> R,
    ) -> R {
        self.controller.on_render_tick();
        let eye = self.controller.eye_matrix();
        let object = *self.controller.object();
        self.store.with_front(|frame| draw(frame, &eye, &object))
    }
}
