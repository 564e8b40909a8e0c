//! Camera and object pose controller
//!
//! Owns the camera and object transforms and every operation that
//! mutates them: direct translation/rotation, joystick-style continuous
//! speed, origin re-basing, and rotation of the object about the
//! *camera's* axes. The latter is the delicate one: the camera axis must
//! be re-expressed in the object's local frame through composition and
//! inversion on every call, because both poses drift between calls.

use crate::config::ViewConfig;
use cloudscope_core::{Transform, Vector3};
use log::debug;

/// A camera basis axis, used for axis-relative object rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraAxis {
    X,
    Y,
    Z,
}

impl CameraAxis {
    fn unit(self) -> Vector3<f32> {
        match self {
            CameraAxis::X => Vector3::x(),
            CameraAxis::Y => Vector3::y(),
            CameraAxis::Z => Vector3::z(),
        }
    }
}

/// Owns and mutates the camera and object transforms.
#[derive(Debug, Clone)]
pub struct SceneController {
    camera: Transform,
    object: Transform,
    origin: Vector3<f32>,
    camera_speed: Vector3<f32>,
    max_speed: f32,
}

impl SceneController {
    /// Create a controller with the camera placed
    /// `config.default_camera_distance` behind the origin along -Z,
    /// looking toward +Z.
    pub fn new(config: &ViewConfig) -> Self {
        let mut camera = Transform::identity();
        camera.translate(0.0, 0.0, -config.default_camera_distance);
        Self {
            camera,
            object: Transform::identity(),
            origin: Vector3::zeros(),
            camera_speed: Vector3::zeros(),
            max_speed: config.max_speed_per_frame,
        }
    }

    /// The camera transform.
    pub fn camera(&self) -> &Transform {
        &self.camera
    }

    /// The object (point cloud) transform.
    pub fn object(&self) -> &Transform {
        &self.object
    }

    /// The current rotation origin (the cloud's centroid).
    pub fn origin(&self) -> Vector3<f32> {
        self.origin
    }

    /// Move the camera along its own axes.
    pub fn translate_camera(&mut self, delta: &Vector3<f32>) {
        self.camera.translate_vec(delta);
    }

    /// Rotate the camera about its own X axis, in degrees.
    pub fn rotate_camera_x(&mut self, angle_deg: f32) {
        self.camera.rotate_x(angle_deg);
    }

    /// Rotate the camera about its own Y axis, in degrees.
    pub fn rotate_camera_y(&mut self, angle_deg: f32) {
        self.camera.rotate_y(angle_deg);
    }

    /// Rotate the camera about its own Z axis, in degrees.
    pub fn rotate_camera_z(&mut self, angle_deg: f32) {
        self.camera.rotate_z(angle_deg);
    }

    /// Move the object along its own axes.
    pub fn translate_object(&mut self, delta: &Vector3<f32>) {
        self.object.translate_vec(delta);
    }

    /// Rotate the object about an axis in its own frame, in degrees.
    pub fn rotate_object(&mut self, angle_deg: f32, axis: &Vector3<f32>) {
        self.object.rotate_about(angle_deg, axis);
    }

    /// Re-base the object's rotation pivot. The previous origin offset
    /// is composed out and the new one composed in, so the cloud does
    /// not visibly jump.
    pub fn set_origin(&mut self, origin: Vector3<f32>) {
        self.object.translate_vec(&self.origin);
        self.origin = origin;
        self.object.translate_vec(&-origin);
    }

    /// Set the camera translation applied on every render tick, as a
    /// fraction of the configured per-tick maximum. A zero vector halts
    /// continuous motion.
    ///
    /// All three components use the same sign convention: positive steps
    /// move along the camera's positive axes. (Historical builds negated
    /// the X component; see DESIGN.md.)
    pub fn set_camera_speed(&mut self, steps: &Vector3<f32>) {
        self.camera_speed = steps * self.max_speed;
        debug!("camera speed set to {:?}", self.camera_speed);
    }

    /// Apply the continuous camera speed for one render tick.
    pub fn on_render_tick(&mut self) {
        if self.camera_speed != Vector3::zeros() {
            let speed = self.camera_speed;
            self.camera.translate_vec(&speed);
        }
    }

    /// Rotate the object about one of the *camera's* basis axes while
    /// keeping it in place.
    ///
    /// The requested unit axis is carried into the object's local frame
    /// through the inverse of `eye ∘ object`, then the object rotates
    /// about that derived axis. Seen from the viewer, the object spins
    /// about the viewer's own right/up/forward direction no matter how
    /// either pose is currently oriented.
    pub fn rotate_object_about_camera_axis(&mut self, axis: CameraAxis, angle_deg: f32) {
        let eye = self.eye_matrix();
        let composite = eye.compose(&self.object); // object frame -> eye frame
        let derived_axis = composite.inverse().transform_vector(&axis.unit());
        self.object.rotate_about(angle_deg, &derived_axis);
    }

    /// Return camera and object to identity, keeping the cloud's
    /// centroid visually centered by re-applying the negated origin.
    pub fn reset_view(&mut self) {
        self.camera.set_identity();
        self.object.set_identity();
        self.object.translate_vec(&-self.origin);
        debug!("view reset, origin {:?}", self.origin);
    }

    /// Derive the look-at view transform from the camera pose: eye at
    /// the camera position, looking one unit ahead along the camera's
    /// normalized Z basis, with its normalized Y basis up. Recomputed on
    /// every render tick rather than cached.
    pub fn eye_matrix(&self) -> Transform {
        let eye = self.camera.position();
        let target = eye + self.camera.axis_z_normalized();
        Transform::look_at(&eye, &target, &self.camera.axis_y_normalized())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cloudscope_core::{Matrix4, Point3};

    fn controller() -> SceneController {
        SceneController::new(&ViewConfig::default())
    }

    fn assert_transforms_close(a: &Transform, b: &Transform, epsilon: f32) {
        for i in 0..4 {
            for j in 0..4 {
                assert_relative_eq!(a.matrix[(i, j)], b.matrix[(i, j)], epsilon = epsilon);
            }
        }
    }

    #[test]
    fn camera_starts_behind_origin() {
        let c = controller();
        assert_relative_eq!(c.camera().position(), Point3::new(0.0, 0.0, -10.0));
        assert_relative_eq!(c.camera().axis_z(), Vector3::z());
    }

    #[test]
    fn camera_speed_applies_per_tick_without_axis_inversion() {
        let mut c = controller();
        c.set_camera_speed(&Vector3::new(1.0, 0.0, 0.5));
        c.on_render_tick();
        c.on_render_tick();
        let p = c.camera().position();
        assert_relative_eq!(p.x, 2.0 * 0.07, epsilon = 1.0e-6);
        assert_relative_eq!(p.y, 0.0);
        assert_relative_eq!(p.z, -10.0 + 2.0 * 0.5 * 0.07, epsilon = 1.0e-6);

        c.set_camera_speed(&Vector3::zeros());
        let before = *c.camera();
        c.on_render_tick();
        assert_eq!(c.camera().matrix, before.matrix);
    }

    #[test]
    fn set_origin_rebases_without_jump() {
        let mut c = controller();
        c.set_origin(Vector3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(c.object().position(), Point3::new(-1.0, -2.0, -3.0));

        // Re-basing to a second origin composes the old offset back out.
        c.set_origin(Vector3::new(0.5, 0.0, -1.0));
        assert_relative_eq!(c.object().position(), Point3::new(-0.5, 0.0, 1.0));
    }

    #[test]
    fn reset_view_restores_identity_and_origin_offset() {
        let mut c = controller();
        c.set_origin(Vector3::new(2.0, 0.0, 1.0));
        c.rotate_camera_y(40.0);
        c.translate_camera(&Vector3::new(0.0, 1.0, 2.0));
        c.rotate_object_about_camera_axis(CameraAxis::X, 25.0);

        c.reset_view();
        assert_relative_eq!(c.camera().matrix, Matrix4::identity());
        assert_relative_eq!(c.object().position(), Point3::new(-2.0, 0.0, -1.0));
        assert_relative_eq!(c.object().axis_x(), Vector3::x(), epsilon = 1.0e-6);
    }

    #[test]
    fn camera_axis_rotation_with_zero_angle_is_noop() {
        let mut c = controller();
        c.rotate_camera_y(30.0);
        c.rotate_object(15.0, &Vector3::x());
        let before = *c.object();
        for _ in 0..5 {
            c.rotate_object_about_camera_axis(CameraAxis::Y, 0.0);
        }
        assert_transforms_close(c.object(), &before, 1.0e-6);
    }

    #[test]
    fn camera_axis_rotation_round_trips() {
        let mut c = controller();
        c.rotate_camera_y(33.0);
        c.rotate_camera_x(-12.0);
        c.translate_camera(&Vector3::new(0.5, -0.25, 1.0));
        c.set_origin(Vector3::new(1.0, 1.0, 1.0));
        c.rotate_object(20.0, &Vector3::new(0.0, 1.0, 1.0));
        let before = *c.object();

        c.rotate_object_about_camera_axis(CameraAxis::X, 47.0);
        c.rotate_object_about_camera_axis(CameraAxis::X, -47.0);
        assert_transforms_close(c.object(), &before, 1.0e-4);
    }

    #[test]
    fn camera_axis_rotation_keeps_object_in_place() {
        let mut c = controller();
        c.set_origin(Vector3::new(3.0, -1.0, 2.0));
        c.rotate_camera_y(60.0);
        let before = c.object().position();
        c.rotate_object_about_camera_axis(CameraAxis::Y, 90.0);
        assert_relative_eq!(c.object().position(), before, epsilon = 1.0e-5);
    }

    #[test]
    fn eye_matrix_follows_camera_orientation() {
        let c = controller();
        let eye = c.eye_matrix();
        // Default camera looks toward +Z; a point ahead of it must land
        // in front of the eye (negative Z in right-handed view space).
        let ahead = eye.transform_point(&Point3::new(0.0, 0.0, 0.0));
        assert!(ahead.z < 0.0);
        assert_relative_eq!(ahead.z, -10.0, epsilon = 1.0e-5);

        // The view transform puts the camera itself at the eye origin.
        let at_camera = eye.transform_point(&c.camera().position());
        assert_relative_eq!(at_camera, Point3::origin(), epsilon = 1.0e-5);
    }
}
