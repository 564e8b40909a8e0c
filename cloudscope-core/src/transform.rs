//! 4x4 affine transform engine
//!
//! All mutating operations post-multiply, so a translation or rotation is
//! applied along the transform's *own* current axes rather than world
//! axes. That matches how camera and object poses are manipulated by the
//! controller: "move forward" means forward along wherever the camera is
//! currently looking.
//!
//! Gesture-facing rotation angles are degrees; they are converted to
//! radians internally.

use nalgebra::{Matrix4, Point3, Unit, Vector3};
use serde::{Deserialize, Serialize};

/// A 4x4 column-major affine transform.
///
/// Invariant: the upper-left 3x3 block stays orthonormal up to a uniform
/// scale factor, which [`Transform::scaling`] recovers so extracted axes
/// can be normalized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub matrix: Matrix4<f32>,
}

impl Transform {
    /// Create an identity transform.
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Reset this transform to the identity.
    pub fn set_identity(&mut self) {
        self.matrix = Matrix4::identity();
    }

    /// Build a view transform looking from `eye` toward `target`.
    pub fn look_at(eye: &Point3<f32>, target: &Point3<f32>, up: &Vector3<f32>) -> Self {
        Self {
            matrix: Matrix4::look_at_rh(eye, target, up),
        }
    }

    /// Translate along this transform's own axes.
    pub fn translate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.translate_vec(&Vector3::new(dx, dy, dz));
    }

    /// Translate along this transform's own axes.
    pub fn translate_vec(&mut self, delta: &Vector3<f32>) {
        self.matrix *= Matrix4::new_translation(delta);
    }

    /// Rotate about this transform's own X axis, in degrees.
    pub fn rotate_x(&mut self, angle_deg: f32) {
        self.rotate_about(angle_deg, &Vector3::x());
    }

    /// Rotate about this transform's own Y axis, in degrees.
    pub fn rotate_y(&mut self, angle_deg: f32) {
        self.rotate_about(angle_deg, &Vector3::y());
    }

    /// Rotate about this transform's own Z axis, in degrees.
    pub fn rotate_z(&mut self, angle_deg: f32) {
        self.rotate_about(angle_deg, &Vector3::z());
    }

    /// Rotate about an arbitrary axis expressed in this transform's own
    /// frame, in degrees. A zero axis is a no-op.
    pub fn rotate_about(&mut self, angle_deg: f32, axis: &Vector3<f32>) {
        if let Some(unit) = Unit::try_new(*axis, 1.0e-12) {
            self.matrix *= Matrix4::from_axis_angle(&unit, angle_deg.to_radians());
        }
    }

    /// Apply a uniform scale.
    pub fn scale(&mut self, factor: f32) {
        self.matrix *= Matrix4::new_scaling(factor);
    }

    /// Compose with another transform: `self ∘ other` applies `other`
    /// first, then `self`.
    pub fn compose(&self, other: &Self) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Get the inverse transform.
    ///
    /// Panics on a non-invertible matrix: the transforms managed by the
    /// controller are built purely from translations, rotations, and
    /// non-zero scales, so a degenerate matrix here means an invariant
    /// was broken upstream. Use [`Transform::try_inverse`] when the
    /// caller wants to handle that case itself.
    pub fn inverse(&self) -> Self {
        self.try_inverse()
            .expect("attempted to invert a degenerate transform")
    }

    /// Get the inverse transform, or `None` if the matrix is singular.
    pub fn try_inverse(&self) -> Option<Self> {
        self.matrix.try_inverse().map(|matrix| Self { matrix })
    }

    /// The position encoded in the translation column.
    pub fn position(&self) -> Point3<f32> {
        Point3::new(
            self.matrix[(0, 3)],
            self.matrix[(1, 3)],
            self.matrix[(2, 3)],
        )
    }

    /// The raw X basis column.
    pub fn axis_x(&self) -> Vector3<f32> {
        self.matrix.fixed_view::<3, 1>(0, 0).into_owned()
    }

    /// The raw Y basis column.
    pub fn axis_y(&self) -> Vector3<f32> {
        self.matrix.fixed_view::<3, 1>(0, 1).into_owned()
    }

    /// The raw Z basis column.
    pub fn axis_z(&self) -> Vector3<f32> {
        self.matrix.fixed_view::<3, 1>(0, 2).into_owned()
    }

    /// The uniform scale factor carried by the basis columns.
    pub fn scaling(&self) -> f32 {
        self.axis_x().norm()
    }

    /// The X basis column divided by the recovered uniform scale.
    pub fn axis_x_normalized(&self) -> Vector3<f32> {
        self.axis_x() / self.scaling()
    }

    /// The Y basis column divided by the recovered uniform scale.
    pub fn axis_y_normalized(&self) -> Vector3<f32> {
        self.axis_y() / self.scaling()
    }

    /// The Z basis column divided by the recovered uniform scale.
    pub fn axis_z_normalized(&self) -> Vector3<f32> {
        self.axis_z() / self.scaling()
    }

    /// Apply the transform to a point (translation included).
    pub fn transform_point(&self, point: &Point3<f32>) -> Point3<f32> {
        self.matrix.transform_point(point)
    }

    /// Apply the transform to a direction (3x3 block only).
    pub fn transform_vector(&self, vector: &Vector3<f32>) -> Vector3<f32> {
        self.matrix.fixed_view::<3, 3>(0, 0) * vector
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Transform {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.compose(&rhs)
    }
}

impl From<Matrix4<f32>> for Transform {
    fn from(matrix: Matrix4<f32>) -> Self {
        Self { matrix }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn scrambled() -> Transform {
        let mut t = Transform::identity();
        t.translate(1.5, -2.0, 4.0);
        t.rotate_y(33.0);
        t.rotate_x(-71.0);
        t.scale(2.5);
        t.translate(0.0, 0.5, -1.0);
        t
    }

    #[test]
    fn identity_has_unit_axes_at_origin() {
        let t = Transform::identity();
        assert_relative_eq!(t.position(), Point3::origin());
        assert_relative_eq!(t.axis_x(), Vector3::x());
        assert_relative_eq!(t.axis_y(), Vector3::y());
        assert_relative_eq!(t.axis_z(), Vector3::z());
        assert_relative_eq!(t.scaling(), 1.0);
    }

    #[test]
    fn translate_moves_along_own_axes() {
        let mut t = Transform::identity();
        t.rotate_y(90.0);
        t.translate(0.0, 0.0, 1.0);
        // After a 90 degree yaw the local +Z points along world -X.
        let p = t.position();
        assert_relative_eq!(p.x, -1.0, epsilon = 1.0e-5);
        assert_relative_eq!(p.y, 0.0, epsilon = 1.0e-5);
        assert_relative_eq!(p.z, 0.0, epsilon = 1.0e-5);
    }

    #[test]
    fn double_inverse_roundtrips() {
        let t = scrambled();
        let back = t.inverse().inverse();
        for i in 0..4 {
            for j in 0..4 {
                assert_relative_eq!(back.matrix[(i, j)], t.matrix[(i, j)], epsilon = 1.0e-5);
            }
        }
    }

    #[test]
    fn inverse_composes_to_identity() {
        let t = scrambled();
        let id = t.compose(&t.inverse());
        assert_relative_eq!(id.matrix, Matrix4::identity(), epsilon = 1.0e-4);
    }

    #[test]
    fn normalized_axes_have_unit_length() {
        let t = scrambled();
        assert_relative_eq!(t.axis_x_normalized().norm(), 1.0, epsilon = 1.0e-5);
        assert_relative_eq!(t.axis_y_normalized().norm(), 1.0, epsilon = 1.0e-5);
        assert_relative_eq!(t.axis_z_normalized().norm(), 1.0, epsilon = 1.0e-5);
        assert_relative_eq!(t.scaling(), 2.5, epsilon = 1.0e-4);
    }

    #[test]
    fn rotate_about_zero_axis_is_noop() {
        let mut t = scrambled();
        let before = t;
        t.rotate_about(45.0, &Vector3::zeros());
        assert_eq!(t, before);
    }

    #[test]
    fn compose_applies_rhs_first() {
        let mut translate = Transform::identity();
        translate.translate(1.0, 0.0, 0.0);
        let mut rotate = Transform::identity();
        rotate.rotate_z(90.0);

        // rotate ∘ translate: translate in local frame, then rotate.
        let combined = rotate.compose(&translate);
        let p = combined.transform_point(&Point3::origin());
        assert_relative_eq!(p.x, 0.0, epsilon = 1.0e-5);
        assert_relative_eq!(p.y, 1.0, epsilon = 1.0e-5);

        // The operator form is the same composition.
        assert_eq!(rotate * translate, combined);
    }

    #[test]
    fn try_inverse_rejects_singular() {
        let mut t = Transform::identity();
        t.matrix[(0, 0)] = 0.0;
        t.matrix[(1, 1)] = 0.0;
        t.matrix[(0, 1)] = 0.0;
        t.matrix[(1, 0)] = 0.0;
        assert!(t.try_inverse().is_none());
    }

    #[test]
    fn look_at_down_z_matches_identity_view() {
        let view = Transform::look_at(
            &Point3::origin(),
            &Point3::new(0.0, 0.0, -1.0),
            &Vector3::y(),
        );
        assert_relative_eq!(view.matrix, Matrix4::identity(), epsilon = 1.0e-5);
    }
}
