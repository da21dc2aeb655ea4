//! Affine transforms of scene nodes.
//!
//! A [`Transform`] is a 4x4 affine matrix. Transforms follow the column-vector
//! convention: `a.compose(b)` (or `a * b`) yields the transform that applies `b`
//! first, then `a`. The scene tree accumulates transforms from the root down, so
//! that the world transform of a node is `parent_world.compose(local)`.
//!
//! Rotations given as Euler triples are `(roll, pitch, yaw)` in degrees, about
//! the X, Y and Z axis respectively, and are combined as `Rz(yaw) * Ry(pitch) * Rx(roll)`.

use glamx::{Mat4, Quat, Vec3};
use std::fmt;
use std::ops::Mul;

/// How an incremental translation and rotation are combined into one transform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransformOrder {
    /// Rotate about the local origin first, then translate (order index `0`).
    RotateThenTranslate,
    /// Translate first, then rotate about the original origin (order index `1`).
    #[default]
    TranslateThenRotate,
}

impl TransformOrder {
    /// The order from its numeric index, as sent by remote callers.
    ///
    /// `0` is rotate-then-translate and `1` is translate-then-rotate. Other
    /// values are not orders.
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(TransformOrder::RotateThenTranslate),
            1 => Some(TransformOrder::TranslateThenRotate),
            _ => None,
        }
    }

    /// The numeric index of this order.
    pub fn index(self) -> u8 {
        match self {
            TransformOrder::RotateThenTranslate => 0,
            TransformOrder::TranslateThenRotate => 1,
        }
    }
}

/// A 3D affine transform stored as a 4x4 matrix.
#[derive(Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform {
    matrix: Mat4,
}

impl Transform {
    /// The identity transform, neutral element of [`Transform::compose`].
    pub const IDENTITY: Transform = Transform {
        matrix: Mat4::IDENTITY,
    };

    /// Creates an identity transform.
    #[inline]
    pub fn identity() -> Self {
        Self::IDENTITY
    }

    /// Wraps a raw 4x4 matrix.
    #[inline]
    pub fn from_matrix(matrix: Mat4) -> Self {
        Self { matrix }
    }

    /// A pure translation.
    #[inline]
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            matrix: Mat4::from_translation(translation),
        }
    }

    /// A pure rotation.
    #[inline]
    pub fn from_rotation(rotation: Quat) -> Self {
        Self {
            matrix: Mat4::from_quat(rotation),
        }
    }

    /// A pure rotation given as `(roll, pitch, yaw)` in degrees.
    #[inline]
    pub fn from_euler_degrees(euler: Vec3) -> Self {
        Self::from_rotation(euler_rotation(euler))
    }

    /// A uniform scaling.
    #[inline]
    pub fn from_scale(scale: f32) -> Self {
        Self {
            matrix: Mat4::from_scale(Vec3::splat(scale)),
        }
    }

    /// Builds the incremental transform of a translation and an Euler rotation.
    ///
    /// # Arguments
    /// * `translation` - the translation vector
    /// * `euler` - `(roll, pitch, yaw)` in degrees
    /// * `order` - whether the rotation happens before or after the translation
    pub fn from_translation_euler(translation: Vec3, euler: Vec3, order: TransformOrder) -> Self {
        let t = Self::from_translation(translation);
        let r = Self::from_euler_degrees(euler);

        match order {
            TransformOrder::RotateThenTranslate => t.compose(&r),
            TransformOrder::TranslateThenRotate => r.compose(&t),
        }
    }

    /// The underlying 4x4 matrix.
    #[inline]
    pub fn matrix(&self) -> &Mat4 {
        &self.matrix
    }

    /// Composes two transforms: the result applies `other` first, then `self`.
    #[inline]
    pub fn compose(&self, other: &Transform) -> Transform {
        Transform {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Concatenates a translation and Euler rotation onto this transform.
    ///
    /// The increment is built by [`Transform::from_translation_euler`] and
    /// composed after `self`, in the same sense as [`Transform::compose`].
    pub fn apply_euler(&self, translation: Vec3, euler: Vec3, order: TransformOrder) -> Transform {
        self.compose(&Transform::from_translation_euler(translation, euler, order))
    }

    /// Resets this transform to the identity.
    #[inline]
    pub fn reset(&mut self) {
        self.matrix = Mat4::IDENTITY;
    }

    /// The translation part of this transform.
    #[inline]
    pub fn translation(&self) -> Vec3 {
        self.matrix.w_axis.truncate()
    }

    /// The rotation part of this transform, assuming unit scale.
    #[inline]
    pub fn rotation(&self) -> Quat {
        Quat::from_mat4(&self.matrix)
    }

    /// Decomposes the rotation part into `(roll, pitch, yaw)` degrees.
    ///
    /// Each angle is wrapped into `(-180, 180]`. The decomposition assumes unit
    /// scale and does not special-case gimbal lock.
    pub fn euler_degrees(&self) -> Vec3 {
        let x = self.matrix.x_axis;
        let y = self.matrix.y_axis;
        let z = self.matrix.z_axis;

        let pitch = (-x.z).clamp(-1.0, 1.0).asin();
        let roll = y.z.atan2(z.z);
        let yaw = x.y.atan2(x.x);

        Vec3::new(
            wrap_degrees(roll.to_degrees()),
            wrap_degrees(pitch.to_degrees()),
            wrap_degrees(yaw.to_degrees()),
        )
    }

    /// Transforms a point (translation included).
    #[inline]
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.matrix.transform_point3(point)
    }

    /// Transforms a vector (translation ignored).
    #[inline]
    pub fn transform_vector(&self, vector: Vec3) -> Vec3 {
        self.matrix.transform_vector3(vector)
    }

    /// Checks that every matrix entry differs by at most `epsilon`.
    #[inline]
    pub fn abs_diff_eq(&self, other: &Transform, epsilon: f32) -> bool {
        self.matrix.abs_diff_eq(other.matrix, epsilon)
    }

    /// Checks if this is approximately the identity transform.
    #[inline]
    pub fn is_identity(&self, epsilon: f32) -> bool {
        self.abs_diff_eq(&Transform::IDENTITY, epsilon)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transform")
            .field("translation", &self.translation())
            .field("euler_degrees", &self.euler_degrees())
            .finish()
    }
}

impl Mul for Transform {
    type Output = Transform;

    fn mul(self, rhs: Transform) -> Transform {
        self.compose(&rhs)
    }
}

impl From<Mat4> for Transform {
    fn from(matrix: Mat4) -> Self {
        Self { matrix }
    }
}

impl From<Transform> for Mat4 {
    fn from(t: Transform) -> Self {
        t.matrix
    }
}

/// The rotation of a `(roll, pitch, yaw)` triple in degrees.
pub fn euler_rotation(euler: Vec3) -> Quat {
    Quat::from_rotation_z(euler.z.to_radians())
        * Quat::from_rotation_y(euler.y.to_radians())
        * Quat::from_rotation_x(euler.x.to_radians())
}

/// Wraps an angle in degrees into `(-180, 180]`.
pub fn wrap_degrees(angle: f32) -> f32 {
    let mut a = angle % 360.0;

    if a <= -180.0 {
        a += 360.0;
    } else if a > 180.0 {
        a -= 360.0;
    }

    a
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPS: f32 = 1.0e-5;

    #[test]
    fn test_identity_is_neutral() {
        let t = Transform::from_translation_euler(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(10.0, 20.0, 30.0),
            TransformOrder::TranslateThenRotate,
        );

        assert!(Transform::IDENTITY.compose(&t).abs_diff_eq(&t, EPS));
        assert!(t.compose(&Transform::IDENTITY).abs_diff_eq(&t, EPS));
    }

    #[test]
    fn test_compose_applies_right_operand_first() {
        let t = Transform::from_translation(Vec3::new(1.0, 0.0, 0.0));
        let r = Transform::from_euler_degrees(Vec3::new(0.0, 0.0, 90.0));

        // rotate first, then translate
        let p = t.compose(&r).transform_point(Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p.x, 1.0, epsilon = EPS);
        assert_relative_eq!(p.y, 1.0, epsilon = EPS);

        // translate first, then rotate
        let p = r.compose(&t).transform_point(Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p.x, 0.0, epsilon = EPS);
        assert_relative_eq!(p.y, 2.0, epsilon = EPS);
    }

    #[test]
    fn test_compose_is_associative_not_commutative() {
        let a = Transform::from_translation(Vec3::new(1.0, 2.0, 0.0));
        let b = Transform::from_euler_degrees(Vec3::new(0.0, 45.0, 0.0));
        let c = Transform::from_translation_euler(
            Vec3::new(0.0, 0.0, -3.0),
            Vec3::new(12.0, 0.0, 5.0),
            TransformOrder::RotateThenTranslate,
        );

        let left = a.compose(&b).compose(&c);
        let right = a.compose(&b.compose(&c));
        assert!(left.abs_diff_eq(&right, EPS));
        assert!(!a.compose(&b).abs_diff_eq(&b.compose(&a), EPS));
    }

    #[test]
    fn test_transform_orders() {
        let translation = Vec3::new(0.0, 1.0, 0.0);
        let euler = Vec3::new(90.0, 0.0, 0.0);

        let rt = Transform::from_translation_euler(
            translation,
            euler,
            TransformOrder::RotateThenTranslate,
        );
        assert!(rt.translation().abs_diff_eq(Vec3::new(0.0, 1.0, 0.0), EPS));

        // the translation gets rotated about X by 90 degrees
        let tr = Transform::from_translation_euler(
            translation,
            euler,
            TransformOrder::TranslateThenRotate,
        );
        assert!(tr.translation().abs_diff_eq(Vec3::new(0.0, 0.0, 1.0), EPS));
    }

    #[test]
    fn test_apply_euler_stacks() {
        let start = Transform::from_translation(Vec3::new(1.0, 0.0, 0.0));
        let stacked = start.apply_euler(
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::ZERO,
            TransformOrder::default(),
        );

        assert!(stacked
            .translation()
            .abs_diff_eq(Vec3::new(2.0, 0.0, 0.0), EPS));
    }

    #[test]
    fn test_euler_round_trip() {
        let euler = Vec3::new(10.0, -25.0, 170.0);
        let t = Transform::from_euler_degrees(euler);
        let back = t.euler_degrees();

        assert_relative_eq!(back.x, euler.x, epsilon = 1.0e-3);
        assert_relative_eq!(back.y, euler.y, epsilon = 1.0e-3);
        assert_relative_eq!(back.z, euler.z, epsilon = 1.0e-3);
    }

    #[test]
    fn test_euler_wraps_angles() {
        let t = Transform::from_euler_degrees(Vec3::new(0.0, 0.0, 270.0));
        assert_relative_eq!(t.euler_degrees().z, -90.0, epsilon = 1.0e-3);
    }

    #[test]
    fn test_wrap_degrees() {
        assert_relative_eq!(wrap_degrees(180.0), 180.0);
        assert_relative_eq!(wrap_degrees(-180.0), 180.0);
        assert_relative_eq!(wrap_degrees(540.0), 180.0);
        assert_relative_eq!(wrap_degrees(-30.0), -30.0);
        assert_relative_eq!(wrap_degrees(390.0), 30.0);
    }

    #[test]
    fn test_reset() {
        let mut t = Transform::from_translation(Vec3::new(4.0, 5.0, 6.0));
        t.reset();
        assert!(t.is_identity(0.0));
    }

    #[test]
    fn test_order_indices() {
        assert_eq!(
            TransformOrder::from_index(0),
            Some(TransformOrder::RotateThenTranslate)
        );
        assert_eq!(
            TransformOrder::from_index(1),
            Some(TransformOrder::TranslateThenRotate)
        );
        assert_eq!(TransformOrder::from_index(2), None);
        assert_eq!(TransformOrder::RotateThenTranslate.index(), 0);
    }
}
