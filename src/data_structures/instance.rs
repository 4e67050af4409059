//! Per-draw transformation data.
//!
//! A [`Transform`] is the scale, Euler rotation and position of one primitive.
//! It is turned into a model matrix right before the draw and then dropped;
//! nothing keeps a transform around between frames.

use cgmath::{Deg, Matrix4, SquareMatrix};

/// Scale, rotation (degrees about X, Y and Z) and position of one primitive.
///
/// Stored as plain arrays so that scene tables can build transforms in
/// `const` context.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub scale: [f32; 3],
    pub rotation_degrees: [f32; 3],
    pub position: [f32; 3],
}

impl Transform {
    pub const IDENTITY: Transform = Transform::new([1.0; 3], [0.0; 3], [0.0; 3]);

    pub const fn new(scale: [f32; 3], rotation_degrees: [f32; 3], position: [f32; 3]) -> Self {
        Self {
            scale,
            rotation_degrees,
            position,
        }
    }

    /// `Translation * RotationX * RotationY * RotationZ * Scale`.
    ///
    /// Scale is applied first, then Z, Y and X rotations, then translation.
    pub fn to_matrix(&self) -> Matrix4<f32> {
        let [sx, sy, sz] = self.scale;
        let [rx, ry, rz] = self.rotation_degrees;
        Matrix4::from_translation(self.position.into())
            * Matrix4::from_angle_x(Deg(rx))
            * Matrix4::from_angle_y(Deg(ry))
            * Matrix4::from_angle_z(Deg(rz))
            * Matrix4::from_nonuniform_scale(sx, sy, sz)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Inverse-transpose of a model matrix, for transforming normals.
///
/// Falls back to identity for degenerate (zero-scale) transforms.
pub fn normal_matrix(model: Matrix4<f32>) -> Matrix4<f32> {
    use cgmath::Matrix;
    model
        .invert()
        .map(|inverse| inverse.transpose())
        .unwrap_or_else(Matrix4::identity)
}
