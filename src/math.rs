//! Transform utilities shared by the mirror math.
//!
//! Small pure helpers on `cgmath` types: stripping the translation component
//! from a transform, collapsing a homogeneous vector to a 3D vector, and the
//! standard vector-reflection formula used to mirror the camera position
//! across a mirror plane.

use cgmath::{InnerSpace, Matrix4, Vector3, Vector4};

/// Return `matrix` with its translation component set to zero.
///
/// Rotation and scale are preserved. Applying this twice is idempotent.
/// Useful for transforming directions (up vectors, plane normals) through a
/// placement transform without picking up its offset.
pub fn remove_translation(matrix: Matrix4<f32>) -> Matrix4<f32> {
    let mut result = matrix;
    result.w.x = 0.0;
    result.w.y = 0.0;
    result.w.z = 0.0;

    result
}

/// Drop the homogeneous component of `vector`.
pub fn to_vector3(vector: Vector4<f32>) -> Vector3<f32> {
    vector.truncate()
}

/// Reflect `vector` across the plane with unit normal `normal`.
///
/// `v' = v − 2·(v·n)·n`; reflecting twice returns the original vector.
pub fn reflect(vector: Vector3<f32>, normal: Vector3<f32>) -> Vector3<f32> {
    vector - 2.0 * vector.dot(normal) * normal
}
