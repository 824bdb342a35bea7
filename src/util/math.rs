//! Math type re-exports.

pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};

/// 4x4 identity in row-major order, as written by transform nodes.
pub const IDENTITY_ROW_MAJOR: [f32; 16] = [
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 1.0, 0.0,
    0.0, 0.0, 0.0, 1.0,
];

/// Convert a glam matrix (column-major) to row-major floats.
#[inline]
pub fn to_row_major(m: &Mat4) -> [f32; 16] {
    m.transpose().to_cols_array()
}

/// Convert row-major floats back to a glam matrix.
#[inline]
pub fn from_row_major(rows: &[f32; 16]) -> Mat4 {
    Mat4::from_cols_array(rows).transpose()
}
