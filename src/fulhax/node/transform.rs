//! Transform node.

use std::io::Write;

use crate::fulhax::writer::OStream;
use crate::util::{from_row_major, to_row_major, Mat4, Quat, Result, Vec3, IDENTITY_ROW_MAJOR};

/// Row-major 4x4 matrix, 16 x f32 on the wire.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformNode {
    pub matrix: [f32; 16],
}

impl TransformNode {
    /// Payload size in bytes.
    pub const PAYLOAD_SIZE: u32 = 64;

    /// Identity transform.
    pub fn identity() -> Self {
        Self { matrix: IDENTITY_ROW_MAJOR }
    }

    /// From row-major floats.
    pub fn from_rows(matrix: [f32; 16]) -> Self {
        Self { matrix }
    }

    /// From a glam matrix.
    pub fn from_mat4(matrix: Mat4) -> Self {
        Self { matrix: to_row_major(&matrix) }
    }

    /// From scale, rotation and translation.
    pub fn from_trs(translation: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self::from_mat4(Mat4::from_scale_rotation_translation(scale, rotation, translation))
    }

    /// As a glam matrix.
    pub fn to_mat4(&self) -> Mat4 {
        from_row_major(&self.matrix)
    }

    pub(crate) fn payload_len(&self) -> u64 {
        Self::PAYLOAD_SIZE as u64
    }

    pub(crate) fn write_payload<W: Write>(&self, stream: &mut OStream<W>) -> Result<()> {
        stream.write_f32_array(&self.matrix)
    }
}

impl Default for TransformNode {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<Mat4> for TransformNode {
    fn from(matrix: Mat4) -> Self {
        Self::from_mat4(matrix)
    }
}
