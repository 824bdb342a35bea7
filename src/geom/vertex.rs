//! Per-corner vertex record.

use std::hash::{Hash, Hasher};

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Number of f32 fields in a [`Vertex`].
pub const VERTEX_FIELDS: usize = 12;

/// Fully expanded vertex as produced per face corner by mesh extraction.
///
/// Equality and hashing compare the exact bit pattern of every field, so
/// `0.0 != -0.0` and a NaN equals itself when the bits match.
#[derive(Clone, Copy, Debug, Default, Pod, Zeroable, Serialize, Deserialize)]
#[repr(C)]
#[serde(default)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tangent: [f32; 3],
    pub binormal_sign: f32,
    pub texcoord0: [f32; 2],
}

/// Canonical hash key: raw bits of all fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VertexKey([u32; VERTEX_FIELDS]);

impl Vertex {
    pub fn new(
        position: [f32; 3],
        normal: [f32; 3],
        tangent: [f32; 3],
        binormal_sign: f32,
        texcoord0: [f32; 2],
    ) -> Self {
        Self { position, normal, tangent, binormal_sign, texcoord0 }
    }

    /// Vertex with only a position set.
    pub fn from_position(x: f32, y: f32, z: f32) -> Self {
        Self { position: [x, y, z], ..Self::default() }
    }

    /// All fields in declaration order.
    #[inline]
    pub fn to_array(&self) -> [f32; VERTEX_FIELDS] {
        bytemuck::cast(*self)
    }

    /// Bit-exact key.
    #[inline]
    pub fn key(&self) -> VertexKey {
        VertexKey(bytemuck::cast(*self))
    }

    /// Tangent xyz followed by the binormal sign.
    #[inline]
    pub fn tangent4(&self) -> [f32; 4] {
        let [x, y, z] = self.tangent;
        [x, y, z, self.binormal_sign]
    }
}

impl PartialEq for Vertex {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Vertex {}

impl Hash for Vertex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}
