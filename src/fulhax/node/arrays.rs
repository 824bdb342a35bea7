//! Vertex and index array nodes.
//!
//! Both arrays store their element count as the total number of primitives
//! (arity x vertex/face count), not the number of vertices or faces.

use std::io::Write;

use crate::fulhax::format::MAX_COMPONENTS_PER_VERTEX;
use crate::fulhax::writer::{string_size, OStream};
use crate::util::{checked_u32, Error, Result};

/// One named vertex attribute stream.
///
/// ```text
/// u32 name_len | name | u8 components | u32 float_count | float_count x f32
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct VertexArrayNode {
    name: String,
    components: u8,
    data: Vec<f32>,
}

impl VertexArrayNode {
    /// Create an empty attribute stream with `components` floats per vertex (1-4).
    pub fn new(name: impl Into<String>, components: u8) -> Result<Self> {
        if components == 0 || components > MAX_COMPONENTS_PER_VERTEX {
            return Err(Error::InvalidArity {
                what: "components per vertex",
                arity: components as usize,
            });
        }
        Ok(Self {
            name: name.into(),
            components,
            data: Vec::new(),
        })
    }

    /// Create from already flattened component-major data.
    pub fn from_flat(name: impl Into<String>, components: u8, data: Vec<f32>) -> Result<Self> {
        let mut node = Self::new(name, components)?;
        if data.len() % components as usize != 0 {
            return Err(Error::InvalidMesh(format!(
                "{} floats is not a multiple of {} components in '{}'",
                data.len(),
                components,
                node.name
            )));
        }
        node.data = data;
        Ok(node)
    }

    /// Append one vertex. The slice length must equal the component count.
    pub fn push_vertex(&mut self, vertex: &[f32]) -> Result<()> {
        if vertex.len() != self.components as usize {
            return Err(Error::InvalidArity {
                what: "vertex",
                arity: vertex.len(),
            });
        }
        self.data.extend_from_slice(vertex);
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn components_per_vertex(&self) -> u8 {
        self.components
    }

    pub fn vertex_count(&self) -> usize {
        self.data.len() / self.components as usize
    }

    /// Total float count as written on the wire.
    pub fn element_count(&self) -> usize {
        self.data.len()
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub(crate) fn payload_len(&self) -> u64 {
        string_size(&self.name) + 1 + 4 + 4 * self.data.len() as u64
    }

    pub(crate) fn write_payload<W: Write>(&self, stream: &mut OStream<W>) -> Result<()> {
        let count = checked_u32("float element count", self.data.len())?;
        stream.write_string(&self.name)?;
        stream.write_u8(self.components)?;
        stream.write_u32(count)?;
        stream.write_f32_array(&self.data)
    }
}

/// Face connectivity.
///
/// ```text
/// u8 vertices_per_face | u32 int_count | int_count x i32
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexArrayNode {
    vertices_per_face: u8,
    indices: Vec<i32>,
}

impl IndexArrayNode {
    /// Create an empty index array for faces of `vertices_per_face` corners.
    pub fn new(vertices_per_face: u8) -> Result<Self> {
        if vertices_per_face == 0 {
            return Err(Error::InvalidArity {
                what: "vertices per face",
                arity: 0,
            });
        }
        Ok(Self {
            vertices_per_face,
            indices: Vec::new(),
        })
    }

    /// Create from flattened per-face indices.
    pub fn from_flat(vertices_per_face: u8, indices: Vec<i32>) -> Result<Self> {
        let mut node = Self::new(vertices_per_face)?;
        if indices.len() % vertices_per_face as usize != 0 {
            return Err(Error::InvalidMesh(format!(
                "{} indices is not a multiple of face arity {}",
                indices.len(),
                vertices_per_face
            )));
        }
        node.indices = indices;
        Ok(node)
    }

    /// Create from unsigned indices, rejecting values that do not fit an i32.
    pub fn from_u32(vertices_per_face: u8, indices: &[u32]) -> Result<Self> {
        let converted = indices
            .iter()
            .map(|&i| {
                i32::try_from(i)
                    .map_err(|_| Error::out_of_range("vertex index", i as u64, i32::MAX as u64))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_flat(vertices_per_face, converted)
    }

    /// Append one face. The slice length must equal the face arity.
    pub fn push_face(&mut self, face: &[i32]) -> Result<()> {
        if face.len() != self.vertices_per_face as usize {
            return Err(Error::InvalidArity {
                what: "face",
                arity: face.len(),
            });
        }
        self.indices.extend_from_slice(face);
        Ok(())
    }

    pub fn vertices_per_face(&self) -> u8 {
        self.vertices_per_face
    }

    pub fn face_count(&self) -> usize {
        self.indices.len() / self.vertices_per_face as usize
    }

    /// Total index count as written on the wire.
    pub fn element_count(&self) -> usize {
        self.indices.len()
    }

    pub fn indices(&self) -> &[i32] {
        &self.indices
    }

    /// Iterate faces as slices.
    pub fn faces(&self) -> impl Iterator<Item = &[i32]> {
        self.indices.chunks_exact(self.vertices_per_face as usize)
    }

    pub(crate) fn payload_len(&self) -> u64 {
        1 + 4 + 4 * self.indices.len() as u64
    }

    pub(crate) fn write_payload<W: Write>(&self, stream: &mut OStream<W>) -> Result<()> {
        let count = checked_u32("int element count", self.indices.len())?;
        stream.write_u8(self.vertices_per_face)?;
        stream.write_u32(count)?;
        stream.write_i32_array(&self.indices)
    }
}
