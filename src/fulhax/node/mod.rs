//! FULHAX node payloads.
//!
//! A node is a closed set of payload variants. Each variant knows its exact
//! encoded payload size and how to emit it; the record header is written by
//! [`OArchive::write_node`](super::OArchive::write_node).

mod arrays;
mod material;
mod transform;

pub use arrays::{IndexArrayNode, VertexArrayNode};
pub use material::MaterialNode;
pub use transform::TransformNode;

use std::io::Write;

use super::format::NodeType;
use super::writer::OStream;
use crate::util::{Error, Result};

/// A single node record payload.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// Empty marker node.
    Root,
    Transform(TransformNode),
    VertexArray(VertexArrayNode),
    IndexArray(IndexArrayNode),
    Material(MaterialNode),
}

impl Node {
    /// Header tag for this node.
    pub fn node_type(&self) -> NodeType {
        match self {
            Self::Root => NodeType::Root,
            Self::Transform(_) => NodeType::Transform,
            Self::VertexArray(_) => NodeType::VertexArray,
            Self::IndexArray(_) => NodeType::IndexArray,
            Self::Material(_) => NodeType::Material,
        }
    }

    /// Encoded payload size, computed without narrowing.
    pub fn payload_len(&self) -> u64 {
        match self {
            Self::Root => 0,
            Self::Transform(n) => n.payload_len(),
            Self::VertexArray(n) => n.payload_len(),
            Self::IndexArray(n) => n.payload_len(),
            Self::Material(n) => n.payload_len(),
        }
    }

    /// Encoded payload size as stored in the header.
    pub fn payload_size(&self) -> Result<u32> {
        let len = self.payload_len();
        u32::try_from(len).map_err(|_| Error::out_of_range("payload size", len, u32::MAX as u64))
    }

    /// Emit the payload bytes.
    pub fn write_payload<W: Write>(&self, stream: &mut OStream<W>) -> Result<()> {
        match self {
            Self::Root => Ok(()),
            Self::Transform(n) => n.write_payload(stream),
            Self::VertexArray(n) => n.write_payload(stream),
            Self::IndexArray(n) => n.write_payload(stream),
            Self::Material(n) => n.write_payload(stream),
        }
    }
}

impl From<TransformNode> for Node {
    fn from(node: TransformNode) -> Self {
        Self::Transform(node)
    }
}

impl From<VertexArrayNode> for Node {
    fn from(node: VertexArrayNode) -> Self {
        Self::VertexArray(node)
    }
}

impl From<IndexArrayNode> for Node {
    fn from(node: IndexArrayNode) -> Self {
        Self::IndexArray(node)
    }
}

impl From<MaterialNode> for Node {
    fn from(node: MaterialNode) -> Self {
        Self::Material(node)
    }
}
