//! FULHAX format constants and structures.

use crate::util::{Error, Result};

/// Magic bytes at the start of a FULHAX file (raw ASCII, no prefix or terminator).
pub const FULHAX_MAGIC: &[u8; 6] = b"FULHAX";

/// Size of the magic marker in bytes.
pub const MAGIC_SIZE: usize = 6;

/// Size of a node record header in bytes.
pub const NODE_HEADER_SIZE: usize = 8;

/// Default name written by material nodes.
pub const DEFAULT_MATERIAL_NAME: &str = "defaultmaterial";

/// Largest components-per-vertex a vertex array accepts.
pub const MAX_COMPONENTS_PER_VERTEX: u8 = 4;

/// Standard vertex attribute names.
pub const ATTRIB_POSITION: &str = "Position";
pub const ATTRIB_NORMAL: &str = "Normal";
pub const ATTRIB_TANGENT: &str = "Tangent";
pub const ATTRIB_TEXCOORD0: &str = "TexCoord0";

/// Node type tags as stored in the record header.
///
/// `Object` and `Mesh` are reserved tags; no node variant emits them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum NodeType {
    Root = 0,
    Transform = 1,
    Object = 2,
    Mesh = 3,
    VertexArray = 4,
    IndexArray = 5,
    Material = 6,
}

impl NodeType {
    /// Wire tag.
    #[inline]
    pub const fn tag(self) -> u16 {
        self as u16
    }

    /// Parse a wire tag.
    pub const fn from_tag(tag: u16) -> Option<Self> {
        match tag {
            0 => Some(Self::Root),
            1 => Some(Self::Transform),
            2 => Some(Self::Object),
            3 => Some(Self::Mesh),
            4 => Some(Self::VertexArray),
            5 => Some(Self::IndexArray),
            6 => Some(Self::Material),
            _ => None,
        }
    }

    /// `Object` and `Mesh` have a tag but no payload layout.
    pub const fn is_reserved(self) -> bool {
        matches!(self, Self::Object | Self::Mesh)
    }

    /// Human readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Root => "Root",
            Self::Transform => "Transform",
            Self::Object => "Object",
            Self::Mesh => "Mesh",
            Self::VertexArray => "VertexArray",
            Self::IndexArray => "IndexArray",
            Self::Material => "Material",
        }
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Fixed 8-byte header preceding every node payload.
///
/// ```text
/// u32 payload_size | u16 type_tag | u16 child_count
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeHeader {
    pub payload_size: u32,
    pub type_tag: u16,
    /// Reserved, always 0.
    pub child_count: u16,
}

impl NodeHeader {
    /// Create a header for a node of the given type.
    pub fn new(node_type: NodeType, payload_size: u32) -> Self {
        Self {
            payload_size,
            type_tag: node_type.tag(),
            child_count: 0,
        }
    }

    /// Decoded node type, if the tag is known.
    pub fn node_type(&self) -> Option<NodeType> {
        NodeType::from_tag(self.type_tag)
    }

    /// Encode to bytes.
    pub fn to_bytes(&self) -> [u8; NODE_HEADER_SIZE] {
        let mut bytes = [0u8; NODE_HEADER_SIZE];
        bytes[0..4].copy_from_slice(&self.payload_size.to_le_bytes());
        bytes[4..6].copy_from_slice(&self.type_tag.to_le_bytes());
        bytes[6..8].copy_from_slice(&self.child_count.to_le_bytes());
        bytes
    }

    /// Decode from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < NODE_HEADER_SIZE {
            return Err(Error::UnexpectedEof(bytes.len() as u64));
        }
        Ok(Self {
            payload_size: u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            type_tag: u16::from_le_bytes([bytes[4], bytes[5]]),
            child_count: u16::from_le_bytes([bytes[6], bytes[7]]),
        })
    }
}
