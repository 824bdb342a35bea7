//! Low-level FULHAX binary format.
//!
//! ## File Structure
//!
//! ```text
//! +----------------------+
//! | Magic: "FULHAX"      |  6 bytes, no prefix or terminator
//! +----------------------+
//! | payload_size  u32 LE |  \
//! | type_tag      u16 LE |   | repeated node records
//! | child_count   u16 LE |   | (child_count is reserved, always 0)
//! | payload              |  /
//! +----------------------+
//! ```
//!
//! The stream ends at end of file; there is no trailer or record count.

pub mod format;
mod node;
mod reader;
mod writer;

pub use format::{NodeHeader, NodeType, FULHAX_MAGIC};
pub use node::{IndexArrayNode, MaterialNode, Node, TransformNode, VertexArrayNode};
pub use reader::{IArchive, Record, Records};
pub use writer::{encode_nodes, string_size, OArchive, OStream};
