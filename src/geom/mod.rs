//! Geometry input and vertex indexing.
//!
//! - [`Vertex`] - per-corner vertex record with bit-exact equality
//! - [`deduplicate`] - unique vertices + index stream
//! - [`MeshData`] - flat corner list turned into FULHAX array nodes

mod dedup;
mod mesh;
mod vertex;

pub use dedup::{deduplicate, deduplicate_by_key, DedupStats, Indexed, IndexedVertices};
pub use mesh::MeshData;
pub use vertex::{Vertex, VertexKey, VERTEX_FIELDS};
