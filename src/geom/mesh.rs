//! Mesh input as handed over by the mesh-extraction collaborator.

use serde::{Deserialize, Serialize};

use super::dedup::{deduplicate, DedupStats};
use super::vertex::Vertex;
use crate::fulhax::Node;
use crate::util::{Error, Result};

fn default_face_arity() -> u8 {
    3
}

/// Flat per-corner vertex list: every `face_arity` consecutive vertices form a face.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeshData {
    #[serde(default = "default_face_arity")]
    pub face_arity: u8,
    #[serde(default)]
    pub vertices: Vec<Vertex>,
}

impl MeshData {
    /// Triangle mesh.
    pub fn triangles(vertices: Vec<Vertex>) -> Self {
        Self { face_arity: 3, vertices }
    }

    pub fn face_count(&self) -> usize {
        match self.face_arity {
            0 => 0,
            n => self.vertices.len() / n as usize,
        }
    }

    /// Check that the corner list forms whole faces.
    pub fn validate(&self) -> Result<()> {
        if self.face_arity == 0 {
            return Err(Error::InvalidArity {
                what: "vertices per face",
                arity: 0,
            });
        }
        if self.vertices.len() % self.face_arity as usize != 0 {
            return Err(Error::InvalidMesh(format!(
                "{} corners do not form whole faces of {}",
                self.vertices.len(),
                self.face_arity
            )));
        }
        Ok(())
    }

    /// Deduplicate and build the geometry nodes: one vertex array per
    /// attribute followed by the index array.
    pub fn build_nodes(&self) -> Result<(Vec<Node>, DedupStats)> {
        self.validate()?;
        let indexed = deduplicate(&self.vertices)?;

        let mut nodes: Vec<Node> = indexed
            .attribute_arrays()?
            .into_iter()
            .map(Node::from)
            .collect();
        nodes.push(indexed.index_array(self.face_arity)?.into());

        Ok((nodes, indexed.stats()))
    }
}

impl Default for MeshData {
    fn default() -> Self {
        Self::triangles(Vec::new())
    }
}
