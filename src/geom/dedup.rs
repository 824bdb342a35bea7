//! Vertex deduplication.
//!
//! Collapses a per-corner vertex stream into unique vertices plus an index
//! stream. Unique entries keep the order in which they first appear, so the
//! output is identical across runs.

use std::collections::HashMap;
use std::hash::Hash;

use tracing::debug;

use super::vertex::Vertex;
use crate::fulhax::format::{ATTRIB_NORMAL, ATTRIB_POSITION, ATTRIB_TANGENT, ATTRIB_TEXCOORD0};
use crate::fulhax::{IndexArrayNode, VertexArrayNode};
use crate::util::{checked_u32, Error, Result};

/// Unique records borrowed from the input plus one index per input record.
#[derive(Clone, Debug)]
pub struct Indexed<'a, T> {
    unique: Vec<&'a T>,
    indices: Vec<u32>,
}

/// Deduplicated vertex stream.
pub type IndexedVertices<'a> = Indexed<'a, Vertex>;

/// Input/output counts of a deduplication pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DedupStats {
    pub input: usize,
    pub unique: usize,
}

impl DedupStats {
    /// Fraction of input records that were kept (1.0 for empty input).
    pub fn ratio(&self) -> f64 {
        if self.input == 0 {
            1.0
        } else {
            self.unique as f64 / self.input as f64
        }
    }
}

/// Deduplicate by an arbitrary hashable key.
///
/// Records with equal keys collapse to the first one seen.
pub fn deduplicate_by_key<T, K, F>(items: &[T], mut key: F) -> Result<Indexed<'_, T>>
where
    K: Hash + Eq,
    F: FnMut(&T) -> K,
{
    let mut positions: HashMap<K, u32> = HashMap::with_capacity(items.len());
    let mut unique = Vec::new();
    let mut indices = Vec::with_capacity(items.len());

    for item in items {
        let next = unique.len();
        let index = match positions.entry(key(item)) {
            std::collections::hash_map::Entry::Occupied(e) => *e.get(),
            std::collections::hash_map::Entry::Vacant(e) => {
                let index = checked_u32("unique vertex count", next)?;
                unique.push(item);
                *e.insert(index)
            }
        };
        indices.push(index);
    }

    Ok(Indexed { unique, indices })
}

/// Deduplicate vertices by exact bit equality.
pub fn deduplicate(vertices: &[Vertex]) -> Result<IndexedVertices<'_>> {
    let indexed = deduplicate_by_key(vertices, Vertex::key)?;
    let stats = indexed.stats();
    debug!(
        input = stats.input,
        unique = stats.unique,
        "deduplicated vertices ({:.1}% kept)",
        stats.ratio() * 100.0
    );
    Ok(indexed)
}

impl<'a, T> Indexed<'a, T> {
    /// Unique records in first-occurrence order.
    pub fn unique(&self) -> &[&'a T] {
        &self.unique
    }

    /// One index into [`unique`](Self::unique) per input record.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn unique_count(&self) -> usize {
        self.unique.len()
    }

    /// Record at input position `i`, resolved through the index stream.
    pub fn get(&self, i: usize) -> Option<&'a T> {
        self.indices.get(i).map(|&idx| self.unique[idx as usize])
    }

    pub fn stats(&self) -> DedupStats {
        DedupStats {
            input: self.indices.len(),
            unique: self.unique.len(),
        }
    }
}

impl<'a, T: Clone> Indexed<'a, T> {
    /// Copy the unique records out.
    pub fn to_owned_unique(&self) -> Vec<T> {
        self.unique.iter().map(|&v| v.clone()).collect()
    }
}

impl IndexedVertices<'_> {
    /// Position (3), Normal (3), Tangent (4, xyz + binormal sign) and TexCoord0 (2).
    pub fn attribute_arrays(&self) -> Result<Vec<VertexArrayNode>> {
        let n = self.unique.len();
        let mut position = Vec::with_capacity(n * 3);
        let mut normal = Vec::with_capacity(n * 3);
        let mut tangent = Vec::with_capacity(n * 4);
        let mut texcoord = Vec::with_capacity(n * 2);

        for v in &self.unique {
            position.extend_from_slice(&v.position);
            normal.extend_from_slice(&v.normal);
            tangent.extend_from_slice(&v.tangent4());
            texcoord.extend_from_slice(&v.texcoord0);
        }

        Ok(vec![
            VertexArrayNode::from_flat(ATTRIB_POSITION, 3, position)?,
            VertexArrayNode::from_flat(ATTRIB_NORMAL, 3, normal)?,
            VertexArrayNode::from_flat(ATTRIB_TANGENT, 4, tangent)?,
            VertexArrayNode::from_flat(ATTRIB_TEXCOORD0, 2, texcoord)?,
        ])
    }

    /// Index stream as faces of `face_arity` corners.
    pub fn index_array(&self, face_arity: u8) -> Result<IndexArrayNode> {
        if face_arity == 0 {
            return Err(Error::InvalidArity {
                what: "vertices per face",
                arity: 0,
            });
        }
        if self.indices.len() % face_arity as usize != 0 {
            return Err(Error::InvalidMesh(format!(
                "{} corners do not form whole faces of {}",
                self.indices.len(),
                face_arity
            )));
        }
        IndexArrayNode::from_u32(face_arity, &self.indices)
    }
}
