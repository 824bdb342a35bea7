//! FULHAX archive writer.
//!
//! Writes the magic marker on creation, then one record per node:
//! an 8-byte [`NodeHeader`] followed by the node payload.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::trace;

use super::stream::OStream;
use crate::fulhax::format::{NodeHeader, FULHAX_MAGIC};
use crate::fulhax::node::{MaterialNode, Node};
use crate::scene::{ObjectId, SceneGraph};
use crate::util::{Error, Result};

/// FULHAX archive writer over any byte sink.
pub struct OArchive<W: Write> {
    stream: OStream<W>,
    nodes_written: usize,
}

impl OArchive<BufWriter<File>> {
    /// Create (truncate) a file and write the magic marker.
    ///
    /// The file handle is released when the archive is dropped or closed,
    /// including on error paths. A failed export leaves a truncated file;
    /// use [`export_scene`](crate::export::export_scene) for atomic output.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(OStream::create(path)?)
    }
}

impl<W: Write> OArchive<W> {
    /// Start an archive on an open stream.
    pub fn new(mut stream: OStream<W>) -> Result<Self> {
        stream.write_bytes(FULHAX_MAGIC)?;
        Ok(Self {
            stream,
            nodes_written: 0,
        })
    }

    /// Start an archive on a raw sink.
    pub fn from_writer(writer: W) -> Result<Self> {
        Self::new(OStream::new(writer))
    }

    /// Write one node record.
    pub fn write_node(&mut self, node: &Node) -> Result<()> {
        let node_type = node.node_type();
        let size = node.payload_size()?;
        let header = NodeHeader::new(node_type, size);

        self.stream.write_bytes(&header.to_bytes())?;
        let start = self.stream.pos();
        node.write_payload(&mut self.stream)?;

        let written = self.stream.pos() - start;
        if written != size as u64 {
            return Err(Error::SizeMismatch {
                node: node_type.name(),
                declared: size as u64,
                written,
            });
        }

        trace!(node = %node_type, size, pos = start, "wrote node");
        self.nodes_written += 1;
        Ok(())
    }

    /// Write nodes in order.
    pub fn write_nodes<'n>(&mut self, nodes: impl IntoIterator<Item = &'n Node>) -> Result<()> {
        for node in nodes {
            self.write_node(node)?;
        }
        Ok(())
    }

    /// Emit the object's ancestors, root first, then the object itself.
    ///
    /// Every object in the chain is written as a material record carrying the
    /// object's name. Shared ancestors are written again for each call.
    /// Returns the number of records written.
    pub fn emit_ancestor_chain<G>(&mut self, scene: &G, object: ObjectId) -> Result<usize>
    where
        G: SceneGraph + ?Sized,
    {
        let mut chain = Vec::new();
        let mut visited = HashSet::new();
        let mut current = Some(object);

        while let Some(id) = current {
            let name = scene
                .name(id)
                .ok_or_else(|| Error::ObjectNotFound(id.to_string()))?;
            if !visited.insert(id) {
                return Err(Error::CyclicHierarchy(name.to_string()));
            }
            chain.push(name);
            current = scene.parent(id);
        }

        for name in chain.iter().rev() {
            self.write_node(&MaterialNode::new(*name).into())?;
        }
        Ok(chain.len())
    }

    /// Current byte offset, including the magic marker.
    #[inline]
    pub fn pos(&self) -> u64 {
        self.stream.pos()
    }

    /// Number of node records written so far.
    #[inline]
    pub fn nodes_written(&self) -> usize {
        self.nodes_written
    }

    /// Flush and return the sink.
    pub fn close(self) -> Result<W> {
        self.stream.into_inner()
    }
}

/// Encode nodes into an in-memory FULHAX image.
pub fn encode_nodes<'n>(nodes: impl IntoIterator<Item = &'n Node>) -> Result<Vec<u8>> {
    let mut archive = OArchive::from_writer(Vec::new())?;
    archive.write_nodes(nodes)?;
    archive.close()
}
