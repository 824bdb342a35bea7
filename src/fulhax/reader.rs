//! FULHAX format reader.
//!
//! Walks the flat record stream and decodes payloads back into [`Node`]s.

use std::fs::File;
use std::path::Path;

use byteorder::{ByteOrder, LittleEndian, ReadBytesExt};
#[cfg(feature = "mmap")]
use memmap2::Mmap;

use super::format::*;
use super::node::{IndexArrayNode, MaterialNode, Node, TransformNode, VertexArrayNode};
use crate::util::{Error, Result};

/// Read-only FULHAX archive.
#[derive(Debug)]
pub struct IArchive {
    inner: ArchiveData,
}

#[derive(Debug)]
enum ArchiveData {
    /// Memory-mapped file
    #[cfg(feature = "mmap")]
    Mmap(Mmap),
    /// Owned bytes (in-memory images, empty files)
    Bytes(Vec<u8>),
}

impl IArchive {
    /// Open a file, memory-mapping it when the `mmap` feature is enabled.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound(path.to_path_buf())
            } else {
                Error::Io(e)
            }
        })?;
        let size = file.metadata()?.len();

        #[cfg(feature = "mmap")]
        let inner = if size > 0 {
            // Safety: the file is opened read-only; we never hand out the map mutably.
            ArchiveData::Mmap(unsafe { Mmap::map(&file) }?)
        } else {
            ArchiveData::Bytes(Vec::new())
        };

        #[cfg(not(feature = "mmap"))]
        let inner = {
            use std::io::Read;
            let mut buf = Vec::with_capacity(size as usize);
            let mut file = file;
            file.read_to_end(&mut buf)?;
            ArchiveData::Bytes(buf)
        };

        Self::validate(inner)
    }

    /// Wrap an in-memory image.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        Self::validate(ArchiveData::Bytes(bytes))
    }

    fn validate(inner: ArchiveData) -> Result<Self> {
        let archive = Self { inner };
        let data = archive.data();
        if data.len() < MAGIC_SIZE {
            if !FULHAX_MAGIC.starts_with(data) {
                return Err(Error::InvalidMagic);
            }
            return Err(Error::UnexpectedEof(data.len() as u64));
        }
        if &data[..MAGIC_SIZE] != FULHAX_MAGIC {
            return Err(Error::InvalidMagic);
        }
        Ok(archive)
    }

    /// Whole file contents, magic included.
    pub fn data(&self) -> &[u8] {
        match &self.inner {
            #[cfg(feature = "mmap")]
            ArchiveData::Mmap(mmap) => &mmap[..],
            ArchiveData::Bytes(bytes) => bytes.as_slice(),
        }
    }

    /// Total size in bytes.
    pub fn size(&self) -> u64 {
        self.data().len() as u64
    }

    /// Iterate node records in file order.
    pub fn records(&self) -> Records<'_> {
        Records {
            data: self.data(),
            pos: MAGIC_SIZE,
            done: false,
        }
    }

    /// Decode every record.
    pub fn nodes(&self) -> Result<Vec<Node>> {
        self.records().map(|r| r?.decode()).collect()
    }
}

/// One framed record borrowed from the archive.
#[derive(Clone, Copy, Debug)]
pub struct Record<'a> {
    /// File offset of the record header.
    pub offset: u64,
    pub header: NodeHeader,
    pub payload: &'a [u8],
}

impl Record<'_> {
    pub fn node_type(&self) -> Option<NodeType> {
        self.header.node_type()
    }

    /// File offset of the first payload byte.
    pub fn payload_offset(&self) -> u64 {
        self.offset + NODE_HEADER_SIZE as u64
    }

    /// Decode the payload into a node.
    pub fn decode(&self) -> Result<Node> {
        let mut r = PayloadReader {
            rest: self.payload,
            offset: self.payload_offset(),
        };

        let node = match self.node_type() {
            Some(NodeType::Root) => Node::Root,
            Some(NodeType::Transform) => {
                let mut matrix = [0f32; 16];
                LittleEndian::read_f32_into(r.take(64)?, &mut matrix);
                TransformNode::from_rows(matrix).into()
            }
            Some(NodeType::VertexArray) => {
                let name = r.string()?;
                let components = r.u8()?;
                let count = r.u32()? as usize;
                let data = r.f32_array(count)?;
                VertexArrayNode::from_flat(name, components, data)?.into()
            }
            Some(NodeType::IndexArray) => {
                let arity = r.u8()?;
                let count = r.u32()? as usize;
                let indices = r.i32_array(count)?;
                IndexArrayNode::from_flat(arity, indices)?.into()
            }
            Some(NodeType::Material) => MaterialNode::new(r.string()?).into(),
            Some(NodeType::Object | NodeType::Mesh) | None => {
                return Err(Error::UnknownNodeType(self.header.type_tag));
            }
        };

        if !r.rest.is_empty() {
            return Err(Error::invalid(format!(
                "{} trailing payload bytes in {} record at offset {}",
                r.rest.len(),
                node.node_type(),
                self.offset
            )));
        }
        Ok(node)
    }
}

/// Iterator over framed records.
pub struct Records<'a> {
    data: &'a [u8],
    pos: usize,
    done: bool,
}

impl<'a> Iterator for Records<'a> {
    type Item = Result<Record<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.pos >= self.data.len() {
            return None;
        }

        let rest = &self.data[self.pos..];
        let header = match NodeHeader::from_bytes(rest) {
            Ok(h) => h,
            Err(_) => {
                self.done = true;
                return Some(Err(Error::UnexpectedEof(self.data.len() as u64)));
            }
        };

        let start = self.pos + NODE_HEADER_SIZE;
        let end = match start.checked_add(header.payload_size as usize) {
            Some(end) if end <= self.data.len() => end,
            _ => {
                self.done = true;
                return Some(Err(Error::UnexpectedEof(self.data.len() as u64)));
            }
        };

        let record = Record {
            offset: self.pos as u64,
            header,
            payload: &self.data[start..end],
        };
        self.pos = end;
        Some(Ok(record))
    }
}

struct PayloadReader<'a> {
    rest: &'a [u8],
    offset: u64,
}

impl<'a> PayloadReader<'a> {
    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.rest.len() < n {
            return Err(Error::UnexpectedEof(self.offset + self.rest.len() as u64));
        }
        let (head, tail) = self.rest.split_at(n);
        self.rest = tail;
        self.offset += n as u64;
        Ok(head)
    }

    fn u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    fn u32(&mut self) -> Result<u32> {
        Ok(self.take(4)?.read_u32::<LittleEndian>()?)
    }

    fn byte_len(&self, count: usize) -> Result<usize> {
        count
            .checked_mul(4)
            .ok_or_else(|| Error::invalid(format!("element count {} overflows", count)))
    }

    fn string(&mut self) -> Result<String> {
        let len = self.u32()? as usize;
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec())
            .map_err(|e| Error::Encoding(format!("string ending at offset {}: {}", self.offset, e)))
    }

    fn f32_array(&mut self, count: usize) -> Result<Vec<f32>> {
        let n = self.byte_len(count)?;
        let bytes = self.take(n)?;
        let mut out = vec![0f32; count];
        LittleEndian::read_f32_into(bytes, &mut out);
        Ok(out)
    }

    fn i32_array(&mut self, count: usize) -> Result<Vec<i32>> {
        let n = self.byte_len(count)?;
        let bytes = self.take(n)?;
        let mut out = vec![0i32; count];
        LittleEndian::read_i32_into(bytes, &mut out);
        Ok(out)
    }
}
