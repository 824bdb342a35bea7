//! FULHAX format writer.
//!
//! [`OStream`] encodes fixed-width little-endian primitives; [`OArchive`]
//! frames nodes into records on top of it.

mod archive;
mod stream;

pub use archive::{encode_nodes, OArchive};
pub use stream::{string_size, OStream};

#[cfg(test)]
mod tests;
