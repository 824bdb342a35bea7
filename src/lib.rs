//! # tesm
//!
//! Exporter for the FULHAX binary scene container (`.tesm` files) read by
//! the Tesla game engine.
//!
//! ## Modules
//!
//! - [`util`] - Errors and math helpers
//! - [`fulhax`] - Low-level FULHAX format: primitive stream, nodes, records
//! - [`geom`] - Vertex records and deduplication into indexed geometry
//! - [`scene`] - Scene hierarchy and selection supplied by the host
//! - [`export`] - Whole-scene export with atomic file replacement
//!
//! ## Example
//!
//! ```no_run
//! use tesm::prelude::*;
//!
//! let mut scene = Scene::new();
//! let car = scene.add_object("car", None);
//! scene.add_object("wheel", Some(car));
//!
//! let mesh = MeshData::triangles(vec![
//!     Vertex::from_position(0.0, 0.0, 0.0),
//!     Vertex::from_position(1.0, 0.0, 0.0),
//!     Vertex::from_position(0.0, 1.0, 0.0),
//! ]);
//!
//! export_scene("car.tesm", &scene, &[mesh], &ExportOptions::default())?;
//! # Ok::<(), tesm::Error>(())
//! ```

pub mod util;
pub mod fulhax;
pub mod geom;
pub mod scene;
pub mod export;

// Re-export commonly used types
pub use util::{Error, Result};
pub use fulhax::{IArchive, OArchive};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::util::{Error, Result};
    pub use crate::fulhax::{
        IArchive, IndexArrayNode, MaterialNode, Node, NodeType, OArchive, OStream,
        TransformNode, VertexArrayNode,
    };
    pub use crate::geom::{deduplicate, MeshData, Vertex};
    pub use crate::scene::{ObjectId, Scene, SceneGraph};
    pub use crate::export::{export_scene, ExportOptions, ExportStats};
}
