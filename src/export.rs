//! Scene export: scene hierarchy and mesh geometry into one FULHAX file.
//!
//! Record order:
//! 1. magic marker
//! 2. ancestor chain of every exported object
//! 3. per mesh: Position, Normal, Tangent, TexCoord0 arrays, then the index array
//! 4. material record, then transform record, when configured
//!
//! With [`ExportOptions::atomic_write`] the file is written next to the
//! destination and renamed over it only once complete. Without it, a failed
//! export can leave an empty or truncated file at the destination.

use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::fulhax::format::DEFAULT_MATERIAL_NAME;
use crate::fulhax::{MaterialNode, Node, OArchive, TransformNode};
use crate::geom::MeshData;
use crate::scene::SceneGraph;
use crate::util::{Error, Result};

/// Export settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Only export objects that are currently selected.
    pub selected_only: bool,
    /// Write to a temporary file and rename on success.
    pub atomic_write: bool,
    /// Emit a material record after the geometry.
    pub write_material: bool,
    pub material_name: String,
    /// Row-major transform emitted after the geometry, if set.
    pub transform: Option<[f32; 16]>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            selected_only: false,
            atomic_write: true,
            write_material: true,
            material_name: DEFAULT_MATERIAL_NAME.to_string(),
            transform: None,
        }
    }
}

impl ExportOptions {
    /// Parse from a JSON string. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound(path.to_path_buf())
            } else {
                Error::Io(e)
            }
        })?;
        Self::from_json(&json)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Export statistics
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExportStats {
    pub objects: usize,
    pub nodes: usize,
    pub bytes: u64,
    pub input_vertices: usize,
    pub unique_vertices: usize,
}

/// Write the whole export sequence into an open archive.
pub fn write_scene<W, G>(
    archive: &mut OArchive<W>,
    scene: &G,
    meshes: &[MeshData],
    options: &ExportOptions,
) -> Result<ExportStats>
where
    W: Write,
    G: SceneGraph + ?Sized,
{
    let mut stats = ExportStats::default();

    for id in scene.exported_objects(options.selected_only) {
        archive.emit_ancestor_chain(scene, id)?;
        stats.objects += 1;
    }
    debug!(objects = stats.objects, selected_only = options.selected_only, "wrote hierarchy");

    for mesh in meshes {
        let (nodes, dedup) = mesh.build_nodes()?;
        archive.write_nodes(&nodes)?;
        stats.input_vertices += dedup.input;
        stats.unique_vertices += dedup.unique;
    }

    if options.write_material {
        archive.write_node(&MaterialNode::new(options.material_name.as_str()).into())?;
    }
    if let Some(rows) = options.transform {
        archive.write_node(&Node::from(TransformNode::from_rows(rows)))?;
    }

    stats.nodes = archive.nodes_written();
    stats.bytes = archive.pos();
    Ok(stats)
}

/// Export a scene to `path`.
pub fn export_scene<G>(
    path: impl AsRef<Path>,
    scene: &G,
    meshes: &[MeshData],
    options: &ExportOptions,
) -> Result<ExportStats>
where
    G: SceneGraph + ?Sized,
{
    let path = path.as_ref();
    info!("Exporting to {}", path.display());

    let stats = if options.atomic_write {
        export_atomic(path, scene, meshes, options)?
    } else {
        let mut archive = OArchive::create(path)?;
        let stats = write_scene(&mut archive, scene, meshes, options)?;
        archive.close()?;
        stats
    };

    info!(
        nodes = stats.nodes,
        bytes = stats.bytes,
        "Exported {} objects to {}",
        stats.objects,
        path.display()
    );
    Ok(stats)
}

fn export_atomic<G>(
    path: &Path,
    scene: &G,
    meshes: &[MeshData],
    options: &ExportOptions,
) -> Result<ExportStats>
where
    G: SceneGraph + ?Sized,
{
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    // Dropped (and deleted) on any early return below.
    let temp = tempfile::Builder::new()
        .prefix(".fulhax-")
        .suffix(".tmp")
        .tempfile_in(dir)?;

    let stats = {
        let mut archive = OArchive::from_writer(BufWriter::new(temp.as_file()))?;
        let stats = write_scene(&mut archive, scene, meshes, options)?;
        archive.close()?;
        stats
    };
    temp.as_file().sync_all()?;

    debug!("Renaming {} -> {}", temp.path().display(), path.display());
    temp.persist(path).map_err(|e| Error::Io(e.error))?;
    Ok(stats)
}
