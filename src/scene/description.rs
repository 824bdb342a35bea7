//! JSON scene description consumed by the command-line exporter.
//!
//! ```json
//! {
//!   "objects": [{ "name": "Body" }, { "name": "Wheel", "parent": 0, "selected": true }],
//!   "meshes": [{ "face_arity": 3, "vertices": [{ "position": [0, 0, 0] }] }],
//!   "options": { "selected_only": true }
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::Scene;
use crate::export::ExportOptions;
use crate::geom::MeshData;
use crate::util::{Error, Result};

/// Everything a host hands to the exporter, in one document.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDescription {
    #[serde(flatten)]
    pub scene: Scene,
    pub meshes: Vec<MeshData>,
    pub options: ExportOptions,
}

impl SceneDescription {
    /// Parse from a JSON string.
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
}
