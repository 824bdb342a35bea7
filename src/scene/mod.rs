//! Scene objects supplied by the host application.
//!
//! The exporter only needs names, parent links and selection state. Hosts
//! either implement [`SceneGraph`] over their own scene or fill a [`Scene`].

mod description;

pub use description::SceneDescription;

use serde::{Deserialize, Serialize};

/// Index of an object within a scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub usize);

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Read-only view of the host scene hierarchy.
pub trait SceneGraph {
    /// All objects in traversal order.
    fn object_ids(&self) -> Vec<ObjectId>;

    /// Object name, `None` if the id is unknown.
    fn name(&self, id: ObjectId) -> Option<&str>;

    /// Parent of the object, `None` for top-level objects.
    fn parent(&self, id: ObjectId) -> Option<ObjectId>;

    /// Whether the object is part of the current selection.
    fn is_selected(&self, id: ObjectId) -> bool;

    /// Objects to export: all of them, or only the selected ones.
    fn exported_objects(&self, selected_only: bool) -> Vec<ObjectId> {
        self.object_ids()
            .into_iter()
            .filter(|&id| !selected_only || self.is_selected(id))
            .collect()
    }
}

/// One object in a [`Scene`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneObject {
    pub name: String,
    #[serde(default)]
    pub parent: Option<ObjectId>,
    #[serde(default)]
    pub selected: bool,
}

/// In-memory scene hierarchy.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub objects: Vec<SceneObject>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object and return its id.
    pub fn add_object(&mut self, name: impl Into<String>, parent: Option<ObjectId>) -> ObjectId {
        let id = ObjectId(self.objects.len());
        self.objects.push(SceneObject {
            name: name.into(),
            parent,
            selected: false,
        });
        id
    }

    /// Mark an object as selected. Unknown ids are ignored.
    pub fn select(&mut self, id: ObjectId) {
        if let Some(obj) = self.objects.get_mut(id.0) {
            obj.selected = true;
        }
    }

    /// Clear the selection.
    pub fn deselect_all(&mut self) {
        for obj in &mut self.objects {
            obj.selected = false;
        }
    }

    /// Find the first object with the given name.
    pub fn find(&self, name: &str) -> Option<ObjectId> {
        self.objects.iter().position(|o| o.name == name).map(ObjectId)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl SceneGraph for Scene {
    fn object_ids(&self) -> Vec<ObjectId> {
        (0..self.objects.len()).map(ObjectId).collect()
    }

    fn name(&self, id: ObjectId) -> Option<&str> {
        self.objects.get(id.0).map(|o| o.name.as_str())
    }

    fn parent(&self, id: ObjectId) -> Option<ObjectId> {
        self.objects.get(id.0).and_then(|o| o.parent)
    }

    fn is_selected(&self, id: ObjectId) -> bool {
        self.objects.get(id.0).is_some_and(|o| o.selected)
    }
}
