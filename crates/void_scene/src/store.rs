//! Entity store - the canonical ordered sequence of game objects.
//!
//! All structural edits go through four primitives ([`Scene::find`],
//! [`Scene::insert_at`], [`Scene::remove_at`], [`Scene::append`]) so the
//! identifier-to-index cache stays consistent. Sequence order carries no
//! hierarchy meaning; it only matters for restoring deleted objects in place.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SceneError};
use crate::id::ObjectId;
use crate::object::GameObject;

/// Scene metadata carried alongside the object list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneMetadata {
    pub name: String,
    #[serde(default = "default_version")]
    pub version: u32,
}

fn default_version() -> u32 {
    1
}

impl Default for SceneMetadata {
    fn default() -> Self {
        Self {
            name: "New Scene".to_string(),
            version: default_version(),
        }
    }
}

/// Mutable scene graph storage.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub metadata: SceneMetadata,
    objects: Vec<GameObject>,
    index: HashMap<ObjectId, usize>,
}

impl PartialEq for Scene {
    fn eq(&self, other: &Self) -> bool {
        self.metadata == other.metadata && self.objects == other.objects
    }
}

impl Scene {
    /// Create an empty scene
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            metadata: SceneMetadata {
                name: name.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Build a scene from a deserialized object list.
    ///
    /// Fails if two objects share an identifier.
    pub fn from_objects(metadata: SceneMetadata, objects: Vec<GameObject>) -> Result<Self> {
        {
            let mut seen = HashSet::new();
            if let Some(dup) = objects.iter().find(|o| !seen.insert(o.id())) {
                return Err(SceneError::DuplicateId(dup.id().clone()));
            }
        }
        let mut scene = Self {
            metadata,
            objects,
            index: HashMap::new(),
        };
        scene.rebuild_index();
        Ok(scene)
    }

    /// Consume the scene, returning its objects in sequence order
    pub fn into_objects(self) -> Vec<GameObject> {
        self.objects
    }

    /// All objects in sequence order
    #[inline]
    pub fn objects(&self) -> &[GameObject] {
        &self.objects
    }

    /// Number of live objects
    #[inline]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the scene has no objects
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Check if an identifier is live
    #[inline]
    pub fn contains(&self, id: &ObjectId) -> bool {
        self.index.contains_key(id)
    }

    /// Sequence index of an object
    #[inline]
    pub fn position(&self, id: &ObjectId) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Look up an object by identifier
    pub fn find(&self, id: &ObjectId) -> Option<&GameObject> {
        self.index.get(id).map(|&idx| &self.objects[idx])
    }

    /// Look up an object by identifier for mutation. The identifier is read-only.
    pub fn find_mut(&mut self, id: &ObjectId) -> Option<&mut GameObject> {
        self.index.get(id).map(|&idx| &mut self.objects[idx])
    }

    /// Find the first object with a display name
    pub fn find_by_name(&self, name: &str) -> Option<&GameObject> {
        self.objects.iter().find(|o| o.name == name)
    }

    /// Object at a sequence index
    #[inline]
    pub fn get(&self, index: usize) -> Option<&GameObject> {
        self.objects.get(index)
    }

    /// Insert an object at a sequence index, clamped to the sequence length.
    pub fn insert_at(&mut self, index: usize, object: GameObject) -> Result<usize> {
        if self.index.contains_key(object.id()) {
            return Err(SceneError::DuplicateId(object.id().clone()));
        }
        let index = index.min(self.objects.len());
        self.objects.insert(index, object);
        self.rebuild_index();
        Ok(index)
    }

    /// Append an object at the end of the sequence
    pub fn append(&mut self, object: GameObject) -> Result<usize> {
        let index = self.objects.len();
        self.insert_at(index, object)
    }

    /// Remove the object at a sequence index
    pub fn remove_at(&mut self, index: usize) -> Option<GameObject> {
        if index >= self.objects.len() {
            return None;
        }
        let object = self.objects.remove(index);
        self.rebuild_index();
        Some(object)
    }

    /// Remove an object by identifier
    pub fn remove(&mut self, id: &ObjectId) -> Option<GameObject> {
        let index = self.position(id)?;
        self.remove_at(index)
    }

    fn rebuild_index(&mut self) {
        self.index.clear();
        for (idx, object) in self.objects.iter().enumerate() {
            self.index.entry(object.id().clone()).or_insert(idx);
        }
    }
}
