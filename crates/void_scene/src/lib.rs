//! # void_scene - Scene Graph Core
//!
//! Mutable, hierarchical storage of game objects for the Void Engine editor
//! and runtime.
//!
//! ## Components
//!
//! - [`Scene`]: the ordered object sequence with identifier lookup
//! - [`GameObject`]: identity, name, active flag, [`Transform`] and open
//!   component records of [`FieldValue`]s
//! - [`HierarchyIndex`]: parent/child adjacency, roots and subtree queries
//! - [`world_transform`]: world position/rotation/scale from the parent chain
//! - [`validate`]: consistency report for loaded scenes
//! - [`Behavior`]: runtime per-object lifecycle hooks
//!
//! Parent links are weak: a transform stores its parent's identifier, and
//! every consumer resolves it against the live scene. Dangling links read as
//! "no parent"; cycles are detected and cut rather than followed.
//!
//! ## Example
//!
//! ```
//! use void_scene::prelude::*;
//!
//! let mut scene = Scene::new("Level 1");
//! scene.append(GameObject::with_id("ship", "Ship")
//!     .with_transform(Transform::from_position(100.0, 100.0).with_scale(2.0, 2.0))).unwrap();
//! scene.append(GameObject::with_id("gun", "Gun")
//!     .with_transform(Transform::from_position(10.0, 0.0).with_parent("ship"))).unwrap();
//!
//! let world = world_transform(&scene, &"gun".into()).unwrap();
//! assert_eq!(world.position.to_array(), [120.0, 100.0]);
//! ```

pub mod behavior;
pub mod error;
pub mod hierarchy;
pub mod id;
pub mod object;
pub mod store;
pub mod transform;
pub mod validation;
pub mod value;

pub use behavior::{Behavior, BehaviorContext, BehaviorHost, Rotator};
pub use error::{FieldError, Result, SceneError};
pub use hierarchy::{ancestors, is_ancestor, resolved_parent, HierarchyIndex, TreeNode};
pub use id::ObjectId;
pub use object::{GameObject, ObjectRecord, Transform, TRANSFORM};
pub use store::{Scene, SceneMetadata};
pub use transform::{resolve_all, world_transform, WorldTransform};
pub use validation::{validate, validate_objects, ValidationIssue};
pub use value::{FieldMap, FieldValue};

pub use glam::DVec2;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::hierarchy::HierarchyIndex;
    pub use crate::id::ObjectId;
    pub use crate::object::{GameObject, Transform, TRANSFORM};
    pub use crate::store::Scene;
    pub use crate::transform::{world_transform, WorldTransform};
    pub use crate::value::{FieldMap, FieldValue};
}
