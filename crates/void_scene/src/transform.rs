//! World transform resolution
//!
//! A world transform is the composition of an object's local transform with
//! every ancestor's. Given parent world position `P`, rotation `R` and scale
//! `S`, and local position `p`, rotation `r` and scale `s`:
//!
//! ```text
//! world scale    = S * s            (component-wise)
//! world rotation = R + r
//! world position = P + rotate(p * S, -R)
//! ```
//!
//! # Rotation convention
//!
//! The parent rotation is applied as a rotation by `-R` degrees in the
//! standard math sense. In a y-up frame a positive rotation therefore turns
//! child offsets clockwise; on a y-down screen (the editor canvas and the
//! runtime window) it appears counter-clockwise. Editor preview and runtime
//! both call into this module so the convention cannot drift between them.

use std::collections::{HashMap, HashSet};

use glam::DVec2;

use crate::hierarchy::resolved_parent;
use crate::id::ObjectId;
use crate::object::Transform;
use crate::store::Scene;

/// Resolved world-space transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldTransform {
    pub position: DVec2,
    /// Rotation in degrees
    pub rotation: f64,
    pub scale: DVec2,
}

impl WorldTransform {
    /// World transform of a root object: its local transform unchanged
    pub fn from_local(local: &Transform) -> Self {
        Self {
            position: local.position,
            rotation: local.rotation,
            scale: local.scale,
        }
    }

    /// Compose a child's local transform under this parent transform
    pub fn compose(&self, local: &Transform) -> Self {
        let offset = local.position * self.scale;
        let (sin, cos) = (-self.rotation).to_radians().sin_cos();
        let rotated = DVec2::new(
            offset.x * cos - offset.y * sin,
            offset.x * sin + offset.y * cos,
        );

        Self {
            position: self.position + rotated,
            rotation: self.rotation + local.rotation,
            scale: self.scale * local.scale,
        }
    }
}

/// Resolve the world transform of one object.
///
/// Returns `None` only if the object is not live. A dangling parent makes the
/// object a root; in a parent cycle the walk stops at the first repeated
/// object, which is treated as having no parent.
pub fn world_transform(scene: &Scene, id: &ObjectId) -> Option<WorldTransform> {
    let object = scene.find(id)?;

    // Walk up to the effective root, collecting locals nearest first.
    let mut chain = vec![&object.transform];
    let mut visited = HashSet::new();
    visited.insert(object.id());
    let mut current = object;
    while let Some(parent_id) = resolved_parent(scene, current) {
        if !visited.insert(parent_id) {
            break;
        }
        let Some(parent) = scene.find(parent_id) else {
            break;
        };
        chain.push(&parent.transform);
        current = parent;
    }

    let mut locals = chain.into_iter().rev();
    let root = WorldTransform::from_local(locals.next()?);
    Some(locals.fold(root, |parent, local| parent.compose(local)))
}

/// Resolve world transforms for every live object.
///
/// Agrees with [`world_transform`] for every object. Results along acyclic
/// chains are computed once and reused by descendants. An object whose chain
/// runs into a parent cycle is resolved on its own, since each such object
/// cuts the cycle at a different point.
pub fn resolve_all(scene: &Scene) -> HashMap<ObjectId, WorldTransform> {
    let mut resolved: HashMap<ObjectId, WorldTransform> = HashMap::with_capacity(scene.len());
    // Objects whose ancestry is acyclic; only these are reused.
    let mut shared: HashSet<&ObjectId> = HashSet::with_capacity(scene.len());

    for object in scene.objects() {
        if resolved.contains_key(object.id()) {
            continue;
        }

        // Collect the unresolved part of the chain, nearest first.
        let mut pending = vec![object];
        let mut visited = HashSet::new();
        visited.insert(object.id());
        let mut base = None;
        let mut cyclic = false;
        let mut current = object;
        while let Some(parent_id) = resolved_parent(scene, current) {
            if shared.contains(parent_id) {
                base = resolved.get(parent_id).copied();
                break;
            }
            if !visited.insert(parent_id) {
                cyclic = true;
                break;
            }
            let Some(parent) = scene.find(parent_id) else {
                break;
            };
            pending.push(parent);
            current = parent;
        }

        if cyclic {
            if let Some(world) = world_transform(scene, object.id()) {
                resolved.insert(object.id().clone(), world);
            }
            continue;
        }

        let mut world = base;
        for pending_object in pending.into_iter().rev() {
            let next = match world {
                Some(parent) => parent.compose(&pending_object.transform),
                None => WorldTransform::from_local(&pending_object.transform),
            };
            resolved.insert(pending_object.id().clone(), next);
            shared.insert(pending_object.id());
            world = Some(next);
        }
    }

    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::GameObject;
    use approx::assert_relative_eq;

    fn scene(objects: Vec<GameObject>) -> Scene {
        Scene::from_objects(Default::default(), objects).unwrap()
    }

    #[test]
    fn test_root_is_identity_composition() {
        let local = Transform::from_position(3.5, -7.25).with_rotation(33.0).with_scale(0.5, 4.0);
        let s = scene(vec![GameObject::with_id("root", "Root").with_transform(local.clone())]);

        let world = world_transform(&s, &"root".into()).unwrap();
        assert_eq!(world, WorldTransform::from_local(&local));
    }

    #[test]
    fn test_child_scaled_by_parent() {
        let s = scene(vec![
            GameObject::with_id("parent", "Parent")
                .with_transform(Transform::from_position(100.0, 100.0).with_scale(2.0, 2.0)),
            GameObject::with_id("child", "Child")
                .with_transform(Transform::from_position(10.0, 0.0).with_parent("parent")),
        ]);

        let world = world_transform(&s, &"child".into()).unwrap();
        assert_eq!(world.position, DVec2::new(120.0, 100.0));
        assert_eq!(world.scale, DVec2::new(2.0, 2.0));
        assert_eq!(world.rotation, 0.0);
    }

    #[test]
    fn test_parent_rotation_sign() {
        let s = scene(vec![
            GameObject::with_id("parent", "Parent").with_transform(Transform::IDENTITY.with_rotation(90.0)),
            GameObject::with_id("child", "Child")
                .with_transform(Transform::from_position(10.0, 0.0).with_rotation(15.0).with_parent("parent")),
        ]);

        let world = world_transform(&s, &"child".into()).unwrap();
        assert_relative_eq!(world.position.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(world.position.y, -10.0, epsilon = 1e-9);
        assert_relative_eq!(world.rotation, 105.0);
    }

    #[test]
    fn test_cycle_and_dangling_do_not_hang() {
        let s = scene(vec![
            GameObject::with_id("x", "X").with_transform(Transform::from_position(1.0, 0.0).with_parent("y")),
            GameObject::with_id("y", "Y").with_transform(Transform::from_position(0.0, 1.0).with_parent("x")),
            GameObject::with_id("d", "D").with_transform(Transform::from_position(5.0, 5.0).with_parent("gone")),
        ]);

        // y is the effective root of x's chain
        let x = world_transform(&s, &"x".into()).unwrap();
        assert_eq!(x.position, DVec2::new(1.0, 1.0));

        let d = world_transform(&s, &"d".into()).unwrap();
        assert_eq!(d.position, DVec2::new(5.0, 5.0));
        assert!(world_transform(&s, &"missing".into()).is_none());
    }

    #[test]
    fn test_resolve_all_matches_single() {
        let s = scene(vec![
            GameObject::with_id("c", "C").with_transform(Transform::from_position(1.0, 2.0).with_parent("b")),
            GameObject::with_id("a", "A").with_transform(Transform::from_position(10.0, 0.0).with_rotation(30.0)),
            GameObject::with_id("b", "B")
                .with_transform(Transform::from_position(0.0, 4.0).with_scale(3.0, 1.0).with_parent("a")),
        ]);

        let all = resolve_all(&s);
        assert_eq!(all.len(), 3);
        for id in ["a", "b", "c"] {
            let id = ObjectId::from(id);
            assert_eq!(all[&id], world_transform(&s, &id).unwrap());
        }
    }

    #[test]
    fn test_resolve_all_matches_single_in_cycle() {
        let s = scene(vec![
            GameObject::with_id("x", "X").with_transform(Transform::from_position(1.0, 0.0).with_parent("y")),
            GameObject::with_id("y", "Y").with_transform(Transform::from_position(0.0, 1.0).with_parent("x")),
            GameObject::with_id("tail", "Tail").with_transform(Transform::from_position(2.0, 0.0).with_parent("y")),
            GameObject::with_id("leaf", "Leaf").with_transform(Transform::from_position(0.0, 3.0).with_parent("tail")),
        ]);

        let all = resolve_all(&s);
        assert_eq!(all.len(), 4);
        for id in ["x", "y", "tail", "leaf"] {
            let id = ObjectId::from(id);
            assert_eq!(all[&id], world_transform(&s, &id).unwrap(), "{id}");
        }
        assert_eq!(all[&ObjectId::from("y")].position, DVec2::new(1.0, 1.0));
    }
}
