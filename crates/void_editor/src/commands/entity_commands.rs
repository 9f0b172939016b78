//! Object creation, subtree deletion, renaming and reparenting commands.

use std::any::Any;
use std::collections::HashSet;

use void_scene::{is_ancestor, GameObject, HierarchyIndex, ObjectId, Scene};

use super::command::{require, Command, CommandError, CommandResult};

/// Command to insert a new object.
pub struct CreateObjectCommand {
    object: GameObject,
    index: Option<usize>,
}

impl CreateObjectCommand {
    /// Create at a sequence index, or at the end if `index` is `None`.
    pub fn new(scene: &Scene, object: GameObject, index: Option<usize>) -> CommandResult<Self> {
        if scene.contains(object.id()) {
            return Err(void_scene::SceneError::DuplicateId(object.id().clone()).into());
        }
        Ok(Self { object, index })
    }

    pub fn id(&self) -> &ObjectId {
        self.object.id()
    }
}

impl Command for CreateObjectCommand {
    fn description(&self) -> &str {
        "Create Object"
    }

    fn apply(&mut self, scene: &mut Scene) -> CommandResult {
        let object = self.object.clone();
        let index = match self.index {
            Some(index) => scene.insert_at(index, object)?,
            None => scene.append(object)?,
        };
        log::debug!("Created {} at index {}", self.object.id(), index);
        Ok(())
    }

    fn invert(&mut self, scene: &mut Scene) -> CommandResult {
        match scene.remove(self.object.id()) {
            Some(_) => Ok(()),
            None => Err(CommandError::EntityNotFound(self.object.id().clone())),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Command to delete an object together with all of its descendants.
///
/// The whole subtree and each member's sequence index are captured when the
/// command is built. Removal runs from the highest index down so earlier
/// removals never shift entries still waiting to be removed; restoration
/// runs from the lowest index up, which puts every object back exactly where
/// it was.
pub struct DeleteSubtreeCommand {
    target: ObjectId,
    removed: Vec<(usize, GameObject)>,
}

impl DeleteSubtreeCommand {
    pub fn new(scene: &Scene, target: &ObjectId) -> CommandResult<Self> {
        if !scene.contains(target) {
            return Err(CommandError::EntityNotFound(target.clone()));
        }

        let subtree: HashSet<ObjectId> = HierarchyIndex::build(scene)
            .subtree(target)
            .into_iter()
            .collect();

        let removed = scene
            .objects()
            .iter()
            .enumerate()
            .filter(|(_, object)| subtree.contains(object.id()))
            .map(|(index, object)| (index, object.clone()))
            .collect();

        Ok(Self {
            target: target.clone(),
            removed,
        })
    }

    pub fn target(&self) -> &ObjectId {
        &self.target
    }

    /// Number of objects removed, target included
    pub fn removed_count(&self) -> usize {
        self.removed.len()
    }
}

impl Command for DeleteSubtreeCommand {
    fn description(&self) -> &str {
        "Delete Object"
    }

    fn apply(&mut self, scene: &mut Scene) -> CommandResult {
        for (index, object) in self.removed.iter().rev() {
            let in_place = scene.get(*index).is_some_and(|o| o.id() == object.id());
            let taken = if in_place {
                scene.remove_at(*index)
            } else {
                log::warn!("{} moved from index {}, removing by id", object.id(), index);
                scene.remove(object.id())
            };
            if taken.is_none() {
                log::warn!("{} already gone while deleting subtree of {}", object.id(), self.target);
            }
        }
        log::debug!("Deleted {} object(s) under {}", self.removed.len(), self.target);
        Ok(())
    }

    fn invert(&mut self, scene: &mut Scene) -> CommandResult {
        for (index, object) in &self.removed {
            if let Err(e) = scene.insert_at(*index, object.clone()) {
                log::warn!("Could not restore {}: {}", object.id(), e);
            }
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Command to change an object's display name.
pub struct RenameCommand {
    id: ObjectId,
    new_name: String,
    old_name: String,
}

impl RenameCommand {
    pub fn new(scene: &Scene, id: &ObjectId, new_name: impl Into<String>) -> CommandResult<Self> {
        let object = scene
            .find(id)
            .ok_or_else(|| CommandError::EntityNotFound(id.clone()))?;
        Ok(Self {
            id: id.clone(),
            new_name: new_name.into(),
            old_name: object.name.clone(),
        })
    }
}

impl Command for RenameCommand {
    fn description(&self) -> &str {
        "Rename Object"
    }

    fn apply(&mut self, scene: &mut Scene) -> CommandResult {
        require(scene, &self.id)?.name = self.new_name.clone();
        Ok(())
    }

    fn invert(&mut self, scene: &mut Scene) -> CommandResult {
        require(scene, &self.id)?.name = self.old_name.clone();
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Command to change an object's parent in the hierarchy.
///
/// Rejected when the object would become its own ancestor: parenting to
/// itself, or to any object in its own subtree.
pub struct ReparentCommand {
    id: ObjectId,
    new_parent: Option<ObjectId>,
    old_parent: Option<ObjectId>,
}

impl ReparentCommand {
    pub fn new(scene: &Scene, id: &ObjectId, new_parent: Option<ObjectId>) -> CommandResult<Self> {
        let object = scene
            .find(id)
            .ok_or_else(|| CommandError::EntityNotFound(id.clone()))?;

        if let Some(parent) = &new_parent {
            if parent == id {
                return Err(CommandError::SelfParent(id.clone()));
            }
            if !scene.contains(parent) {
                return Err(CommandError::ParentNotFound(parent.clone()));
            }
            if is_ancestor(scene, id, parent) {
                return Err(CommandError::CycleDetected {
                    object: id.clone(),
                    parent: parent.clone(),
                });
            }
        }

        Ok(Self {
            id: id.clone(),
            new_parent,
            old_parent: object.parent_id().cloned(),
        })
    }
}

impl Command for ReparentCommand {
    fn description(&self) -> &str {
        "Reparent Object"
    }

    fn apply(&mut self, scene: &mut Scene) -> CommandResult {
        require(scene, &self.id)?.transform.parent_id = self.new_parent.clone();
        Ok(())
    }

    fn invert(&mut self, scene: &mut Scene) -> CommandResult {
        require(scene, &self.id)?.transform.parent_id = self.old_parent.clone();
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use void_scene::Transform;

    fn family() -> Scene {
        let mut scene = Scene::new("family");
        let objects = [
            ("root", None),
            ("other", None),
            ("a", Some("root")),
            ("a1", Some("a")),
            ("b", Some("root")),
        ];
        for (id, parent) in objects {
            let transform = match parent {
                Some(p) => Transform::IDENTITY.with_parent(p),
                None => Transform::IDENTITY,
            };
            scene.append(GameObject::with_id(id, id).with_transform(transform)).unwrap();
        }
        scene
    }

    fn order(scene: &Scene) -> Vec<&str> {
        scene.objects().iter().map(|o| o.id().as_str()).collect()
    }

    #[test]
    fn test_create_at_index_and_invert() {
        let mut scene = family();
        let mut cmd = CreateObjectCommand::new(&scene, GameObject::with_id("new", "New"), Some(1)).unwrap();
        cmd.apply(&mut scene).unwrap();
        assert_eq!(scene.position(&"new".into()), Some(1));

        cmd.invert(&mut scene).unwrap();
        assert_eq!(scene, family());
    }

    #[test]
    fn test_create_duplicate_rejected() {
        let scene = family();
        assert!(CreateObjectCommand::new(&scene, GameObject::with_id("a", "A"), None).is_err());
    }

    #[test]
    fn test_delete_subtree_restores_order() {
        let mut scene = family();
        let mut cmd = DeleteSubtreeCommand::new(&scene, &"root".into()).unwrap();
        assert_eq!(cmd.removed_count(), 4);

        cmd.apply(&mut scene).unwrap();
        assert_eq!(order(&scene), vec!["other"]);

        cmd.invert(&mut scene).unwrap();
        assert_eq!(order(&scene), vec!["root", "other", "a", "a1", "b"]);
        assert_eq!(scene, family());
    }

    #[test]
    fn test_rename_round_trip() {
        let mut scene = family();
        let mut cmd = RenameCommand::new(&scene, &"a".into(), "Arm").unwrap();
        cmd.apply(&mut scene).unwrap();
        assert_eq!(scene.find(&"a".into()).unwrap().name, "Arm");
        cmd.invert(&mut scene).unwrap();
        assert_eq!(scene.find(&"a".into()).unwrap().name, "a");
    }

    #[test]
    fn test_reparent_rejections() {
        let scene = family();
        assert_eq!(
            ReparentCommand::new(&scene, &"a".into(), Some("a".into())).err(),
            Some(CommandError::SelfParent("a".into()))
        );
        assert_eq!(
            ReparentCommand::new(&scene, &"a".into(), Some("ghost".into())).err(),
            Some(CommandError::ParentNotFound("ghost".into()))
        );
        assert!(matches!(
            ReparentCommand::new(&scene, &"root".into(), Some("a1".into())),
            Err(CommandError::CycleDetected { .. })
        ));
    }

    #[test]
    fn test_reparent_round_trip() {
        let mut scene = family();
        let mut cmd = ReparentCommand::new(&scene, &"a1".into(), Some("other".into())).unwrap();
        cmd.apply(&mut scene).unwrap();
        assert_eq!(scene.find(&"a1".into()).unwrap().parent_id(), Some(&"other".into()));

        cmd.invert(&mut scene).unwrap();
        assert_eq!(scene, family());

        let mut to_root = ReparentCommand::new(&scene, &"b".into(), None).unwrap();
        to_root.apply(&mut scene).unwrap();
        assert!(scene.find(&"b".into()).unwrap().parent_id().is_none());
    }

    #[test]
    fn test_missing_target_is_noop() {
        let mut scene = family();
        let mut cmd = RenameCommand::new(&scene, &"b".into(), "Gone").unwrap();
        scene.remove(&"b".into());
        let before = scene.clone();

        assert!(matches!(cmd.apply(&mut scene), Err(CommandError::EntityNotFound(_))));
        assert_eq!(scene, before);
    }
}
