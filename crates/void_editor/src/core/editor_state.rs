//! Central editor state - single source of truth.
//!
//! All scene edits go through `SceneEditor` so they land in the history and
//! can be undone.

use std::collections::HashSet;

use void_scene::{
    world_transform, FieldMap, FieldValue, GameObject, HierarchyIndex, ObjectId, Scene, TreeNode,
    WorldTransform,
};

use super::{CommandHistory, EditorConfig};
use crate::commands::{
    self, AddComponentCommand, Command, CommandResult, CreateObjectCommand, DeleteSubtreeCommand,
    RemoveComponentCommand, RenameCommand, ReparentCommand, SetFieldCommand,
};

/// Owns a scene and its undo history.
pub struct SceneEditor {
    scene: Scene,
    history: CommandHistory,
    config: EditorConfig,
    /// Bumped on every apply/invert so views know to refresh
    revision: u64,
}

impl Default for SceneEditor {
    fn default() -> Self {
        Self::new(Scene::default())
    }
}

impl SceneEditor {
    pub fn new(scene: Scene) -> Self {
        Self::with_config(scene, EditorConfig::default())
    }

    pub fn with_config(scene: Scene, config: EditorConfig) -> Self {
        Self {
            scene,
            history: CommandHistory::from_config(&config),
            config,
            revision: 0,
        }
    }

    // ---------------------------------------------------------------------
    // Scene access
    // ---------------------------------------------------------------------

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn into_scene(self) -> Scene {
        self.scene
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    /// Swap in a different scene. History from the old scene is discarded.
    pub fn replace_scene(&mut self, scene: Scene) -> Scene {
        self.history.clear();
        self.revision += 1;
        log::info!("Loaded scene '{}' ({} objects)", scene.metadata.name, scene.len());
        std::mem::replace(&mut self.scene, scene)
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    pub fn find(&self, id: &ObjectId) -> Option<&GameObject> {
        self.scene.find(id)
    }

    pub fn world_transform(&self, id: &ObjectId) -> Option<WorldTransform> {
        world_transform(&self.scene, id)
    }

    pub fn hierarchy(&self) -> HierarchyIndex {
        HierarchyIndex::build(&self.scene)
    }

    /// Direct children of `id`, in store order.
    pub fn children(&self, id: &ObjectId) -> Vec<ObjectId> {
        self.hierarchy().children_of(id).to_vec()
    }

    pub fn descendants(&self, id: &ObjectId) -> HashSet<ObjectId> {
        self.hierarchy().descendants(id)
    }

    pub fn tree(&self) -> Vec<TreeNode> {
        self.hierarchy().tree()
    }

    // ---------------------------------------------------------------------
    // Editing
    // ---------------------------------------------------------------------

    /// Apply a command and record it.
    pub fn execute(&mut self, cmd: Box<dyn Command>) -> CommandResult {
        commands::execute(&mut self.scene, &mut self.history, cmd)?;
        self.revision += 1;
        Ok(())
    }

    /// Add an object, appending when `index` is `None`.
    pub fn create_object(&mut self, object: GameObject, index: Option<usize>) -> CommandResult<ObjectId> {
        let cmd = CreateObjectCommand::new(&self.scene, object, index)?;
        let id = cmd.id().clone();
        self.execute(Box::new(cmd))?;
        Ok(id)
    }

    /// Remove an object and everything beneath it. Returns how many were removed.
    pub fn delete_object(&mut self, id: &ObjectId) -> CommandResult<usize> {
        let cmd = DeleteSubtreeCommand::new(&self.scene, id)?;
        let removed = cmd.removed_count();
        self.execute(Box::new(cmd))?;
        Ok(removed)
    }

    pub fn rename(&mut self, id: &ObjectId, name: impl Into<String>) -> CommandResult {
        let cmd = RenameCommand::new(&self.scene, id, name)?;
        self.execute(Box::new(cmd))
    }

    pub fn reparent(&mut self, id: &ObjectId, parent: Option<ObjectId>) -> CommandResult {
        let cmd = ReparentCommand::new(&self.scene, id, parent)?;
        self.execute(Box::new(cmd))
    }

    pub fn set_field(
        &mut self,
        id: &ObjectId,
        kind: &str,
        field: &str,
        value: impl Into<FieldValue>,
    ) -> CommandResult {
        let cmd = SetFieldCommand::new(&self.scene, id, kind, field, value.into())?;
        self.execute(Box::new(cmd))
    }

    pub fn add_component(&mut self, id: &ObjectId, kind: &str, fields: FieldMap) -> CommandResult {
        let cmd = AddComponentCommand::new(&self.scene, id, kind, fields)?;
        self.execute(Box::new(cmd))
    }

    pub fn remove_component(&mut self, id: &ObjectId, kind: &str) -> CommandResult {
        let cmd = RemoveComponentCommand::new(&self.scene, id, kind)?;
        self.execute(Box::new(cmd))
    }

    // ---------------------------------------------------------------------
    // History
    // ---------------------------------------------------------------------

    pub fn undo(&mut self) -> bool {
        let undone = self.history.undo(&mut self.scene);
        if undone {
            self.revision += 1;
        }
        undone
    }

    pub fn redo(&mut self) -> bool {
        let redone = self.history.redo(&mut self.scene);
        if redone {
            self.revision += 1;
        }
        redone
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.history.undo_description()
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.history.redo_description()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_dirty(&self) -> bool {
        self.history.is_dirty()
    }

    pub fn mark_saved(&mut self) {
        self.history.mark_saved();
    }
}
