//! Bounded linear undo/redo history.
//!
//! Two sequences: `applied` (undo side, oldest at the front) and `undone`
//! (redo side, most recently undone on top). Pushing a new command discards
//! the redo side, so there is never more than one redo branch. When the
//! applied side outgrows its capacity the oldest entry is dropped for good.

use std::collections::VecDeque;

use void_scene::Scene;

use crate::commands::Command;
use crate::core::EditorConfig;

/// Undo/redo history stack.
pub struct CommandHistory {
    /// Commands that can be undone
    applied: VecDeque<Box<dyn Command>>,
    /// Commands that can be redone
    undone: Vec<Box<dyn Command>>,
    /// Maximum number of undoable commands
    capacity: usize,
    /// Whether adjacent commands may merge
    merge_enabled: bool,
    /// Whether history has been modified since last save
    dirty: bool,
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandHistory {
    /// Default maximum history size.
    pub const DEFAULT_CAPACITY: usize = 50;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            applied: VecDeque::with_capacity(capacity.min(1024)),
            undone: Vec::new(),
            capacity,
            merge_enabled: true,
            dirty: false,
        }
    }

    pub fn from_config(config: &EditorConfig) -> Self {
        let mut history = Self::with_capacity(config.history_capacity);
        history.merge_enabled = config.merge_field_edits;
        history
    }

    /// Record a command that has already been applied.
    ///
    /// If the top entry accepts the command as a merge, the command is
    /// absorbed and the redo side is left alone. Otherwise it becomes the
    /// new top entry and the redo side is cleared.
    pub fn push(&mut self, cmd: Box<dyn Command>) {
        self.dirty = true;

        if self.merge_enabled {
            if let Some(top) = self.applied.back_mut() {
                if top.merge(&*cmd) {
                    log::debug!("Merged '{}' into previous entry", cmd.description());
                    return;
                }
            }
        }

        self.applied.push_back(cmd);
        self.undone.clear();

        while self.applied.len() > self.capacity {
            if let Some(evicted) = self.applied.pop_front() {
                log::info!("History full, dropping '{}'", evicted.description());
            }
        }
    }

    /// Invert the most recent command. Returns false if there was nothing to undo.
    pub fn undo(&mut self, scene: &mut Scene) -> bool {
        let Some(mut cmd) = self.applied.pop_back() else {
            return false;
        };
        if let Err(e) = cmd.invert(scene) {
            log::warn!("Undo of '{}' changed nothing: {}", cmd.description(), e);
        } else {
            log::debug!("Undo: {}", cmd.description());
        }
        self.undone.push(cmd);
        self.dirty = true;
        true
    }

    /// Re-apply the most recently undone command. Returns false if there was nothing to redo.
    pub fn redo(&mut self, scene: &mut Scene) -> bool {
        let Some(mut cmd) = self.undone.pop() else {
            return false;
        };
        if let Err(e) = cmd.apply(scene) {
            log::warn!("Redo of '{}' changed nothing: {}", cmd.description(), e);
        } else {
            log::debug!("Redo: {}", cmd.description());
        }
        self.applied.push_back(cmd);
        self.dirty = true;
        true
    }

    /// Check if there are commands to undo.
    pub fn can_undo(&self) -> bool {
        !self.applied.is_empty()
    }

    /// Check if there are commands to redo.
    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    /// Get the description of the next undo command.
    pub fn undo_description(&self) -> Option<&str> {
        self.applied.back().map(|c| c.description())
    }

    /// Get the description of the next redo command.
    pub fn redo_description(&self) -> Option<&str> {
        self.undone.last().map(|c| c.description())
    }

    /// Get the number of commands in the undo stack.
    pub fn undo_count(&self) -> usize {
        self.applied.len()
    }

    /// Get the number of commands in the redo stack.
    pub fn redo_count(&self) -> usize {
        self.undone.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Check the dirty flag.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark as saved (clears dirty flag).
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    /// Clear all history.
    pub fn clear(&mut self) {
        self.applied.clear();
        self.undone.clear();
        self.dirty = false;
    }
}
