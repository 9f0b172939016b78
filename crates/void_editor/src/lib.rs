//! Void Scene Editor
//!
//! Undoable editing on top of [`void_scene`].
//!
//! ## Features
//!
//! - **Commands**: create, delete subtree, rename, reparent and component edits
//! - **Undo/Redo**: bounded linear history with merging of repeated field edits
//! - **Config**: TOML-backed editor settings
//!
//! ## Architecture
//!
//! ```text
//! Caller → SceneEditor → Command → Scene
//!                      ↘ CommandHistory
//! ```
//!
//! Every modification goes through the command system so it can be undone.
//!
//! ```
//! use void_editor::SceneEditor;
//! use void_scene::{GameObject, Scene};
//!
//! let mut editor = SceneEditor::new(Scene::new("Demo"));
//! let id = editor.create_object(GameObject::new("Player"), None).unwrap();
//! editor.set_field(&id, "Transform", "rotation", 45.0_f64).unwrap();
//! assert!(editor.undo());
//! assert!(editor.undo());
//! assert!(editor.scene().is_empty());
//! ```

pub mod commands;
pub mod core;

// Re-export commonly used types
pub use crate::core::{CommandHistory, ConfigError, EditorConfig, SceneEditor};

pub use crate::commands::{
    AddComponentCommand, Command, CommandError, CommandResult, CreateObjectCommand,
    DeleteSubtreeCommand, RemoveComponentCommand, RenameCommand, ReparentCommand, SetFieldCommand,
};

/// Editor version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Editor name
pub const NAME: &str = "Void Scene Editor";
