//! Core editor state: history, configuration and the editing facade.

mod config;
mod editor_state;
mod history;

pub use config::{ConfigError, EditorConfig};
pub use editor_state::SceneEditor;
pub use history::CommandHistory;
