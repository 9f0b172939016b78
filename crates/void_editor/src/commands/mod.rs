//! Command pattern implementation for undo/redo support.
//!
//! Every scene edit that should be undoable is a [`Command`]. Constructors
//! validate against the live scene and capture the state needed to invert;
//! a constructor that returns an error leaves both scene and history as
//! they were.

mod command;
mod component_commands;
mod entity_commands;

pub use command::{Command, CommandError, CommandResult};
pub use component_commands::{AddComponentCommand, RemoveComponentCommand, SetFieldCommand};
pub use entity_commands::{CreateObjectCommand, DeleteSubtreeCommand, ReparentCommand, RenameCommand};

use void_scene::Scene;

use crate::core::CommandHistory;

/// Apply a command and add it to history.
pub fn execute(scene: &mut Scene, history: &mut CommandHistory, mut cmd: Box<dyn Command>) -> CommandResult {
    cmd.apply(scene)?;
    history.push(cmd);
    Ok(())
}
