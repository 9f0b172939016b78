//! Command trait and result types.

use std::any::Any;

use thiserror::Error;
use void_scene::{FieldError, ObjectId, Scene, SceneError};

/// Result type for command construction and execution.
pub type CommandResult<T = ()> = Result<T, CommandError>;

/// Reasons a command was rejected or could not reach its target.
///
/// A rejected command never changes the scene and never enters the history.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    /// Target object is not live
    #[error("Entity not found: {0}")]
    EntityNotFound(ObjectId),

    /// Requested parent is not live
    #[error("Parent not found: {0}")]
    ParentNotFound(ObjectId),

    /// Object cannot be its own parent
    #[error("Cannot parent {0} to itself")]
    SelfParent(ObjectId),

    /// Requested parent is a descendant of the object
    #[error("Parenting {object} under {parent} would create a cycle")]
    CycleDetected { object: ObjectId, parent: ObjectId },

    /// Object has no component of this kind
    #[error("Component '{kind}' not found on {object}")]
    ComponentNotFound { object: ObjectId, kind: String },

    /// Object already has a component of this kind
    #[error("Component '{kind}' already present on {object}")]
    ComponentExists { object: ObjectId, kind: String },

    /// Component every object must own exactly once
    #[error("Component '{0}' is required and cannot be added or removed")]
    RequiredComponent(String),

    /// Field that must be edited through a dedicated command
    #[error("Field '{kind}.{field}' cannot be edited directly")]
    ProtectedField { kind: String, field: String },

    /// Scene store rejected the edit
    #[error(transparent)]
    Scene(#[from] SceneError),
}

impl From<FieldError> for CommandError {
    fn from(e: FieldError) -> Self {
        CommandError::Scene(e.into())
    }
}

/// A reversible scene mutation.
///
/// Commands capture whatever prior state they need when they are built, so
/// `invert` restores the scene exactly as it was before `apply`. Both steps
/// are total: if the target has disappeared they change nothing and report
/// why.
///
/// # Example
///
/// ```ignore
/// struct HideCommand {
///     id: ObjectId,
///     was_active: bool,
/// }
///
/// impl Command for HideCommand {
///     fn description(&self) -> &str { "Hide Object" }
///
///     fn apply(&mut self, scene: &mut Scene) -> CommandResult {
///         let object = scene.find_mut(&self.id).ok_or_else(|| CommandError::EntityNotFound(self.id.clone()))?;
///         object.active = false;
///         Ok(())
///     }
///
///     fn invert(&mut self, scene: &mut Scene) -> CommandResult {
///         let object = scene.find_mut(&self.id).ok_or_else(|| CommandError::EntityNotFound(self.id.clone()))?;
///         object.active = self.was_active;
///         Ok(())
///     }
///
///     fn as_any(&self) -> &dyn Any { self }
/// }
/// ```
pub trait Command: Send + Sync {
    /// Human-readable description for the undo/redo menu.
    fn description(&self) -> &str;

    /// Apply the command, modifying the scene.
    fn apply(&mut self, scene: &mut Scene) -> CommandResult;

    /// Invert the command, restoring the previous state.
    fn invert(&mut self, scene: &mut Scene) -> CommandResult;

    /// Try to absorb the next command into this one.
    ///
    /// Returns true if `next` was merged; the history then keeps only this
    /// command. Merging adjusts bookkeeping only: the caller has already
    /// applied `next` to the scene.
    fn merge(&mut self, _next: &dyn Command) -> bool {
        false
    }

    /// Downcasting support for [`Command::merge`].
    fn as_any(&self) -> &dyn Any;
}

/// Look up a live object or report it missing.
pub(crate) fn require<'a>(
    scene: &'a mut Scene,
    id: &ObjectId,
) -> CommandResult<&'a mut void_scene::GameObject> {
    scene
        .find_mut(id)
        .ok_or_else(|| CommandError::EntityNotFound(id.clone()))
}
