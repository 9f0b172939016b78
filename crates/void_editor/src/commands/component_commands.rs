//! Component commands: field edits, attaching and detaching components.

use std::any::Any;

use void_scene::{FieldMap, FieldValue, ObjectId, Scene, Transform, TRANSFORM};

use super::command::{require, Command, CommandError, CommandResult};

/// Command to set one field of one component.
///
/// Consecutive edits of the same field on the same object merge into a
/// single history entry: the entry keeps the value from before the first
/// edit and the value from the latest one, so a whole drag undoes in one
/// step.
pub struct SetFieldCommand {
    id: ObjectId,
    kind: String,
    field: String,
    new_value: FieldValue,
    /// `None` if the field did not exist before the edit
    old_value: Option<FieldValue>,
    description: String,
}

impl SetFieldCommand {
    pub fn new(
        scene: &Scene,
        id: &ObjectId,
        kind: impl Into<String>,
        field: impl Into<String>,
        new_value: FieldValue,
    ) -> CommandResult<Self> {
        let kind = kind.into();
        let field = field.into();
        let object = scene
            .find(id)
            .ok_or_else(|| CommandError::EntityNotFound(id.clone()))?;

        if kind == TRANSFORM {
            if field == "parent_id" {
                return Err(CommandError::ProtectedField { kind, field });
            }
            Transform::check_field(&field, &new_value)?;
        } else if !object.has_component(&kind) {
            return Err(CommandError::ComponentNotFound {
                object: id.clone(),
                kind,
            });
        }

        Ok(Self {
            old_value: object.field(&kind, &field),
            description: format!("Set {}.{}", kind, field),
            id: id.clone(),
            kind,
            field,
            new_value,
        })
    }

    pub fn id(&self) -> &ObjectId {
        &self.id
    }

    fn targets_same_field(&self, other: &SetFieldCommand) -> bool {
        self.id == other.id && self.kind == other.kind && self.field == other.field
    }
}

impl Command for SetFieldCommand {
    fn description(&self) -> &str {
        &self.description
    }

    fn apply(&mut self, scene: &mut Scene) -> CommandResult {
        require(scene, &self.id)?.set_field(&self.kind, &self.field, self.new_value.clone())?;
        Ok(())
    }

    fn invert(&mut self, scene: &mut Scene) -> CommandResult {
        let object = require(scene, &self.id)?;
        match &self.old_value {
            Some(old) => {
                object.set_field(&self.kind, &self.field, old.clone())?;
            }
            None => {
                object.remove_field(&self.kind, &self.field);
            }
        }
        Ok(())
    }

    fn merge(&mut self, next: &dyn Command) -> bool {
        let Some(next) = next.as_any().downcast_ref::<SetFieldCommand>() else {
            return false;
        };
        if !self.targets_same_field(next) {
            return false;
        }
        self.new_value = next.new_value.clone();
        true
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Command to attach a new component.
pub struct AddComponentCommand {
    id: ObjectId,
    kind: String,
    fields: FieldMap,
}

impl AddComponentCommand {
    pub fn new(scene: &Scene, id: &ObjectId, kind: impl Into<String>, fields: FieldMap) -> CommandResult<Self> {
        let kind = kind.into();
        if kind == TRANSFORM {
            return Err(CommandError::RequiredComponent(kind));
        }
        let object = scene
            .find(id)
            .ok_or_else(|| CommandError::EntityNotFound(id.clone()))?;
        if object.has_component(&kind) {
            return Err(CommandError::ComponentExists {
                object: id.clone(),
                kind,
            });
        }
        Ok(Self {
            id: id.clone(),
            kind,
            fields,
        })
    }
}

impl Command for AddComponentCommand {
    fn description(&self) -> &str {
        "Add Component"
    }

    fn apply(&mut self, scene: &mut Scene) -> CommandResult {
        require(scene, &self.id)?.insert_component(self.kind.clone(), self.fields.clone())?;
        Ok(())
    }

    fn invert(&mut self, scene: &mut Scene) -> CommandResult {
        require(scene, &self.id)?.remove_component(&self.kind);
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Command to detach a component, keeping its payload for undo.
pub struct RemoveComponentCommand {
    id: ObjectId,
    kind: String,
    old_fields: FieldMap,
}

impl RemoveComponentCommand {
    pub fn new(scene: &Scene, id: &ObjectId, kind: impl Into<String>) -> CommandResult<Self> {
        let kind = kind.into();
        if kind == TRANSFORM {
            return Err(CommandError::RequiredComponent(kind));
        }
        let object = scene
            .find(id)
            .ok_or_else(|| CommandError::EntityNotFound(id.clone()))?;
        let old_fields = object
            .component(&kind)
            .ok_or_else(|| CommandError::ComponentNotFound {
                object: id.clone(),
                kind: kind.clone(),
            })?
            .into_owned();
        Ok(Self {
            id: id.clone(),
            kind,
            old_fields,
        })
    }
}

impl Command for RemoveComponentCommand {
    fn description(&self) -> &str {
        "Remove Component"
    }

    fn apply(&mut self, scene: &mut Scene) -> CommandResult {
        require(scene, &self.id)?.remove_component(&self.kind);
        Ok(())
    }

    fn invert(&mut self, scene: &mut Scene) -> CommandResult {
        require(scene, &self.id)?.insert_component(self.kind.clone(), self.old_fields.clone())?;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
