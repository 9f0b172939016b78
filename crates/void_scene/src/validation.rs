//! Scene consistency checks
//!
//! Validation never fails; it reports every problem it finds so the caller
//! can decide whether to load, repair or refuse a scene.

use std::collections::HashSet;
use std::fmt;

use crate::hierarchy::{ancestors, resolved_parent};
use crate::id::ObjectId;
use crate::object::GameObject;
use crate::store::Scene;

/// A single consistency problem
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    /// Object has an empty identifier
    MissingId { name: String },
    /// Two objects share an identifier
    DuplicateId { id: ObjectId, name: String },
    /// Parent reference names no live object
    DanglingParent { id: ObjectId, parent: ObjectId },
    /// Object names itself as parent
    SelfParent { id: ObjectId },
    /// Object is its own ancestor through other objects
    ParentCycle { id: ObjectId },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingId { name } => write!(f, "Object missing ID: {}", name),
            Self::DuplicateId { id, name } => {
                write!(f, "Duplicate object ID found: {} on '{}'", id, name)
            }
            Self::DanglingParent { id, parent } => {
                write!(f, "Object {} references missing parent {}", id, parent)
            }
            Self::SelfParent { id } => write!(f, "Object {} is its own parent", id),
            Self::ParentCycle { id } => write!(f, "Object {} is part of a parent cycle", id),
        }
    }
}

/// Check a raw object list before building a store from it
pub fn validate_objects(objects: &[GameObject]) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let mut seen = HashSet::new();

    for object in objects {
        if object.id().is_empty() {
            issues.push(ValidationIssue::MissingId {
                name: object.name.clone(),
            });
        } else if !seen.insert(object.id()) {
            issues.push(ValidationIssue::DuplicateId {
                id: object.id().clone(),
                name: object.name.clone(),
            });
        }
    }

    issues
}

/// Check hierarchy consistency of a live scene
pub fn validate(scene: &Scene) -> Vec<ValidationIssue> {
    let mut issues = validate_objects(scene.objects());

    for object in scene.objects() {
        let Some(parent) = object.parent_id() else {
            continue;
        };

        if parent == object.id() {
            issues.push(ValidationIssue::SelfParent {
                id: object.id().clone(),
            });
        } else if !scene.contains(parent) {
            issues.push(ValidationIssue::DanglingParent {
                id: object.id().clone(),
                parent: parent.clone(),
            });
        } else if resolved_parent(scene, object).is_some() && in_cycle(scene, object.id()) {
            issues.push(ValidationIssue::ParentCycle {
                id: object.id().clone(),
            });
        }
    }

    if !issues.is_empty() {
        log::debug!("Scene '{}' has {} validation issue(s)", scene.metadata.name, issues.len());
    }
    issues
}

fn in_cycle(scene: &Scene, id: &ObjectId) -> bool {
    // The ancestor walk stops right before revisiting an id; if the last
    // ancestor points back at us the object sits on a cycle.
    ancestors(scene, id)
        .last()
        .and_then(|last| scene.find(last))
        .and_then(|last| resolved_parent(scene, last))
        .is_some_and(|p| p == id)
}
