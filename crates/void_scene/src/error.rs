//! Error types for the scene store

use thiserror::Error;

use crate::id::ObjectId;

/// Scene store errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    /// An object with this identifier is already live
    #[error("Duplicate object id: {0}")]
    DuplicateId(ObjectId),

    /// No live object has this identifier
    #[error("Object not found: {0}")]
    ObjectNotFound(ObjectId),

    /// The object carries no component of this kind
    #[error("Object {object} has no '{kind}' component")]
    ComponentNotFound { object: ObjectId, kind: String },

    /// A component field could not be read or written
    #[error(transparent)]
    Field(#[from] FieldError),
}

/// Component field access errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    /// The component kind has no field with this name
    #[error("Unknown field '{field}' on component '{kind}'")]
    UnknownField { kind: String, field: String },

    /// The value has the wrong shape for a typed field
    #[error("Field '{field}' expects {expected}")]
    TypeMismatch { field: String, expected: &'static str },
}

/// Result type for scene operations
pub type Result<T> = std::result::Result<T, SceneError>;
