//! Game objects and their component payloads
//!
//! Every [`GameObject`] owns exactly one [`Transform`], stored in a typed
//! slot, plus any number of open component records keyed by kind name. The
//! generic component API addresses the transform under the kind name
//! [`TRANSFORM`] so callers can treat all components uniformly while writes
//! to transform fields stay type checked.

use std::borrow::Cow;
use std::collections::BTreeMap;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::{FieldError, SceneError};
use crate::id::ObjectId;
use crate::value::{FieldMap, FieldValue};

/// Kind name of the transform component
pub const TRANSFORM: &str = "Transform";

/// Local 2D transform of an object relative to its parent.
///
/// `parent_id` is a weak reference: it names the parent by identifier and is
/// resolved through the scene every time it is needed.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    pub position: DVec2,
    /// Rotation in degrees
    pub rotation: f64,
    pub scale: DVec2,
    pub parent_id: Option<ObjectId>,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// Identity transform with no parent
    pub const IDENTITY: Self = Self {
        position: DVec2::ZERO,
        rotation: 0.0,
        scale: DVec2::ONE,
        parent_id: None,
    };

    /// Field names addressable through the generic component API
    pub const FIELDS: [&'static str; 4] = ["position", "rotation", "scale", "parent_id"];

    /// Create from position only
    pub fn from_position(x: f64, y: f64) -> Self {
        Self {
            position: DVec2::new(x, y),
            ..Self::IDENTITY
        }
    }

    /// Set position (builder pattern)
    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.position = DVec2::new(x, y);
        self
    }

    /// Set rotation in degrees (builder pattern)
    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    /// Set scale (builder pattern)
    pub fn with_scale(mut self, x: f64, y: f64) -> Self {
        self.scale = DVec2::new(x, y);
        self
    }

    /// Set parent (builder pattern)
    pub fn with_parent(mut self, parent: impl Into<ObjectId>) -> Self {
        self.parent_id = Some(parent.into());
        self
    }

    /// Read one field as a dynamic value
    pub fn get_field(&self, field: &str) -> Result<FieldValue, FieldError> {
        match field {
            "position" => Ok(FieldValue::Vec2(self.position.to_array())),
            "rotation" => Ok(FieldValue::Float(self.rotation)),
            "scale" => Ok(FieldValue::Vec2(self.scale.to_array())),
            "parent_id" => Ok(match &self.parent_id {
                Some(id) => FieldValue::String(id.as_str().to_string()),
                None => FieldValue::Null,
            }),
            _ => Err(unknown_field(field)),
        }
    }

    /// Check that a value has the right shape for a field without writing it
    pub fn check_field(field: &str, value: &FieldValue) -> Result<(), FieldError> {
        let ok = match field {
            "position" | "scale" => value.as_vec2().is_some(),
            "rotation" => value.as_float().is_some(),
            "parent_id" => value.is_null() || value.as_str().is_some(),
            _ => return Err(unknown_field(field)),
        };
        if ok {
            Ok(())
        } else {
            Err(FieldError::TypeMismatch {
                field: field.to_string(),
                expected: expected_shape(field),
            })
        }
    }

    /// Write one field from a dynamic value
    pub fn set_field(&mut self, field: &str, value: &FieldValue) -> Result<(), FieldError> {
        Self::check_field(field, value)?;
        match (field, value) {
            ("position", FieldValue::Vec2(v)) => self.position = DVec2::from_array(*v),
            ("scale", FieldValue::Vec2(v)) => self.scale = DVec2::from_array(*v),
            ("rotation", v) => self.rotation = v.as_float().unwrap_or(self.rotation),
            ("parent_id", FieldValue::String(s)) => self.parent_id = Some(ObjectId::new(s.clone())),
            ("parent_id", _) => self.parent_id = None,
            _ => {}
        }
        Ok(())
    }

    /// Convert to an open record
    pub fn to_fields(&self) -> FieldMap {
        Self::FIELDS
            .iter()
            .filter_map(|f| self.get_field(f).ok().map(|v| (f.to_string(), v)))
            .collect()
    }

    /// Build from an open record. Missing fields keep identity values.
    pub fn from_fields(fields: &FieldMap) -> Result<Self, FieldError> {
        let mut transform = Self::IDENTITY;
        for (name, value) in fields {
            if !Self::FIELDS.contains(&name.as_str()) {
                log::warn!("Ignoring unknown transform field '{}'", name);
                continue;
            }
            transform.set_field(name, value)?;
        }
        Ok(transform)
    }
}

fn unknown_field(field: &str) -> FieldError {
    FieldError::UnknownField {
        kind: TRANSFORM.to_string(),
        field: field.to_string(),
    }
}

fn expected_shape(field: &str) -> &'static str {
    match field {
        "position" | "scale" => "a 2D vector",
        "rotation" => "a number",
        _ => "a string or null",
    }
}

/// A scene object: identity, display state, transform and open components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ObjectRecord", into = "ObjectRecord")]
pub struct GameObject {
    /// Fixed at construction; the store indexes objects by it
    id: ObjectId,
    pub name: String,
    pub active: bool,
    pub transform: Transform,
    components: BTreeMap<String, FieldMap>,
}

impl GameObject {
    /// Create an object with a fresh identifier and an identity transform
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(ObjectId::generate(), name)
    }

    /// Create an object with a known identifier
    pub fn with_id(id: impl Into<ObjectId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            active: true,
            transform: Transform::IDENTITY,
            components: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> &ObjectId {
        &self.id
    }

    /// Set transform (builder pattern)
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Attach a component record (builder pattern)
    pub fn with_component(mut self, kind: impl Into<String>, fields: FieldMap) -> Self {
        let kind = kind.into();
        if kind == TRANSFORM {
            match Transform::from_fields(&fields) {
                Ok(t) => self.transform = t,
                Err(e) => log::warn!("Ignoring malformed transform on {}: {}", self.id, e),
            }
        } else {
            self.components.insert(kind, fields);
        }
        self
    }

    /// Parent reference from the transform, if any
    #[inline]
    pub fn parent_id(&self) -> Option<&ObjectId> {
        self.transform.parent_id.as_ref()
    }

    /// Check if the object carries a component of this kind
    pub fn has_component(&self, kind: &str) -> bool {
        kind == TRANSFORM || self.components.contains_key(kind)
    }

    /// Iterate component kind names, transform first
    pub fn component_kinds(&self) -> impl Iterator<Item = &str> {
        std::iter::once(TRANSFORM).chain(self.components.keys().map(String::as_str))
    }

    /// Get a component payload as an open record
    pub fn component(&self, kind: &str) -> Option<Cow<'_, FieldMap>> {
        if kind == TRANSFORM {
            Some(Cow::Owned(self.transform.to_fields()))
        } else {
            self.components.get(kind).map(Cow::Borrowed)
        }
    }

    /// Read one field of one component
    pub fn field(&self, kind: &str, field: &str) -> Option<FieldValue> {
        if kind == TRANSFORM {
            self.transform.get_field(field).ok()
        } else {
            self.components.get(kind)?.get(field).cloned()
        }
    }

    /// Write one field of one component, returning the previous value.
    pub fn set_field(
        &mut self,
        kind: &str,
        field: &str,
        value: FieldValue,
    ) -> Result<Option<FieldValue>, SceneError> {
        if kind == TRANSFORM {
            let old = self.transform.get_field(field)?;
            self.transform.set_field(field, &value)?;
            return Ok(Some(old));
        }
        let fields = self
            .components
            .get_mut(kind)
            .ok_or_else(|| SceneError::ComponentNotFound {
                object: self.id.clone(),
                kind: kind.to_string(),
            })?;
        Ok(fields.insert(field.to_string(), value))
    }

    /// Remove one field of a record component. Transform fields cannot be removed.
    pub fn remove_field(&mut self, kind: &str, field: &str) -> Option<FieldValue> {
        self.components.get_mut(kind)?.remove(field)
    }

    /// Attach or replace a component, returning the previous payload
    pub fn insert_component(
        &mut self,
        kind: impl Into<String>,
        fields: FieldMap,
    ) -> Result<Option<FieldMap>, SceneError> {
        let kind = kind.into();
        if kind == TRANSFORM {
            let transform = Transform::from_fields(&fields)?;
            let old = std::mem::replace(&mut self.transform, transform);
            return Ok(Some(old.to_fields()));
        }
        Ok(self.components.insert(kind, fields))
    }

    /// Detach a record component. The transform is never removed.
    pub fn remove_component(&mut self, kind: &str) -> Option<FieldMap> {
        self.components.remove(kind)
    }
}

/// Serialized shape of a game object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectRecord {
    pub id: ObjectId,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub components: BTreeMap<String, FieldMap>,
}

fn default_name() -> String {
    "GameObject".to_string()
}

fn default_active() -> bool {
    true
}

impl TryFrom<ObjectRecord> for GameObject {
    type Error = FieldError;

    fn try_from(mut record: ObjectRecord) -> Result<Self, Self::Error> {
        let transform = match record.components.remove(TRANSFORM) {
            Some(fields) => Transform::from_fields(&fields)?,
            None => Transform::IDENTITY,
        };
        Ok(Self {
            id: record.id,
            name: record.name,
            active: record.active,
            transform,
            components: record.components,
        })
    }
}

impl From<GameObject> for ObjectRecord {
    fn from(obj: GameObject) -> Self {
        let mut components = obj.components;
        components.insert(TRANSFORM.to_string(), obj.transform.to_fields());
        Self {
            id: obj.id,
            name: obj.name,
            active: obj.active,
            components,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rigid_body() -> FieldMap {
        [("mass".to_string(), FieldValue::from(10.0))].into_iter().collect()
    }

    #[test]
    fn test_transform_fields() {
        let mut t = Transform::from_position(10.0, 20.0).with_parent("root");
        assert_eq!(t.get_field("position").unwrap(), FieldValue::Vec2([10.0, 20.0]));
        assert_eq!(t.get_field("parent_id").unwrap(), FieldValue::from("root"));

        t.set_field("rotation", &FieldValue::Int(45)).unwrap();
        assert_eq!(t.rotation, 45.0);

        t.set_field("parent_id", &FieldValue::Null).unwrap();
        assert!(t.parent_id.is_none());
    }

    #[test]
    fn test_transform_type_mismatch() {
        let mut t = Transform::IDENTITY;
        let err = t.set_field("position", &FieldValue::from("left")).unwrap_err();
        assert!(matches!(err, FieldError::TypeMismatch { .. }));
        assert_eq!(t, Transform::IDENTITY);

        let err = t.set_field("skew", &FieldValue::from(1.0)).unwrap_err();
        assert!(matches!(err, FieldError::UnknownField { .. }));
    }

    #[test]
    fn test_component_api() {
        let mut obj = GameObject::with_id("a", "Ball").with_component("RigidBody", rigid_body());
        assert!(obj.has_component(TRANSFORM));
        assert!(obj.has_component("RigidBody"));
        assert_eq!(obj.component_kinds().collect::<Vec<_>>(), vec!["Transform", "RigidBody"]);

        let old = obj.set_field("RigidBody", "mass", FieldValue::from(2.0)).unwrap();
        assert_eq!(old, Some(FieldValue::from(10.0)));

        let old = obj.set_field("RigidBody", "drag", FieldValue::from(0.5)).unwrap();
        assert_eq!(old, None);

        assert!(obj.set_field("Sprite", "layer", FieldValue::from(1)).is_err());
        assert!(obj.remove_component(TRANSFORM).is_none());
        assert!(obj.remove_component("RigidBody").is_some());
    }

    #[test]
    fn test_record_conversion() {
        let obj = GameObject::with_id("a", "Ball")
            .with_transform(Transform::from_position(1.0, 2.0).with_parent("p"))
            .with_component("RigidBody", rigid_body());

        let record = ObjectRecord::from(obj.clone());
        assert!(record.components.contains_key(TRANSFORM));

        let back = GameObject::try_from(record).unwrap();
        assert_eq!(back, obj);
    }
}
