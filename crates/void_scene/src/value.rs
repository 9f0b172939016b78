//! Component field values
//!
//! Component payloads are open records: a kind name maps to a flat set of
//! named fields. Each field holds a [`FieldValue`], a closed set of scalar,
//! fixed-length vector and nested record shapes. Values serialize untagged,
//! so a plain JSON record such as `{"mass": 10.0, "tint": [255, 0, 0, 255]}`
//! maps directly onto a [`FieldMap`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Named fields of one component payload
pub type FieldMap = BTreeMap<String, FieldValue>;

/// A single component field value
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Null/absent value
    #[default]
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// String value
    String(String),
    /// 2D vector
    Vec2([f64; 2]),
    /// 3D vector
    Vec3([f64; 3]),
    /// 4D vector / color
    Vec4([f64; 4]),
    /// Nested record
    Record(FieldMap),
}

impl FieldValue {
    /// Check if value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to get as bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get as i64
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get as f64, widening integers
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Try to get as string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as a 2D vector
    pub fn as_vec2(&self) -> Option<[f64; 2]> {
        match self {
            Self::Vec2(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as a nested record
    pub fn as_record(&self) -> Option<&FieldMap> {
        match self {
            Self::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Short name of the value's shape, for diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Vec2(_) => "vec2",
            Self::Vec3(_) => "vec3",
            Self::Vec4(_) => "vec4",
            Self::Record(_) => "record",
        }
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        Self::Int(v as i64)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f32> for FieldValue {
    fn from(v: f32) -> Self {
        Self::Float(v as f64)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<[f64; 2]> for FieldValue {
    fn from(v: [f64; 2]) -> Self {
        Self::Vec2(v)
    }
}

impl From<[f64; 3]> for FieldValue {
    fn from(v: [f64; 3]) -> Self {
        Self::Vec3(v)
    }
}

impl From<[f64; 4]> for FieldValue {
    fn from(v: [f64; 4]) -> Self {
        Self::Vec4(v)
    }
}

impl From<FieldMap> for FieldValue {
    fn from(v: FieldMap) -> Self {
        Self::Record(v)
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for FieldValue {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::Record(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
