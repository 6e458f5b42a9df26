use serde::{Deserialize, Serialize};

use crate::diff_type::DiffType;
use crate::serde_util::{null_as_default_string, null_as_empty};

/// A nested object in the diff tree (a task's resources block, a group's
/// update strategy, a network port...).
///
/// Objects nest arbitrarily deep. Only leaf objects, those without child
/// objects, carry field-level changes that get reported.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ObjectDiff {
    /// The diff classification of this object.
    #[serde(rename = "Type")]
    pub diff_type: DiffType,
    /// Name of the object kind, e.g. `Resources`.
    pub name: String,
    /// Field changes directly on this object.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub fields: Vec<FieldDiff>,
    /// Child objects.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub objects: Vec<ObjectDiff>,
}

impl ObjectDiff {
    /// Create an object with no fields and no children.
    pub fn new(name: impl Into<String>, diff_type: DiffType) -> Self {
        Self {
            diff_type,
            name: name.into(),
            fields: Vec::new(),
            objects: Vec::new(),
        }
    }

    /// Append a field change.
    pub fn with_field(mut self, field: FieldDiff) -> Self {
        self.fields.push(field);
        self
    }

    /// Append a child object.
    pub fn with_object(mut self, object: ObjectDiff) -> Self {
        self.objects.push(object);
        self
    }

    /// Returns `true` if this object has no child objects.
    pub fn is_leaf(&self) -> bool {
        self.objects.is_empty()
    }
}

/// A single field in the diff tree with its old and new rendered values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FieldDiff {
    #[serde(rename = "Type")]
    pub diff_type: DiffType,
    pub name: String,
    /// Value in the running job.
    #[serde(default, deserialize_with = "null_as_default_string")]
    pub old: String,
    /// Value in the candidate job.
    #[serde(default, deserialize_with = "null_as_default_string")]
    pub new: String,
    /// Scheduler hints attached to the field.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub annotations: Vec<String>,
}

impl FieldDiff {
    pub fn new(
        name: impl Into<String>,
        diff_type: DiffType,
        old: impl Into<String>,
        new: impl Into<String>,
    ) -> Self {
        Self {
            diff_type,
            name: name.into(),
            old: old.into(),
            new: new.into(),
            annotations: Vec::new(),
        }
    }

    /// An edited field going from `old` to `new`.
    pub fn edited(name: impl Into<String>, old: impl Into<String>, new: impl Into<String>) -> Self {
        Self::new(name, DiffType::Edited, old, new)
    }

    /// An unchanged field; both sides hold `value`.
    pub fn unchanged(name: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        Self::new(name, DiffType::None, value.clone(), value)
    }
}
