use serde::{Deserialize, Serialize};

use crate::diff_type::DiffType;
use crate::error::TypeResult;
use crate::object::{FieldDiff, ObjectDiff};
use crate::serde_util::{null_as_default_string, null_as_empty};

/// Root of a diff tree: the scheduler's comparison of a running job with a
/// candidate job.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JobDiff {
    /// Top-level classification, which drives the deploy decision.
    #[serde(rename = "Type")]
    pub diff_type: DiffType,
    /// Job identifier. May be empty.
    #[serde(rename = "ID", default, deserialize_with = "null_as_default_string")]
    pub id: String,
    /// Job-level field changes.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub fields: Vec<FieldDiff>,
    /// Job-level object changes.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub objects: Vec<ObjectDiff>,
    /// Task groups in the order the scheduler reported them.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub task_groups: Vec<TaskGroupDiff>,
}

impl JobDiff {
    /// Create an empty diff for job `id`.
    pub fn new(id: impl Into<String>, diff_type: DiffType) -> Self {
        Self {
            diff_type,
            id: id.into(),
            fields: Vec::new(),
            objects: Vec::new(),
            task_groups: Vec::new(),
        }
    }

    /// Append a task group.
    pub fn with_task_group(mut self, group: TaskGroupDiff) -> Self {
        self.task_groups.push(group);
        self
    }

    /// Decode a bare job diff from JSON.
    pub fn from_json(json: &str) -> TypeResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A task group in the diff tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TaskGroupDiff {
    #[serde(rename = "Type")]
    pub diff_type: DiffType,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub fields: Vec<FieldDiff>,
    /// Group-level objects such as scaling or update blocks.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub objects: Vec<ObjectDiff>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tasks: Vec<TaskDiff>,
}

impl TaskGroupDiff {
    pub fn new(name: impl Into<String>, diff_type: DiffType) -> Self {
        Self {
            diff_type,
            name: name.into(),
            fields: Vec::new(),
            objects: Vec::new(),
            tasks: Vec::new(),
        }
    }

    /// Append a group-level object.
    pub fn with_object(mut self, object: ObjectDiff) -> Self {
        self.objects.push(object);
        self
    }

    /// Append a task.
    pub fn with_task(mut self, task: TaskDiff) -> Self {
        self.tasks.push(task);
        self
    }
}

/// A single task inside a task group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TaskDiff {
    #[serde(rename = "Type")]
    pub diff_type: DiffType,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub fields: Vec<FieldDiff>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub objects: Vec<ObjectDiff>,
    /// Scheduler hints, e.g. `forces create/destroy update`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub annotations: Vec<String>,
}

impl TaskDiff {
    pub fn new(name: impl Into<String>, diff_type: DiffType) -> Self {
        Self {
            diff_type,
            name: name.into(),
            fields: Vec::new(),
            objects: Vec::new(),
            annotations: Vec::new(),
        }
    }

    /// Append a task-level object.
    pub fn with_object(mut self, object: ObjectDiff) -> Self {
        self.objects.push(object);
        self
    }
}
