//! Detail records produced by the walker.

use std::fmt;

/// A single changed field, with the group and task it was found under.
///
/// An empty `group` or `task` means that context is absent.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldChange {
    pub group: String,
    pub task: String,
    /// Name of the leaf object holding the field.
    pub object: String,
    pub field: String,
    pub old: String,
    pub new: String,
}

impl FieldChange {
    /// Returns `true` if the change was found under a task.
    pub fn has_task(&self) -> bool {
        !self.task.is_empty()
    }
}

impl fmt::Display for FieldChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.group.is_empty() {
            write!(f, "group {} ", self.group)?;
        }
        if !self.task.is_empty() {
            write!(f, "and task {} ", self.task)?;
        }
        write!(
            f,
            "plan indicates change of {}:{} from {} to {}",
            self.object, self.field, self.old, self.new
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(group: &str, task: &str) -> FieldChange {
        FieldChange {
            group: group.into(),
            task: task.into(),
            object: "Resources".into(),
            field: "CPU".into(),
            old: "500".into(),
            new: "1000".into(),
        }
    }

    #[test]
    fn group_and_task_context() {
        assert_eq!(
            change("cache", "redis").to_string(),
            "group cache and task redis plan indicates change of Resources:CPU from 500 to 1000"
        );
    }

    #[test]
    fn group_only_context() {
        assert_eq!(
            change("cache", "").to_string(),
            "group cache plan indicates change of Resources:CPU from 500 to 1000"
        );
    }

    #[test]
    fn no_context() {
        assert_eq!(
            change("", "").to_string(),
            "plan indicates change of Resources:CPU from 500 to 1000"
        );
    }

    #[test]
    fn task_without_group_keeps_segment_order() {
        assert_eq!(
            change("", "redis").to_string(),
            "and task redis plan indicates change of Resources:CPU from 500 to 1000"
        );
    }

    #[test]
    fn empty_values_render_verbatim() {
        let mut c = change("cache", "redis");
        c.old = String::new();
        assert!(c.to_string().ends_with("from  to 1000"));
        assert!(c.has_task());
    }
}
