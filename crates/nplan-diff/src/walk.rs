//! Depth-first walk over a job diff.
//!
//! The walk visits task groups, then each group's objects, then its tasks and
//! their objects, descending nested objects child-before-sibling. Nodes that
//! are not [`DiffType::Edited`](nplan_types::DiffType::Edited) are pruned.
//! Field changes are only read from edited leaf objects, so a change the
//! scheduler repeats at several depths is reported once.

use std::ops::ControlFlow;

use serde::{Deserialize, Serialize};
use tracing::debug;

use nplan_types::{JobDiff, ObjectDiff, TaskGroupDiff};

use crate::change::FieldChange;

/// What to do with an edited task that carries no object diffs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyTaskPolicy {
    /// Stop the whole walk. No further groups, tasks or objects are visited.
    #[default]
    AbortWalk,
    /// Skip that task and carry on with the next one.
    SkipTask,
}

/// How a walk ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WalkOutcome {
    /// Every edited node was visited.
    Completed { emitted: usize },
    /// The walk stopped at an edited task with no objects.
    Halted {
        group: String,
        task: String,
        emitted: usize,
    },
}

impl WalkOutcome {
    /// Number of detail records handed to the sink.
    pub fn emitted(&self) -> usize {
        match self {
            Self::Completed { emitted } | Self::Halted { emitted, .. } => *emitted,
        }
    }

    /// Returns `true` if the walk stopped early.
    pub fn is_halted(&self) -> bool {
        matches!(self, Self::Halted { .. })
    }
}

/// Receiver of detail records.
pub trait ChangeSink {
    fn change(&mut self, change: FieldChange);
}

impl ChangeSink for Vec<FieldChange> {
    fn change(&mut self, change: FieldChange) {
        self.push(change);
    }
}

/// Adapts a closure into a [`ChangeSink`].
pub struct FnSink<F>(pub F);

impl<F: FnMut(FieldChange)> ChangeSink for FnSink<F> {
    fn change(&mut self, change: FieldChange) {
        (self.0)(change)
    }
}

/// Walk `diff` and hand every changed leaf field to `sink`, in tree order.
///
/// The top-level classification of `diff` is not consulted; deciding whether
/// a walk is warranted is the caller's job.
pub fn walk<S>(diff: &JobDiff, policy: EmptyTaskPolicy, sink: &mut S) -> WalkOutcome
where
    S: ChangeSink + ?Sized,
{
    let mut walker = Walker {
        policy,
        sink,
        emitted: 0,
    };
    match walker.job(diff) {
        ControlFlow::Continue(()) => WalkOutcome::Completed {
            emitted: walker.emitted,
        },
        ControlFlow::Break(Halt { group, task }) => WalkOutcome::Halted {
            group,
            task,
            emitted: walker.emitted,
        },
    }
}

/// Walk `diff` and collect the detail records.
pub fn collect_changes(diff: &JobDiff, policy: EmptyTaskPolicy) -> (Vec<FieldChange>, WalkOutcome) {
    let mut changes = Vec::new();
    let outcome = walk(diff, policy, &mut changes);
    (changes, outcome)
}

/// Where an aborted walk stopped.
struct Halt {
    group: String,
    task: String,
}

struct Walker<'s, S: ?Sized> {
    policy: EmptyTaskPolicy,
    sink: &'s mut S,
    emitted: usize,
}

impl<S: ChangeSink + ?Sized> Walker<'_, S> {
    fn job(&mut self, diff: &JobDiff) -> ControlFlow<Halt> {
        for group in diff.task_groups.iter().filter(|g| g.diff_type.is_edited()) {
            self.group(group)?;
        }
        ControlFlow::Continue(())
    }

    fn group(&mut self, group: &TaskGroupDiff) -> ControlFlow<Halt> {
        for object in &group.objects {
            self.object(&group.name, "", object);
        }

        for task in group.tasks.iter().filter(|t| t.diff_type.is_edited()) {
            if task.objects.is_empty() {
                match self.policy {
                    EmptyTaskPolicy::AbortWalk => {
                        debug!(group = %group.name, task = %task.name, "edited task has no object diffs; stopping walk");
                        return ControlFlow::Break(Halt {
                            group: group.name.clone(),
                            task: task.name.clone(),
                        });
                    }
                    EmptyTaskPolicy::SkipTask => {
                        debug!(group = %group.name, task = %task.name, "edited task has no object diffs; skipping");
                        continue;
                    }
                }
            }
            for object in &task.objects {
                self.object(&group.name, &task.name, object);
            }
        }
        ControlFlow::Continue(())
    }

    fn object(&mut self, group: &str, task: &str, node: &ObjectDiff) {
        if node.is_leaf() && !node.fields.is_empty() && node.diff_type.is_edited() {
            for field in node.fields.iter().filter(|f| f.diff_type.is_edited()) {
                self.emitted += 1;
                self.sink.change(FieldChange {
                    group: group.to_string(),
                    task: task.to_string(),
                    object: node.name.clone(),
                    field: field.name.clone(),
                    old: field.old.clone(),
                    new: field.new.clone(),
                });
            }
        } else {
            for child in &node.objects {
                self.object(group, task, child);
            }
        }
    }
}
