//! Diff tree walker for nplan.
//!
//! Descends a scheduler [`JobDiff`](nplan_types::JobDiff) and extracts one
//! [`FieldChange`] per edited field on an edited leaf object, annotated with
//! the enclosing task group and task.
//!
//! # Key Types
//!
//! - [`walk`] / [`collect_changes`] -- Depth-first traversal in declared order
//! - [`FieldChange`] -- One detail record, rendered by its `Display` impl
//! - [`ChangeSink`] -- Where detail records go
//! - [`EmptyTaskPolicy`] / [`WalkOutcome`] -- Early-abort control

pub mod change;
pub mod walk;

pub use change::FieldChange;
pub use walk::{collect_changes, walk, ChangeSink, EmptyTaskPolicy, FnSink, WalkOutcome};
