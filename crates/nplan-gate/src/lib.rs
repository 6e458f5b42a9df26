//! Deploy gate for nplan.
//!
//! Before a job is submitted, the scheduler is asked for a speculative diff
//! against the running job. The gate inspects that diff, decides whether the
//! deployment should proceed, and reports every field that is about to
//! change through an injected [`PlanReporter`].
//!
//! # Quick Start
//!
//! ```rust
//! use nplan_gate::{PlanGate, GateConfig, RecordingReporter};
//! use nplan_types::{DiffType, FieldDiff, JobDiff, ObjectDiff, TaskGroupDiff};
//!
//! let diff = JobDiff::new("example", DiffType::Edited).with_task_group(
//!     TaskGroupDiff::new("cache", DiffType::Edited).with_object(
//!         ObjectDiff::new("resources", DiffType::Edited)
//!             .with_field(FieldDiff::edited("cpu", "500", "1000")),
//!     ),
//! );
//!
//! let gate = PlanGate::new(GateConfig::default());
//! let mut reporter = RecordingReporter::new();
//! let result = gate.decide(&diff, &mut reporter).unwrap();
//! assert!(result.should_proceed());
//! assert_eq!(
//!     reporter.messages(),
//!     ["group cache plan indicates change of resources:cpu from 500 to 1000"]
//! );
//! ```

pub mod config;
pub mod error;
pub mod gate;
pub mod report;
pub mod source;

// Re-exports for convenience.
pub use config::{GateConfig, UnrecognizedPolicy};
pub use error::GateError;
pub use gate::{Decision, GateResult, PlanGate};
pub use nplan_diff::EmptyTaskPolicy;
pub use report::{PlanEvent, PlanReporter, RecordingReporter, Severity, TracingReporter};
pub use source::{run_plan, PlanSource};
