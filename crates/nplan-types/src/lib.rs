//! Foundation types for nplan.
//!
//! This crate models the speculative diff a cluster scheduler computes
//! between a running job and a candidate job. Every other nplan crate depends
//! on `nplan-types`.
//!
//! # Key Types
//!
//! - [`DiffType`] — Closed per-node change classification
//! - [`JobDiff`] — Root of a diff tree
//! - [`TaskGroupDiff`] / [`TaskDiff`] — Group and task level nodes
//! - [`ObjectDiff`] — Recursive nested object node
//! - [`FieldDiff`] — Leaf field change with old and new values
//! - [`JobPlanResponse`] — The scheduler's plan response envelope

pub mod diff_type;
pub mod error;
pub mod job;
pub mod object;
pub mod plan;

mod serde_util;

pub use diff_type::DiffType;
pub use error::{TypeError, TypeResult};
pub use job::{JobDiff, TaskDiff, TaskGroupDiff};
pub use object::{FieldDiff, ObjectDiff};
pub use plan::JobPlanResponse;
