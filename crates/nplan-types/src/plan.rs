use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::TypeResult;
use crate::job::JobDiff;
use crate::serde_util::null_as_default_string;

/// The scheduler's response to a speculative plan request.
///
/// Only [`JobPlanResponse::diff`] feeds the deploy decision. The remaining
/// fields are kept so callers can surface them next to the decision.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JobPlanResponse {
    /// The computed diff. Absent when the plan was requested without one.
    #[serde(default)]
    pub diff: Option<JobDiff>,
    /// Modify index of the running job, used for check-and-set submission.
    #[serde(default)]
    pub job_modify_index: u64,
    /// Multi-line warnings from the scheduler, possibly empty.
    #[serde(default, deserialize_with = "null_as_default_string")]
    pub warnings: String,
    /// Task groups that could not be fully placed, keyed by group name.
    #[serde(rename = "FailedTGAllocs", default)]
    pub failed_tg_allocs: Option<BTreeMap<String, Value>>,
}

impl JobPlanResponse {
    /// Decode a plan response from JSON.
    pub fn from_json(json: &str) -> TypeResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Names of task groups the scheduler failed to place, in sorted order.
    pub fn failed_groups(&self) -> Vec<&str> {
        self.failed_tg_allocs
            .iter()
            .flat_map(|allocs| allocs.keys())
            .map(String::as_str)
            .collect()
    }

    /// Non-empty warning lines.
    pub fn warning_lines(&self) -> impl Iterator<Item = &str> {
        self.warnings.lines().map(str::trim).filter(|l| !l.is_empty())
    }
}
