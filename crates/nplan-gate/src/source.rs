//! Where job diffs come from.
//!
//! Talking to the scheduler is someone else's job; this module only defines
//! the seam and the entry point that treats a failed fetch as "do not
//! deploy".

use tracing::{debug, error};

use nplan_types::{JobDiff, JobPlanResponse};

use crate::error::GateError;
use crate::gate::PlanGate;
use crate::report::PlanReporter;

/// Something that can produce the scheduler's diff for a candidate job.
pub trait PlanSource {
    fn fetch_diff(&self) -> Result<JobDiff, GateError>;
}

impl PlanSource for JobDiff {
    fn fetch_diff(&self) -> Result<JobDiff, GateError> {
        Ok(self.clone())
    }
}

impl PlanSource for JobPlanResponse {
    fn fetch_diff(&self) -> Result<JobDiff, GateError> {
        self.diff.clone().ok_or(GateError::MissingDiff)
    }
}

/// Fetch a diff from `source` and run it through `gate`.
///
/// Returns `true` only when the deployment should proceed. A source failure
/// or a gate error is logged and answered with `false`.
pub fn run_plan<S, R>(gate: &PlanGate, source: &S, reporter: &mut R) -> bool
where
    S: PlanSource + ?Sized,
    R: PlanReporter + ?Sized,
{
    debug!("triggering job plan");

    let diff = match source.fetch_diff() {
        Ok(diff) => diff,
        Err(e) => {
            error!(error = %e, "unable to run a job plan");
            return false;
        }
    };

    match gate.decide(&diff, reporter) {
        Ok(result) => result.should_proceed(),
        Err(e) => {
            debug!(job = %diff.id, error = %e, "gate refused job diff");
            false
        }
    }
}
