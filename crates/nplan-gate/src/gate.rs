use tracing::debug;

use nplan_diff::{walk, WalkOutcome};
use nplan_types::{DiffType, JobDiff};

use crate::config::{GateConfig, UnrecognizedPolicy};
use crate::error::GateError;
use crate::report::{PlanEvent, PlanReporter, ReporterSink};

// ---------------------------------------------------------------------------
// Decision
// ---------------------------------------------------------------------------

/// Whether the deployment should go ahead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    /// Submit the job.
    Proceed,
    /// Stop the deployment.
    Halt { reason: String },
}

impl Decision {
    /// Returns `true` if the decision is `Proceed`.
    pub fn should_proceed(&self) -> bool {
        matches!(self, Self::Proceed)
    }
}

// ---------------------------------------------------------------------------
// GateResult
// ---------------------------------------------------------------------------

/// The outcome of running a job diff through the gate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GateResult {
    pub decision: Decision,
    /// Top-level diff type the decision was based on.
    pub diff_type: DiffType,
    /// The change walk, when the diff was edited.
    pub walk: Option<WalkOutcome>,
}

impl GateResult {
    /// Returns `true` if the deployment should proceed.
    pub fn should_proceed(&self) -> bool {
        self.decision.should_proceed()
    }
}

// ---------------------------------------------------------------------------
// PlanGate
// ---------------------------------------------------------------------------

/// The plan gate: looks at a job diff before submission, decides whether the
/// deployment goes ahead, and reports what is about to change.
#[derive(Clone, Debug, Default)]
pub struct PlanGate {
    config: GateConfig,
}

impl PlanGate {
    /// Create a new gate with the given configuration.
    pub fn new(config: GateConfig) -> Self {
        Self { config }
    }

    /// The current configuration.
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Decide on `diff`.
    ///
    /// - `Added`: reports a new job and proceeds.
    /// - `None`: reports that nothing changed and halts.
    /// - `Edited`: reports every changed leaf field and proceeds, however
    ///   many fields that turns out to be.
    /// - anything else: handled per [`UnrecognizedPolicy`].
    pub fn decide<R>(&self, diff: &JobDiff, reporter: &mut R) -> Result<GateResult, GateError>
    where
        R: PlanReporter + ?Sized,
    {
        debug!(job = %diff.id, diff_type = %diff.diff_type, "evaluating job diff");

        let (decision, walk_outcome) = match &diff.diff_type {
            DiffType::Added => {
                reporter.report(PlanEvent::NewJob);
                (Decision::Proceed, None)
            }
            DiffType::None => {
                reporter.report(PlanEvent::NoChanges);
                (
                    Decision::Halt {
                        reason: PlanEvent::NoChanges.to_string(),
                    },
                    None,
                )
            }
            DiffType::Edited => {
                let outcome = walk(diff, self.config.empty_task, &mut ReporterSink(reporter));
                match &outcome {
                    WalkOutcome::Completed { emitted } => {
                        debug!(job = %diff.id, emitted, "change walk complete");
                    }
                    WalkOutcome::Halted {
                        group,
                        task,
                        emitted,
                    } => {
                        debug!(job = %diff.id, %group, %task, emitted, "change walk stopped at empty task");
                    }
                }
                (Decision::Proceed, Some(outcome))
            }
            DiffType::Deleted | DiffType::Unrecognized(_) => match self.config.unrecognized {
                UnrecognizedPolicy::Reject => {
                    let raw = diff.diff_type.to_string();
                    reporter.report(PlanEvent::Unrecognized(raw.clone()));
                    return Err(GateError::UnrecognizedDiffType(raw));
                }
                UnrecognizedPolicy::Proceed => (Decision::Proceed, None),
            },
        };

        Ok(GateResult {
            decision,
            diff_type: diff.diff_type.clone(),
            walk: walk_outcome,
        })
    }

    /// [`Self::decide`] collapsed to a go/no-go answer. Errors mean no-go.
    pub fn should_proceed<R>(&self, diff: &JobDiff, reporter: &mut R) -> bool
    where
        R: PlanReporter + ?Sized,
    {
        self.decide(diff, reporter)
            .is_ok_and(|result| result.should_proceed())
    }
}
