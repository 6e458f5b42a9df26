//! Plan events and the reporters that receive them.
//!
//! The gate decides what is said and at which level; a [`PlanReporter`]
//! decides where it goes.

use std::fmt;

use nplan_diff::{ChangeSink, FieldChange};

/// Log level of a plan event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Info,
    Error,
}

/// Something the gate has to say about a plan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlanEvent {
    /// The job does not exist on the cluster yet.
    NewJob,
    /// The candidate job is identical to the running one.
    NoChanges,
    /// One changed leaf field.
    FieldChanged(FieldChange),
    /// The top-level diff type has no defined decision.
    Unrecognized(String),
}

impl PlanEvent {
    pub fn severity(&self) -> Severity {
        match self {
            Self::NewJob | Self::FieldChanged(_) => Severity::Info,
            Self::NoChanges | Self::Unrecognized(_) => Severity::Error,
        }
    }
}

impl fmt::Display for PlanEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NewJob => f.write_str("job is a new addition to the cluster"),
            Self::NoChanges => f.write_str("no changes detected for job"),
            Self::FieldChanged(change) => fmt::Display::fmt(change, f),
            Self::Unrecognized(raw) => write!(f, "job diff has unrecognized type '{raw}'"),
        }
    }
}

/// Receiver of plan events.
pub trait PlanReporter {
    fn report(&mut self, event: PlanEvent);
}

/// Reporter that writes every event to `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingReporter;

impl PlanReporter for TracingReporter {
    fn report(&mut self, event: PlanEvent) {
        match &event {
            PlanEvent::FieldChanged(c) => tracing::info!(
                group = %c.group,
                task = %c.task,
                object = %c.object,
                field = %c.field,
                "{event}"
            ),
            _ => match event.severity() {
                Severity::Info => tracing::info!("{event}"),
                Severity::Error => tracing::error!("{event}"),
            },
        }
    }
}

/// Reporter that keeps events in memory.
#[derive(Clone, Debug, Default)]
pub struct RecordingReporter {
    events: Vec<PlanEvent>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// All events in the order they were reported.
    pub fn events(&self) -> &[PlanEvent] {
        &self.events
    }

    /// Rendered messages in report order.
    pub fn messages(&self) -> Vec<String> {
        self.events.iter().map(ToString::to_string).collect()
    }

    /// Number of events at `severity`.
    pub fn count(&self, severity: Severity) -> usize {
        self.events
            .iter()
            .filter(|e| e.severity() == severity)
            .count()
    }

    /// The field changes reported so far.
    pub fn changes(&self) -> impl Iterator<Item = &FieldChange> {
        self.events.iter().filter_map(|e| match e {
            PlanEvent::FieldChanged(c) => Some(c),
            _ => None,
        })
    }

    pub fn into_events(self) -> Vec<PlanEvent> {
        self.events
    }
}

impl PlanReporter for RecordingReporter {
    fn report(&mut self, event: PlanEvent) {
        self.events.push(event);
    }
}

/// Feeds walker output into a reporter.
pub(crate) struct ReporterSink<'a, R: ?Sized>(pub(crate) &'a mut R);

impl<R: PlanReporter + ?Sized> ChangeSink for ReporterSink<'_, R> {
    fn change(&mut self, change: FieldChange) {
        self.0.report(PlanEvent::FieldChanged(change));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cpu_change() -> FieldChange {
        FieldChange {
            group: "cache".into(),
            task: String::new(),
            object: "resources".into(),
            field: "cpu".into(),
            old: "500".into(),
            new: "1000".into(),
        }
    }

    #[test]
    fn severities() {
        assert_eq!(PlanEvent::NewJob.severity(), Severity::Info);
        assert_eq!(PlanEvent::NoChanges.severity(), Severity::Error);
        assert_eq!(PlanEvent::FieldChanged(cpu_change()).severity(), Severity::Info);
        assert_eq!(PlanEvent::Unrecognized("X".into()).severity(), Severity::Error);
    }

    #[test]
    fn messages() {
        assert_eq!(PlanEvent::NewJob.to_string(), "job is a new addition to the cluster");
        assert_eq!(PlanEvent::NoChanges.to_string(), "no changes detected for job");
        assert_eq!(
            PlanEvent::FieldChanged(cpu_change()).to_string(),
            "group cache plan indicates change of resources:cpu from 500 to 1000"
        );
        assert_eq!(
            PlanEvent::Unrecognized("Moved".into()).to_string(),
            "job diff has unrecognized type 'Moved'"
        );
    }

    #[test]
    fn recording_reporter_keeps_order() {
        let mut rec = RecordingReporter::new();
        rec.report(PlanEvent::FieldChanged(cpu_change()));
        rec.report(PlanEvent::NoChanges);
        assert_eq!(rec.events().len(), 2);
        assert_eq!(rec.count(Severity::Info), 1);
        assert_eq!(rec.count(Severity::Error), 1);
        assert_eq!(rec.changes().count(), 1);
        assert_eq!(rec.into_events()[1], PlanEvent::NoChanges);
    }

    #[test]
    fn reporter_sink_wraps_changes() {
        let mut rec = RecordingReporter::new();
        ReporterSink(&mut rec).change(cpu_change());
        assert_eq!(rec.events(), [PlanEvent::FieldChanged(cpu_change())]);
    }

    #[test]
    fn tracing_reporter_accepts_every_event() {
        let mut reporter = TracingReporter;
        reporter.report(PlanEvent::NewJob);
        reporter.report(PlanEvent::NoChanges);
        reporter.report(PlanEvent::FieldChanged(cpu_change()));
        reporter.report(PlanEvent::Unrecognized("Moved".into()));
    }
}
