use std::fmt;

/// Errors that can occur while gating a deployment.
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    /// The job diff's top-level classification has no defined decision.
    #[error("unrecognized job diff type '{0}'")]
    UnrecognizedDiffType(String),

    /// The plan response carried no diff.
    #[error("plan response does not contain a job diff")]
    MissingDiff,

    /// The plan source could not produce a diff.
    #[error("plan source error: {0}")]
    Source(String),

    /// Configuration is invalid.
    #[error("configuration error: {0}")]
    Config(String),
}

impl GateError {
    /// Create a source error from anything displayable.
    pub fn fetch(err: impl fmt::Display) -> Self {
        Self::Source(err.to_string())
    }
}

impl From<nplan_types::TypeError> for GateError {
    fn from(err: nplan_types::TypeError) -> Self {
        Self::fetch(err)
    }
}

impl PartialEq for GateError {
    fn eq(&self, other: &Self) -> bool {
        // Compare by display representation for test convenience.
        self.to_string() == other.to_string()
    }
}

impl Eq for GateError {}
