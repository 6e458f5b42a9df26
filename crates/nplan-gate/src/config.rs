use serde::{Deserialize, Serialize};

use nplan_diff::EmptyTaskPolicy;

use crate::error::GateError;

/// What the gate does with a top-level diff type it has no decision for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnrecognizedPolicy {
    /// Report an error and refuse the deployment.
    #[default]
    Reject,
    /// Proceed silently.
    Proceed,
}

/// Configuration for the plan gate.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct GateConfig {
    /// Handling of unrecognized top-level diff types.
    pub unrecognized: UnrecognizedPolicy,
    /// Handling of edited tasks without object diffs during the walk.
    pub empty_task: EmptyTaskPolicy,
}

impl GateConfig {
    /// The behavior of earlier releases: unknown diff types proceed without
    /// a word and an empty edited task ends change reporting.
    pub fn legacy() -> Self {
        Self {
            unrecognized: UnrecognizedPolicy::Proceed,
            empty_task: EmptyTaskPolicy::AbortWalk,
        }
    }

    /// Parse a configuration from TOML. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, GateError> {
        toml::from_str(s).map_err(|e| GateError::Config(e.to_string()))
    }

    /// Render the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String, GateError> {
        toml::to_string(self).map_err(|e| GateError::Config(e.to_string()))
    }
}
