use std::fmt;

use serde::{Deserialize, Serialize};

/// Change classification the scheduler assigns to every node of a diff tree.
///
/// The set is closed: anything the scheduler sends that is not one of the
/// known classifications is kept verbatim in [`DiffType::Unrecognized`] so
/// callers must decide about it explicitly.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DiffType {
    /// The node does not exist in the running job.
    Added,
    /// The node exists only in the running job.
    Deleted,
    /// The node exists on both sides and differs.
    Edited,
    /// The node is unchanged.
    None,
    /// A classification this crate does not know about.
    Unrecognized(String),
}

impl DiffType {
    /// Returns `true` for [`DiffType::Edited`], the only classification the
    /// walker descends into.
    pub fn is_edited(&self) -> bool {
        matches!(self, Self::Edited)
    }

    /// Returns `true` if the value is not one of the known classifications.
    pub fn is_unrecognized(&self) -> bool {
        matches!(self, Self::Unrecognized(_))
    }

    /// The wire representation of this classification.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Added => "Added",
            Self::Deleted => "Deleted",
            Self::Edited => "Edited",
            Self::None => "None",
            Self::Unrecognized(raw) => raw,
        }
    }
}

impl From<&str> for DiffType {
    fn from(raw: &str) -> Self {
        const KNOWN: [(&str, DiffType); 4] = [
            ("Added", DiffType::Added),
            ("Deleted", DiffType::Deleted),
            ("Edited", DiffType::Edited),
            ("None", DiffType::None),
        ];
        KNOWN
            .into_iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(raw))
            .map(|(_, kind)| kind)
            .unwrap_or_else(|| Self::Unrecognized(raw.to_string()))
    }
}

impl From<String> for DiffType {
    fn from(raw: String) -> Self {
        match Self::from(raw.as_str()) {
            Self::Unrecognized(_) => Self::Unrecognized(raw),
            known => known,
        }
    }
}

impl From<DiffType> for String {
    fn from(kind: DiffType) -> Self {
        match kind {
            DiffType::Unrecognized(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for DiffType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
