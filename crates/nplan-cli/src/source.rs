use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use tracing::warn;

use nplan_gate::{GateError, PlanSource};
use nplan_types::{JobDiff, JobPlanResponse};

/// Reads a plan from a file or stdin.
pub struct FilePlanSource {
    /// `None` reads stdin.
    path: Option<PathBuf>,
    bare_diff: bool,
}

impl FilePlanSource {
    /// `-` selects stdin.
    pub fn new(arg: &str, bare_diff: bool) -> Self {
        let path = (arg != "-").then(|| PathBuf::from(arg));
        Self { path, bare_diff }
    }

    fn read(&self) -> io::Result<String> {
        match &self.path {
            Some(path) => fs::read_to_string(path),
            None => {
                let mut buf = String::new();
                io::stdin().read_to_string(&mut buf)?;
                Ok(buf)
            }
        }
    }

    fn describe(&self) -> String {
        self.path
            .as_ref()
            .map_or_else(|| "stdin".to_string(), |p| p.display().to_string())
    }

    /// Read the full plan response. A bare diff is wrapped in an empty
    /// response.
    pub fn load_response(&self) -> Result<JobPlanResponse, GateError> {
        let raw = self
            .read()
            .map_err(|e| GateError::fetch(format!("reading {}: {e}", self.describe())))?;
        if self.bare_diff {
            Ok(JobPlanResponse {
                diff: Some(JobDiff::from_json(&raw)?),
                ..Default::default()
            })
        } else {
            Ok(JobPlanResponse::from_json(&raw)?)
        }
    }
}

impl PlanSource for FilePlanSource {
    fn fetch_diff(&self) -> Result<JobDiff, GateError> {
        let response = self.load_response()?;
        for line in response.warning_lines() {
            warn!(%line, "scheduler warning");
        }
        for group in response.failed_groups() {
            warn!(%group, "scheduler could not place all allocations for group");
        }
        response.fetch_diff()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nplan_types::DiffType;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn reads_plan_response() {
        let file = write_temp(r#"{"Diff": {"Type": "Added", "ID": "web"}, "JobModifyIndex": 3}"#);
        let source = FilePlanSource::new(file.path().to_str().unwrap(), false);
        let diff = source.fetch_diff().unwrap();
        assert_eq!(diff.diff_type, DiffType::Added);
        assert_eq!(source.load_response().unwrap().job_modify_index, 3);
    }

    #[test]
    fn reads_bare_diff() {
        let file = write_temp(r#"{"Type": "None", "ID": "web"}"#);
        let source = FilePlanSource::new(file.path().to_str().unwrap(), true);
        assert_eq!(source.fetch_diff().unwrap().diff_type, DiffType::None);
    }

    #[test]
    fn response_without_diff_is_an_error() {
        let file = write_temp(r#"{"JobModifyIndex": 3}"#);
        let source = FilePlanSource::new(file.path().to_str().unwrap(), false);
        assert_eq!(source.fetch_diff().unwrap_err(), GateError::MissingDiff);
    }

    #[test]
    fn missing_file_is_a_source_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let source = FilePlanSource::new(path.to_str().unwrap(), false);
        let err = source.fetch_diff().unwrap_err();
        assert!(matches!(err, GateError::Source(msg) if msg.contains("absent.json")));
    }

    #[test]
    fn malformed_json_is_a_source_error() {
        let file = write_temp("{");
        let source = FilePlanSource::new(file.path().to_str().unwrap(), true);
        assert!(matches!(source.fetch_diff(), Err(GateError::Source(_))));
    }

    #[test]
    fn dash_means_stdin() {
        assert!(FilePlanSource::new("-", false).path.is_none());
        assert_eq!(FilePlanSource::new("-", false).describe(), "stdin");
    }
}
