//! Outcome of a generation run

use std::path::PathBuf;

use serde::Serialize;
use tracing::error;

use crate::core::error::Result;
use crate::infrastructure::output::WriteOutcome;
use crate::infrastructure::templates::ArtifactKind;

/// An artifact that could not be rendered or written
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtifactFailure {
    pub artifact: String,
    pub name: String,
    pub error: String,
}

/// Written, skipped and failed artifacts of one or more use cases
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GenerationReport {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    pub failures: Vec<ArtifactFailure>,
}

impl GenerationReport {
    /// Record the result of emitting one artifact
    ///
    /// Template and I/O errors stay with the artifact; anything else aborts
    /// the run.
    pub fn record(
        &mut self,
        kind: ArtifactKind,
        name: &str,
        result: Result<WriteOutcome>,
    ) -> Result<()> {
        match result {
            Ok(WriteOutcome::Written(path)) => self.written.push(path),
            Ok(WriteOutcome::Skipped(path)) => self.skipped.push(path),
            Err(err) if err.is_artifact_local() => {
                error!(%kind, name, error = %err, "failed to generate artifact");
                self.failures.push(ArtifactFailure {
                    artifact: kind.to_string(),
                    name: name.to_string(),
                    error: err.to_string(),
                });
            }
            Err(err) => return Err(err),
        }
        Ok(())
    }

    pub fn merge(&mut self, other: GenerationReport) {
        self.written.extend(other.written);
        self.skipped.extend(other.skipped);
        self.failures.extend(other.failures);
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Error;

    #[test]
    fn test_local_errors_are_collected() {
        let mut report = GenerationReport::default();
        report
            .record(
                ArtifactKind::Handler,
                "get_pet",
                Ok(WriteOutcome::Written(PathBuf::from("a.rs"))),
            )
            .unwrap();
        report
            .record(
                ArtifactKind::ConfigureApi,
                "configure",
                Ok(WriteOutcome::Skipped(PathBuf::from("b.rs"))),
            )
            .unwrap();
        report
            .record(ArtifactKind::Main, "main", Err(Error::template("missing field")))
            .unwrap();

        assert_eq!(report.written, vec![PathBuf::from("a.rs")]);
        assert_eq!(report.skipped, vec![PathBuf::from("b.rs")]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].artifact, "main");
        assert!(!report.is_success());
    }

    #[test]
    fn test_other_errors_abort() {
        let mut report = GenerationReport::default();
        let result = report.record(ArtifactKind::Handler, "x", Err(Error::spec("bad ref")));
        assert!(matches!(result, Err(Error::Spec(_))));
        assert!(report.failures.is_empty());
    }

    #[test]
    fn test_merge() {
        let mut report = GenerationReport::default();
        report.merge(GenerationReport {
            written: vec![PathBuf::from("x.rs")],
            skipped: vec![PathBuf::from("y.rs")],
            ..Default::default()
        });
        assert_eq!(report.written, vec![PathBuf::from("x.rs")]);
        assert_eq!(report.skipped, vec![PathBuf::from("y.rs")]);
        assert!(report.is_success());
    }
}
