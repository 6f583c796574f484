//! Artifact kinds and their overwrite policy

use std::fmt;

use crate::infrastructure::output::OverwritePolicy;

/// Every artifact the generator emits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Handler,
    Parameters,
    ApiBuilder,
    ConfigureApi,
    Main,
    SuiteTest,
    OperationTest,
    TckReporter,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 8] = [
        ArtifactKind::Handler,
        ArtifactKind::Parameters,
        ArtifactKind::ApiBuilder,
        ArtifactKind::ConfigureApi,
        ArtifactKind::Main,
        ArtifactKind::SuiteTest,
        ArtifactKind::OperationTest,
        ArtifactKind::TckReporter,
    ];

    /// Template path relative to the template root
    pub fn template_id(&self) -> &'static str {
        match self {
            ArtifactKind::Handler => "server/handler.rs.tera",
            ArtifactKind::Parameters => "server/parameters.rs.tera",
            ArtifactKind::ApiBuilder => "server/builder.rs.tera",
            ArtifactKind::ConfigureApi => "server/configure_api.rs.tera",
            ArtifactKind::Main => "server/main.rs.tera",
            ArtifactKind::SuiteTest => "test/suite_test.rs.tera",
            ArtifactKind::OperationTest => "test/operation_test.rs.tera",
            ArtifactKind::TckReporter => "test/tck_reporter.rs.tera",
        }
    }

    /// Scaffolding meant for user edits is only written once
    pub fn overwrite_policy(&self) -> OverwritePolicy {
        match self {
            ArtifactKind::ConfigureApi | ArtifactKind::SuiteTest | ArtifactKind::TckReporter => {
                OverwritePolicy::IfAbsent
            }
            _ => OverwritePolicy::Always,
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArtifactKind::Handler => "handler",
            ArtifactKind::Parameters => "parameters",
            ArtifactKind::ApiBuilder => "builder",
            ArtifactKind::ConfigureApi => "configure api",
            ArtifactKind::Main => "main",
            ArtifactKind::SuiteTest => "suite test",
            ArtifactKind::OperationTest => "test",
            ArtifactKind::TckReporter => "tck reporter",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policies() {
        let preserved: Vec<_> = ArtifactKind::ALL
            .iter()
            .filter(|k| k.overwrite_policy() == OverwritePolicy::IfAbsent)
            .collect();
        assert_eq!(
            preserved,
            vec![
                &ArtifactKind::ConfigureApi,
                &ArtifactKind::SuiteTest,
                &ArtifactKind::TckReporter
            ]
        );
    }
}
