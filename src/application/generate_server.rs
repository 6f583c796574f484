//! Use case for generating a complete server

use std::sync::Arc;

use tracing::info;

use super::{
    GenerateOperationsUseCase, GenerateServerRequest, GenerateSupportUseCase, GenerationReport,
};
use crate::core::config::GenOpts;
use crate::core::error::Result;
use crate::infrastructure::openapi::SpecLoader;
use crate::infrastructure::output::OutputService;

/// Operations followed by support code, each stage skippable
pub struct GenerateServerUseCase {
    operations: GenerateOperationsUseCase,
    support: GenerateSupportUseCase,
}

impl GenerateServerUseCase {
    pub fn new(loader: Arc<dyn SpecLoader>, output: Arc<dyn OutputService>) -> Self {
        Self {
            operations: GenerateOperationsUseCase::new(loader.clone(), output.clone()),
            support: GenerateSupportUseCase::new(loader, output),
        }
    }

    pub async fn execute(
        &self,
        opts: &GenOpts,
        request: &GenerateServerRequest,
    ) -> Result<GenerationReport> {
        let mut report = GenerationReport::default();

        if request.skip_operations {
            info!("skipping operation generation");
        } else {
            report.merge(self.operations.execute(opts, &request.operations()).await?);
        }

        if request.skip_support {
            info!("skipping support generation");
        } else {
            report.merge(self.support.execute(opts, &request.support()).await?);
        }

        Ok(report)
    }
}
