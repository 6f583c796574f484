//! Use case for generating per-operation handler and parameter artifacts

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use super::{GenerateOperationsRequest, GenerationReport, dump_json};
use crate::core::config::GenOpts;
use crate::core::error::{Error, Result};
use crate::core::utils::to_snake_case;
use crate::generation::{
    OperationModelBuilder, ShallowSchemaValidation, TypeRef, TypeResolver, TypeTables,
};
use crate::infrastructure::openapi::SpecLoader;
use crate::infrastructure::output::OutputService;
use crate::infrastructure::templates::{ArtifactKind, Emitter, TemplateRegistry};

/// Use case for generating operation artifacts
pub struct GenerateOperationsUseCase {
    loader: Arc<dyn SpecLoader>,
    output: Arc<dyn OutputService>,
    types: TypeTables,
}

impl GenerateOperationsUseCase {
    pub fn new(loader: Arc<dyn SpecLoader>, output: Arc<dyn OutputService>) -> Self {
        Self {
            loader,
            output,
            types: TypeTables::default(),
        }
    }

    pub fn with_tables(mut self, types: TypeTables) -> Self {
        self.types = types;
        self
    }

    pub async fn execute(
        &self,
        opts: &GenOpts,
        request: &GenerateOperationsRequest,
    ) -> Result<GenerationReport> {
        opts.validate()?;
        let spec = self.loader.load(&opts.spec).await?;

        // Every requested ID must exist before anything is written
        let ids = if request.operation_ids.is_empty() {
            spec.operation_ids()
        } else {
            for id in &request.operation_ids {
                if spec.operation_by_name(id).is_none() {
                    return Err(Error::operation_not_found(id, &opts.spec));
                }
            }
            request.operation_ids.clone()
        };

        let hook = ShallowSchemaValidation;
        let builder = OperationModelBuilder::new(
            TypeResolver::new(&self.types, opts.model_package.clone()),
            &hook,
            opts.model_package.clone(),
            opts.api_package.clone(),
            TypeRef::from_option(opts.principal()),
        );

        let mut descriptors = Vec::new();
        let mut tagged = Vec::new();
        for id in &ids {
            let Some(operation) = spec.operation_by_name(id) else {
                continue;
            };
            let security = spec.security_requirements_for(operation);
            for descriptor in builder.build(id, operation, &request.tags, &security)? {
                // untagged and filtered-out operations fall back to the api package
                tagged.push(operation.tags.contains(&descriptor.package));
                descriptors.push(descriptor);
            }
        }

        let mut report = GenerationReport::default();
        if opts.dump_data {
            dump_json(&descriptors)?;
            return Ok(report);
        }

        let registry = TemplateRegistry::load(opts.template_dir.as_deref()).await?;
        let emitter = Emitter::new(registry, self.output.clone());

        for (descriptor, tagged) in descriptors.iter().zip(tagged) {
            let dir = operation_dir(opts, &descriptor.package, tagged);
            let name = to_snake_case(&descriptor.id);

            if request.include_handler {
                let result = emitter
                    .emit(ArtifactKind::Handler, &dir, &name, descriptor)
                    .await;
                report.record(ArtifactKind::Handler, &name, result)?;
            }

            if !request.include_parameters {
                continue;
            }
            if descriptor.params.is_empty() {
                info!(
                    operation = %descriptor.id,
                    package = %descriptor.package,
                    "operation has no parameters"
                );
                continue;
            }
            let params_name = format!("{name}_parameters");
            let result = emitter
                .emit(ArtifactKind::Parameters, &dir, &params_name, descriptor)
                .await;
            report.record(ArtifactKind::Parameters, &params_name, result)?;
        }

        info!(
            operations = descriptors.len(),
            written = report.written.len(),
            failed = report.failures.len(),
            "generated operations"
        );
        Ok(report)
    }
}

/// `target/server/api`, plus the tag when the operation is placed under one
fn operation_dir(opts: &GenOpts, package: &str, tagged: bool) -> PathBuf {
    let dir = opts
        .target
        .join(&opts.server_package)
        .join(&opts.api_package);
    if tagged {
        dir.join(to_snake_case(package))
    } else {
        dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> GenOpts {
        GenOpts {
            spec: "petstore.json".into(),
            target: PathBuf::from("out"),
            ..Default::default()
        }
    }

    #[test]
    fn test_tag_named_like_api_package_gets_its_own_dir() {
        let dir = operation_dir(&opts(), "operations", true);
        assert_eq!(dir, PathBuf::from("out/restapi/operations/operations"));
    }

    #[test]
    fn test_fallback_package_stays_at_api_root() {
        assert_eq!(
            operation_dir(&opts(), "operations", false),
            PathBuf::from("out/restapi/operations")
        );
        assert_eq!(
            operation_dir(&opts(), "petStore", true),
            PathBuf::from("out/restapi/operations/pet_store")
        );
    }
}
