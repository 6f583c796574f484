//! Use case for generating the API builder, configuration scaffold and entry point

use std::sync::Arc;

use tracing::info;

use super::{GenerateSupportRequest, GenerationReport, dump_json};
use crate::core::config::GenOpts;
use crate::core::error::Result;
use crate::core::utils::{to_command_name, to_snake_case};
use crate::generation::{
    ApplicationModel, ApplicationModelBuilder, MediaTables, ShallowSchemaValidation, TypeTables,
};
use crate::infrastructure::openapi::{SpecDocument, SpecLoader};
use crate::infrastructure::output::OutputService;
use crate::infrastructure::templates::{ArtifactKind, Emitter, TemplateRegistry};

/// Use case for generating server support artifacts
pub struct GenerateSupportUseCase {
    loader: Arc<dyn SpecLoader>,
    output: Arc<dyn OutputService>,
    types: TypeTables,
    media: MediaTables,
}

impl GenerateSupportUseCase {
    pub fn new(loader: Arc<dyn SpecLoader>, output: Arc<dyn OutputService>) -> Self {
        Self {
            loader,
            output,
            types: TypeTables::default(),
            media: MediaTables::default(),
        }
    }

    pub fn with_tables(mut self, types: TypeTables, media: MediaTables) -> Self {
        self.types = types;
        self.media = media;
        self
    }

    pub async fn execute(
        &self,
        opts: &GenOpts,
        request: &GenerateSupportRequest,
    ) -> Result<GenerationReport> {
        opts.validate()?;
        let spec = self.loader.load(&opts.spec).await?;

        let mut app = build_application_model(
            &self.types,
            &self.media,
            opts,
            &spec,
            request.name.as_deref(),
            &request.models,
            &request.operation_ids,
        )?;
        app.include_ui = request.include_ui;
        if request.skip_models {
            app.models.clear();
        }

        let mut report = GenerationReport::default();
        if opts.dump_data {
            dump_json(&app)?;
            return Ok(report);
        }

        let registry = TemplateRegistry::load(opts.template_dir.as_deref()).await?;
        let emitter = Emitter::new(registry, self.output.clone());

        let api_dir = opts
            .target
            .join(&opts.server_package)
            .join(&opts.api_package);
        let builder_name = format!("{}_api", to_snake_case(&app.app_name));
        let result = emitter
            .emit(ArtifactKind::ApiBuilder, &api_dir, &builder_name, &app)
            .await;
        report.record(ArtifactKind::ApiBuilder, &builder_name, result)?;

        let cmd_dir = opts
            .target
            .join("cmd")
            .join(to_command_name(&format!("{}Server", app.app_name)));
        let configure_name = format!("configure_{}", to_snake_case(&app.name));
        let result = emitter
            .emit(ArtifactKind::ConfigureApi, &cmd_dir, &configure_name, &app)
            .await;
        report.record(ArtifactKind::ConfigureApi, &configure_name, result)?;

        let result = emitter.emit(ArtifactKind::Main, &cmd_dir, "main", &app).await;
        report.record(ArtifactKind::Main, "main", result)?;

        info!(
            app = %app.app_name,
            written = report.written.len(),
            skipped = report.skipped.len(),
            failed = report.failures.len(),
            "generated support"
        );
        Ok(report)
    }
}

/// Application model with the generated API module added to its imports
pub(crate) fn build_application_model(
    types: &TypeTables,
    media: &MediaTables,
    opts: &GenOpts,
    spec: &SpecDocument,
    name: Option<&str>,
    models: &[String],
    operation_ids: &[String],
) -> Result<ApplicationModel> {
    let mut app = ApplicationModelBuilder::new(types, media, &ShallowSchemaValidation, opts)
        .build(spec, name, models, operation_ids)?;
    app.default_imports
        .push(format!("crate::{}::{}", opts.server_package, opts.api_package));
    Ok(app)
}
