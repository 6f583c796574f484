//! apigen CLI entrypoint
//! Parses command-line arguments, merges them over an optional config file and
//! dispatches to the generation use cases.
#![deny(unsafe_code)]

use std::path::PathBuf;

// External imports (alphabetized)
use anyhow::Context;
use apigen::application::{
    self, GenerateOperationsRequest, GenerateServerRequest, GenerateSupportRequest,
    GenerateTestsRequest, GenerationReport,
};
use apigen::core::GenOpts;
use clap::Parser;
use tracing::{Level, error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "apigen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every generation command
#[derive(clap::Args, Debug)]
struct CommonArgs {
    /// Path or URL to the Swagger document (JSON or YAML)
    #[arg(short = 'f', long)]
    spec: Option<String>,
    /// Directory receiving the generated sources
    #[arg(short, long)]
    target: Option<PathBuf>,
    /// TOML or YAML file with generation options; flags take precedence
    #[arg(long)]
    config: Option<PathBuf>,
    /// Package for operation handlers
    #[arg(long)]
    api_package: Option<String>,
    /// Package holding the models
    #[arg(long)]
    model_package: Option<String>,
    /// Package for the server support code
    #[arg(long)]
    server_package: Option<String>,
    /// Package for generated tests
    #[arg(long)]
    test_package: Option<String>,
    /// Type representing an authenticated caller
    #[arg(short = 'P', long)]
    principal: Option<String>,
    /// Directory with templates overriding the embedded ones
    #[arg(long)]
    template_dir: Option<PathBuf>,
    /// Print the model as JSON instead of generating files
    #[arg(long)]
    dump_data: bool,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Generate handlers and parameter binders for operations
    Operation {
        #[command(flatten)]
        common: CommonArgs,
        /// Operation IDs to generate (all when omitted)
        #[arg(short = 'O', long = "operation")]
        operations: Vec<String>,
        /// Only place operations under these tags
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Do not generate handlers
        #[arg(long)]
        skip_handler: bool,
        /// Do not generate parameter binders
        #[arg(long)]
        skip_parameters: bool,
    },
    /// Generate the API builder, its configuration and the server entry point
    Support {
        #[command(flatten)]
        common: CommonArgs,
        #[command(flatten)]
        selection: SelectionArgs,
    },
    /// Generate operations and support code
    Server {
        #[command(flatten)]
        common: CommonArgs,
        #[command(flatten)]
        selection: SelectionArgs,
        /// Only place operations under these tags
        #[arg(long = "tag")]
        tags: Vec<String>,
        #[arg(long)]
        skip_models: bool,
        #[arg(long)]
        skip_operations: bool,
        #[arg(long)]
        skip_support: bool,
    },
    /// Generate a test suite for the server
    Test {
        #[command(flatten)]
        common: CommonArgs,
        #[command(flatten)]
        selection: SelectionArgs,
        /// Also generate the compliance report collector
        #[arg(long)]
        include_tck: bool,
    },
}

/// Application name and model/operation allow-lists
#[derive(clap::Args, Debug)]
struct SelectionArgs {
    /// Application name (defaults to the spec title)
    #[arg(short = 'A', long)]
    name: Option<String>,
    /// Model names to include (all when omitted)
    #[arg(short = 'M', long = "model")]
    models: Vec<String>,
    /// Operation IDs to include (all when omitted)
    #[arg(short = 'O', long = "operation")]
    operations: Vec<String>,
    /// Serve the API documentation UI
    #[arg(long)]
    include_ui: bool,
}

impl CommonArgs {
    /// File options first, then every flag that was given
    async fn resolve(&self) -> anyhow::Result<GenOpts> {
        let mut opts = match &self.config {
            Some(path) => GenOpts::load(path)
                .await
                .with_context(|| format!("Failed to load config file {}", path.display()))?,
            None => GenOpts::default(),
        };

        if let Some(spec) = &self.spec {
            opts.spec = spec.clone();
        }
        if let Some(target) = &self.target {
            opts.target = target.clone();
        }
        if let Some(package) = &self.api_package {
            opts.api_package = package.clone();
        }
        if let Some(package) = &self.model_package {
            opts.model_package = package.clone();
        }
        if let Some(package) = &self.server_package {
            opts.server_package = package.clone();
        }
        if let Some(package) = &self.test_package {
            opts.test_package = package.clone();
        }
        if self.principal.is_some() {
            opts.principal = self.principal.clone();
        }
        if self.template_dir.is_some() {
            opts.template_dir = self.template_dir.clone();
        }
        opts.dump_data |= self.dump_data;

        opts.validate().context("Invalid generation options")?;
        Ok(opts)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with default level INFO
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let report = match cli.command {
        Commands::Operation {
            common,
            operations,
            tags,
            skip_handler,
            skip_parameters,
        } => {
            let opts = common.resolve().await?;
            let request = GenerateOperationsRequest {
                operation_ids: operations,
                tags,
                include_handler: !skip_handler,
                include_parameters: !skip_parameters,
            };
            application::generate_operations(&opts, &request)
                .await
                .with_context(|| format!("Failed to generate operations from {}", opts.spec))?
        }
        Commands::Support { common, selection } => {
            let opts = common.resolve().await?;
            let request = GenerateSupportRequest {
                name: selection.name,
                models: selection.models,
                operation_ids: selection.operations,
                include_ui: selection.include_ui,
                skip_models: false,
            };
            application::generate_support(&opts, &request)
                .await
                .with_context(|| format!("Failed to generate support code from {}", opts.spec))?
        }
        Commands::Server {
            common,
            selection,
            tags,
            skip_models,
            skip_operations,
            skip_support,
        } => {
            let opts = common.resolve().await?;
            let request = GenerateServerRequest {
                name: selection.name,
                models: selection.models,
                operation_ids: selection.operations,
                tags,
                include_ui: selection.include_ui,
                skip_models,
                skip_operations,
                skip_support,
            };
            application::generate_server(&opts, &request)
                .await
                .with_context(|| format!("Failed to generate server from {}", opts.spec))?
        }
        Commands::Test {
            common,
            selection,
            include_tck,
        } => {
            let opts = common.resolve().await?;
            let request = GenerateTestsRequest {
                name: selection.name,
                models: selection.models,
                operation_ids: selection.operations,
                include_ui: selection.include_ui,
                include_tck,
            };
            application::generate_tests(&opts, &request)
                .await
                .with_context(|| format!("Failed to generate tests from {}", opts.spec))?
        }
    };

    summarize(&report);
    if !report.is_success() {
        anyhow::bail!("{} artifact(s) failed to generate", report.failures.len());
    }
    Ok(())
}

fn summarize(report: &GenerationReport) {
    for path in &report.written {
        info!(path = %path.display(), "written");
    }
    for path in &report.skipped {
        info!(path = %path.display(), "kept existing file");
    }
    for failure in &report.failures {
        error!(
            artifact = %failure.artifact,
            name = %failure.name,
            error = %failure.error,
            "failed"
        );
    }
    info!(
        written = report.written.len(),
        skipped = report.skipped.len(),
        failed = report.failures.len(),
        "generation finished"
    );
}
