//! Application layer - generation use cases over the spec, templates and output

pub mod dto;
pub mod generate_operations;
pub mod generate_server;
pub mod generate_support;
pub mod report;

pub use dto::*;
pub use generate_operations::GenerateOperationsUseCase;
pub use generate_server::GenerateServerUseCase;
pub use generate_support::GenerateSupportUseCase;
pub use generate_tests::{GenerateTestsUseCase, OperationTestModel};
pub use report::{ArtifactFailure, GenerationReport};

use std::sync::Arc;

use serde::Serialize;

use crate::core::config::GenOpts;
use crate::core::error::Result;
use crate::infrastructure::openapi::{CompositeSpecLoader, SpecLoader};
use crate::infrastructure::output::{FileSystemOutputService, OutputService};

/// Print a built model instead of emitting artifacts
pub(crate) fn dump_json<T: Serialize>(model: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(model)?);
    Ok(())
}

fn default_services() -> Result<(Arc<dyn SpecLoader>, Arc<dyn OutputService>)> {
    Ok((
        Arc::new(CompositeSpecLoader::new()?),
        Arc::new(FileSystemOutputService::new()),
    ))
}

/// Generate operation artifacts reading the spec from a path or URL
pub async fn generate_operations(
    opts: &GenOpts,
    request: &GenerateOperationsRequest,
) -> Result<GenerationReport> {
    let (loader, output) = default_services()?;
    GenerateOperationsUseCase::new(loader, output)
        .execute(opts, request)
        .await
}

/// Generate support artifacts reading the spec from a path or URL
pub async fn generate_support(
    opts: &GenOpts,
    request: &GenerateSupportRequest,
) -> Result<GenerationReport> {
    let (loader, output) = default_services()?;
    GenerateSupportUseCase::new(loader, output)
        .execute(opts, request)
        .await
}

/// Generate a whole server reading the spec from a path or URL
pub async fn generate_server(
    opts: &GenOpts,
    request: &GenerateServerRequest,
) -> Result<GenerationReport> {
    let (loader, output) = default_services()?;
    GenerateServerUseCase::new(loader, output)
        .execute(opts, request)
        .await
}

/// Generate a server test suite reading the spec from a path or URL
pub async fn generate_tests(
    opts: &GenOpts,
    request: &GenerateTestsRequest,
) -> Result<GenerationReport> {
    let (loader, output) = default_services()?;
    GenerateTestsUseCase::new(loader, output)
        .execute(opts, request)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Error;
    use crate::infrastructure::openapi::{SpecDocument, SwaggerParser};
    use async_trait::async_trait;
    use serde_json::json;
    use std::path::Path;
    use tempfile::TempDir;

    struct StaticSpecLoader(serde_json::Value);

    #[async_trait]
    impl SpecLoader for StaticSpecLoader {
        async fn load(&self, source: &str) -> Result<SpecDocument> {
            SwaggerParser::new(self.0.clone(), source).parse()
        }
    }

    fn loader() -> Arc<dyn SpecLoader> {
        Arc::new(StaticSpecLoader(json!({
            "swagger": "2.0",
            "info": {"title": "Pet Shop", "version": "1.0.0"},
            "produces": ["application/json"],
            "paths": {
                "/pets": {
                    "get": {
                        "operationId": "listPets",
                        "tags": ["pets"],
                        "parameters": [
                            {"name": "limit", "in": "query", "type": "integer", "format": "int32", "maximum": 100}
                        ],
                        "responses": {"200": {"description": "ok", "schema": {"type": "array", "items": {"$ref": "#/definitions/Pet"}}}}
                    }
                },
                "/health": {
                    "get": {"operationId": "health", "responses": {"200": {"description": "ok"}}}
                }
            },
            "definitions": {
                "Pet": {"type": "object", "properties": {"name": {"type": "string"}}}
            }
        })))
    }

    fn opts(target: &Path) -> GenOpts {
        GenOpts {
            spec: "petshop.json".into(),
            target: target.to_path_buf(),
            ..Default::default()
        }
    }

    fn output() -> Arc<dyn OutputService> {
        Arc::new(FileSystemOutputService::new())
    }

    #[tokio::test]
    async fn test_operations_layout() {
        let dir = TempDir::new().unwrap();
        let report = GenerateOperationsUseCase::new(loader(), output())
            .execute(&opts(dir.path()), &GenerateOperationsRequest::default())
            .await
            .unwrap();

        let api = dir.path().join("restapi").join("operations");
        assert!(api.join("pets").join("list_pets.rs").exists());
        assert!(api.join("pets").join("list_pets_parameters.rs").exists());
        assert!(api.join("health.rs").exists());
        assert!(!api.join("health_parameters.rs").exists());
        assert_eq!(report.written.len(), 3);
        assert!(report.is_success());
    }

    #[tokio::test]
    async fn test_unknown_operation_fails_before_writing() {
        let dir = TempDir::new().unwrap();
        let request = GenerateOperationsRequest {
            operation_ids: vec!["listPets".into(), "deletePet".into()],
            ..Default::default()
        };
        let result = GenerateOperationsUseCase::new(loader(), output())
            .execute(&opts(dir.path()), &request)
            .await;

        match result {
            Err(Error::NotFound { kind, name, spec }) => {
                assert_eq!(kind, "operation");
                assert_eq!(name, "deletePet");
                assert_eq!(spec, "petshop.json");
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
        assert!(!dir.path().join("restapi").exists());
    }

    #[tokio::test]
    async fn test_support_keeps_user_configuration() {
        let dir = TempDir::new().unwrap();
        let use_case = GenerateSupportUseCase::new(loader(), output());
        let request = GenerateSupportRequest::default();

        let first = use_case.execute(&opts(dir.path()), &request).await.unwrap();
        assert_eq!(first.written.len(), 3);

        let cmd = dir.path().join("cmd").join("pet-shop-server");
        let configure = cmd.join("configure_pet_shop.rs");
        assert!(configure.exists());
        assert!(cmd.join("main.rs").exists());
        assert!(
            dir.path()
                .join("restapi")
                .join("operations")
                .join("pet_shop_api.rs")
                .exists()
        );

        std::fs::write(&configure, "// edited").unwrap();
        let second = use_case.execute(&opts(dir.path()), &request).await.unwrap();
        assert_eq!(second.skipped, vec![configure.clone()]);
        assert_eq!(std::fs::read_to_string(&configure).unwrap(), "// edited");
    }

    #[tokio::test]
    async fn test_server_skip_switches() {
        let dir = TempDir::new().unwrap();
        let request = GenerateServerRequest {
            skip_operations: true,
            ..Default::default()
        };
        let report = GenerateServerUseCase::new(loader(), output())
            .execute(&opts(dir.path()), &request)
            .await
            .unwrap();
        assert_eq!(report.written.len(), 3);
        assert!(!dir.path().join("restapi/operations/pets").exists());

        let request = GenerateServerRequest {
            skip_support: true,
            ..Default::default()
        };
        let other = TempDir::new().unwrap();
        let report = GenerateServerUseCase::new(loader(), output())
            .execute(&opts(other.path()), &request)
            .await
            .unwrap();
        assert_eq!(report.written.len(), 3);
        assert!(!other.path().join("cmd").exists());
    }

    #[tokio::test]
    async fn test_tests_with_tck() {
        let dir = TempDir::new().unwrap();
        let request = GenerateTestsRequest {
            include_tck: true,
            ..Default::default()
        };
        let report = GenerateTestsUseCase::new(loader(), output())
            .execute(&opts(dir.path()), &request)
            .await
            .unwrap();

        let tests = dir.path().join("tests").join("pet-shop");
        assert!(tests.join("tck_reporter.rs").exists());
        assert!(tests.join("pet_shop_suite_test.rs").exists());
        assert!(tests.join("pets_list_pets_test.rs").exists());
        assert!(tests.join("operations_health_test.rs").exists());
        assert_eq!(report.written.len(), 4);

        let suite = std::fs::read_to_string(tests.join("pet_shop_suite_test.rs")).unwrap();
        assert!(suite.contains("mod tck_reporter;"));
        assert!(suite.contains("mod pets_list_pets_test;"));
    }

    #[tokio::test]
    async fn test_broken_template_is_recorded_not_fatal() {
        let dir = TempDir::new().unwrap();
        let templates = TempDir::new().unwrap();
        let server = templates.path().join("server");
        std::fs::create_dir_all(&server).unwrap();
        std::fs::write(server.join("main.rs.tera"), "{{ no_such_field }}").unwrap();

        let opts = GenOpts {
            template_dir: Some(templates.path().to_path_buf()),
            ..opts(dir.path())
        };
        let report = GenerateSupportUseCase::new(loader(), output())
            .execute(&opts, &GenerateSupportRequest::default())
            .await
            .unwrap();

        assert_eq!(report.written.len(), 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].artifact, "main");
    }
}
