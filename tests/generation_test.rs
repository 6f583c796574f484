//! End-to-end generation from the petstore fixture into a temporary directory

use std::path::Path;
use std::sync::Arc;

use apigen::application::{
    self, GenerateOperationsRequest, GenerateServerRequest, GenerateTestsRequest,
};
use apigen::core::{Error, GenOpts};
use apigen::infrastructure::output::{
    FileSystemOutputService, OutputService, OverwritePolicy, WriteOutcome,
};
use apigen::infrastructure::templates::{ArtifactKind, Emitter, TemplateRegistry};
use serde_json::json;
use tempfile::TempDir;

const PETSTORE: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/fixtures/petstore.swagger.json"
);

fn opts(target: &Path) -> GenOpts {
    GenOpts {
        spec: PETSTORE.to_string(),
        target: target.to_path_buf(),
        principal: Some("models::User".to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_emitter_preserves_if_absent_artifacts() {
    let dir = TempDir::new().unwrap();
    let output: Arc<dyn OutputService> = Arc::new(FileSystemOutputService::new());
    let emitter = Emitter::new(TemplateRegistry::embedded().unwrap(), output);

    let model = |app: &str| {
        json!({
            "app_name": app,
            "human_app_name": "pets",
            "name": "pets",
            "default_imports": [],
            "security_definitions": [],
            "operations": [],
        })
    };

    let first = emitter
        .emit(ArtifactKind::ConfigureApi, dir.path(), "configure_pets", &model("First"))
        .await
        .unwrap();
    assert!(matches!(first, WriteOutcome::Written(_)));
    let second = emitter
        .emit(ArtifactKind::ConfigureApi, dir.path(), "configure_pets", &model("Second"))
        .await
        .unwrap();
    assert!(matches!(second, WriteOutcome::Skipped(_)));

    let content = std::fs::read_to_string(dir.path().join("configure_pets.rs")).unwrap();
    assert!(content.contains("FirstApi"));
    assert!(!content.contains("SecondApi"));

    emitter
        .emit(ArtifactKind::Main, dir.path(), "main", &model("First"))
        .await
        .unwrap();
    emitter
        .emit(ArtifactKind::Main, dir.path(), "main", &model("Second"))
        .await
        .unwrap();
    let content = std::fs::read_to_string(dir.path().join("main.rs")).unwrap();
    assert!(content.contains("SecondApi::default()"));
}

#[tokio::test]
async fn test_output_policies_directly() {
    let dir = TempDir::new().unwrap();
    let output = FileSystemOutputService::new();

    output
        .write(dir.path(), "a.rs", b"one", OverwritePolicy::IfAbsent)
        .await
        .unwrap();
    output
        .write(dir.path(), "a.rs", b"two", OverwritePolicy::IfAbsent)
        .await
        .unwrap();
    assert_eq!(std::fs::read_to_string(dir.path().join("a.rs")).unwrap(), "one");

    output
        .write(dir.path(), "a.rs", b"three", OverwritePolicy::Always)
        .await
        .unwrap();
    assert_eq!(std::fs::read_to_string(dir.path().join("a.rs")).unwrap(), "three");
}

#[tokio::test]
async fn test_generate_server_layout() {
    let dir = TempDir::new().unwrap();
    let report = application::generate_server(&opts(dir.path()), &GenerateServerRequest::default())
        .await
        .unwrap();
    assert!(report.is_success(), "failures: {:?}", report.failures);

    let api = dir.path().join("restapi").join("operations");
    for tag in ["pets", "store", "admin"] {
        assert!(api.join(tag).join("find_pets.rs").exists(), "find_pets under {tag}");
        assert!(api.join(tag).join("find_pets_parameters.rs").exists());
    }
    assert!(api.join("pets").join("add_pet.rs").exists());
    assert!(api.join("ping.rs").exists());
    assert!(!api.join("ping_parameters.rs").exists());
    assert!(api.join("swagger_petstore_api.rs").exists());

    let cmd = dir.path().join("cmd").join("swagger-petstore-server");
    assert!(cmd.join("configure_swagger_petstore.rs").exists());
    assert!(cmd.join("main.rs").exists());

    let handler = std::fs::read_to_string(api.join("pets").join("get_pet_by_id.rs")).unwrap();
    assert!(handler.contains("pub struct GetPetById"));
    assert!(handler.contains("principal: models::User"));

    let params =
        std::fs::read_to_string(api.join("pets").join("find_pets_parameters.rs")).unwrap();
    assert!(params.contains("pub struct FindPetsParams"));
    assert!(params.contains("split_pipes"));
    assert!(params.contains("strfmt::to_i32"));
    assert!(params.contains("errors::minimum(\"offset\", value, 0"));
    assert!(params.contains("if let Some(raw) = raw {"));

    let builder = std::fs::read_to_string(api.join("swagger_petstore_api.rs")).unwrap();
    assert!(builder.contains("pub struct SwaggerPetstoreApi"));
    assert!(builder.contains("api_key_auth"));
}

#[tokio::test]
async fn test_array_parameter_loops_bind_their_indexes() {
    let dir = TempDir::new().unwrap();
    application::generate_server(&opts(dir.path()), &GenerateServerRequest::default())
        .await
        .unwrap();
    let params = std::fs::read_to_string(
        dir.path()
            .join("restapi")
            .join("operations")
            .join("pets")
            .join("find_pets_parameters.rs"),
    )
    .unwrap();

    // every element access `xc[y]` needs `let xc` and the `for y` loop above it
    let access = regex::Regex::new(r"\b(i+)c\[(i+)\]").unwrap();
    let mut accesses = 0;
    for caps in access.captures_iter(&params) {
        let before = &params[..caps.get(0).unwrap().start()];
        let values = format!("let {}c: Vec<&str>", &caps[1]);
        let index = format!("for {} in 0..{}c.len()", &caps[2], &caps[2]);
        assert!(before.contains(&values), "{} used before `{values}`", &caps[0]);
        assert!(before.contains(&index), "{} used before `{index}`", &caps[0]);
        accesses += 1;
    }
    assert_eq!(accesses, 2, "{params}");

    // outer list bounds, inner list bounds and the leaf enum
    let outer = r#""tags""#;
    let inner = r#"format!("{}.{}", "tags", i)"#;
    let leaf = format!(r#"format!("{{}}.{{}}", {inner}, ii)"#);
    assert!(params.contains(&format!("errors::item_count({outer}, ic.len(), Some(1), None)?;")));
    assert!(params.contains(&format!("errors::unique_items({outer}, &ic)?;")));
    assert!(params.contains(&format!("errors::item_count({inner}, iic.len(), None, Some(3))?;")));
    assert!(params.contains(&format!("errors::one_of({leaf}, &value, &[1,10,100,1000])?;")));
}

#[tokio::test]
async fn test_rerun_keeps_configuration() {
    let dir = TempDir::new().unwrap();
    let request = GenerateServerRequest {
        skip_operations: true,
        ..Default::default()
    };
    application::generate_server(&opts(dir.path()), &request)
        .await
        .unwrap();

    let configure = dir
        .path()
        .join("cmd")
        .join("swagger-petstore-server")
        .join("configure_swagger_petstore.rs");
    std::fs::write(&configure, "// my handlers").unwrap();

    let report = application::generate_server(&opts(dir.path()), &request)
        .await
        .unwrap();
    assert_eq!(report.skipped, vec![configure.clone()]);
    assert_eq!(std::fs::read_to_string(&configure).unwrap(), "// my handlers");
}

#[tokio::test]
async fn test_unknown_operation_is_not_found() {
    let dir = TempDir::new().unwrap();
    let request = GenerateOperationsRequest {
        operation_ids: vec!["findPets".into(), "launchRocket".into()],
        ..Default::default()
    };
    let err = application::generate_operations(&opts(dir.path()), &request)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound { kind: "operation", .. }));
    assert!(err.to_string().contains("launchRocket"));
    assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
}

#[tokio::test]
async fn test_tag_filter_limits_packages() {
    let dir = TempDir::new().unwrap();
    let request = GenerateOperationsRequest {
        operation_ids: vec!["findPets".into()],
        tags: vec!["store".into()],
        include_parameters: false,
        ..Default::default()
    };
    let report = application::generate_operations(&opts(dir.path()), &request)
        .await
        .unwrap();

    let api = dir.path().join("restapi").join("operations");
    assert_eq!(report.written, vec![api.join("store").join("find_pets.rs")]);
    assert!(!api.join("pets").exists());
}

#[tokio::test]
async fn test_generate_tests_suite() {
    let dir = TempDir::new().unwrap();
    let request = GenerateTestsRequest {
        operation_ids: vec!["ping".into(), "getInventory".into()],
        ..Default::default()
    };
    let report = application::generate_tests(&opts(dir.path()), &request)
        .await
        .unwrap();
    assert!(report.is_success(), "failures: {:?}", report.failures);

    let tests = dir.path().join("tests").join("swagger-petstore");
    assert!(tests.join("swagger_petstore_suite_test.rs").exists());
    assert!(tests.join("operations_ping_test.rs").exists());
    assert!(tests.join("store_get_inventory_test.rs").exists());
    assert!(!tests.join("tck_reporter.rs").exists());
    assert_eq!(report.written.len(), 3);
}
