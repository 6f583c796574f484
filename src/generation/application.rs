//! Whole-application model assembled from every selected operation and model

use std::collections::BTreeSet;

use serde::Serialize;

use super::model::ModelDescriptor;
use super::operation::{OperationDescriptor, OperationModelBuilder};
use super::serializers::{SerializerGroup, SerializerGroupBuilder, SerializerKind};
use super::tables::{MediaTables, TypeTables};
use super::traits::SchemaValidationHook;
use super::types::{TypeRef, TypeResolver};
use crate::core::config::GenOpts;
use crate::core::error::Result;
use crate::core::utils::{receiver_name, to_camel_case, to_human_name_lower, to_pascal_case};
use crate::infrastructure::openapi::SpecDocument;
use crate::infrastructure::openapi::types::{ApiInfo, SecurityScheme};

/// Name used when neither the caller nor the spec title provides one
pub const FALLBACK_APP_NAME: &str = "swagger";

/// Authentication scheme the generated server wires up
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SecuritySchemeDescriptor {
    pub app_name: String,
    pub class_name: String,
    pub human_class_name: String,
    pub name: String,
    pub receiver_name: String,
    pub is_basic_auth: bool,
    pub is_api_key_auth: bool,
    /// `header` or `query` for API keys
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Header or query parameter carrying an API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param_name: Option<String>,
    pub principal: TypeRef,
}

/// Root model for bootstrap and wiring artifacts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicationModel {
    pub package: String,
    pub receiver_name: String,
    pub app_name: String,
    pub human_app_name: String,
    pub name: String,
    pub principal: TypeRef,
    pub info: ApiInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,
    pub default_consumes: String,
    pub default_produces: String,
    pub consumes_json: bool,
    pub produces_json: bool,
    pub consumes: Vec<SerializerGroup>,
    pub produces: Vec<SerializerGroup>,
    pub default_imports: Vec<String>,
    pub security_definitions: Vec<SecuritySchemeDescriptor>,
    pub models: Vec<ModelDescriptor>,
    pub operations: Vec<OperationDescriptor>,
    pub include_ui: bool,
    pub include_tck: bool,
    /// The loaded document as pretty JSON, served by the generated API
    pub spec_json: String,
}

/// Builds the application model
pub struct ApplicationModelBuilder<'a> {
    types: &'a TypeTables,
    media: &'a MediaTables,
    hook: &'a dyn SchemaValidationHook,
    opts: &'a GenOpts,
    include_ui: bool,
    include_tck: bool,
}

impl<'a> ApplicationModelBuilder<'a> {
    pub fn new(
        types: &'a TypeTables,
        media: &'a MediaTables,
        hook: &'a dyn SchemaValidationHook,
        opts: &'a GenOpts,
    ) -> Self {
        Self {
            types,
            media,
            hook,
            opts,
            include_ui: false,
            include_tck: false,
        }
    }

    pub fn include_ui(mut self, include: bool) -> Self {
        self.include_ui = include;
        self
    }

    pub fn include_tck(mut self, include: bool) -> Self {
        self.include_tck = include;
        self
    }

    /// Build the model for the selected models and operations
    ///
    /// Empty selections select everything; unknown names are skipped.
    pub fn build(
        &self,
        spec: &SpecDocument,
        name: Option<&str>,
        model_names: &[String],
        operation_ids: &[String],
    ) -> Result<ApplicationModel> {
        let name = app_name(name, spec);
        let receiver = receiver_name(&name);
        let app_name = to_pascal_case(&name);
        let principal = TypeRef::from_option(self.opts.principal());
        let resolver = TypeResolver::new(self.types, self.opts.model_package.clone());

        let serializers = SerializerGroupBuilder::new(self.media, &app_name, &receiver);
        let consumes = serializers.build(&spec.required_consumes(), SerializerKind::Consumer);
        let produces = serializers.build(&spec.required_produces(), SerializerKind::Producer);

        let security_definitions = spec
            .required_schemes()
            .iter()
            .filter_map(|scheme| match spec.security_definitions.get(scheme) {
                Some(definition) => {
                    self.security_scheme(definition, &app_name, &receiver, &principal)
                }
                None => {
                    tracing::warn!(scheme = %scheme, "security requirement has no definition");
                    None
                }
            })
            .collect();

        let models = select(spec.definitions().keys(), model_names, "model")
            .into_iter()
            .filter_map(|model| {
                spec.definitions().get(model).map(|schema| {
                    let mut descriptor =
                        ModelDescriptor::build(model, &self.opts.model_package, schema, &resolver);
                    descriptor.receiver_name = receiver.clone();
                    descriptor
                })
            })
            .collect();

        let operation_builder = OperationModelBuilder::new(
            resolver.clone(),
            self.hook,
            self.opts.model_package.clone(),
            self.opts.api_package.clone(),
            principal.clone(),
        )
        .with_receiver(receiver.clone());

        let mut operations = Vec::new();
        let mut tags = BTreeSet::new();
        for id in select(spec.operations.keys(), operation_ids, "operation") {
            let Some(operation) = spec.operation_by_name(id) else {
                continue;
            };
            tags.extend(operation.tags.iter().cloned());
            let security = spec.security_requirements_for(operation);
            operations.extend(operation_builder.build(id, operation, &[], &security)?);
        }

        let mut default_imports = vec![format!("crate::{}", self.opts.model_package)];
        default_imports.extend(tags.iter().map(|tag| {
            format!(
                "crate::{}::{}::{}",
                self.opts.server_package, self.opts.api_package, tag
            )
        }));

        Ok(ApplicationModel {
            package: self.opts.api_package.clone(),
            receiver_name: receiver,
            human_app_name: to_human_name_lower(&name),
            name: to_camel_case(&name),
            app_name,
            principal,
            info: spec.info.clone(),
            base_path: spec.base_path.clone(),
            default_consumes: consumes.default_media_type,
            default_produces: produces.default_media_type,
            consumes_json: consumes.includes_json,
            produces_json: produces.includes_json,
            consumes: consumes.groups,
            produces: produces.groups,
            default_imports,
            security_definitions,
            models,
            operations,
            include_ui: self.include_ui,
            include_tck: self.include_tck,
            spec_json: serde_json::to_string_pretty(spec.raw())?,
        })
    }

    /// Only basic and API key schemes are supported; others are dropped
    fn security_scheme(
        &self,
        definition: &SecurityScheme,
        app_name: &str,
        receiver: &str,
        principal: &TypeRef,
    ) -> Option<SecuritySchemeDescriptor> {
        let scheme_type = definition.scheme_type.as_str();
        if scheme_type != "basic" && scheme_type != "apiKey" {
            tracing::warn!(
                scheme = %definition.name,
                scheme_type = %definition.scheme_type,
                "dropping unsupported security scheme"
            );
            return None;
        }

        Some(SecuritySchemeDescriptor {
            app_name: app_name.to_string(),
            class_name: to_pascal_case(&definition.name),
            human_class_name: to_human_name_lower(&definition.name),
            name: to_camel_case(&definition.name),
            receiver_name: receiver.to_string(),
            is_basic_auth: scheme_type == "basic",
            is_api_key_auth: scheme_type == "apiKey",
            source: definition.location.clone(),
            param_name: definition.param_name.clone(),
            principal: principal.clone(),
        })
    }
}

/// Caller name, else the spec title, else the fallback
pub fn app_name(name: Option<&str>, spec: &SpecDocument) -> String {
    match name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => name.to_string(),
        None => spec
            .title()
            .map(to_pascal_case)
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| FALLBACK_APP_NAME.to_string()),
    }
}

fn select<'s, I>(available: I, wanted: &[String], kind: &str) -> Vec<&'s String>
where
    I: Iterator<Item = &'s String>,
{
    if wanted.is_empty() {
        return available.collect();
    }

    let selected: Vec<&String> = available.filter(|name| wanted.contains(name)).collect();
    for name in wanted {
        if !selected.contains(&name) {
            tracing::debug!(kind, name = %name, "ignoring unknown selection");
        }
    }
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::traits::ShallowSchemaValidation;
    use crate::infrastructure::openapi::SwaggerParser;
    use serde_json::json;
    use tracing_test::traced_test;

    fn petstore() -> SpecDocument {
        SwaggerParser::new(
            json!({
                "swagger": "2.0",
                "info": {"title": "Swagger Petstore", "version": "1.0.0"},
                "consumes": ["application/json"],
                "produces": ["application/json", "application/xml"],
                "securityDefinitions": {
                    "api_key": {"type": "apiKey", "name": "X-API-Key", "in": "header"},
                    "petstore_auth": {"type": "oauth2", "flow": "implicit", "authorizationUrl": "http://x"}
                },
                "paths": {
                    "/pets": {
                        "get": {
                            "operationId": "listPets",
                            "tags": ["pets", "store"],
                            "security": [{"api_key": []}],
                            "responses": {"200": {"description": "ok"}}
                        },
                        "post": {
                            "operationId": "addPet",
                            "security": [{"petstore_auth": ["write"]}],
                            "parameters": [{"name": "body", "in": "body", "schema": {"$ref": "#/definitions/Pet"}}],
                            "responses": {}
                        }
                    }
                },
                "definitions": {
                    "Pet": {"type": "object", "properties": {"name": {"type": "string"}}},
                    "Category": {"type": "object"}
                }
            }),
            "petstore.json",
        )
        .parse()
        .unwrap()
    }

    fn build(
        spec: &SpecDocument,
        name: Option<&str>,
        models: &[&str],
        ops: &[&str],
    ) -> ApplicationModel {
        let types = TypeTables::default();
        let media = MediaTables::default();
        let opts = GenOpts {
            spec: "petstore.json".into(),
            ..Default::default()
        };
        let models: Vec<String> = models.iter().map(|m| m.to_string()).collect();
        let ops: Vec<String> = ops.iter().map(|o| o.to_string()).collect();
        ApplicationModelBuilder::new(&types, &media, &ShallowSchemaValidation, &opts)
            .include_ui(true)
            .build(spec, name, &models, &ops)
            .unwrap()
    }

    #[test]
    fn test_names_from_title_and_fallback() {
        let spec = petstore();
        let app = build(&spec, None, &[], &[]);
        assert_eq!(app.app_name, "SwaggerPetstore");
        assert_eq!(app.name, "swaggerPetstore");
        assert_eq!(app.human_app_name, "swagger petstore");
        assert_eq!(app.receiver_name, "s");
        assert!(app.include_ui);

        let app = build(&spec, Some("zoo"), &[], &[]);
        assert_eq!(app.app_name, "Zoo");

        let mut untitled = petstore();
        untitled.info.title = None;
        assert_eq!(app_name(None, &untitled), FALLBACK_APP_NAME);
    }

    #[test]
    fn test_selection_and_fan_out() {
        let spec = petstore();
        let app = build(&spec, None, &[], &[]);
        assert_eq!(app.models.len(), 2);
        // addPet untagged, listPets fans out over two tags
        assert_eq!(app.operations.len(), 3);
        assert_eq!(app.operations[0].package, "operations");
        assert_eq!(
            app.default_imports,
            vec![
                "crate::models".to_string(),
                "crate::restapi::operations::pets".to_string(),
                "crate::restapi::operations::store".to_string(),
            ]
        );

        let app = build(&spec, None, &["Pet", "Missing"], &["addPet", "nope"]);
        assert_eq!(app.models.len(), 1);
        assert_eq!(app.models[0].class_name, "Pet");
        assert_eq!(app.operations.len(), 1);
        assert_eq!(app.operations[0].id, "addPet");
        assert!(app.operations[0].authorized);
    }

    #[test]
    #[traced_test]
    fn test_serializers_and_security() {
        let spec = petstore();
        let app = build(&spec, None, &[], &[]);
        assert!(app.consumes_json && app.produces_json);
        assert_eq!(app.default_produces, "application/json");
        assert_eq!(app.produces.len(), 2);

        // oauth2 is dropped
        assert_eq!(app.security_definitions.len(), 1);
        let scheme = &app.security_definitions[0];
        assert!(scheme.is_api_key_auth);
        assert_eq!(scheme.class_name, "ApiKey");
        assert_eq!(scheme.source.as_deref(), Some("header"));
        assert_eq!(scheme.param_name.as_deref(), Some("X-API-Key"));
        assert!(logs_contain("dropping unsupported security scheme"));
    }

    #[test]
    fn test_security_types_are_case_sensitive() {
        let spec = SwaggerParser::new(
            json!({
                "swagger": "2.0",
                "info": {"title": "Auth", "version": "1"},
                "securityDefinitions": {
                    "shouting": {"type": "APIKEY", "name": "X-Key", "in": "header"},
                    "titled": {"type": "Basic"},
                    "plain": {"type": "basic"}
                },
                "paths": {
                    "/ping": {
                        "get": {
                            "operationId": "ping",
                            "security": [{"shouting": []}, {"titled": []}, {"plain": []}],
                            "responses": {}
                        }
                    }
                }
            }),
            "auth.json",
        )
        .parse()
        .unwrap();

        let app = build(&spec, None, &[], &[]);
        let names: Vec<_> = app
            .security_definitions
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["plain"]);
        assert!(app.security_definitions[0].is_basic_auth);
    }

    #[test]
    fn test_build_is_deterministic() {
        let spec = petstore();
        let first = serde_json::to_string(&build(&spec, None, &[], &[])).unwrap();
        let second = serde_json::to_string(&build(&spec, None, &[], &[])).unwrap();
        assert_eq!(first, second);
    }
}
