//! Operation descriptors: tag fan-out, parameter partitioning and response shape

use serde::Serialize;

use super::parameter::{ParameterBuilder, ParameterDescriptor};
use super::sanitizers::{commented_lines, sanitize_doc};
use super::traits::SchemaValidationHook;
use super::types::{TypeCategory, TypeRef, TypeResolver};
use crate::core::error::Result;
use crate::core::utils::{to_camel_case, to_human_name_lower, to_pascal_case};
use crate::infrastructure::openapi::types::{Operation, SecurityRequirement};

/// Receiver used by generated handler code
pub const DEFAULT_RECEIVER: &str = "o";

/// Shape of the 200 response body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseShape {
    Primitive,
    Formatted,
    Container,
    Map,
    ComplexObject,
}

impl From<TypeCategory> for ResponseShape {
    fn from(category: TypeCategory) -> Self {
        match category {
            TypeCategory::Primitive => ResponseShape::Primitive,
            TypeCategory::CustomFormatted => ResponseShape::Formatted,
            TypeCategory::Array => ResponseShape::Container,
            TypeCategory::Map => ResponseShape::Map,
            TypeCategory::ComplexObject => ResponseShape::ComplexObject,
        }
    }
}

/// Zero value of the success type, `Absent` when the type has none
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ZeroValue {
    Literal(String),
    Absent,
}

/// One operation placed in one package
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationDescriptor {
    pub id: String,
    pub method: String,
    pub path: String,
    /// Package (tag) the generated code lives in
    pub package: String,
    pub class_name: String,
    pub name: String,
    pub human_class_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub doc_string: String,
    pub receiver_name: String,
    pub default_imports: Vec<String>,
    pub params: Vec<ParameterDescriptor>,
    pub query_params: Vec<ParameterDescriptor>,
    pub path_params: Vec<ParameterDescriptor>,
    pub header_params: Vec<ParameterDescriptor>,
    pub form_params: Vec<ParameterDescriptor>,
    pub has_query_params: bool,
    pub has_form_params: bool,
    pub has_file_params: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_model: Option<String>,
    pub success_zero: ZeroValue,
    pub response_shape: ResponseShape,
    pub returns_primitive: bool,
    pub returns_formatted: bool,
    pub returns_container: bool,
    pub returns_map: bool,
    pub returns_complex_object: bool,
    pub authorized: bool,
    pub principal: TypeRef,
}

/// Builds operation descriptors
pub struct OperationModelBuilder<'a> {
    resolver: TypeResolver<'a>,
    hook: &'a dyn SchemaValidationHook,
    models_package: String,
    default_package: String,
    principal: TypeRef,
    receiver: String,
}

impl<'a> OperationModelBuilder<'a> {
    pub fn new(
        resolver: TypeResolver<'a>,
        hook: &'a dyn SchemaValidationHook,
        models_package: impl Into<String>,
        default_package: impl Into<String>,
        principal: TypeRef,
    ) -> Self {
        Self {
            resolver,
            hook,
            models_package: models_package.into(),
            default_package: default_package.into(),
            principal,
            receiver: DEFAULT_RECEIVER.to_string(),
        }
    }

    pub fn with_receiver(mut self, receiver: impl Into<String>) -> Self {
        self.receiver = receiver.into();
        self
    }

    /// Build one descriptor per package the operation lands in
    ///
    /// Untagged operations go to the default package. Without a filter every
    /// tag gets its own descriptor; with a filter only listed tags do, and an
    /// operation none of whose tags are listed falls back to the default package.
    pub fn build(
        &self,
        id: &str,
        operation: &Operation,
        tag_filter: &[String],
        security: &[SecurityRequirement],
    ) -> Result<Vec<OperationDescriptor>> {
        let packages: Vec<&str> = operation
            .tags
            .iter()
            .filter(|tag| tag_filter.is_empty() || tag_filter.contains(tag))
            .map(String::as_str)
            .collect();

        let packages = if packages.is_empty() {
            vec![self.default_package.as_str()]
        } else {
            packages
        };

        packages
            .into_iter()
            .map(|package| self.build_one(id, package, operation, security))
            .collect()
    }

    fn build_one(
        &self,
        id: &str,
        package: &str,
        operation: &Operation,
        security: &[SecurityRequirement],
    ) -> Result<OperationDescriptor> {
        let params_builder = ParameterBuilder::new(&self.resolver, self.hook, &self.receiver);

        let mut params = Vec::with_capacity(operation.parameters.len());
        let (mut query, mut path, mut header, mut form) = (vec![], vec![], vec![], vec![]);
        for raw in &operation.parameters {
            let param = params_builder.build(raw)?;
            if param.is_query_param {
                query.push(param.clone());
            } else if param.is_path_param {
                path.push(param.clone());
            } else if param.is_header_param {
                header.push(param.clone());
            } else if param.is_form_param {
                form.push(param.clone());
            }
            params.push(param);
        }

        let success = operation
            .success_response()
            .and_then(|response| response.schema.as_ref())
            .map(|schema| self.resolver.resolve_schema(schema));
        let shape = success
            .as_ref()
            .map(|resolved| ResponseShape::from(resolved.category))
            .unwrap_or(ResponseShape::ComplexObject);
        let success_zero = success
            .as_ref()
            .and_then(|resolved| self.resolver.tables().zero_value(&resolved.name))
            .map(|zero| ZeroValue::Literal(zero.to_string()))
            .unwrap_or(ZeroValue::Absent);

        let class_name = to_pascal_case(id);

        Ok(OperationDescriptor {
            id: id.to_string(),
            method: operation.method.to_uppercase(),
            path: operation.path.clone(),
            package: package.to_string(),
            name: to_camel_case(id),
            human_class_name: to_human_name_lower(&class_name),
            doc_string: operation_doc_string(&class_name, operation),
            class_name,
            summary: operation.summary.clone(),
            description: operation.description.clone(),
            receiver_name: self.receiver.clone(),
            default_imports: vec![
                format!("crate::{}", self.models_package),
                "runtime::middleware".to_string(),
                "runtime::strfmt".to_string(),
            ],
            has_query_params: !query.is_empty(),
            has_form_params: !form.is_empty(),
            has_file_params: params.iter().any(|p| p.is_file_param),
            params,
            query_params: query,
            path_params: path,
            header_params: header,
            form_params: form,
            success_model: success.map(|resolved| resolved.name),
            success_zero,
            response_shape: shape,
            returns_primitive: shape == ResponseShape::Primitive,
            returns_formatted: shape == ResponseShape::Formatted,
            returns_container: shape == ResponseShape::Container,
            returns_map: shape == ResponseShape::Map,
            returns_complex_object: shape == ResponseShape::ComplexObject,
            authorized: !security.is_empty(),
            principal: self.principal.clone(),
        })
    }
}

/// `{ClassName} {description}` plus an external docs footer, as line comments
fn operation_doc_string(class_name: &str, operation: &Operation) -> String {
    let header = format!(
        "{class_name} {}",
        operation.description.as_deref().unwrap_or_default()
    );

    let footer = match &operation.external_docs {
        Some(docs) if !docs.url.is_empty() => match docs.description.as_deref() {
            Some(desc) if !desc.is_empty() => format!("\n{desc}\nSee: {}", docs.url),
            _ => format!("\nSee: {}", docs.url),
        },
        _ => String::new(),
    };

    commented_lines(&sanitize_doc(&format!("{header}\n{footer}")))
}
