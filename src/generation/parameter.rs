//! Parameter descriptors and the nested item chain of array parameters

use serde::Serialize;

use super::traits::SchemaValidationHook;
use super::types::{ResolvedType, TypeResolver};
use super::validation::{ValidationBuilder, ValidationDescriptor};
use crate::core::error::{Error, Result};
use crate::core::utils::{to_camel_case, to_snake_case};
use crate::infrastructure::openapi::types::{Items, Parameter, ParameterLocation};

/// One nesting level of an array-valued parameter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterItemDescriptor {
    /// Zero for the items of the parameter itself
    pub depth: usize,
    pub validation: ValidationDescriptor,
    pub resolved_type: ResolvedType,
    /// Expression building the error path of one element, e.g. `tags.0`
    pub path_expression: String,
    pub index_variable: String,
    pub value_expression: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub converter: Option<String>,
    pub location: ParameterLocation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub child: Option<Box<ParameterItemDescriptor>>,
}

/// Names a level derives from the level above it
struct LevelNames<'a> {
    path_expression: &'a str,
    index_variable: &'a str,
}

impl LevelNames<'_> {
    fn child_path(&self) -> String {
        format!(
            "format!(\"{{}}.{{}}\", {}, {})",
            self.path_expression, self.index_variable
        )
    }

    fn child_index(&self) -> String {
        format!("{}i", self.index_variable)
    }

    fn child_value(&self) -> String {
        format!("{0}c[{0}]", self.index_variable)
    }
}

/// Builds the item chain of one array parameter
pub struct ParameterItemChain<'r, 'a> {
    resolver: &'r TypeResolver<'a>,
    location: ParameterLocation,
}

impl<'r, 'a> ParameterItemChain<'r, 'a> {
    pub fn new(resolver: &'r TypeResolver<'a>, location: ParameterLocation) -> Self {
        Self { resolver, location }
    }

    /// Build the chain below a level with the given path and index variable
    ///
    /// Returns `None` without items. Recursion follows `items.items` until the
    /// first node without nested items, with no fixed depth limit.
    pub fn build(
        &self,
        parent_path: &str,
        parent_index: &str,
        items: Option<&Items>,
    ) -> Option<Box<ParameterItemDescriptor>> {
        let parent = LevelNames {
            path_expression: parent_path,
            index_variable: parent_index,
        };
        items.map(|items| self.build_level(0, parent, items))
    }

    fn build_level(
        &self,
        depth: usize,
        parent: LevelNames<'_>,
        items: &Items,
    ) -> Box<ParameterItemDescriptor> {
        let resolved = self.resolver.resolve_simple(
            items.item_type.as_deref(),
            items.format.as_deref(),
            items.items.as_deref(),
        );
        let validation = ValidationBuilder::build(
            &resolved,
            items.format.as_deref(),
            &items.constraints,
            false,
            items.default.as_ref(),
        );

        let path_expression = parent.child_path();
        let index_variable = parent.child_index();

        let child = items.items.as_deref().map(|nested| {
            self.build_level(
                depth + 1,
                LevelNames {
                    path_expression: &path_expression,
                    index_variable: &index_variable,
                },
                nested,
            )
        });

        Box::new(ParameterItemDescriptor {
            depth,
            converter: self
                .resolver
                .tables()
                .converter(&resolved.name)
                .map(String::from),
            validation,
            resolved_type: resolved,
            value_expression: parent.child_value(),
            path_expression,
            index_variable,
            collection_format: items.collection_format.clone(),
            location: self.location,
            child,
        })
    }
}

/// Fully described operation parameter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterDescriptor {
    /// Name on the wire
    pub name: String,
    /// camelCase name used in JSON
    pub param_name: String,
    /// Field name in the generated parameters struct
    pub property_name: String,
    pub receiver_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub location: ParameterLocation,
    pub is_query_param: bool,
    pub is_path_param: bool,
    pub is_header_param: bool,
    pub is_form_param: bool,
    pub is_body_param: bool,
    pub is_file_param: bool,
    pub validation: ValidationDescriptor,
    pub resolved_type: ResolvedType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub converter: Option<String>,
    pub value_expression: String,
    pub index_variable: String,
    pub path_expression: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub child: Option<Box<ParameterItemDescriptor>>,
}

impl ParameterDescriptor {
    /// Item levels from the outermost to the leaf
    pub fn chain(&self) -> impl Iterator<Item = &ParameterItemDescriptor> {
        std::iter::successors(self.child.as_deref(), |item| item.child.as_deref())
    }

    pub fn item_at(&self, depth: usize) -> Option<&ParameterItemDescriptor> {
        self.chain().nth(depth)
    }

    /// The level enclosing `depth`, `None` for the outermost level
    pub fn parent_of(&self, depth: usize) -> Option<&ParameterItemDescriptor> {
        depth.checked_sub(1).and_then(|d| self.item_at(d))
    }

    pub fn chain_depth(&self) -> usize {
        self.chain().count()
    }
}

/// Builds parameter descriptors for one operation
pub struct ParameterBuilder<'r, 'a> {
    resolver: &'r TypeResolver<'a>,
    hook: &'r dyn SchemaValidationHook,
    receiver: String,
}

impl<'r, 'a> ParameterBuilder<'r, 'a> {
    pub fn new(
        resolver: &'r TypeResolver<'a>,
        hook: &'r dyn SchemaValidationHook,
        receiver: impl Into<String>,
    ) -> Self {
        Self {
            resolver,
            hook,
            receiver: receiver.into(),
        }
    }

    pub fn build(&self, param: &Parameter) -> Result<ParameterDescriptor> {
        let is_file = param.param_type.as_deref() == Some("file");
        if is_file && param.location != ParameterLocation::FormData {
            return Err(Error::unsupported(format!(
                "file parameter {:?} must be in formData, found in {}",
                param.name, param.location
            )));
        }

        let param_name = to_camel_case(&param.name);
        let property_name = to_snake_case(&param.name);
        let path_expression = format!("\"{}\"", param_name);
        let index_variable = "i".to_string();

        let (resolved, validation, child) = if param.location == ParameterLocation::Body {
            let (resolved, validation) = match &param.schema {
                Some(schema) => {
                    let resolved = self.resolver.resolve_schema(schema);
                    let validation = self.hook.validate(schema, &resolved, param.required);
                    (resolved, validation)
                }
                None => {
                    let resolved = self.resolver.resolve_simple(None, None, None);
                    let validation = ValidationBuilder::build(
                        &resolved,
                        None,
                        &param.constraints,
                        param.required,
                        None,
                    );
                    (resolved, validation)
                }
            };
            (resolved, validation, None)
        } else {
            let resolved = self.resolver.resolve_simple(
                param.param_type.as_deref(),
                param.format.as_deref(),
                param.items.as_ref(),
            );
            let validation = ValidationBuilder::build(
                &resolved,
                param.format.as_deref(),
                &param.constraints,
                param.required,
                param.default.as_ref(),
            );
            let child = if resolved.is_array() {
                ParameterItemChain::new(self.resolver, param.location).build(
                    &path_expression,
                    &index_variable,
                    param.items.as_ref(),
                )
            } else {
                None
            };
            (resolved, validation, child)
        };

        Ok(ParameterDescriptor {
            name: param.name.clone(),
            value_expression: format!("{}.{}", self.receiver, property_name),
            param_name,
            property_name,
            receiver_name: self.receiver.clone(),
            description: param.description.clone(),
            location: param.location,
            is_query_param: param.location == ParameterLocation::Query,
            is_path_param: param.location == ParameterLocation::Path,
            is_header_param: param.location == ParameterLocation::Header,
            is_form_param: param.location == ParameterLocation::FormData,
            is_body_param: param.location == ParameterLocation::Body,
            is_file_param: is_file,
            converter: self
                .resolver
                .tables()
                .converter(&resolved.name)
                .map(String::from),
            validation,
            resolved_type: resolved,
            collection_format: param.collection_format.clone(),
            index_variable,
            path_expression,
            child,
        })
    }
}
