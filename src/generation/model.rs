//! Shallow model descriptors for the application model
//!
//! Only the first level of properties is described; `$ref`s are named, never
//! followed, so recursive definitions are safe.

use serde::Serialize;

use super::types::{ResolvedType, TypeResolver};
use crate::core::utils::{receiver_name, to_pascal_case};
use crate::infrastructure::openapi::types::Schema;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyDescriptor {
    pub name: String,
    pub resolved_type: ResolvedType,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelDescriptor {
    pub name: String,
    pub class_name: String,
    pub package: String,
    pub receiver_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub properties: Vec<PropertyDescriptor>,
}

impl ModelDescriptor {
    pub fn build(name: &str, package: &str, schema: &Schema, resolver: &TypeResolver<'_>) -> Self {
        let class_name = to_pascal_case(name);
        let properties = schema
            .properties
            .iter()
            .map(|(prop, prop_schema)| PropertyDescriptor {
                name: prop.clone(),
                resolved_type: resolver.resolve_schema(prop_schema),
                required: schema.required.contains(prop),
            })
            .collect();

        Self {
            name: name.to_string(),
            receiver_name: receiver_name(&class_name),
            class_name,
            package: package.to_string(),
            description: schema.description.clone(),
            properties,
        }
    }
}
