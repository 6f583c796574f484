//! Typed view of a Swagger 2.0 document
//!
//! These types are read-only inputs to the model builder. Schemas keep named
//! `$ref`s as references instead of expanding them, so self-referential
//! definitions never recurse.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Validation keywords shared by parameters, items and schemas
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub exclusive_minimum: bool,
    pub exclusive_maximum: bool,
    pub min_length: Option<i64>,
    pub max_length: Option<i64>,
    pub pattern: Option<String>,
    pub min_items: Option<i64>,
    pub max_items: Option<i64>,
    pub unique_items: bool,
    pub multiple_of: Option<f64>,
    #[serde(rename = "enum")]
    pub enum_values: Vec<JsonValue>,
}

/// Element description of an array-valued non-body parameter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Items {
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    pub format: Option<String>,
    pub items: Option<Box<Items>>,
    pub collection_format: Option<String>,
    pub default: Option<JsonValue>,
    pub constraints: Constraints,
}

/// Where a parameter is carried in the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    FormData,
    Body,
}

impl ParameterLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Path => "path",
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
            ParameterLocation::FormData => "formData",
            ParameterLocation::Body => "body",
        }
    }
}

impl std::fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operation parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub location: ParameterLocation,
    pub description: Option<String>,
    pub required: bool,
    #[serde(rename = "type")]
    pub param_type: Option<String>,
    pub format: Option<String>,
    pub items: Option<Items>,
    pub collection_format: Option<String>,
    pub default: Option<JsonValue>,
    pub constraints: Constraints,
    /// Only set for body parameters
    pub schema: Option<Schema>,
}

/// Structural type description
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Name of the referenced definition, when this node is a `$ref`
    pub reference: Option<String>,
    #[serde(rename = "type")]
    pub schema_type: Option<String>,
    pub format: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub items: Option<Box<Schema>>,
    pub properties: BTreeMap<String, Schema>,
    pub required: Vec<String>,
    pub additional_properties: Option<Box<Schema>>,
    pub default: Option<JsonValue>,
    pub constraints: Constraints,
}

/// Response entry for one status code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub description: String,
    pub schema: Option<Schema>,
}

/// External documentation link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalDocs {
    pub url: String,
    pub description: Option<String>,
}

/// Scheme name mapped to required scopes
pub type SecurityRequirement = BTreeMap<String, Vec<String>>;

/// One named API action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub id: String,
    pub method: String,
    pub path: String,
    pub tags: Vec<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub external_docs: Option<ExternalDocs>,
    pub consumes: Option<Vec<String>>,
    pub produces: Option<Vec<String>>,
    pub parameters: Vec<Parameter>,
    /// Keyed by status code (`"200"`, `"default"`, ...)
    pub responses: BTreeMap<String, Response>,
    pub security: Option<Vec<SecurityRequirement>>,
    pub deprecated: bool,
}

impl Operation {
    /// The 200 response, the only one the model builder classifies
    pub fn success_response(&self) -> Option<&Response> {
        self.responses.get("200")
    }
}

/// Entry of `securityDefinitions`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityScheme {
    /// Key under `securityDefinitions`
    pub name: String,
    #[serde(rename = "type")]
    pub scheme_type: String,
    /// `in` of an apiKey scheme (`header` or `query`)
    pub location: Option<String>,
    /// Header or query parameter name of an apiKey scheme
    pub param_name: Option<String>,
    pub description: Option<String>,
}

/// API information
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiInfo {
    pub title: Option<String>,
    pub version: String,
    pub description: Option<String>,
}
