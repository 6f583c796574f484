//! Swagger 2.0 document parser
//!
//! Turns the raw JSON value of a spec into a [`SpecDocument`]. It handles:
//! - Path-level and operation-level parameters (operation wins on conflicts)
//! - Local `$ref`s to `#/parameters/..` and `#/responses/..`
//! - Schema `$ref`s, kept as named references and never expanded
//! - OpenAPI 3 style `schema` on non-body parameters, lifted to type/format

use std::collections::BTreeMap;

use serde_json::{Map as JsonMap, Value as JsonValue};

use super::document::SpecDocument;
use super::types::{
    ApiInfo, Constraints, ExternalDocs, Items, Operation, Parameter, ParameterLocation, Response,
    Schema, SecurityRequirement, SecurityScheme,
};
use crate::core::error::{Error, Result};
use crate::core::utils::to_snake_case;

/// HTTP methods a path item may carry
const HTTP_METHODS: &[&str] = &["get", "put", "post", "delete", "options", "head", "patch"];

/// Parser over the raw JSON value of a spec
pub struct SwaggerParser {
    json: JsonValue,
    source: String,
}

impl SwaggerParser {
    /// Create a new parser; `source` is only used for diagnostics
    pub fn new(json: JsonValue, source: impl Into<String>) -> Self {
        Self {
            json,
            source: source.into(),
        }
    }

    /// Parse the complete document
    pub fn parse(self) -> Result<SpecDocument> {
        let version = self
            .json
            .get("swagger")
            .or_else(|| self.json.get("openapi"))
            .and_then(JsonValue::as_str)
            .ok_or_else(|| Error::spec(format!("{}: missing swagger version", self.source)))?
            .to_string();

        let info = self
            .json
            .get("info")
            .map(|info| ApiInfo {
                title: str_field(info, "title"),
                version: str_field(info, "version").unwrap_or_default(),
                description: str_field(info, "description"),
            })
            .unwrap_or_default();

        let definitions = match self.json.get("definitions").and_then(JsonValue::as_object) {
            Some(defs) => defs
                .iter()
                .map(|(name, schema)| Ok((name.clone(), self.parse_schema(schema)?)))
                .collect::<Result<BTreeMap<_, _>>>()?,
            None => BTreeMap::new(),
        };

        let security_definitions = self
            .json
            .get("securityDefinitions")
            .and_then(JsonValue::as_object)
            .map(|defs| {
                defs.iter()
                    .map(|(name, def)| {
                        let scheme = SecurityScheme {
                            name: name.clone(),
                            scheme_type: str_field(def, "type").unwrap_or_default(),
                            location: str_field(def, "in"),
                            param_name: str_field(def, "name"),
                            description: str_field(def, "description"),
                        };
                        (name.clone(), scheme)
                    })
                    .collect()
            })
            .unwrap_or_default();

        let operations = self.parse_operations()?;
        tracing::debug!(
            source = %self.source,
            operations = operations.len(),
            definitions = definitions.len(),
            "parsed spec document"
        );

        Ok(SpecDocument {
            version,
            info,
            base_path: str_field(&self.json, "basePath"),
            consumes: str_list(self.json.get("consumes")).unwrap_or_default(),
            produces: str_list(self.json.get("produces")).unwrap_or_default(),
            security: parse_security(self.json.get("security")).unwrap_or_default(),
            definitions,
            security_definitions,
            operations,
            source: self.source,
            raw: self.json,
        })
    }

    fn parse_operations(&self) -> Result<BTreeMap<String, Operation>> {
        let mut operations = BTreeMap::new();
        let Some(paths) = self.json.get("paths").and_then(JsonValue::as_object) else {
            return Ok(operations);
        };

        for (path, path_item) in paths {
            let path_item = self.deref(path_item)?;
            let shared = self.parse_parameters(path_item.get("parameters"))?;

            for method in HTTP_METHODS {
                let Some(method_item) = path_item.get(*method).and_then(JsonValue::as_object)
                else {
                    continue;
                };
                let operation = self.build_operation(path, method, &shared, method_item)?;
                if operations.contains_key(&operation.id) {
                    return Err(Error::spec(format!(
                        "{}: duplicate operation id {:?}",
                        self.source, operation.id
                    )));
                }
                operations.insert(operation.id.clone(), operation);
            }
        }

        Ok(operations)
    }

    fn build_operation(
        &self,
        path: &str,
        method: &str,
        shared: &[Parameter],
        method_item: &JsonMap<String, JsonValue>,
    ) -> Result<Operation> {
        let id = method_item
            .get("operationId")
            .and_then(JsonValue::as_str)
            .map(String::from)
            .unwrap_or_else(|| to_snake_case(&format!("{method} {path}")));

        // Operation parameters override path-level ones with the same name and location
        let own = self.parse_parameters(method_item.get("parameters"))?;
        let mut parameters: Vec<Parameter> = shared
            .iter()
            .filter(|p| {
                !own.iter()
                    .any(|o| o.name == p.name && o.location == p.location)
            })
            .cloned()
            .collect();
        parameters.extend(own);

        let responses = match method_item.get("responses").and_then(JsonValue::as_object) {
            Some(map) => map
                .iter()
                .map(|(code, response)| Ok((code.clone(), self.parse_response(response)?)))
                .collect::<Result<BTreeMap<_, _>>>()?,
            None => BTreeMap::new(),
        };

        let external_docs = method_item
            .get("externalDocs")
            .and_then(|docs| {
                Some(ExternalDocs {
                    url: str_field(docs, "url")?,
                    description: str_field(docs, "description"),
                })
            });

        Ok(Operation {
            id,
            method: method.to_string(),
            path: path.to_string(),
            tags: str_list(method_item.get("tags")).unwrap_or_default(),
            summary: method_item
                .get("summary")
                .and_then(JsonValue::as_str)
                .map(String::from),
            description: method_item
                .get("description")
                .and_then(JsonValue::as_str)
                .map(String::from),
            external_docs,
            consumes: str_list(method_item.get("consumes")),
            produces: str_list(method_item.get("produces")),
            parameters,
            responses,
            security: parse_security(method_item.get("security")),
            deprecated: method_item
                .get("deprecated")
                .and_then(JsonValue::as_bool)
                .unwrap_or(false),
        })
    }

    fn parse_parameters(&self, value: Option<&JsonValue>) -> Result<Vec<Parameter>> {
        let Some(list) = value.and_then(JsonValue::as_array) else {
            return Ok(Vec::new());
        };
        list.iter()
            .map(|param| self.parse_parameter(self.deref(param)?))
            .collect()
    }

    fn parse_parameter(&self, param: &JsonValue) -> Result<Parameter> {
        let name = str_field(param, "name")
            .ok_or_else(|| Error::spec(format!("{}: parameter missing name", self.source)))?;

        let location = match param.get("in").and_then(JsonValue::as_str) {
            Some("path") => ParameterLocation::Path,
            Some("query") => ParameterLocation::Query,
            Some("header") => ParameterLocation::Header,
            Some("formData") => ParameterLocation::FormData,
            Some("body") => ParameterLocation::Body,
            other => {
                return Err(Error::spec(format!(
                    "{}: parameter {name:?} has invalid location {other:?}",
                    self.source
                )));
            }
        };

        let schema = param
            .get("schema")
            .map(|schema| self.parse_schema(schema))
            .transpose()?;

        // OpenAPI 3 keeps the simple type under `schema`; lift it for non-body params
        let simple = match (&schema, location) {
            (Some(_), ParameterLocation::Body) | (None, _) => param,
            (Some(_), _) => param.get("schema").unwrap_or(param),
        };

        Ok(Parameter {
            name,
            location,
            description: str_field(param, "description"),
            required: location == ParameterLocation::Path
                || param
                    .get("required")
                    .and_then(JsonValue::as_bool)
                    .unwrap_or(false),
            param_type: str_field(simple, "type"),
            format: str_field(simple, "format"),
            items: simple.get("items").map(parse_items),
            collection_format: str_field(param, "collectionFormat")
                .or_else(|| str_field(simple, "collectionFormat")),
            default: simple.get("default").cloned(),
            constraints: parse_constraints(simple),
            schema: if location == ParameterLocation::Body {
                schema
            } else {
                None
            },
        })
    }

    fn parse_response(&self, response: &JsonValue) -> Result<Response> {
        let response = self.deref(response)?;
        Ok(Response {
            description: str_field(response, "description").unwrap_or_default(),
            schema: response
                .get("schema")
                .map(|schema| self.parse_schema(schema))
                .transpose()?,
        })
    }

    /// Parse a schema without following `$ref`s
    fn parse_schema(&self, schema: &JsonValue) -> Result<Schema> {
        if let Some(reference) = schema.get("$ref").and_then(JsonValue::as_str) {
            let name = reference
                .strip_prefix("#/definitions/")
                .or_else(|| reference.strip_prefix("#/components/schemas/"))
                .ok_or_else(|| {
                    Error::spec(format!(
                        "{}: unsupported schema reference {reference}",
                        self.source
                    ))
                })?;
            return Ok(Schema {
                reference: Some(name.to_string()),
                ..Default::default()
            });
        }

        let items = match schema.get("items") {
            // Tuple-style items: only the first element shapes the array
            Some(JsonValue::Array(list)) => list
                .first()
                .map(|first| self.parse_schema(first))
                .transpose()?
                .map(Box::new),
            Some(items) => Some(Box::new(self.parse_schema(items)?)),
            None => None,
        };

        let properties = match schema.get("properties").and_then(JsonValue::as_object) {
            Some(props) => props
                .iter()
                .map(|(name, prop)| Ok((name.clone(), self.parse_schema(prop)?)))
                .collect::<Result<BTreeMap<_, _>>>()?,
            None => BTreeMap::new(),
        };

        let additional_properties = match schema.get("additionalProperties") {
            Some(JsonValue::Object(_)) => schema
                .get("additionalProperties")
                .map(|ap| self.parse_schema(ap))
                .transpose()?
                .map(Box::new),
            Some(JsonValue::Bool(true)) => Some(Box::default()),
            _ => None,
        };

        Ok(Schema {
            reference: None,
            schema_type: schema_type(schema),
            format: str_field(schema, "format"),
            title: str_field(schema, "title"),
            description: str_field(schema, "description"),
            items,
            properties,
            required: str_list(schema.get("required")).unwrap_or_default(),
            additional_properties,
            default: schema.get("default").cloned(),
            constraints: parse_constraints(schema),
        })
    }

    /// Follow a local `$ref` on parameters, responses and path items
    fn deref<'a>(&'a self, value: &'a JsonValue) -> Result<&'a JsonValue> {
        match value.get("$ref").and_then(JsonValue::as_str) {
            Some(reference) => {
                let pointer = reference.strip_prefix('#').ok_or_else(|| {
                    Error::spec(format!(
                        "{}: external references not supported: {reference}",
                        self.source
                    ))
                })?;
                self.json.pointer(pointer).ok_or_else(|| {
                    Error::spec(format!(
                        "{}: unable to resolve reference {reference}",
                        self.source
                    ))
                })
            }
            None => Ok(value),
        }
    }
}

fn parse_items(value: &JsonValue) -> Items {
    Items {
        item_type: str_field(value, "type"),
        format: str_field(value, "format"),
        items: value.get("items").map(|nested| Box::new(parse_items(nested))),
        collection_format: str_field(value, "collectionFormat"),
        default: value.get("default").cloned(),
        constraints: parse_constraints(value),
    }
}

fn parse_constraints(value: &JsonValue) -> Constraints {
    let int = |key: &str| value.get(key).and_then(count);
    let float = |key: &str| value.get(key).and_then(JsonValue::as_f64);
    let flag = |key: &str| value.get(key).and_then(JsonValue::as_bool).unwrap_or(false);

    Constraints {
        minimum: float("minimum"),
        maximum: float("maximum"),
        exclusive_minimum: flag("exclusiveMinimum"),
        exclusive_maximum: flag("exclusiveMaximum"),
        min_length: int("minLength"),
        max_length: int("maxLength"),
        pattern: str_field(value, "pattern"),
        min_items: int("minItems"),
        max_items: int("maxItems"),
        unique_items: flag("uniqueItems"),
        multiple_of: float("multipleOf"),
        enum_values: value
            .get("enum")
            .and_then(JsonValue::as_array)
            .cloned()
            .unwrap_or_default(),
    }
}

/// Counts are integers, but `10.0` is accepted as the same count as `10`
fn count(value: &JsonValue) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
            .map(|f| f as i64)
    })
}

/// `type` may be a string or, in JSON Schema style, a list; the first non-null entry wins
fn schema_type(value: &JsonValue) -> Option<String> {
    match value.get("type")? {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Array(types) => types
            .iter()
            .filter_map(JsonValue::as_str)
            .find(|t| *t != "null")
            .map(String::from),
        _ => None,
    }
}

fn parse_security(value: Option<&JsonValue>) -> Option<Vec<SecurityRequirement>> {
    let list = value?.as_array()?;
    Some(
        list.iter()
            .filter_map(JsonValue::as_object)
            .map(|requirement| {
                requirement
                    .iter()
                    .map(|(scheme, scopes)| {
                        (scheme.clone(), str_list(Some(scopes)).unwrap_or_default())
                    })
                    .collect()
            })
            .collect(),
    )
}

fn str_field(value: &JsonValue, key: &str) -> Option<String> {
    value.get(key).and_then(JsonValue::as_str).map(String::from)
}

fn str_list(value: Option<&JsonValue>) -> Option<Vec<String>> {
    value.and_then(JsonValue::as_array).map(|arr| {
        arr.iter()
            .filter_map(JsonValue::as_str)
            .map(String::from)
            .collect()
    })
}
