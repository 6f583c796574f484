//! Type resolution for parameters and schemas

use serde::Serialize;

use super::tables::TypeTables;
use crate::core::utils::to_pascal_case;
use crate::infrastructure::openapi::types::{Items, Schema};

/// Broad shape of a resolved type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeCategory {
    Primitive,
    CustomFormatted,
    Array,
    Map,
    ComplexObject,
}

/// Logical type name plus its category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedType {
    pub name: String,
    pub category: TypeCategory,
    /// Element type of arrays and value type of maps
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element: Option<Box<ResolvedType>>,
    /// Set when the spec gave no usable type information
    pub untyped: bool,
}

impl ResolvedType {
    pub fn is_array(&self) -> bool {
        self.category == TypeCategory::Array
    }

    fn untyped(tables: &TypeTables) -> Self {
        Self {
            name: tables.untyped.clone(),
            category: TypeCategory::ComplexObject,
            element: None,
            untyped: true,
        }
    }
}

/// A type name that may be left open by configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum TypeRef {
    Typed(String),
    Untyped,
}

impl TypeRef {
    /// `Untyped` for missing or blank names
    pub fn from_option(name: Option<&str>) -> Self {
        match name.map(str::trim) {
            Some(n) if !n.is_empty() => TypeRef::Typed(n.to_string()),
            _ => TypeRef::Untyped,
        }
    }

    pub fn as_typed(&self) -> Option<&str> {
        match self {
            TypeRef::Typed(name) => Some(name),
            TypeRef::Untyped => None,
        }
    }
}

/// Maps type/format descriptions onto logical target types
#[derive(Debug, Clone)]
pub struct TypeResolver<'a> {
    tables: &'a TypeTables,
    models_package: String,
}

impl<'a> TypeResolver<'a> {
    pub fn new(tables: &'a TypeTables, models_package: impl Into<String>) -> Self {
        Self {
            tables,
            models_package: models_package.into(),
        }
    }

    pub fn tables(&self) -> &'a TypeTables {
        self.tables
    }

    /// Resolve the `type`/`format`/`items` triple of a non-body parameter or items node
    pub fn resolve_simple(
        &self,
        type_name: Option<&str>,
        format: Option<&str>,
        items: Option<&Items>,
    ) -> ResolvedType {
        if type_name == Some("array") || items.is_some() {
            let element = match items {
                Some(items) => self.resolve_simple(
                    items.item_type.as_deref(),
                    items.format.as_deref(),
                    items.items.as_deref(),
                ),
                None => ResolvedType::untyped(self.tables),
            };
            return self.array_of(element);
        }

        match type_name {
            Some("file") => ResolvedType {
                name: self.tables.file.clone(),
                category: TypeCategory::ComplexObject,
                element: None,
                untyped: false,
            },
            Some(t) => self.scalar(t, format),
            None => ResolvedType::untyped(self.tables),
        }
    }

    /// Resolve a schema node; named references resolve to the model type and are not followed
    pub fn resolve_schema(&self, schema: &Schema) -> ResolvedType {
        if let Some(reference) = &schema.reference {
            return ResolvedType {
                name: format!("{}::{}", self.models_package, to_pascal_case(reference)),
                category: TypeCategory::ComplexObject,
                element: None,
                untyped: false,
            };
        }

        if schema.schema_type.as_deref() == Some("array") || schema.items.is_some() {
            let element = match &schema.items {
                Some(items) => self.resolve_schema(items),
                None => ResolvedType::untyped(self.tables),
            };
            return self.array_of(element);
        }

        if let Some(values) = &schema.additional_properties {
            let value = if is_empty_schema(values) {
                ResolvedType::untyped(self.tables)
            } else {
                self.resolve_schema(values)
            };
            let name = format!("{}<String, {}>", self.tables.map_prefix, value.name);
            return ResolvedType {
                category: self.category_of(&name),
                name,
                element: Some(Box::new(value)),
                untyped: false,
            };
        }

        match schema.schema_type.as_deref() {
            Some("object") | None => ResolvedType::untyped(self.tables),
            Some(t) => self.scalar(t, schema.format.as_deref()),
        }
    }

    fn scalar(&self, type_name: &str, format: Option<&str>) -> ResolvedType {
        let name = match (type_name, format.and_then(|f| self.tables.formatter(f))) {
            ("string", Some(formatted)) => formatted.to_string(),
            _ => match self.tables.primitive(type_name, format) {
                Some(primitive) => primitive.to_string(),
                None => return ResolvedType::untyped(self.tables),
            },
        };
        ResolvedType {
            category: self.category_of(&name),
            name,
            element: None,
            untyped: false,
        }
    }

    fn array_of(&self, element: ResolvedType) -> ResolvedType {
        ResolvedType {
            name: format!("Vec<{}>", element.name),
            category: TypeCategory::Array,
            element: Some(Box::new(element)),
            untyped: false,
        }
    }

    /// Category of a non-array logical name
    pub fn category_of(&self, logical: &str) -> TypeCategory {
        if self.tables.is_primitive(logical) {
            TypeCategory::Primitive
        } else if self.tables.is_formatted(logical) {
            TypeCategory::CustomFormatted
        } else if self.tables.is_map(logical) {
            TypeCategory::Map
        } else {
            TypeCategory::ComplexObject
        }
    }
}

fn is_empty_schema(schema: &Schema) -> bool {
    schema == &Schema::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver(tables: &TypeTables) -> TypeResolver<'_> {
        TypeResolver::new(tables, "models")
    }

    #[test]
    fn test_primitives_and_formats() {
        let tables = TypeTables::default();
        let r = resolver(&tables);

        let int = r.resolve_simple(Some("integer"), Some("int32"), None);
        assert_eq!(int.name, "i32");
        assert_eq!(int.category, TypeCategory::Primitive);

        let date = r.resolve_simple(Some("string"), Some("date-time"), None);
        assert_eq!(date.name, "DateTime");
        assert_eq!(date.category, TypeCategory::CustomFormatted);

        // unknown string formats stay plain strings
        let s = r.resolve_simple(Some("string"), Some("color"), None);
        assert_eq!(s.name, "String");
        assert_eq!(s.category, TypeCategory::Primitive);
    }

    #[test]
    fn test_array_without_items_is_untyped() {
        let tables = TypeTables::default();
        let arr = resolver(&tables).resolve_simple(Some("array"), None, None);
        assert_eq!(arr.category, TypeCategory::Array);
        assert_eq!(arr.name, "Vec<serde_json::Value>");
        assert!(arr.element.as_ref().unwrap().untyped);
    }

    #[test]
    fn test_nested_arrays() {
        let tables = TypeTables::default();
        let items = Items {
            item_type: Some("array".into()),
            items: Some(Box::new(Items {
                item_type: Some("boolean".into()),
                ..Default::default()
            })),
            ..Default::default()
        };
        let arr = resolver(&tables).resolve_simple(Some("array"), None, Some(&items));
        assert_eq!(arr.name, "Vec<Vec<bool>>");
    }

    #[test]
    fn test_schema_refs_maps_and_objects() {
        let tables = TypeTables::default();
        let r = resolver(&tables);

        let pet = Schema {
            reference: Some("pet".into()),
            ..Default::default()
        };
        let resolved = r.resolve_schema(&pet);
        assert_eq!(resolved.name, "models::Pet");
        assert_eq!(resolved.category, TypeCategory::ComplexObject);

        let counts = Schema {
            schema_type: Some("object".into()),
            additional_properties: Some(Box::new(Schema {
                schema_type: Some("integer".into()),
                format: Some("int32".into()),
                ..Default::default()
            })),
            ..Default::default()
        };
        let resolved = r.resolve_schema(&counts);
        assert_eq!(resolved.name, "HashMap<String, i32>");
        assert_eq!(resolved.category, TypeCategory::Map);

        let inline = Schema {
            schema_type: Some("object".into()),
            ..Default::default()
        };
        assert!(r.resolve_schema(&inline).untyped);
    }

    #[test]
    fn test_type_ref() {
        assert_eq!(TypeRef::from_option(None), TypeRef::Untyped);
        assert_eq!(TypeRef::from_option(Some(" ")), TypeRef::Untyped);
        assert_eq!(
            TypeRef::from_option(Some("models::User")).as_typed(),
            Some("models::User")
        );

        let json = serde_json::to_value(TypeRef::Typed("User".into())).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "typed", "name": "User"}));
        let json = serde_json::to_value(TypeRef::Untyped).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "untyped"}));
    }
}
