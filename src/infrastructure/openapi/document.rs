//! Parsed spec document and the queries the model builder runs against it

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value as JsonValue;

use super::types::{ApiInfo, Operation, Schema, SecurityRequirement, SecurityScheme};

/// A loaded Swagger 2.0 document
#[derive(Debug, Clone)]
pub struct SpecDocument {
    /// Where the document was loaded from, used in error messages
    pub source: String,
    pub version: String,
    pub info: ApiInfo,
    pub base_path: Option<String>,
    pub consumes: Vec<String>,
    pub produces: Vec<String>,
    pub security: Vec<SecurityRequirement>,
    pub definitions: BTreeMap<String, Schema>,
    pub security_definitions: BTreeMap<String, SecurityScheme>,
    pub operations: BTreeMap<String, Operation>,
    pub raw: JsonValue,
}

impl SpecDocument {
    /// Operation IDs in deterministic (sorted) order
    pub fn operation_ids(&self) -> Vec<String> {
        self.operations.keys().cloned().collect()
    }

    pub fn operation_by_name(&self, id: &str) -> Option<&Operation> {
        self.operations.get(id)
    }

    /// Operation-level requirements win over the global list, even when empty
    pub fn security_requirements_for(&self, operation: &Operation) -> Vec<SecurityRequirement> {
        match &operation.security {
            Some(requirements) => requirements.clone(),
            None => self.security.clone(),
        }
    }

    pub fn definitions(&self) -> &BTreeMap<String, Schema> {
        &self.definitions
    }

    /// Media types consumed anywhere in the spec, in first-seen order
    pub fn required_consumes(&self) -> Vec<String> {
        self.collect_media(&self.consumes, |op| op.consumes.as_deref())
    }

    /// Media types produced anywhere in the spec, in first-seen order
    pub fn required_produces(&self) -> Vec<String> {
        self.collect_media(&self.produces, |op| op.produces.as_deref())
    }

    /// Security scheme names referenced by any operation, sorted
    pub fn required_schemes(&self) -> Vec<String> {
        let mut schemes = BTreeSet::new();
        for operation in self.operations.values() {
            for requirement in self.security_requirements_for(operation) {
                schemes.extend(requirement.into_keys());
            }
        }
        schemes.into_iter().collect()
    }

    /// The document as loaded
    pub fn raw(&self) -> &JsonValue {
        &self.raw
    }

    pub fn title(&self) -> Option<&str> {
        self.info.title.as_deref().filter(|t| !t.trim().is_empty())
    }

    fn collect_media<'a, F>(&'a self, global: &'a [String], per_operation: F) -> Vec<String>
    where
        F: Fn(&'a Operation) -> Option<&'a [String]>,
    {
        let mut seen: Vec<String> = Vec::new();
        let mut push_all = |media: &[String]| {
            for m in media {
                if !seen.contains(m) {
                    seen.push(m.clone());
                }
            }
        };

        push_all(global);
        for operation in self.operations.values() {
            if let Some(media) = per_operation(operation) {
                push_all(media);
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use crate::infrastructure::openapi::SwaggerParser;
    use serde_json::json;

    fn document() -> super::SpecDocument {
        SwaggerParser::new(
            json!({
                "swagger": "2.0",
                "info": {"title": "  ", "version": "1"},
                "produces": ["application/json"],
                "security": [{"basic": []}],
                "paths": {
                    "/a": {
                        "get": {
                            "operationId": "b",
                            "produces": ["text/csv", "application/json"],
                            "responses": {}
                        },
                        "put": {
                            "operationId": "a",
                            "produces": ["application/xml"],
                            "security": [],
                            "responses": {}
                        }
                    },
                    "/c": {
                        "get": {
                            "operationId": "c",
                            "security": [{"key": []}, {"basic": []}],
                            "responses": {}
                        }
                    }
                }
            }),
            "doc.json",
        )
        .parse()
        .unwrap()
    }

    #[test]
    fn test_operation_ids_are_sorted() {
        assert_eq!(document().operation_ids(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_security_override() {
        let doc = document();
        let a = doc.operation_by_name("a").unwrap();
        assert!(doc.security_requirements_for(a).is_empty());
        let b = doc.operation_by_name("b").unwrap();
        assert_eq!(doc.security_requirements_for(b).len(), 1);
        assert_eq!(doc.required_schemes(), vec!["basic", "key"]);
    }

    #[test]
    fn test_required_produces_first_seen_order() {
        assert_eq!(
            document().required_produces(),
            vec!["application/json", "application/xml", "text/csv"]
        );
        assert!(document().required_consumes().is_empty());
    }

    #[test]
    fn test_blank_title_is_absent() {
        assert_eq!(document().title(), None);
    }
}
