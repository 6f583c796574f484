//! Validation rule derivation
//!
//! Turns raw constraints into a [`ValidationDescriptor`] with normalized bounds
//! and the flags templates use to decide whether a runtime check is emitted.

use serde::Serialize;
use serde_json::Value as JsonValue;

use super::types::{ResolvedType, TypeCategory};
use crate::infrastructure::openapi::types::Constraints;

/// Normalized validation rules for one value
///
/// Absent bounds are carried as zero so generated comparisons stay well defined;
/// the `has_*` flags tell a real zero bound from an absent one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationDescriptor {
    #[serde(rename = "type")]
    pub type_name: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<JsonValue>,
    /// Only set for custom formatted types
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    pub minimum: f64,
    pub maximum: f64,
    pub exclusive_minimum: bool,
    pub exclusive_maximum: bool,
    pub multiple_of: f64,
    pub min_length: i64,
    pub max_length: i64,
    pub min_items: i64,
    pub max_items: i64,
    pub unique_items: bool,
    pub has_minimum: bool,
    pub has_maximum: bool,
    pub has_multiple_of: bool,
    pub has_min_length: bool,
    pub has_max_length: bool,
    pub has_min_items: bool,
    pub has_max_items: bool,
    #[serde(rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<JsonValue>,
    pub has_scalar_validations: bool,
    pub has_collection_validations: bool,
    pub needs_explicit_size_check: bool,
}

/// Builds validation descriptors
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationBuilder;

impl ValidationBuilder {
    /// Derive the descriptor for a value of type `resolved`
    ///
    /// The scalar flag follows a fixed precedence: `required` sets it, a
    /// default clears it again, and any format or scalar constraint sets it.
    /// A required parameter with a default therefore carries no scalar checks.
    pub fn build(
        resolved: &ResolvedType,
        format: Option<&str>,
        constraints: &Constraints,
        required: bool,
        default: Option<&JsonValue>,
    ) -> ValidationDescriptor {
        let mut has_scalar = required;

        if default.is_some() {
            has_scalar = false;
        }

        let format = match (resolved.category, format) {
            (TypeCategory::CustomFormatted, Some(f)) => {
                has_scalar = true;
                Some(f.to_string())
            }
            _ => None,
        };

        let scalar_bounds = constraints.min_length.is_some()
            || constraints.max_length.is_some()
            || constraints.minimum.is_some()
            || constraints.maximum.is_some()
            || constraints.multiple_of.is_some()
            || constraints.pattern.is_some()
            || !constraints.enum_values.is_empty();
        if scalar_bounds {
            has_scalar = true;
        }

        let needs_size = constraints.min_items.is_some() || constraints.max_items.is_some();

        ValidationDescriptor {
            type_name: resolved.name.clone(),
            required,
            default_value: default.cloned(),
            format,
            pattern: constraints.pattern.clone(),
            minimum: constraints.minimum.unwrap_or_default(),
            maximum: constraints.maximum.unwrap_or_default(),
            exclusive_minimum: constraints.exclusive_minimum,
            exclusive_maximum: constraints.exclusive_maximum,
            multiple_of: constraints.multiple_of.unwrap_or_default(),
            min_length: constraints.min_length.unwrap_or_default(),
            max_length: constraints.max_length.unwrap_or_default(),
            min_items: constraints.min_items.unwrap_or_default(),
            max_items: constraints.max_items.unwrap_or_default(),
            unique_items: constraints.unique_items,
            has_minimum: constraints.minimum.is_some(),
            has_maximum: constraints.maximum.is_some(),
            has_multiple_of: constraints.multiple_of.is_some(),
            has_min_length: constraints.min_length.is_some(),
            has_max_length: constraints.max_length.is_some(),
            has_min_items: constraints.min_items.is_some(),
            has_max_items: constraints.max_items.is_some(),
            enum_values: constraints.enum_values.clone(),
            has_scalar_validations: has_scalar,
            has_collection_validations: constraints.unique_items || needs_size,
            needs_explicit_size_check: needs_size,
        }
    }
}
