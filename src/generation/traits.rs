//! Seams of the generation domain

use super::types::ResolvedType;
use super::validation::{ValidationBuilder, ValidationDescriptor};
use crate::infrastructure::openapi::types::Schema;

/// Produces the validation rules of a body parameter from its schema
///
/// Full model validation lives with model generation; operation building
/// only needs the descriptor this hook returns.
pub trait SchemaValidationHook: Send + Sync {
    fn validate(
        &self,
        schema: &Schema,
        resolved: &ResolvedType,
        required: bool,
    ) -> ValidationDescriptor;
}

/// Validates only the top-level constraints of a schema
#[derive(Debug, Clone, Copy, Default)]
pub struct ShallowSchemaValidation;

impl SchemaValidationHook for ShallowSchemaValidation {
    fn validate(
        &self,
        schema: &Schema,
        resolved: &ResolvedType,
        required: bool,
    ) -> ValidationDescriptor {
        ValidationBuilder::build(
            resolved,
            schema.format.as_deref(),
            &schema.constraints,
            required,
            schema.default.as_ref(),
        )
    }
}
