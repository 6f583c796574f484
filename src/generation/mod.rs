//! Generation domain: the code-generation model builder
//!
//! Everything here is synchronous and free of I/O. Builders take a parsed
//! [`SpecDocument`](crate::infrastructure::openapi::SpecDocument) plus the
//! lookup tables and return plain serializable descriptors for the templates.

pub mod application;
pub mod model;
pub mod operation;
pub mod parameter;
pub mod sanitizers;
pub mod serializers;
pub mod tables;
pub mod traits;
pub mod types;
pub mod validation;

pub use application::{ApplicationModel, ApplicationModelBuilder, SecuritySchemeDescriptor};
pub use model::ModelDescriptor;
pub use operation::{OperationDescriptor, OperationModelBuilder, ResponseShape, ZeroValue};
pub use parameter::{
    ParameterBuilder, ParameterDescriptor, ParameterItemChain, ParameterItemDescriptor,
};
pub use serializers::{SerializerGroup, SerializerGroupBuilder, SerializerKind, SerializerSelection};
pub use tables::{MediaTables, TypeTables};
pub use traits::{SchemaValidationHook, ShallowSchemaValidation};
pub use types::{ResolvedType, TypeCategory, TypeRef, TypeResolver};
pub use validation::{ValidationBuilder, ValidationDescriptor};
