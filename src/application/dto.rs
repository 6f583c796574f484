//! Request types for the generation use cases

use serde::{Deserialize, Serialize};

/// Generate handler and parameter artifacts for operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateOperationsRequest {
    /// Operation IDs to generate; empty means every operation
    pub operation_ids: Vec<String>,
    /// Tags an operation is placed under; empty means all of its tags
    pub tags: Vec<String>,
    pub include_handler: bool,
    pub include_parameters: bool,
}

impl Default for GenerateOperationsRequest {
    fn default() -> Self {
        Self {
            operation_ids: Vec::new(),
            tags: Vec::new(),
            include_handler: true,
            include_parameters: true,
        }
    }
}

/// Generate the API builder, its configuration scaffold and the server entry point
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateSupportRequest {
    /// Application name; falls back to the spec title
    pub name: Option<String>,
    /// Model names to include; empty means every definition
    pub models: Vec<String>,
    /// Operation IDs to include; empty means every operation
    pub operation_ids: Vec<String>,
    pub include_ui: bool,
    /// Leave models out of the application model
    pub skip_models: bool,
}

/// Full server generation with per-stage switches
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateServerRequest {
    pub name: Option<String>,
    pub models: Vec<String>,
    pub operation_ids: Vec<String>,
    pub tags: Vec<String>,
    pub include_ui: bool,
    pub skip_models: bool,
    pub skip_operations: bool,
    pub skip_support: bool,
}

/// Generate the test suite for a server
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateTestsRequest {
    pub name: Option<String>,
    pub models: Vec<String>,
    pub operation_ids: Vec<String>,
    pub include_ui: bool,
    /// Also emit the compliance report collector
    pub include_tck: bool,
}

impl GenerateServerRequest {
    pub fn operations(&self) -> GenerateOperationsRequest {
        GenerateOperationsRequest {
            operation_ids: self.operation_ids.clone(),
            tags: self.tags.clone(),
            ..Default::default()
        }
    }

    pub fn support(&self) -> GenerateSupportRequest {
        GenerateSupportRequest {
            name: self.name.clone(),
            models: self.models.clone(),
            operation_ids: self.operation_ids.clone(),
            include_ui: self.include_ui,
            skip_models: self.skip_models,
        }
    }
}
