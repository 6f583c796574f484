//! Infrastructure layer - spec loading, template rendering and file output

pub mod openapi;
pub mod output;
pub mod templates;
