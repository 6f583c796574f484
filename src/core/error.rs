//! Error handling for the apigen code generation library.
//!
//! This module defines the main error type `Error` used throughout the library,
//! along with a convenient `Result` type alias. It uses `thiserror` for easy
//! error handling and implements conversions from common error types.
//!
//! # Examples
//!
//! ```
//! use apigen::core::error::{Error, Result};
//!
//! fn might_fail() -> Result<()> {
//!     // Operations that might fail...
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Result type for apigen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for apigen operations
#[derive(Debug, Error)]
pub enum Error {
    /// A caller-selected operation or model is missing from the spec
    #[error("{kind} {name:?} not found in {spec}")]
    NotFound {
        kind: &'static str,
        name: String,
        spec: String,
    },

    /// The spec asks for something the generator cannot express
    #[error("Unsupported shape: {0}")]
    UnsupportedShape(String),

    /// Malformed or unresolvable spec document
    #[error("Spec error: {0}")]
    Spec(String),

    /// Template error
    #[error("Template error: {0}")]
    Template(String),

    /// Template engine error
    #[error("Template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// HTTP error while fetching a remote spec
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new not-found error for an operation ID
    pub fn operation_not_found<S: Into<String>, P: Into<String>>(name: S, spec: P) -> Self {
        Self::NotFound {
            kind: "operation",
            name: name.into(),
            spec: spec.into(),
        }
    }

    /// Create a new unsupported shape error
    pub fn unsupported<S: Into<String>>(msg: S) -> Self {
        Self::UnsupportedShape(msg.into())
    }

    /// Create a new spec error
    pub fn spec<S: Into<String>>(msg: S) -> Self {
        Self::Spec(msg.into())
    }

    /// Create a new template error
    pub fn template<S: Into<String>>(msg: S) -> Self {
        Self::Template(msg.into())
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Whether this error belongs to a single emitted artifact rather than the whole run
    pub fn is_artifact_local(&self) -> bool {
        matches!(self, Self::Template(_) | Self::Tera(_) | Self::Io(_))
    }
}
