//! apigen builds code-generation models from Swagger 2.0 documents and renders
//! them into server, wiring and test sources through tera templates.
//!
//! The [`generation`] layer is a pure, deterministic transform from a parsed
//! [`SpecDocument`](infrastructure::openapi::SpecDocument) to serializable
//! descriptors. [`infrastructure`] loads specs, renders templates and writes
//! files, and [`application`] ties both together into the generation use cases.
#![deny(unsafe_code)]

pub mod application;
pub mod core;
pub mod generation;
pub mod infrastructure;

pub use crate::core::{Error, GenOpts, Result};
