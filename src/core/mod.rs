//! Shared building blocks: errors, options and identifier helpers.

pub mod config;
pub mod error;
pub mod utils;

pub use config::GenOpts;
pub use error::{Error, Result};
