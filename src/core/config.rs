//! Generation options shared by every use case.
//!
//! Options come from an optional TOML/YAML file and are then overridden by
//! command-line flags.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::error::{Error, Result};

/// Options controlling where and how artifacts are generated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenOpts {
    /// Path or URL of the Swagger/OpenAPI document
    pub spec: String,
    /// Root directory receiving generated artifacts
    pub target: PathBuf,
    /// Package for generated operation handlers
    pub api_package: String,
    /// Package holding generated models
    pub model_package: String,
    /// Package for server support code
    pub server_package: String,
    /// Package for generated tests
    pub test_package: String,
    /// Type name representing an authenticated caller
    pub principal: Option<String>,
    /// Directory overriding the embedded templates
    pub template_dir: Option<PathBuf>,
    /// Print the built model as JSON instead of writing artifacts
    pub dump_data: bool,
}

impl Default for GenOpts {
    fn default() -> Self {
        Self {
            spec: String::new(),
            target: PathBuf::from("."),
            api_package: "operations".to_string(),
            model_package: "models".to_string(),
            server_package: "restapi".to_string(),
            test_package: "tests".to_string(),
            principal: None,
            template_dir: None,
            dump_data: false,
        }
    }
}

impl GenOpts {
    /// Load options from a `.toml`, `.yml` or `.yaml` file
    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Ok(toml::from_str(&content)?),
            Some("yml") | Some("yaml") => Ok(serde_yaml::from_str(&content)?),
            other => Err(Error::config(format!(
                "unsupported config file extension {other:?} for {}",
                path.display()
            ))),
        }
    }

    /// Reject option sets that cannot produce a usable layout
    pub fn validate(&self) -> Result<()> {
        if self.spec.trim().is_empty() {
            return Err(Error::config("a spec path or URL is required"));
        }

        let packages = [
            ("api_package", &self.api_package),
            ("model_package", &self.model_package),
            ("server_package", &self.server_package),
            ("test_package", &self.test_package),
        ];
        for (field, value) in packages {
            if value.trim().is_empty() {
                return Err(Error::config(format!("{field} cannot be empty")));
            }
        }

        Ok(())
    }

    /// Principal name with blank values treated as unset
    pub fn principal(&self) -> Option<&str> {
        self.principal
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}
