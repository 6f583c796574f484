//! Render-then-write boundary of the generator

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use super::{ArtifactKind, TemplateRegistry};
use crate::core::error::Result;
use crate::infrastructure::output::{OutputService, WriteOutcome};

/// Renders models through templates and writes the artifacts
pub struct Emitter {
    registry: TemplateRegistry,
    output: Arc<dyn OutputService>,
}

impl Emitter {
    pub fn new(registry: TemplateRegistry, output: Arc<dyn OutputService>) -> Self {
        Self { registry, output }
    }

    /// Render `model` with the template of `kind` into `dir/name.rs`
    ///
    /// The overwrite policy comes from `kind`.
    pub async fn emit<T: Serialize + Sync>(
        &self,
        kind: ArtifactKind,
        dir: &Path,
        name: &str,
        model: &T,
    ) -> Result<WriteOutcome> {
        let content = self.registry.render(kind, model)?;
        debug!(%kind, name, "rendered template");
        self.output
            .write(dir, &format!("{name}.rs"), &content, kind.overwrite_policy())
            .await
    }
}
