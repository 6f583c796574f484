//! Templates and the emitter that renders them to disk

pub mod emitter;
pub mod kind;
pub mod registry;

pub use emitter::Emitter;
pub use kind::ArtifactKind;
pub use registry::TemplateRegistry;
