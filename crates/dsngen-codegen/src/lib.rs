pub mod context;
pub mod error;
pub mod generator;
pub mod header;
pub mod traits;

// Backend include providers
pub mod backends;

// Re-exports
pub use context::EmitContext;
pub use error::CodegenError;
pub use generator::{CodeGenerator, GeneratedFiles};
pub use header::{emit_types_header, GenerationParams, HeaderEmitter, HeaderInput};
pub use traits::IdlBackend;
