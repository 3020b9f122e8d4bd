//! IDL program model consumed by dsngen code generation: program
//! descriptions, their loader, and the model checks run before generation.

pub mod check;
pub mod loader;
pub mod parser;
pub mod schema_def;
pub mod types;

pub use loader::{load_programs, LoadError, LoadedPrograms};
pub use types::common::{IdlFormat, IdlType, ParseEnumError, Severity};
pub use types::config::GenConfig;
pub use types::error::{ErrorEntry, ValidationReport};
pub use types::program::{Namespace, Program, ServiceDef, StructDef};
