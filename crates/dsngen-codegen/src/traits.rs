use dsngen_model::IdlType;

use crate::context::EmitContext;
use crate::header::HeaderInput;

/// Wire-format backend whose generated C++ types a header wraps.
///
/// Each backend knows where its own code generator puts the native type
/// definitions for a program, and emits the include directives that make
/// those types visible to the serialization registrations that follow.
pub trait IdlBackend: Send + Sync {
    /// Which backend this is.
    fn idl_type(&self) -> IdlType;

    /// Path of the backend-generated types header for a program
    /// (e.g., `thrift/rpc_demo_types.h`).
    fn types_header(&self, program_name: &str) -> String;

    /// Emit the backend's include directives into the current group.
    fn emit_includes(&self, input: &HeaderInput<'_>, ctx: &mut EmitContext);
}
