use dsngen_model::IdlType;

use crate::context::EmitContext;
use crate::header::HeaderInput;
use crate::traits::IdlBackend;

/// Sub-directory the thrift compiler output is placed in.
const THRIFT_DIR: &str = "thrift";

/// Apache Thrift: one `<program>_types.h` plus one header per service.
pub struct ThriftBackend;

impl IdlBackend for ThriftBackend {
    fn idl_type(&self) -> IdlType {
        IdlType::Thrift
    }

    fn types_header(&self, program_name: &str) -> String {
        format!("{}/{}_types.h", THRIFT_DIR, program_name)
    }

    fn emit_includes(&self, input: &HeaderInput<'_>, ctx: &mut EmitContext) {
        ctx.include_local(&self.types_header(input.program_name));
        for service in &input.services {
            ctx.include_local(&format!("{}/{}.h", THRIFT_DIR, service));
        }
    }
}
