use dsngen_model::IdlType;

use crate::context::EmitContext;
use crate::header::HeaderInput;
use crate::traits::IdlBackend;

/// Protocol Buffers: protoc emits a single `<program>.pb.h`; services
/// need no extra include.
pub struct ProtobufBackend;

impl IdlBackend for ProtobufBackend {
    fn idl_type(&self) -> IdlType {
        IdlType::Protobuf
    }

    fn types_header(&self, program_name: &str) -> String {
        format!("{}.pb.h", program_name)
    }

    fn emit_includes(&self, input: &HeaderInput<'_>, ctx: &mut EmitContext) {
        ctx.include_local(&self.types_header(input.program_name));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_include_regardless_of_services() {
        let input = HeaderInput {
            program_name: "rpc_demo",
            namespace_begin: String::new(),
            namespace_end: String::new(),
            structs: vec!["Echo"],
            services: vec!["EchoService", "OtherService"],
        };
        let mut ctx = EmitContext::new(4);
        ProtobufBackend.emit_includes(&input, &mut ctx);
        assert_eq!(ctx.finish(), "# include \"rpc_demo.pb.h\"\n");
    }
}
