use std::fmt;

use dsngen_model::{IdlFormat, IdlType, Program};
use tracing::debug;

use crate::backends;
use crate::context::EmitContext;
use crate::error::CodegenError;
use crate::traits::IdlBackend;

/// Framework header that declares the service API.
pub const SERVICE_API_INCLUDE: &str = "dsn/service_api_cpp.h";
/// Framework header that declares `GENERATED_TYPE_SERIALIZATION`.
pub const SERIALIZATION_INCLUDE: &str = "dsn/cpp/serialization.h";
/// Registration macro emitted once per struct.
pub const REGISTRATION_MACRO: &str = "GENERATED_TYPE_SERIALIZATION";
/// Spaces per level inside a namespace block.
const INDENT_WIDTH: usize = 4;

/// The parts of a program the header emitter reads, and nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInput<'a> {
    pub program_name: &'a str,
    /// Pre-formatted namespace opening, empty for the global namespace
    pub namespace_begin: String,
    /// Pre-formatted namespace closing, empty for the global namespace
    pub namespace_end: String,
    /// Struct names in declaration order
    pub structs: Vec<&'a str>,
    /// Service names in declaration order
    pub services: Vec<&'a str>,
}

impl<'a> From<&'a Program> for HeaderInput<'a> {
    fn from(program: &'a Program) -> Self {
        Self {
            program_name: &program.name,
            namespace_begin: program.namespace_begin(),
            namespace_end: program.namespace_end(),
            structs: program.structs.iter().map(|s| s.name.as_str()).collect(),
            services: program.services.iter().map(|s| s.name.as_str()).collect(),
        }
    }
}

/// Generation parameters for one header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationParams {
    /// Output file prefix; only used to name the generated file
    pub file_prefix: String,
    pub idl_type: IdlType,
    pub idl_format: IdlFormat,
}

impl GenerationParams {
    pub fn new(file_prefix: impl Into<String>, idl_type: IdlType, idl_format: IdlFormat) -> Self {
        Self {
            file_prefix: file_prefix.into(),
            idl_type,
            idl_format,
        }
    }

    /// Build parameters from their textual forms, failing on an unknown
    /// backend or format before anything is emitted.
    pub fn parse(
        file_prefix: impl Into<String>,
        idl_type: &str,
        idl_format: &str,
    ) -> Result<Self, CodegenError> {
        Ok(Self::new(file_prefix, idl_type.parse()?, idl_format.parse()?))
    }
}

/// Emits the C++ header that registers a program's generated types with
/// the serialization framework.
pub struct HeaderEmitter {
    params: GenerationParams,
    backend: Box<dyn IdlBackend>,
}

impl fmt::Debug for HeaderEmitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeaderEmitter")
            .field("params", &self.params)
            .field("backend", &self.backend.idl_type())
            .finish()
    }
}

impl HeaderEmitter {
    pub fn new(params: GenerationParams) -> Self {
        let backend = backends::create_backend(params.idl_type);
        Self { params, backend }
    }

    pub fn params(&self) -> &GenerationParams {
        &self.params
    }

    pub fn backend(&self) -> &dyn IdlBackend {
        self.backend.as_ref()
    }

    /// Produce the header text. Pure: same input, same bytes.
    pub fn emit(&self, input: &HeaderInput<'_>) -> String {
        let mut ctx = EmitContext::new(INDENT_WIDTH);

        ctx.line("# pragma once");
        ctx.include_system(SERVICE_API_INCLUDE);
        ctx.include_system(SERIALIZATION_INCLUDE);

        ctx.begin_group();
        self.backend.emit_includes(input, &mut ctx);

        ctx.begin_group();
        let scoped = !input.namespace_begin.is_empty();
        if scoped {
            ctx.line(&input.namespace_begin);
            ctx.push_indent();
        }
        for name in &input.structs {
            ctx.line(format!("{}({})", REGISTRATION_MACRO, name));
        }
        if scoped {
            ctx.pop_indent();
            ctx.line(&input.namespace_end);
        }

        debug!(
            program = input.program_name,
            idl_type = %self.params.idl_type,
            idl_format = %self.params.idl_format,
            structs = input.structs.len(),
            services = input.services.len(),
            lines = ctx.line_count(),
            "emitted types header"
        );

        ctx.finish()
    }

    /// Convenience for emitting straight from a program.
    pub fn emit_program(&self, program: &Program) -> String {
        self.emit(&HeaderInput::from(program))
    }
}

/// Emit a types header from textual parameters.
///
/// Fails with a configuration error, and produces nothing, when `idl_type`
/// or `idl_format` is not recognized.
pub fn emit_types_header(
    program: &Program,
    file_prefix: &str,
    idl_type: &str,
    idl_format: &str,
) -> Result<String, CodegenError> {
    let params = GenerationParams::parse(file_prefix, idl_type, idl_format)?;
    Ok(HeaderEmitter::new(params).emit_program(program))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn emitter(idl_type: IdlType) -> HeaderEmitter {
        HeaderEmitter::new(GenerationParams::new("rpc_demo", idl_type, IdlFormat::Binary))
    }

    fn demo_program() -> Program {
        Program::new("rpc_demo", "dsn::demo")
            .with_struct("Echo")
            .with_service("EchoService")
    }

    #[test]
    fn test_thrift_header() {
        let out = emitter(IdlType::Thrift).emit_program(&demo_program());
        assert_eq!(
            out,
            "# pragma once\n\
             # include <dsn/service_api_cpp.h>\n\
             # include <dsn/cpp/serialization.h>\n\
             \n\
             # include \"thrift/rpc_demo_types.h\"\n\
             # include \"thrift/EchoService.h\"\n\
             \n\
             namespace dsn { namespace demo {\n    \
             GENERATED_TYPE_SERIALIZATION(Echo)\n\
             } }\n"
        );
    }

    #[test]
    fn test_protobuf_header() {
        let out = emitter(IdlType::Protobuf).emit_program(&demo_program());
        assert_eq!(
            out,
            "# pragma once\n\
             # include <dsn/service_api_cpp.h>\n\
             # include <dsn/cpp/serialization.h>\n\
             \n\
             # include \"rpc_demo.pb.h\"\n\
             \n\
             namespace dsn { namespace demo {\n    \
             GENERATED_TYPE_SERIALIZATION(Echo)\n\
             } }\n"
        );
    }

    #[test]
    fn test_global_namespace_is_not_indented() {
        let program = Program::new("flat", "").with_struct("A").with_struct("B");
        let out = emitter(IdlType::Protobuf).emit_program(&program);
        assert!(out.ends_with(
            "# include \"flat.pb.h\"\n\
             \n\
             GENERATED_TYPE_SERIALIZATION(A)\n\
             GENERATED_TYPE_SERIALIZATION(B)\n"
        ));
    }

    #[test]
    fn test_empty_program_still_valid() {
        let program = Program::new("empty", "dsn");
        let out = emitter(IdlType::Thrift).emit_program(&program);
        assert!(!out.contains(REGISTRATION_MACRO));
        assert_eq!(out.matches("thrift/").count(), 1);
        assert!(out.ends_with("namespace dsn {\n}\n"));
    }

    #[test]
    fn test_params_parse_rejects_unknown_backend() {
        let err = GenerationParams::parse("p", "avro", "binary").unwrap_err();
        assert!(err.is_configuration());
        assert!(matches!(err, CodegenError::UnsupportedIdlType(ref v) if v == "avro"));
    }

    #[test]
    fn test_params_parse_rejects_unknown_format() {
        let err = GenerationParams::parse("p", "thrift", "xml").unwrap_err();
        assert!(matches!(err, CodegenError::UnsupportedIdlFormat(ref v) if v == "xml"));
    }

    #[test]
    fn test_emit_types_header_fails_without_output() {
        let result = emit_types_header(&demo_program(), "rpc_demo", "corba", "binary");
        assert!(result.is_err());
    }

    #[test]
    fn test_format_does_not_change_types_header() {
        let program = demo_program();
        let binary = emit_types_header(&program, "rpc_demo", "thrift", "binary").unwrap();
        let json = emit_types_header(&program, "rpc_demo", "thrift", "json").unwrap();
        assert_eq!(binary, json);
    }

    #[test]
    fn test_header_input_from_program_preserves_order() {
        let program = Program::new("p", "a.b")
            .with_struct("Z")
            .with_struct("A")
            .with_service("S2")
            .with_service("S1");
        let input = HeaderInput::from(&program);
        assert_eq!(input.structs, vec!["Z", "A"]);
        assert_eq!(input.services, vec!["S2", "S1"]);
        assert_eq!(input.namespace_begin, "namespace a { namespace b {");
        assert_eq!(input.namespace_end, "} }");
    }
}
