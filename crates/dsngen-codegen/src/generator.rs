use std::collections::BTreeMap;
use std::path::Path;

use dsngen_model::{IdlFormat, IdlType, Program};
use tracing::{debug, info};

use crate::error::CodegenError;
use crate::header::{GenerationParams, HeaderEmitter};

/// Suffix of the generated serialization header.
pub const TYPES_HEADER_SUFFIX: &str = ".types.h";

/// Name of the types header generated for a file prefix.
pub fn types_header_file_name(file_prefix: &str) -> String {
    format!("{}{}", file_prefix, TYPES_HEADER_SUFFIX)
}

/// A collection of generated files, keyed by relative path.
#[derive(Debug, Clone, Default)]
pub struct GeneratedFiles {
    /// Files keyed by relative path (sorted for deterministic output)
    files: BTreeMap<String, String>,
    /// Program that produced each file
    sources: BTreeMap<String, String>,
}

impl GeneratedFiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file; a path already claimed by another program is an error.
    pub fn add_file(
        &mut self,
        path: impl Into<String>,
        program: &str,
        content: impl Into<String>,
    ) -> Result<(), CodegenError> {
        let path = path.into();
        if let Some(first) = self.sources.get(&path) {
            return Err(CodegenError::DuplicateOutput {
                path,
                first: first.clone(),
                second: program.to_string(),
            });
        }
        self.sources.insert(path.clone(), program.to_string());
        self.files.insert(path, content.into());
        Ok(())
    }

    /// Get all generated files.
    pub fn files(&self) -> &BTreeMap<String, String> {
        &self.files
    }

    /// Number of generated files.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Write all generated files to the given output directory.
    pub fn write_to_disk(&self, output_dir: &Path) -> Result<(), std::io::Error> {
        for (rel_path, content) in &self.files {
            let full_path = output_dir.join(rel_path);
            if let Some(parent) = full_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&full_path, content)?;
            debug!(path = %full_path.display(), bytes = content.len(), "wrote file");
        }
        Ok(())
    }
}

/// Generates types headers for one or more programs with fixed backend
/// settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeGenerator {
    idl_type: IdlType,
    idl_format: IdlFormat,
}

impl CodeGenerator {
    pub fn new(idl_type: IdlType, idl_format: IdlFormat) -> Self {
        Self {
            idl_type,
            idl_format,
        }
    }

    /// Create a generator from textual backend settings.
    pub fn from_names(idl_type: &str, idl_format: &str) -> Result<Self, CodegenError> {
        Ok(Self::new(idl_type.parse()?, idl_format.parse()?))
    }

    pub fn idl_type(&self) -> IdlType {
        self.idl_type
    }

    pub fn idl_format(&self) -> IdlFormat {
        self.idl_format
    }

    /// Parameters used for `program`; the prefix defaults to the program name.
    pub fn params_for(&self, program: &Program, file_prefix: Option<&str>) -> GenerationParams {
        let prefix = file_prefix.unwrap_or(&program.name);
        GenerationParams::new(prefix, self.idl_type, self.idl_format)
    }

    /// Generate the types header for a single program.
    pub fn generate(
        &self,
        program: &Program,
        file_prefix: Option<&str>,
    ) -> Result<GeneratedFiles, CodegenError> {
        let mut output = GeneratedFiles::new();
        self.generate_into(program, file_prefix, &mut output)?;
        Ok(output)
    }

    /// Generate one types header per program. Programs are independent;
    /// two programs resolving to the same output path is an error.
    pub fn generate_all<'a, I>(&self, programs: I) -> Result<GeneratedFiles, CodegenError>
    where
        I: IntoIterator<Item = &'a Program>,
    {
        let mut output = GeneratedFiles::new();
        for program in programs {
            self.generate_into(program, None, &mut output)?;
        }
        info!(
            files = output.file_count(),
            idl_type = %self.idl_type,
            "generated types headers"
        );
        Ok(output)
    }

    fn generate_into(
        &self,
        program: &Program,
        file_prefix: Option<&str>,
        output: &mut GeneratedFiles,
    ) -> Result<(), CodegenError> {
        let params = self.params_for(program, file_prefix);
        let path = types_header_file_name(&params.file_prefix);
        let content = HeaderEmitter::new(params).emit_program(program);
        output.add_file(path, &program.name, content)
    }
}
