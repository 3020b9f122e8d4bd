use std::path::Path;

use crate::types::config::{GenConfig, CONFIG_FILE_NAME};
use crate::types::error::{ErrorEntry, E_PARSE_ERROR};
use crate::types::program::Program;

/// Serialization format of a program description file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramFormat {
    Json,
    Yaml,
}

/// Parse a program description in the given format
#[allow(clippy::result_large_err)]
pub fn parse_program(
    content: &str,
    file_path: &str,
    format: ProgramFormat,
) -> Result<Program, ErrorEntry> {
    match format {
        ProgramFormat::Json => {
            serde_json::from_str(content).map_err(|e| json_error_to_entry(e, file_path))
        }
        ProgramFormat::Yaml => {
            serde_yaml::from_str(content).map_err(|e| yaml_error_to_entry(e, file_path))
        }
    }
}

/// Parse a dsngen.config.json file
#[allow(clippy::result_large_err)]
pub fn parse_config(content: &str, file_path: &str) -> Result<GenConfig, ErrorEntry> {
    serde_json::from_str(content).map_err(|e| json_error_to_entry(e, file_path))
}

/// Detect program file format from file name
pub fn detect_program_format(file_path: &Path) -> Option<ProgramFormat> {
    let name = file_path.file_name()?.to_str()?;
    if name == CONFIG_FILE_NAME {
        None
    } else if name.ends_with(".program.json") {
        Some(ProgramFormat::Json)
    } else if name.ends_with(".program.yaml") || name.ends_with(".program.yml") {
        Some(ProgramFormat::Yaml)
    } else {
        None
    }
}

fn json_error_to_entry(err: serde_json::Error, file_path: &str) -> ErrorEntry {
    let path = format!("$.line:{}:col:{}", err.line(), err.column());

    ErrorEntry::error(
        E_PARSE_ERROR,
        format!("JSON parse error: {err}"),
        file_path,
        &path,
    )
    .with_suggestion("Check JSON syntax and field types")
}

fn yaml_error_to_entry(err: serde_yaml::Error, file_path: &str) -> ErrorEntry {
    let path = match err.location() {
        Some(loc) => format!("$.line:{}:col:{}", loc.line(), loc.column()),
        None => "$".to_string(),
    };

    ErrorEntry::error(
        E_PARSE_ERROR,
        format!("YAML parse error: {err}"),
        file_path,
        &path,
    )
    .with_suggestion("Check YAML indentation and field types")
}
