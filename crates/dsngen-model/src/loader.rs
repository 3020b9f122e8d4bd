use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::parser;
use crate::types::config::{GenConfig, CONFIG_FILE_NAME};
use crate::types::error::{ErrorEntry, ValidationReport, E_PARSE_ERROR};
use crate::types::program::Program;

/// Program files found under one input path, plus the generation defaults
/// that apply to them
#[derive(Debug, Clone)]
pub struct LoadedPrograms {
    /// Directory the relative file paths are anchored at
    pub root: PathBuf,
    /// Generation defaults (dsngen.config.json, or built-in defaults)
    pub config: GenConfig,
    /// Whether `config` came from a file
    pub config_found: bool,
    /// Parsed programs with their relative file paths, sorted by path
    pub programs: Vec<(String, Program)>,
}

/// Load one program file, or every program file below a directory.
/// Parse failures are accumulated in the report instead of aborting.
#[allow(clippy::result_large_err)]
pub fn load_programs(input: &Path) -> Result<(LoadedPrograms, ValidationReport), LoadError> {
    if !input.exists() {
        return Err(LoadError::NotFound(input.to_string_lossy().into_owned()));
    }

    let (root, candidates) = if input.is_file() {
        let root = input
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        (root, vec![input.to_path_buf()])
    } else {
        let files = WalkDir::new(input)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| parser::detect_program_format(e.path()).is_some())
            .map(|e| e.into_path())
            .collect();
        (input.to_path_buf(), files)
    };

    if candidates.is_empty() {
        return Err(LoadError::NoProgramFiles(input.to_string_lossy().into_owned()));
    }

    let (config, config_found) = load_config(&root)?;

    let mut report = ValidationReport::success();
    let mut programs = Vec::new();

    for path in candidates {
        let rel_path = path
            .strip_prefix(&root)
            .unwrap_or(&path)
            .to_string_lossy()
            .into_owned();

        let Some(format) = parser::detect_program_format(&path) else {
            warn!(file = %rel_path, "not a program description, skipping");
            report.push(
                ErrorEntry::error(
                    E_PARSE_ERROR,
                    "Unrecognized program file name",
                    &rel_path,
                    "$",
                )
                .with_suggestion("Name program files *.program.json or *.program.yaml"),
            );
            continue;
        };

        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) => {
                report.push(ErrorEntry::error(
                    E_PARSE_ERROR,
                    format!("Failed to read file: {e}"),
                    &rel_path,
                    "$",
                ));
                continue;
            }
        };

        match parser::parse_program(&content, &rel_path, format) {
            Ok(program) => {
                debug!(
                    file = %rel_path,
                    program = %program.name,
                    structs = program.structs.len(),
                    services = program.services.len(),
                    "loaded program"
                );
                programs.push((rel_path, program));
            }
            Err(entry) => report.push(entry),
        }
    }

    let loaded = LoadedPrograms {
        root,
        config,
        config_found,
        programs,
    };

    Ok((loaded, report))
}

/// Read dsngen.config.json from `dir` if present.
#[allow(clippy::result_large_err)]
pub fn load_config(dir: &Path) -> Result<(GenConfig, bool), LoadError> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if !config_path.is_file() {
        return Ok((GenConfig::default(), false));
    }

    let content = std::fs::read_to_string(&config_path)
        .map_err(|e| LoadError::IoError(config_path.to_string_lossy().into_owned(), e))?;

    let config =
        parser::parse_config(&content, CONFIG_FILE_NAME).map_err(LoadError::ConfigParseError)?;

    Ok((config, true))
}

/// Errors that prevent loading entirely
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Path not found: {0}")]
    NotFound(String),

    #[error("No *.program.json or *.program.yaml files under {0}")]
    NoProgramFiles(String),

    #[error("Failed to parse dsngen.config.json: {}", .0.message)]
    ConfigParseError(ErrorEntry),

    #[error("I/O error reading {0}: {1}")]
    IoError(String, std::io::Error),
}
