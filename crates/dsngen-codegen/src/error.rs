use dsngen_model::ParseEnumError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodegenError {
    #[error("unsupported idl type: '{0}' (expected thrift or proto)")]
    UnsupportedIdlType(String),

    #[error("unsupported idl format: '{0}' (expected binary or json)")]
    UnsupportedIdlFormat(String),

    #[error("programs '{first}' and '{second}' both generate {path}")]
    DuplicateOutput {
        path: String,
        first: String,
        second: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CodegenError {
    /// Whether the error comes from generation parameters rather than the model.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            CodegenError::UnsupportedIdlType(_) | CodegenError::UnsupportedIdlFormat(_)
        )
    }
}

impl From<ParseEnumError> for CodegenError {
    fn from(err: ParseEnumError) -> Self {
        match err.kind {
            "idl format" => CodegenError::UnsupportedIdlFormat(err.value),
            _ => CodegenError::UnsupportedIdlType(err.value),
        }
    }
}
