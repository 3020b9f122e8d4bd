use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::common::{IdlFormat, IdlType};

/// File name looked up next to the program files.
pub const CONFIG_FILE_NAME: &str = "dsngen.config.json";

/// Optional generation defaults (dsngen.config.json)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenConfig {
    /// Backend whose generated types are wrapped
    #[serde(default = "default_idl_type")]
    pub idl_type: IdlType,

    /// Wire encoding of the backend
    #[serde(default)]
    pub idl_format: IdlFormat,

    /// Output directory, relative to the config file
    #[serde(default = "default_out_dir")]
    pub out_dir: String,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            idl_type: default_idl_type(),
            idl_format: IdlFormat::default(),
            out_dir: default_out_dir(),
        }
    }
}

fn default_idl_type() -> IdlType {
    IdlType::Thrift
}

fn default_out_dir() -> String {
    "./generated".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config: GenConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, GenConfig::default());
        assert_eq!(config.idl_type, IdlType::Thrift);
        assert_eq!(config.idl_format, IdlFormat::Binary);
        assert_eq!(config.out_dir, "./generated");
    }

    #[test]
    fn test_config_camel_case_fields() {
        let config: GenConfig = serde_json::from_str(
            r#"{ "idlType": "proto", "idlFormat": "json", "outDir": "out" }"#,
        )
        .unwrap();
        assert_eq!(config.idl_type, IdlType::Protobuf);
        assert_eq!(config.idl_format, IdlFormat::Json);
        assert_eq!(config.out_dir, "out");
    }

    #[test]
    fn test_config_accepts_mixed_case_names() {
        let config: GenConfig =
            serde_json::from_str(r#"{ "idlType": "Thrift", "idlFormat": "JSON" }"#).unwrap();
        assert_eq!(config.idl_type, IdlType::Thrift);
        assert_eq!(config.idl_format, IdlFormat::Json);

        let config: GenConfig = serde_json::from_str(r#"{ "idlType": "Protobuf" }"#).unwrap();
        assert_eq!(config.idl_type, IdlType::Protobuf);
    }

    #[test]
    fn test_config_rejects_unknown_backend() {
        let result: Result<GenConfig, _> = serde_json::from_str(r#"{ "idlType": "avro" }"#);
        assert!(result.is_err());
    }
}
