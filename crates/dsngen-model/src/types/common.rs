use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Wire-format backend whose generated types the header wraps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum IdlType {
    Thrift,
    #[serde(rename = "proto")]
    Protobuf,
}

impl IdlType {
    /// Canonical name as accepted on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            IdlType::Thrift => "thrift",
            IdlType::Protobuf => "proto",
        }
    }
}

impl fmt::Display for IdlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdlType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "thrift" => Ok(IdlType::Thrift),
            "proto" | "protobuf" => Ok(IdlType::Protobuf),
            _ => Err(ParseEnumError {
                kind: "idl type",
                value: s.to_string(),
                expected: "thrift, proto",
            }),
        }
    }
}

// Config files accept the same spellings as the command line.
impl<'de> Deserialize<'de> for IdlType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

/// Encoding used on the wire by the selected backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum IdlFormat {
    #[default]
    Binary,
    Json,
}

impl IdlFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdlFormat::Binary => "binary",
            IdlFormat::Json => "json",
        }
    }
}

impl fmt::Display for IdlFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdlFormat {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "binary" => Ok(IdlFormat::Binary),
            "json" => Ok(IdlFormat::Json),
            _ => Err(ParseEnumError {
                kind: "idl format",
                value: s.to_string(),
                expected: "binary, json",
            }),
        }
    }
}

impl<'de> Deserialize<'de> for IdlFormat {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

/// Returned when a textual selector names no known variant
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

/// Error/warning severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idl_type_from_str() {
        assert_eq!("thrift".parse::<IdlType>().unwrap(), IdlType::Thrift);
        assert_eq!("Thrift".parse::<IdlType>().unwrap(), IdlType::Thrift);
        assert_eq!("proto".parse::<IdlType>().unwrap(), IdlType::Protobuf);
        assert_eq!("protobuf".parse::<IdlType>().unwrap(), IdlType::Protobuf);
    }

    #[test]
    fn test_idl_type_rejects_unknown() {
        let err = "capnp".parse::<IdlType>().unwrap_err();
        assert_eq!(err.value, "capnp");
        assert_eq!(
            err.to_string(),
            "unknown idl type 'capnp' (expected one of: thrift, proto)"
        );
    }

    #[test]
    fn test_idl_type_serialization() {
        assert_eq!(serde_json::to_value(IdlType::Thrift).unwrap(), "thrift");
        assert_eq!(serde_json::to_value(IdlType::Protobuf).unwrap(), "proto");
        let parsed: IdlType = serde_json::from_value(serde_json::json!("protobuf")).unwrap();
        assert_eq!(parsed, IdlType::Protobuf);
    }

    #[test]
    fn test_deserialize_is_case_insensitive() {
        let parsed: IdlType = serde_json::from_value(serde_json::json!("Thrift")).unwrap();
        assert_eq!(parsed, IdlType::Thrift);
        let parsed: IdlType = serde_json::from_value(serde_json::json!("PROTOBUF")).unwrap();
        assert_eq!(parsed, IdlType::Protobuf);
        let parsed: IdlFormat = serde_json::from_value(serde_json::json!("Json")).unwrap();
        assert_eq!(parsed, IdlFormat::Json);
    }

    #[test]
    fn test_deserialize_reports_expected_values() {
        let err = serde_json::from_value::<IdlType>(serde_json::json!("avro")).unwrap_err();
        assert!(err.to_string().contains("expected one of: thrift, proto"));
    }

    #[test]
    fn test_idl_format_from_str() {
        assert_eq!("binary".parse::<IdlFormat>().unwrap(), IdlFormat::Binary);
        assert_eq!("JSON".parse::<IdlFormat>().unwrap(), IdlFormat::Json);
        assert!("xml".parse::<IdlFormat>().is_err());
        assert_eq!(IdlFormat::default(), IdlFormat::Binary);
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for t in [IdlType::Thrift, IdlType::Protobuf] {
            assert_eq!(t.to_string().parse::<IdlType>().unwrap(), t);
        }
    }

    #[test]
    fn test_severity_serialization() {
        assert_eq!(serde_json::to_value(Severity::Error).unwrap(), "error");
        assert_eq!(serde_json::to_value(Severity::Warning).unwrap(), "warning");
    }
}
