use schemars::schema_for;

use crate::types::config::GenConfig;
use crate::types::program::Program;

/// Generate a JSON Schema for program description files.
pub fn generate_program_schema() -> serde_json::Value {
    serde_json::to_value(schema_for!(Program)).unwrap_or_default()
}

/// Generate a JSON Schema for `dsngen.config.json`.
pub fn generate_config_schema() -> serde_json::Value {
    serde_json::to_value(schema_for!(GenConfig)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn program_schema_describes_fields() {
        let schema = generate_program_schema();
        assert_eq!(schema["title"], "Program");
        let props = &schema["properties"];
        assert!(props.get("name").is_some());
        assert!(props.get("namespace").is_some());
        assert!(props.get("structs").is_some());
        assert!(props.get("services").is_some());
        assert_eq!(schema["required"], serde_json::json!(["name"]));
    }

    #[test]
    fn namespace_is_a_string_in_schema() {
        let schema = generate_program_schema();
        assert_eq!(schema["properties"]["namespace"]["type"], "string");
    }

    #[test]
    fn config_schema_has_camel_case_fields() {
        let schema = generate_config_schema();
        let props = &schema["properties"];
        assert!(props.get("idlType").is_some());
        assert!(props.get("idlFormat").is_some());
        assert!(props.get("outDir").is_some());
    }
}
