use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A parsed IDL program (*.program.json / *.program.yaml)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Program {
    /// Program name, usually the IDL file stem (e.g., "rpc_demo")
    pub name: String,

    /// Language-neutral namespace (e.g., "dsn.demo" or "dsn::demo")
    #[serde(default, skip_serializing_if = "Namespace::is_empty")]
    #[schemars(with = "String")]
    pub namespace: Namespace,

    /// Declared structs, in declaration order
    #[serde(default)]
    pub structs: Vec<StructDef>,

    /// Declared services, in declaration order
    #[serde(default)]
    pub services: Vec<ServiceDef>,
}

impl Program {
    pub fn new(name: impl Into<String>, namespace: &str) -> Self {
        Self {
            name: name.into(),
            namespace: Namespace::parse(namespace),
            structs: Vec::new(),
            services: Vec::new(),
        }
    }

    /// Append a struct declaration.
    pub fn with_struct(mut self, name: impl Into<String>) -> Self {
        self.structs.push(StructDef { name: name.into() });
        self
    }

    /// Append a service declaration.
    pub fn with_service(mut self, name: impl Into<String>) -> Self {
        self.services.push(ServiceDef { name: name.into() });
        self
    }

    /// Text that opens the program's C++ namespace.
    pub fn namespace_begin(&self) -> String {
        self.namespace.cpp_begin()
    }

    /// Text that closes the program's C++ namespace.
    pub fn namespace_end(&self) -> String {
        self.namespace.cpp_end()
    }
}

/// A struct declaration. Only its name matters to code generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StructDef {
    pub name: String,
}

/// A service declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ServiceDef {
    pub name: String,
}

/// Namespace path, stored as segments.
///
/// Accepts both the IDL dotted form (`dsn.demo`) and the C++ form
/// (`dsn::demo`, `::dsn::demo`). Empty segments are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Namespace {
    segments: Vec<String>,
}

impl Namespace {
    pub fn parse(text: &str) -> Self {
        let segments = text
            .replace("::", ".")
            .split('.')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// `namespace a { namespace b {`, or empty for the global namespace.
    pub fn cpp_begin(&self) -> String {
        self.segments
            .iter()
            .map(|s| format!("namespace {} {{", s))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// One closing brace per segment, e.g. `} }`.
    pub fn cpp_end(&self) -> String {
        vec!["}"; self.segments.len()].join(" ")
    }

    /// `a::b`
    pub fn cpp_qualified(&self) -> String {
        self.segments.join("::")
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.cpp_qualified())
    }
}

impl From<String> for Namespace {
    fn from(value: String) -> Self {
        Namespace::parse(&value)
    }
}

impl From<&str> for Namespace {
    fn from(value: &str) -> Self {
        Namespace::parse(value)
    }
}

impl From<Namespace> for String {
    fn from(value: Namespace) -> Self {
        value.cpp_qualified()
    }
}
