use indexmap::IndexMap;

use crate::loader::LoadedPrograms;
use crate::types::error::{
    ErrorEntry, ValidationReport, E_DUPLICATE_SYMBOL, E_INVALID_NAME, E_MISSING_FIELD,
};
use crate::types::program::Program;

/// Check every loaded program and consolidate the results.
pub fn check_programs(loaded: &LoadedPrograms) -> ValidationReport {
    let mut report = ValidationReport::success();
    for (file, program) in &loaded.programs {
        report.merge(check_program(file, program));
    }
    report
}

/// Model checks that code generation relies on but never performs itself.
pub fn check_program(file: &str, program: &Program) -> ValidationReport {
    let mut report = ValidationReport::success();

    if program.name.trim().is_empty() {
        report.push(
            ErrorEntry::error(E_MISSING_FIELD, "Program name is required", file, "$.name")
                .with_suggestion("Set 'name' to the IDL file stem (e.g., \"rpc_demo\")"),
        );
    } else if !is_cpp_identifier(&program.name) {
        // The name becomes part of include paths and the output file name.
        report.push(
            ErrorEntry::error(
                E_INVALID_NAME,
                format!("Program name '{}' is not a valid C++ identifier", program.name),
                file,
                "$.name",
            )
            .with_suggestion("Use letters, digits, and '_' only (e.g., \"rpc_demo\")"),
        );
    }

    for (i, segment) in program.namespace.segments().iter().enumerate() {
        if !is_cpp_identifier(segment) {
            report.push(ErrorEntry::error(
                E_INVALID_NAME,
                format!("Namespace segment '{segment}' is not a valid C++ identifier"),
                file,
                &format!("$.namespace[{i}]"),
            ));
        }
    }

    let mut seen: IndexMap<&str, usize> = IndexMap::new();
    for (i, s) in program.structs.iter().enumerate() {
        let path = format!("$.structs[{i}].name");
        if !is_cpp_identifier(&s.name) {
            report.push(ErrorEntry::error(
                E_INVALID_NAME,
                format!("Struct name '{}' is not a valid C++ identifier", s.name),
                file,
                &path,
            ));
        }
        if let Some(first) = seen.insert(&s.name, i) {
            report.push(
                ErrorEntry::error(
                    E_DUPLICATE_SYMBOL,
                    format!("Struct '{}' is declared more than once", s.name),
                    file,
                    &path,
                )
                .with_suggestion(format!("First declared at $.structs[{first}]")),
            );
        }
    }

    // Duplicate services only produce a redundant include.
    let mut seen: IndexMap<&str, usize> = IndexMap::new();
    for (i, svc) in program.services.iter().enumerate() {
        let path = format!("$.services[{i}].name");
        if svc.name.trim().is_empty() {
            report.push(ErrorEntry::error(
                E_MISSING_FIELD,
                "Service name is required",
                file,
                &path,
            ));
            continue;
        }
        if !is_cpp_identifier(&svc.name) {
            report.push(ErrorEntry::error(
                E_INVALID_NAME,
                format!("Service name '{}' is not a valid C++ identifier", svc.name),
                file,
                &path,
            ));
        }
        if seen.insert(&svc.name, i).is_some() {
            report.push(ErrorEntry::warning(
                E_DUPLICATE_SYMBOL,
                format!("Service '{}' is declared more than once", svc.name),
                file,
                &path,
            ));
        }
    }

    report
}

/// `[A-Za-z_][A-Za-z0-9_]*`
pub fn is_cpp_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::common::Severity;

    #[test]
    fn test_well_formed_program_passes() {
        let program = Program::new("rpc_demo", "dsn.demo")
            .with_struct("Echo")
            .with_struct("EchoReply")
            .with_service("EchoService");
        let report = check_program("rpc_demo.program.json", &program);
        assert!(report.ok);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_duplicate_struct_is_error() {
        let program = Program::new("p", "").with_struct("Echo").with_struct("Echo");
        let report = check_program("p.program.json", &program);
        assert!(!report.ok);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].code, E_DUPLICATE_SYMBOL);
        assert_eq!(report.errors[0].path, "$.structs[1].name");
        assert_eq!(
            report.errors[0].suggestion.as_deref(),
            Some("First declared at $.structs[0]")
        );
    }

    #[test]
    fn test_duplicate_service_is_warning() {
        let program = Program::new("p", "").with_service("S").with_service("S");
        let report = check_program("p.program.json", &program);
        assert!(report.ok);
        assert_eq!(report.count(Severity::Warning), 1);
    }

    #[test]
    fn test_missing_program_name() {
        let program = Program::new("", "dsn");
        let report = check_program("p.program.json", &program);
        assert!(!report.ok);
        assert_eq!(report.errors[0].code, E_MISSING_FIELD);
    }

    #[test]
    fn test_invalid_identifiers() {
        let program = Program::new("p", "dsn.9lives").with_struct("has-dash");
        let report = check_program("p.program.json", &program);
        let codes: Vec<_> = report.errors.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, vec![E_INVALID_NAME, E_INVALID_NAME]);
        assert_eq!(report.errors[0].path, "$.namespace[1]");
    }

    #[test]
    fn test_program_name_must_be_identifier() {
        let program = Program::new("../escape", "dsn").with_struct("Echo");
        let report = check_program("escape.program.json", &program);
        assert!(!report.ok);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].code, E_INVALID_NAME);
        assert_eq!(report.errors[0].path, "$.name");
    }

    #[test]
    fn test_service_name_must_be_identifier() {
        let program = Program::new("p", "dsn")
            .with_service("EchoService")
            .with_service("bad svc");
        let report = check_program("p.program.json", &program);
        assert!(!report.ok);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].code, E_INVALID_NAME);
        assert_eq!(report.errors[0].path, "$.services[1].name");
    }

    #[test]
    fn test_is_cpp_identifier() {
        assert!(is_cpp_identifier("copy_request"));
        assert!(is_cpp_identifier("_x1"));
        assert!(!is_cpp_identifier(""));
        assert!(!is_cpp_identifier("1abc"));
        assert!(!is_cpp_identifier("a.b"));
    }
}
