mod logger;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use dsngen_codegen::generator::types_header_file_name;
use dsngen_codegen::{CodeGenerator, CodegenError};
use dsngen_model::check::check_programs;
use dsngen_model::{IdlFormat, IdlType, LoadedPrograms, Severity, ValidationReport};
use tracing::debug;

#[derive(Parser)]
#[command(name = "dsngen", about = "dsngen – serialization headers for IDL programs")]
#[command(version, propagate_version = true)]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate <prefix>.types.h for each program
    Gen {
        /// Program file or directory of program files
        #[arg(default_value = ".")]
        path: PathBuf,
        /// Output directory (defaults to outDir from dsngen.config.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Output file prefix (single program only; defaults to the program name)
        #[arg(short, long)]
        prefix: Option<String>,
        /// Backend: thrift or proto (defaults to idlType from dsngen.config.json)
        #[arg(short = 't', long)]
        idl_type: Option<String>,
        /// Wire format: binary or json (defaults to idlFormat from dsngen.config.json)
        #[arg(short = 'f', long)]
        idl_format: Option<String>,
        /// Print generated headers instead of writing files
        #[arg(long)]
        stdout: bool,
    },
    /// Load programs, run model checks, and show a summary
    Check {
        /// Program file or directory of program files
        #[arg(default_value = ".")]
        path: PathBuf,
    },
    /// Print the JSON Schema of an input file format
    Schema {
        #[arg(value_enum, default_value_t = SchemaKind::Program)]
        kind: SchemaKind,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SchemaKind {
    Program,
    Config,
}

/// Options for `dsngen gen`
#[derive(Debug, Default)]
struct GenOptions<'a> {
    output: Option<&'a Path>,
    prefix: Option<&'a str>,
    idl_type: Option<&'a str>,
    idl_format: Option<&'a str>,
    stdout: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);

    let result = match cli.command {
        Command::Gen {
            path,
            output,
            prefix,
            idl_type,
            idl_format,
            stdout,
        } => cmd_gen(
            &path,
            &GenOptions {
                output: output.as_deref(),
                prefix: prefix.as_deref(),
                idl_type: idl_type.as_deref(),
                idl_format: idl_format.as_deref(),
                stdout,
            },
        ),
        Command::Check { path } => cmd_check(&path),
        Command::Schema { kind } => cmd_schema(kind),
    };

    match result {
        Ok(success) => {
            if success {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            ExitCode::from(1)
        }
    }
}

/// Load programs and run the model checks, merging both reports.
fn load_and_check(path: &Path) -> Result<(LoadedPrograms, ValidationReport)> {
    let (loaded, mut report) = dsngen_model::load_programs(path)
        .with_context(|| format!("Failed to load programs at '{}'", path.display()))?;
    report.merge(check_programs(&loaded));
    Ok((loaded, report))
}

fn print_report(report: &ValidationReport) {
    for entry in &report.errors {
        let severity_str = match entry.severity {
            Severity::Error => "error".red().bold(),
            Severity::Warning => "warning".yellow().bold(),
            Severity::Info => "info".blue().bold(),
        };

        eprintln!(
            "  {} [{}] {} ({}:{})",
            severity_str,
            entry.code.dimmed(),
            entry.message,
            entry.file.dimmed(),
            entry.path.dimmed(),
        );

        if let Some(suggestion) = &entry.suggestion {
            eprintln!("    {} {}", "hint:".cyan(), suggestion);
        }
    }
}

/// Flag value if given, config value otherwise.
fn resolve_backend(
    loaded: &LoadedPrograms,
    idl_type: Option<&str>,
    idl_format: Option<&str>,
) -> Result<(IdlType, IdlFormat), CodegenError> {
    let idl_type = match idl_type {
        Some(s) => s.parse()?,
        None => loaded.config.idl_type,
    };
    let idl_format = match idl_format {
        Some(s) => s.parse()?,
        None => loaded.config.idl_format,
    };
    Ok((idl_type, idl_format))
}

fn cmd_gen(path: &Path, opts: &GenOptions<'_>) -> Result<bool> {
    let (loaded, report) = load_and_check(path)?;
    print_report(&report);

    if report.has_errors() {
        eprintln!(
            "{} {} error(s); fix them before generating headers",
            "✗".red().bold(),
            report.count(Severity::Error)
        );
        return Ok(false);
    }

    let (idl_type, idl_format) = resolve_backend(&loaded, opts.idl_type, opts.idl_format)?;
    debug!(
        idl_type = %idl_type,
        idl_format = %idl_format,
        programs = loaded.programs.len(),
        "resolved backend"
    );

    if opts.prefix.is_some() && loaded.programs.len() > 1 {
        anyhow::bail!(
            "--prefix applies to a single program, but {} were found",
            loaded.programs.len()
        );
    }

    let generator = CodeGenerator::new(idl_type, idl_format);
    let generated = match opts.prefix {
        Some(prefix) => {
            let (_, program) = loaded
                .programs
                .first()
                .context("No program to generate")?;
            generator.generate(program, Some(prefix))?
        }
        None => generator.generate_all(loaded.programs.iter().map(|(_, p)| p))?,
    };

    if opts.stdout {
        for content in generated.files().values() {
            print!("{}", content);
        }
        return Ok(true);
    }

    let output_dir = match opts.output {
        Some(d) => d.to_path_buf(),
        None => loaded.root.join(&loaded.config.out_dir),
    };

    generated
        .write_to_disk(&output_dir)
        .with_context(|| format!("Failed to write to '{}'", output_dir.display()))?;

    println!(
        "{} Generated {} header(s) ({}, {}) → {}",
        "✓".green().bold(),
        generated.file_count(),
        idl_type,
        idl_format,
        output_dir.display()
    );

    for file_path in generated.files().keys() {
        println!("  {} {}", "→".dimmed(), file_path);
    }

    Ok(true)
}

fn cmd_check(path: &Path) -> Result<bool> {
    let (loaded, report) = load_and_check(path)?;
    let backend = loaded.config.idl_type;

    println!("{}", "Configuration".bold().underline());
    println!(
        "  Source:    {}",
        if loaded.config_found {
            "dsngen.config.json"
        } else {
            "defaults"
        }
    );
    println!("  Backend:   {} ({})", backend, loaded.config.idl_format);
    println!("  Output:    {}", loaded.config.out_dir);

    println!();
    println!("{}", "Programs".bold().underline());
    for (file, program) in &loaded.programs {
        let namespace = if program.namespace.is_empty() {
            "<global>".to_string()
        } else {
            program.namespace.cpp_qualified()
        };
        println!(
            "  {} {} ({} struct(s), {} service(s)) → {}",
            program.name.bold(),
            namespace.dimmed(),
            program.structs.len(),
            program.services.len(),
            types_header_file_name(&program.name),
        );
        println!("    {} {}", "from".dimmed(), file);
    }

    println!();
    print_report(&report);

    let error_count = report.count(Severity::Error);
    let warning_count = report.count(Severity::Warning);
    if error_count > 0 {
        println!(
            "{} {} error(s), {} warning(s)",
            "✗".red().bold(),
            error_count,
            warning_count
        );
        Ok(false)
    } else if warning_count > 0 {
        println!("{} Valid with {} warning(s)", "⚠".yellow().bold(), warning_count);
        Ok(true)
    } else {
        println!(
            "{} {} program(s) ready for generation",
            "✓".green().bold(),
            loaded.programs.len()
        );
        Ok(true)
    }
}

fn cmd_schema(kind: SchemaKind) -> Result<bool> {
    let schema = match kind {
        SchemaKind::Program => dsngen_model::schema_def::generate_program_schema(),
        SchemaKind::Config => dsngen_model::schema_def::generate_config_schema(),
    };
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(true)
}
