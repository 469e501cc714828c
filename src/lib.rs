pub mod catalog;
pub mod color;
pub mod config;
pub mod conflicts;
pub mod diagnostics;
pub mod error;
pub mod logging;
pub mod palette;
pub mod resolver;
pub mod scanner;
pub mod scope;
pub mod theme;
pub mod validator;
pub mod variants;

pub use catalog::{is_layout_class, is_marker_class, is_valid_class};
pub use conflicts::{conflict_group, detect_conflicts, has_cross_scope_conflicts};
pub use diagnostics::{Diagnostic, DiagnosticKind, Severity};
pub use error::CliError;
pub use resolver::{ColorResolution, ResolvedColor, classify_color, resolve_color};
pub use theme::{
    ColorMode, ThemeVariable, ThemeVariableRegistry, invalid_color_variable_name,
    invalid_theme_token_name,
};
pub use validator::{Located, ValidationContext, validate, validate_batch};
pub use variants::unsupported_variants;

use crate::scanner::{ClassOccurrence, ScanGlobOptions};
use crate::scope::parse_variant_class;
use serde::Serialize;
use std::collections::BTreeMap;
use std::env;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Check {
        inputs: Vec<String>,
        ignore: Vec<String>,
        config: Option<String>,
        root: Option<String>,
        json: bool,
        deny_warnings: bool,
    },
    Resolve {
        utilities: Vec<String>,
        config: Option<String>,
        dark: bool,
    },
    Help,
}

/// Whether a finished command should make the process exit non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

pub fn run(command: Command) -> Result<Outcome, CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_with_output(command, &mut out)
}

pub fn run_with_output<W: Write>(command: Command, out: &mut W) -> Result<Outcome, CliError> {
    match command {
        Command::Check {
            inputs,
            ignore,
            config,
            root,
            json,
            deny_warnings,
        } => run_check(
            CheckOptions {
                inputs,
                ignore,
                config,
                root,
                json,
                deny_warnings,
            },
            out,
        ),
        Command::Resolve {
            utilities,
            config,
            dark,
        } => run_resolve(&utilities, config.as_deref(), dark, out),
        Command::Help => {
            print_help(out)?;
            Ok(Outcome::Success)
        }
    }
}

pub fn run_from_env() -> Result<Outcome, CliError> {
    let command = parse_args(env::args().skip(1))?;
    run(command)
}

pub fn parse_args<I>(args: I) -> Result<Command, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut iter = args.into_iter();
    let Some(cmd) = iter.next() else {
        return Ok(Command::Help);
    };

    match cmd.as_str() {
        "check" => parse_check_args(iter.collect()),
        "resolve" => parse_resolve_args(iter.collect()),
        "-h" | "--help" | "help" => Ok(Command::Help),
        _ => Err(CliError::Usage(format!("unknown command: {}", cmd))),
    }
}

fn parse_check_args(args: Vec<String>) -> Result<Command, CliError> {
    let mut inputs = Vec::new();
    let mut ignore = Vec::new();
    let mut config = None;
    let mut root = None;
    let mut json = false;
    let mut deny_warnings = false;
    let mut idx = 0;

    while idx < args.len() {
        match args[idx].as_str() {
            "--config" | "-c" => {
                idx += 1;
                config = Some(flag_value(&args, idx, "check", "--config")?);
            }
            "--ignore" | "-I" => {
                idx += 1;
                ignore.push(flag_value(&args, idx, "check", "--ignore")?);
            }
            "--root" => {
                idx += 1;
                root = Some(flag_value(&args, idx, "check", "--root")?);
            }
            "--json" => json = true,
            "--deny-warnings" | "-D" => deny_warnings = true,
            value => inputs.push(value.to_string()),
        }
        idx += 1;
    }

    if inputs.is_empty() {
        return Err(CliError::Usage(
            "check requires at least one glob pattern".to_string(),
        ));
    }

    Ok(Command::Check {
        inputs,
        ignore,
        config,
        root,
        json,
        deny_warnings,
    })
}

fn parse_resolve_args(args: Vec<String>) -> Result<Command, CliError> {
    let mut utilities = Vec::new();
    let mut config = None;
    let mut dark = false;
    let mut idx = 0;

    while idx < args.len() {
        match args[idx].as_str() {
            "--config" | "-c" => {
                idx += 1;
                config = Some(flag_value(&args, idx, "resolve", "--config")?);
            }
            "--dark" => dark = true,
            value => utilities.push(value.to_string()),
        }
        idx += 1;
    }

    if utilities.is_empty() {
        return Err(CliError::Usage(
            "resolve requires at least one color utility".to_string(),
        ));
    }

    Ok(Command::Resolve {
        utilities,
        config,
        dark,
    })
}

fn flag_value(args: &[String], idx: usize, command: &str, flag: &str) -> Result<String, CliError> {
    args.get(idx).cloned().ok_or_else(|| {
        CliError::Usage(format!("{} requires a value for {}", command, flag))
    })
}

struct CheckOptions {
    inputs: Vec<String>,
    ignore: Vec<String>,
    config: Option<String>,
    root: Option<String>,
    json: bool,
    deny_warnings: bool,
}

#[derive(Debug, Serialize)]
struct CheckReport<'a> {
    files_scanned: usize,
    class_strings: usize,
    errors: usize,
    warnings: usize,
    findings: Vec<Finding<'a>>,
}

#[derive(Debug, Serialize)]
struct Finding<'a> {
    path: &'a Path,
    line: usize,
    column: usize,
    class_string: &'a str,
    diagnostics: &'a [Diagnostic],
}

fn run_check<W: Write>(options: CheckOptions, out: &mut W) -> Result<Outcome, CliError> {
    let base = PathBuf::from(options.root.as_deref().unwrap_or("."));
    let config = config::discover(options.config.as_deref().map(Path::new), &base)?;
    let registry = config.registry();

    let scan_options = ScanGlobOptions {
        base_path: base,
        ..ScanGlobOptions::default()
    };
    let scan =
        scanner::scan_globs_with_options(&options.inputs, &options.ignore, &scan_options)?;
    let files_scanned = scan.files_scanned;
    let items = scan
        .occurrences
        .into_iter()
        .map(|occurrence| (occurrence.value.clone(), occurrence))
        .collect::<Vec<(String, ClassOccurrence)>>();

    let ctx = ValidationContext::new(&registry).with_escalated(config.escalated_kinds());
    let located = validate_batch(&items, &ctx);

    let (errors, warnings) = located
        .iter()
        .flat_map(|entry| entry.diagnostics.iter())
        .fold((0, 0), |(errors, warnings), diagnostic| {
            if diagnostic.is_error() {
                (errors + 1, warnings)
            } else {
                (errors, warnings + 1)
            }
        });

    if options.json {
        let report = CheckReport {
            files_scanned,
            class_strings: located.len(),
            errors,
            warnings,
            findings: located
                .iter()
                .filter(|entry| !entry.diagnostics.is_empty())
                .map(|entry| Finding {
                    path: &entry.location.path,
                    line: entry.location.line,
                    column: entry.location.column,
                    class_string: &entry.class_string,
                    diagnostics: &entry.diagnostics,
                })
                .collect(),
        };
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
    } else {
        for entry in &located {
            for diagnostic in &entry.diagnostics {
                writeln!(
                    out,
                    "{}:{}:{}: {}",
                    entry.location.path.display(),
                    entry.location.line,
                    entry.location.column,
                    diagnostic
                )?;
            }
        }
        writeln!(
            out,
            "checked {} class strings in {} files: {} errors, {} warnings",
            located.len(),
            files_scanned,
            errors,
            warnings
        )?;
    }

    let failed = errors > 0 || (options.deny_warnings && warnings > 0);
    Ok(if failed {
        Outcome::Failure
    } else {
        Outcome::Success
    })
}

fn run_resolve<W: Write>(
    utilities: &[String],
    config_path: Option<&str>,
    dark: bool,
    out: &mut W,
) -> Result<Outcome, CliError> {
    let config = config::discover(config_path.map(Path::new), Path::new("."))?;
    let registry = config.registry();
    let variables = BTreeMap::new();
    let mut outcome = Outcome::Success;

    for utility in utilities {
        let parsed = parse_variant_class(utility);
        let mode = if dark || parsed.variants.contains(&"dark") {
            ColorMode::Dark
        } else {
            ColorMode::Light
        };
        let resolution = theme::COLOR_PREFIXES
            .iter()
            .find(|prefix| parsed.base.starts_with(**prefix))
            .map(|prefix| classify_color(parsed.base, prefix, &variables, &registry, mode))
            .unwrap_or(ColorResolution::Unresolved);

        match resolution {
            ColorResolution::Color(color) => writeln!(out, "{}\t{}", utility, color.to_hex())?,
            ColorResolution::NoOverride => writeln!(out, "{}\tinherit", utility)?,
            ColorResolution::Unresolved => {
                writeln!(out, "{}\tunresolved", utility)?;
                outcome = Outcome::Failure;
            }
        }
    }

    Ok(outcome)
}

fn print_help<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "tailcheck")?;
    writeln!(out)?;
    writeln!(out, "USAGE:")?;
    writeln!(
        out,
        "  tailcheck check [--config <path>] [--root <dir>] [--ignore <glob>] [--json] [--deny-warnings] <glob...>"
    )?;
    writeln!(out, "  tailcheck resolve [--config <path>] [--dark] <utility...>")?;
    writeln!(out)?;
    writeln!(out, "EXAMPLES:")?;
    writeln!(out, "  tailcheck check \"src/**/*.{{html,tsx,rs}}\"")?;
    writeln!(out, "  tailcheck check -I \"**/generated/**\" --json \"src/**/*.tsx\"")?;
    writeln!(out, "  tailcheck check -c tailcheck.toml --deny-warnings \"src/**/*.rs\"")?;
    writeln!(out, "  tailcheck resolve bg-blue-500/50 \"text-[oklch(62.3%_0.214_259.815)]\"")?;
    writeln!(out, "  tailcheck resolve --dark bg-surface")?;
    writeln!(out)?;
    writeln!(out, "Set TAILCHECK_LOG (e.g. tailcheck=debug) for diagnostics on stderr.")
}
