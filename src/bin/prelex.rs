//! Command-line interface for prelex
//! This binary runs the pre-lexer over a platform description file and prints the
//! delimiter-structured result, or reports where the input is malformed.
//!
//! Usage:
//!   prelex process `<path>` [--format `<format>`] [--config `<file>`]  - Print the pre-lexed lines
//!   prelex check `<path>` [--config `<file>`]                         - Only validate the file

use clap::{Arg, ArgAction, ArgMatches, Command};
use prelex::config::{Loader, OutputFormat, PrelexConfig};
use prelex::{process_str, PreLexError, PreLexerOptions};
use serde::Serialize;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Optional per-directory configuration, layered over the built-in defaults
const LOCAL_CONFIG: &str = "prelex.toml";

#[derive(Serialize)]
struct Rendered<'a> {
    lines: &'a [String],
}

fn main() -> ExitCode {
    let matches = Command::new("prelex")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Rewrites indentation-structured platform descriptions into brace-delimited source")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log pre-lexer decisions to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            with_common_args(Command::new("process").about("Print the pre-lexed lines")).arg(
                Arg::new("format")
                    .long("format")
                    .short('f')
                    .help("Output format (overrides the configured one)")
                    .value_parser(["text", "json", "yaml"]),
            ),
        )
        .subcommand(with_common_args(
            Command::new("check").about("Validate a file without printing it"),
        ))
        .get_matches();

    init_tracing(matches.get_flag("verbose"));

    match matches.subcommand() {
        Some(("process", process_matches)) => handle_process_command(process_matches),
        Some(("check", check_matches)) => handle_check_command(check_matches),
        _ => unreachable!(),
    }
}

fn with_common_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("path")
                .help("Path to the description file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the defaults"),
        )
        .arg(
            Arg::new("pad-comments")
                .long("pad-comments")
                .help("Keep blanked multi-line comment tails as spaces")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("relaxed")
                .long("relaxed")
                .help("Allow comments anywhere outside strings")
                .action(ArgAction::SetTrue),
        )
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(matches: &ArgMatches) -> Result<PrelexConfig, config::ConfigError> {
    let mut loader = Loader::new().with_optional_file(LOCAL_CONFIG);
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if matches.get_flag("pad-comments") {
        loader = loader.set_override("comments.block_tail", "pad")?;
    }
    if matches.get_flag("relaxed") {
        loader = loader.set_override("comments.strict_placement", false)?;
    }
    if let Ok(Some(format)) = matches.try_get_one::<String>("format") {
        loader = loader.set_override("output.format", format.as_str())?;
    }
    loader.build()
}

/// Read the file and settle the configuration, or exit with a usage failure.
fn prepare(matches: &ArgMatches) -> Result<(String, String, PrelexConfig), ExitCode> {
    let path = matches
        .get_one::<String>("path")
        .expect("path is a required argument")
        .clone();
    let config = load_config(matches).map_err(|e| {
        eprintln!("Configuration error: {}", e);
        ExitCode::from(2)
    })?;
    let source = std::fs::read_to_string(&path).map_err(|e| {
        eprintln!("Error reading {}: {}", path, e);
        ExitCode::from(2)
    })?;
    debug!(path = %path, ?config, "loaded");
    Ok((path, source, config))
}

fn report(path: &str, err: &PreLexError) -> ExitCode {
    eprintln!("error: {}:{}: {} ({})", path, err.line, err.message, err.kind);
    ExitCode::from(1)
}

/// Handle the process command
fn handle_process_command(matches: &ArgMatches) -> ExitCode {
    let (path, source, config) = match prepare(matches) {
        Ok(prepared) => prepared,
        Err(code) => return code,
    };
    let options = PreLexerOptions::from(&config);
    let mut lines = process_str(&source, options);

    match config.output.format {
        OutputFormat::Text => {
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            // Lines are re-joined with `\n`, so a trailing newline in the input survives
            for (index, line) in lines.by_ref().enumerate() {
                let separator = if index == 0 { "" } else { "\n" };
                let written = match line {
                    Ok(line) => write!(out, "{}{}", separator, line),
                    Err(err) => {
                        // Everything before the error has already been produced
                        let _ = out.flush();
                        return report(&path, &err);
                    }
                };
                if let Err(e) = written {
                    eprintln!("Error writing output: {}", e);
                    return ExitCode::from(2);
                }
            }
            if let Err(e) = out.flush() {
                eprintln!("Error writing output: {}", e);
                return ExitCode::from(2);
            }
            ExitCode::SUCCESS
        }
        format @ (OutputFormat::Json | OutputFormat::Yaml) => {
            let collected = match lines.collect::<Result<Vec<_>, _>>() {
                Ok(collected) => collected,
                Err(err) => return report(&path, &err),
            };
            let rendered = Rendered { lines: &collected };
            let serialized = if format == OutputFormat::Json {
                serde_json::to_string_pretty(&rendered).map_err(|e| e.to_string())
            } else {
                serde_yaml::to_string(&rendered).map_err(|e| e.to_string())
            };
            match serialized {
                Ok(text) => {
                    println!("{}", text.trim_end());
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Error formatting output: {}", e);
                    ExitCode::from(2)
                }
            }
        }
    }
}

/// Handle the check command
fn handle_check_command(matches: &ArgMatches) -> ExitCode {
    let (path, source, config) = match prepare(matches) {
        Ok(prepared) => prepared,
        Err(code) => return code,
    };
    let options = PreLexerOptions::from(&config);
    let failure = process_str(&source, options).find_map(Result::err);
    match failure {
        Some(err) => report(&path, &err),
        None => {
            println!("{}: ok", path);
            ExitCode::SUCCESS
        }
    }
}
