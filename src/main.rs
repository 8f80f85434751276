//! Purpose: `tigerline` CLI entry point.
//! Role: Binary crate root; parses args, runs commands, emits JSON on stdout.
//! Invariants: Stdout carries only JSON payloads; diagnostics go to stderr.
//! Invariants: Non-interactive errors are emitted as JSON on stderr.
//! Invariants: Process exit code is derived from `to_exit_code`.
//! Invariants: Datasets are opened read-only through `core::dataset::Dataset`.
#![allow(clippy::result_large_err)]
use std::ffi::OsString;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::{Parser, Subcommand, ValueEnum, ValueHint, error::ErrorKind as ClapErrorKind};
use clap_complete::aot::Shell;
use serde::Serialize;
use serde_json::{Map, Value, json};
use std::error::Error as StdError;
use tigerline::core::error::{Error, ErrorKind, to_exit_code};
use tigerline::core::options::{OpenOptions, VersionOverride};
use tigerline::notice::{Notice, notice_json};
use tracing_subscriber::EnvFilter;

mod command_dispatch;

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }

    fn with_code(exit_code: i32) -> Self {
        Self { exit_code }
    }
}

fn main() {
    let exit_code = match run() {
        Ok(outcome) => outcome.exit_code,
        Err((err, color_mode)) => {
            emit_error(&err, color_mode);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<RunOutcome, (Error, ColorMode)> {
    let cli = match Cli::try_parse_from(std::env::args_os().collect::<Vec<OsString>>()) {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayVersion
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print().map_err(|io_err| {
                    (
                        Error::new(ErrorKind::Io)
                            .with_message("failed to write help")
                            .with_source(io_err),
                        ColorMode::Auto,
                    )
                })?;
                let exit_code = if matches!(
                    err.kind(),
                    ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) {
                    2
                } else {
                    0
                };
                return Ok(RunOutcome::with_code(exit_code));
            }
            _ => {
                let message = clap_error_summary(&err);
                return Err((
                    Error::new(ErrorKind::Usage)
                        .with_message(message)
                        .with_hint("Try `tigerline --help`."),
                    ColorMode::Auto,
                ));
            }
        },
    };

    init_tracing();
    let color_mode = cli.color;
    let options = open_options(cli.tiger_version.as_deref(), cli.lfield_as_string)
        .map_err(|err| (err, color_mode))?;

    let result = command_dispatch::dispatch_command(cli.command, options, color_mode);

    result
        .map_err(add_io_hint)
        .map_err(add_schema_hint)
        .map_err(add_internal_hint)
        .map_err(|err| (err, color_mode))
}

#[derive(Parser)]
#[command(
    name = "tigerline",
    version,
    about = "Read US Census TIGER/Line record files as feature layers",
    long_about = r#"Read US Census TIGER/Line record files as feature layers.

A dataset is a directory of per-module fixed-width files (TGR01001.RT1,
TGR01001.RT2, ...) or a single .RT1 file. Output is JSON on stdout."#,
    after_help = r#"EXAMPLES
  $ tigerline info ./TGR06075
  $ tigerline schema ./TGR06075 CompleteChain
  $ tigerline dump ./TGR06075 CompleteChain --limit 10
  $ tigerline --tiger-version TIGER_2000_Census dump ./old AltName --fid 3

ENVIRONMENT
  TIGER_VERSION            force the dataset version (name or code)
  TIGER_LFIELD_AS_STRING   decode left-justified numeric fields as strings
  RUST_LOG                 diagnostic log filter (default: warn)"#,
    arg_required_else_help = true
)]
struct Cli {
    #[arg(
        long,
        global = true,
        value_name = "VERSION",
        help = "Force the dataset version: a name like TIGER_2002 or a raw version code"
    )]
    tiger_version: Option<String>,
    #[arg(
        long,
        global = true,
        help = "Decode left-justified numeric fields as strings (keeps leading zeros)"
    )]
    lfield_as_string: bool,
    #[arg(
        long,
        global = true,
        default_value = "auto",
        value_enum,
        help = "Colorize stderr diagnostics: auto|always|never"
    )]
    color: ColorMode,

    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn use_color(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Summarize a dataset: version, modules, and layers")]
    Info {
        #[arg(help = "Dataset directory or .RT1 file", value_hint = ValueHint::AnyPath)]
        path: PathBuf,
    },
    #[command(about = "Show the field definitions of one layer")]
    Schema {
        #[arg(help = "Dataset directory or .RT1 file", value_hint = ValueHint::AnyPath)]
        path: PathBuf,
        #[arg(help = "Layer name, e.g. CompleteChain (case-insensitive)")]
        layer: String,
    },
    #[command(about = "Print features of one layer as JSON Lines")]
    Dump {
        #[arg(help = "Dataset directory or .RT1 file", value_hint = ValueHint::AnyPath)]
        path: PathBuf,
        #[arg(help = "Layer name, e.g. CompleteChain (case-insensitive)")]
        layer: String,
        #[arg(long, help = "Print only the feature with this id")]
        fid: Option<u64>,
        #[arg(long, help = "Stop after this many features")]
        limit: Option<u64>,
    },
    #[command(about = "Generate a shell completion script")]
    Completion {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Environment first, then command-line flags on top.
fn open_options(tiger_version: Option<&str>, lfield_as_string: bool) -> Result<OpenOptions, Error> {
    let mut options = OpenOptions::from_env()?;
    if let Some(text) = tiger_version {
        options = options.with_version_override(VersionOverride::parse(text)?);
    }
    if lfield_as_string {
        options = options.with_lfield_as_string(true);
    }
    Ok(options)
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn add_io_hint(err: Error) -> Error {
    if err.hint().is_some() {
        return err;
    }
    match err.kind() {
        ErrorKind::NotFound => err.with_hint("Check the dataset path and module file names."),
        ErrorKind::Permission => err.with_hint("Permission denied. Check file permissions."),
        ErrorKind::Io | ErrorKind::ShortRead => {
            err.with_hint("I/O error. Check the path and whether files changed while reading.")
        }
        _ => err,
    }
}

fn add_schema_hint(err: Error) -> Error {
    if err.kind() != ErrorKind::Schema || err.hint().is_some() {
        return err;
    }
    err.with_hint("This layer has no layout for the dataset version. Try --tiger-version.")
}

fn add_internal_hint(err: Error) -> Error {
    if err.kind() != ErrorKind::Internal || err.hint().is_some() {
        return err;
    }
    err.with_hint(
        "Unexpected internal failure. Retry with RUST_LOG=debug and share command/context if it persists.",
    )
}

fn emit_json<T: Serialize>(value: &T) {
    let pretty = io::stdout().is_terminal();
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .unwrap_or_else(|_| "{\"error\":\"json encode failed\"}".to_string());
    println!("{json}");
}

fn emit_json_line<T: Serialize>(value: &T) {
    let json = serde_json::to_string(value)
        .unwrap_or_else(|_| "{\"error\":\"json encode failed\"}".to_string());
    println!("{json}");
}

#[derive(Copy, Clone, Debug)]
enum AnsiColor {
    Red,
    Yellow,
}

fn colorize_label(label: &str, enabled: bool, color: AnsiColor) -> String {
    if !enabled {
        return label.to_string();
    }
    let code = match color {
        AnsiColor::Red => "31",
        AnsiColor::Yellow => "33",
    };
    format!("\u{1b}[{code}m{label}\u{1b}[0m")
}

fn emit_error(err: &Error, color_mode: ColorMode) {
    let is_tty = io::stderr().is_terminal();
    if is_tty {
        eprintln!("{}", error_text(err, color_mode.use_color(is_tty)));
        return;
    }

    let value = error_json(err);
    let json = serde_json::to_string(&value).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn notice_time_now() -> String {
    use time::format_description::well_known::Rfc3339;
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .and_then(|duration| {
            time::OffsetDateTime::from_unix_timestamp_nanos(duration.as_nanos() as i128).ok()
        })
        .and_then(|ts| ts.format(&Rfc3339).ok())
        .unwrap_or_default()
}

fn emit_notice(notice: &Notice, color_mode: ColorMode) {
    let is_tty = io::stderr().is_terminal();
    if is_tty {
        let label = colorize_label("notice:", color_mode.use_color(is_tty), AnsiColor::Yellow);
        eprintln!("{label} {} (dataset: {})", notice.message, notice.dataset);
        return;
    }

    let value = notice_json(notice);
    let json = serde_json::to_string(&value).unwrap_or_else(|_| {
        "{\"notice\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_message(err: &Error) -> String {
    if let Some(message) = err.message() {
        return message.to_string();
    }
    match err.kind() {
        ErrorKind::Internal => "internal error".to_string(),
        ErrorKind::Usage => "usage error".to_string(),
        ErrorKind::NotFound => "not found".to_string(),
        ErrorKind::Permission => "permission denied".to_string(),
        ErrorKind::Io => "i/o error".to_string(),
        ErrorKind::ShortRead => "short read".to_string(),
        ErrorKind::OutOfRange => "out of range".to_string(),
        ErrorKind::Schema => "no record layout".to_string(),
    }
}

fn error_causes(err: &Error) -> Vec<String> {
    let mut causes = Vec::new();
    let mut cur = err.source();
    while let Some(source) = cur {
        causes.push(source.to_string());
        cur = source.source();
    }
    causes
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    if let Some(path) = err.path() {
        inner.insert("path".to_string(), json!(path.display().to_string()));
    }
    if let Some(module) = err.module() {
        inner.insert("module".to_string(), json!(module));
    }
    if let Some(record) = err.record() {
        inner.insert("record".to_string(), json!(record));
    }
    if let Some(offset) = err.offset() {
        inner.insert("offset".to_string(), json!(offset));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn error_text(err: &Error, use_color: bool) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "{} {}",
        colorize_label("error:", use_color, AnsiColor::Red),
        error_message(err)
    ));

    if let Some(hint) = err.hint() {
        lines.push(format!(
            "{} {hint}",
            colorize_label("hint:", use_color, AnsiColor::Yellow)
        ));
    }
    if let Some(path) = err.path() {
        lines.push(format!(
            "{} {}",
            colorize_label("path:", use_color, AnsiColor::Yellow),
            path.display()
        ));
    }
    if let Some(module) = err.module() {
        lines.push(format!(
            "{} {module}",
            colorize_label("module:", use_color, AnsiColor::Yellow)
        ));
    }
    if let Some(record) = err.record() {
        lines.push(format!(
            "{} {record}",
            colorize_label("record:", use_color, AnsiColor::Yellow)
        ));
    }

    let causes = error_causes(err);
    if let Some(cause) = causes.first() {
        lines.push(format!(
            "{} {cause}",
            colorize_label("caused by:", use_color, AnsiColor::Yellow)
        ));
    }

    lines.join("\n")
}

fn clap_error_summary(err: &clap::Error) -> String {
    for line in err.to_string().lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("error:") {
            return rest.trim().to_string();
        }
        return trimmed.to_string();
    }
    "invalid arguments".to_string()
}
