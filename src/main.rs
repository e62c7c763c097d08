//! html2md - convert edited HTML fragments to Markdown from the command line
//!
//! Reads each FILE (or stdin when none is given), converts it, and writes the
//! Markdown to stdout. Multiple documents are separated by a blank line.

use clap::{Parser, ValueEnum};
use editmd_converter::converter::{ConversionOptions, ConversionStrategy, MarkdownConverter};
use editmd_converter::error::ConversionError;
use editmd_converter::fingerprint::fingerprint;
use log::{LevelFilter, debug, error, info};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

/// Convert HTML produced by a rich-text editing surface into Markdown.
#[derive(Parser, Debug)]
#[command(
    name = "html2md",
    version,
    about = "Convert edited HTML fragments to Markdown",
    after_help = "Examples:\n  \
                  echo '<h1>Hi</h1>' | html2md\n  \
                  html2md -l debug notes.html\n  \
                  html2md --legacy --fingerprint a.html b.html"
)]
struct Cli {
    /// Input files to convert (reads from stdin if not provided)
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Use the regex rewrite converter instead of the transducer
    #[arg(long)]
    legacy: bool,

    /// Reject inputs larger than this many bytes (0 = unlimited)
    #[arg(long = "max-bytes", value_name = "N")]
    max_bytes: Option<usize>,

    /// Print the content fingerprint after each document
    #[arg(long)]
    fingerprint: bool,

    /// Diagnostics written to stderr
    #[arg(short = 'l', long = "loglevel", value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

impl Cli {
    fn options(&self) -> ConversionOptions {
        let defaults = ConversionOptions::default();
        ConversionOptions {
            strategy: if self.legacy {
                ConversionStrategy::Legacy
            } else {
                ConversionStrategy::Transducer
            },
            max_input_bytes: self.max_bytes.unwrap_or(defaults.max_input_bytes),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.log_level);
    info!("html2md v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(&cli) {
        error!("{} (code {})", e, e.code());
        std::process::exit(1);
    }
}

/// Route `log` records to stderr as `html2md LEVEL message`
///
/// `RUST_LOG` still applies per module on top of the chosen level.
fn setup_logging(level: LogLevel) {
    env_logger::Builder::new()
        .filter_level(level.into())
        .parse_default_env()
        .format(|buf, record| {
            writeln!(buf, "html2md {:<5} {}", record.level(), record.args())
        })
        .init();
}

fn run(cli: &Cli) -> Result<(), ConversionError> {
    let converter = MarkdownConverter::with_options(cli.options());
    debug!("Options: {:?}", converter.options());

    let inputs = read_inputs(&cli.files)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for (index, (name, bytes)) in inputs.iter().enumerate() {
        debug!("Converting {} ({} bytes)", name, bytes.len());
        let markdown = converter.convert_bytes(bytes)?;

        if index > 0 {
            writeln!(out)?;
        }
        writeln!(out, "{}", markdown)?;
        if cli.fingerprint {
            writeln!(out, "fingerprint: {}", fingerprint(&markdown))?;
        }
    }

    out.flush()?;
    Ok(())
}

fn read_inputs(files: &[PathBuf]) -> Result<Vec<(String, Vec<u8>)>, ConversionError> {
    if files.is_empty() {
        let mut bytes = Vec::new();
        io::stdin().lock().read_to_end(&mut bytes)?;
        return Ok(vec![("<stdin>".to_string(), bytes)]);
    }

    files
        .iter()
        .map(|path| {
            let bytes = fs::read(path).map_err(|e| {
                ConversionError::Io(format!("{}: {}", path.display(), e))
            })?;
            Ok((path.display().to_string(), bytes))
        })
        .collect()
}
