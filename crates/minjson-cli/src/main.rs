//! `minjson` CLI: validate, normalize and encode documents from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Validate a document and print a summary (stdin -> stdout)
//! echo '{"name":"Alice","age":30}' | minjson check
//!
//! # Re-serialize compactly, file to file
//! minjson fmt -i data.json -o data.min.json
//!
//! # Push arbitrary JSON through the restricted writer
//! echo '{"tags":["a"]}' | minjson encode   # fails: unsupported value type: list
//!
//! # Tighter limits for untrusted input, with debug logging
//! minjson --strict --max-depth 16 -v check -i untrusted.json
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use minjson_core::Options;
use std::io::{self, IsTerminal, Read};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "minjson",
    version,
    about = "Restricted JSON codec: objects, strings and big integers"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Maximum object nesting depth (default 512, or 128 with --strict)
    #[arg(long, global = true)]
    max_depth: Option<usize>,

    /// Reject lone surrogate escapes and lower the default depth limit
    #[arg(long, global = true)]
    strict: bool,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a document and print a summary of its contents
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Parse a document and write it back in compact form
    Fmt {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Read any JSON and serialize it with the restricted writer
    Encode {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let opts = build_options(cli.max_depth, cli.strict);
    tracing::debug!(max_depth = opts.max_depth, surrogates = ?opts.surrogates, "options");

    match cli.command {
        Commands::Check { input } => {
            let bytes = read_input(input.as_deref())?;
            let value = minjson_core::loads_bytes_with(&bytes, &opts)
                .context("Failed to parse document")?;
            let stats = value.stats();
            println!(
                "ok: {} keys, depth {}, {} ints, {} floats, {} strings",
                stats.keys, stats.depth, stats.ints, stats.floats, stats.strings
            );
        }
        Commands::Fmt { input, output } => {
            let bytes = read_input(input.as_deref())?;
            let value = minjson_core::loads_bytes_with(&bytes, &opts)
                .context("Failed to parse document")?;
            let text =
                minjson_core::dumps_with(&value, &opts).context("Failed to serialize document")?;
            write_output(output.as_deref(), &text)?;
        }
        Commands::Encode { input, output } => {
            let bytes = read_input(input.as_deref())?;
            let json: serde_json::Value =
                serde_json::from_slice(&bytes).context("Input is not valid JSON")?;
            let text = minjson_core::dumps_json_with(&json, &opts)
                .context("Failed to encode JSON with the restricted writer")?;
            write_output(output.as_deref(), &text)?;
        }
    }

    Ok(())
}

/// Resolve codec options from the global flags.
///
/// - `--strict` starts from `Options::strict()` instead of the defaults
/// - `--max-depth` overrides the preset's depth either way
fn build_options(max_depth: Option<usize>, strict: bool) -> Options {
    let opts = if strict {
        Options::strict()
    } else {
        Options::default()
    };
    match max_depth {
        Some(depth) => opts.with_max_depth(depth),
        None => opts,
    }
}

/// Log to stderr so stdout stays clean for document output.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();
}

fn read_input(path: Option<&str>) -> Result<Vec<u8>> {
    match path {
        Some(path) => std::fs::read(path).with_context(|| format!("Failed to read file: {}", path)),
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
