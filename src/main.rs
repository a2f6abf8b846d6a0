//! Tagsum CLI
//!
//! Sums numbers extracted from text lines per tag, e.g. total sizes of
//! file groups from `ls` output.

use anyhow::Result;
use clap::{ArgAction, Parser};
use env_logger::Env;
use std::io;
use std::path::PathBuf;

use tagsum::commands::{display_patterns, execute_sum, validate_args, SumArgs};
use tagsum::pattern::default_patterns;
use tagsum::report::SortField;
use tagsum::utils::config::{RunConfig, KILO_FACTOR, STDIN_SOURCE};

const AFTER_HELP: &str = "\
OUTPUT: [sum] [human readable size] [number of occurrences] [tag]

Examples:
  ls -l | tagsum
  ls -Rs1 | tagsum -k
  tagsum -p '(?P<k>\\w+)=(?P<v>\\d+)' -s count -r -t 10 app.log";

/// Tagsum - per-tag sums of counters found in text
#[derive(Parser, Debug)]
#[command(name = "tagsum")]
#[command(version, about, long_about = None, after_help = AFTER_HELP)]
struct Cli {
    /// Input files (default: stdin, also `-`)
    #[arg(value_name = "FILE")]
    files: Vec<String>,

    /// Input file, may be repeated
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    input: Vec<String>,

    /// Parsing pattern, may be repeated (named groups `k` and `v` pick key and value)
    #[arg(short, long = "pattern", value_name = "REGEX")]
    patterns: Vec<String>,

    /// Counter factor: every value is multiplied by F
    #[arg(long, value_name = "F", default_value_t = 1, allow_negative_numbers = true)]
    factor: i64,

    /// 1K blocks, same as --factor=1024
    #[arg(short = 'k')]
    kilo: bool,

    /// Show only the N top lines per pattern (<= 0 shows all)
    #[arg(short, long, value_name = "N", default_value_t = -1, allow_negative_numbers = true)]
    top: i64,

    /// Sort field: sum (1), count (2), ratio (3), max (4) or none (0)
    #[arg(short, long, value_name = "FIELD", default_value = "sum")]
    sort: SortField,

    /// Reverse sorting
    #[arg(short, long)]
    reverse: bool,

    /// Lower-case all tags for case-insensitive sums
    #[arg(short, long)]
    lower: bool,

    /// Skip patterns that matched nothing
    #[arg(short = 'e', long)]
    skip_empty: bool,

    /// Ignore errors (use --ignore=false for strict mode)
    #[arg(
        short,
        long,
        value_name = "BOOL",
        default_value_t = true,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    ignore: bool,

    /// Verbose output with per-pattern headers (--verbose=false for rows only)
    #[arg(
        short,
        long,
        value_name = "BOOL",
        default_value_t = true,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    verbose: bool,

    /// Also write the report as JSON
    #[arg(long, value_name = "PATH")]
    json: Option<PathBuf>,

    /// Print the default patterns and exit
    #[arg(long)]
    list_patterns: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

impl Cli {
    fn into_args(self) -> SumArgs {
        // -f files first, then positional ones
        let mut sources = self.input;
        sources.extend(self.files);
        if sources.is_empty() {
            sources.push(STDIN_SOURCE.to_string());
        }

        let patterns = if self.patterns.is_empty() {
            default_patterns()
        } else {
            self.patterns
        };

        let factor = if self.kilo { KILO_FACTOR } else { self.factor };

        SumArgs {
            config: RunConfig {
                patterns,
                sources,
                factor,
                top: self.top,
                sort: self.sort,
                reverse: self.reverse,
                lower: self.lower,
                skip_empty: self.skip_empty,
                ignore_errors: self.ignore,
                verbose: self.verbose,
            },
            json_output: self.json,
        }
    }
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    if cli.list_patterns {
        display_patterns();
        return Ok(());
    }

    let args = cli.into_args();

    // Validate args first
    validate_args(&args)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute_sum(&args, &mut out)?;

    Ok(())
}
