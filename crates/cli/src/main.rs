// nplb - extract NPL, KOL2 and realisasi report tables and publish them
// for the dashboards

mod exit_codes;
mod parse;
mod seed;
mod status;
mod upload;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::LevelFilter;
use nplboard_extract::{ExtractConfig, ReportKind};
use serde::Serialize;

use exit_codes::{EXIT_CONFIG, EXIT_DECODE, EXIT_IO, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "nplb")]
#[command(about = "Extract bank report tables from PDF or Excel and publish them for the dashboards")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    /// Log extraction decisions to stderr (overrides RUST_LOG with debug)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract and publish one or more reports
    #[command(after_help = "\
Examples:
  nplb upload --npl npl-des.pdf --kol2 kol2-des.pdf --realisasi realisasi-jan.pdf
  nplb upload --kol2 kol2-des.xlsx --config kanwil.toml --store ./public
  NPLB_STORE=/srv/dashboard nplb upload --realisasi realisasi.pdf

Each report is published independently. Reports not given keep the
data they already have.")]
    Upload {
        /// NPL report (.pdf, .xlsx, .xls, .ods or .txt)
        #[arg(long)]
        npl: Option<PathBuf>,

        /// KOL2 report
        #[arg(long)]
        kol2: Option<PathBuf>,

        /// Realisasi (daily disbursement) report
        #[arg(long)]
        realisasi: Option<PathBuf>,

        /// Extraction config (regions, markers, sheet layouts)
        #[arg(long, env = "NPLB_CONFIG", default_value = "nplboard.toml")]
        config: PathBuf,

        /// Directory the dashboards read artifacts from
        #[arg(long, env = "NPLB_STORE", default_value = "public")]
        store: PathBuf,
    },

    /// Extract one report and print its table as JSON without publishing
    #[command(after_help = "\
Examples:
  nplb parse npl npl-des.pdf
  nplb parse realisasi realisasi.xlsx -o realisasi.json
  nplb parse kol2 kol2.txt --config kanwil.toml -v")]
    Parse {
        /// Report kind: npl, kol2 or realisasi
        kind: ReportKind,

        /// Report file
        file: PathBuf,

        #[arg(long, env = "NPLB_CONFIG", default_value = "nplboard.toml")]
        config: PathBuf,

        /// Write JSON to file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Show the metadata each report kind currently publishes
    #[command(after_help = "\
Examples:
  nplb status
  nplb status --store /srv/dashboard

Kinds with nothing published yet print as null.")]
    Status {
        #[arg(long, env = "NPLB_STORE", default_value = "public")]
        store: PathBuf,
    },

    /// Publish a placeholder NPL or KOL2 table from branch totals
    #[command(after_help = "\
Examples:
  nplb seed npl branches.csv
  nplb seed kol2 branches.csv --kumk-share 0.6

The CSV needs the columns region,name,total,totalPercent. KUMK and KUR
are split from the total by --kumk-share; regions and the national total
are aggregated from the branches.")]
    Seed {
        /// Report kind: npl or kol2
        kind: ReportKind,

        /// CSV of branch totals
        branches: PathBuf,

        /// Share of each total assigned to KUMK; KUR gets the rest
        #[arg(long, default_value_t = 0.55)]
        kumk_share: f64,

        #[arg(long, env = "NPLB_STORE", default_value = "public")]
        store: PathBuf,
    },
}

fn long_version() -> &'static str {
    if cfg!(debug_assertions) {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nengine:  nplboard-extract ", env!("CARGO_PKG_VERSION"),
            "\nbuild:   debug",
            "\ntarget:  ", env!("TARGET"),
        )
    } else {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nengine:  nplboard-extract ", env!("CARGO_PKG_VERSION"),
            "\nbuild:   release",
            "\ntarget:  ", env!("TARGET"),
        )
    }
}

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Upload { npl, kol2, realisasi, config, store } => {
            let inputs: Vec<(ReportKind, PathBuf)> = [
                (ReportKind::Npl, npl),
                (ReportKind::Kol2, kol2),
                (ReportKind::Realisasi, realisasi),
            ]
            .into_iter()
            .filter_map(|(kind, path)| path.map(|p| (kind, p)))
            .collect();
            upload::cmd_upload(inputs, &config, &store)
        }
        Commands::Parse { kind, file, config, output } => parse::cmd_parse(kind, &file, &config, output.as_deref()),
        Commands::Status { store } => status::cmd_status(&store),
        Commands::Seed { kind, branches, kumk_share, store } => seed::cmd_seed(kind, &branches, kumk_share, &store),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn usage(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO, message: msg.into(), hint: None }
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self { code: EXIT_DECODE, message: msg.into(), hint: None }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self { code: EXIT_CONFIG, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Read and validate the extraction config.
pub(crate) fn load_config(path: &Path) -> Result<ExtractConfig, CliError> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        CliError::config(format!("cannot read config {}: {e}", path.display()))
            .with_hint("pass --config or set NPLB_CONFIG")
    })?;
    ExtractConfig::from_toml(&text).map_err(|e| CliError::config(e.to_string()))
}

/// Pretty JSON to `output`, or to stdout as a single value.
pub(crate) fn emit_json<T: Serialize>(value: &T, output: Option<&Path>) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("JSON serialization error: {e}")))?;
    match output {
        Some(path) => {
            std::fs::write(path, format!("{json}\n"))
                .map_err(|e| CliError::io(format!("cannot write output: {e}")))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
