//! CLI entry point for the docgrid document auditor.
//!
//! This binary serves the month × category completeness grid over HTTP and
//! prints or exports the same report from the command line.
//!
//! # Usage
//!
//! ```bash
//! docgrid [OPTIONS] <COMMAND>
//!
//! # Serve the grid UI and API
//! docgrid --config config.json serve
//!
//! # Scan one grid and show the table
//! docgrid scan --type support --detailed
//!
//! # Export a report
//! docgrid report --format csv --output status.csv
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

mod output;

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{WrapErr, eyre};
use dg_core::{Config, GridConfig};
use dg_scanner::{ScanOutcome, Scanner, write_csv};
use dg_server::{AppState, build_router, shutdown_signal};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// CLI ARGUMENT TYPES
// =============================================================================

/// Audits dated document folders as a month × category completeness grid.
///
/// Files named `YYYYMM_<category>.<ext>` are placed on a gap-free month
/// axis; every cell shows whether its document is missing, present, or
/// duplicated.
#[derive(Parser)]
#[command(name = "docgrid", version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    command: Commands,

    /// Path to the JSON configuration file.
    #[arg(
        short,
        long,
        global = true,
        env = "DOCGRID_CONFIG",
        default_value = "config.json"
    )]
    config: Utf8PathBuf,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,

    /// Append logs to this file (overrides `log.file`).
    #[arg(long, global = true, env = "DOCGRID_LOG_FILE")]
    log_file: Option<Utf8PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Serve the grid UI, status API, and file viewer.
    Serve {
        /// Address to bind (overrides `server.bind`).
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Scan one grid and display its table.
    Scan {
        /// Grid name (defaults to the first configured grid).
        #[arg(short = 't', long = "type")]
        grid: Option<String>,

        /// List cells needing attention and unprocessed files.
        #[arg(short, long)]
        detailed: bool,
    },

    /// Generate a report for one grid.
    Report {
        /// Grid name (defaults to the first configured grid).
        #[arg(short = 't', long = "type")]
        grid: Option<String>,

        /// Output format.
        #[arg(short, long, value_enum, default_value_t = ReportFormat::Json)]
        format: ReportFormat,

        /// Output file (defaults to stdout).
        #[arg(short, long)]
        output: Option<Utf8PathBuf>,
    },
}

/// Report output format.
#[derive(Clone, Copy, ValueEnum)]
enum ReportFormat {
    /// The `/api/status` JSON document.
    Json,
    /// One row per period and category.
    Csv,
}

// =============================================================================
// INITIALIZATION FUNCTIONS
// =============================================================================

/// Initializes the tracing subscriber for logging.
///
/// Respects the `RUST_LOG` environment variable if set. Otherwise, uses
/// `debug` level if `--verbose` is set, or `info` level by default.
/// Noisy crates like `hyper` and `mio` are filtered to `warn` level.
///
/// When `log_file` is set, the same events are appended to it without ANSI
/// colors. The returned guard flushes that file and must live until exit.
fn init_tracing(
    verbose: bool,
    no_color: bool,
    log_file: Option<&Utf8Path>,
) -> color_eyre::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "info" };
        EnvFilter::new(format!("{level},hyper=warn,mio=warn"))
    });

    // Check if colors should be disabled (flag or NO_COLOR env var)
    let use_ansi = !no_color && std::env::var("NO_COLOR").is_err();

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let file_name = path
                .file_name()
                .ok_or_else(|| eyre!("log file path has no file name: {path}"))?;
            let dir = path
                .parent()
                .filter(|p| !p.as_str().is_empty())
                .unwrap_or_else(|| Utf8Path::new("."));
            std::fs::create_dir_all(dir)
                .wrap_err_with(|| format!("cannot create log directory {dir}"))?;

            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_ansi(use_ansi))
        .with(file_layer)
        .with(filter)
        .init();

    Ok(guard)
}

/// Loads and validates the configuration file.
fn load_config(path: &Utf8Path) -> color_eyre::Result<Config> {
    Config::load(path).wrap_err_with(|| format!("cannot load configuration from {path}"))
}

/// Picks a grid by name, or the first grid when `name` is `None`.
fn select_grid<'a>(config: &'a Config, name: Option<&str>) -> color_eyre::Result<&'a GridConfig> {
    config.grid(name).ok_or_else(|| {
        let known: Vec<&str> = config.grids.iter().map(|g| g.name.as_str()).collect();
        eyre!(
            "unknown grid '{}' (configured: {})",
            name.unwrap_or_default(),
            known.join(", ")
        )
    })
}

/// Builds a scanner for one grid and runs it.
fn scan_grid(grid: &GridConfig) -> color_eyre::Result<ScanOutcome> {
    let scanner = Scanner::new(grid.clone())?;
    scanner
        .scan()
        .wrap_err_with(|| format!("cannot scan grid '{}' at {}", grid.name, grid.root))
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

/// Serves the HTTP application until Ctrl-C or SIGTERM.
async fn run_serve(mut config: Config, bind: Option<String>) -> color_eyre::Result<()> {
    if let Some(bind) = bind {
        config.server.bind = bind;
    }
    let addr = config.server.bind.clone();
    let grids: Vec<String> = config.grids.iter().map(|g| g.name.clone()).collect();

    let state = AppState::new(config)?;
    let base_path = state.base_path().to_owned();
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .wrap_err_with(|| format!("cannot bind {addr}"))?;
    info!(
        addr = %listener.local_addr()?,
        base_path = %base_path,
        grids = ?grids,
        "listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shut down");
    Ok(())
}

/// Runs a one-shot scan with summary and table output.
fn run_scan(config: &Config, grid: Option<&str>, detailed: bool) -> color_eyre::Result<()> {
    let grid = select_grid(config, grid)?;
    info!(grid = %grid.name, root = %grid.root, "starting scan");

    let outcome = scan_grid(grid)?;

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    output::write_summary(&mut handle, &grid.label, &outcome.summary)?;
    output::write_grid(&mut handle, &outcome.report)?;
    if detailed {
        output::write_details(&mut handle, &outcome.report)?;
    }
    handle.flush()?;

    Ok(())
}

/// Generates a report in the specified format.
fn run_report(
    config: &Config,
    grid: Option<&str>,
    format: ReportFormat,
    output: Option<&Utf8Path>,
) -> color_eyre::Result<()> {
    let grid = select_grid(config, grid)?;
    info!(grid = %grid.name, root = %grid.root, "generating report");

    let outcome = scan_grid(grid)?;

    let content = match format {
        ReportFormat::Json => {
            let mut json = serde_json::to_vec_pretty(&outcome.report)?;
            json.push(b'\n');
            json
        }
        ReportFormat::Csv => {
            let mut csv = Vec::new();
            write_csv(&outcome.report, &mut csv)?;
            csv
        }
    };

    if let Some(path) = output {
        std::fs::write(path, &content).wrap_err_with(|| format!("cannot write {path}"))?;
        info!(path = %path, "report written");
    } else {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        handle.write_all(&content)?;
        handle.flush()?;
    }

    Ok(())
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Application entry point.
#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    // 1. Install color-eyre FIRST (before any potential panics)
    color_eyre::install()?;

    // 2. Parse CLI arguments
    let cli = Cli::parse();

    // 3. Load configuration; it may name the log file
    let config = load_config(&cli.config)?;

    // 4. Initialize tracing; the guard flushes the log file on exit
    let log_file = cli.log_file.as_deref().or(config.log.file.as_deref());
    let _log_guard = init_tracing(cli.verbose, cli.no_color, log_file)?;

    // 5. Route to appropriate command
    match cli.command {
        Commands::Serve { bind } => run_serve(config, bind).await,
        Commands::Scan { grid, detailed } => run_scan(&config, grid.as_deref(), detailed),
        Commands::Report {
            grid,
            format,
            output,
        } => run_report(&config, grid.as_deref(), format, output.as_deref()),
    }
}
