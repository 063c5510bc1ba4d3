mod commands;
mod ui;

use clap::{Parser, Subcommand};
use commands::validate::KindArg;
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "promscan")]
#[command(about = "Inventory PromQL metric and label usage across observability config backups", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable quiet mode (errors only)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a backup directory and print the metric usage inventory
    Scan {
        /// Directory containing dashboards/, monitors/ and slos/ subdirectories
        backup_dir: PathBuf,

        /// Print one line per (source, metric, labels) occurrence
        #[arg(short, long)]
        provenance: bool,

        /// Export the full report as JSON
        #[arg(long)]
        output_json: Option<PathBuf>,

        /// Export the report as Markdown
        #[arg(short = 'm', long)]
        output_markdown: Option<PathBuf>,

        /// Scan settings file (TOML)
        #[arg(short, long)]
        settings: Option<PathBuf>,
    },

    /// Validate a single source document and show what a scan would see
    Validate {
        /// Path to the document (JSON or YAML)
        file: PathBuf,

        /// Document kind
        #[arg(short, long, value_enum)]
        kind: KindArg,
    },

    /// Render a previously exported report
    Report {
        /// Path to a report produced by `scan --output-json`
        report_file: PathBuf,

        /// Output format (cli, json, markdown, prometheus)
        #[arg(short, long, default_value = "cli")]
        format: String,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Normalize one expression and show its extracted selectors
    Normalize {
        /// Raw templated expression
        expression: String,

        /// Dashboard file supplying document variables
        #[arg(short, long)]
        dashboard: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Scan {
            backup_dir,
            provenance,
            output_json,
            output_markdown,
            settings,
        } => {
            commands::scan::execute(backup_dir, provenance, output_json, output_markdown, settings)
                .await?;
        }

        Commands::Validate { file, kind } => {
            commands::validate::execute(file, kind.into()).await?;
        }

        Commands::Report {
            report_file,
            format,
            output,
        } => {
            commands::report::execute(report_file, format, output).await?;
        }

        Commands::Normalize {
            expression,
            dashboard,
        } => {
            commands::normalize::execute(expression, dashboard).await?;
        }
    }

    Ok(())
}
