//! depscan: pull insurance deposit lines out of bank statement PDFs.
//!
//! Usage:
//!   depscan parse "Kearny June.pdf"        JSON report for one statement
//!   depscan parse a.pdf b.pdf --csv out.csv  merged report plus CSV export
//!   depscan parse a.pdf --sheet sheet.csv    rows grouped by date for the books
//!   depscan config init                    write ~/.depscan/config.toml
//!   depscan doctor                         check poppler / tesseract

use anyhow::{Context, Result, bail};
use chrono::Datelike;
use clap::{Parser, Subcommand, ValueEnum};
use depscan_core::{DepositRecord, ErrorReport};
use depscan_finance::{
    DepositParser, DescriptionStyle, SortDirection, SortField, merge_reports, sort_deposits,
    write_csv, write_sheet_rows,
};
use serde::Serialize;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod config;
mod pipeline;
mod state;

use config::Config;
use pipeline::{InputKind, process_statement};

#[derive(Parser, Debug)]
#[command(name = "depscan", version, about = "Extract insurance deposits from bank statement PDFs")]
struct Cli {
    /// Debug logging on stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (default: ~/.depscan/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse one or more statements and print a JSON report
    Parse(ParseArgs),

    /// Config file management
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Report which external tools are available
    Doctor,
}

#[derive(clap::Args, Debug)]
struct ParseArgs {
    /// Statement PDFs (or text files with --from-text)
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Filename used for office detection (single input only)
    #[arg(long)]
    name: Option<String>,

    /// Inputs are already-extracted text, not PDFs
    #[arg(long)]
    from_text: bool,

    /// Never fall back to OCR
    #[arg(long)]
    no_ocr: bool,

    /// Keep statement text as the description instead of normalizing it
    #[arg(long)]
    raw_descriptions: bool,

    /// Also report Synchrony financing deposits
    #[arg(long)]
    include_financing: bool,

    /// Also report plain teller/mobile deposits
    #[arg(long)]
    include_regular: bool,

    /// Sort deposits before printing
    #[arg(long, value_enum)]
    sort: Option<SortArg>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    desc: bool,

    /// Also write deposits as CSV to this path
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Also write date-grouped bookkeeping rows (CSV) to this path
    #[arg(long)]
    sheet: Option<PathBuf>,

    /// Year for sheet date headers (default: current year)
    #[arg(long, requires = "sheet")]
    year: Option<i32>,

    /// Pretty-print JSON
    #[arg(long)]
    pretty: bool,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config file if none exists
    Init,
    /// Print the effective config
    Show,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum SortArg {
    Date,
    Description,
    Amount,
}

impl From<SortArg> for SortField {
    fn from(s: SortArg) -> Self {
        match s {
            SortArg::Date => SortField::Date,
            SortArg::Description => SortField::Description,
            SortArg::Amount => SortField::Amount,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG > --verbose > warn. Logs go to stderr, stdout is JSON.
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();

    match cli.command {
        Command::Parse(args) => {
            if let Err(e) = run_parse(&args, cli.config.as_deref()) {
                print_json(&parse_failure(&e), false)?;
                std::process::exit(1);
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config(cli.config.as_deref())?,
            ConfigCommand::Show => {
                let cfg = config::load_config(cli.config.as_deref())?;
                print!("{}", config::render_config(&cfg)?);
            }
        },

        Command::Doctor => {
            let cfg = config::load_config(cli.config.as_deref())?;
            let mut missing = 0;
            for (tool, found) in cfg.tools.probe() {
                match found {
                    Some(path) => println!("ok       {tool:<10} {}", path.display()),
                    None => {
                        missing += 1;
                        println!("missing  {tool}");
                    }
                }
            }
            if missing > 0 {
                println!(
                    "\npdftotext is required; pdftoppm + tesseract are needed for scanned pages."
                );
            }
        }
    }

    Ok(())
}

/// Fold command-line flags into the loaded config
fn apply_flags(cfg: &mut Config, args: &ParseArgs) {
    if args.no_ocr {
        cfg.ocr.enabled = false;
    }
    if args.raw_descriptions {
        cfg.parse.description_style = DescriptionStyle::Raw;
    }
    if args.include_financing {
        cfg.parse.rules.include_financing = true;
    }
    if args.include_regular {
        cfg.parse.rules.include_regular = true;
    }
    if args.pretty {
        cfg.output.pretty = true;
    }
}

fn run_parse(args: &ParseArgs, config_path: Option<&Path>) -> Result<()> {
    if args.name.is_some() && args.files.len() > 1 {
        bail!("--name only applies to a single input");
    }

    let mut cfg = config::load_config(config_path)?;
    apply_flags(&mut cfg, args);

    let parser = DepositParser::new(cfg.parse).context("build deposit parser")?;
    let kind = if args.from_text {
        InputKind::Text
    } else {
        InputKind::Pdf
    };

    let mut reports = Vec::with_capacity(args.files.len());
    for file in &args.files {
        let report = process_statement(file, args.name.as_deref(), kind, &cfg, &parser)
            .with_context(|| format!("{}", file.display()))?;
        reports.push(report);
    }

    let direction = if args.desc {
        SortDirection::Desc
    } else {
        SortDirection::Asc
    };

    if reports.len() == 1 {
        let mut report = reports.remove(0);
        finish(&mut report.deposits, args, direction)?;
        print_json(&report, cfg.output.pretty)
    } else {
        let mut merged = merge_reports(reports);
        finish(&mut merged.deposits, args, direction)?;
        print_json(&merged, cfg.output.pretty)
    }
}

/// Body printed on stdout when `parse` fails
fn parse_failure(err: &anyhow::Error) -> ErrorReport {
    error!("{err:#}");
    ErrorReport::processing_failed(format!("{err:#}"))
}

/// Sort and export, shared by single and merged output
fn finish(
    deposits: &mut [DepositRecord],
    args: &ParseArgs,
    direction: SortDirection,
) -> Result<()> {
    if let Some(field) = args.sort {
        sort_deposits(deposits, field.into(), direction);
    }
    if let Some(path) = &args.csv {
        let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
        write_csv(deposits, file).with_context(|| format!("write {}", path.display()))?;
    }
    if let Some(path) = &args.sheet {
        let year = args.year.unwrap_or_else(|| chrono::Local::now().year());
        let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
        write_sheet_rows(deposits, year, file)
            .with_context(|| format!("write {}", path.display()))?;
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{out}");
    Ok(())
}
