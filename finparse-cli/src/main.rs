use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use finparse_core::{Policy, PrivacyLevel, Strictness, VendorKind};
use finparse_ingest::{profiles, Pipeline, PipelineOptions, StatementOutput};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod config;
mod export;
mod input;
mod state;

use export::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "finparse", version, about = "Bank and e-wallet statement parser")]
struct Cli {
    /// Debug logging (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse statement PDFs (or text) into transaction records
    Parse {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Statement vendor: canara, gpay
        #[arg(short = 't', long)]
        vendor: VendorKind,

        /// Output format (default from config: csv)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Privacy level: full, masked, anonymized (default from config: masked)
        #[arg(short, long)]
        privacy: Option<PrivacyLevel>,

        /// Output directory (default from config: ./output)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Inputs are already-extracted UTF-8 text
        #[arg(long)]
        text: bool,

        /// Keep transactions lacking a date or amount
        #[arg(long)]
        lenient: bool,
    },

    /// List supported vendors and the fields each one redacts
    Vendors,

    /// Manage ~/.finparse/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,
    /// Print the effective config
    Show,
}

/// Resolved settings for one `parse` invocation: flags over config file.
#[derive(Debug, Clone)]
struct ParseSettings {
    vendor: VendorKind,
    options: PipelineOptions,
    format: OutputFormat,
    dir: PathBuf,
    force_text: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Parse {
            files,
            vendor,
            format,
            privacy,
            output,
            text,
            lenient,
        } => {
            let cfg = config::load_config()?;
            let settings = ParseSettings {
                vendor,
                options: PipelineOptions {
                    privacy: privacy.unwrap_or(cfg.output.privacy),
                    strictness: if lenient {
                        Strictness::Lenient
                    } else {
                        cfg.parse.strictness
                    },
                },
                format: format.unwrap_or(cfg.output.format),
                dir: output.unwrap_or(cfg.output.dir),
                force_text: text,
            };
            parse_files(files, settings).await?;
        }

        Command::Vendors => print_vendors(),

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => config::show_config()?,
        },
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    const QUIET_DEPS: &str = "pdf_extract=error,lopdf=error";
    let filter = if verbose {
        EnvFilter::new(format!("debug,{QUIET_DEPS}"))
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("info,{QUIET_DEPS}")))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// One blocking worker per file; results are reported in argument order.
async fn parse_files(files: Vec<PathBuf>, settings: ParseSettings) -> Result<()> {
    let total = files.len();
    let mut workers = Vec::with_capacity(total);
    for path in files {
        let worker = tokio::task::spawn_blocking({
            let path = path.clone();
            let settings = settings.clone();
            move || parse_one(&path, &settings)
        });
        workers.push((path, worker));
    }

    let mut failed = 0;
    for (path, worker) in workers {
        let result = worker
            .await
            .with_context(|| format!("worker for {}", path.display()))
            .and_then(|r| r)
            .and_then(|out| report(&path, &out, &settings));
        if let Err(e) = result {
            tracing::error!(path = %path.display(), "{e:#}");
            failed += 1;
        }
    }

    if failed > 0 {
        bail!("{failed} of {total} statement(s) failed");
    }
    Ok(())
}

fn parse_one(path: &Path, settings: &ParseSettings) -> Result<StatementOutput> {
    let pages = input::read_statement(path, settings.force_text)?;
    Ok(Pipeline::new(settings.vendor, settings.options).run(&pages))
}

fn report(path: &Path, out: &StatementOutput, settings: &ParseSettings) -> Result<()> {
    let diag = &out.diagnostics;
    if diag.rejected() > 0 {
        tracing::info!(
            path = %path.display(),
            rejected = diag.rejected(),
            anomalies = diag.anomalies.len(),
            "some blocks were skipped (use --verbose for details)"
        );
    }
    if diag.no_transactions() {
        tracing::warn!(
            path = %path.display(),
            vendor = %settings.vendor,
            "No transactions found"
        );
        return Ok(());
    }

    match export::export(&out.records, path, &settings.dir, settings.format)? {
        Some(written) => println!(
            "Parsed {} transactions from {} -> {}",
            out.records.len(),
            path.display(),
            written.display()
        ),
        None => println!("Parsed {} transactions from {}", out.records.len(), path.display()),
    }
    Ok(())
}

fn print_vendors() {
    for profile in profiles() {
        let fields: Vec<String> = profile
            .sensitivity
            .rules()
            .iter()
            .map(|(field, policy)| {
                let action = match policy {
                    Policy::Drop => "drop",
                    Policy::Mask => "mask",
                };
                format!("{}={action}", field.as_str())
            })
            .collect();
        println!("{:<8} {}", profile.kind.name(), fields.join(", "));
    }
}
