//! SettleUp command line tool.
//!
//! Settles JSON ledgers and verifies settlement plans without a server.

mod document;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use rayon::prelude::*;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use document::{ComputeOptions, LedgerDocument, PlanDocument};
use settleup_shared::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "settleup")]
#[command(about = "Compute who owes whom from a shared-expense ledger")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute balances and settlements for one or more ledger files.
    Compute(ComputeArgs),
    /// Check that a settlement plan resolves its balances.
    Verify(VerifyArgs),
}

#[derive(Args, Debug)]
struct ComputeArgs {
    /// Ledger JSON files; each is settled independently.
    #[arg(required = true)]
    files: Vec<PathBuf>,
    /// Include the optimizer's matching steps.
    #[arg(long)]
    trace: bool,
    /// Include split warnings.
    #[arg(long)]
    warnings: bool,
    /// Include per-participant paid/owed totals.
    #[arg(long)]
    summaries: bool,
    /// Fail if any split does not add up.
    #[arg(long)]
    strict: bool,
    /// Pretty-print the JSON output.
    #[arg(long, env = "SETTLEUP_PRETTY")]
    pretty: bool,
}

#[derive(Args, Debug)]
struct VerifyArgs {
    /// Plan JSON file with `balances` and `settlements`.
    file: PathBuf,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "settleup=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Compute(args) => run_compute(&args),
        Command::Verify(args) => run_verify(&args),
    }
}

fn read(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn run_compute(args: &ComputeArgs) -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    let options = ComputeOptions {
        trace: args.trace,
        warnings: args.warnings,
        summaries: args.summaries,
        strict: args.strict,
    };

    let outputs: Vec<_> = args
        .files
        .par_iter()
        .map(|path| {
            let name = path.display().to_string();
            let ledger = LedgerDocument::parse(&read(path)?)
                .with_context(|| format!("{name}: cannot parse"))?;
            debug!(file = %name, transactions = ledger.transactions().len(), "Loaded ledger");
            document::compute(&name, &ledger, &config.limits, options)
        })
        .collect::<anyhow::Result<_>>()?;

    for output in &outputs {
        info!(
            file = %output.file,
            settlements = output.report.optimized_transaction_count,
            "Settled ledger"
        );
        let json = if args.pretty {
            serde_json::to_string_pretty(output)?
        } else {
            serde_json::to_string(output)?
        };
        println!("{json}");
    }

    Ok(())
}

fn run_verify(args: &VerifyArgs) -> anyhow::Result<()> {
    let name = args.file.display().to_string();
    let plan = PlanDocument::parse(&read(&args.file)?)?;
    let output = document::verify(&name, &plan);

    println!("{}", serde_json::to_string(&output)?);

    if !output.valid {
        warn!(file = %name, "Settlement plan does not resolve all balances");
        anyhow::bail!("{name}: settlement plan does not resolve all balances");
    }
    Ok(())
}
