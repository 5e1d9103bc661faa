//! # smartline-print
//!
//! Command-line front end: renders a заказ-наряд, dumps its totals as JSON,
//! or spells an amount in words.
//!
//! Logs go to stderr so stdout carries only the document.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use smartline_core::words::amount_in_words;
use smartline_core::{Money, WorkOrderTotals};
use smartline_print::input::{parse_payments, parse_work_order, read_source};
use smartline_print::{render_document, PrintConfig, PrintError};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "smartline-print")]
#[command(about = "Printable work orders for the Smartline installation center")]
#[command(version)]
struct Cli {
    /// TOML config file (SMARTLINE_* variables still override it)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet output (errors only)
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the printable document
    Render {
        /// Work-order JSON, `-` for stdin
        order: PathBuf,

        /// Payments JSON to add the paid / remaining block
        #[arg(long)]
        payments: Option<PathBuf>,

        /// Work-order id to pick from a list payload
        #[arg(long)]
        id: Option<i64>,
    },

    /// Print the calculated totals as JSON
    Totals {
        /// Work-order JSON, `-` for stdin
        order: PathBuf,

        /// Work-order id to pick from a list payload
        #[arg(long)]
        id: Option<i64>,
    },

    /// Spell an amount in rubles, e.g. `1234.56`
    Words {
        amount: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let config = PrintConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Commands::Render {
            order,
            payments,
            id,
        } => render(&config, &order, payments.as_deref(), id),
        Commands::Totals { order, id } => totals(&order, id),
        Commands::Words { amount } => words(&amount),
    }
}

fn render(
    config: &PrintConfig,
    order_path: &Path,
    payments_path: Option<&Path>,
    id: Option<i64>,
) -> anyhow::Result<()> {
    let order = parse_work_order(&read_source(order_path)?, id)?;
    info!(id = order.id, number = %order.number, "Loaded work order");

    if order.number.trim().is_empty() {
        warn!(
            id = order.id,
            number = %config.display_number(&order),
            "Work order has no number, printing one built from its id"
        );
    }

    let payments = payments_path
        .map(|path| read_source(path).and_then(|json| parse_payments(&json)))
        .transpose()?;
    if let Some(payments) = &payments {
        debug!(count = payments.len(), "Loaded payments");
    }

    let document = render_document(&order, config, payments.as_deref())?;
    print!("{document}");
    Ok(())
}

fn totals(order_path: &Path, id: Option<i64>) -> anyhow::Result<()> {
    let order = parse_work_order(&read_source(order_path)?, id)?;
    let totals = WorkOrderTotals::of(&order);
    debug!(
        id = order.id,
        grand_total = totals.grand_total.kopecks(),
        "Calculated totals"
    );

    println!("{}", serde_json::to_string_pretty(&totals)?);
    Ok(())
}

fn words(raw: &str) -> anyhow::Result<()> {
    let amount = raw
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .and_then(Money::from_rubles_f64)
        .ok_or_else(|| PrintError::InvalidAmount(raw.to_string()))?;

    println!("{}", amount_in_words(amount)?);
    Ok(())
}

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` wins over the flags.
fn init_tracing(verbose: bool, quiet: bool) {
    let default = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info,smartline=debug"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
