//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::identity_corrections::IdentityCorrectionAdapter;
use crate::adapters::text_report_adapter::TextReportAdapter;
use crate::domain::corrections::{correct_transactions, Corrections};
use crate::domain::error::LedgerError;
use crate::domain::matcher::{match_events, MatchOutcome};
use crate::domain::merge::merge_events;
use crate::domain::report::LedgerReport;
use crate::ports::config_port::ConfigPort;
use crate::ports::correction_port::CorrectionPort;
use crate::ports::report_port::ReportPort;
use crate::ports::transaction_port::TransactionPort;

#[derive(Parser, Debug)]
#[command(name = "lotledger", about = "Realized capital-gains ledger")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute realized gains and print the full ledger report
    Report {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Skip network lookups (no symbol renames, no split corrections)
        #[arg(long)]
        offline: bool,
    },
    /// Show still-open lots only
    Lots {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        offline: bool,
    },
    /// Validate the config and transaction files without computing anything
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Report {
            config,
            output,
            offline,
        } => run_report(&config, output.as_ref(), offline),
        Command::Lots { config, offline } => run_lots(&config, offline),
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = LedgerError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

fn build_csv_adapter(config: &dyn ConfigPort) -> Result<CsvAdapter, LedgerError> {
    let stocks_csv =
        config
            .get_string("data", "stocks_csv")
            .ok_or_else(|| LedgerError::ConfigMissing {
                section: "data".into(),
                key: "stocks_csv".into(),
            })?;
    let options_csv =
        config
            .get_string("data", "options_csv")
            .ok_or_else(|| LedgerError::ConfigMissing {
                section: "data".into(),
                key: "options_csv".into(),
            })?;
    Ok(CsvAdapter::new(
        PathBuf::from(stocks_csv),
        PathBuf::from(options_csv),
    ))
}

/// Fetch, correct, merge, match. The whole computation behind every
/// subcommand that produces numbers.
pub fn run_ledger_pipeline(
    transactions: &dyn TransactionPort,
    correction_port: &dyn CorrectionPort,
) -> Result<MatchOutcome, LedgerError> {
    let stocks = transactions.fetch_stock_transactions()?;
    let options = transactions.fetch_option_transactions()?;
    eprintln!(
        "Loaded {} stock and {} option transactions",
        stocks.len(),
        options.len()
    );

    let mut corrections = Corrections::new(correction_port);
    let (stocks, options) = correct_transactions(&mut corrections, stocks, options)?;

    let merged = merge_events(stocks, options);
    eprintln!("Matching {} merged events", merged.len());
    Ok(match_events(&merged))
}

fn compute_outcome(config_path: &PathBuf, offline: bool) -> Result<MatchOutcome, ExitCode> {
    eprintln!("Loading config from {}", config_path.display());
    let config = load_config(config_path)?;

    let adapter = build_csv_adapter(&config).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })?;

    let offline = offline || config.get_bool("corrections", "offline", false);
    let outcome = run_with_corrections(&adapter, offline);
    outcome.map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })
}

#[cfg(feature = "fetch")]
fn run_with_corrections(
    transactions: &dyn TransactionPort,
    offline: bool,
) -> Result<MatchOutcome, LedgerError> {
    if offline {
        eprintln!("Running offline: symbols and splits left uncorrected");
        let corrections = IdentityCorrectionAdapter::new();
        return run_ledger_pipeline(transactions, &corrections);
    }
    let corrections = crate::adapters::fetch_corrections::HttpCorrectionAdapter::new()?;
    run_ledger_pipeline(transactions, &corrections)
}

#[cfg(not(feature = "fetch"))]
fn run_with_corrections(
    transactions: &dyn TransactionPort,
    offline: bool,
) -> Result<MatchOutcome, LedgerError> {
    if !offline {
        eprintln!("warning: built without the fetch feature, running offline");
    }
    let corrections = IdentityCorrectionAdapter::new();
    run_ledger_pipeline(transactions, &corrections)
}

fn run_report(config_path: &PathBuf, output_path: Option<&PathBuf>, offline: bool) -> ExitCode {
    let outcome = match compute_outcome(config_path, offline) {
        Ok(o) => o,
        Err(code) => return code,
    };

    eprintln!(
        "Matched: {} profit events, {} tickers with open lots",
        outcome.profits.len(),
        outcome.open_lots.len()
    );

    let report = LedgerReport::compute(&outcome);
    let renderer = TextReportAdapter::new();

    match output_path {
        Some(path) => match renderer.write(&report, path) {
            Ok(()) => {
                eprintln!("Report written to: {}", path.display());
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("error: failed to write report: {e}");
                ExitCode::from(&e)
            }
        },
        None => {
            print!("{}", renderer.render(&report));
            ExitCode::SUCCESS
        }
    }
}

fn run_lots(config_path: &PathBuf, offline: bool) -> ExitCode {
    let outcome = match compute_outcome(config_path, offline) {
        Ok(o) => o,
        Err(code) => return code,
    };

    let report = LedgerReport::compute(&outcome);
    if report.open_lots.is_empty() {
        eprintln!("No open lots.");
        return ExitCode::SUCCESS;
    }
    for lot in &report.open_lots {
        println!(
            "{},{},{},{},{}",
            lot.ticker, lot.quantity, lot.unit_cost, lot.acquired_at, lot.tag
        );
    }
    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let adapter = match build_csv_adapter(&config) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(&e);
        }
    };

    let stocks = match adapter.fetch_stock_transactions() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(&e);
        }
    };
    let options = match adapter.fetch_option_transactions() {
        Ok(o) => o,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(&e);
        }
    };

    eprintln!(
        "Config and data are valid: {} stock, {} option transactions",
        stocks.len(),
        options.len()
    );
    ExitCode::SUCCESS
}
