use anyhow::{Context, Result};
use clap::{ArgAction, CommandFactory, Parser};
use r2q_core::{MalformedDateError, parse_mint_date};
use r2q_ingest::{AccountApi, ApiError, Credentials, Fetcher, RobinhoodClient};
use r2q_mint::{CsvLayout, ExportError, ExportOptions, ExportSummary, MintCsvWriter, export};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;

use config::Config;

#[derive(Parser, Debug)]
#[command(
    name = "robinhood2quicken",
    version,
    about = "Export Robinhood trades and dividends to a Mint CSV file which can be imported into Quicken"
)]
struct Cli {
    /// Your Robinhood username
    #[arg(long, env = "ROBINHOOD_USERNAME")]
    username: String,

    /// Your Robinhood password
    #[arg(long, env = "ROBINHOOD_PASSWORD", hide_env_values = true)]
    password: String,

    /// Multi-factor code, if the account requires one
    #[arg(long)]
    mfa_code: Option<String>,

    /// Export trade information (default: true)
    #[arg(long, action = ArgAction::Set, value_name = "BOOL")]
    trades: Option<bool>,

    /// Export dividend information (default: true)
    #[arg(long, action = ArgAction::Set, value_name = "BOOL")]
    dividends: Option<bool>,

    /// Only export transactions after this date
    #[arg(long, value_name = "MM/DD/YYYY")]
    date: Option<String>,

    /// Output file path; must end with .csv (default: robinhood_output.csv)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Config file (default: ~/.robinhood2quicken/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// More logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let start = Instant::now();
    let result = run(cli);
    report(result, start.elapsed(), &mut std::io::stderr().lock())
}

/// Error and usage first, then the timing line, all on `stderr`.
fn report(result: Result<ExportSummary>, elapsed: Duration, stderr: &mut impl Write) -> ExitCode {
    let code = match result {
        Ok(summary) => {
            println!("Wrote {} transactions to {}", summary.written, summary.path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            let _ = writeln!(stderr, "error: {err:#}");
            if is_usage_error(&err) {
                let _ = writeln!(stderr, "\n{}", Cli::command().render_help());
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    };
    let _ = writeln!(stderr, "robinhood2quicken took {:.3} seconds", elapsed.as_secs_f64());
    code
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Errors caused by how the tool was called: print usage and exit 2.
fn is_usage_error(err: &anyhow::Error) -> bool {
    if let Some(ApiError::Authentication(_)) = err.downcast_ref::<ApiError>() {
        return true;
    }
    if let Some(ExportError::OutputPath { .. }) = err.downcast_ref::<ExportError>() {
        return true;
    }
    err.downcast_ref::<MalformedDateError>().is_some()
}

/// Merge flags over the config file.
fn export_options(cli: &Cli, cfg: &Config) -> Result<ExportOptions> {
    let cutoff = match cli.date.as_deref() {
        Some(d) => Some(parse_mint_date(d).context("invalid --date")?),
        None => None,
    };
    Ok(ExportOptions {
        include_trades: cli.trades.unwrap_or(cfg.export.trades),
        include_dividends: cli.dividends.unwrap_or(cfg.export.dividends),
        cutoff,
        output: cli.output.clone().unwrap_or_else(|| cfg.export.output.clone()),
    })
}

fn run(cli: Cli) -> Result<ExportSummary> {
    let cfg = config::load_config(cli.config.as_deref())?;
    let options = export_options(&cli, &cfg)?;

    let writer = MintCsvWriter::new(CsvLayout::mint());
    writer.check_path(&options.output)?;

    let mut client = RobinhoodClient::new(&cfg.api.base_url, &cfg.api.client_id)?;
    let credentials = Credentials::new(cli.username, cli.password).with_mfa_code(cli.mfa_code);
    export_account(&mut client, &credentials, &options, &writer)
}

/// Log in, fetch the enabled record kinds and write the CSV.
///
/// Rejected credentials stop here, before anything is fetched.
fn export_account<A: AccountApi>(
    api: &mut A,
    credentials: &Credentials,
    options: &ExportOptions,
    writer: &MintCsvWriter,
) -> Result<ExportSummary> {
    if !api.login(credentials)? {
        return Err(ApiError::Authentication("Username or Password is incorrect".into()).into());
    }

    let mut fetcher = Fetcher::new(&*api);
    let dividends = if options.include_dividends {
        fetcher.dividends().context("fetching dividends")?
    } else {
        Vec::new()
    };
    let trades = if options.include_trades {
        fetcher.trades().context("fetching order history")?
    } else {
        Vec::new()
    };

    let summary = export(&trades, &dividends, options, writer)?;
    info!(
        normalized = summary.normalized,
        written = summary.written,
        "export complete"
    );
    Ok(summary)
}
