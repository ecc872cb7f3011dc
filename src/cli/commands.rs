//! Command-line surface for conformance testing the whole pipeline.
//!
//! Input JSON comes from a file or stdin and is tagged as either raw log
//! entries or a prior search state. The merged search state lands on stdout
//! (so a harness can redirect/save it), with side files for the derived
//! input state and the full response payload. Outcomes map onto exit
//! statuses: 0 success, 8 input filter too big, 9 output state identical to
//! input state, 10 no entries found, 255 anything else.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgGroup, Parser};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::correlate::find_entries;
use crate::error::CorrelateError;
use crate::models::{LogEntry, SearchState};
use crate::query::ReplayClient;
use crate::transforms::entries_to_state;
use crate::utils::get_log_store_path;

#[derive(Parser)]
#[command(name = "correlate-logs")]
#[command(version = "0.1.0")]
#[command(about = "Find associated log entries from cloud logs JSON", long_about = None)]
#[command(group(ArgGroup::new("input").required(true).args(["file", "stdin"])))]
#[command(group(ArgGroup::new("format").required(true).args(["logs", "state"])))]
pub struct Cli {
    /// Filename for input JSON
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Use stdin for input JSON
    #[arg(short = 'i', long)]
    pub stdin: bool,

    /// Treat input JSON as raw log entries
    #[arg(short = 'l', long)]
    pub logs: bool,

    /// Treat input JSON as a search state
    #[arg(short = 's', long)]
    pub state: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("Input filter is too big.")]
    FilterTooBig,

    #[error("Output state is same as input state.")]
    IdenticalSearchState,

    #[error("No log entries found with supplied query.")]
    NoMoreEntries,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    fn exit_status(&self) -> i32 {
        match self {
            CliError::FilterTooBig => 8,
            CliError::IdenticalSearchState => 9,
            CliError::NoMoreEntries => 10,
            CliError::Other(_) => 255,
        }
    }
}

/// Parses arguments, runs one correlation iteration, and returns the exit
/// status for the process.
pub fn run() -> i32 {
    let cli = Cli::parse();

    match execute(&cli) {
        Ok(()) => 0,
        Err(err) => {
            error!("{err:#}");
            err.exit_status()
        }
    }
}

fn execute(cli: &Cli) -> Result<(), CliError> {
    let store_path = get_log_store_path()?;
    let client = ReplayClient::from_file(&store_path)?;

    let input_name = match &cli.file {
        Some(path) => path.to_string_lossy().into_owned(),
        None => "stdin.json".to_string(),
    };
    let input_json = read_input_json(cli)?;

    let prev_search_state = if cli.logs {
        let entries: Vec<LogEntry> = serde_json::from_value(input_json)
            .context("Input JSON is not an array of log entries")?;
        let state = entries_to_state(&entries);

        let in_state_file = input_name.replace(".json", ".input-state.json");
        write_json_file(&in_state_file, &state)?;
        state
    } else {
        serde_json::from_value(input_json).context("Input JSON is not a search state")?
    };

    debug!("Using search state: {}", pretty_json(&prev_search_state)?);

    let (msg, data) = find_entries(&client, &prev_search_state, None).map_err(|err| match err {
        CorrelateError::FilterTooLarge(_) => CliError::FilterTooBig,
        other => CliError::Other(anyhow::Error::new(other)),
    })?;

    let resp_file = input_name.replace(".json", ".resp.json");
    write_json_file(&resp_file, &data)?;

    info!("{msg}");

    // the merged state goes to stdout so it can be redirected/saved however
    // the harness sees fit
    println!("{}", pretty_json(&data.search_state)?);

    if data.search_state == prev_search_state {
        return Err(CliError::IdenticalSearchState);
    }

    if data.log_entries.is_empty() {
        return Err(CliError::NoMoreEntries);
    }

    Ok(())
}

fn read_input_json(cli: &Cli) -> Result<serde_json::Value, CliError> {
    let content = match &cli.file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer).context("Failed to read stdin")?;
            buffer
        }
    };

    Ok(serde_json::from_str(&content).context("Input is not valid JSON")?)
}

fn write_json_file<T: Serialize>(path: &str, value: &T) -> Result<(), CliError> {
    fs::write(path, format!("{}\n", pretty_json(value)?))
        .with_context(|| format!("Failed to write {path}"))?;
    Ok(())
}

fn pretty_json<T: Serialize>(value: &T) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(value).context("Failed to serialize JSON")?)
}
