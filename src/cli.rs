//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::text_report_adapter::TextReportAdapter;
use crate::domain::config_validation::{
    validate_data_config, validate_run_config, validate_strategy_config,
};
use crate::domain::error::BacksimError;
use crate::domain::runner::{run_backtest, RunConfig, DEFAULT_CASH, DEFAULT_START};
use crate::domain::strategy::{SmaCross, Strategy};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "backsim", about = "Single-asset trading strategy backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a backtest
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        /// Override the CSV file named in the config
        #[arg(long)]
        data: Option<PathBuf>,
        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show the data range of a CSV file
    Info {
        #[arg(long)]
        data: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Backtest {
            config,
            data,
            output,
        } => run_backtest_cmd(&config, data.as_ref(), output.as_ref()),
        Command::Validate { config } => run_validate(&config),
        Command::Info { data } => run_info(&data),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = BacksimError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Read run parameters out of a validated config.
pub fn build_run_config(config: &dyn ConfigPort) -> RunConfig {
    RunConfig {
        cash: config.get_double("backtest", "cash", DEFAULT_CASH),
        commission: config.get_double("backtest", "commission", 0.0),
        start: config.get_int("backtest", "start", DEFAULT_START as i64) as usize,
    }
}

/// Instantiate the configured strategy variant.
pub fn build_strategy(config: &dyn ConfigPort) -> Result<Box<dyn Strategy>, BacksimError> {
    let name = config
        .get_string("strategy", "name")
        .unwrap_or_else(|| "sma_cross".to_string());

    match name.trim() {
        "sma_cross" => {
            let fast = config.get_int("strategy", "fast", SmaCross::DEFAULT_FAST as i64);
            let slow = config.get_int("strategy", "slow", SmaCross::DEFAULT_SLOW as i64);
            Ok(Box::new(SmaCross::new(fast as usize, slow as usize)))
        }
        other => Err(BacksimError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "name".to_string(),
            reason: format!("unknown strategy '{other}'"),
        }),
    }
}

/// CLI override wins over the `[data] file` key. Relative config paths
/// resolve against the config file's directory.
pub fn resolve_data_path(
    config_path: &PathBuf,
    data_override: Option<&PathBuf>,
    config: &dyn ConfigPort,
) -> Result<PathBuf, BacksimError> {
    if let Some(path) = data_override {
        return Ok(path.clone());
    }

    validate_data_config(config)?;
    let file = config
        .get_string("data", "file")
        .unwrap_or_default();
    let file = PathBuf::from(file.trim());

    if file.is_absolute() {
        Ok(file)
    } else {
        match config_path.parent() {
            Some(dir) => Ok(dir.join(file)),
            None => Ok(file),
        }
    }
}

fn run_backtest_cmd(
    config_path: &PathBuf,
    data_override: Option<&PathBuf>,
    output_path: Option<&PathBuf>,
) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_run_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    if let Err(e) = validate_strategy_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let data_path = match resolve_data_path(config_path, data_override, &adapter) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!("Loading prices from {}", data_path.display());
    let series = match CsvAdapter::new(data_path).load() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    eprintln!(
        "Loaded {} bars ({} .. {})",
        series.len(),
        series.first_timestamp(),
        series.last_timestamp()
    );

    let mut strategy = match build_strategy(&adapter) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let run_config = build_run_config(&adapter);

    eprintln!(
        "Running backtest: cash={}, commission={}, start={}",
        run_config.cash, run_config.commission, run_config.start
    );
    let summary = match run_backtest(&series, strategy.as_mut(), &run_config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let report = match output_path {
        Some(path) => TextReportAdapter::to_file(path.clone()),
        None => TextReportAdapter::to_stdout(),
    };
    if let Err(e) = report.write(&summary) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let checks = [
        validate_run_config(&adapter),
        validate_strategy_config(&adapter),
        validate_data_config(&adapter),
    ];
    for check in checks {
        if let Err(e) = check {
            eprintln!("error: {e}");
            return (&e).into();
        }
    }

    println!("configuration OK");
    ExitCode::SUCCESS
}

fn run_info(data_path: &PathBuf) -> ExitCode {
    let series = match CsvAdapter::new(data_path.clone()).load() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    println!("bars:  {}", series.len());
    println!("first: {}", series.first_timestamp());
    println!("last:  {}", series.last_timestamp());
    ExitCode::SUCCESS
}
