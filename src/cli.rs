//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::adapters::csv_adapter::{CsvAdapter, write_series_csv};
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::config_validation::{
    optional_date, optional_seed, required_periods, validate_config, validate_data_config,
    validate_generator_config,
};
use crate::domain::error::CrossoptError;
use crate::domain::generator::{
    DEFAULT_LENGTH, DEFAULT_START_PRICE, DEFAULT_VOLATILITY, GeneratorConfig, SeriesGenerator,
};
use crate::domain::optimizer::{
    BacktestResult, ParameterGrid, ParameterPair, evaluate_pair, optimize_grid,
};
use crate::domain::price_series::PriceSeries;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

pub const DEFAULT_TOP: usize = 10;

#[derive(Parser, Debug)]
#[command(
    name = "crossopt",
    version,
    about = "Moving-average crossover parameter optimizer"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search the window grid and rank every valid pair
    Optimize {
        #[arg(short, long)]
        config: PathBuf,
        /// Price CSV to use instead of a generated series
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Write the ranked results as CSV
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        length: Option<usize>,
        /// Number of rows to print
        #[arg(long)]
        top: Option<usize>,
    },
    /// Write a synthetic price series as CSV
    Generate {
        #[arg(short, long)]
        output: PathBuf,
        #[arg(long, default_value_t = DEFAULT_LENGTH)]
        length: usize,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Evaluate a single window pair
    Evaluate {
        #[arg(long)]
        short: usize,
        #[arg(long)]
        long: usize,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        input: Option<PathBuf>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        length: Option<usize>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataSettings {
    pub csv_path: Option<PathBuf>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportSettings {
    pub output_path: Option<PathBuf>,
    pub top: usize,
}

/// Everything one optimization run needs, resolved from config + flags.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub generator: GeneratorConfig,
    pub grid: ParameterGrid,
    pub data: DataSettings,
    pub report: ReportSettings,
}

/// Install the stderr log subscriber. `RUST_LOG` overrides the `info` default.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub fn run(cli: Cli) -> ExitCode {
    let outcome = match cli.command {
        Command::Optimize {
            config,
            input,
            output,
            seed,
            length,
            top,
        } => run_optimize(&config, input, output, seed, length, top),
        Command::Generate {
            output,
            length,
            seed,
        } => run_generate(&output, length, seed),
        Command::Evaluate {
            short,
            long,
            config,
            input,
            seed,
            length,
        } => run_evaluate(ParameterPair::new(short, long), config.as_ref(), input, seed, length),
        Command::Validate { config } => run_validate(&config),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, CrossoptError> {
    info!("Loading config from {}", path.display());
    FileConfigAdapter::from_file(path)
}

pub fn build_generator_config(adapter: &dyn ConfigPort) -> Result<GeneratorConfig, CrossoptError> {
    validate_generator_config(adapter)?;

    let length = adapter.get_int("generator", "length", DEFAULT_LENGTH as i64);
    let length = usize::try_from(length)
        .ok()
        .filter(|&n| n > 0)
        .ok_or_else(|| CrossoptError::ConfigInvalid {
            section: "generator".into(),
            key: "length".into(),
            reason: "length must be a positive integer".into(),
        })?;

    Ok(GeneratorConfig {
        length,
        seed: optional_seed(adapter)?,
        start_price: adapter.get_double("generator", "start_price", DEFAULT_START_PRICE),
        volatility: adapter.get_double("generator", "volatility", DEFAULT_VOLATILITY),
        end_date: optional_date(adapter, "generator", "end_date")?,
    })
}

pub fn build_grid(adapter: &dyn ConfigPort) -> Result<ParameterGrid, CrossoptError> {
    Ok(ParameterGrid {
        short_periods: required_periods(adapter, "short_period")?,
        long_periods: required_periods(adapter, "long_period")?,
    })
}

pub fn build_data_settings(adapter: &dyn ConfigPort) -> Result<DataSettings, CrossoptError> {
    validate_data_config(adapter)?;

    Ok(DataSettings {
        csv_path: adapter
            .get_string("data", "csv_path")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from),
        start_date: optional_date(adapter, "data", "start_date")?,
        end_date: optional_date(adapter, "data", "end_date")?,
    })
}

pub fn build_run_config(adapter: &dyn ConfigPort) -> Result<RunConfig, CrossoptError> {
    validate_config(adapter)?;

    let top = adapter.get_int("report", "top", DEFAULT_TOP as i64).max(1) as usize;

    Ok(RunConfig {
        generator: build_generator_config(adapter)?,
        grid: build_grid(adapter)?,
        data: build_data_settings(adapter)?,
        report: ReportSettings {
            output_path: adapter
                .get_string("report", "output_path")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
            top,
        },
    })
}

/// Settings for a single-pair evaluation. The `[grid]` and `[report]`
/// sections are not consulted; without a config file every value is a
/// default.
pub fn build_evaluate_config(adapter: Option<&dyn ConfigPort>) -> Result<RunConfig, CrossoptError> {
    let (generator, data) = match adapter {
        Some(adapter) => (build_generator_config(adapter)?, build_data_settings(adapter)?),
        None => (
            GeneratorConfig::default(),
            DataSettings {
                csv_path: None,
                start_date: None,
                end_date: None,
            },
        ),
    };

    Ok(RunConfig {
        generator,
        grid: ParameterGrid::default(),
        data,
        report: ReportSettings {
            output_path: None,
            top: DEFAULT_TOP,
        },
    })
}

/// Load the series from `data_port` when given, otherwise generate it.
pub fn resolve_series(
    data_port: Option<&dyn DataPort>,
    config: &RunConfig,
) -> Result<PriceSeries, CrossoptError> {
    match data_port {
        Some(port) => {
            let series = port.fetch_series(config.data.start_date, config.data.end_date)?;
            info!("Loaded {} price points", series.len());
            Ok(series)
        }
        None => {
            let mut generator = SeriesGenerator::from_config(&config.generator)?;
            let series = generator.generate(config.generator.length)?;
            match config.generator.seed {
                Some(seed) => info!("Generated {} price points (seed {})", series.len(), seed),
                None => info!("Generated {} price points (unseeded)", series.len()),
            }
            Ok(series)
        }
    }
}

pub fn run_optimize_pipeline(
    data_port: Option<&dyn DataPort>,
    report_port: &dyn ReportPort,
    config: &RunConfig,
) -> Result<Vec<BacktestResult>, CrossoptError> {
    let series = resolve_series(data_port, config)?;

    let total = config.grid.pairs().len();
    let valid = config.grid.valid_pairs().len();
    info!(
        "Evaluating {} of {} grid pairs ({} skipped: short >= long)",
        valid,
        total,
        total - valid
    );
    if valid == 0 {
        warn!("No valid window pairs in grid");
    }

    let results = optimize_grid(&series, &config.grid)?;

    if let Some(best) = results.first() {
        info!(
            "Best pair {}: sharpe {:.4}, total return {:.2}%",
            best.pair(),
            best.sharpe_ratio,
            best.total_return * 100.0
        );
    }

    if let Some(path) = &config.report.output_path {
        report_port.write(&results, path)?;
        info!("Report written to {}", path.display());
    }

    Ok(results)
}

pub fn format_results_table(results: &[BacktestResult], top: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>4}  {:>6}  {:>6}  {:>12}  {:>10}",
        "rank", "short", "long", "total_ret%", "sharpe"
    );
    for (i, r) in results.iter().take(top).enumerate() {
        let _ = writeln!(
            out,
            "{:>4}  {:>6}  {:>6}  {:>12.2}  {:>10.4}",
            i + 1,
            r.short_window,
            r.long_window,
            r.total_return * 100.0,
            r.sharpe_ratio
        );
    }
    out
}

fn apply_overrides(
    config: &mut RunConfig,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    seed: Option<u64>,
    length: Option<usize>,
    top: Option<usize>,
) {
    if input.is_some() {
        config.data.csv_path = input;
    }
    if output.is_some() {
        config.report.output_path = output;
    }
    if seed.is_some() {
        config.generator.seed = seed;
    }
    if let Some(length) = length {
        config.generator.length = length;
    }
    if let Some(top) = top {
        config.report.top = top.max(1);
    }
}

fn run_optimize(
    config_path: &Path,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    seed: Option<u64>,
    length: Option<usize>,
    top: Option<usize>,
) -> Result<(), CrossoptError> {
    let adapter = load_config(config_path)?;
    let mut config = build_run_config(&adapter)?;
    apply_overrides(&mut config, input, output, seed, length, top);

    let csv_adapter = config.data.csv_path.clone().map(CsvAdapter::new);
    let data_port = csv_adapter.as_ref().map(|a| a as &dyn DataPort);

    let results = run_optimize_pipeline(data_port, &CsvReportAdapter::new(), &config)?;
    print!("{}", format_results_table(&results, config.report.top));
    Ok(())
}

fn run_generate(output: &Path, length: usize, seed: Option<u64>) -> Result<(), CrossoptError> {
    let config = GeneratorConfig {
        length,
        seed,
        ..GeneratorConfig::default()
    };
    let series = SeriesGenerator::from_config(&config)?.generate(length)?;
    write_series_csv(&series, output)?;
    info!("Wrote {} price points to {}", series.len(), output.display());
    Ok(())
}

fn run_evaluate(
    pair: ParameterPair,
    config_path: Option<&PathBuf>,
    input: Option<PathBuf>,
    seed: Option<u64>,
    length: Option<usize>,
) -> Result<(), CrossoptError> {
    let adapter = config_path.map(|path| load_config(path)).transpose()?;
    let mut config = build_evaluate_config(adapter.as_ref().map(|a| a as &dyn ConfigPort))?;
    apply_overrides(&mut config, input, None, seed, length, None);

    if !pair.is_valid() {
        warn!("{} does not satisfy 0 < short < long", pair);
    }

    let csv_adapter = config.data.csv_path.clone().map(CsvAdapter::new);
    let data_port = csv_adapter.as_ref().map(|a| a as &dyn DataPort);
    let series = resolve_series(data_port, &config)?;

    let result = evaluate_pair(&series, pair)?;
    print!("{}", format_results_table(&[result], 1));
    Ok(())
}

fn run_validate(config_path: &Path) -> Result<(), CrossoptError> {
    let adapter = load_config(config_path)?;
    let config = build_run_config(&adapter)?;

    let total = config.grid.pairs().len();
    let valid = config.grid.valid_pairs().len();
    info!(
        "Grid: short {:?}, long {:?} ({} of {} pairs valid)",
        config.grid.short_periods, config.grid.long_periods, valid, total
    );
    match &config.data.csv_path {
        Some(path) => match CsvAdapter::new(path.clone()).get_data_range()? {
            Some((first, last, count)) => {
                info!("Data: {} ({} points, {} to {})", path.display(), count, first, last)
            }
            None => warn!("Data: {} has no price rows", path.display()),
        },
        None => info!(
            "Data: generated, length {}, volatility {}",
            config.generator.length, config.generator.volatility
        ),
    }
    info!("Configuration is valid");
    Ok(())
}
