use anyhow::{Context, Result};
use clap::Parser;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use twbmeta::config::DEFAULT_CONFIG_FILE;
use twbmeta::{BatchAborted, CsvSink, ExtractConfig, run_batch};

mod formatter;

#[derive(Parser)]
#[command(name = "twbextract")]
#[command(
    about = "Extract column formulas and dashboard worksheets from Tableau workbooks (.twb) into CSV files",
    long_about = None
)]
struct Cli {
    /// Folder containing the .twb files (searched recursively)
    #[arg(value_name = "INPUT_DIR")]
    input_path: PathBuf,

    /// Folder where the CSV outputs are written (created if missing)
    #[arg(value_name = "OUTPUT_DIR")]
    output_path: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let outcome = run(&cli);
    if let Err(e) = &outcome {
        eprintln!("Error: {:#}", e);
    }
    ExitCode::from(exit_status(&outcome))
}

/// 0 when every workbook was extracted, 1 when some failed, 2 on a fatal error
fn exit_status(outcome: &Result<bool>) -> u8 {
    match outcome {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(_) => 2,
    }
}

/// Returns whether every workbook was extracted
fn run(cli: &Cli) -> Result<bool> {
    // Load configuration from the current directory if it exists
    let config_path = Path::new(DEFAULT_CONFIG_FILE);
    let config = if config_path.exists() {
        ExtractConfig::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        ExtractConfig::default()
    };
    config.validate().context("Invalid configuration")?;

    init_logging(&config);

    if !cli.input_path.is_dir() {
        anyhow::bail!("Input path is not a directory: {}", cli.input_path.display());
    }

    let mut sink = CsvSink::create(&cli.output_path)?;
    let report = match run_batch(&cli.input_path, &mut sink, &config) {
        Ok(report) => report,
        // An aborted run still wrote its outputs and counts as failed files
        Err(e) => match e.downcast::<BatchAborted>() {
            Ok(aborted) => aborted.report,
            Err(e) => {
                return Err(e.context(format!(
                    "Failed to extract workbooks from {}",
                    cli.input_path.display()
                )));
            }
        },
    };

    formatter::print_summary(&cli.input_path, &report, sink.columns_path(), sink.dashboards_path());

    Ok(report.is_success())
}

fn init_logging(config: &ExtractConfig) {
    let log_config = ConfigBuilder::new()
        .set_time_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .build();
    // A logger may already be installed when embedded; keep it
    let _ = TermLogger::init(
        config.log_level.to_level_filter(),
        log_config,
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}
