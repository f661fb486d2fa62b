use std::{
    io::{self, BufWriter, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::{Parser, ValueEnum};
use log::{error, info, LevelFilter};
use picmic::{
    clusters::{LineExtractError, ParamsError},
    load_table, ClusterPipeline, EventFailure, EventOutput, EventParseError, EventReader,
    EventRecord, EventReport, IoError, PicmicConfig, TableLoadError,
};

#[derive(Parser, Debug)]
#[command(name = "picmic", version, about = "Reconstruct PICMIC fat-line clusters event by event")]
struct Cli {
    /// Address table (`col row n label` per line).
    #[arg(long)]
    table: PathBuf,
    /// Event file, one event per line.
    #[arg(default_value = "events.txt")]
    events: PathBuf,
    /// JSON config with `params` and `table` overrides.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
    /// Print the lines of each event (text format).
    #[arg(long)]
    show_lines: bool,
    /// Print the fat lines of each event (text format).
    #[arg(long)]
    show_fat_lines: bool,
    /// off, error, warn, info, debug or trace.
    #[arg(long, default_value = "warn", value_parser = parse_level)]
    log_level: LevelFilter,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("config: {0}")]
    Config(#[from] IoError),
    #[error("invalid parameters: {0}")]
    Params(#[from] ParamsError),
    #[error("address table: {0}")]
    Table(#[from] TableLoadError),
    #[error("events: {0}")]
    Events(#[from] EventParseError),
    #[error("{failed} event(s) could not be analysed")]
    Extract { failed: usize },
    #[error(transparent)]
    Output(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn parse_level(s: &str) -> Result<LevelFilter, String> {
    s.parse().map_err(|_| format!("unknown log level {s:?}"))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level);
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("picmic: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(level: LevelFilter) {
    #[cfg(feature = "tracing")]
    {
        let _ = tracing_log::LogTracer::init_with_filter(level);
        picmic::core::init_tracing(false);
    }
    #[cfg(not(feature = "tracing"))]
    {
        let _ = picmic::core::init_with_level(level);
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let config = match &cli.config {
        Some(path) => PicmicConfig::load_json(path)?,
        None => PicmicConfig::default(),
    };
    let table = load_table(&cli.table, config.table)?;
    let pipeline = ClusterPipeline::new(config.params)?;
    info!("reading events from {}", cli.events.display());

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut failed = 0usize;
    for record in EventReader::open(&cli.events)? {
        let record = record?;
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("event", number = record.number).entered();

        match pipeline.process(&table, &record.hits) {
            Ok(report) => write_event(&mut out, cli, &record, &report)?,
            Err(err) => {
                failed += 1;
                report_failure(&mut out, cli, &record, &err)?;
            }
        }
    }
    out.flush()?;

    if failed > 0 {
        return Err(CliError::Extract { failed });
    }
    Ok(())
}

fn separator(number: usize) -> String {
    let dashes = "-".repeat(38);
    format!("{dashes} {number} {dashes}")
}

fn write_event(
    out: &mut impl Write,
    cli: &Cli,
    record: &EventRecord,
    report: &EventReport,
) -> Result<(), CliError> {
    match cli.format {
        Format::Text => {
            writeln!(out, "{}", separator(record.number))?;
            if cli.show_lines {
                writeln!(out, "{}", report.lines)?;
            }
            if cli.show_fat_lines {
                writeln!(out, "{}", report.fat_lines)?;
            }
            writeln!(out, "{}", report.clusters)?;
        }
        Format::Json => {
            let output = EventOutput {
                event: record.number,
                declared_hits: record.declared,
                hits: record.hits.len(),
                report,
            };
            serde_json::to_writer(&mut *out, &output)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn report_failure(
    out: &mut impl Write,
    cli: &Cli,
    record: &EventRecord,
    err: &LineExtractError,
) -> Result<(), CliError> {
    error!("event {} (line {}): {err}", record.number, record.line);
    match cli.format {
        Format::Text => {
            writeln!(out, "{}", separator(record.number))?;
            writeln!(out, "error: {err}")?;
        }
        Format::Json => {
            let failure = EventFailure {
                event: record.number,
                line: record.line,
                error: err.to_string(),
            };
            serde_json::to_writer(&mut *out, &failure)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
