use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use textdiff::{
    DiffAlgorithm, DiffConfig, DiffFormat, FindingLevel, diff_sequences, format_summary_report,
    split_named,
};

mod input;

#[derive(Debug, Parser)]
#[command(name = "text-diff")]
#[command(about = "Compare two files or strings line by line and print the differences")]
struct Cli {
    /// Left input: a file path, or literal content when no such file exists.
    input_a: String,
    /// Right input: a file path, or literal content when no such file exists.
    input_b: String,

    #[arg(long, value_enum)]
    format: Option<CliFormat>,

    #[arg(long)]
    context_lines: Option<usize>,

    #[arg(long, value_enum)]
    algorithm: Option<CliAlgorithm>,

    /// JSON file with a diff configuration; flags given here override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Refuse inputs larger than this many bytes.
    #[arg(long, default_value_t = input::DEFAULT_THRESHOLD)]
    threshold: u64,

    /// Check and log the inputs without diffing them.
    #[arg(long)]
    noop: bool,

    #[arg(long)]
    json: bool,

    #[arg(long)]
    summary: bool,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliFormat {
    Unified,
    #[value(alias = "old")]
    Classic,
    Generic,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliAlgorithm {
    Myers,
    Lcs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = resolve_config(&cli)?;
    let a = input::load(&cli.input_a, "left", cli.threshold)?;
    let b = input::load(&cli.input_b, "right", cli.threshold)?;

    for side in [&a, &b] {
        let origin = if side.from_file { "file" } else { "argument" };
        log::debug!("{} read from {origin} ({} bytes)", side.label, side.text.len());
    }
    log::info!("{:>12}  {} - {}", "diff", a.label, b.label);
    if cli.noop {
        return Ok(());
    }

    let a_lines = split_named(&a.text, a.label.as_str());
    let b_lines = split_named(&b.text, b.label.as_str());
    let diff = diff_sequences(&a_lines, &b_lines, config);

    for finding in &diff.findings {
        match finding.level {
            FindingLevel::Warning => log::warn!("[{}] {}", finding.code, finding.message),
            FindingLevel::Info => log::debug!("[{}] {}", finding.code, finding.message),
        }
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&diff)?);
    } else if cli.summary {
        print!("{}", format_summary_report(&diff, &a.label, &b.label));
    } else {
        print!("{}", diff.render());
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();
}

fn resolve_config(cli: &Cli) -> anyhow::Result<DiffConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("read config {}", path.display()))?;
            serde_json::from_str::<DiffConfig>(&raw)
                .with_context(|| format!("parse config {}", path.display()))?
        }
        None => DiffConfig::default(),
    };

    if let Some(format) = cli.format {
        config = config.with_format(match format {
            CliFormat::Unified => DiffFormat::Unified,
            CliFormat::Classic => DiffFormat::Classic,
            CliFormat::Generic => DiffFormat::Generic,
        });
    }
    if let Some(context_lines) = cli.context_lines {
        config = config.with_context_lines(context_lines);
    }
    if let Some(algorithm) = cli.algorithm {
        config = config.with_algorithm(match algorithm {
            CliAlgorithm::Myers => DiffAlgorithm::Myers,
            CliAlgorithm::Lcs => DiffAlgorithm::Lcs,
        });
    }

    Ok(config)
}
