mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use pdf_outline::batch::{self, default_output_path};
use pdf_outline::{OutlineConfig, OutlineError, OutlineExtractor};

use crate::cli::{BatchArgs, Cli, Commands, ExtractArgs, TuningArgs};

fn main() {
    init_tracing();

    if let Err(err) = run() {
        error!(error = %err, "command failed");
        for cause in err.chain().skip(1) {
            error!(cause = %cause, "caused by");
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let extractor = OutlineExtractor::new(load_config(&cli.tuning)?);

    match cli.command {
        Commands::Extract(args) => extract(&extractor, args),
        Commands::Batch(args) => run_batch(&extractor, args),
    }
}

fn load_config(tuning: &TuningArgs) -> Result<OutlineConfig> {
    let mut config = match &tuning.config {
        Some(path) => OutlineConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => OutlineConfig::default(),
    };

    if let Some(tolerance) = tuning.title_tolerance {
        config.title_font_tolerance = tolerance;
    }
    if let Some(deep) = tuning.deep_numbering {
        config.deep_numbering = deep.into();
    }
    if tuning.strip_section_numbers {
        config.strip_section_numbers = true;
    }

    config.validate()?;
    Ok(config)
}

fn extract(extractor: &OutlineExtractor, args: ExtractArgs) -> Result<()> {
    if !args.input.exists() {
        return Err(OutlineError::InputNotFound(args.input).into());
    }

    let output = args
        .output
        .unwrap_or_else(|| default_output_path(&args.input));

    batch::process_document(extractor, &args.input, &output)
        .with_context(|| format!("failed to process {}", args.input.display()))?;
    Ok(())
}

fn run_batch(extractor: &OutlineExtractor, args: BatchArgs) -> Result<()> {
    let report = batch::run_batch(extractor, &args.input_dir, &args.output_dir)
        .with_context(|| format!("batch over {} failed", args.input_dir.display()))?;

    if !report.failed.is_empty() {
        warn!(
            failed = report.failed.len(),
            total = report.found,
            "some documents could not be processed"
        );
    }
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
