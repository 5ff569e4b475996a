use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use pdf_outline::DeepNumbering;

#[derive(Parser, Debug)]
#[command(
    name = "pdf-outline",
    version,
    about = "Extract a title and H1-H3 outline from PDFs without bookmarks"
)]
pub struct Cli {
    #[command(flatten)]
    pub tuning: TuningArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Process a single PDF.
    Extract(ExtractArgs),
    /// Process every PDF in a directory.
    Batch(BatchArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
    pub input: PathBuf,

    /// Defaults to `<input-stem>_outline.json` next to the input.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    #[arg(long, default_value = "/app/input")]
    pub input_dir: PathBuf,

    #[arg(long, default_value = "/app/output")]
    pub output_dir: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct TuningArgs {
    /// JSON file with classifier and title settings.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true)]
    pub title_tolerance: Option<f64>,

    #[arg(long, global = true, value_enum)]
    pub deep_numbering: Option<DeepNumberingArg>,

    #[arg(long, global = true, default_value_t = false)]
    pub strip_section_numbers: bool,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum DeepNumberingArg {
    Unclassified,
    Clamp,
}

impl From<DeepNumberingArg> for DeepNumbering {
    fn from(arg: DeepNumberingArg) -> Self {
        match arg {
            DeepNumberingArg::Unclassified => DeepNumbering::Unclassified,
            DeepNumberingArg::Clamp => DeepNumbering::Clamp,
        }
    }
}
