use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hyclass", version, about = "Hybrid LLM + TF-IDF + rule-based text classifier")]
pub struct Cli {
    /// Training set path (JSON array of {text, category})
    #[arg(long, env = "HYCLASS_TRAINING", global = true)]
    pub training: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Classify a single text
    Classify(ClassifyArgs),
    /// Classify one text per line from a file or stdin
    Batch(BatchArgs),
    /// Manage training examples
    Train {
        #[command(subcommand)]
        action: TrainAction,
    },
}

/// Per-call overrides of the `[classifier]` config section.
#[derive(Args)]
pub struct ClassifierOverrides {
    /// Comma-separated categories (e.g. "positive, negative, neutral")
    #[arg(long)]
    pub categories: Option<String>,

    /// LLM confidence threshold, 0-1
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Skip the TF-IDF matcher even when training examples exist
    #[arg(long)]
    pub no_hybrid: bool,
}

#[derive(Parser)]
pub struct ClassifyArgs {
    /// Text to classify
    pub text: String,

    #[command(flatten)]
    pub overrides: ClassifierOverrides,

    /// Also write the result as JSON to this file
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct BatchArgs {
    /// Input file, one text per line (default: stdin)
    #[arg(long, short)]
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: ClassifierOverrides,

    /// Also write the report as JSON to this file
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum TrainAction {
    /// Add a labeled example
    Add {
        /// Example text
        text: String,
        /// Category label
        #[arg(long, short)]
        category: String,
    },
    /// Remove the example at INDEX (as shown by `train list`)
    Remove { index: usize },
    /// List examples
    List,
}
