use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use crate::recommend::DEFAULT_TOP_N;

#[derive(Debug, Parser)]
#[command(
    name = "docrec",
    about = "Recommend related papers from a fixed corpus by TF-IDF similarity"
)]
pub struct Cli {
    /// Increase log verbosity (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build the index and serve recommendations over HTTP
    Serve(ServeArgs),
    /// Print recommendations for a single query
    Recommend(RecommendArgs),
    /// Show corpus and vocabulary statistics
    Status(StatusArgs),
    /// Generate shell completions
    #[command(hide = true)]
    Completions(CompletionsArgs),
}

// -- Serve --

#[derive(Debug, Parser)]
pub struct ServeArgs {
    /// Corpus CSV with titles, summaries and terms columns
    #[arg(long)]
    pub corpus: Option<PathBuf>,

    /// Address to listen on (e.g. 127.0.0.1:8000)
    #[arg(long)]
    pub bind: Option<String>,

    /// Origin allowed to make cross-origin requests
    #[arg(long)]
    pub allow_origin: Option<String>,
}

// -- Recommend --

#[derive(Debug, Parser)]
pub struct RecommendArgs {
    /// The query text
    pub query: String,

    /// Number of recommendations to return
    #[arg(short = 'n', long, default_value_t = DEFAULT_TOP_N)]
    pub top_n: usize,

    /// Corpus CSV with titles, summaries and terms columns
    #[arg(long)]
    pub corpus: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

// -- Status --

#[derive(Debug, Parser)]
pub struct StatusArgs {
    /// Corpus CSV with titles, summaries and terms columns
    #[arg(long)]
    pub corpus: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// -- Completions --

#[derive(Debug, Parser)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsArgs {
    /// Generate shell completions and print to stdout.
    pub fn generate(&self) {
        let mut cmd = Cli::command();
        clap_complete::generate(
            self.shell,
            &mut cmd,
            "docrec",
            &mut std::io::stdout(),
        );
    }
}
