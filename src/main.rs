use clap::Parser;
use tracing_subscriber::EnvFilter;

use docrec::{
    CorpusIndex,
    cli::{Cli, Command, RecommendArgs, StatusArgs},
    config::{self, ServeConfig},
    corpus,
    error,
    recommend::{self, RecommendParams},
    server,
};

fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if let Ok(env) = std::env::var("DOCREC_LOG") {
        EnvFilter::new(env)
    } else if quiet {
        EnvFilter::new("warn")
    } else {
        match verbose {
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> error::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        Command::Serve(args) => {
            let config = ServeConfig::resolve(
                args.corpus.as_deref(),
                args.bind.as_deref(),
                args.allow_origin.as_deref(),
            )?;
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            runtime.block_on(server::serve(config))?;
        }
        Command::Recommend(args) => {
            cmd_recommend(&args)?;
        }
        Command::Status(args) => {
            cmd_status(&args)?;
        }
        Command::Completions(args) => {
            args.generate();
        }
    }

    Ok(())
}

fn load_index(explicit: Option<&std::path::Path>) -> error::Result<CorpusIndex> {
    let path = config::resolve_corpus(explicit);
    tracing::debug!("Loading corpus from {}", path.display());
    CorpusIndex::build(corpus::load_csv(&path)?)
}

fn cmd_recommend(args: &RecommendArgs) -> error::Result<()> {
    if args.top_n == 0 {
        return Err(error::Error::InvalidTopN(0));
    }

    let index = load_index(args.corpus.as_deref())?;
    let params = RecommendParams::new(args.query.clone(), args.top_n);
    let results = recommend::recommend(&index, &params)?;

    if args.json {
        recommend::format_json(&results, &args.query)?;
    } else {
        recommend::format_human(&results);
    }
    Ok(())
}

fn cmd_status(args: &StatusArgs) -> error::Result<()> {
    let path = config::resolve_corpus(args.corpus.as_deref());
    let index = load_index(Some(path.as_path()))?;
    let empty_docs = index
        .vectors()
        .iter()
        .filter(|v| v.is_zero())
        .count();

    if args.json {
        println!(
            "{}",
            serde_json::json!({
                "corpus": path.display().to_string(),
                "documents": index.len(),
                "vocabulary": index.dimension(),
                "empty_documents": empty_docs,
            })
        );
    } else {
        println!("Corpus: {}", path.display());
        println!("Documents: {}", index.len());
        println!("Vocabulary: {}", index.dimension());
        println!("Documents without indexed terms: {empty_docs}");
    }
    Ok(())
}
