//! Muse CLI - project idea recommendations over a tabular dataset.

use std::collections::BTreeMap;
use std::io::stdout;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use muse::cli::{Cli, Command, OutputFormat};
use muse::config::Config;
use muse::corpus::Corpus;
use muse::engine::Recommender;
use muse::llm::GenerateClient;
use muse::output::Format;

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> muse::Result<()> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load_default(".")?,
    };

    if !config.output.color {
        colored::control::set_override(false);
    }

    let format = match cli.format {
        OutputFormat::Text => Format::Text,
        OutputFormat::Json => Format::Json,
        OutputFormat::Markdown => Format::Markdown,
        OutputFormat::Csv => Format::Csv,
    };

    match cli.command {
        Command::Recommend(ref args) => {
            let corpus = load_corpus(&cli, &config)?
                .filtered(args.domain.as_deref(), args.difficulty.as_deref());
            let recommender = Recommender::new(corpus)?;
            let top_n = args.top.unwrap_or(config.recommend.top_n);
            let set = recommender.recommend(&args.query, top_n)?;
            format.write(&set, &mut stdout())?;
        }
        Command::Similar(ref args) => {
            let recommender = Recommender::new(load_corpus(&cli, &config)?)?;
            let top_n = args.top.unwrap_or(config.recommend.top_n);
            let set = recommender.similar_to(&args.id, top_n)?;
            format.write(&set, &mut stdout())?;
        }
        Command::Stats => {
            let recommender = Recommender::new(load_corpus(&cli, &config)?)?;
            let stats = DatasetStats::collect(&recommender);
            serde_json::to_writer_pretty(&mut stdout(), &stats)?;
            println!();
        }
        Command::Generate(args) => {
            let client = GenerateClient::new(&config.generate)?;
            let ideas = client.generate(&args.prompt, args.count)?;
            serde_json::to_writer_pretty(&mut stdout(), &ideas)?;
            println!();
        }
        Command::Init => {
            std::fs::write("muse.toml", Config::default_toml())?;
            eprintln!("Wrote muse.toml");
        }
    }

    Ok(())
}

fn load_corpus(cli: &Cli, config: &Config) -> muse::Result<Corpus> {
    let path = cli
        .data
        .clone()
        .or_else(|| config.dataset.path.clone())
        .ok_or_else(|| {
            muse::Error::config("no dataset given; pass --data or set [dataset] path in muse.toml")
        })?;
    Corpus::load_path(path)
}

/// Summary of a loaded dataset and its fitted vector space.
#[derive(Serialize)]
struct DatasetStats {
    records: usize,
    vocabulary: usize,
    domains: BTreeMap<String, usize>,
}

impl DatasetStats {
    fn collect(recommender: &Recommender) -> Self {
        let mut domains: BTreeMap<String, usize> = BTreeMap::new();
        for record in recommender.corpus().records() {
            let key = if record.domain.is_empty() {
                "(none)".to_string()
            } else {
                record.domain.clone()
            };
            *domains.entry(key).or_insert(0) += 1;
        }
        Self {
            records: recommender.corpus().len(),
            vocabulary: recommender.vector_space().vocabulary_size(),
            domains,
        }
    }
}
