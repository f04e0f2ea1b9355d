use anyhow::{Context, Result};
use clap::Parser;
use qa_core::{load_files, tokenize_query, Config, Index, FILE_MATCHES, SENTENCE_MATCHES};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "questions")]
#[command(about = "Answer a question from a directory of text files", long_about = None)]
struct Cli {
    /// Corpus directory containing the documents
    corpus: PathBuf,
    /// Number of top files whose sentences are searched
    #[arg(short, long, default_value_t = FILE_MATCHES)]
    files: usize,
    /// Number of sentences to print
    #[arg(short, long, default_value_t = SENTENCE_MATCHES)]
    sentences: usize,
    /// File extension to read from the corpus (repeatable)
    #[arg(long = "ext", default_value = "txt")]
    extensions: Vec<String>,
    /// Query text; read from standard input when omitted
    #[arg(long)]
    query: Option<String>,
    /// Print ranked files and sentences with scores as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn read_query() -> Result<String> {
    let mut stdout = io::stdout();
    write!(stdout, "Query: ")?;
    stdout.flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line).context("failed to read query from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();
    let config = Config { file_matches: cli.files, sentence_matches: cli.sentences, extensions: cli.extensions };
    config.validate()?;

    let corpus = load_files(&cli.corpus, &config.extensions)
        .with_context(|| format!("failed to load corpus from {}", cli.corpus.display()))?;
    let index = Index::build(&corpus)?;

    let raw_query = match cli.query {
        Some(q) => q,
        None => read_query()?,
    };
    let query = tokenize_query(&raw_query);
    tracing::debug!(?query, "tokenized query");
    let answer = index.answer(&query, &config)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&answer)?);
    } else if answer.is_empty() {
        eprintln!("No matching sentence found.");
    } else {
        for sentence in &answer.sentences {
            println!("{}", sentence.text);
        }
    }
    Ok(())
}
