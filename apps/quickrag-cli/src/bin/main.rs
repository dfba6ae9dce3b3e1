use std::env;
use std::fs;
use std::path::PathBuf;

use quickrag_core::config::{expand_path, CliConfig};
use quickrag_core::loader::load_documents;
use quickrag_engine::{semantic_compress, RagEngine};
use tracing::info;

fn parse_args() -> (String, Vec<String>) {
    let mut args: Vec<String> = env::args().collect();
    let prog = args.remove(0);
    if args.is_empty() {
        eprintln!("Usage: {} <search|compress> [args...]", prog);
        std::process::exit(1);
    }
    let cmd = args.remove(0);
    (cmd, args)
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let config = CliConfig::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;
    let (cmd, args) = parse_args();
    match cmd.as_str() {
        "search" => {
            let docs_dir = args
                .first()
                .map(|p| expand_path(p))
                .unwrap_or_else(|| expand_path(&config.docs_dir));
            let query = args.get(1).cloned().unwrap_or_else(|| {
                eprintln!("Usage: quickrag search <docs-dir> \"<query>\" [top_k]");
                std::process::exit(1)
            });
            let top_k = args
                .get(2)
                .and_then(|k| k.parse::<usize>().ok())
                .unwrap_or(config.top_k);

            let engine = RagEngine::new();
            let entries = load_documents(&docs_dir)?;
            let outcome = engine.add_documents(entries);
            info!(added = outcome.added, total = outcome.total, dir = %docs_dir.display(), "ingested documents");

            let response = engine.search(&query, top_k);
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        "compress" => {
            let file = args.first().map(PathBuf::from).unwrap_or_else(|| {
                eprintln!("Usage: quickrag compress <file> \"<query>\" [max_sentences]");
                std::process::exit(1)
            });
            let query = args.get(1).cloned().unwrap_or_else(|| {
                eprintln!("Usage: quickrag compress <file> \"<query>\" [max_sentences]");
                std::process::exit(1)
            });
            let max_sentences = args
                .get(2)
                .and_then(|k| k.parse::<usize>().ok())
                .unwrap_or(config.max_sentences);

            let text = fs::read_to_string(&file)?;
            let outcome = semantic_compress(&text, &query, max_sentences);
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        _ => {
            eprintln!("Unknown command: {}", cmd);
            std::process::exit(1);
        }
    }
    Ok(())
}
