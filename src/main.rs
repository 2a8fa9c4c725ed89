use std::env;
use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wildpraxis::config::Config;
use wildpraxis::repositories::{MemoryStore, SqliteStore, StateStore};
use wildpraxis::services::{ContentService, ProgressService, RetrievalService, WorkbenchService};
use wildpraxis::utils::tokenize;

fn build_store(config: &Config) -> Arc<dyn StateStore> {
    if config.storage.sqlite_path.trim().is_empty() {
        return Arc::new(MemoryStore::new(&config.storage));
    }
    match SqliteStore::new(config.storage.sqlite_path.clone()) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            warn!(
                "Failed to open sqlite state at {}: {e}; falling back to memory",
                config.storage.sqlite_path
            );
            Arc::new(MemoryStore::new(&config.storage))
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(config) => {
            info!("Configuration loaded successfully");
            config
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let store = build_store(&config);
    let content = ContentService::load_builtin(config.similarity.clone())?;
    let retrieval = RetrievalService::new(config.similarity.clone());
    let workbench = WorkbenchService::new(config.workbench.clone());
    let progress = ProgressService::new(store);

    let args: Vec<String> = env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("tokens") => {
            let text = args[1..].join(" ");
            let tokens = tokenize(&text);
            let usage = content.token_window_usage(&text, 1024);
            println!("tokens: {tokens:?}");
            println!(
                "approx {} tokens, {}% of a {}-token window",
                usage.approx_tokens, usage.percent, usage.window
            );
        }
        Some("similar") if args.len() >= 3 => {
            let cosine = retrieval.phrase_similarity(&args[1], &args[2]);
            println!("cosine similarity: {:.0}%", cosine * 100.0);
            println!(
                "near duplicate: {}",
                retrieval.near_duplicate(&args[1], &args[2])
            );
        }
        Some("similar") => {
            println!("usage: similar <phrase a> <phrase b>");
        }
        Some("retrieve") => {
            let query = args[1..].join(" ");
            for hit in retrieval.rank(&query, config.similarity.top_k) {
                println!("{} · score {:.2}", hit.document.title, hit.score);
                println!("  {}", hit.document.body);
            }
        }
        Some("alerts") => {
            let series = workbench.synthetic_series();
            let report = workbench.alert_report(&WorkbenchService::ph_values(&series));
            println!(
                "alerts detected: {} · visit recommendation: {}",
                report.count,
                if report.visit_recommended { "Yes" } else { "Maybe" }
            );
        }
        Some("notes") => {
            if args.len() > 1 {
                progress.save_notes(&args[1..].join(" "))?;
                println!("saved.");
            } else {
                println!("{}", progress.notes()?);
            }
        }
        _ => showcase(&content, &retrieval, &workbench, &config)?,
    }

    Ok(())
}

/// The foundations-lesson walkthrough: token explorer, embedding similarity,
/// mini retrieval, and the sensors alert rule, on the lesson defaults.
fn showcase(
    content: &ContentService,
    retrieval: &RetrievalService,
    workbench: &WorkbenchService,
    config: &Config,
) -> anyhow::Result<()> {
    let sample = "Brook trout prefer cold, clean streams with shade.";
    let usage = content.token_window_usage(sample, 1024);
    println!("Token Explorer");
    println!("  \"{sample}\"");
    println!(
        "  approx {} tokens · {}% of window",
        usage.approx_tokens, usage.percent
    );

    let a = "water quality is rising in spring";
    let b = "spring conductivity increases as snow melts";
    println!("Embedding Similarity");
    println!(
        "  {:.0}% · \"{a}\" vs \"{b}\"",
        retrieval.phrase_similarity(a, b) * 100.0
    );

    let query = "conductivity spikes";
    println!("Mini Retrieval · \"{query}\"");
    for hit in retrieval.rank(query, config.similarity.top_k) {
        println!("  {} · score {:.2}", hit.document.title, hit.score);
    }

    let series = workbench.synthetic_series();
    let report = workbench.alert_report(&WorkbenchService::ph_values(&series));
    println!("Sensors & Alerts");
    println!(
        "  alerts detected: {} · visit recommendation: {}",
        report.count,
        if report.visit_recommended { "Yes" } else { "Maybe" }
    );

    Ok(())
}
