//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `score_mirror` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Writing snapshots to stdout or to JSON files
//!
//! All core functionality is implemented in the library crate.

use std::process;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};

use score_mirror::initialization::init_logger_with;
use score_mirror::{Config, Extractor, Snapshot};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    let extractor = Extractor::from_config(&config)?;

    if let Some(dir) = &config.out {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    }

    let mut failed = 0usize;
    for (i, page) in config.pages.iter().enumerate() {
        // Stay polite toward the remote when extracting several pages
        if i > 0 && config.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(config.delay_ms)).await;
        }

        match extractor.extract_everything(page, config.fast).await {
            Ok(snapshot) => {
                log_summary(page, &snapshot);
                let json = serde_json::to_string_pretty(&snapshot)
                    .context("Failed to serialize snapshot")?;
                match &config.out {
                    Some(dir) => {
                        let path = dir.join(format!("{}.json", output_stem(page)));
                        std::fs::write(&path, json)
                            .with_context(|| format!("Failed to write {}", path.display()))?;
                        println!("Saved {} to {}", page, path.display());
                    }
                    None => println!("{}", json),
                }
            }
            Err(e) => {
                error!("extraction failed for {}: {:#}", page, e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        eprintln!(
            "score_mirror: {} of {} page(s) failed to extract",
            failed,
            config.pages.len()
        );
        process::exit(1);
    }
    Ok(())
}

/// File stem for a page path: slashes become underscores, the root path
/// maps to `homepage`.
fn output_stem(page: &str) -> String {
    let stem = page.replace('/', "_");
    if stem.is_empty() || stem.chars().all(|c| c == '_') {
        "homepage".to_string()
    } else {
        stem
    }
}

fn log_summary(page: &str, snapshot: &Snapshot) {
    match snapshot {
        Snapshot::Full(full) => {
            info!(
                "extracted {}: {} elements, {} classes, {} ids, {} images, {} links, {} news cards, {} matches, raw HTML {}KB",
                page,
                full.elements.len(),
                full.css.all_classes.len(),
                full.css.all_ids.len(),
                full.images.len(),
                full.links.len(),
                full.news_cards.len(),
                full.matches_list.len(),
                full.html_length / 1024
            );
        }
        Snapshot::Fast(fast) => {
            info!(
                "extracted {} (fast): {} news cards, {} matches",
                page,
                fast.news_cards.len(),
                fast.matches_list.len()
            );
        }
    }
}
