//! `wcl-importer scrape`: fetch and extract without publishing.

use std::path::Path;

use anyhow::{Context, Result};
use wcl_stats::snapshot::to_json_pretty;

use crate::acquisition::HttpClient;
use crate::cli::output;
use crate::config::ImporterConfig;
use crate::importer::scrape;

/// Scrape the page and print (or save) the records.
pub async fn run(out_file: Option<&Path>) -> Result<()> {
    let config = ImporterConfig::from_env()?;
    let client = HttpClient::new(config.fetch_timeout)?;

    if !output::is_quiet() {
        println!("  Scraping {}...", config.source_url);
    }
    let extraction = scrape(&client, &config.source_url).await?;

    if let Some(path) = out_file {
        let body = to_json_pretty(&extraction.records)?;
        std::fs::write(path, body).with_context(|| format!("writing {}", path.display()))?;
    }

    if output::is_json() {
        output::print_json(&serde_json::json!({
            "source": extraction.source,
            "records": extraction.records,
            "output": out_file.map(|p| p.display().to_string()),
        }));
        return Ok(());
    }

    if !output::is_quiet() {
        println!("  Source: {}", extraction.source);
        println!("  Records: {}\n", extraction.len());
        for (i, rec) in extraction.records.iter().enumerate() {
            println!(
                "  {:>3}. {:<14} {:<15} {:>7.2} {:>8}",
                i + 1,
                rec.class_name,
                rec.spec_name,
                rec.score,
                rec.parses
            );
        }
        if let Some(path) = out_file {
            println!("\n  Saved to {}", path.display());
        }
    }

    Ok(())
}
