//! `wcl-importer probe`: show which tables the statistics page serves.
//!
//! Useful when the importer keeps reporting fallback data: it lists every
//! table the raw markup contains, and any element whose class mentions
//! "summary".

use std::path::Path;

use anyhow::{Context, Result};
use wcl_stats::extract::TABLE_SELECTOR;
use wcl_stats::probe::{elements_with_class_containing, probe_tables};

use crate::acquisition::HttpClient;
use crate::cli::output;
use crate::config::ImporterConfig;

/// Characters of markup written by `--save`.
const SNIPPET_LEN: usize = 10_000;

/// Fetch the page and describe its tables.
pub async fn run(save: Option<&Path>) -> Result<()> {
    let config = ImporterConfig::from_env()?;
    let client = HttpClient::new(config.fetch_timeout)?;
    let page = client.get(&config.source_url).await?;

    let tables = probe_tables(&page.body);
    let summary_elements = elements_with_class_containing(&page.body, "summary");

    if let Some(path) = save {
        let snippet: String = page.body.chars().take(SNIPPET_LEN).collect();
        std::fs::write(path, snippet).with_context(|| format!("writing {}", path.display()))?;
    }

    if output::is_json() {
        output::print_json(&serde_json::json!({
            "url": page.final_url,
            "bytes": page.body.len(),
            "tables": tables,
            "summary_elements": summary_elements
                .iter()
                .map(|(tag, classes)| serde_json::json!({ "tag": tag, "classes": classes }))
                .collect::<Vec<_>>(),
        }));
        return Ok(());
    }

    println!("  {} ({} bytes)", page.final_url, page.body.len());
    println!("  Found {} tables on the page", tables.len());
    for t in &tables {
        println!();
        println!("  Table {}:", t.index + 1);
        println!("    Classes: {:?}", t.classes);
        println!("    ID: {}", t.id.as_deref().unwrap_or("None"));
        println!("    Rows: {}", t.rows);
        if !t.first_row.is_empty() {
            println!("    First row cells: {}", t.first_row.len());
            for (j, cell) in t.first_row.iter().enumerate() {
                println!("      Cell {}: {cell}", j + 1);
            }
        }
    }

    println!();
    println!(
        "  Found {} elements with 'summary' in class",
        summary_elements.len()
    );
    for (tag, classes) in &summary_elements {
        println!("    Tag: {tag}, Classes: {classes:?}");
    }

    let matched = tables
        .iter()
        .any(|t| t.classes.iter().any(|c| c == "summary-table"));
    println!();
    if matched {
        println!("  [OK] {TABLE_SELECTOR} present; live extraction should work");
    } else {
        println!("  [!!] {TABLE_SELECTOR} missing; imports will use fallback data");
    }

    if let Some(path) = save {
        println!("\n  Saved first {SNIPPET_LEN} characters to {}", path.display());
    }

    Ok(())
}
