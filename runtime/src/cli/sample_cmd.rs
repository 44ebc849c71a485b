//! `wcl-importer sample`: write the reference dataset to a file.

use std::path::Path;

use anyhow::{Context, Result};
use wcl_stats::fallback_records;
use wcl_stats::snapshot::to_json_pretty;

use crate::cli::output;

/// Default output file.
pub const DEFAULT_SAMPLE_FILE: &str = "sample_wcl_data.json";

/// Stamp the fallback dataset with the current time and save it.
pub fn run(out_file: &Path) -> Result<()> {
    let records = fallback_records();
    let body = to_json_pretty(&records)?;
    std::fs::write(out_file, body).with_context(|| format!("writing {}", out_file.display()))?;

    if output::is_json() {
        output::print_json(&serde_json::json!({
            "records": records.len(),
            "output": out_file.display().to_string(),
        }));
    } else if !output::is_quiet() {
        println!("  Created {} records", records.len());
        for (i, rec) in records.iter().take(5).enumerate() {
            println!(
                "  {}: {} {} {:.2} ({} parses)",
                i + 1,
                rec.class_name,
                rec.spec_name,
                rec.score,
                rec.parses
            );
        }
        println!("\n  Data saved to {}", out_file.display());
    }

    Ok(())
}
