//! `wcl-importer run`: one import end to end, without the HTTP layer.

use std::path::Path;

use anyhow::{bail, Result};

use crate::cli::output;
use crate::config::ImporterConfig;
use crate::envelope::{SuccessEnvelope, NO_DATA_MESSAGE};
use crate::importer::{ImportOutcome, Importer};

/// Run the import and print the same envelope the trigger returns.
pub async fn run(out_dir: Option<&Path>) -> Result<()> {
    let config = ImporterConfig::from_env()?;
    let publisher = super::build_publisher(&config, out_dir)?;
    let importer = Importer::from_config(&config, publisher)?;

    match importer.run().await? {
        ImportOutcome::NoData => bail!(NO_DATA_MESSAGE),
        ImportOutcome::Published {
            extraction,
            file_path,
        } => {
            let envelope = SuccessEnvelope::new(&extraction, &file_path);
            if !output::is_quiet() {
                println!("  Imported {} records ({})", extraction.len(), extraction.source);
                match out_dir {
                    Some(dir) => println!(
                        "  Saved to {}",
                        dir.join(&config.container).join(&file_path).display()
                    ),
                    None => println!("  Uploaded to {}/{file_path}", config.container),
                }
                println!();
            }
            output::print_json(&envelope);
        }
    }

    Ok(())
}
