//! The import pipeline: fetch → extract → publish.
//!
//! Each call builds its records from scratch; nothing is cached between
//! invocations.

use tracing::info;
use wcl_stats::{extract_records, Extraction};

use crate::acquisition::HttpClient;
use crate::config::ImporterConfig;
use crate::error::ImportResult;
use crate::publish::Publisher;

/// Result of one end-to-end import.
#[derive(Debug)]
pub enum ImportOutcome {
    /// Extraction produced no records; nothing was written.
    NoData,
    /// Records were written to `file_path`.
    Published {
        extraction: Extraction,
        file_path: String,
    },
}

/// Scrapes the statistics page and publishes a snapshot.
#[derive(Clone)]
pub struct Importer {
    client: HttpClient,
    source_url: String,
    publisher: Publisher,
}

impl Importer {
    pub fn new(client: HttpClient, source_url: impl Into<String>, publisher: Publisher) -> Self {
        Self {
            client,
            source_url: source_url.into(),
            publisher,
        }
    }

    /// Build the HTTP client from `config` and wire it to `publisher`.
    pub fn from_config(config: &ImporterConfig, publisher: Publisher) -> ImportResult<Self> {
        let client = HttpClient::new(config.fetch_timeout)?;
        Ok(Self::new(client, config.source_url.clone(), publisher))
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    pub fn publisher(&self) -> &Publisher {
        &self.publisher
    }

    /// Fetch and extract only.
    pub async fn scrape(&self) -> ImportResult<Extraction> {
        scrape(&self.client, &self.source_url).await
    }

    /// Fetch, extract and publish.
    pub async fn run(&self) -> ImportResult<ImportOutcome> {
        info!("starting to scrape WCL damage data");
        let extraction = self.scrape().await?;
        if extraction.is_empty() {
            return Ok(ImportOutcome::NoData);
        }
        info!(
            records = extraction.len(),
            source = %extraction.source,
            "scraped records"
        );

        let file_path = self.publisher.publish(&extraction.records).await?;
        Ok(ImportOutcome::Published {
            extraction,
            file_path,
        })
    }
}

/// Fetch `url` with `client` and extract its statistics table.
pub async fn scrape(client: &HttpClient, url: &str) -> ImportResult<Extraction> {
    let page = client.get(url).await.inspect_err(|e| {
        tracing::error!(error = %e, url, "error scraping WCL data");
    })?;
    Ok(extract_records(&page.body))
}
