//! Core data types for scraped class/spec performance statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One class/spec row of the statistics table.
///
/// Field names on the wire match the blobs already stored in the data lake:
/// `class`, `spec`, `score`, `parses`, `scraped_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRecord {
    #[serde(rename = "class")]
    pub class_name: String,
    #[serde(rename = "spec")]
    pub spec_name: String,
    pub score: f64,
    pub parses: u64,
    #[serde(rename = "scraped_at")]
    pub captured_at: DateTime<Utc>,
}

impl PerformanceRecord {
    /// Build a record stamped with the current UTC time.
    pub fn new(
        class_name: impl Into<String>,
        spec_name: impl Into<String>,
        score: f64,
        parses: u64,
    ) -> Self {
        Self {
            class_name: class_name.into(),
            spec_name: spec_name.into(),
            score,
            parses,
            captured_at: Utc::now(),
        }
    }
}

/// Where a batch of records came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    /// Parsed from the live statistics table.
    Live,
    /// The built-in reference dataset, used when the table could not be read.
    Fallback,
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::Live => "live",
            DataSource::Fallback => "fallback",
        }
    }
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of running the extractor over one page.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub records: Vec<PerformanceRecord>,
    pub source: DataSource,
}

impl Extraction {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First `n` records (or all of them if there are fewer).
    pub fn sample(&self, n: usize) -> &[PerformanceRecord] {
        &self.records[..self.records.len().min(n)]
    }
}

/// Errors that can occur in the stats library.
#[derive(thiserror::Error, Debug)]
pub enum StatsError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience result type.
pub type StatsResult<T> = Result<T, StatsError>;
