//! JSON envelopes returned by the trigger and the `run` command.

use chrono::{DateTime, Utc};
use serde::Serialize;
use wcl_stats::{DataSource, Extraction, PerformanceRecord};

/// Records echoed back in a success response.
pub const SAMPLE_SIZE: usize = 3;

/// Body of the 400 response when nothing was scraped.
pub const NO_DATA_MESSAGE: &str = "No data scraped from Warcraft Logs";

/// Prefix for the message embedded in error envelopes.
pub const ERROR_PREFIX: &str = "Error processing WCL data import";

#[derive(Debug, Clone, Serialize)]
pub struct SuccessEnvelope {
    pub status: &'static str,
    pub records_processed: usize,
    pub file_path: String,
    pub timestamp: DateTime<Utc>,
    pub sample_data: Vec<PerformanceRecord>,
    pub source: DataSource,
}

impl SuccessEnvelope {
    pub fn new(extraction: &Extraction, file_path: impl Into<String>) -> Self {
        Self {
            status: "success",
            records_processed: extraction.len(),
            file_path: file_path.into(),
            timestamp: Utc::now(),
            sample_data: extraction.sample(SAMPLE_SIZE).to_vec(),
            source: extraction.source,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorEnvelope {
    pub status: &'static str,
    pub error: String,
    pub timestamp: DateTime<Utc>,
}

impl ErrorEnvelope {
    /// Wrap a failure as `Error processing WCL data import: <cause>`.
    pub fn from_error(err: &dyn std::fmt::Display) -> Self {
        Self::new(format!("{ERROR_PREFIX}: {err}"))
    }

    pub fn new(error: impl Into<String>) -> Self {
        Self {
            status: "error",
            error: error.into(),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wcl_stats::fallback_records;

    #[test]
    fn test_success_envelope_samples_first_three() {
        let ex = Extraction {
            records: fallback_records(),
            source: DataSource::Fallback,
        };
        let env = SuccessEnvelope::new(&ex, "mythic_damage_stats/x.json");
        let v = serde_json::to_value(&env).unwrap();
        assert_eq!(v["status"], "success");
        assert_eq!(v["records_processed"], wcl_stats::FALLBACK_LEN);
        assert_eq!(v["source"], "fallback");
        let sample = v["sample_data"].as_array().unwrap();
        assert_eq!(sample.len(), 3);
        assert_eq!(sample[0]["spec"], "Devastation");
        assert_eq!(sample[2]["class"], "Warlock");
    }

    #[test]
    fn test_error_envelope_message() {
        let env = ErrorEnvelope::from_error(&"boom");
        assert_eq!(env.error, "Error processing WCL data import: boom");
        let v = serde_json::to_value(&env).unwrap();
        let keys: Vec<_> = v.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 3);
        assert_eq!(v["status"], "error");
    }
}
