//! Snapshot naming and serialization for published record batches.

use chrono::{DateTime, Utc};

use crate::types::{PerformanceRecord, StatsResult};

/// Directory that holds every snapshot inside the container.
pub const SNAPSHOT_DIR: &str = "mythic_damage_stats";
/// File name stem; the timestamp and extension are appended.
pub const SNAPSHOT_STEM: &str = "mythic_damage";
/// Timestamp layout used in snapshot file names.
pub const SNAPSHOT_TIME_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Storage path for a snapshot taken at `at`, e.g.
/// `mythic_damage_stats/mythic_damage_20250101_120000.json`.
pub fn snapshot_path(at: DateTime<Utc>) -> String {
    format!(
        "{SNAPSHOT_DIR}/{SNAPSHOT_STEM}_{}.json",
        at.format(SNAPSHOT_TIME_FORMAT)
    )
}

/// Pretty-printed JSON array of the records.
pub fn to_json_pretty(records: &[PerformanceRecord]) -> StatsResult<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(records)?)
}

/// Parse a snapshot body back into records.
pub fn from_json(bytes: &[u8]) -> StatsResult<Vec<PerformanceRecord>> {
    Ok(serde_json::from_slice(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::fallback_records;
    use chrono::TimeZone;

    #[test]
    fn test_snapshot_path_format() {
        let at = Utc.with_ymd_and_hms(2025, 3, 7, 9, 5, 2).unwrap();
        assert_eq!(
            snapshot_path(at),
            "mythic_damage_stats/mythic_damage_20250307_090502.json"
        );
    }

    #[test]
    fn test_snapshot_body_is_pretty_array() {
        let records = fallback_records();
        let body = to_json_pretty(&records[..2]).unwrap();
        let text = String::from_utf8(body).unwrap();
        assert!(text.starts_with("[\n  {\n    \"class\": \"Evoker\""));
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let records = fallback_records();
        let body = to_json_pretty(&records).unwrap();
        let back = from_json(&body).unwrap();
        assert_eq!(back.len(), crate::fallback::FALLBACK_LEN);
        for (a, b) in records.iter().zip(&back) {
            assert_eq!(a.class_name, b.class_name);
            assert_eq!(a.spec_name, b.spec_name);
            assert_eq!(a.score, b.score);
            assert_eq!(a.parses, b.parses);
        }
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(from_json(b"{not json").is_err());
    }
}
