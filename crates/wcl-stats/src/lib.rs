//! WCL stats: extraction and normalization of Warcraft Logs class/spec statistics.

pub mod clean;
pub mod extract;
pub mod fallback;
pub mod probe;
pub mod snapshot;
pub mod types;

pub use clean::{clean_parses, clean_score};
pub use extract::{extract_records, extract_table_rows};
pub use fallback::{fallback_records, FALLBACK_LEN, FALLBACK_ROWS};
pub use probe::{probe_tables, TableSummary};
pub use snapshot::{snapshot_path, to_json_pretty};
pub use types::*;
