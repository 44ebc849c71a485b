//! Numeric cleaning for table cells.
//!
//! Cells carry formatting (percent signs, thousands separators, icons'
//! alt text). Anything that does not survive cleaning becomes zero rather
//! than rejecting the row.

/// Keep digits and `.`, then parse as a float. Empty or unparseable → `0.0`.
pub fn clean_score(raw: &str) -> f64 {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if kept.is_empty() {
        return 0.0;
    }
    kept.parse::<f64>().unwrap_or(0.0)
}

/// Keep digits and `,`, drop the separators, then parse as an integer.
/// Empty or unparseable → `0`.
pub fn clean_parses(raw: &str) -> u64 {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',')
        .collect();
    let digits = kept.replace(',', "");
    if digits.is_empty() {
        return 0;
    }
    digits.parse::<u64>().unwrap_or(0)
}
