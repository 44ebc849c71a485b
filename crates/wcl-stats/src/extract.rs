//! Statistics table extraction.
//!
//! Parses the zone statistics page with `scraper`, locates the
//! `table.summary-table` element and turns each body row into a
//! [`PerformanceRecord`]. When nothing usable comes out, the built-in
//! reference dataset is substituted and a warning is logged.

use scraper::{ElementRef, Html, Selector};

use crate::clean::{clean_parses, clean_score};
use crate::fallback::fallback_records;
use crate::types::{DataSource, Extraction, PerformanceRecord};

/// CSS selector for the statistics table.
pub const TABLE_SELECTOR: &str = "table.summary-table";

/// Class token that marks the statistics table in raw markup.
const TABLE_CLASS: &str = "summary-table";

/// Minimum cells a row needs: class, spec, score, max, parses.
pub const MIN_CELLS: usize = 5;

const COL_CLASS: usize = 0;
const COL_SPEC: usize = 1;
const COL_SCORE: usize = 2;
const COL_PARSES: usize = 4;

/// Extract records from the page, falling back to the reference dataset
/// when the table is missing or yields no rows.
pub fn extract_records(html: &str) -> Extraction {
    match extract_table_rows(html) {
        Some(records) if !records.is_empty() => {
            tracing::debug!(rows = records.len(), "parsed statistics table");
            Extraction {
                records,
                source: DataSource::Live,
            }
        }
        found => {
            if found.is_some() {
                tracing::warn!("summary table has no usable rows, using fallback data");
            } else {
                tracing::warn!("could not find summary table, using fallback data");
            }
            Extraction {
                records: fallback_records(),
                source: DataSource::Fallback,
            }
        }
    }
}

/// Parse the statistics table only.
///
/// Returns `None` when the table is absent and `Some(vec![])` when it is
/// present but every row was rejected.
pub fn extract_table_rows(html: &str) -> Option<Vec<PerformanceRecord>> {
    let document = Html::parse_document(html);
    let table_sel = Selector::parse(TABLE_SELECTOR).ok()?;
    let table = document.select(&table_sel).next()?;

    let rows = body_rows(&table, raw_table_has_tbody(html));
    let cell_sel = Selector::parse("td").ok()?;

    let mut records = Vec::with_capacity(rows.len());
    for (idx, row) in rows.iter().enumerate() {
        let cells: Vec<ElementRef<'_>> = row.select(&cell_sel).collect();
        if cells.len() < MIN_CELLS {
            tracing::debug!(row = idx, cells = cells.len(), "skipping short row");
            continue;
        }

        let class_name = cell_text(&cells[COL_CLASS]);
        let spec_name = cell_text(&cells[COL_SPEC]);
        let score = clean_score(&cell_text(&cells[COL_SCORE]));
        let parses = clean_parses(&cell_text(&cells[COL_PARSES]));

        records.push(PerformanceRecord::new(class_name, spec_name, score, parses));
    }

    Some(records)
}

/// Rows that carry data, header excluded.
///
/// html5ever wraps bare `<tr>`s in an implied `<tbody>`, so whether the
/// source markup declared one is decided from the raw text. With an explicit
/// body, its rows are taken as-is; without one, the first row is the header.
fn body_rows<'a>(table: &ElementRef<'a>, explicit_tbody: bool) -> Vec<ElementRef<'a>> {
    let row_sel = match Selector::parse("tr") {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };

    if explicit_tbody {
        let tbody = table
            .children()
            .filter_map(ElementRef::wrap)
            .find(|child| child.value().name() == "tbody");
        if let Some(tbody) = tbody {
            return tbody.select(&row_sel).collect();
        }
    }

    table.select(&row_sel).skip(1).collect()
}

/// Whether the first `summary-table` in the raw markup declares its own
/// `<tbody>`. Only a table whose class list holds the exact token counts,
/// and a `<tbody>` inside a nested table does not.
fn raw_table_has_tbody(html: &str) -> bool {
    let lc = html.to_ascii_lowercase();
    let mut from = 0;
    while let Some(start) = find_tag(&lc, from, "table") {
        let Some(open_end) = lc[start..].find('>').map(|i| start + i) else {
            return false;
        };
        let has_class = class_attr(&lc[start..open_end])
            .is_some_and(|classes| classes.split_ascii_whitespace().any(|c| c == TABLE_CLASS));
        if has_class {
            return direct_tbody(&lc, open_end + 1);
        }
        from = open_end + 1;
    }
    false
}

/// Position of the next `<name` open tag at or after `from`.
fn find_tag(lc: &str, from: usize, name: &str) -> Option<usize> {
    let open = format!("<{name}");
    let mut pos = from;
    while let Some(rel) = lc.get(pos..)?.find(&open) {
        let start = pos + rel;
        if opens_tag(&lc[start..], name) {
            return Some(start);
        }
        pos = start + open.len();
    }
    None
}

/// Whether `s` starts with a `<name` open tag; `<table` does not open
/// `<tablefoo>`.
fn opens_tag(s: &str, name: &str) -> bool {
    let Some(rest) = s.strip_prefix('<').and_then(|r| r.strip_prefix(name)) else {
        return false;
    };
    rest.chars()
        .next()
        .map_or(true, |c| c == '>' || c == '/' || c.is_ascii_whitespace())
}

/// Value of the `class` attribute in an open tag, quotes stripped.
fn class_attr(open_tag: &str) -> Option<&str> {
    let bytes = open_tag.as_bytes();
    let mut search = 0;
    while let Some(rel) = open_tag[search..].find("class") {
        let at = search + rel;
        search = at + "class".len();
        if at == 0 || !bytes[at - 1].is_ascii_whitespace() {
            continue;
        }
        let rest = open_tag[search..].trim_start();
        let Some(value) = rest.strip_prefix('=') else {
            continue;
        };
        let value = value.trim_start();
        return Some(match value.chars().next() {
            Some(q @ ('"' | '\'')) => {
                let inner = &value[1..];
                &inner[..inner.find(q).unwrap_or(inner.len())]
            }
            _ => {
                let end = value
                    .find(|c: char| c.is_ascii_whitespace() || c == '/')
                    .unwrap_or(value.len());
                &value[..end]
            }
        });
    }
    None
}

/// Whether a `<tbody>` opens at nesting depth zero between `from` and the
/// matching `</table>`.
fn direct_tbody(lc: &str, from: usize) -> bool {
    let mut depth = 0usize;
    let mut pos = from;
    while let Some(rel) = lc[pos..].find('<') {
        let at = pos + rel;
        let tail = &lc[at..];
        if tail.starts_with("</table") {
            if depth == 0 {
                return false;
            }
            depth -= 1;
        } else if opens_tag(tail, "table") {
            depth += 1;
        } else if depth == 0 && opens_tag(tail, "tbody") {
            return true;
        }
        pos = at + 1;
    }
    false
}

/// Concatenate the element's text nodes, each trimmed, skipping empties.
pub(crate) fn cell_text(cell: &ElementRef<'_>) -> String {
    cell.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .concat()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::FALLBACK_LEN;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    fn page(table: &str) -> String {
        format!("<html><head><title>Stats</title></head><body><div>{table}</div></body></html>")
    }

    const TBODY_TABLE: &str = r#"
        <table class="summary-table">
          <thead><tr><th>Class</th><th>Spec</th><th>Score</th><th>Max</th><th>Parses</th></tr></thead>
          <tbody>
            <tr><td><img src="evoker.jpg">Evoker</td><td>Devastation</td><td>83.73%</td><td>113.28</td><td>28,751</td></tr>
            <tr><td>Hunter</td><td>Marksmanship</td><td>82.40</td><td>115.88</td><td>28,534</td></tr>
          </tbody>
        </table>"#;

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn with_captured_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        let out = tracing::subscriber::with_default(subscriber, f);
        let logs = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
        (out, logs)
    }

    #[test]
    fn test_extract_tbody_rows() {
        let ex = extract_records(&page(TBODY_TABLE));
        assert_eq!(ex.source, DataSource::Live);
        assert_eq!(ex.len(), 2);
        assert_eq!(ex.records[0].class_name, "Evoker");
        assert_eq!(ex.records[0].spec_name, "Devastation");
        assert_eq!(ex.records[0].score, 83.73);
        assert_eq!(ex.records[0].parses, 28751);
        assert_eq!(ex.records[1].class_name, "Hunter");
        assert_eq!(ex.records[1].parses, 28534);
    }

    #[test]
    fn test_extract_without_tbody_skips_first_row() {
        let table = r#"
            <table class="summary-table">
              <tr><td>Class</td><td>Spec</td><td>Score</td><td>Max</td><td>Parses</td></tr>
              <tr><td>Mage</td><td>Fire</td><td>78.17</td><td>98.11</td><td>12,253</td></tr>
            </table>"#;
        let rows = extract_table_rows(&page(table)).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].class_name, "Mage");
        assert_eq!(rows[0].score, 78.17);
    }

    #[test]
    fn test_explicit_tbody_keeps_first_body_row() {
        let table = r#"
            <table class="summary-table"><tbody>
              <tr><td>Rogue</td><td>Outlaw</td><td>76.23</td><td>90.0</td><td>5,443</td></tr>
            </tbody></table>"#;
        let rows = extract_table_rows(&page(table)).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].spec_name, "Outlaw");
    }

    #[test]
    fn test_short_rows_are_dropped() {
        let table = r#"
            <table class="summary-table"><tbody>
              <tr><td>Monk</td><td>Brewmaster</td><td>40.00</td><td>61.2</td></tr>
              <tr><td colspan="5">Ad slot</td></tr>
              <tr><td>Monk</td><td>Windwalker</td><td>78.71</td><td>100.16</td><td>16,890</td></tr>
            </tbody></table>"#;
        let rows = extract_table_rows(&page(table)).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].spec_name, "Windwalker");
    }

    #[test]
    fn test_malformed_numbers_become_zero() {
        let table = r#"
            <table class="summary-table"><tbody>
              <tr><td>Druid</td><td>Feral</td><td>-</td><td>-</td><td>n/a</td></tr>
            </tbody></table>"#;
        let rows = extract_table_rows(&page(table)).unwrap();
        assert_eq!(rows[0].score, 0.0);
        assert_eq!(rows[0].parses, 0);
    }

    #[test]
    fn test_cell_text_joins_trimmed_nodes() {
        let table = r#"
            <table class="summary-table"><tbody>
              <tr><td> <span>Demon Hunter</span> </td><td>
                Havoc
              </td><td>79.50</td><td>105.82</td><td>34,445</td></tr>
            </tbody></table>"#;
        let rows = extract_table_rows(&page(table)).unwrap();
        assert_eq!(rows[0].class_name, "Demon Hunter");
        assert_eq!(rows[0].spec_name, "Havoc");
    }

    #[test]
    fn test_missing_table_is_none() {
        assert!(extract_table_rows(&page("<table class=\"other\"></table>")).is_none());
        assert!(extract_table_rows("").is_none());
    }

    #[test]
    fn test_missing_table_uses_fallback_and_warns() {
        let (ex, logs) = with_captured_logs(|| extract_records(&page("<p>Loading…</p>")));
        assert_eq!(ex.source, DataSource::Fallback);
        assert_eq!(ex.len(), FALLBACK_LEN);
        assert_eq!(ex.records[0].class_name, "Evoker");
        assert!(logs.contains("WARN"), "logs: {logs}");
        assert!(logs.contains("could not find summary table"), "logs: {logs}");
    }

    #[test]
    fn test_empty_table_uses_fallback() {
        let table = r#"<table class="summary-table"><tbody>
            <tr><td>only</td><td>two</td></tr>
        </tbody></table>"#;
        let (ex, logs) = with_captured_logs(|| extract_records(&page(table)));
        assert_eq!(ex.source, DataSource::Fallback);
        assert_eq!(ex.len(), FALLBACK_LEN);
        assert!(logs.contains("no usable rows"), "logs: {logs}");
    }

    #[test]
    fn test_each_record_gets_its_own_timestamp_call() {
        let ex = extract_records(&page(TBODY_TABLE));
        assert!(ex.records[0].captured_at <= ex.records[1].captured_at);
    }

    #[test]
    fn test_raw_tbody_detection() {
        assert!(raw_table_has_tbody(TBODY_TABLE));
        assert!(!raw_table_has_tbody(
            "<table class=\"summary-table\"><tr><td>x</td></tr></table><table><tbody></tbody></table>"
        ));
        assert!(raw_table_has_tbody(
            "<table class=\"nav\"></table><TABLE CLASS=\"summary-table\"><TBODY></TBODY></TABLE>"
        ));
        assert!(raw_table_has_tbody(
            "<table id=x class='wide summary-table'><tbody></tbody></table>"
        ));
    }

    #[test]
    fn test_tbody_detection_requires_exact_class_token() {
        assert!(!raw_table_has_tbody(
            "<table class=\"summary-table-legend\"><tbody></tbody></table>\
             <table class=\"summary-table\"><tr><td>x</td></tr></table>"
        ));
        assert!(raw_table_has_tbody(
            "<table class=\"summary-table-legend\"><tr><td>x</td></tr></table>\
             <table class=\"summary-table\"><tbody></tbody></table>"
        ));
        assert!(!raw_table_has_tbody("<table data-class=\"summary-table\"><tbody></tbody></table>"));
    }

    #[test]
    fn test_tbody_in_nested_table_is_not_the_tables_own() {
        assert!(!raw_table_has_tbody(
            "<table class=\"summary-table\"><tr><td><table><tbody><tr><td>i</td></tr></tbody></table></td></tr></table>"
        ));
        assert!(raw_table_has_tbody(
            "<table class=\"summary-table\"><thead><tr><td><table></table></td></tr></thead><tbody></tbody></table>"
        ));
    }

    #[test]
    fn test_legend_table_before_tbody_table_keeps_first_row() {
        let html = page(&format!(
            r#"<table class="summary-table-legend"><tr><td>Key</td></tr></table>{TBODY_TABLE}"#
        ));
        let specs: Vec<_> = extract_table_rows(&html)
            .unwrap()
            .into_iter()
            .map(|r| r.spec_name)
            .collect();
        assert_eq!(specs, ["Devastation", "Marksmanship"]);
    }

    #[test]
    fn test_legend_table_with_tbody_does_not_hide_header_row() {
        let html = page(
            r#"<table class="summary-table-legend"><tbody><tr><td>Key</td></tr></tbody></table>
            <table class="summary-table">
              <tr><td>Class</td><td>Spec</td><td>Score</td><td>Max</td><td>Parses</td></tr>
              <tr><td>Mage</td><td>Fire</td><td>78.17</td><td>98.11</td><td>12,253</td></tr>
            </table>"#,
        );
        let specs: Vec<_> = extract_table_rows(&html)
            .unwrap()
            .into_iter()
            .map(|r| r.spec_name)
            .collect();
        assert_eq!(specs, ["Fire"]);
    }
}
