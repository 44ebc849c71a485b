//! Page structure summaries for diagnosing extraction failures.

use scraper::{Html, Selector};
use serde::Serialize;

use crate::extract::cell_text;

/// Cells reported from a table's first row.
const FIRST_ROW_CELLS: usize = 10;
/// Characters kept per reported cell.
const CELL_TEXT_MAX: usize = 50;

/// Shape of one `<table>` found on a page.
#[derive(Debug, Clone, Serialize)]
pub struct TableSummary {
    pub index: usize,
    pub classes: Vec<String>,
    pub id: Option<String>,
    pub rows: usize,
    pub first_row: Vec<String>,
}

/// Summarize every table in the document, in document order.
pub fn probe_tables(html: &str) -> Vec<TableSummary> {
    let document = Html::parse_document(html);
    let (Ok(table_sel), Ok(row_sel), Ok(cell_sel)) = (
        Selector::parse("table"),
        Selector::parse("tr"),
        Selector::parse("th, td"),
    ) else {
        return Vec::new();
    };

    document
        .select(&table_sel)
        .enumerate()
        .map(|(index, table)| {
            let rows: Vec<_> = table.select(&row_sel).collect();
            let first_row = rows
                .first()
                .map(|row| {
                    row.select(&cell_sel)
                        .take(FIRST_ROW_CELLS)
                        .map(|c| cell_text(&c).chars().take(CELL_TEXT_MAX).collect())
                        .collect()
                })
                .unwrap_or_default();

            TableSummary {
                index,
                classes: table.value().classes().map(str::to_string).collect(),
                id: table.value().id().map(str::to_string),
                rows: rows.len(),
                first_row,
            }
        })
        .collect()
}

/// Elements whose class list mentions `needle` (case-insensitive), as
/// `(tag, classes)` pairs.
pub fn elements_with_class_containing(html: &str, needle: &str) -> Vec<(String, Vec<String>)> {
    let document = Html::parse_document(html);
    let Ok(sel) = Selector::parse("[class]") else {
        return Vec::new();
    };
    let needle = needle.to_ascii_lowercase();

    document
        .select(&sel)
        .filter_map(|el| {
            let classes: Vec<String> = el.value().classes().map(str::to_string).collect();
            classes
                .iter()
                .any(|c| c.to_ascii_lowercase().contains(&needle))
                .then(|| (el.value().name().to_string(), classes))
        })
        .collect()
}
