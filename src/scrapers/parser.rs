use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};

use crate::models::mod_record::PoedbRow;

lazy_static! {
    static ref TABLE: Selector = Selector::parse("table").expect("static selector");
    static ref BODY_ROW: Selector = Selector::parse("tbody tr").expect("static selector");
    static ref CELL: Selector = Selector::parse("td").expect("static selector");
}

/// Rows of the first table on a PoEDB mod page.
///
/// Columns: id, text, domain, comma-separated tags. Rows with fewer than
/// four cells (headers, spacer rows) are skipped.
pub fn parse_mod_table(html: &str) -> Vec<PoedbRow> {
    let document = Html::parse_document(html);
    let Some(table) = document.select(&TABLE).next() else {
        return Vec::new();
    };

    table
        .select(&BODY_ROW)
        .filter_map(|row| {
            let cols: Vec<String> = row.select(&CELL).map(cell_text).collect();
            if cols.len() < 4 {
                return None;
            }
            Some(PoedbRow {
                id: cols[0].clone(),
                text: cols[1].clone(),
                domain: cols[2].clone(),
                tags: split_tags(&cols[3]),
            })
        })
        .collect()
}

/// Text of a cell with every text node trimmed and concatenated.
fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().map(str::trim).collect()
}

pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .collect()
}
