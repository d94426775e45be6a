use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::{
    error::{Result, ScrapeError},
    types::{Cell, Table},
};

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScrapeError::Parse(format!("Invalid selector {}: {:?}", css, e)))
}

/// Parses the first `<table>` of the document into a flat `Table`.
///
/// Header rows come from `<thead>`, or when there is none, from the leading
/// rows made only of `<th>` cells. With several header levels the outermost
/// ones are dropped and the innermost row names the columns.
pub fn parse_first_table(html: &str) -> Result<Table> {
    let document = Html::parse_document(html);
    let table = document
        .select(&selector("table")?)
        .next()
        .ok_or_else(|| ScrapeError::Parse("No table found in document".to_string()))?;

    let mut header_rows: Vec<ElementRef> = table.select(&selector("thead tr")?).collect();
    let mut body_rows: Vec<ElementRef> = table.select(&selector("tbody tr, tfoot tr")?).collect();

    if header_rows.is_empty() {
        let leading = body_rows.iter().take_while(|row| is_header_row(row)).count();
        header_rows = body_rows.drain(..leading).collect();
    }

    let levels: Vec<Vec<String>> = header_rows.iter().map(|row| expand_row(row)).collect();
    debug!("Found table with {} header level(s)", levels.len());
    let columns = levels
        .into_iter()
        .last()
        .ok_or_else(|| ScrapeError::Parse("Table has no header row".to_string()))?;

    let rows: Vec<Vec<Cell>> = body_rows
        .iter()
        .map(|row| expand_row(row).iter().map(|text| Cell::parse(text)).collect::<Vec<_>>())
        .collect();

    Ok(Table::new(columns, rows))
}

fn row_cells<'a>(row: &ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|el| matches!(el.value().name(), "th" | "td"))
}

fn is_header_row(row: &ElementRef) -> bool {
    let mut cells = row_cells(row).peekable();
    cells.peek().is_some() && cells.all(|el| el.value().name() == "th")
}

/// Cell texts of a row, repeating a cell once per spanned column.
fn expand_row(row: &ElementRef) -> Vec<String> {
    let mut out = Vec::new();
    for cell in row_cells(row) {
        let span = cell
            .value()
            .attr("colspan")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(1);
        let text = collapse_ws(&cell.text().collect::<String>());
        out.extend(std::iter::repeat(text).take(span));
    }
    out
}

fn collapse_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
