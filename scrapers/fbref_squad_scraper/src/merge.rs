use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::{
    category::{SEASON, SQUAD},
    error::{Result, ScrapeError},
    normalizer::dedupe_names,
    types::{Cell, NormalizedTable, Table},
};

/// Outer-joins normalized category tables on `SQUAD` and `SEASON`.
///
/// The first table fixes the row order; squads first seen in a later table
/// are appended. Key columns come first and appear once.
pub fn merge_season_tables(tables: &[NormalizedTable]) -> Result<Table> {
    let mut header = vec![SQUAD.to_string(), SEASON.to_string()];
    let mut layouts = Vec::with_capacity(tables.len());

    for normalized in tables {
        let table = &normalized.table;
        let squad_idx = key_index(table, SQUAD, normalized)?;
        let season_idx = key_index(table, SEASON, normalized)?;
        let mut value_columns = Vec::new();
        for (i, name) in table.columns.iter().enumerate() {
            if i != squad_idx && i != season_idx {
                value_columns.push((i, header.len()));
                header.push(name.clone());
            }
        }
        layouts.push((squad_idx, season_idx, value_columns));
    }

    let width = header.len();
    let mut rows: Vec<Vec<Cell>> = Vec::new();
    let mut row_of: HashMap<(String, String), usize> = HashMap::new();

    for (normalized, (squad_idx, season_idx, value_columns)) in tables.iter().zip(&layouts) {
        let mut seen = HashSet::new();
        for row in &normalized.table.rows {
            let key = (row[*squad_idx].to_string(), row[*season_idx].to_string());
            if !seen.insert(key.clone()) {
                return Err(ScrapeError::Parse(format!(
                    "Duplicate row for squad {} in {} table",
                    key.0, normalized.category
                )));
            }
            let target = *row_of.entry(key).or_insert_with(|| {
                let mut fresh = vec![Cell::Empty; width];
                fresh[0] = row[*squad_idx].clone();
                fresh[1] = row[*season_idx].clone();
                rows.push(fresh);
                rows.len() - 1
            });
            for &(from, to) in value_columns {
                rows[target][to] = row[from].clone();
            }
        }
    }

    debug!("Merged {} tables into {} rows x {} columns", tables.len(), rows.len(), width);
    Ok(Table::new(dedupe_names(header), rows))
}

fn key_index(table: &Table, key: &str, normalized: &NormalizedTable) -> Result<usize> {
    table.column_index(key).ok_or_else(|| {
        ScrapeError::Parse(format!("{} table has no {} column", normalized.category, key))
    })
}

/// Concatenates tables row-wise over the union of their columns, in the
/// order the columns are first seen. Missing cells are left empty.
pub fn stack_seasons(tables: Vec<Table>) -> Table {
    let mut columns: Vec<String> = Vec::new();
    let mut position: HashMap<String, usize> = HashMap::new();
    for table in &tables {
        for name in &table.columns {
            if !position.contains_key(name) {
                position.insert(name.clone(), columns.len());
                columns.push(name.clone());
            }
        }
    }

    let mut rows = Vec::new();
    for table in tables {
        let targets: Vec<usize> = table.columns.iter().map(|c| position[c]).collect();
        for row in table.rows {
            let mut out = vec![Cell::Empty; columns.len()];
            for (cell, &to) in row.into_iter().zip(&targets) {
                out[to] = cell;
            }
            rows.push(out);
        }
    }

    Table::new(columns, rows)
}
