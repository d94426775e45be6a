use serde_json::{Map, Number, Value};
use std::io::Write;

use crate::{
    error::Result,
    types::{Cell, Table},
};

pub fn write_csv<W: Write>(table: &Table, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(&table.columns)?;
    for row in &table.rows {
        wtr.write_record(row.iter().map(|cell| cell.to_string()))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes the rows as a JSON array of objects keyed by column name.
pub fn write_json<W: Write>(table: &Table, writer: W) -> Result<()> {
    let records: Vec<Map<String, Value>> = table
        .rows
        .iter()
        .map(|row| {
            table
                .columns
                .iter()
                .zip(row)
                .map(|(name, cell)| (name.clone(), json_value(cell)))
                .collect()
        })
        .collect();
    serde_json::to_writer_pretty(writer, &records)?;
    Ok(())
}

fn json_value(cell: &Cell) -> Value {
    match cell {
        Cell::Int(i) => Value::from(*i),
        Cell::Float(x) => Number::from_f64(*x).map(Value::Number).unwrap_or(Value::Null),
        Cell::Text(s) => Value::String(s.clone()),
        Cell::Empty => Value::Null,
    }
}
