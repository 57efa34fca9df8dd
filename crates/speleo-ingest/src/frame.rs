//! Polars `DataFrame` adapters.
//!
//! Loaders that already produce frames (one per sheet, header applied, data
//! rows only) hand them over here instead of going through CSV.

use polars::prelude::{AnyValue, DataFrame};
use speleo_model::{FIRST_DATA_ROW, Sheet, TableKind, Value};

use crate::error::{IngestError, Result};

/// Converts a Polars AnyValue into a cell.
///
/// Nulls and empty strings become missing; strings are classified the same
/// way as CSV cells.
pub fn any_to_value(value: AnyValue<'_>) -> Value {
    match value {
        AnyValue::Null => Value::Missing,
        AnyValue::Int8(v) => Value::Number(f64::from(v)),
        AnyValue::Int16(v) => Value::Number(f64::from(v)),
        AnyValue::Int32(v) => Value::Number(f64::from(v)),
        AnyValue::Int64(v) => Value::Number(v as f64),
        AnyValue::UInt8(v) => Value::Number(f64::from(v)),
        AnyValue::UInt16(v) => Value::Number(f64::from(v)),
        AnyValue::UInt32(v) => Value::Number(f64::from(v)),
        AnyValue::UInt64(v) => Value::Number(v as f64),
        AnyValue::Float32(v) => Value::Number(f64::from(v)),
        AnyValue::Float64(v) if v.is_nan() => Value::Missing,
        AnyValue::Float64(v) => Value::Number(v),
        AnyValue::String(s) => Value::from_raw(s),
        AnyValue::StringOwned(s) => Value::from_raw(&s),
        AnyValue::Boolean(b) => Value::Text(if b { "yes" } else { "no" }.to_string()),
        other => Value::from_raw(&other.to_string()),
    }
}

/// Builds a sheet from a frame whose first row is spreadsheet row
/// [`FIRST_DATA_ROW`].
///
/// Rows where every cell is missing are skipped but keep their numbering.
pub fn sheet_from_frame(kind: TableKind, frame: &DataFrame) -> Result<Sheet> {
    let columns: Vec<String> = frame
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect();
    let mut sheet = Sheet::new(kind, columns);

    for index in 0..frame.height() {
        let mut cells = Vec::with_capacity(frame.width());
        for column in frame.get_columns() {
            let value = column.get(index).map_err(|err| IngestError::Frame {
                column: column.name().to_string(),
                message: err.to_string(),
            })?;
            cells.push(any_to_value(value));
        }
        if cells.iter().all(Value::is_missing) {
            continue;
        }
        sheet.push_row(FIRST_DATA_ROW + index, cells);
    }
    Ok(sheet)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_values_map_to_cells() {
        assert_eq!(any_to_value(AnyValue::Null), Value::Missing);
        assert_eq!(any_to_value(AnyValue::Int32(7)), Value::Number(7.0));
        assert_eq!(any_to_value(AnyValue::Float64(f64::NAN)), Value::Missing);
        assert_eq!(any_to_value(AnyValue::String("")), Value::Missing);
        assert_eq!(
            any_to_value(AnyValue::String("from top")),
            Value::Text("from top".to_string())
        );
        assert_eq!(any_to_value(AnyValue::String("4.5")), Value::Number(4.5));
    }
}
