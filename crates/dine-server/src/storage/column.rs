//! Column decoding shared by the row structs
//!
//! Numeric columns may be declared REAL, INTEGER or NUMERIC depending on who
//! built the catalog file. Columns without a typed field are carried through
//! as JSON values.

use serde_json::{Map, Value};
use sqlx::error::BoxDynError;
use sqlx::sqlite::{Sqlite, SqliteRow, SqliteTypeInfo, SqliteValueRef};
use sqlx::{Column, Decode, Row, Type, TypeInfo, ValueRef};

/// A numeric column decoded from either INTEGER or REAL storage
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct StoredNumber(pub f64);

impl From<StoredNumber> for f64 {
    fn from(number: StoredNumber) -> Self {
        number.0
    }
}

impl Type<Sqlite> for StoredNumber {
    fn type_info() -> SqliteTypeInfo {
        <f64 as Type<Sqlite>>::type_info()
    }

    fn compatible(ty: &SqliteTypeInfo) -> bool {
        <f64 as Type<Sqlite>>::compatible(ty) || <i64 as Type<Sqlite>>::compatible(ty)
    }
}

impl<'r> Decode<'r, Sqlite> for StoredNumber {
    fn decode(value: SqliteValueRef<'r>) -> Result<Self, BoxDynError> {
        // sqlite3_value_double widens integers losslessly for catalog-sized values
        Ok(StoredNumber(<f64 as Decode<Sqlite>>::decode(value)?))
    }
}

/// Collect every column of `row` not named in `known`, typed by its storage class
pub(crate) fn extra_columns(
    row: &SqliteRow,
    known: &[&str],
) -> Result<Map<String, Value>, sqlx::Error> {
    let mut extra = Map::new();

    for column in row.columns() {
        let name = column.name();
        if known.contains(&name) {
            continue;
        }

        let index = column.ordinal();
        let raw = row.try_get_raw(index)?;
        let value = if raw.is_null() {
            Value::Null
        } else {
            match raw.type_info().name() {
                "INTEGER" => Value::from(row.try_get::<i64, _>(index)?),
                "REAL" => Value::from(row.try_get::<f64, _>(index)?),
                "BLOB" => Value::from(row.try_get::<Vec<u8>, _>(index)?),
                _ => Value::from(row.try_get::<String, _>(index)?),
            }
        };

        extra.insert(name.to_string(), value);
    }

    Ok(extra)
}
