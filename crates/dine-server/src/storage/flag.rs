//! Boolean-like columns
//!
//! Catalog files in the wild store flags either as `'true'`/`'false'` text or
//! as `0`/`1` integers. Reads accept both; writes of filter values follow the
//! configured [`FlagEncoding`].

use dine_types::parse_flag;
use serde::Deserialize;
use sqlx::error::BoxDynError;
use sqlx::query::QueryAs;
use sqlx::sqlite::{Sqlite, SqliteArguments, SqliteTypeInfo, SqliteValueRef};
use sqlx::{Decode, Type};

/// How flag columns are represented in the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagEncoding {
    /// `'true'` / `'false'`
    #[default]
    Text,
    /// `1` / `0`
    Integer,
}

impl FlagEncoding {
    /// Bind a flag as the next query argument in this encoding
    pub(crate) fn bind<'q, O>(
        self,
        query: QueryAs<'q, Sqlite, O, SqliteArguments<'q>>,
        flag: bool,
    ) -> QueryAs<'q, Sqlite, O, SqliteArguments<'q>> {
        match self {
            FlagEncoding::Text => query.bind(if flag { "true" } else { "false" }),
            FlagEncoding::Integer => query.bind(i64::from(flag)),
        }
    }
}

/// A flag column decoded from either INTEGER or TEXT storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StoredFlag(pub bool);

impl From<StoredFlag> for bool {
    fn from(flag: StoredFlag) -> Self {
        flag.0
    }
}

impl Type<Sqlite> for StoredFlag {
    fn type_info() -> SqliteTypeInfo {
        <bool as Type<Sqlite>>::type_info()
    }

    fn compatible(ty: &SqliteTypeInfo) -> bool {
        <bool as Type<Sqlite>>::compatible(ty) || <String as Type<Sqlite>>::compatible(ty)
    }
}

impl<'r> Decode<'r, Sqlite> for StoredFlag {
    fn decode(value: SqliteValueRef<'r>) -> Result<Self, BoxDynError> {
        // SQLite renders integers as text on request, so one path covers both
        let raw = <String as Decode<Sqlite>>::decode(value)?;
        Ok(StoredFlag(parse_flag(&raw)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx::SqlitePool;

    async fn memory_pool() -> SqlitePool {
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap()
    }

    #[derive(sqlx::FromRow)]
    struct FlagRow {
        flag: StoredFlag,
    }

    #[tokio::test]
    async fn test_decodes_text_and_integer_columns() {
        let pool = memory_pool().await;

        for (literal, expected) in [
            ("'true'", true),
            ("'false'", false),
            ("'TRUE'", true),
            ("1", true),
            ("0", false),
        ] {
            let row: FlagRow = sqlx::query_as(&format!("SELECT {} AS flag", literal))
                .fetch_one(&pool)
                .await
                .unwrap();
            assert_eq!(row.flag, StoredFlag(expected), "literal {}", literal);
        }
    }

    #[tokio::test]
    async fn test_rejects_unknown_text() {
        let pool = memory_pool().await;

        let result: Result<FlagRow, _> = sqlx::query_as("SELECT 'sometimes' AS flag")
            .fetch_one(&pool)
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_bind_uses_encoding() {
        let pool = memory_pool().await;

        #[derive(sqlx::FromRow)]
        struct Bound {
            kind: String,
        }

        let text: Bound = FlagEncoding::Text
            .bind(sqlx::query_as("SELECT typeof(?1) AS kind"), true)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(text.kind, "text");

        let integer: Bound = FlagEncoding::Integer
            .bind(sqlx::query_as("SELECT typeof(?1) AS kind"), true)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(integer.kind, "integer");
    }

    #[test]
    fn test_encoding_deserializes_lowercase() {
        #[derive(Deserialize)]
        struct Holder {
            encoding: FlagEncoding,
        }

        let holder: Holder = serde_json::from_str(r#"{"encoding":"integer"}"#).unwrap();
        assert_eq!(holder.encoding, FlagEncoding::Integer);
        assert_eq!(FlagEncoding::default(), FlagEncoding::Text);
    }
}
