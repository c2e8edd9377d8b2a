//! Generic table-oriented access to a single SQLite database.
//!
//! Table and column identifiers are spliced into statement text via
//! [`Ident`] (and record keys); data values always travel as bound
//! parameters. Callers are trusted to pass safe identifiers; there is no
//! sanitization layer.

use std::fmt;
use std::str::FromStr;

use sqlx::query::Query;
use sqlx::sqlite::{
    Sqlite, SqliteArguments, SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow,
};
use sqlx::{Column, Row};

mod error;
mod record;

pub use error::StoreError;
pub use record::{Record, Value};

/// A trusted SQL identifier (a table name). A distinct type so call sites
/// show which argument is interpolated into statement text rather than
/// bound as a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ident<'a>(&'a str);

impl<'a> Ident<'a> {
    pub const fn new(name: &'a str) -> Self {
        Self(name)
    }

    pub fn as_str(&self) -> &'a str {
        self.0
    }
}

impl fmt::Display for Ident<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl<'a> From<&'a str> for Ident<'a> {
    fn from(name: &'a str) -> Self {
        Self(name)
    }
}

/// Handle to one SQLite database. Cloning shares the underlying pool.
#[derive(Clone, Debug)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Open the database at `path`. Accepts a bare file path, `:memory:`,
    /// or a full `sqlite:` URL; a missing database file is created.
    pub async fn connect(path: &str) -> Result<Self, StoreError> {
        // Normalize simple path or :memory:
        let url = if path.starts_with("sqlite:") {
            path.to_string()
        } else if path == ":memory:" {
            "sqlite::memory:".to_string()
        } else {
            format!("sqlite:{}", path)
        };

        let options = SqliteConnectOptions::from_str(&url)
            .map_err(StoreError::Connection)?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(StoreError::Connection)?;

        Ok(Self { pool })
    }

    /// Run an arbitrary statement with no bound parameters. Used for
    /// schema and maintenance work; caller-trusted input only.
    pub async fn execute(&self, sql: &str) -> Result<bool, StoreError> {
        tracing::debug!(sql = %sql, "execute");
        sqlx::query(sql)
            .execute(&self.pool)
            .await
            .map_err(StoreError::Query)?;
        Ok(true)
    }

    /// Run an arbitrary read statement and return every resulting row,
    /// preserving result-set order.
    pub async fn fetch(&self, sql: &str) -> Result<Vec<Record>, StoreError> {
        tracing::debug!(sql = %sql, "fetch");
        let rows = sqlx::query(sql)
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::Query)?;
        Ok(rows.iter().map(decode_row).collect())
    }

    /// Insert `record` into `table` and return the store-assigned row id.
    /// The column list comes from the record's keys; values are bound.
    pub async fn create(&self, table: Ident<'_>, record: &Record) -> Result<i64, StoreError> {
        let columns: Vec<&str> = record.keys().collect();
        let placeholders = vec!["?"; columns.len()].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table,
            columns.join(", "),
            placeholders
        );
        tracing::debug!(sql = %sql, "create");

        let mut query = sqlx::query(&sql);
        for (_, value) in record.iter() {
            query = bind_value(query, value);
        }

        let done = query
            .execute(&self.pool)
            .await
            .map_err(StoreError::Query)?;
        Ok(done.last_insert_rowid())
    }

    /// Read the row with the given id, or `None` when no row matches.
    /// "Not found" is a normal result, never an error.
    pub async fn read(&self, table: Ident<'_>, id: i64) -> Result<Option<Record>, StoreError> {
        let sql = format!("SELECT * FROM {} WHERE id = ? LIMIT 1", table);
        tracing::debug!(sql = %sql, id, "read");

        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::Query)?;
        Ok(row.as_ref().map(decode_row))
    }

    /// Overwrite exactly the columns named by `record` on the row with the
    /// given id. Reports engine success; touching zero rows still succeeds.
    pub async fn update(
        &self,
        table: Ident<'_>,
        id: i64,
        record: &Record,
    ) -> Result<bool, StoreError> {
        let assignments: Vec<String> = record.keys().map(|k| format!("{} = ?", k)).collect();
        let sql = format!(
            "UPDATE {} SET {} WHERE id = ?",
            table,
            assignments.join(", ")
        );
        tracing::debug!(sql = %sql, id, "update");

        let mut query = sqlx::query(&sql);
        for (_, value) in record.iter() {
            query = bind_value(query, value);
        }
        query
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(StoreError::Query)?;
        Ok(true)
    }

    /// Delete the row with the given id. Deleting an id that never existed
    /// still reports success.
    pub async fn delete(&self, table: Ident<'_>, id: i64) -> Result<bool, StoreError> {
        let sql = format!("DELETE FROM {} WHERE id = ?", table);
        tracing::debug!(sql = %sql, id, "delete");

        sqlx::query(&sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(StoreError::Query)?;
        Ok(true)
    }

    /// Total row count for `table`.
    pub async fn count(&self, table: Ident<'_>) -> Result<i64, StoreError> {
        let sql = format!("SELECT COUNT(*) AS count FROM {}", table);
        tracing::debug!(sql = %sql, "count");

        let row = sqlx::query(&sql)
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::Query)?;
        row.try_get::<i64, _>(0).map_err(StoreError::Query)
    }
}

fn bind_value<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    value: &Value,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match value {
        Value::Null => query.bind::<Option<String>>(None),
        Value::Integer(i) => query.bind(*i),
        Value::Real(r) => query.bind(*r),
        Value::Text(s) => query.bind(s.clone()),
    }
}

fn decode_row(row: &SqliteRow) -> Record {
    let mut record = Record::new();
    for (i, column) in row.columns().iter().enumerate() {
        let value = row
            .try_get::<i64, _>(i)
            .map(Value::Integer)
            .or_else(|_| row.try_get::<f64, _>(i).map(Value::Real))
            .or_else(|_| row.try_get::<String, _>(i).map(Value::Text))
            .unwrap_or(Value::Null);
        record.set(column.name(), value);
    }
    record
}
