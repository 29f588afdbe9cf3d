use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;
use sqlx::{
    error::ErrorKind,
    sqlite::{SqliteConnectOptions, SqliteConnection, SqliteRow},
    Column, ConnectOptions, Connection, Executor, Row, Statement, TypeInfo, ValueRef,
};
use thiserror::Error;
use time::Date;
use tracing::{debug, warn};

use crate::analytics::catalog::AnalyticsQuery;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("cannot open database: {0}")]
    Connect(#[source] sqlx::Error),
    #[error("query failed: {0}")]
    Query(#[source] sqlx::Error),
    #[error("catalog entry '{label}' expected columns {expected:?}, got {actual:?}")]
    SchemaDrift {
        label: &'static str,
        expected: Vec<&'static str>,
        actual: Vec<String>,
    },
    #[error("write failed: {0}")]
    Write(#[source] sqlx::Error),
}

impl DbError {
    /// True when a write was rejected by a UNIQUE/NOT NULL/CHECK/FK constraint.
    pub fn is_constraint_violation(&self) -> bool {
        match self {
            DbError::Write(sqlx::Error::Database(e)) => !matches!(e.kind(), ErrorKind::Other),
            _ => false,
        }
    }
}

/// Result of a read: column names plus rows of JSON scalars.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// All values of one column, in row order.
    pub fn column(&self, name: &str) -> Vec<&Value> {
        match self.column_index(name) {
            Some(i) => self.rows.iter().map(|r| &r[i]).collect(),
            None => Vec::new(),
        }
    }
}

/// Positional bind value for a write statement.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Int(i64),
    Text(String),
    Date(Date),
}

impl From<i64> for SqlParam {
    fn from(v: i64) -> Self {
        SqlParam::Int(v)
    }
}

impl From<&str> for SqlParam {
    fn from(v: &str) -> Self {
        SqlParam::Text(v.to_string())
    }
}

impl From<String> for SqlParam {
    fn from(v: String) -> Self {
        SqlParam::Text(v)
    }
}

impl From<Date> for SqlParam {
    fn from(v: Date) -> Self {
        SqlParam::Date(v)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WriteOutcome {
    pub rows_affected: u64,
    /// Rowid of the last INSERT on the statement's connection, 0 if none.
    pub last_insert_rowid: i64,
}

impl WriteOutcome {
    pub fn matched(&self) -> bool {
        self.rows_affected > 0
    }
}

/// Handle to the SQLite file. Holds only connect options: every operation
/// opens its own connection and closes it before returning.
#[derive(Debug, Clone)]
pub struct Database {
    options: SqliteConnectOptions,
}

impl Database {
    pub fn new(url: &str) -> Result<Self, DbError> {
        let options = if url.starts_with("sqlite:") {
            SqliteConnectOptions::from_str(url).map_err(DbError::Connect)?
        } else {
            SqliteConnectOptions::new().filename(url)
        };
        Ok(Self::from_options(options))
    }

    pub fn from_options(options: SqliteConnectOptions) -> Self {
        // The file is external: never create it, never enforce FKs.
        let options = options
            .create_if_missing(false)
            .foreign_keys(false)
            .disable_statement_logging();
        Self { options }
    }

    pub async fn acquire(&self) -> Result<SqliteConnection, DbError> {
        let conn = SqliteConnection::connect_with(&self.options)
            .await
            .map_err(DbError::Connect)?;
        debug!("connection opened");
        Ok(conn)
    }

    pub async fn release(&self, conn: SqliteConnection) {
        if let Err(e) = conn.close().await {
            warn!(error = %e, "closing connection failed");
        }
    }

    pub async fn run_query(&self, sql: &str) -> Result<Table, DbError> {
        let mut conn = self.acquire().await?;
        let fetched = fetch_table(&mut conn, sql).await;
        self.release(conn).await;
        fetched
    }

    /// Runs a catalog entry and checks the result against its declared columns.
    pub async fn run_catalog(&self, query: AnalyticsQuery) -> Result<Table, DbError> {
        let table = self.run_query(query.sql()).await?;
        check_columns(query, table)
    }

    pub async fn execute_statement(
        &self,
        sql: &str,
        params: &[SqlParam],
    ) -> Result<WriteOutcome, DbError> {
        let mut query = sqlx::query(sql);
        for param in params {
            query = match param {
                SqlParam::Int(v) => query.bind(*v),
                SqlParam::Text(v) => query.bind(v.as_str()),
                SqlParam::Date(v) => query.bind(*v),
            };
        }

        let mut conn = self.acquire().await?;
        let executed = query.execute(&mut conn).await;
        self.release(conn).await;

        let done = executed.map_err(DbError::Write)?;
        Ok(WriteOutcome {
            rows_affected: done.rows_affected(),
            last_insert_rowid: done.last_insert_rowid(),
        })
    }
}

/// Column names come from the prepared statement so empty results keep them.
async fn fetch_table(conn: &mut SqliteConnection, sql: &str) -> Result<Table, DbError> {
    let columns = {
        let stmt = (&mut *conn).prepare(sql).await.map_err(DbError::Query)?;
        stmt.columns().iter().map(|c| c.name().to_string()).collect::<Vec<_>>()
    };
    let rows = sqlx::query(sql)
        .fetch_all(&mut *conn)
        .await
        .map_err(DbError::Query)?;
    let rows = rows
        .iter()
        .map(decode_row)
        .collect::<Result<Vec<_>, _>>()
        .map_err(DbError::Query)?;
    Ok(Table { columns, rows })
}

fn check_columns(query: AnalyticsQuery, table: Table) -> Result<Table, DbError> {
    let expected = query.columns();
    if table.columns.iter().map(String::as_str).ne(expected.iter().copied()) {
        return Err(DbError::SchemaDrift {
            label: query.label(),
            expected: expected.to_vec(),
            actual: table.columns,
        });
    }
    Ok(table)
}

fn decode_row(row: &SqliteRow) -> Result<Vec<Value>, sqlx::Error> {
    (0..row.len()).map(|i| decode_cell(row, i)).collect()
}

fn decode_cell(row: &SqliteRow, idx: usize) -> Result<Value, sqlx::Error> {
    let kind = {
        let raw = row.try_get_raw(idx)?;
        if raw.is_null() {
            return Ok(Value::Null);
        }
        raw.type_info().name().to_string()
    };
    let value = match kind.as_str() {
        "INTEGER" | "BOOLEAN" => Value::from(row.try_get::<i64, _>(idx)?),
        "REAL" => Value::from(row.try_get::<f64, _>(idx)?),
        "BLOB" => {
            let bytes: Vec<u8> = row.try_get(idx)?;
            Value::String(bytes.iter().map(|b| format!("{b:02x}")).collect())
        }
        _ => Value::String(row.try_get::<String, _>(idx)?),
    };
    Ok(value)
}
