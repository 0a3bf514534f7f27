//! PostgreSQL-backed [`QueryExecutor`].

use crate::storage::executor::{QueryExecutor, SqlParam, Statement, StoreError, WriteOutcome};
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use sqlx::postgres::{PgArguments, PgPoolOptions};
use sqlx::query::Query;
use sqlx::{PgPool, Postgres, Row};

/// DDL for the product table. The product code is the primary key so the store
/// enforces uniqueness and rejects a NULL code.
pub const CREATE_PRODUTOS_TABLE: &str = r#"CREATE TABLE IF NOT EXISTS produtos (
    "codigoProduto" INTEGER PRIMARY KEY,
    nome TEXT NOT NULL,
    descrisao TEXT,
    preco DOUBLE PRECISION NOT NULL
)"#;

/// Executes statements through a shared connection pool.
#[derive(Clone)]
pub struct PgExecutor {
    pool: PgPool,
}

impl PgExecutor {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects a new pool to `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates the `produtos` table when it is missing. Existing tables are left untouched.
    pub async fn ensure_schema(&self) -> anyhow::Result<()> {
        sqlx::query(CREATE_PRODUTOS_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    /// Reports whether the `produtos` table exists in the current search path.
    pub async fn table_exists(&self) -> anyhow::Result<bool> {
        let exists: bool = sqlx::query_scalar("SELECT to_regclass('produtos') IS NOT NULL")
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }
}

fn bind_params<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    params: &[SqlParam],
) -> Query<'q, Postgres, PgArguments> {
    // One wire type (text) for every slot: sqlx caches prepared statements by
    // SQL text, so per-value types would be reinterpreted under the first
    // request's parameter types.
    for param in params {
        query = query.bind(param.to_wire_text());
    }
    query
}

/// Maps a driver error into the raw error body returned to callers.
pub fn store_error_from_sqlx(err: sqlx::Error, sql: &str) -> StoreError {
    let store_err = match &err {
        sqlx::Error::Database(db) => match db.code() {
            Some(code) => StoreError::database(code.into_owned(), db.message())
                .with_constraint(db.constraint().map(str::to_string)),
            None => StoreError::driver("DATABASE_ERROR", db.message()),
        },
        sqlx::Error::PoolTimedOut => StoreError::driver("POOL_TIMED_OUT", err.to_string()),
        sqlx::Error::PoolClosed => StoreError::driver("POOL_CLOSED", err.to_string()),
        sqlx::Error::Io(_) => StoreError::driver("IO_ERROR", err.to_string()),
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
            StoreError::driver("DECODE_ERROR", err.to_string())
        }
        _ => StoreError::driver("DRIVER_ERROR", err.to_string()),
    };
    store_err.with_sql(sql)
}

#[async_trait]
impl QueryExecutor for PgExecutor {
    async fn query(&self, statement: &Statement) -> Result<Vec<JsonValue>, StoreError> {
        // Let Postgres encode each row so column names and types survive as-is.
        let wrapped = format!(
            "SELECT row_to_json(q) AS record FROM ({}) AS q",
            statement.sql
        );
        let rows = bind_params(sqlx::query(&wrapped), &statement.params)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| store_error_from_sqlx(e, statement.sql))?;

        rows.iter()
            .map(|row| row.try_get::<JsonValue, _>("record"))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| store_error_from_sqlx(e, statement.sql))
    }

    async fn execute(&self, statement: &Statement) -> Result<WriteOutcome, StoreError> {
        let result = bind_params(sqlx::query(statement.sql), &statement.params)
            .execute(&self.pool)
            .await
            .map_err(|e| store_error_from_sqlx(e, statement.sql))?;
        Ok(WriteOutcome {
            affected_rows: result.rows_affected(),
        })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| store_error_from_sqlx(e, "SELECT 1"))?;
        Ok(())
    }
}
