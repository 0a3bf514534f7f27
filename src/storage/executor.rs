//! The query-execution seam between the catalog and the relational store.
//!
//! Handlers never talk to a connection directly. They hand a [`Statement`]
//! (SQL template plus positional parameters) to a [`QueryExecutor`] and get back
//! either rows, a [`WriteOutcome`], or a [`StoreError`].

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value as JsonValue;
use thiserror::Error;
use utoipa::ToSchema;

/// A positional parameter bound to a statement placeholder.
///
/// Values are never spliced into the SQL text.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<&JsonValue> for SqlParam {
    /// Converts an untrusted JSON value without validating it against any column type.
    fn from(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null => SqlParam::Null,
            JsonValue::Bool(b) => SqlParam::Bool(*b),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => SqlParam::Int(i),
                None => SqlParam::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            JsonValue::String(s) => SqlParam::Text(s.clone()),
            // Nested structures go through as their JSON text; the store decides.
            other => SqlParam::Text(other.to_string()),
        }
    }
}

impl SqlParam {
    /// Text form sent to the store. Every placeholder travels as text and is
    /// cast to its column type inside the statement, so a cached prepared
    /// statement never sees two wire types for the same slot.
    pub fn to_wire_text(&self) -> Option<String> {
        match self {
            SqlParam::Null => None,
            SqlParam::Bool(b) => Some(b.to_string()),
            SqlParam::Int(i) => Some(i.to_string()),
            SqlParam::Float(f) if f.is_nan() => Some("NaN".to_string()),
            SqlParam::Float(f) if f.is_infinite() => {
                Some(if *f > 0.0 { "Infinity" } else { "-Infinity" }.to_string())
            }
            SqlParam::Float(f) => Some(f.to_string()),
            SqlParam::Text(s) => Some(s.clone()),
        }
    }
}

impl From<Option<&JsonValue>> for SqlParam {
    fn from(value: Option<&JsonValue>) -> Self {
        value.map(SqlParam::from).unwrap_or(SqlParam::Null)
    }
}

/// A parameterized SQL statement ready for execution.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: &'static str,
    pub params: Vec<SqlParam>,
}

impl Statement {
    pub fn new(sql: &'static str, params: Vec<SqlParam>) -> Self {
        Self { sql, params }
    }
}

/// Result of a mutating statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WriteOutcome {
    /// Number of rows inserted, updated or deleted.
    pub affected_rows: u64,
}

/// Coarse classification of a store failure, used only when the server is
/// configured to report distinct HTTP statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorClass {
    NotFound,
    Conflict,
    InvalidInput,
    Unavailable,
    Internal,
}

/// A failed store operation, serialized verbatim as the HTTP error body.
#[derive(Debug, Clone, Error, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[error("{code}: {sql_message}")]
pub struct StoreError {
    /// SQLSTATE for database errors, otherwise a driver-level tag such as `POOL_TIMED_OUT`.
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sql_state: Option<String>,
    pub sql_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sql: Option<String>,
}

impl StoreError {
    /// Builds an error reported by the database itself.
    pub fn database(sql_state: impl Into<String>, message: impl Into<String>) -> Self {
        let sql_state = sql_state.into();
        Self {
            code: sql_state.clone(),
            sql_state: Some(sql_state),
            sql_message: message.into(),
            constraint: None,
            sql: None,
        }
    }

    /// Builds an error raised by the driver before or after reaching the database.
    pub fn driver(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            sql_state: None,
            sql_message: message.into(),
            constraint: None,
            sql: None,
        }
    }

    pub fn with_constraint(mut self, constraint: Option<String>) -> Self {
        self.constraint = constraint;
        self
    }

    pub fn with_sql(mut self, sql: &str) -> Self {
        self.sql = Some(sql.to_string());
        self
    }

    pub fn class(&self) -> StoreErrorClass {
        match self.sql_state.as_deref() {
            Some("P0002") => StoreErrorClass::NotFound,
            Some(state) if state.starts_with("23") => StoreErrorClass::Conflict,
            Some(state) if state.starts_with("22") => StoreErrorClass::InvalidInput,
            Some(state) if state.starts_with("08") => StoreErrorClass::Unavailable,
            Some(_) => StoreErrorClass::Internal,
            None => match self.code.as_str() {
                "POOL_TIMED_OUT" | "POOL_CLOSED" | "IO_ERROR" => StoreErrorClass::Unavailable,
                _ => StoreErrorClass::Internal,
            },
        }
    }
}

/// Executes parameterized statements against the relational store.
///
/// Implementations must be safe to share across concurrent requests; the
/// catalog layer performs no locking of its own.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Runs a row-returning statement. Each row is a JSON object keyed by column name.
    async fn query(&self, statement: &Statement) -> Result<Vec<JsonValue>, StoreError>;

    /// Runs a mutating statement.
    async fn execute(&self, statement: &Statement) -> Result<WriteOutcome, StoreError>;

    /// Cheap round-trip used by the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;
}
