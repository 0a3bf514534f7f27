//! The product catalog service.
//!
//! Each operation issues exactly one statement through the injected
//! [`QueryExecutor`] and returns the store's outcome unchanged. Existence of a
//! product code is never checked up front; zero rows and zero affected rows are
//! ordinary results.

use crate::app::statements;
use crate::domain::ProductInput;
use crate::storage::{QueryExecutor, Statement, StoreError, WriteOutcome};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct CatalogService {
    executor: Arc<dyn QueryExecutor>,
}

impl CatalogService {
    pub fn new(executor: Arc<dyn QueryExecutor>) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &Arc<dyn QueryExecutor> {
        &self.executor
    }

    /// Returns the aggregate row `{"total": N}`.
    pub async fn count(&self) -> Result<JsonValue, StoreError> {
        let rows = self.fetch(statements::count()).await?;
        Ok(rows
            .into_iter()
            .next()
            .unwrap_or_else(|| serde_json::json!({ "total": 0 })))
    }

    pub async fn list(&self) -> Result<Vec<JsonValue>, StoreError> {
        self.fetch(statements::list()).await
    }

    /// Rows whose code matches; an unknown code yields an empty vec.
    pub async fn get_by_code(&self, code: &str) -> Result<Vec<JsonValue>, StoreError> {
        self.fetch(statements::get_by_code(code)).await
    }

    pub async fn create(&self, input: &ProductInput) -> Result<WriteOutcome, StoreError> {
        self.write(statements::insert(input)).await
    }

    /// Full replace of the row currently identified by `code`. The body's code
    /// becomes the row's new code, so an update may reassign the identifier.
    pub async fn update(
        &self,
        code: &str,
        input: &ProductInput,
    ) -> Result<WriteOutcome, StoreError> {
        self.write(statements::update(code, input)).await
    }

    pub async fn delete(&self, code: &str) -> Result<WriteOutcome, StoreError> {
        self.write(statements::delete(code)).await
    }

    async fn fetch(&self, statement: Statement) -> Result<Vec<JsonValue>, StoreError> {
        debug!(sql = statement.sql, params = statement.params.len(), "query");
        self.executor.query(&statement).await.map_err(|e| {
            warn!(code = %e.code, error = %e, "query failed");
            e
        })
    }

    async fn write(&self, statement: Statement) -> Result<WriteOutcome, StoreError> {
        debug!(sql = statement.sql, params = statement.params.len(), "execute");
        let outcome = self.executor.execute(&statement).await.map_err(|e| {
            warn!(code = %e.code, error = %e, "statement failed");
            e
        })?;
        debug!(affected_rows = outcome.affected_rows, "statement applied");
        Ok(outcome)
    }
}
