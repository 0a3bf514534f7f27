pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::catalog_service::CatalogService;
pub use domain::{Product, ProductInput, ProductTotal};
pub use infra::config::{AppConfig, ErrorMapping};
pub use storage::{PgExecutor, QueryExecutor, SqlParam, Statement, StoreError, WriteOutcome};
