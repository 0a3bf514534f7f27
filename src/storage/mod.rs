pub mod executor;
pub mod postgres;

pub use executor::{QueryExecutor, SqlParam, Statement, StoreError, StoreErrorClass, WriteOutcome};
pub use postgres::PgExecutor;
