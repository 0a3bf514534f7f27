pub mod catalog_service;
pub mod statements;
