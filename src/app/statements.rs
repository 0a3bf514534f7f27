//! SQL statements issued by the catalog, one per endpoint.
//!
//! Every placeholder carries an explicit cast to its column type so that the
//! store coerces or rejects loosely typed input (e.g. a non-numeric path id).

use crate::domain::ProductInput;
use crate::storage::{SqlParam, Statement};

pub const COUNT_PRODUTOS: &str = "SELECT COUNT(*) AS total FROM produtos";

pub const SELECT_PRODUTOS: &str = "SELECT * FROM produtos";

pub const SELECT_PRODUTO_BY_CODE: &str =
    r#"SELECT * FROM produtos WHERE "codigoProduto" = $1::integer"#;

pub const INSERT_PRODUTO: &str = r#"INSERT INTO produtos ("codigoProduto", nome, descrisao, preco) VALUES ($1::integer, $2::text, $3::text, $4::double precision)"#;

/// Rewrites all four columns, the code included, of the row matching `$5`.
pub const UPDATE_PRODUTO: &str = r#"UPDATE produtos SET "codigoProduto" = $1::integer, nome = $2::text, descrisao = $3::text, preco = $4::double precision WHERE "codigoProduto" = $5::integer"#;

pub const DELETE_PRODUTO: &str = r#"DELETE FROM produtos WHERE "codigoProduto" = $1::integer"#;

pub fn count() -> Statement {
    Statement::new(COUNT_PRODUTOS, Vec::new())
}

pub fn list() -> Statement {
    Statement::new(SELECT_PRODUTOS, Vec::new())
}

/// `code` is passed through untouched; the store decides whether it is a valid code.
pub fn get_by_code(code: &str) -> Statement {
    Statement::new(SELECT_PRODUTO_BY_CODE, vec![SqlParam::Text(code.to_string())])
}

pub fn insert(input: &ProductInput) -> Statement {
    Statement::new(INSERT_PRODUTO, input.column_values().to_vec())
}

/// Parameters are `[codigoProduto, nome, descrisao, preco, code]`: the last one
/// selects the row, the first four become its new state.
pub fn update(code: &str, input: &ProductInput) -> Statement {
    let mut params = input.column_values().to_vec();
    params.push(SqlParam::Text(code.to_string()));
    Statement::new(UPDATE_PRODUTO, params)
}

pub fn delete(code: &str) -> Statement {
    Statement::new(DELETE_PRODUTO, vec![SqlParam::Text(code.to_string())])
}
