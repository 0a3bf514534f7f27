// tests/common/mod.rs
#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use produtos_api::app::statements;
use produtos_api::infra::config::ErrorMapping;
use produtos_api::transport::http::{create_router, AppState};
use produtos_api::{CatalogService, QueryExecutor, SqlParam, Statement, StoreError, WriteOutcome};
use serde_json::{json, Value as JsonValue};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

#[derive(Debug, Clone, PartialEq)]
struct Row {
    codigo: i64,
    nome: String,
    descrisao: Option<String>,
    preco: f64,
}

impl Row {
    fn to_json(&self) -> JsonValue {
        json!({
            "codigoProduto": self.codigo,
            "nome": self.nome,
            "descrisao": self.descrisao,
            "preco": self.preco,
        })
    }
}

fn invalid(type_name: &str, value: &str) -> StoreError {
    StoreError::database(
        "22P02",
        format!("invalid input syntax for type {}: \"{}\"", type_name, value),
    )
}

// Parameters reach the store as text and are cast by the statement, so
// coercion here goes through the same text form: `'4.6'::integer` and
// `'true'::integer` are rejected just like any other malformed input.
fn as_integer(param: &SqlParam) -> Result<Option<i64>, StoreError> {
    let Some(text) = param.to_wire_text() else {
        return Ok(None);
    };
    match text.trim().parse::<i32>() {
        Ok(i) => Ok(Some(i64::from(i))),
        Err(_) if text.trim().parse::<i64>().is_ok() => Err(StoreError::database(
            "22003",
            format!("value \"{}\" is out of range for type integer", text),
        )),
        Err(_) => Err(invalid("integer", &text)),
    }
}

fn as_text(param: &SqlParam) -> Option<String> {
    param.to_wire_text()
}

fn as_double(param: &SqlParam) -> Result<Option<f64>, StoreError> {
    let Some(text) = param.to_wire_text() else {
        return Ok(None);
    };
    text.trim()
        .parse::<f64>()
        .map(Some)
        .map_err(|_| invalid("double precision", &text))
}

fn not_null<T>(value: Option<T>, column: &str) -> Result<T, StoreError> {
    value.ok_or_else(|| {
        StoreError::database(
            "23502",
            format!("null value in column \"{}\" of relation \"produtos\" violates not-null constraint", column),
        )
    })
}

fn duplicate(codigo: i64) -> StoreError {
    StoreError::database(
        "23505",
        format!("duplicate key value violates unique constraint \"produtos_pkey\" (codigoProduto)=({})", codigo),
    )
    .with_constraint(Some("produtos_pkey".to_string()))
}

/// In-memory stand-in for the `produtos` table that understands exactly the
/// statements the catalog issues, with Postgres-like coercion and constraints.
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<Row>>,
    log: Mutex<Vec<Statement>>,
    next_error: Mutex<Option<StoreError>>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Makes the next statement fail with `err`.
    pub fn fail_next(&self, err: StoreError) {
        *self.next_error.lock().unwrap() = Some(err);
    }

    /// Every statement received so far, in order.
    pub fn statements(&self) -> Vec<Statement> {
        self.log.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    fn record(&self, statement: &Statement) -> Result<(), StoreError> {
        self.log.lock().unwrap().push(statement.clone());
        match self.next_error.lock().unwrap().take() {
            Some(err) => Err(err.with_sql(statement.sql)),
            None => Ok(()),
        }
    }

    fn decode_row(params: &[SqlParam]) -> Result<Row, StoreError> {
        Ok(Row {
            codigo: not_null(as_integer(&params[0])?, "codigoProduto")?,
            nome: not_null(as_text(&params[1]), "nome")?,
            descrisao: as_text(&params[2]),
            preco: not_null(as_double(&params[3])?, "preco")?,
        })
    }
}

fn unsupported(statement: &Statement) -> StoreError {
    StoreError::database("42601", "statement not supported by MemoryStore").with_sql(statement.sql)
}

#[async_trait]
impl QueryExecutor for MemoryStore {
    async fn query(&self, statement: &Statement) -> Result<Vec<JsonValue>, StoreError> {
        self.record(statement)?;
        let rows = self.rows.lock().unwrap();
        match statement.sql {
            statements::COUNT_PRODUTOS => Ok(vec![json!({ "total": rows.len() })]),
            statements::SELECT_PRODUTOS => Ok(rows.iter().map(Row::to_json).collect()),
            statements::SELECT_PRODUTO_BY_CODE => {
                let code = as_integer(&statement.params[0])?;
                Ok(rows
                    .iter()
                    .filter(|r| Some(r.codigo) == code)
                    .map(Row::to_json)
                    .collect())
            }
            _ => Err(unsupported(statement)),
        }
    }

    async fn execute(&self, statement: &Statement) -> Result<WriteOutcome, StoreError> {
        self.record(statement)?;
        let mut rows = self.rows.lock().unwrap();
        let affected_rows = match statement.sql {
            statements::INSERT_PRODUTO => {
                let row = Self::decode_row(&statement.params)?;
                if rows.iter().any(|r| r.codigo == row.codigo) {
                    return Err(duplicate(row.codigo));
                }
                rows.push(row);
                1
            }
            statements::UPDATE_PRODUTO => {
                let target = as_integer(&statement.params[4])?;
                let replacement = Self::decode_row(&statement.params[..4])?;
                let matched: Vec<usize> = (0..rows.len())
                    .filter(|&i| Some(rows[i].codigo) == target)
                    .collect();
                if matched.is_empty() {
                    0
                } else {
                    if rows
                        .iter()
                        .any(|r| r.codigo == replacement.codigo && Some(r.codigo) != target)
                    {
                        return Err(duplicate(replacement.codigo));
                    }
                    for &i in &matched {
                        rows[i] = replacement.clone();
                    }
                    matched.len() as u64
                }
            }
            statements::DELETE_PRODUTO => {
                let target = as_integer(&statement.params[0])?;
                let before = rows.len();
                rows.retain(|r| Some(r.codigo) != target);
                (before - rows.len()) as u64
            }
            _ => return Err(unsupported(statement)),
        };
        Ok(WriteOutcome { affected_rows })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        match self.next_error.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

pub fn router_with(store: Arc<MemoryStore>, mapping: ErrorMapping) -> Router {
    create_router(AppState::new(CatalogService::new(store), mapping))
}

/// Sends one request through the router and decodes the JSON body.
pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<JsonValue>,
) -> (StatusCode, JsonValue) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    send_request(router, request).await
}

pub async fn send_request(router: &Router, request: Request<Body>) -> (StatusCode, JsonValue) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

pub fn caneca(codigo: i64) -> JsonValue {
    json!({
        "codigoProduto": codigo,
        "nome": "Caneca de café",
        "descrisao": "Caneca para café, com estampa divertida",
        "preco": 25.99
    })
}
