//! Product shapes exchanged over HTTP.

use crate::storage::SqlParam;
use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value as JsonValue};
use utoipa::ToSchema;

/// A stored product row, as returned by the read endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Public product code, also the lookup key.
    #[schema(example = 3)]
    pub codigo_produto: i32,
    #[schema(example = "Caneca de café")]
    pub nome: String,
    #[schema(example = "Caneca para café, com estampa divertida")]
    pub descrisao: Option<String>,
    #[schema(example = 25.99)]
    pub preco: f64,
}

/// Request body for create and full update.
///
/// Every field is forwarded to the store as-is. Missing fields become NULL and
/// values are not checked against the column types here. Only a JSON object is
/// accepted; unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", from = "JsonMap<String, JsonValue>")]
pub struct ProductInput {
    #[schema(value_type = Option<i32>, example = 3)]
    pub codigo_produto: Option<JsonValue>,
    #[schema(value_type = Option<String>, example = "Caneca de café")]
    pub nome: Option<JsonValue>,
    #[schema(value_type = Option<String>, example = "Caneca para café, com estampa divertida")]
    pub descrisao: Option<JsonValue>,
    #[schema(value_type = Option<f64>, example = 25.99)]
    pub preco: Option<JsonValue>,
}

impl From<JsonMap<String, JsonValue>> for ProductInput {
    fn from(mut fields: JsonMap<String, JsonValue>) -> Self {
        Self {
            codigo_produto: fields.remove("codigoProduto"),
            nome: fields.remove("nome"),
            descrisao: fields.remove("descrisao"),
            preco: fields.remove("preco"),
        }
    }
}

impl ProductInput {
    /// The four column values in table order: code, name, description, price.
    pub fn column_values(&self) -> [SqlParam; 4] {
        [
            SqlParam::from(self.codigo_produto.as_ref()),
            SqlParam::from(self.nome.as_ref()),
            SqlParam::from(self.descrisao.as_ref()),
            SqlParam::from(self.preco.as_ref()),
        ]
    }
}

/// Aggregate row returned by the count endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductTotal {
    #[schema(example = 2)]
    pub total: i64,
}
