//! Product endpoints.
//!
//! Every handler issues one statement and answers with the store's outcome.
//! Store failures take the status chosen by [`store_error_status`], which is
//! 404 for every cause under the default mapping.
//!
//! [`store_error_status`]: crate::transport::http::handlers::common::store_error_status

use crate::domain::ProductInput;
use crate::transport::http::handlers::common::respond;
use crate::transport::http::types::{json_422, AppState};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::instrument;

const PRODUCT_BODY: &str = r#"{"codigoProduto": int, "nome": string, "descrisao": string, "preco": number}"#;

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Total number of registered products", body = ProductTotal),
        (status = 404, description = "Store operation failed", body = StoreError)
    )
)]
#[instrument(name = "handler::count_products", skip(state))]
pub async fn count_products_handler(State(state): State<AppState>) -> Response {
    respond(state.error_mapping, StatusCode::OK, state.catalog.count().await)
}

#[utoipa::path(
    get,
    path = "/produtos",
    responses(
        (status = 200, description = "Every product in the table", body = [Product]),
        (status = 404, description = "Store operation failed", body = StoreError)
    )
)]
#[instrument(name = "handler::list_products", skip(state))]
pub async fn list_products_handler(State(state): State<AppState>) -> Response {
    respond(state.error_mapping, StatusCode::OK, state.catalog.list().await)
}

#[utoipa::path(
    get,
    path = "/produtos/{id}",
    params(
        ("id" = String, Path, description = "Product code to look up")
    ),
    responses(
        (status = 200, description = "Matching products (empty when the code is unknown)", body = [Product]),
        (status = 404, description = "Store operation failed", body = StoreError)
    )
)]
#[instrument(name = "handler::get_product", skip(state))]
pub async fn get_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    respond(
        state.error_mapping,
        StatusCode::OK,
        state.catalog.get_by_code(&id).await,
    )
}

#[utoipa::path(
    post,
    path = "/produtos",
    request_body = ProductInput,
    responses(
        (status = 201, description = "Product inserted", body = WriteOutcome),
        (status = 404, description = "Store operation failed", body = StoreError),
        (status = 422, description = "Body is not a JSON product object", body = ApiResponse)
    )
)]
#[instrument(name = "handler::create_product", skip(state, request))]
pub async fn create_product_handler(
    State(state): State<AppState>,
    request: Result<Json<ProductInput>, JsonRejection>,
) -> Response {
    let Json(input) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, PRODUCT_BODY).into_response(),
    };
    respond(
        state.error_mapping,
        StatusCode::CREATED,
        state.catalog.create(&input).await,
    )
}

/// The body's `codigoProduto` replaces the current code, so this endpoint can
/// move a product to a new code.
#[utoipa::path(
    put,
    path = "/produtos/{id}",
    params(
        ("id" = String, Path, description = "Current code of the product to replace")
    ),
    request_body = ProductInput,
    responses(
        (status = 200, description = "Update applied (affectedRows may be 0)", body = WriteOutcome),
        (status = 404, description = "Store operation failed", body = StoreError),
        (status = 422, description = "Body is not a JSON product object", body = ApiResponse)
    )
)]
#[instrument(name = "handler::update_product", skip(state, request))]
pub async fn update_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    request: Result<Json<ProductInput>, JsonRejection>,
) -> Response {
    let Json(input) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, PRODUCT_BODY).into_response(),
    };
    respond(
        state.error_mapping,
        StatusCode::OK,
        state.catalog.update(&id, &input).await,
    )
}

#[utoipa::path(
    delete,
    path = "/produtos/{id}",
    params(
        ("id" = String, Path, description = "Code of the product to delete")
    ),
    responses(
        (status = 200, description = "Delete applied (affectedRows may be 0)", body = WriteOutcome),
        (status = 404, description = "Store operation failed", body = StoreError)
    )
)]
#[instrument(name = "handler::delete_product", skip(state))]
pub async fn delete_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    respond(
        state.error_mapping,
        StatusCode::OK,
        state.catalog.delete(&id).await,
    )
}
