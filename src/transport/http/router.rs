use crate::domain::{Product, ProductInput, ProductTotal};
use crate::storage::{StoreError, WriteOutcome};
use crate::transport::http::handlers::{health, produtos};
use crate::transport::http::types::{ApiResponse, AppState};
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        produtos::count_products_handler,
        produtos::list_products_handler,
        produtos::get_product_handler,
        produtos::create_product_handler,
        produtos::update_product_handler,
        produtos::delete_product_handler
    ),
    components(schemas(
        ApiResponse,
        Product,
        ProductInput,
        ProductTotal,
        WriteOutcome,
        StoreError
    )),
    info(title = "Produtos API", description = "Product catalog backed by a relational table")
)]
pub struct ApiDoc;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(produtos::count_products_handler))
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/produtos",
            get(produtos::list_products_handler).post(produtos::create_product_handler),
        )
        .route(
            "/produtos/:id",
            get(produtos::get_product_handler)
                .put(produtos::update_product_handler)
                .delete(produtos::delete_product_handler),
        )
        .with_state(app_state)
}
