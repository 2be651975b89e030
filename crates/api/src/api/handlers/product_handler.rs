//! Catalogue handlers: product lookups, search and scrape errors.

use axum::{extract::State, response::Json, routing::get, Router};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::extractors::QueryParams;
use crate::api::AppState;
use common::AppResult;
use domain::{Product, ScrapeError};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductQuery {
    /// Product id
    pub id: i32,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Free text, matched against the product search index
    pub search_text: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StoreQuery {
    /// Store name, matched exactly
    pub store: String,
}

pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/all_products", get(all_products))
        .route("/product", get(product))
        .route("/find_product", get(find_product))
        .route("/store", get(store_products))
        .route("/scrape_errors", get(scrape_errors))
}

/// Every product in the catalogue
#[utoipa::path(
    get,
    path = "/v1/all_products",
    tag = "Products",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All products", body = [Product]),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn all_products(State(state): State<AppState>) -> AppResult<Json<Vec<Product>>> {
    Ok(Json(state.catalog_service.all_products().await?))
}

/// One product by id
#[utoipa::path(
    get,
    path = "/v1/product",
    tag = "Products",
    params(ProductQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, description = "Missing or non-numeric id"),
        (status = 404, description = "No product with that id")
    )
)]
pub async fn product(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ProductQuery>,
) -> AppResult<Json<Product>> {
    Ok(Json(state.catalog_service.product(query.id).await?))
}

/// Best matches for free text, at most ten, most relevant first
#[utoipa::path(
    get,
    path = "/v1/find_product",
    tag = "Products",
    params(SearchQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Ranked matches", body = [Product]),
        (status = 400, description = "Missing search_text")
    )
)]
pub async fn find_product(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<SearchQuery>,
) -> AppResult<Json<Vec<Product>>> {
    Ok(Json(state.catalog_service.search(&query.search_text).await?))
}

/// Products of a single store
#[utoipa::path(
    get,
    path = "/v1/store",
    tag = "Products",
    params(StoreQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Products of the store", body = [Product]),
        (status = 400, description = "Missing store")
    )
)]
pub async fn store_products(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<StoreQuery>,
) -> AppResult<Json<Vec<Product>>> {
    Ok(Json(
        state.catalog_service.products_by_store(&query.store).await?,
    ))
}

/// Errors recorded by scraper runs
#[utoipa::path(
    get,
    path = "/v1/scrape_errors",
    tag = "Products",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Recorded scrape errors", body = [ScrapeError])
    )
)]
pub async fn scrape_errors(State(state): State<AppState>) -> AppResult<Json<Vec<ScrapeError>>> {
    Ok(Json(state.catalog_service.scrape_errors().await?))
}
