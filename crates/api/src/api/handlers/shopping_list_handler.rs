//! Shopping list handlers.

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::{QueryParams, ValidatedJson};
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::types::{Created, CreatedResponse};
use common::AppResult;
use domain::{NewShoppingList, ShoppingListSummary, ShoppingListView};

/// Shopping list creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateShoppingListRequest {
    /// Owner of the list; defaults to the caller
    pub owner_id: Option<Uuid>,
    #[validate(length(min = 1, max = 255, message = "Name must be 1 to 255 characters"))]
    #[schema(example = "Weekend")]
    pub name: String,
    /// Referenced products; repeats are stored once
    #[serde(default)]
    #[schema(example = json!([1, 2]))]
    pub product_ids: Vec<i32>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ShoppingListQuery {
    /// Shopping list id
    pub id: i32,
}

pub fn shopping_list_routes() -> Router<AppState> {
    Router::new()
        .route("/shopping_list", post(create_shopping_list).get(shopping_list))
        .route("/shopping_lists", get(shopping_lists))
}

/// Create a shopping list
#[utoipa::path(
    post,
    path = "/v1/shopping_list",
    tag = "Shopping lists",
    request_body = CreateShoppingListRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "List stored", body = CreatedResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Owner or a referenced product does not exist")
    )
)]
pub async fn create_shopping_list(
    State(state): State<AppState>,
    Extension(caller): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateShoppingListRequest>,
) -> AppResult<Created<CreatedResponse>> {
    let owner_id = payload.owner_id.unwrap_or(caller.id);
    let list = NewShoppingList::new(owner_id, payload.name, payload.product_ids)?;

    let id = state.shopping_list_service.create(list).await?;

    Ok(Created(CreatedResponse::new(id)))
}

/// A shopping list with its products and current total price
#[utoipa::path(
    get,
    path = "/v1/shopping_list",
    tag = "Shopping lists",
    params(ShoppingListQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List with live total", body = ShoppingListView),
        (status = 400, description = "Missing or non-numeric id"),
        (status = 404, description = "No list with that id")
    )
)]
pub async fn shopping_list(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ShoppingListQuery>,
) -> AppResult<Json<ShoppingListView>> {
    Ok(Json(state.shopping_list_service.get(query.id).await?))
}

/// Every shopping list with its owner
#[utoipa::path(
    get,
    path = "/v1/shopping_lists",
    tag = "Shopping lists",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All lists", body = [ShoppingListSummary])
    )
)]
pub async fn shopping_lists(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ShoppingListSummary>>> {
    Ok(Json(state.shopping_list_service.list().await?))
}
