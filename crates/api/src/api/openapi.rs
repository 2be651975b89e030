//! OpenAPI documentation configuration.
//!
//! Served as Swagger UI at `/swagger-ui`.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, product_handler, scraper_handler, shopping_list_handler};
use crate::types::{CreatedResponse, LoginResponse, MessageResponse, UserDataResponse};
use domain::{
    Product, ScrapeError, ScraperHealth, ScraperState, ScraperStatus, ShoppingListSummary,
    ShoppingListView, UserResponse,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Supermarkt API",
        version = "0.1.0",
        description = "Grocery price comparison: scraped products, full-text search and shopping lists with live totals"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        auth_handler::register,
        auth_handler::login,
        auth_handler::current_user,
        product_handler::all_products,
        product_handler::product,
        product_handler::find_product,
        product_handler::store_products,
        product_handler::scrape_errors,
        scraper_handler::start_scraper,
        scraper_handler::scraper_health,
        scraper_handler::scraper_state,
        shopping_list_handler::create_shopping_list,
        shopping_list_handler::shopping_list,
        shopping_list_handler::shopping_lists,
    ),
    components(
        schemas(
            UserResponse,
            Product,
            ScrapeError,
            ScraperStatus,
            ScraperState,
            ScraperHealth,
            ShoppingListView,
            ShoppingListSummary,
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            shopping_list_handler::CreateShoppingListRequest,
            MessageResponse,
            LoginResponse,
            CreatedResponse,
            UserDataResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and token lookup"),
        (name = "Products", description = "Scraped product catalogue"),
        (name = "Scraper", description = "Control of the external scraper"),
        (name = "Shopping lists", description = "Lists with live price totals")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token obtained from /auth/login"))
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_route_documented() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for path in [
            "/auth/register",
            "/auth/login",
            "/auth/user",
            "/v1/all_products",
            "/v1/product",
            "/v1/find_product",
            "/v1/store",
            "/v1/scrape_errors",
            "/v1/start_scraper",
            "/v1/scraper_health",
            "/v1/scraper_state",
            "/v1/shopping_list",
            "/v1/shopping_lists",
        ] {
            assert!(paths.contains(&path), "{} missing from OpenAPI document", path);
        }
    }

    #[test]
    fn test_current_user_documented_with_data_envelope() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();

        let body = &doc["paths"]["/auth/user"]["get"]["responses"]["200"]["content"]
            ["application/json"]["schema"]["$ref"];
        assert_eq!(body, "#/components/schemas/UserDataResponse");

        let envelope = &doc["components"]["schemas"]["UserDataResponse"];
        assert_eq!(envelope["required"], serde_json::json!(["data"]));
    }

    #[test]
    fn test_bearer_scheme_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");

        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
