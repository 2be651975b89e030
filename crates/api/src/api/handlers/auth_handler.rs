//! Authentication handlers.

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::api::extractors::{BearerToken, ValidatedJson};
use crate::api::AppState;
use crate::types::{Created, LoginResponse, MessageResponse, UserDataResponse};
use common::AppResult;
use domain::{NewUser, MIN_PASSWORD_LENGTH};

/// User registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "jan@example.com")]
    pub email: String,
    #[validate(custom(function = "validate_password_length"))]
    #[schema(example = "appeltaart", min_length = 8)]
    pub password: String,
    #[validate(length(min = 1, max = 255, message = "First name must be 1 to 255 characters"))]
    #[schema(example = "Jan")]
    pub first_name: String,
    #[validate(length(min = 1, max = 255, message = "Last name must be 1 to 255 characters"))]
    #[schema(example = "Jansen")]
    pub last_name: String,
}

fn validate_password_length(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() >= MIN_PASSWORD_LENGTH {
        return Ok(());
    }
    Err(ValidationError::new("length").with_message(
        format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )
        .into(),
    ))
}

impl From<RegisterRequest> for NewUser {
    fn from(req: RegisterRequest) -> Self {
        NewUser {
            email: req.email,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
        }
    }
}

/// User login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "jan@example.com")]
    pub email: String,
    #[schema(example = "appeltaart")]
    pub password: String,
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/user", get(current_user))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = MessageResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "User already exists")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<Created<MessageResponse>> {
    state.auth_service.register(payload.into()).await?;

    Ok(Created(MessageResponse::new("registration success")))
}

/// Exchange credentials for a bearer token
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Malformed body"),
        (status = 401, description = "Incorrect email or password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let issued = state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(LoginResponse {
        token: issued.token,
    }))
}

/// The user the presented token belongs to, wrapped in `data`
#[utoipa::path(
    get,
    path = "/auth/user",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = UserDataResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "User no longer exists")
    )
)]
pub async fn current_user(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> AppResult<Json<UserDataResponse>> {
    let user = state.auth_service.current_user(&token).await?;

    Ok(Json(UserDataResponse { data: user }))
}
