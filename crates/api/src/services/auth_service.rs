//! Authentication service - registration, login and token resolution.
//!
//! Password hashing lives in the domain `Password` value object; token
//! signing is delegated to a `TokenService`.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::sync::Arc;
use uuid::Uuid;

use super::token_service::{IssuedToken, TokenService};
use crate::infra::{UnitOfWork, UserRecord};
use common::{AppError, AppResult, OptionExt};
use domain::{NewUser, Password, UserResponse};

/// Hash verified against when the email is unknown, so a miss costs the
/// same argon2 work as a wrong password.
static DUMMY_PASSWORD: Lazy<Password> = Lazy::new(|| {
    Password::new("placeholder-password-never-matches")
        .unwrap_or_else(|_| Password::from_hash(String::new()))
});

#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create an account and return its id.
    async fn register(&self, input: NewUser) -> AppResult<Uuid>;

    /// Exchange credentials for a signed token.
    async fn login(&self, email: &str, password: &str) -> AppResult<IssuedToken>;

    /// Resolve a bearer token to the user id it was issued for.
    fn authenticate(&self, token: &str) -> AppResult<Uuid>;

    /// Resolve a bearer token to the public view of its user.
    async fn current_user(&self, token: &str) -> AppResult<UserResponse>;
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    tokens: Arc<dyn TokenService>,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, tokens: Arc<dyn TokenService>) -> Self {
        Self { uow, tokens }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn register(&self, input: NewUser) -> AppResult<Uuid> {
        input.validate()?;

        if self.uow.users().find_by_email(&input.email).await?.is_some() {
            return Err(AppError::conflict("User"));
        }

        let NewUser {
            email,
            password,
            first_name,
            last_name,
        } = input;

        // argon2 is CPU bound; keep it off the async workers
        let password_hash = tokio::task::spawn_blocking(move || Password::new(&password))
            .await
            .map_err(|e| AppError::internal(format!("Password hashing task failed: {}", e)))??
            .into_string();

        let user = self
            .uow
            .users()
            .create(UserRecord {
                email,
                password_hash,
                first_name,
                last_name,
            })
            .await?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user.id)
    }

    async fn login(&self, email: &str, password: &str) -> AppResult<IssuedToken> {
        let user = self.uow.users().find_by_email(email).await?;

        let stored = match &user {
            Some(user) => Password::from_hash(user.password_hash.clone()),
            None => DUMMY_PASSWORD.clone(),
        };
        let candidate = password.to_string();

        let password_valid = tokio::task::spawn_blocking(move || stored.verify(&candidate))
            .await
            .map_err(|e| AppError::internal(format!("Password verification task failed: {}", e)))?;

        match user {
            Some(user) if password_valid => {
                let issued = self.tokens.issue(user.id)?;
                tracing::info!(user_id = %user.id, "User logged in");
                Ok(issued)
            }
            _ => Err(AppError::InvalidCredentials),
        }
    }

    fn authenticate(&self, token: &str) -> AppResult<Uuid> {
        self.tokens.validate(token)
    }

    async fn current_user(&self, token: &str) -> AppResult<UserResponse> {
        let user_id = self.authenticate(token)?;
        let user = self
            .uow
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or_not_found("User")?;

        Ok(UserResponse::from(user))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use mockall::predicate::eq;

    use super::*;
    use crate::infra::repositories::MockUserRepository;
    use crate::services::testing::TestUnitOfWork;
    use crate::services::token_service::MockTokenService;
    use domain::User;

    const PASSWORD: &str = "appeltaart";

    fn stored_user(email: &str) -> User {
        User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: Password::new(PASSWORD).unwrap().into_string(),
            first_name: "Jan".to_string(),
            last_name: "Jansen".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn new_user(email: &str, password: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            password: password.to_string(),
            first_name: "Jan".to_string(),
            last_name: "Jansen".to_string(),
        }
    }

    fn service(users: MockUserRepository, tokens: MockTokenService) -> Authenticator<TestUnitOfWork> {
        let uow = TestUnitOfWork::new().with_users(users);
        Authenticator::new(Arc::new(uow), Arc::new(tokens))
    }

    fn issued(token: &str) -> IssuedToken {
        IssuedToken {
            token: token.to_string(),
            expires_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_register_stores_hash_not_plaintext() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));
        users
            .expect_create()
            .withf(|record| {
                record.password_hash != PASSWORD
                    && Password::from_hash(record.password_hash.clone()).verify(PASSWORD)
            })
            .returning(|record| {
                Ok(User {
                    id: Uuid::new_v4(),
                    email: record.email,
                    password_hash: record.password_hash,
                    first_name: record.first_name,
                    last_name: record.last_name,
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                })
            });

        let result = service(users, MockTokenService::new())
            .register(new_user("jan@example.com", PASSWORD))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_register_duplicate_email_conflicts() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .with(eq("jan@example.com"))
            .returning(|email| Ok(Some(stored_user(email))));
        users.expect_create().never();

        let result = service(users, MockTokenService::new())
            .register(new_user("jan@example.com", PASSWORD))
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_input_before_lookup() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().never();

        let service = service(users, MockTokenService::new());

        let bad_email = service.register(new_user("not-an-email", PASSWORD)).await;
        let short_password = service.register(new_user("jan@example.com", "kort")).await;

        assert!(matches!(bad_email, Err(AppError::Validation(_))));
        assert!(matches!(short_password, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_login_success_issues_token() {
        let user = stored_user("jan@example.com");
        let user_id = user.id;

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let mut tokens = MockTokenService::new();
        tokens
            .expect_issue()
            .with(eq(user_id))
            .returning(|_| Ok(issued("signed")));

        let result = service(users, tokens)
            .login("jan@example.com", PASSWORD)
            .await
            .unwrap();

        assert_eq!(result.token, "signed");
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let user = stored_user("jan@example.com");

        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(move |email| {
            Ok((email == "jan@example.com").then(|| user.clone()))
        });
        let mut tokens = MockTokenService::new();
        tokens.expect_issue().never();

        let service = service(users, tokens);

        let wrong_password = service.login("jan@example.com", "verkeerd!").await.unwrap_err();
        let unknown_email = service.login("piet@example.com", PASSWORD).await.unwrap_err();

        assert!(matches!(wrong_password, AppError::InvalidCredentials));
        assert!(matches!(unknown_email, AppError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
        assert_eq!(wrong_password.status(), unknown_email.status());
    }

    #[tokio::test]
    async fn test_current_user_resolves_token() {
        let user = stored_user("jan@example.com");
        let user_id = user.id;

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .with(eq(user_id))
            .returning(move |_| Ok(Some(user.clone())));
        let mut tokens = MockTokenService::new();
        tokens
            .expect_validate()
            .with(eq("signed"))
            .returning(move |_| Ok(user_id));

        let response = service(users, tokens).current_user("signed").await.unwrap();

        assert_eq!(response.id, user_id);
        assert_eq!(response.email, "jan@example.com");
    }

    #[tokio::test]
    async fn test_current_user_deleted_account_not_found() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(|_| Ok(None));
        let mut tokens = MockTokenService::new();
        tokens.expect_validate().returning(|_| Ok(Uuid::new_v4()));

        let result = service(users, tokens).current_user("signed").await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_authenticate_propagates_token_rejection() {
        let mut tokens = MockTokenService::new();
        tokens
            .expect_validate()
            .returning(|_| Err(AppError::Unauthorized));

        let result = service(MockUserRepository::new(), tokens).authenticate("forged");

        assert!(matches!(result, Err(AppError::Unauthorized)));
    }
}
