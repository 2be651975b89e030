//! Bearer token issuance and validation (HS256 JWT).
//!
//! Tokens are stateless: validity is the signature plus the expiry claim.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use common::{AppError, AppResult, JwtConfig};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub exp: i64,
    pub iat: i64,
}

/// A freshly signed token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait TokenService: Send + Sync {
    /// Sign a token for `user_id` expiring after the configured lifetime.
    fn issue(&self, user_id: Uuid) -> AppResult<IssuedToken>;

    /// Return the user id a valid, unexpired token was issued for.
    fn validate(&self, token: &str) -> AppResult<Uuid>;
}

/// JWT implementation. Keys are derived once from the process-wide secret.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    lifetime: Duration,
}

impl JwtTokenService {
    pub fn new(secret: &[u8], lifetime: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            lifetime,
        }
    }

    pub fn from_config(config: &JwtConfig) -> AppResult<Self> {
        let lifetime = Duration::try_hours(config.expiration_hours).ok_or_else(|| {
            AppError::internal(format!(
                "Token lifetime of {} hours is out of range",
                config.expiration_hours
            ))
        })?;
        Ok(Self::new(config.secret.as_bytes(), lifetime))
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, user_id: Uuid) -> AppResult<IssuedToken> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.lifetime)
            .ok_or_else(|| AppError::internal("Token expiry overflows the calendar"))?;

        let claims = Claims {
            sub: user_id,
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;

        Ok(IssuedToken { token, expires_at })
    }

    fn validate(&self, token: &str) -> AppResult<Uuid> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(AppError::from)?;
        Ok(data.claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};

    use super::*;

    const SECRET: &[u8] = b"test-secret-key-for-testing-only-32chars";

    fn service() -> JwtTokenService {
        JwtTokenService::new(SECRET, Duration::hours(1))
    }

    #[test]
    fn test_issued_token_validates_to_same_user() {
        let tokens = service();
        let user_id = Uuid::new_v4();

        let issued = tokens.issue(user_id).unwrap();

        assert_eq!(tokens.validate(&issued.token).unwrap(), user_id);
        assert!(issued.expires_at > Utc::now());
    }

    #[test]
    fn test_expired_token_rejected() {
        let tokens = JwtTokenService::new(SECRET, Duration::minutes(-5));
        let issued = tokens.issue(Uuid::new_v4()).unwrap();

        assert!(matches!(tokens.validate(&issued.token), Err(AppError::Jwt(_))));
    }

    #[test]
    fn test_unrepresentable_lifetime_is_error() {
        let config = JwtConfig {
            secret: String::from_utf8(SECRET.to_vec()).unwrap(),
            expiration_hours: i64::MAX,
        };

        assert!(matches!(
            JwtTokenService::from_config(&config),
            Err(AppError::Internal(_))
        ));
    }

    #[test]
    fn test_expiry_past_calendar_end_is_error() {
        // ~273k years, beyond the last representable date
        let tokens = JwtTokenService::new(SECRET, Duration::days(100_000_000));

        assert!(matches!(
            tokens.issue(Uuid::new_v4()),
            Err(AppError::Internal(_))
        ));
    }

    #[test]
    fn test_from_config_uses_configured_lifetime() {
        let config = JwtConfig {
            secret: String::from_utf8(SECRET.to_vec()).unwrap(),
            expiration_hours: 2,
        };
        let issued = JwtTokenService::from_config(&config)
            .unwrap()
            .issue(Uuid::new_v4())
            .unwrap();

        let remaining = issued.expires_at - Utc::now();
        assert!(remaining > Duration::minutes(119) && remaining <= Duration::hours(2));
    }

    #[test]
    fn test_any_signature_bit_flip_rejected() {
        let tokens = service();
        let issued = tokens.issue(Uuid::new_v4()).unwrap();

        let (unsigned, signature) = issued.token.rsplit_once('.').unwrap();
        let signature = URL_SAFE_NO_PAD.decode(signature).unwrap();

        for byte in 0..signature.len() {
            for bit in 0..8 {
                let mut mutated = signature.clone();
                mutated[byte] ^= 1 << bit;
                let forged = format!("{}.{}", unsigned, URL_SAFE_NO_PAD.encode(&mutated));

                assert!(
                    tokens.validate(&forged).is_err(),
                    "flipping bit {} of byte {} was accepted",
                    bit,
                    byte
                );
            }
        }
    }

    #[test]
    fn test_token_from_other_secret_rejected() {
        let other = JwtTokenService::new(b"another-secret-key-that-is-long-enough", Duration::hours(1));
        let issued = other.issue(Uuid::new_v4()).unwrap();

        assert!(service().validate(&issued.token).is_err());
    }

    #[test]
    fn test_malformed_token_rejected() {
        let tokens = service();

        assert!(tokens.validate("").is_err());
        assert!(tokens.validate("not-a-token").is_err());
        assert!(tokens.validate("a.b.c").is_err());
    }

    #[test]
    fn test_claims_carry_only_identity_and_times() {
        let issued = service().issue(Uuid::new_v4()).unwrap();
        let payload = issued.token.split('.').nth(1).unwrap();
        let json: serde_json::Value =
            serde_json::from_slice(&URL_SAFE_NO_PAD.decode(payload).unwrap()).unwrap();

        let mut keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["exp", "iat", "sub"]);
    }
}
