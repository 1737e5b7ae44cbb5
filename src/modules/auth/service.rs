use std::sync::LazyLock;

use squadgate_auth::{IdentityStore, TokenService};
use squadgate_core::{AppError, hash_password, verify_password};
use tracing::{info, instrument, warn};

use super::model::{LoginRequest, LoginResponse};
use crate::metrics::{track_login, track_token_issued};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

// Checked against when the email is unknown, at the same cost as real hashes
static UNKNOWN_ACCOUNT_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("squadgate-unknown-account").ok());

pub struct AuthService;

impl AuthService {
    /// Checks the password against the stored bcrypt hash and issues a token
    /// carrying the stored role. Unknown email and wrong password fail alike.
    #[instrument(skip_all, fields(email = %dto.email))]
    pub async fn login(
        store: &dyn IdentityStore,
        tokens: &TokenService,
        dto: LoginRequest,
    ) -> Result<LoginResponse, AppError> {
        let Some(record) = store.find_by_email(&dto.email).await? else {
            check_password(dto.password, None).await?;
            warn!("login for unknown account");
            track_login(false);
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };

        let hash = record.password_hash().to_string();
        let is_valid = check_password(dto.password, Some(hash)).await?;

        if !is_valid {
            warn!("login with wrong password");
            track_login(false);
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        let issued = tokens.issue(&record).map_err(AppError::internal)?;
        track_login(true);
        track_token_issued();
        info!(role = %record.role(), "token issued");

        Ok(LoginResponse {
            token: issued.token,
            token_type: "Bearer".to_string(),
            expires_in: tokens.validity().num_seconds(),
        })
    }
}

/// Runs the bcrypt comparison off the async runtime. Without a stored hash
/// the password is still compared against a throwaway one and never matches.
async fn check_password(password: String, hash: Option<String>) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || match hash {
        Some(hash) => verify_password(&password, &hash),
        None => {
            if let Some(dummy) = UNKNOWN_ACCOUNT_HASH.as_deref() {
                let _ = verify_password(&password, dummy);
            }
            Ok(false)
        }
    })
    .await
    .map_err(AppError::internal)?
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    use axum::http::StatusCode;
    use squadgate_auth::{IdentityRecord, Role, StaticIdentityStore};
    use squadgate_config::JwtConfig;

    fn tokens() -> TokenService {
        TokenService::new(&JwtConfig {
            secret: "login-test-secret-0123456789abcdef".to_string(),
            token_expiry: 86_400,
        })
    }

    fn store() -> StaticIdentityStore {
        let hash = bcrypt::hash("correct horse", 4).unwrap();
        StaticIdentityStore::from_records([IdentityRecord::new(
            "coach@example.com",
            hash,
            Role::Coach,
        )])
    }

    fn request(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_issues_token_with_stored_role() {
        let tokens = tokens();
        let response = AuthService::login(
            &store(),
            &tokens,
            request("coach@example.com", "correct horse"),
        )
        .await
        .unwrap();

        assert_eq!(response.token_type, "Bearer");
        assert_eq!(response.expires_in, 86_400);

        let identity = tokens.verify(&response.token).unwrap();
        assert_eq!(identity.identity(), "coach@example.com");
        assert_eq!(identity.role(), Role::Coach);
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_look_the_same() {
        let tokens = tokens();
        let store = store();

        let wrong = AuthService::login(&store, &tokens, request("coach@example.com", "nope"))
            .await
            .unwrap_err();
        let unknown =
            AuthService::login(&store, &tokens, request("ghost@example.com", "correct horse"))
                .await
                .unwrap_err();

        assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
        assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
        assert_eq!(wrong.message(), unknown.message());
    }

    #[tokio::test]
    async fn test_unknown_email_still_pays_for_a_password_check() {
        let tokens = tokens();
        let store = store();

        // Store hashes use cost 4, the stand-in for unknown accounts uses the default cost
        let start = Instant::now();
        AuthService::login(&store, &tokens, request("coach@example.com", "nope"))
            .await
            .unwrap_err();
        let known = start.elapsed();

        let start = Instant::now();
        AuthService::login(&store, &tokens, request("ghost@example.com", "nope"))
            .await
            .unwrap_err();
        let unknown = start.elapsed();

        assert!(
            unknown >= known,
            "unknown email answered in {unknown:?}, known email in {known:?}"
        );
    }

    #[tokio::test]
    async fn test_check_password_without_hash_never_matches() {
        assert!(!check_password("squadgate-unknown-account".to_string(), None).await.unwrap());
    }
}
