use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::SessionResponseDto;
use crate::features::auth::models::UserAccount;
use crate::features::auth::services::TokenService;
use crate::modules::sheets::SheetStore;
use crate::shared::constants::USERS_TABLE;

/// Resolves credentials against the user reference table and opens sessions.
pub struct AuthService {
    store: Arc<dyn SheetStore>,
    token_service: Arc<TokenService>,
}

impl AuthService {
    pub fn new(store: Arc<dyn SheetStore>, token_service: Arc<TokenService>) -> Self {
        Self {
            store,
            token_service,
        }
    }

    /// Exact, case-sensitive match on trimmed username + secret.
    ///
    /// No match means no session and no partial capability grant. A store
    /// outage reads as an empty table and therefore also fails the login.
    pub async fn login(&self, username: &str, password: &str) -> Result<SessionResponseDto> {
        let username = username.trim();
        let password = password.trim();

        let account = self
            .store
            .fetch_all(USERS_TABLE)
            .await
            .iter()
            .filter_map(UserAccount::from_row)
            .find(|a| a.username == username && a.credential_secret == password)
            .ok_or_else(|| {
                tracing::info!("Login rejected for '{}'", username);
                AppError::Unauthorized("Invalid username or password".to_string())
            })?;

        let token =
            self.token_service
                .issue(&account.username, account.role, &account.home_station)?;

        tracing::info!(
            "Session opened for '{}' as {}",
            account.username,
            account.role
        );

        Ok(SessionResponseDto {
            token,
            username: account.username,
            role: account.role,
            station: account.home_station,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::AuthConfig;
    use crate::features::auth::models::Role;
    use crate::modules::sheets::memory::MemorySheetStore;
    use std::time::Duration;

    fn seeded_store() -> Arc<MemorySheetStore> {
        let store = MemorySheetStore::new();
        store.seed(
            USERS_TABLE,
            &["username", "password", "role", "station"],
            vec![
                vec!["somchai".into(), "s3cret".into(), "user".into(), "SMT-2".into()],
                vec!["boss".into(), "topsecret".into(), "admin".into(), "HQ".into()],
            ],
        );
        Arc::new(store)
    }

    fn service(store: Arc<MemorySheetStore>) -> AuthService {
        let token_service = Arc::new(TokenService::new(AuthConfig {
            token_secret: "0123456789abcdef0123456789abcdef".to_string(),
            token_ttl: Duration::from_secs(3600),
        }));
        AuthService::new(store, token_service)
    }

    #[tokio::test]
    async fn test_login_trims_and_matches_exactly() {
        let svc = service(seeded_store());
        let session = svc.login("  somchai ", " s3cret ").await.unwrap();
        assert_eq!(session.username, "somchai");
        assert_eq!(session.role, Role::Reporter);
        assert_eq!(session.station, "SMT-2");
        assert!(!session.token.is_empty());
    }

    #[tokio::test]
    async fn test_login_is_case_sensitive() {
        let svc = service(seeded_store());
        assert!(svc.login("Somchai", "s3cret").await.is_err());
        assert!(svc.login("somchai", "S3CRET").await.is_err());
    }

    #[tokio::test]
    async fn test_login_fails_when_store_unavailable() {
        let store = seeded_store();
        store.set_unavailable(true);
        let svc = service(store);
        assert!(svc.login("somchai", "s3cret").await.is_err());
    }
}
