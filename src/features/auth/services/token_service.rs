use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::models::{ActorContext, Role};

/// Claims carried by the session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub role: Role,
    pub station: String,
    pub iat: i64,
    pub exp: i64,
}

/// Issues and verifies HS256 session tokens for logged-in staff.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl_secs: i64,
}

impl TokenService {
    pub fn new(config: AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.token_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.token_secret.as_bytes()),
            token_ttl_secs: config.token_ttl.as_secs() as i64,
        }
    }

    pub fn issue(&self, actor_id: &str, role: Role, station: &str) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: actor_id.to_string(),
            role,
            station: station.to_string(),
            iat: now,
            exp: now + self.token_ttl_secs,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to issue session token: {}", e)))
    }

    pub fn verify(&self, token: &str) -> Result<ActorContext> {
        let data = decode::<SessionClaims>(token, &self.decoding_key, &Validation::default())
            .map_err(|e| AppError::Unauthorized(format!("Invalid session token: {}", e)))?;

        Ok(ActorContext {
            actor_id: data.claims.sub,
            role: data.claims.role,
            station: data.claims.station,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn service() -> TokenService {
        TokenService::new(AuthConfig {
            token_secret: "0123456789abcdef0123456789abcdef".to_string(),
            token_ttl: Duration::from_secs(3600),
        })
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let svc = service();
        let token = svc.issue("somchai", Role::Technician, "SMT-2").unwrap();
        let actor = svc.verify(&token).unwrap();
        assert_eq!(actor.actor_id, "somchai");
        assert_eq!(actor.role, Role::Technician);
        assert_eq!(actor.station, "SMT-2");
    }

    #[test]
    fn test_verify_rejects_garbage() {
        assert!(service().verify("not.a.token").is_err());
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let token = service().issue("somchai", Role::Admin, "HQ").unwrap();
        let other = TokenService::new(AuthConfig {
            token_secret: "ffffffffffffffffffffffffffffffff".to_string(),
            token_ttl: Duration::from_secs(3600),
        });
        assert!(other.verify(&token).is_err());
    }
}
