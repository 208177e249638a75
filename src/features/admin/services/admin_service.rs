use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::admin::dtos::UserAccountDto;
use crate::features::auth::models::Role;
use crate::modules::sheets::SheetStore;
use crate::shared::constants::USERS_TABLE;

/// Credential table column order for the replace path.
const USER_COLUMNS: [&str; 4] = ["username", "password", "role", "station"];

/// Wholesale editing of the credential reference table.
///
/// Reads are the raw rows as stored; the replace path validates roles and
/// drops blank rows so a stray empty grid line never becomes an account.
pub struct AdminService {
    store: Arc<dyn SheetStore>,
}

impl AdminService {
    pub fn new(store: Arc<dyn SheetStore>) -> Self {
        Self { store }
    }

    pub async fn list_users(&self) -> Vec<UserAccountDto> {
        self.store
            .fetch_all(USERS_TABLE)
            .await
            .iter()
            .map(|row| UserAccountDto {
                username: row.get("username").trim().to_string(),
                password: row.get("password").trim().to_string(),
                role: row.get("role").trim().to_string(),
                station: row.get("station").trim().to_string(),
            })
            .filter(|u| !u.username.is_empty())
            .collect()
    }

    pub async fn replace_users(&self, entries: Vec<UserAccountDto>) -> Result<()> {
        let mut rows = Vec::with_capacity(entries.len());
        for entry in entries {
            let username = entry.username.trim().to_string();
            let password = entry.password.trim().to_string();
            if username.is_empty() && password.is_empty() {
                continue;
            }
            if username.is_empty() || password.is_empty() {
                return Err(AppError::Validation(format!(
                    "Account '{}' needs both a username and a password",
                    username
                )));
            }
            let role = entry.role.trim();
            if Role::parse(role).is_none() {
                return Err(AppError::Validation(format!(
                    "Unknown role '{}' for account '{}'",
                    role, username
                )));
            }
            rows.push(vec![
                username,
                password,
                role.to_string(),
                entry.station.trim().to_string(),
            ]);
        }

        if rows.is_empty() {
            return Err(AppError::Validation(
                "Refusing to replace the account table with an empty one".to_string(),
            ));
        }

        let header = USER_COLUMNS.iter().map(|c| c.to_string()).collect();
        self.store.replace_all(USERS_TABLE, header, rows).await?;
        tracing::info!("Credential table replaced");
        Ok(())
    }
}
