//! Role-based authorization guards.
//!
//! Roles are disjoint capability sets, so every guard admits exactly its
//! own role. Each guard extracts the request-scoped [`ActorContext`] placed
//! in extensions by the session middleware.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::core::error::AppError;
use crate::features::auth::models::{ActorContext, Role};

fn require_role(parts: &Parts, role: Role) -> Result<ActorContext, AppError> {
    let actor = parts
        .extensions
        .get::<ActorContext>()
        .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))?;

    if actor.role != role {
        return Err(AppError::Forbidden(format!("{} access required", role)));
    }

    Ok(actor.clone())
}

/// Admin: view all tickets, edit catalogs and master data, run aggregates.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireAdmin(actor): RequireAdmin) { ... }
/// ```
pub struct RequireAdmin(pub ActorContext);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(RequireAdmin(require_role(parts, Role::Admin)?))
    }
}

/// Reporter: create tickets, view own tickets, re-notify own tickets.
pub struct RequireReporter(pub ActorContext);

impl<S> FromRequestParts<S> for RequireReporter
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(RequireReporter(require_role(parts, Role::Reporter)?))
    }
}

/// Technician: search tickets by SN, apply lifecycle updates.
pub struct RequireTechnician(pub ActorContext);

impl<S> FromRequestParts<S> for RequireTechnician
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(RequireTechnician(require_role(parts, Role::Technician)?))
    }
}
