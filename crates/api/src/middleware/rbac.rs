//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose
//! [`Permissions`](festival_core::roles::Permissions) lack the capability
//! the route needs.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires create and edit permission (editors and admins).
/// Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn update(RequireEditor(user): RequireEditor) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireEditor(pub AuthUser);

impl FromRequestParts<AppState> for RequireEditor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        let permissions = user.permissions();
        permissions.require_create()?;
        permissions.require_edit()?;
        Ok(RequireEditor(user))
    }
}

/// Requires delete permission (admins only). Rejects with 403 Forbidden
/// otherwise.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        user.permissions().require_delete()?;
        Ok(RequireAdmin(user))
    }
}
