use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;

use crate::{auth::jwt::JwtKeys, error::AppError, state::AppState, users::repo::User};

/// Authenticated identity for a request: bearer token extracted, verified and
/// resolved to a live user row. Handlers take this as an argument to sit
/// behind the gate; no anonymous request reaches them.
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::MissingToken)?;

        let token = header
            .strip_prefix("Bearer ")
            .or_else(|| header.strip_prefix("bearer "))
            .ok_or(AppError::InvalidToken)?;

        let keys = JwtKeys::from_ref(state);
        let claims = keys.verify(token)?;

        // One store lookup per request: a token whose subject has been
        // deleted is as invalid as a forged one.
        let user = User::find_by_id(&state.db, claims.sub)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %claims.sub, "token subject no longer exists");
                AppError::InvalidToken
            })?;

        Ok(CurrentUser(user))
    }
}
