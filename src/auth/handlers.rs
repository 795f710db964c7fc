use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    Json,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthData, LoginRequest, RegisterRequest},
        extractors::CurrentUser,
        jwt::JwtKeys,
        password::{hash_password, verify_password},
    },
    error::AppError,
    response::ApiResponse,
    state::AppState,
    users::dto::UserData,
    users::repo::User,
};

// Request payloads carry plaintext passwords, so they are always skipped
// from instrumented spans.

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AuthData>>), AppError> {
    payload.name = payload.name.trim().to_string();
    payload.email = payload.email.trim().to_lowercase();

    let errors = payload.validate();
    if !errors.is_empty() {
        warn!(email = %payload.email, "register payload failed validation");
        return Err(AppError::Validation(errors));
    }

    if User::find_by_email(&state.db, &payload.email).await?.is_some() {
        warn!(email = %payload.email, "email already registered");
        return Err(AppError::Conflict(
            "User with this email already exists".into(),
        ));
    }

    let hash = hash_password(&payload.password)?;
    let user = User::create(&state.db, &payload.name, &payload.email, &hash).await?;

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id, user.role)?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "User registered successfully",
            AuthData {
                user: user.into(),
                token,
            },
        )),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<AuthData>>, AppError> {
    payload.email = payload.email.trim().to_lowercase();

    let errors = payload.validate();
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    // Unknown email and wrong password produce the same outward signal; the
    // client is never told which half was wrong.
    let user = User::find_by_email(&state.db, &payload.email)
        .await?
        .ok_or_else(|| {
            warn!(email = %payload.email, "login with unknown email");
            AppError::InvalidCredentials
        })?;

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(user_id = %user.id, "login with invalid password");
        return Err(AppError::InvalidCredentials);
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id, user.role)?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Json(ApiResponse::with_message(
        "Login successful",
        AuthData {
            user: user.into(),
            token,
        },
    )))
}

#[instrument(skip_all)]
pub async fn me(CurrentUser(user): CurrentUser) -> Json<ApiResponse<UserData>> {
    Json(ApiResponse::data(UserData { user: user.into() }))
}
